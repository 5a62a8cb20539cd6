use std::fmt::Display;

use bytes::{BufMut, BytesMut};

use super::{Frame, escape::escape};
use crate::{
    CONTENT_LENGTH,
    error::{FrameError, HeaderFault},
    protocol::Headers,
};

// COMMAND LF (KEY ':' VALUE LF)* LF BODY NUL
pub(crate) fn encode<I, K, V>(command: &str, headers: I, body: &[u8]) -> Result<Frame, FrameError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Display,
{
    if command.is_empty() {
        return Err(FrameError::EmptyCommand);
    }
    if command.contains(char::is_control) {
        tracing::trace!(command, "control character in command");
        return Err(FrameError::InvalidCommand(command.to_owned()));
    }

    let mut buf = BytesMut::with_capacity(command.len() + body.len() + 64);
    buf.put_slice(command.as_bytes());
    buf.put_u8(b'\n');

    // every line goes on the wire, the frame keeps the first of each key
    let mut frame_headers = Headers::new();
    for (key, value) in headers {
        let key = key.as_ref();
        if key.is_empty() {
            tracing::trace!(offset = buf.len(), "empty header name");
            return Err(FrameError::MalformedHeader {
                offset: buf.len(),
                fault: HeaderFault::EmptyKey,
            });
        }
        let value = value.to_string();

        buf.put_slice(escape(key).as_bytes());
        buf.put_u8(b':');
        buf.put_slice(escape(&value).as_bytes());
        buf.put_u8(b'\n');

        frame_headers.insert(key, value);
    }

    if let Some(value) = frame_headers
        .get(CONTENT_LENGTH)
        .filter(|v| v.trim().parse::<usize>().is_err())
    {
        tracing::trace!(value, "invalid content-length");
        return Err(FrameError::InvalidContentLength(value.to_owned()));
    }

    buf.put_u8(b'\n');
    let body_start = buf.len();
    buf.put_slice(body);
    buf.put_u8(0);

    tracing::trace!(
        command,
        headers = frame_headers.len(),
        body_len = body.len(),
        len = buf.len(),
        "encoded frame"
    );

    let raw = buf.freeze();
    Ok(Frame {
        command: command.to_owned(),
        headers: frame_headers,
        body: raw.slice(body_start..body_start + body.len()),
        raw,
        offset: 0,
    })
}
