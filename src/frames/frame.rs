use std::{borrow::Cow, fmt::Display, ops::Range};

use bytes::Bytes;

use crate::{
    HEARTBEAT_COMMAND,
    error::{FrameError, HeaderError},
    protocol::{Headers, Primitive},
};

/// One protocol message: command, headers and body.
///
/// Frames are immutable and only come out of [`Frame::encode`] or one of the
/// decoding constructors. Every frame keeps the exact bytes it was read from
/// (or written to), see [`Frame::raw`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub(crate) command: String,
    pub(crate) headers: Headers,
    pub(crate) body: Bytes,
    pub(crate) raw: Bytes,
    pub(crate) offset: usize,
}

impl Frame {
    // the decoder's heartbeat, `raw` is the lone line feed
    pub(crate) fn heartbeat(raw: Bytes, offset: usize) -> Self {
        Self {
            command: HEARTBEAT_COMMAND.to_owned(),
            headers: Headers::new(),
            body: Bytes::new(),
            raw,
            offset,
        }
    }

    /// Builds a frame from a command, headers and body.
    ///
    /// Headers are written in iteration order, escaped, and the body is
    /// written as is followed by a zero byte. **No `content-length` header is
    /// ever added.** Without one a reader ends the body at its first zero
    /// byte, so a body containing zeros is silently cut short on the other
    /// side. Add `content-length` with the exact byte count to keep such
    /// bodies.
    pub fn encode<I, K, V>(command: &str, headers: I, body: &[u8]) -> Result<Self, FrameError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Display,
    {
        super::encode::encode(command, headers, body)
    }

    /// Frame with only a command.
    pub fn from_command(command: &str) -> Result<Self, FrameError> {
        Self::encode(command, &Headers::new(), &[])
    }

    /// Decodes a whole buffer. The frame shares the buffer's memory.
    pub fn decode(buf: &Bytes) -> Result<Self, FrameError> { Self::decode_range(buf, 0, buf.len()) }

    /// Decodes the frame held in `buf[start..start + len]`.
    pub fn decode_range(buf: &Bytes, start: usize, len: usize) -> Result<Self, FrameError> {
        super::decode::decode(buf, start, len)
    }

    /// Decodes a borrowed slice, copying it once.
    pub fn from_slice(data: &[u8]) -> Result<Self, FrameError> {
        Self::decode(&Bytes::copy_from_slice(data))
    }

    pub fn command(&self) -> &str { &self.command }

    pub fn is_heartbeat(&self) -> bool { self.raw.as_ref() == b"\n" && self.command == HEARTBEAT_COMMAND }

    pub fn headers(&self) -> &Headers { &self.headers }

    pub fn has_header(&self, key: &str) -> bool { self.headers.contains(key) }

    pub fn header(&self, key: &str) -> Option<&str> { self.headers.get(key) }

    /// Looks up `key` and converts its trimmed value to `T`.
    pub fn header_as<T: Primitive>(&self, key: &str) -> Result<T, HeaderError> {
        let value = self
            .header(key)
            .ok_or_else(|| HeaderError::Missing(key.to_owned()))?;

        T::parse_primitive(value.trim()).ok_or_else(|| HeaderError::Coerce {
            key: key.to_owned(),
            value: value.to_owned(),
            target: T::TYPE_NAME,
        })
    }

    pub fn body(&self) -> &[u8] { &self.body }

    /// Body sharing the frame's buffer.
    pub fn body_bytes(&self) -> Bytes { self.body.clone() }

    pub fn body_text(&self) -> Cow<'_, str> { String::from_utf8_lossy(&self.body) }

    /// The frame's wire form, through its terminating zero byte.
    pub fn raw(&self) -> &[u8] { &self.raw }

    pub fn raw_bytes(&self) -> Bytes { self.raw.clone() }

    /// Where [`Frame::raw`] sits in the buffer the frame was decoded from.
    pub fn raw_range(&self) -> Range<usize> { self.offset..self.offset + self.raw.len() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(raw: &[u8]) -> Frame { Frame::from_slice(raw).unwrap() }

    #[test]
    fn heartbeat() {
        let ping = frame(b"\n");
        assert_eq!(ping.command(), "PING");
        assert!(ping.headers().is_empty());
        assert!(ping.body().is_empty());
        assert_eq!(ping.raw(), b"\n");
        assert!(ping.is_heartbeat());
        assert!(!frame(b"PING\n\n\0").is_heartbeat());
    }

    #[test]
    fn converts_primitive_header_values() {
        let f = frame(b"CONNECT\nnumber: 1234\nflag:true\n\nthe body\0");
        assert_eq!(f.header_as::<i32>("number"), Ok(1234));
        assert_eq!(f.header_as::<bool>("flag"), Ok(true));
        assert_eq!(f.header("number"), Some(" 1234"));
    }

    #[test]
    fn typed_lookup_errors() {
        let f = frame(b"CONNECT\nnumber: twelve\n\n\0");
        assert_eq!(
            f.header_as::<u32>("number"),
            Err(HeaderError::Coerce {
                key: "number".into(),
                value: " twelve".into(),
                target: "u32",
            })
        );
        assert_eq!(
            f.header_as::<u32>("missing"),
            Err(HeaderError::Missing("missing".into()))
        );
    }

    #[test]
    fn body_views() {
        let f = frame(b"CONNECT\n\nthe body\0");
        assert_eq!(f.body(), b"the body");
        assert_eq!(f.body_text(), "the body");
        assert_eq!(f.body_bytes(), Bytes::from_static(b"the body"));
    }

    #[test]
    fn raw_range_of_encoded_frame() {
        let f = Frame::encode("SEND", [("a", "b")], b"x").unwrap();
        assert_eq!(f.raw(), b"SEND\na:b\n\nx\0");
        assert_eq!(f.raw_range(), 0..12);
    }
}
