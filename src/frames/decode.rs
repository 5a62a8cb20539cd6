use bytes::Bytes;

use super::{Frame, escape::unescape};
use crate::{
    CONTENT_LENGTH,
    error::{FrameError, HeaderFault},
    protocol::Headers,
};

// helper type since decoder errors are FrameErrors
type Result<T> = std::result::Result<T, FrameError>;

#[derive(Debug, Clone, Copy)]
enum DecodeState {
    Command,
    Headers,
    Body,
    Done {
        body_start: usize,
        body_end: usize,
        raw_end: usize,
    },
}

/// Decodes `buf[start..start + len]` into a frame sharing `buf`'s memory.
pub(crate) fn decode(buf: &Bytes, start: usize, len: usize) -> Result<Frame> {
    let end = start
        .checked_add(len)
        .filter(|&end| end <= buf.len())
        .ok_or(FrameError::OutOfBounds {
            start,
            len,
            available: buf.len(),
        })?;

    if len == 1 && buf[start] == b'\n' {
        tracing::debug!(offset = start, "heartbeat");
        return Ok(Frame::heartbeat(buf.slice(start..end), start));
    }

    FrameDecoder {
        buf,
        data: buf.as_ref(),
        start,
        end,
        pos: start,
        command: String::new(),
        headers: Headers::new(),
    }
    .run()
}

struct FrameDecoder<'a> {
    buf: &'a Bytes,
    data: &'a [u8],
    start: usize,
    end: usize,
    pos: usize,
    command: String,
    headers: Headers,
}

impl<'a> FrameDecoder<'a> {
    fn run(mut self) -> Result<Frame> {
        tracing::trace!(start = self.start, len = self.end - self.start, "decoder");

        let mut state = DecodeState::Command;
        loop {
            let next_state = match state {
                DecodeState::Command => self.parse_command()?,
                DecodeState::Headers => self.parse_header_line()?,
                DecodeState::Body => self.parse_body()?,
                DecodeState::Done {
                    body_start,
                    body_end,
                    raw_end,
                } => return Ok(self.finish(body_start, body_end, raw_end)),
            };
            tracing::trace!(
                from = ?state,
                to = ?next_state,
                pos = self.pos,
                "state transition"
            );
            state = next_state;
        }
    }

    fn parse_command(&mut self) -> Result<DecodeState> {
        let Some(lf) = self.find(b'\n', self.pos, self.end) else {
            tracing::trace!("no command terminator");
            return Err(FrameError::MissingCommandTerminator);
        };

        let command = self.text(self.pos, lf)?;
        if command.is_empty() {
            tracing::trace!("empty command");
            return Err(FrameError::EmptyCommand);
        }
        self.command = command.to_owned();
        self.pos = lf + 1;

        // bare command, nothing after the command line
        if self.pos == self.end {
            return Ok(DecodeState::Done {
                body_start: self.pos,
                body_end: self.pos,
                raw_end: self.end,
            });
        }
        Ok(DecodeState::Headers)
    }

    fn parse_header_line(&mut self) -> Result<DecodeState> {
        let pos = self.pos;
        if pos >= self.end {
            return Err(self.malformed(HeaderFault::MissingBlankLine));
        }

        // blank line, LF or CRLF
        match self.data[pos] {
            b'\n' => {
                self.pos = pos + 1;
                return Ok(DecodeState::Body);
            }
            b'\r' if pos + 1 < self.end && self.data[pos + 1] == b'\n' => {
                self.pos = pos + 2;
                return Ok(DecodeState::Body);
            }
            _ => {}
        }

        let line_end = self.find(b'\n', pos, self.end);
        let Some(sep) = self.find(b':', pos, line_end.unwrap_or(self.end)) else {
            return Err(self.malformed(HeaderFault::MissingSeparator));
        };
        let Some(line_end) = line_end else {
            return Err(self.malformed(HeaderFault::MissingTerminator));
        };
        if sep == pos {
            return Err(self.malformed(HeaderFault::EmptyKey));
        }

        let key = unescape(self.text(pos, sep)?).into_owned();
        let value = unescape(self.text(sep + 1, line_end)?).into_owned();

        if self.headers.contains(&key) {
            tracing::trace!(key = key.as_str(), "duplicate header dropped");
        } else {
            self.headers.insert(key, value);
        }

        self.pos = line_end + 1;
        Ok(DecodeState::Headers)
    }

    fn parse_body(&mut self) -> Result<DecodeState> {
        let body_start = self.pos;

        let body_end = if let Some(value) = self.headers.get(CONTENT_LENGTH) {
            let len: usize = value.trim().parse().map_err(|_| {
                tracing::trace!(value, "invalid content-length");
                FrameError::InvalidContentLength(value.to_owned())
            })?;
            body_start
                .checked_add(len)
                .ok_or(FrameError::LengthOverflow {
                    end: usize::MAX,
                    available: self.end,
                })?
        } else {
            self.find(0, body_start, self.end).ok_or_else(|| {
                tracing::trace!("body has no zero byte terminator");
                FrameError::UnterminatedBody
            })?
        };

        if body_end > self.end {
            tracing::trace!(body_end, end = self.end, "content length too large");
            return Err(FrameError::LengthOverflow {
                end: body_end,
                available: self.end,
            });
        }

        Ok(DecodeState::Done {
            body_start,
            body_end,
            raw_end: (body_end + 1).min(self.end),
        })
    }

    fn finish(self, body_start: usize, body_end: usize, raw_end: usize) -> Frame {
        tracing::debug!(
            command = self.command.as_str(),
            headers = self.headers.len(),
            body_len = body_end - body_start,
            "frame decoded"
        );
        Frame {
            command: self.command,
            headers: self.headers,
            body: self.buf.slice(body_start..body_end),
            raw: self.buf.slice(self.start..raw_end),
            offset: self.start,
        }
    }

    fn find(&self, needle: u8, from: usize, to: usize) -> Option<usize> {
        self.data[from..to]
            .iter()
            .position(|&b| b == needle)
            .map(|i| from + i)
    }

    // text in [from, to) without a trailing CR
    fn text(&self, from: usize, to: usize) -> Result<&'a str> {
        let to = if to > from && self.data[to - 1] == b'\r' { to - 1 } else { to };
        std::str::from_utf8(&self.data[from..to]).map_err(|_| {
            tracing::trace!(offset = from, "invalid UTF-8");
            FrameError::InvalidUtf8 { offset: from }
        })
    }

    fn malformed(&self, fault: HeaderFault) -> FrameError {
        tracing::trace!(offset = self.pos, ?fault, "malformed header");
        FrameError::MalformedHeader {
            offset: self.pos,
            fault,
        }
    }
}
