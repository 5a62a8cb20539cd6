use std::fmt;

use super::Headers;
use crate::{error::FrameError, frames::Frame};

/// Well-known commands.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    Connect,
    Disconnect,
    Send,
    Receipt,
    Message,
    Error,
    Ack,
    Nack,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::Connect,
        Command::Disconnect,
        Command::Send,
        Command::Receipt,
        Command::Message,
        Command::Error,
        Command::Ack,
        Command::Nack,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Command::Connect => "CONNECT",
            Command::Disconnect => "DISCONNECT",
            Command::Send => "SEND",
            Command::Receipt => "RECEIPT",
            Command::Message => "MESSAGE",
            Command::Error => "ERROR",
            Command::Ack => "ACK",
            Command::Nack => "NACK",
        }
    }

    pub fn frame(self) -> Result<Frame, FrameError> { self.with_headers_and_body(&Headers::new(), &[]) }

    pub fn with_headers(self, headers: &Headers) -> Result<Frame, FrameError> {
        self.with_headers_and_body(headers, &[])
    }

    pub fn with_body(self, body: &[u8]) -> Result<Frame, FrameError> {
        self.with_headers_and_body(&Headers::new(), body)
    }

    pub fn with_headers_and_body(self, headers: &Headers, body: &[u8]) -> Result<Frame, FrameError> {
        Frame::encode(self.as_str(), headers, body)
    }
}

impl TryFrom<&str> for Command {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, ()> {
        Command::ALL
            .into_iter()
            .find(|c| c.as_str() == value)
            .ok_or(())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl Frame {
    /// `ERROR` frame carrying `message` as its body.
    pub fn error_message(message: &str) -> Result<Frame, FrameError> {
        Command::Error.with_body(message.as_bytes())
    }

    /// The well-known command of this frame, if it is one.
    pub fn known_command(&self) -> Option<Command> { Command::try_from(self.command()).ok() }
}
