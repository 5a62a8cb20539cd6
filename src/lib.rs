//! Wire codec for STOMP-style text frames.
//!
//! ```text
//! FRAME       = COMMAND LF *HEADER-LINE LF BODY NUL
//! HEADER-LINE = ESCAPED-KEY ":" ESCAPED-VALUE LF
//! PING        = LF
//! ```
//!
//! Build frames with [`Frame::encode`] (or a [`Command`] shortcut) and read
//! them back with [`Frame::decode`] / [`Frame::decode_range`].
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod error;
mod frames;
mod protocol;

pub use error::{FrameError, HeaderError, HeaderFault, OddArgumentCount};
pub use frames::{Frame, escape, unescape};
pub use protocol::{Command, Headers, Primitive, headers};

/// Header declaring the exact body length in bytes.
pub const CONTENT_LENGTH: &str = "content-length";
/// Command reported for the heartbeat frame.
pub const HEARTBEAT_COMMAND: &str = "PING";
/// Default input limit for callers buffering frames.
pub const MAX_FRAME_SIZE: usize = 1024 * 1024;
