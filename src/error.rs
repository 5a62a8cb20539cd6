use thiserror::Error;

/// Errors raised while encoding or decoding a frame.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// No line feed terminates the command line.
    #[error("frame does not start with a terminated command")]
    MissingCommandTerminator,
    /// The command line is empty.
    #[error("frame command is empty")]
    EmptyCommand,
    /// The command handed to the encoder contains control characters.
    #[error("invalid command {0:?}")]
    InvalidCommand(String),
    /// A header line could not be parsed.
    #[error("malformed header at byte {offset}: {fault}")]
    MalformedHeader {
        /// Position of the offending line in the buffer.
        offset: usize,
        /// What was wrong with it.
        fault: HeaderFault,
    },
    /// The `content-length` header is not an unsigned integer.
    #[error("invalid content-length {0:?}")]
    InvalidContentLength(String),
    /// The body ends past the supplied data.
    #[error("declared length exceeds available data (body ends at {end}, data ends at {available})")]
    LengthOverflow {
        /// Computed end of the body.
        end: usize,
        /// End of the supplied range.
        available: usize,
    },
    /// No `content-length` and no zero byte before the end of the data.
    #[error("frame body is not terminated")]
    UnterminatedBody,
    /// Command or header text is not valid UTF-8.
    #[error("invalid UTF-8 at byte {offset}")]
    InvalidUtf8 {
        /// Start of the offending text.
        offset: usize,
    },
    /// The requested range does not fit the buffer.
    #[error("range {start}+{len} is outside a buffer of {available} bytes")]
    OutOfBounds {
        start: usize,
        len: usize,
        available: usize,
    },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFault {
    #[error("no separator")]
    MissingSeparator,
    #[error("not terminated with a newline")]
    MissingTerminator,
    #[error("empty header name")]
    EmptyKey,
    #[error("no blank line after headers")]
    MissingBlankLine,
}

/// Errors raised by typed header lookup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("header {0:?} is not present")]
    Missing(String),
    /// The header text does not parse as the requested type.
    #[error("header {key:?} value {value:?} is not a valid {target}")]
    Coerce {
        key: String,
        value: String,
        target: &'static str,
    },
}

/// Header builder was given a key without a value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected an even number of header arguments, got {0}")]
pub struct OddArgumentCount(pub usize);
