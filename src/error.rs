//! Error types for the lzhuf codec and its file front end.

use thiserror::Error;

/// Everything that can go wrong between a byte buffer going in and a
/// byte buffer coming out. Codec errors propagate to the pipeline; none
/// are downgraded to best-effort output.
#[derive(Debug, Error)]
pub enum Error {
    /// Source or destination could not be read or written.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The token record stream is malformed.
    #[error("bad token stream: {0}")]
    BadTokenStream(String),

    /// The tree container is truncated or inconsistent with its
    /// declared node count.
    #[error("corrupt tree container: {0}")]
    CorruptTree(String),

    /// A byte reached encode without a code table entry. Encode only
    /// accepts the data the tree was built from; this is a caller bug,
    /// not a recoverable condition.
    #[error("no code for byte {0:#04x}")]
    MissingCode(u8),

    /// The payload ran out before its declared bit count was consumed.
    #[error("payload shorter than its declared bit count")]
    TruncatedPayload,

    /// The declared bit count ended partway down a code path.
    #[error("bit stream ends inside a code")]
    DanglingBits,
}

pub type Result<T> = std::result::Result<T, Error>;
