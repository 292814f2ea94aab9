use thiserror::Error;

/// Why a replay could not be decoded.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("replay truncated: needed {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("unknown objective tag {0}")]
    UnknownObjective(i8),
    #[error("unknown action code {code} at index {index}")]
    UnknownAction { index: usize, code: i8 },
    #[error("negative action count {0}")]
    NegativeActionCount(i64),
    #[error("action {index} at frame {frame} precedes frame {previous}")]
    DecreasingFrame {
        index: usize,
        frame: i64,
        previous: i64,
    },
    #[error("{0} trailing bytes after replay")]
    TrailingBytes(usize),
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("gzip stream: {0}")]
    Gzip(#[from] std::io::Error),
}
