//! Error types for the tilescape crate.

use std::fmt;

/// Result type for tilescape operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tilescape operations.
///
/// `Tile` errors reject the whole session: there is no valid center tile to
/// build around. `Http`, `HttpStatus`, and `Decode` errors are scoped to a
/// single tile; callers should log them, skip that tile's placement, and
/// continue with the session's remaining tiles.
#[derive(Debug)]
pub enum Error {
    /// HTTP request failed.
    Http {
        /// The URL that failed.
        url: String,
        /// The error message.
        message: String,
    },
    /// HTTP response had a non-success status code.
    HttpStatus {
        /// The URL that returned the error.
        url: String,
        /// The HTTP status code.
        status: u16,
    },
    /// Tile image or height field decoding failed.
    Decode(tilescape_decode::DecodeError),
    /// Session input was invalid (zoom or coordinate out of range).
    Tile(tilescape_decode::TileError),
    /// Cache operation failed.
    Cache {
        /// The operation that failed.
        operation: &'static str,
        /// The error message.
        message: String,
    },
}

impl Error {
    /// Whether the error invalidates the whole session rather than one tile.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Tile(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http { url, message } => {
                write!(f, "http request to {url} failed: {message}")
            }
            Error::HttpStatus { url, status } => {
                write!(f, "http request to {url} returned status {status}")
            }
            Error::Decode(e) => write!(f, "decode error: {e}"),
            Error::Tile(e) => write!(f, "invalid session input: {e}"),
            Error::Cache { operation, message } => {
                write!(f, "cache {operation} failed: {message}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Decode(e) => Some(e),
            Error::Tile(e) => Some(e),
            _ => None,
        }
    }
}

impl From<tilescape_decode::DecodeError> for Error {
    fn from(e: tilescape_decode::DecodeError) -> Self {
        Error::Decode(e)
    }
}

impl From<tilescape_decode::TileError> for Error {
    fn from(e: tilescape_decode::TileError) -> Self {
        Error::Tile(e)
    }
}
