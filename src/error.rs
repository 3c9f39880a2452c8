// SPDX-License-Identifier: MPL-2.0
use thiserror::Error;

use crate::net::TransportError;

/// Crate-level error for configuration and I/O plumbing.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Load Error: {0}")]
    Load(#[from] LoadError),
}

/// Why a single image load did not produce an image.
///
/// Cancellation is deliberately absent: a cancelled load produces no outcome
/// at all rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The URL string could not be parsed. Never retried.
    #[error("malformed URL `{url}`: {reason}")]
    MalformedUrl { url: String, reason: String },

    /// The network fetch failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The payload arrived but is not a displayable image.
    #[error("decode error: {0}")]
    Decode(String),
}

impl LoadError {
    /// Whether this failure counts against the retry budget.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, LoadError::Transport(_) | LoadError::Decode(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_conversion_preserves_message() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: Error = io_error.into();
        match error {
            Error::Io(message) => assert!(message.contains("missing")),
            other => panic!("expected Io variant, got {other:?}"),
        }
    }

    #[test]
    fn display_formats_variants() {
        assert_eq!(format!("{}", Error::Io("disk".into())), "I/O Error: disk");
        assert_eq!(
            format!("{}", Error::Config("bad".into())),
            "Config Error: bad"
        );
        let load = Error::from(LoadError::Decode("truncated".into()));
        assert_eq!(format!("{load}"), "Load Error: decode error: truncated");
    }

    #[test]
    fn only_transport_and_decode_are_retryable() {
        assert!(LoadError::Transport(TransportError::Timeout).is_retryable());
        assert!(LoadError::Decode("empty".into()).is_retryable());
        assert!(!LoadError::MalformedUrl {
            url: "::".into(),
            reason: "relative URL without a base".into(),
        }
        .is_retryable());
    }
}
