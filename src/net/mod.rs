// SPDX-License-Identifier: MPL-2.0
//! Network side of an image load.
//!
//! - [`Transport`]: capability that turns a URL into a stream of body chunks
//! - [`HttpTransport`]: `reqwest`-backed implementation
//! - [`DownloadSession`]: one cancellable fetch with a single terminal callback

pub mod http;
pub mod session;

use bytes::Bytes;
use futures_util::stream::BoxStream;
use thiserror::Error;
use url::Url;

pub use http::HttpTransport;
pub use session::{DownloadSession, SessionCallback, SessionOutcome};

/// Body chunks of one fetch, in arrival order.
pub type ByteStream = BoxStream<'static, Result<Bytes, TransportError>>;

/// Failure of the underlying fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(u16),
    /// Connection, TLS, redirect or body read failure.
    #[error("request failed: {0}")]
    Request(String),
    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,
    /// The body grew past the configured limit.
    #[error("response body exceeded {limit} bytes")]
    BodyTooLarge { limit: u64 },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if let Some(status) = err.status() {
            TransportError::Status(status.as_u16())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

/// Fetches the bytes behind a URL.
///
/// Implementations must be cheap to call; the returned stream does the work
/// when polled and is dropped to abort the fetch.
pub trait Transport: Send + Sync + 'static {
    fn fetch(&self, url: &Url) -> ByteStream;
}
