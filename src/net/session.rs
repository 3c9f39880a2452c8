// SPDX-License-Identifier: MPL-2.0
//! A single cancellable fetch that resolves its callback at most once.
//!
//! The session spawns one task per [`DownloadSession::start`] on the tokio
//! runtime it was given. The task drains the transport stream into a fresh
//! buffer and hands the outcome to the callback. [`DownloadSession::cancel`]
//! removes the callback under the same lock the task uses to invoke it, so
//! once `cancel` returns the callback can no longer run.

use super::{ByteStream, Transport, TransportError};
use crate::error::LoadError;
use futures_util::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use url::Url;

/// Terminal result of one fetch: the full body or the transport failure.
pub type SessionOutcome = Result<Vec<u8>, TransportError>;

/// Invoked once with the terminal outcome, never after cancellation.
pub type SessionCallback = Box<dyn FnOnce(SessionOutcome) + Send + 'static>;

/// Parse a URL string, mapping failures to [`LoadError::MalformedUrl`].
///
/// # Errors
///
/// Returns [`LoadError::MalformedUrl`] if `url` is not an absolute URL.
pub fn parse_url(url: &str) -> Result<Url, LoadError> {
    Url::parse(url).map_err(|e| LoadError::MalformedUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// State shared between the session handle and its spawned task.
struct Pending {
    busy: AtomicBool,
    callback: Mutex<Option<SessionCallback>>,
}

impl Pending {
    fn new(callback: SessionCallback) -> Self {
        Self {
            busy: AtomicBool::new(true),
            callback: Mutex::new(Some(callback)),
        }
    }

    /// Deliver the outcome unless the callback was already taken by `cancel`.
    fn resolve(&self, outcome: SessionOutcome) {
        let mut slot = self.callback.lock().unwrap_or_else(PoisonError::into_inner);
        self.busy.store(false, Ordering::SeqCst);
        if let Some(callback) = slot.take() {
            callback(outcome);
        }
    }

    /// Drop the callback. Returns true if it had not fired yet.
    fn revoke(&self) -> bool {
        let mut slot = self.callback.lock().unwrap_or_else(PoisonError::into_inner);
        self.busy.store(false, Ordering::SeqCst);
        slot.take().is_some()
    }
}

pub struct DownloadSession {
    transport: Arc<dyn Transport>,
    runtime: Handle,
    url: Option<Url>,
    pending: Option<Arc<Pending>>,
    task: Option<JoinHandle<()>>,
}

impl DownloadSession {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, runtime: Handle) -> Self {
        Self {
            transport,
            runtime,
            url: None,
            pending: None,
            task: None,
        }
    }

    /// Parse `url` and start fetching it.
    ///
    /// A fetch already in progress on this session is cancelled first and its
    /// callback never fires.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MalformedUrl`] without starting any task if `url`
    /// does not parse.
    pub fn start(&mut self, url: &str, on_complete: SessionCallback) -> Result<(), LoadError> {
        let url = parse_url(url)?;
        self.start_url(url, on_complete);
        Ok(())
    }

    /// Start fetching an already validated URL.
    pub fn start_url(&mut self, url: Url, on_complete: SessionCallback) {
        self.cancel();

        let pending = Arc::new(Pending::new(on_complete));
        let stream = self.transport.fetch(&url);
        let task_pending = Arc::clone(&pending);

        tracing::debug!(url = %url, "download session started");
        self.task = Some(self.runtime.spawn(async move {
            let outcome = drain(stream).await;
            task_pending.resolve(outcome);
        }));
        self.pending = Some(pending);
        self.url = Some(url);
    }

    /// Abort the fetch and suppress its callback. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        let revoked = self.pending.take().is_some_and(|pending| pending.revoke());
        if let Some(task) = self.task.take() {
            task.abort();
        }
        if revoked {
            if let Some(url) = &self.url {
                tracing::debug!(url = %url, "download session cancelled");
            }
        }
    }

    /// True from `start` until the outcome is delivered or the session is cancelled.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| pending.busy.load(Ordering::SeqCst))
    }

    /// URL of the most recent `start`.
    #[must_use]
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }
}

impl Drop for DownloadSession {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn drain(mut stream: ByteStream) -> SessionOutcome {
    let mut buffer = Vec::new();
    while let Some(chunk) = stream.next().await {
        buffer.extend_from_slice(&chunk?);
    }
    Ok(buffer)
}
