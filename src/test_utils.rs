// SPDX-License-Identifier: MPL-2.0
//! In-memory transports and fixtures for exercising loads without a network.
//!
//! Shared by unit tests, `tests/` and benches; hidden from the public docs.
//!
//! - [`ScriptedTransport`]: replies from a fixed script, one entry per fetch
//! - [`PendingTransport`]: never completes
//! - [`GatedTransport`]: each fetch waits until the test releases it
//! - [`encoded_png`]: a decodable payload

use crate::net::{ByteStream, Transport, TransportError};
use bytes::Bytes;
use futures_util::{stream, StreamExt};
use image_rs::{ImageFormat, Rgba, RgbaImage};
use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;
use url::Url;

/// One scripted reply: the body chunks, or the failure.
pub type ScriptedReply = Result<Vec<Vec<u8>>, TransportError>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Encode a solid-colored PNG of the given size.
#[must_use]
pub fn encoded_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba(rgba));
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .expect("PNG encoding into memory");
    bytes.into_inner()
}

fn reply_stream(reply: ScriptedReply) -> ByteStream {
    match reply {
        Ok(chunks) => stream::iter(
            chunks
                .into_iter()
                .map(|chunk| Ok::<_, TransportError>(Bytes::from(chunk))),
        )
        .boxed(),
        Err(err) => stream::once(async move { Err::<Bytes, _>(err) }).boxed(),
    }
}

/// Replies to successive fetches from a script.
///
/// Once the script runs out, the last reply repeats when
/// [`ScriptedTransport::repeating`] was used; otherwise fetches fail.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<ScriptedReply>>,
    repeat_last: bool,
    last: Mutex<Option<ScriptedReply>>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    /// One whole-body reply per fetch.
    #[must_use]
    pub fn new(replies: Vec<Result<Vec<u8>, TransportError>>) -> Self {
        Self {
            script: Mutex::new(replies.into_iter().map(|r| r.map(|b| vec![b])).collect()),
            ..Self::default()
        }
    }

    /// A single successful reply delivered in several chunks.
    #[must_use]
    pub fn chunked(chunks: Vec<Vec<u8>>) -> Self {
        Self {
            script: Mutex::new(VecDeque::from([Ok(chunks)])),
            ..Self::default()
        }
    }

    /// Every fetch gets the same reply.
    #[must_use]
    pub fn repeating(reply: Result<Vec<u8>, TransportError>) -> Self {
        Self {
            last: Mutex::new(Some(reply.map(|b| vec![b]))),
            repeat_last: true,
            ..Self::default()
        }
    }

    /// Number of fetches issued so far.
    pub fn calls(&self) -> usize {
        lock(&self.requested).len()
    }

    /// URLs fetched so far, in order.
    pub fn requested_urls(&self) -> Vec<String> {
        lock(&self.requested).clone()
    }
}

impl Transport for ScriptedTransport {
    fn fetch(&self, url: &Url) -> ByteStream {
        lock(&self.requested).push(url.to_string());

        let reply = match lock(&self.script).pop_front() {
            Some(reply) => {
                *lock(&self.last) = Some(reply.clone());
                reply
            }
            None if self.repeat_last => lock(&self.last)
                .clone()
                .unwrap_or_else(|| Err(TransportError::Request("script exhausted".into()))),
            None => Err(TransportError::Request("script exhausted".into())),
        };
        reply_stream(reply)
    }
}

/// A transport whose fetches never finish.
#[derive(Debug, Default)]
pub struct PendingTransport {
    calls: AtomicUsize,
}

impl PendingTransport {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transport for PendingTransport {
    fn fetch(&self, _url: &Url) -> ByteStream {
        self.calls.fetch_add(1, Ordering::SeqCst);
        stream::pending().boxed()
    }
}

/// Each fetch blocks until [`GatedTransport::release`] is called with its index.
#[derive(Debug, Default)]
pub struct GatedTransport {
    gates: Mutex<Vec<Option<oneshot::Sender<Result<Vec<u8>, TransportError>>>>>,
    requested: Mutex<Vec<String>>,
}

impl GatedTransport {
    /// Resolve the `index`-th fetch. Returns false if that fetch was already
    /// released, never issued, or abandoned by its caller.
    pub fn release(&self, index: usize, reply: Result<Vec<u8>, TransportError>) -> bool {
        let sender = lock(&self.gates).get_mut(index).and_then(Option::take);
        sender.is_some_and(|sender| sender.send(reply).is_ok())
    }

    pub fn calls(&self) -> usize {
        lock(&self.gates).len()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        lock(&self.requested).clone()
    }
}

impl Transport for GatedTransport {
    fn fetch(&self, url: &Url) -> ByteStream {
        let (tx, rx) = oneshot::channel();
        lock(&self.gates).push(Some(tx));
        lock(&self.requested).push(url.to_string());

        stream::once(async move {
            match rx.await {
                Ok(reply) => reply.map(Bytes::from),
                Err(_) => Err(TransportError::Request("gate dropped".into())),
            }
        })
        .boxed()
    }
}
