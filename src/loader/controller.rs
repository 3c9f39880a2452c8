// SPDX-License-Identifier: MPL-2.0
//! State machine that drives one remote image view.
//!
//! The controller owns at most one [`DownloadSession`] and at most one busy
//! indicator. Every mutation goes through `&mut self`, so the owner (usually
//! the UI update loop) serializes all transitions. Sessions never touch the
//! controller directly: their callbacks post a [`SessionCompletion`] onto a
//! channel that the owner drains on its own thread.
//!
//! Each session is tagged with a [`SessionToken`]. A completion is applied
//! only if its token matches the active session, so a result that races with
//! `cancel` or a superseding `start_load` has no effect.

use super::request::{CompletionCallback, LoadRequest, RequestParts};
use super::state::{IndicatorSize, ViewState};
use super::tooltips::TooltipConfiguration;
use crate::config::Config;
use crate::error::{LoadError, Result};
use crate::media::{ImageData, ImageDecoder, MaxRetryAttempts, RasterDecoder};
use crate::net::session::parse_url;
use crate::net::{DownloadSession, HttpTransport, SessionOutcome, Transport};
use std::fmt;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use url::Url;

/// Identity of one download session within a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionToken(u64);

/// Terminal outcome of a session, tagged with the session that produced it.
#[derive(Debug)]
pub struct SessionCompletion {
    token: SessionToken,
    outcome: SessionOutcome,
}

impl SessionCompletion {
    pub fn token(&self) -> SessionToken {
        self.token
    }

    pub fn outcome(&self) -> &SessionOutcome {
        &self.outcome
    }
}

/// Bookkeeping for the request currently in flight.
struct ActiveLoad {
    url: Url,
    error_image: Option<ImageData>,
    max_attempts: MaxRetryAttempts,
    on_complete: Option<CompletionCallback>,
    session: DownloadSession,
    token: SessionToken,
}

pub struct ImageLoadController {
    transport: Arc<dyn Transport>,
    decoder: Arc<dyn ImageDecoder>,
    runtime: Handle,
    default_attempts: MaxRetryAttempts,

    state: ViewState,
    displayed: Option<ImageData>,
    indicator: Option<IndicatorSize>,
    view_size: (f32, f32),
    retries: u32,

    tooltips: TooltipConfiguration,
    active_tooltip: Option<String>,

    active: Option<ActiveLoad>,
    next_token: u64,
    completions_tx: mpsc::UnboundedSender<SessionCompletion>,
    completions_rx: mpsc::UnboundedReceiver<SessionCompletion>,
}

impl ImageLoadController {
    /// Create a controller that spawns its downloads on `runtime`.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        decoder: Arc<dyn ImageDecoder>,
        runtime: Handle,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            transport,
            decoder,
            runtime,
            default_attempts: MaxRetryAttempts::default(),
            state: ViewState::Idle,
            displayed: None,
            indicator: None,
            view_size: (0.0, 0.0),
            retries: 0,
            tooltips: TooltipConfiguration::default(),
            active_tooltip: None,
            active: None,
            next_token: 0,
            completions_tx,
            completions_rx,
        }
    }

    /// HTTP transport and raster decoder configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config, runtime: Handle) -> Result<Self> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::new(Arc::new(transport), Arc::new(RasterDecoder), runtime)
            .with_default_retry_attempts(config.default_retry_attempts()))
    }

    /// Retry budget for requests that do not set their own.
    #[must_use]
    pub fn with_default_retry_attempts(mut self, attempts: MaxRetryAttempts) -> Self {
        self.default_attempts = attempts;
        self
    }

    /// Record the size the view is displayed at. Used to size the busy indicator.
    pub fn set_view_size(&mut self, width: f32, height: f32) {
        self.view_size = (width, height);
    }

    /// Load `url` with no placeholder, error image, indicator or callback.
    pub fn start_load_url(&mut self, url: &str) {
        self.start_load(LoadRequest::new(url));
    }

    /// Begin loading `request`, superseding whatever was in progress.
    ///
    /// A malformed URL leaves the view on the placeholder in the `Idle`
    /// state: no session is created, no error image is shown and the
    /// completion callback is dropped without being called.
    pub fn start_load(&mut self, request: LoadRequest) {
        self.release_active();

        let RequestParts {
            url,
            placeholder,
            error_image,
            busy_indicator,
            max_attempts,
            on_complete,
        } = request.into_parts();

        self.state = ViewState::Loading;
        self.retries = 0;
        self.displayed = placeholder;

        let url = match parse_url(&url) {
            Ok(url) => url,
            Err(err) => {
                self.state = ViewState::Idle;
                tracing::warn!(%err, "malformed URL passed to start_load");
                return;
            }
        };

        if busy_indicator {
            let (width, height) = self.view_size;
            self.indicator = IndicatorSize::for_view(width, height);
        }

        let (session, token) = self.spawn_session(url.clone());
        self.active = Some(ActiveLoad {
            url,
            error_image,
            max_attempts: max_attempts.unwrap_or(self.default_attempts),
            on_complete,
            session,
            token,
        });
    }

    /// Stop the current load and blank the view. Safe to call at any time.
    pub fn cancel(&mut self) {
        if let Some(active) = &self.active {
            tracing::debug!(url = %active.url, "image load cancelled");
        }
        self.release_active();
        self.state = ViewState::Cancelled;
        self.retries = 0;
        self.displayed = None;
        self.active_tooltip = None;
    }

    /// Replace all three tooltips.
    pub fn set_tooltips(
        &mut self,
        loading: Option<String>,
        loaded: Option<String>,
        failed: Option<String>,
    ) {
        self.tooltips = TooltipConfiguration::new(loading, loaded, failed);
    }

    pub fn set_tooltip_configuration(&mut self, tooltips: TooltipConfiguration) {
        self.tooltips = tooltips;
    }

    /// Forget every tooltip, including the one currently shown.
    pub fn clear_tooltips(&mut self) {
        self.tooltips = TooltipConfiguration::default();
        self.active_tooltip = None;
    }

    /// Tooltip for the current state, looked up at call time.
    #[must_use]
    pub fn query_tooltip(&self) -> Option<&str> {
        self.tooltips.for_state(self.state)
    }

    /// Hover entered the view: resolve and remember the tooltip to show.
    pub fn on_hover(&mut self) -> Option<&str> {
        self.active_tooltip = self.query_tooltip().map(str::to_owned);
        self.active_tooltip.as_deref()
    }

    /// Tooltip resolved by the most recent hover.
    #[must_use]
    pub fn tooltip(&self) -> Option<&str> {
        self.active_tooltip.as_deref()
    }

    /// Apply every completion that has already arrived, without waiting.
    ///
    /// Returns the number of completions taken off the channel.
    pub fn poll_completions(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.handle_completion(completion);
            handled += 1;
        }
        handled
    }

    /// Wait for the next completion posted by any session of this controller.
    pub async fn next_completion(&mut self) -> Option<SessionCompletion> {
        self.completions_rx.recv().await
    }

    /// Apply completions until no load is in flight.
    pub async fn settle(&mut self) {
        while self.state.is_loading() {
            match self.completions_rx.recv().await {
                Some(completion) => self.handle_completion(completion),
                None => break,
            }
        }
    }

    /// Apply a session outcome. Completions from sessions other than the
    /// active one are ignored.
    pub fn handle_completion(&mut self, completion: SessionCompletion) {
        let SessionCompletion { token, outcome } = completion;
        let Some(active) = self.active.as_ref() else {
            tracing::debug!(?token, "ignoring completion with no active load");
            return;
        };
        if active.token != token {
            tracing::debug!(?token, active = ?active.token, "ignoring stale completion");
            return;
        }
        let max_attempts = active.max_attempts;

        let result = outcome.map_err(LoadError::from).and_then(|bytes| {
            let image = self.decoder.decode(&bytes)?;
            Ok((image, bytes))
        });

        match result {
            Ok((image, bytes)) => self.finish_loaded(image, bytes),
            Err(err) if err.is_retryable() && max_attempts.allows_retry(self.retries) => {
                self.retry(&err);
            }
            Err(err) => self.finish_failed(err),
        }
    }

    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    #[must_use]
    pub fn did_fail(&self) -> bool {
        self.state.did_fail()
    }

    #[must_use]
    pub fn was_cancelled(&self) -> bool {
        self.state.was_cancelled()
    }

    /// Image the view should currently draw.
    #[must_use]
    pub fn displayed_image(&self) -> Option<&ImageData> {
        self.displayed.as_ref()
    }

    /// Busy indicator the view should currently draw.
    #[must_use]
    pub fn indicator(&self) -> Option<IndicatorSize> {
        self.indicator
    }

    /// Retries issued so far for the current request.
    #[must_use]
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// URL of the request in flight.
    #[must_use]
    pub fn current_url(&self) -> Option<&Url> {
        self.active.as_ref().map(|active| &active.url)
    }

    fn spawn_session(&mut self, url: Url) -> (DownloadSession, SessionToken) {
        self.next_token += 1;
        let token = SessionToken(self.next_token);
        let tx = self.completions_tx.clone();

        let mut session = DownloadSession::new(Arc::clone(&self.transport), self.runtime.clone());
        session.start_url(
            url,
            Box::new(move |outcome| {
                // The receiver only disappears with the controller itself.
                let _ = tx.send(SessionCompletion { token, outcome });
            }),
        );
        (session, token)
    }

    fn retry(&mut self, err: &LoadError) {
        let Some(url) = self.active.as_ref().map(|active| active.url.clone()) else {
            return;
        };
        self.retries += 1;
        tracing::debug!(url = %url, attempt = self.retries, %err, "retrying image load");

        let (session, token) = self.spawn_session(url);
        if let Some(active) = self.active.as_mut() {
            active.session = session;
            active.token = token;
        }
    }

    fn finish_loaded(&mut self, image: ImageData, bytes: Vec<u8>) {
        let Some(active) = self.active.take() else {
            return;
        };
        tracing::info!(
            url = %active.url,
            width = image.width,
            height = image.height,
            "image loaded"
        );

        self.state = ViewState::Loaded;
        self.displayed = Some(image);
        self.indicator = None;

        if let Some(on_complete) = active.on_complete {
            on_complete(Ok(bytes));
        }
    }

    fn finish_failed(&mut self, err: LoadError) {
        let Some(active) = self.active.take() else {
            return;
        };
        tracing::warn!(url = %active.url, retries = self.retries, %err, "image load failed");

        self.state = ViewState::Failed;
        self.displayed = active.error_image;
        self.indicator = None;

        if let Some(on_complete) = active.on_complete {
            on_complete(Err(err));
        }
    }

    /// Cancel the active session and drop the indicator. The request's
    /// callback is dropped without being called.
    fn release_active(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.session.cancel();
        }
        self.indicator = None;
    }
}

impl fmt::Debug for ImageLoadController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageLoadController")
            .field("state", &self.state)
            .field("url", &self.current_url().map(Url::as_str))
            .field("retries", &self.retries)
            .field("indicator", &self.indicator)
            .field("displayed", &self.displayed)
            .finish_non_exhaustive()
    }
}
