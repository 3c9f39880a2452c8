// SPDX-License-Identifier: MPL-2.0
//! Parameters of one caller-initiated image load.

use crate::error::LoadError;
use crate::media::{ImageData, MaxRetryAttempts};
use std::fmt;

/// Called once when a load ends in success or terminal failure.
///
/// On success it receives the raw downloaded bytes. It is never called for a
/// load that was cancelled, superseded, or rejected as a malformed URL.
pub type CompletionCallback = Box<dyn FnOnce(Result<Vec<u8>, LoadError>) + Send + 'static>;

/// A load request, built once and handed to the controller.
///
/// # Example
///
/// ```
/// use iced_async_image::loader::LoadRequest;
///
/// let request = LoadRequest::new("https://www.google.com/images/logo.gif")
///     .busy_indicator(true)
///     .max_attempts(2);
/// assert_eq!(request.url(), "https://www.google.com/images/logo.gif");
/// ```
pub struct LoadRequest {
    url: String,
    placeholder: Option<ImageData>,
    error_image: Option<ImageData>,
    busy_indicator: bool,
    max_attempts: Option<MaxRetryAttempts>,
    on_complete: Option<CompletionCallback>,
}

impl LoadRequest {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            placeholder: None,
            error_image: None,
            busy_indicator: false,
            max_attempts: None,
            on_complete: None,
        }
    }

    /// Image shown while the download is in flight.
    #[must_use]
    pub fn placeholder(mut self, image: ImageData) -> Self {
        self.placeholder = Some(image);
        self
    }

    /// Image shown once the load has failed for good.
    #[must_use]
    pub fn error_image(mut self, image: ImageData) -> Self {
        self.error_image = Some(image);
        self
    }

    /// Show a spinner over the view while loading.
    #[must_use]
    pub fn busy_indicator(mut self, enabled: bool) -> Self {
        self.busy_indicator = enabled;
        self
    }

    /// Retries allowed after the first attempt. Falls back to the controller
    /// default when never set.
    #[must_use]
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(MaxRetryAttempts::new(attempts));
        self
    }

    #[must_use]
    pub fn on_complete(
        mut self,
        callback: impl FnOnce(Result<Vec<u8>, LoadError>) + Send + 'static,
    ) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn placeholder_image(&self) -> Option<&ImageData> {
        self.placeholder.as_ref()
    }

    pub fn error_image_ref(&self) -> Option<&ImageData> {
        self.error_image.as_ref()
    }

    pub fn wants_busy_indicator(&self) -> bool {
        self.busy_indicator
    }

    pub fn attempts(&self) -> Option<MaxRetryAttempts> {
        self.max_attempts
    }

    /// Split into the pieces the controller keeps.
    pub(crate) fn into_parts(self) -> RequestParts {
        RequestParts {
            url: self.url,
            placeholder: self.placeholder,
            error_image: self.error_image,
            busy_indicator: self.busy_indicator,
            max_attempts: self.max_attempts,
            on_complete: self.on_complete,
        }
    }
}

impl fmt::Debug for LoadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadRequest")
            .field("url", &self.url)
            .field("placeholder", &self.placeholder.is_some())
            .field("error_image", &self.error_image.is_some())
            .field("busy_indicator", &self.busy_indicator)
            .field("max_attempts", &self.max_attempts)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

pub(crate) struct RequestParts {
    pub url: String,
    pub placeholder: Option<ImageData>,
    pub error_image: Option<ImageData>,
    pub busy_indicator: bool,
    pub max_attempts: Option<MaxRetryAttempts>,
    pub on_complete: Option<CompletionCallback>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_plain_url_overload() {
        let request = LoadRequest::new("https://example.com/a.png");
        assert!(request.placeholder_image().is_none());
        assert!(request.error_image_ref().is_none());
        assert!(!request.wants_busy_indicator());
        assert!(request.attempts().is_none());
    }

    #[test]
    fn builder_sets_every_field() {
        let placeholder = ImageData::from_rgba(1, 1, vec![0, 0, 0, 255]);
        let error = ImageData::from_rgba(1, 1, vec![255, 0, 0, 255]);
        let request = LoadRequest::new("https://example.com/a.png")
            .placeholder(placeholder.clone())
            .error_image(error.clone())
            .busy_indicator(true)
            .max_attempts(3)
            .on_complete(|_| {});

        assert_eq!(request.placeholder_image(), Some(&placeholder));
        assert_eq!(request.error_image_ref(), Some(&error));
        assert!(request.wants_busy_indicator());
        assert_eq!(request.attempts(), Some(MaxRetryAttempts::new(3)));

        let debug = format!("{request:?}");
        assert!(debug.contains("on_complete: true"));
    }
}
