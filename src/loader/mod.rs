// SPDX-License-Identifier: MPL-2.0
//! Remote image loading for a single view.
//!
//! [`ImageLoadController`] sequences placeholder display, the busy indicator,
//! bounded retries, decoding and tooltip selection for one view, with at most
//! one download in flight.
//!
//! # Usage
//!
//! ```ignore
//! let mut controller = ImageLoadController::from_config(&config, runtime)?;
//! controller.set_view_size(128.0, 128.0);
//! controller.start_load(
//!     LoadRequest::new("https://www.google.com/images/logo.gif")
//!         .placeholder(placeholder)
//!         .busy_indicator(true)
//!         .max_attempts(2),
//! );
//!
//! // From the UI loop:
//! controller.poll_completions();
//! ```

pub mod controller;
pub mod request;
pub mod state;
pub mod tooltips;

pub use controller::{ImageLoadController, SessionCompletion, SessionToken};
pub use request::{CompletionCallback, LoadRequest};
pub use state::{IndicatorSize, ViewState};
pub use tooltips::TooltipConfiguration;
