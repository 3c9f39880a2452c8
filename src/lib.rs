// SPDX-License-Identifier: MPL-2.0
//! `iced_async_image` loads remote images for an Iced view.
//!
//! A [`net::DownloadSession`] fetches one URL and reports a single terminal
//! outcome. An [`loader::ImageLoadController`] drives one view through
//! placeholder, busy indicator, bounded retries, decoding and tooltips, and
//! [`ui::AsyncImage`] renders it.

#![doc(html_root_url = "https://docs.rs/iced_async_image/0.1.0")]

pub mod config;
pub mod error;
pub mod loader;
pub mod media;
pub mod net;
#[doc(hidden)]
pub mod test_utils;
pub mod ui;

pub use error::{Error, LoadError, Result};
pub use loader::{ImageLoadController, LoadRequest, ViewState};
