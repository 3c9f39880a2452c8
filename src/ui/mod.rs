// SPDX-License-Identifier: MPL-2.0
//! Iced view for remote images.
//!
//! The component follows the Elm-style "state down, messages up" pattern:
//! the host forwards [`async_image::Message`]s to
//! [`async_image::AsyncImage::handle`] and reacts to the returned
//! [`async_image::Effect`].
//!
//! - [`async_image`] - Component wrapping an image load controller
//! - [`widgets`] - Busy indicator spinner
//! - [`styles`] - Tooltip styling
//! - [`design_tokens`] - Shared visual constants

pub mod async_image;
pub mod design_tokens;
pub mod styles;
pub mod widgets;

pub use async_image::AsyncImage;
