// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Network**: HTTP client behavior
//! - **Retry**: Attempt budget bounds
//! - **Indicator**: Busy indicator size tiers

// ==========================================================================
// Network Defaults
// ==========================================================================

/// User agent sent with every image request.
pub const DEFAULT_USER_AGENT: &str = concat!("iced_async_image/", env!("CARGO_PKG_VERSION"));

/// Maximum number of redirects followed before the request fails.
pub const DEFAULT_REDIRECT_LIMIT: usize = 10;

/// Whole-request timeout in seconds (0 disables the timeout).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Largest response body accepted (32 MB).
pub const DEFAULT_MAX_BODY_BYTES: u64 = 32 * 1024 * 1024;

// ==========================================================================
// Retry Defaults
// ==========================================================================

/// Default number of retries after the first attempt (0 = first failure is final).
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 0;

/// Upper bound for the retry count read from `settings.toml`.
pub const MAX_RETRY_ATTEMPTS: u32 = 100;

// ==========================================================================
// Indicator Defaults
// ==========================================================================

/// Views at least this wide and tall get the large indicator.
pub const LARGE_INDICATOR_MIN_SIDE: f32 = 64.0;

/// Views at least this wide and tall (but below the large tier) get the small indicator.
pub const SMALL_INDICATOR_MIN_SIDE: f32 = 16.0;

/// Side length of the large indicator in logical pixels.
pub const LARGE_INDICATOR_SIZE: f32 = 32.0;

/// Side length of the small indicator in logical pixels.
pub const SMALL_INDICATOR_SIZE: f32 = 16.0;
