// SPDX-License-Identifier: MPL-2.0
//! Retry budget domain type for image loads.
//!
//! This module provides a type-safe wrapper for the number of retries allowed
//! after the first download attempt of a single load request.

use crate::config::DEFAULT_RETRY_ATTEMPTS;

/// Number of retries permitted after the initial attempt.
///
/// `0` means the first failure is terminal; `n` allows up to `n + 1` tries
/// in total. Any count is accepted; only the configured default is capped
/// (see [`crate::config::Config::default_retry_attempts`]).
///
/// # Example
///
/// ```
/// use iced_async_image::media::MaxRetryAttempts;
///
/// let attempts = MaxRetryAttempts::new(3);
/// assert_eq!(attempts.value(), 3);
/// assert_eq!(attempts.total_tries(), 4);
///
/// let generous = MaxRetryAttempts::new(10_000);
/// assert_eq!(generous.total_tries(), 10_001);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MaxRetryAttempts(u32);

impl MaxRetryAttempts {
    /// No retries: the first failure ends the load.
    pub const NONE: Self = Self(0);

    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the value as u32.
    pub fn value(self) -> u32 {
        self.0
    }

    /// Total number of tries including the first one.
    pub fn total_tries(self) -> u32 {
        self.0.saturating_add(1)
    }

    /// Whether another retry is allowed after `used` retries.
    pub fn allows_retry(self, used: u32) -> bool {
        used < self.0
    }
}

impl Default for MaxRetryAttempts {
    fn default() -> Self {
        Self(DEFAULT_RETRY_ATTEMPTS)
    }
}
