// SPDX-License-Identifier: MPL-2.0
//! Display status of a load and the busy indicator size policy.

use crate::config::{
    LARGE_INDICATOR_MIN_SIDE, LARGE_INDICATOR_SIZE, SMALL_INDICATOR_MIN_SIDE, SMALL_INDICATOR_SIZE,
};

/// What the view is currently showing.
///
/// - `Idle`: nothing requested yet, or the last URL was malformed
/// - `Loading`: placeholder shown, download in flight
/// - `Loaded`: decoded image shown
/// - `Failed`: error image shown after the retry budget ran out
/// - `Cancelled`: blank after an explicit cancel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
    Cancelled,
}

impl ViewState {
    #[must_use]
    pub fn is_loading(self) -> bool {
        self == ViewState::Loading
    }

    #[must_use]
    pub fn did_fail(self) -> bool {
        self == ViewState::Failed
    }

    #[must_use]
    pub fn was_cancelled(self) -> bool {
        self == ViewState::Cancelled
    }

    /// Whether this state ends a request.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ViewState::Loaded | ViewState::Failed | ViewState::Cancelled
        )
    }
}

/// Size class of the busy indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorSize {
    Small,
    Large,
}

impl IndicatorSize {
    /// Pick the indicator tier for a view of the given size.
    ///
    /// Both sides at least 64 → large, both at least 16 → small, otherwise
    /// the view is too small for an indicator.
    #[must_use]
    pub fn for_view(width: f32, height: f32) -> Option<Self> {
        if width >= LARGE_INDICATOR_MIN_SIDE && height >= LARGE_INDICATOR_MIN_SIDE {
            Some(IndicatorSize::Large)
        } else if width >= SMALL_INDICATOR_MIN_SIDE && height >= SMALL_INDICATOR_MIN_SIDE {
            Some(IndicatorSize::Small)
        } else {
            None
        }
    }

    /// Side length in logical pixels.
    #[must_use]
    pub fn side(self) -> f32 {
        match self {
            IndicatorSize::Small => SMALL_INDICATOR_SIZE,
            IndicatorSize::Large => LARGE_INDICATOR_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_follow_state() {
        assert!(ViewState::Loading.is_loading());
        assert!(!ViewState::Loading.did_fail());
        assert!(ViewState::Failed.did_fail());
        assert!(ViewState::Cancelled.was_cancelled());
        assert!(!ViewState::Idle.is_loading());
        assert_eq!(ViewState::default(), ViewState::Idle);
    }

    #[test]
    fn terminal_states() {
        assert!(ViewState::Loaded.is_terminal());
        assert!(ViewState::Failed.is_terminal());
        assert!(ViewState::Cancelled.is_terminal());
        assert!(!ViewState::Idle.is_terminal());
        assert!(!ViewState::Loading.is_terminal());
    }

    #[test]
    fn indicator_tiers() {
        assert_eq!(IndicatorSize::for_view(64.0, 64.0), Some(IndicatorSize::Large));
        assert_eq!(IndicatorSize::for_view(300.0, 200.0), Some(IndicatorSize::Large));
        assert_eq!(IndicatorSize::for_view(63.9, 200.0), Some(IndicatorSize::Small));
        assert_eq!(IndicatorSize::for_view(16.0, 16.0), Some(IndicatorSize::Small));
        assert_eq!(IndicatorSize::for_view(15.0, 100.0), None);
        assert_eq!(IndicatorSize::for_view(0.0, 0.0), None);
    }

    #[test]
    fn indicator_sides() {
        assert!(IndicatorSize::Large.side() > IndicatorSize::Small.side());
    }
}
