// SPDX-License-Identifier: MPL-2.0
//! Tooltip text per load state.

use super::state::ViewState;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TooltipConfiguration {
    pub loading: Option<String>,
    pub loaded: Option<String>,
    pub failed: Option<String>,
}

impl TooltipConfiguration {
    #[must_use]
    pub fn new(loading: Option<String>, loaded: Option<String>, failed: Option<String>) -> Self {
        Self {
            loading,
            loaded,
            failed,
        }
    }

    /// Tooltip to show for `state`.
    ///
    /// Cancelled views never show a tooltip. Anything that is neither loading
    /// nor failed uses the finished tooltip.
    #[must_use]
    pub fn for_state(&self, state: ViewState) -> Option<&str> {
        match state {
            ViewState::Cancelled => None,
            ViewState::Loading => self.loading.as_deref(),
            ViewState::Failed => self.failed.as_deref(),
            ViewState::Idle | ViewState::Loaded => self.loaded.as_deref(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loading.is_none() && self.loaded.is_none() && self.failed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> TooltipConfiguration {
        TooltipConfiguration::new(
            Some("Loading…".into()),
            Some("Logo".into()),
            Some("Could not load logo".into()),
        )
    }

    #[test]
    fn each_state_maps_to_its_text() {
        let tips = configured();
        assert_eq!(tips.for_state(ViewState::Loading), Some("Loading…"));
        assert_eq!(tips.for_state(ViewState::Loaded), Some("Logo"));
        assert_eq!(tips.for_state(ViewState::Failed), Some("Could not load logo"));
        assert_eq!(tips.for_state(ViewState::Idle), Some("Logo"));
    }

    #[test]
    fn cancelled_has_no_tooltip() {
        assert_eq!(configured().for_state(ViewState::Cancelled), None);
    }

    #[test]
    fn unconfigured_entries_are_none() {
        let tips = TooltipConfiguration::new(Some("Loading…".into()), None, None);
        assert_eq!(tips.for_state(ViewState::Failed), None);
        assert!(!tips.is_empty());
        assert!(TooltipConfiguration::default().is_empty());
    }
}
