// SPDX-License-Identifier: MPL-2.0
//! Styles for the async image view.

pub mod tooltip;
