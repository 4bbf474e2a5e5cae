// Copyright 2025 the closedby Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `closedby` dismissal mode and its attribute mapping.

use core::fmt;

/// Name of the attribute persisting a dialog's dismissal mode.
pub const CLOSEDBY_ATTRIBUTE: &str = "closedby";

/// Name of the property hosts expose once they support dismissal modes natively.
pub const CLOSEDBY_PROPERTY: &str = "closedBy";

/// Which user actions may dismiss a dialog.
///
/// Only these four values are ever observable. Anything else persisted in
/// the attribute reads back as [`ClosedBy::Unset`].
///
/// ```
/// use closedby::ClosedBy;
///
/// assert_eq!(ClosedBy::from_attribute(Some("any")), ClosedBy::Any);
/// assert_eq!(ClosedBy::from_attribute(Some("Any")), ClosedBy::Unset);
/// assert_eq!(ClosedBy::from_attribute(None), ClosedBy::Unset);
/// assert_eq!(ClosedBy::CloseRequest.as_str(), "closerequest");
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClosedBy {
    /// No attribute, or an unrecognized value. Reads as the empty string.
    #[default]
    Unset,
    /// Only explicit `close` calls dismiss the dialog; Escape is suppressed on modals.
    None,
    /// Close requests (Escape, back gestures) and outside pointer presses dismiss.
    Any,
    /// Close requests dismiss; outside pointer presses do not.
    CloseRequest,
}

impl ClosedBy {
    /// Parse one of the three canonical keywords.
    ///
    /// Matching is exact and case-sensitive. Returns `None` for every other
    /// string, including the empty string.
    pub fn from_keyword(value: &str) -> Option<Self> {
        match value {
            "none" => Some(Self::None),
            "any" => Some(Self::Any),
            "closerequest" => Some(Self::CloseRequest),
            _ => Option::None,
        }
    }

    /// Derive the mode from a persisted attribute value.
    pub fn from_attribute(value: Option<&str>) -> Self {
        value.and_then(Self::from_keyword).unwrap_or_default()
    }

    /// Canonical string form; [`ClosedBy::Unset`] is the empty string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::None => "none",
            Self::Any => "any",
            Self::CloseRequest => "closerequest",
        }
    }

    /// Whether an open dialog in this mode owns a close watcher.
    pub const fn has_close_watcher(self) -> bool {
        matches!(self, Self::Any | Self::CloseRequest)
    }

    /// Whether an open dialog in this mode takes part in light dismiss.
    pub const fn is_light_dismissable(self) -> bool {
        matches!(self, Self::Any)
    }
}

impl fmt::Display for ClosedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_round_trip_through_as_str() {
        for mode in [ClosedBy::None, ClosedBy::Any, ClosedBy::CloseRequest] {
            assert_eq!(ClosedBy::from_keyword(mode.as_str()), Some(mode));
        }
        assert_eq!(ClosedBy::from_keyword(ClosedBy::Unset.as_str()), None);
    }

    #[test]
    fn unrecognized_values_read_as_unset() {
        for value in ["", "ANY", " any", "close-request", "auto"] {
            assert_eq!(ClosedBy::from_attribute(Some(value)), ClosedBy::Unset);
        }
    }

    #[test]
    fn watcher_and_light_dismiss_membership() {
        assert!(ClosedBy::Any.has_close_watcher());
        assert!(ClosedBy::CloseRequest.has_close_watcher());
        assert!(!ClosedBy::None.has_close_watcher());
        assert!(!ClosedBy::Unset.has_close_watcher());

        assert!(ClosedBy::Any.is_light_dismissable());
        assert!(!ClosedBy::CloseRequest.is_light_dismissable());
    }
}
