// Copyright 2025 the closedby Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events and mutation records delivered by the host.
//!
//! Events carry their composed path, innermost node first, so targets inside
//! shadow scopes resolve to the node that was actually hit rather than the
//! shadow host. "Default prevented" lives on the event payload: handlers set
//! it and the host checks it before running its default action.

use alloc::string::String;

use kurbo::Point;

/// Key value of the Escape key.
pub const ESCAPE_KEY: &str = "Escape";

/// A pointer press.
#[derive(Clone, Copy, Debug)]
pub struct PointerDown<'a, N> {
    /// Whether the user agent generated the event (as opposed to script).
    pub trusted: bool,
    /// Pointer position in viewport coordinates.
    pub position: Point,
    /// Composed path, innermost target first.
    pub composed_path: &'a [N],
}

impl<'a, N> PointerDown<'a, N> {
    /// A user-generated press.
    pub fn trusted(position: Point, composed_path: &'a [N]) -> Self {
        Self {
            trusted: true,
            position,
            composed_path,
        }
    }

    /// A press synthesized by script.
    pub fn untrusted(position: Point, composed_path: &'a [N]) -> Self {
        Self {
            trusted: false,
            position,
            composed_path,
        }
    }
}

/// A key press.
#[derive(Clone, Copy, Debug)]
pub struct KeyDown<'a, N> {
    /// Whether the user agent generated the event (as opposed to script).
    pub trusted: bool,
    /// Key value, e.g. `"Escape"`.
    pub key: &'a str,
    /// Composed path, innermost target first.
    pub composed_path: &'a [N],
    /// Set when a handler suppresses the host's default action.
    pub default_prevented: bool,
}

impl<'a, N> KeyDown<'a, N> {
    /// A user-generated key press.
    pub fn trusted(key: &'a str, composed_path: &'a [N]) -> Self {
        Self {
            trusted: true,
            key,
            composed_path,
            default_prevented: false,
        }
    }

    /// A key press synthesized by script.
    pub fn untrusted(key: &'a str, composed_path: &'a [N]) -> Self {
        Self {
            trusted: false,
            ..Self::trusted(key, composed_path)
        }
    }

    /// Whether this is the Escape key.
    pub fn is_escape(&self) -> bool {
        self.key == ESCAPE_KEY
    }

    /// Suppress the host's default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// Kind of observed mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// An attribute changed.
    Attributes,
    /// Children were added or removed.
    ChildList,
}

/// A mutation observed in a watched scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationRecord<N> {
    /// What changed.
    pub kind: MutationKind,
    /// The node that changed.
    pub target: N,
    /// Attribute name, for attribute mutations.
    pub attribute_name: Option<String>,
    /// Attribute value before the change; `None` if it was absent.
    pub old_value: Option<String>,
}

impl<N> MutationRecord<N> {
    /// An attribute mutation.
    pub fn attribute(target: N, name: &str, old_value: Option<&str>) -> Self {
        Self {
            kind: MutationKind::Attributes,
            target,
            attribute_name: Some(name.into()),
            old_value: old_value.map(Into::into),
        }
    }

    /// A child list mutation.
    pub fn child_list(target: N) -> Self {
        Self {
            kind: MutationKind::ChildList,
            target,
            attribute_name: None,
            old_value: None,
        }
    }

    /// Whether this records a change of attribute `name`.
    pub fn is_attribute(&self, name: &str) -> bool {
        self.kind == MutationKind::Attributes && self.attribute_name.as_deref() == Some(name)
    }
}
