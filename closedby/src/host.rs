// Copyright 2025 the closedby Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities the embedding host provides.
//!
//! The emulator never touches a DOM directly. The host implements [`Host`]
//! and routes dialog `show`/`show_modal`/`close` calls, input events and
//! attribute mutation records through the [`Emulator`](crate::Emulator).
//! Native operations are the host's own, un-emulated behavior.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use kurbo::Rect;

use crate::error::HostError;
use crate::mode::{CLOSEDBY_ATTRIBUTE, CLOSEDBY_PROPERTY};

bitflags::bitflags! {
    /// What a scope observation reports, mirroring mutation observer options.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ObserveFlags: u8 {
        /// Report child list changes.
        const CHILD_LIST         = 0b0000_0001;
        /// Extend observation to the whole subtree of the scope.
        const SUBTREE            = 0b0000_0010;
        /// Report attribute changes.
        const ATTRIBUTES         = 0b0000_0100;
        /// Record the previous attribute value in each record.
        const ATTRIBUTE_OLD_VALUE = 0b0000_1000;
    }
}

bitflags::bitflags! {
    /// Input events the emulator needs delivered.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventKinds: u8 {
        /// Pointer presses, for light dismiss.
        const POINTER_DOWN = 0b0000_0001;
        /// Key presses, for Escape suppression.
        const KEY_DOWN     = 0b0000_0010;
    }
}

/// Options for observing a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObserveOptions {
    /// Which changes to report.
    pub flags: ObserveFlags,
    /// Attribute names to report; empty means every attribute.
    pub attribute_filter: &'static [&'static str],
}

impl ObserveOptions {
    /// Watch the whole subtree for `closedby` changes, keeping old values.
    pub const fn closed_by() -> Self {
        Self {
            flags: ObserveFlags::CHILD_LIST
                .union(ObserveFlags::SUBTREE)
                .union(ObserveFlags::ATTRIBUTES)
                .union(ObserveFlags::ATTRIBUTE_OLD_VALUE),
            attribute_filter: &[CLOSEDBY_ATTRIBUTE],
        }
    }

    /// Whether a change of attribute `name` should be reported.
    pub fn reports_attribute(&self, name: &str) -> bool {
        self.flags.contains(ObserveFlags::ATTRIBUTES)
            && (self.attribute_filter.is_empty()
                || self.attribute_filter.iter().any(|a| *a == name))
    }
}

/// Encapsulation mode of a shadow root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShadowRootMode {
    /// Reachable from the host element.
    #[default]
    Open,
    /// Hidden from the host element.
    Closed,
}

/// Parameters for attaching a shadow root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShadowRootInit {
    /// Encapsulation mode.
    pub mode: ShadowRootMode,
    /// Whether focus delegates into the shadow tree.
    pub delegates_focus: bool,
}

/// Host environment capabilities used by the emulator.
pub trait Host {
    /// Node handle. Dialogs are nodes.
    type Node: Copy + Eq + Hash + Debug;
    /// Scope handle: a document or a shadow root. Registries are keyed by
    /// documents; shadow roots are only observed.
    type Scope: Copy + Eq + Hash + Debug;

    /// Native non-modal open.
    fn show(&mut self, dialog: Self::Node) -> Result<(), HostError>;
    /// Native modal open.
    fn show_modal(&mut self, dialog: Self::Node) -> Result<(), HostError>;
    /// Native close. Closing a closed dialog is a no-op.
    fn close(&mut self, dialog: Self::Node) -> Result<(), HostError>;
    /// Whether `dialog` is currently rendered as a blocking modal.
    fn is_modal(&self, dialog: Self::Node) -> bool;
    /// Whether `node` is a dialog element.
    fn is_dialog(&self, node: Self::Node) -> bool;

    /// Current value of attribute `name`.
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;
    /// Persist attribute `name`.
    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);
    /// Remove attribute `name`.
    fn remove_attribute(&mut self, node: Self::Node, name: &str);

    /// Bounding rectangle of `node` in viewport coordinates.
    fn bounding_client_rect(&self, node: Self::Node) -> Rect;

    /// Document owning `node`, looking through any shadow roots it sits in.
    /// `None` for detached nodes.
    fn owner_document(&self, node: Self::Node) -> Option<Self::Scope>;
    /// The top-level document scope.
    fn document(&self) -> Self::Scope;
    /// Shadow scopes that already exist.
    fn shadow_roots(&self) -> Vec<Self::Scope>;
    /// Native shadow attachment. Returns the new scope.
    fn attach_shadow(
        &mut self,
        element: Self::Node,
        init: ShadowRootInit,
    ) -> Result<Self::Scope, HostError>;

    /// Start delivering mutation records for `scope`.
    fn observe(&mut self, scope: Self::Scope, options: &ObserveOptions);
    /// Start delivering the given input events dispatched in `scope`.
    fn listen(&mut self, scope: Self::Scope, events: EventKinds);
}

/// Feature detection against the host's dialog interface.
pub trait FeatureProbe {
    /// Whether the host has a dialog interface at all.
    fn has_dialog_interface(&self) -> bool;
    /// Whether the dialog interface exposes property `name`.
    fn dialog_has_property(&self, name: &str) -> bool;
}

/// Whether the host already implements dismissal modes natively.
///
/// Callers use this to decide whether to install the emulator at all.
pub fn is_supported(probe: &impl FeatureProbe) -> bool {
    probe.has_dialog_interface() && probe.dialog_has_property(CLOSEDBY_PROPERTY)
}
