// Copyright 2025 the closedby Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! closedby: dialog dismissal semantics for hosts that lack them.
//!
//! ## Overview
//!
//! The `closedby` attribute on a dialog says which user actions may dismiss
//! it: `any` (close requests and outside pointer presses), `closerequest`
//! (close requests only) or `none` (explicit `close` calls only; Escape is
//! suppressed on modals). This crate emulates those semantics on top of a
//! host that implements plain dialogs.
//!
//! It does not own a DOM. The host implements [`Host`] and routes dialog
//! lifecycle calls, input events and attribute mutation records through an
//! [`Emulator`]; the emulator keeps per-scope registries of open dialogs and
//! decides what to close.
//!
//! ## Workflow
//!
//! 1) Optionally check [`is_supported`]; hosts with native `closedBy` do not
//!    need the emulator. [`Emulator::install_unless_supported`] does both.
//! 2) [`Emulator::install`]: the emulator asks the host to observe the
//!    document and its shadow scopes for `closedby` changes, and to deliver
//!    pointer and key presses.
//! 3) Open and close dialogs with [`Emulator::show`],
//!    [`Emulator::show_modal`] and [`Emulator::close`]. Opening registers the
//!    dialog with its document and, for `any`/`closerequest`, attaches a close
//!    watcher. Closing undoes both.
//! 4) Feed input:
//!    - [`Emulator::on_pointer_down`] light dismisses `any` dialogs newest
//!      first until one contains the pointer.
//!    - [`Emulator::on_key_down`] prevents the default of Escape when the
//!      newest open dialog is a `none` modal.
//!    - [`Emulator::request_close`] delivers a platform cancel gesture to the
//!      newest close watcher.
//!    - [`Emulator::on_mutations`] closes dialogs whose `closedby` changed
//!      (see [`ModeChangePolicy`]).
//!
//! Untrusted (script-generated) events never dismiss or suppress anything.
//!
//! ## Scopes
//!
//! Every dialog belongs to the document the host reports for it, looking
//! through any shadow roots it sits in. Registries are kept per document, and
//! events are attributed to the document of the innermost node of their
//! composed path, so a press or key inside a shadow tree sees every dialog
//! of its document. Shadow roots are observed for `closedby` changes like
//! the document, including those attached through [`Emulator::attach_shadow`]
//! after install.
//!
//! ## Errors
//!
//! Native operations the host can refuse return [`HostError`], which the
//! lifecycle methods propagate unchanged. Event-driven closes log failures
//! through [`log`] and carry on; nothing else in the emulator fails.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod dismiss;
mod emulator;
mod error;
mod escape;
pub mod event;
pub mod host;
mod mode;
mod options;
mod reconcile;
pub mod registry;
pub mod watcher;

#[cfg(test)]
mod test_host;

pub use closedby_hit::HitParams;
pub use emulator::Emulator;
pub use error::HostError;
pub use event::{ESCAPE_KEY, KeyDown, MutationKind, MutationRecord, PointerDown};
pub use host::{
    EventKinds, FeatureProbe, Host, ObserveFlags, ObserveOptions, ShadowRootInit, ShadowRootMode,
    is_supported,
};
pub use mode::{CLOSEDBY_ATTRIBUTE, CLOSEDBY_PROPERTY, ClosedBy};
pub use options::{ModeChangePolicy, Options};
pub use registry::Registry;
pub use watcher::{CloseWatchers, WatcherId};
