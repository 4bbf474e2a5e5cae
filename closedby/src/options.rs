// Copyright 2025 the closedby Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Emulator configuration.

use closedby_hit::HitParams;

/// What to do when `closedby` changes on an open dialog.
///
/// The emulated standard leaves this unspecified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModeChangePolicy {
    /// Close the dialog.
    #[default]
    Close,
    /// Keep the dialog open and re-derive its light-dismiss membership and
    /// close watcher from the new mode.
    Reregister,
}

/// Emulator configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Options {
    /// Parameters for light-dismiss hit tests.
    pub hit: HitParams,
    /// Reaction to `closedby` changes on open dialogs.
    pub mode_change: ModeChangePolicy,
    /// Attach close watchers to modal dialogs too.
    ///
    /// Hosts whose native modal dialogs already cancel on Escape may turn
    /// this off so that only non-modal dialogs get emulated watchers.
    pub modal_close_watchers: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            hit: HitParams::default(),
            mode_change: ModeChangePolicy::Close,
            modal_close_watchers: true,
        }
    }
}
