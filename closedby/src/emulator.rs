// Copyright 2025 the closedby Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The emulator: lifecycle interception, install, and the mode accessor.
//!
//! Light dismiss, Escape suppression and mutation reconciliation are
//! implemented in their own modules as further `impl` blocks on
//! [`Emulator`].

use smallvec::SmallVec;

use crate::error::HostError;
use crate::host::{EventKinds, FeatureProbe, Host, ObserveOptions, ShadowRootInit, is_supported};
use crate::mode::{CLOSEDBY_ATTRIBUTE, ClosedBy};
use crate::options::Options;
use crate::registry::Registry;
use crate::watcher::{CloseWatchers, WatcherId};

/// Emulates `closedby` dismissal semantics on top of a [`Host`].
///
/// ## Usage
///
/// - Construct with [`Emulator::new`] or [`Emulator::with_options`].
/// - Call [`Emulator::install`] (or [`Emulator::install_unless_supported`])
///   once; the host then starts delivering events and mutation records.
/// - Route every dialog `show`/`show_modal`/`close` through the emulator
///   instead of calling the host's native operations.
/// - Forward trusted and untrusted input to [`Emulator::on_pointer_down`]
///   and [`Emulator::on_key_down`], mutation records to
///   [`Emulator::on_mutations`], and platform cancel gestures to
///   [`Emulator::request_close`].
pub struct Emulator<H: Host> {
    pub(crate) host: H,
    pub(crate) options: Options,
    pub(crate) registry: Registry<H::Scope, H::Node>,
    pub(crate) watchers: CloseWatchers<H::Node>,
    observed: SmallVec<[H::Scope; 4]>,
    installed: bool,
}

impl<H: Host> core::fmt::Debug for Emulator<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Emulator")
            .field("options", &self.options)
            .field("registry", &self.registry)
            .field("watchers", &self.watchers)
            .field("installed", &self.installed)
            .finish_non_exhaustive()
    }
}

impl<H: Host> Emulator<H> {
    /// Create an emulator with default options. Nothing is observed until
    /// [`Emulator::install`].
    pub fn new(host: H) -> Self {
        Self::with_options(host, Options::default())
    }

    /// Create an emulator with explicit options.
    pub fn with_options(host: H, options: Options) -> Self {
        Self {
            host,
            options,
            registry: Registry::new(),
            watchers: CloseWatchers::new(),
            observed: SmallVec::new(),
            installed: false,
        }
    }

    /// The wrapped host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The wrapped host, mutably.
    ///
    /// Calling native lifecycle operations directly bypasses the registries.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the emulator, returning the host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Current options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Open-dialog registries.
    pub fn registry(&self) -> &Registry<H::Scope, H::Node> {
        &self.registry
    }

    /// Active close watchers.
    pub fn watchers(&self) -> &CloseWatchers<H::Node> {
        &self.watchers
    }

    /// The close watcher owned by `dialog`, if it has one.
    pub fn close_watcher(&self, dialog: H::Node) -> Option<WatcherId> {
        self.watchers.watcher_for(dialog)
    }

    /// Whether [`Emulator::install`] has run.
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// Start observing the document and every existing shadow scope for
    /// `closedby` changes, and subscribe to pointer and key presses.
    ///
    /// Idempotent: returns `true` only for the call that installed.
    pub fn install(&mut self) -> bool {
        if self.installed {
            return false;
        }
        self.installed = true;
        let document = self.host.document();
        self.observe_scope(document);
        for scope in self.host.shadow_roots() {
            self.observe_scope(scope);
        }
        self.host
            .listen(document, EventKinds::POINTER_DOWN | EventKinds::KEY_DOWN);
        log::debug!("closedby emulation installed on {document:?}");
        true
    }

    /// Install unless the host supports `closedby` natively.
    ///
    /// Returns `true` if this call installed the emulator.
    pub fn install_unless_supported(&mut self) -> bool
    where
        H: FeatureProbe,
    {
        if is_supported(&self.host) {
            log::debug!("host supports closedby natively; emulation not installed");
            return false;
        }
        self.install()
    }

    fn observe_scope(&mut self, scope: H::Scope) {
        if self.observed.contains(&scope) {
            return;
        }
        self.observed.push(scope);
        self.host.observe(scope, &ObserveOptions::closed_by());
    }

    /// Attach a shadow root through the host and, once installed, observe it.
    pub fn attach_shadow(
        &mut self,
        element: H::Node,
        init: ShadowRootInit,
    ) -> Result<H::Scope, HostError> {
        let scope = self.host.attach_shadow(element, init)?;
        if self.installed {
            self.observe_scope(scope);
        }
        Ok(scope)
    }

    /// Dismissal mode of `dialog`, read from its `closedby` attribute.
    pub fn closed_by(&self, dialog: H::Node) -> ClosedBy {
        ClosedBy::from_attribute(self.host.attribute(dialog, CLOSEDBY_ATTRIBUTE))
    }

    /// Write the dismissal mode from a string.
    ///
    /// Canonical keywords are persisted; anything else removes the attribute.
    pub fn set_closed_by(&mut self, dialog: H::Node, value: &str) {
        match ClosedBy::from_keyword(value) {
            Some(mode) => self.host.set_attribute(dialog, CLOSEDBY_ATTRIBUTE, mode.as_str()),
            None => self.host.remove_attribute(dialog, CLOSEDBY_ATTRIBUTE),
        }
    }

    /// Write the dismissal mode. [`ClosedBy::Unset`] removes the attribute.
    pub fn set_closed_by_mode(&mut self, dialog: H::Node, mode: ClosedBy) {
        self.set_closed_by(dialog, mode.as_str());
    }

    /// Open `dialog` non-modally.
    ///
    /// Host failures propagate and leave the registries untouched.
    pub fn show(&mut self, dialog: H::Node) -> Result<(), HostError> {
        self.host.show(dialog)?;
        self.track_open(dialog, true);
        Ok(())
    }

    /// Open `dialog` as a modal.
    ///
    /// Host failures propagate and leave the registries untouched.
    pub fn show_modal(&mut self, dialog: H::Node) -> Result<(), HostError> {
        self.host.show_modal(dialog)?;
        self.track_open(dialog, self.options.modal_close_watchers);
        Ok(())
    }

    /// Close `dialog`, dispose its close watcher and forget it.
    ///
    /// Host failures propagate and leave the registries untouched.
    pub fn close(&mut self, dialog: H::Node) -> Result<(), HostError> {
        self.host.close(dialog)?;
        if let Some(id) = self.watchers.dispose_for(dialog) {
            log::trace!("disposed {id:?} of {dialog:?}");
        }
        let removed = match self.host.owner_document(dialog) {
            Some(document) => self.registry.unregister(&document, dialog),
            None => false,
        };
        // Moved between documents while open.
        if !removed && self.registry.forget(dialog) > 0 {
            log::debug!("{dialog:?} closed outside of its registered document");
        }
        Ok(())
    }

    /// Deliver a platform cancel gesture to the newest active close watcher.
    ///
    /// The watcher fires once and its dialog is closed. Returns the closed
    /// dialog, or `None` when no watcher is active or the host refused the
    /// close, in which case the watcher stays active.
    pub fn request_close(&mut self) -> Option<H::Node> {
        let (id, dialog) = self.watchers.topmost()?;
        log::debug!("close request reached {id:?} of {dialog:?}");
        // A successful close disposes the watcher; a failed one keeps it.
        self.close_quietly(dialog).then_some(dialog)
    }

    fn track_open(&mut self, dialog: H::Node, watch: bool) {
        let mode = self.closed_by(dialog);
        let Some(document) = self.host.owner_document(dialog) else {
            log::trace!("{dialog:?} opened without an owner document; not tracked");
            return;
        };
        self.registry.register(document, dialog, mode);
        if watch && mode.has_close_watcher() {
            self.watchers.create(dialog);
        }
        log::debug!("{dialog:?} opened in {document:?} with closedby={mode:?}");
    }

    /// Re-derive registry membership and watcher ownership of an open dialog
    /// from its current mode.
    pub(crate) fn retrack_open(&mut self, dialog: H::Node) {
        if !self.registry.is_open(dialog) {
            return;
        }
        let mode = self.closed_by(dialog);
        let watch = !self.host.is_modal(dialog) || self.options.modal_close_watchers;
        if let Some(document) = self.host.owner_document(dialog) {
            self.registry.register(document, dialog, mode);
        }
        if watch && mode.has_close_watcher() {
            self.watchers.create(dialog);
        } else {
            self.watchers.dispose_for(dialog);
        }
        log::debug!("{dialog:?} re-tracked with closedby={mode:?}");
    }

    /// Close for event-driven paths: failures are logged, never raised.
    pub(crate) fn close_quietly(&mut self, dialog: H::Node) -> bool {
        match self.close(dialog) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("failed to close {dialog:?}: {err}");
                false
            }
        }
    }

    /// Document of an event's innermost target.
    pub(crate) fn event_document(&self, composed_path: &[H::Node]) -> Option<H::Scope> {
        let target = *composed_path.first()?;
        self.host.owner_document(target)
    }
}
