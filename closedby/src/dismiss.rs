// Copyright 2025 the closedby Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Light dismiss on pointer presses outside open dialogs.
//!
//! The light-dismiss set of the event's document is walked newest first. Each
//! dialog that does not contain the pointer is closed; the walk stops at the
//! first dialog that does, leaving it and everything older open. Pressing
//! outside every dialog closes them all, newest first.

use closedby_hit::BoundsHitTest;
use smallvec::SmallVec;

use crate::emulator::Emulator;
use crate::event::PointerDown;
use crate::host::Host;

impl<H: Host> Emulator<H> {
    /// Handle a pointer press.
    ///
    /// Untrusted events are ignored. Returns the dialogs closed, in close
    /// order.
    pub fn on_pointer_down(&mut self, event: &PointerDown<'_, H::Node>) -> SmallVec<[H::Node; 4]> {
        let mut closed = SmallVec::new();
        if !event.trusted {
            log::trace!("ignoring untrusted pointer down");
            return closed;
        }
        let Some(document) = self.event_document(event.composed_path) else {
            return closed;
        };

        // Snapshot: closing mutates the set being walked.
        let candidates: SmallVec<[H::Node; 4]> =
            self.registry.light_dismiss_dialogs(&document).rev().collect();
        for dialog in candidates {
            let bounds = self.host.bounding_client_rect(dialog);
            if let Some(score) = bounds.hit_test_bounds(event.position, &self.options.hit) {
                log::trace!(
                    "pointer at {:?} lands in {dialog:?} (distance {})",
                    event.position,
                    score.distance
                );
                break;
            }
            log::debug!("light dismissing {dialog:?}");
            if self.close_quietly(dialog) {
                closed.push(dialog);
            }
        }
        closed
    }
}
