// Copyright 2025 the closedby Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconciling `closedby` attribute changes on dialogs.
//!
//! Only attribute records for `closedby` on dialog nodes are considered, and
//! only when the recorded old value differs from the current value. What
//! happens next follows [`ModeChangePolicy`].

use smallvec::SmallVec;

use crate::emulator::Emulator;
use crate::event::MutationRecord;
use crate::host::Host;
use crate::mode::CLOSEDBY_ATTRIBUTE;
use crate::options::ModeChangePolicy;

impl<H: Host> Emulator<H> {
    /// Handle a batch of mutation records from an observed scope.
    ///
    /// Returns the dialogs that were open and got closed.
    pub fn on_mutations(&mut self, records: &[MutationRecord<H::Node>]) -> SmallVec<[H::Node; 4]> {
        let mut closed = SmallVec::new();
        for record in records {
            if !record.is_attribute(CLOSEDBY_ATTRIBUTE) || !self.host.is_dialog(record.target) {
                continue;
            }
            let dialog = record.target;
            let current = self.host.attribute(dialog, CLOSEDBY_ATTRIBUTE);
            if record.old_value.as_deref() == current {
                continue;
            }
            log::debug!(
                "closedby of {dialog:?} changed from {:?} to {current:?}",
                record.old_value
            );
            match self.options.mode_change {
                ModeChangePolicy::Close => {
                    let was_open = self.registry.is_open(dialog);
                    if self.close_quietly(dialog) && was_open {
                        closed.push(dialog);
                    }
                }
                ModeChangePolicy::Reregister => self.retrack_open(dialog),
            }
        }
        closed
    }
}
