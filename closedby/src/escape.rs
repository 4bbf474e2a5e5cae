// Copyright 2025 the closedby Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Escape suppression for modal dialogs with `closedby="none"`.
//!
//! Hosts cancel a modal dialog on Escape. When the newest open dialog of the
//! event's document is a modal whose mode is [`ClosedBy::None`], the key press
//! is marked default-prevented so the host skips that cancel.

use crate::emulator::Emulator;
use crate::event::KeyDown;
use crate::host::Host;
use crate::mode::ClosedBy;

impl<H: Host> Emulator<H> {
    /// Handle a key press.
    ///
    /// Untrusted events and keys other than Escape are ignored. Returns
    /// `true` if this call prevented the event's default.
    pub fn on_key_down(&self, event: &mut KeyDown<'_, H::Node>) -> bool {
        if !event.trusted {
            log::trace!("ignoring untrusted key down");
            return false;
        }
        if !event.is_escape() {
            return false;
        }
        let Some(document) = self.event_document(event.composed_path) else {
            return false;
        };
        let Some(top) = self.registry.newest_open(&document) else {
            return false;
        };
        if self.closed_by(top) == ClosedBy::None && self.host.is_modal(top) {
            log::debug!("suppressing Escape for {top:?}");
            event.prevent_default();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::Emulator;
    use crate::event::KeyDown;
    use crate::test_host::TestHost;
    use kurbo::Rect;

    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 10.0, 10.0)
    }

    fn emulator() -> Emulator<TestHost> {
        let mut emulator = Emulator::new(TestHost::new());
        emulator.install();
        emulator
    }

    #[test]
    fn escape_on_modal_none_is_prevented() {
        let mut emulator = emulator();
        let d = emulator.host_mut().dialog_with_mode(rect(), "none");
        emulator.show_modal(d).unwrap();

        let path = [d];
        let mut event = KeyDown::trusted("Escape", &path);
        assert!(emulator.on_key_down(&mut event));
        assert!(event.default_prevented);
    }

    #[test]
    fn escape_on_modal_any_is_not_prevented() {
        let mut emulator = emulator();
        let d = emulator.host_mut().dialog_with_mode(rect(), "any");
        emulator.show_modal(d).unwrap();

        let path = [d];
        let mut event = KeyDown::trusted("Escape", &path);
        assert!(!emulator.on_key_down(&mut event));
        assert!(!event.default_prevented);
    }

    #[test]
    fn non_modal_none_is_not_prevented() {
        let mut emulator = emulator();
        let d = emulator.host_mut().dialog_with_mode(rect(), "none");
        emulator.show(d).unwrap();

        let path = [d];
        let mut event = KeyDown::trusted("Escape", &path);
        assert!(!emulator.on_key_down(&mut event));
    }

    #[test]
    fn only_the_newest_dialog_counts() {
        let mut emulator = emulator();
        let inescapable = emulator.host_mut().dialog_with_mode(rect(), "none");
        let newer = emulator.host_mut().dialog_with_mode(rect(), "closerequest");
        emulator.show_modal(inescapable).unwrap();
        emulator.show_modal(newer).unwrap();

        let path = [newer];
        let mut event = KeyDown::trusted("Escape", &path);
        assert!(!emulator.on_key_down(&mut event));

        emulator.close(newer).unwrap();
        let path = [inescapable];
        let mut event = KeyDown::trusted("Escape", &path);
        assert!(emulator.on_key_down(&mut event));
    }

    #[test]
    fn untrusted_and_other_keys_are_ignored() {
        let mut emulator = emulator();
        let d = emulator.host_mut().dialog_with_mode(rect(), "none");
        emulator.show_modal(d).unwrap();
        let path = [d];

        let mut untrusted = KeyDown::untrusted("Escape", &path);
        assert!(!emulator.on_key_down(&mut untrusted));
        assert!(!untrusted.default_prevented);

        let mut enter = KeyDown::trusted("Enter", &path);
        assert!(!emulator.on_key_down(&mut enter));
        assert!(!enter.default_prevented);
    }

    #[test]
    fn escape_from_inside_a_shadow_tree_is_prevented() {
        let mut emulator = emulator();
        let d = emulator.host_mut().dialog_with_mode(rect(), "none");
        let widget = emulator.host_mut().element();
        let shadow = emulator
            .attach_shadow(widget, Default::default())
            .unwrap();
        let input = emulator.host_mut().element_in(shadow);
        emulator.show_modal(d).unwrap();

        let path = [input, widget, d];
        let mut event = KeyDown::trusted("Escape", &path);
        assert!(emulator.on_key_down(&mut event));
        assert!(event.default_prevented);
    }

    #[test]
    fn no_open_dialogs_is_a_no_op() {
        let emulator = emulator();
        let target = emulator.host().root();
        let path = [target];
        let mut event = KeyDown::trusted("Escape", &path);
        assert!(!emulator.on_key_down(&mut event));
    }
}
