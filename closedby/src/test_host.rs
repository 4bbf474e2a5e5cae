// Copyright 2025 the closedby Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host for unit tests.

use alloc::borrow::ToOwned;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::error::HostError;
use crate::event::MutationRecord;
use crate::host::{EventKinds, FeatureProbe, Host, ObserveFlags, ObserveOptions, ShadowRootInit};
use crate::mode::CLOSEDBY_ATTRIBUTE;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ScopeId(u32);

const DOCUMENT: ScopeId = ScopeId(0);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum OpenState {
    NonModal,
    Modal,
}

#[derive(Clone, Debug)]
struct TestNode {
    scope: Option<ScopeId>,
    dialog: bool,
    open: Option<OpenState>,
    attributes: BTreeMap<String, String>,
    rect: Rect,
    shadow_root: Option<ScopeId>,
}

#[derive(Debug)]
pub(crate) struct TestHost {
    nodes: Vec<TestNode>,
    root: NodeId,
    next_scope: u32,
    shadow_roots: Vec<ScopeId>,
    observed: Vec<ScopeId>,
    observe_options: Vec<(ScopeId, ObserveOptions)>,
    listeners: Vec<(ScopeId, EventKinds)>,
    mutations: Vec<MutationRecord<NodeId>>,
    close_log: Vec<NodeId>,
    refused_closes: Vec<NodeId>,
    native_closed_by: bool,
}

impl TestHost {
    pub(crate) fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut host = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            next_scope: 1,
            shadow_roots: Vec::new(),
            observed: Vec::new(),
            observe_options: Vec::new(),
            listeners: Vec::new(),
            mutations: Vec::new(),
            close_log: Vec::new(),
            refused_closes: Vec::new(),
            native_closed_by: false,
        };
        host.root = host.element();
        host
    }

    pub(crate) fn with_native_closed_by() -> Self {
        Self {
            native_closed_by: true,
            ..Self::new()
        }
    }

    fn push(&mut self, scope: Option<ScopeId>, dialog: bool, rect: Rect) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).expect("node count fits in u32"));
        self.nodes.push(TestNode {
            scope,
            dialog,
            open: None,
            attributes: BTreeMap::new(),
            rect,
            shadow_root: None,
        });
        id
    }

    fn node(&self, id: NodeId) -> &TestNode {
        &self.nodes[id.0 as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut TestNode {
        &mut self.nodes[id.0 as usize]
    }

    /// A non-dialog element in the document, usable as an event target.
    pub(crate) fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn element(&mut self) -> NodeId {
        self.push(Some(DOCUMENT), false, Rect::ZERO)
    }

    pub(crate) fn element_in(&mut self, scope: ScopeId) -> NodeId {
        self.push(Some(scope), false, Rect::ZERO)
    }

    pub(crate) fn dialog(&mut self, rect: Rect) -> NodeId {
        self.push(Some(DOCUMENT), true, rect)
    }

    pub(crate) fn dialog_in(&mut self, scope: ScopeId, rect: Rect) -> NodeId {
        self.push(Some(scope), true, rect)
    }

    pub(crate) fn detached_dialog(&mut self, rect: Rect) -> NodeId {
        self.push(None, true, rect)
    }

    /// A document dialog with `closedby` set to `mode`; empty leaves it unset.
    pub(crate) fn dialog_with_mode(&mut self, rect: Rect, mode: &str) -> NodeId {
        let id = self.dialog(rect);
        if !mode.is_empty() {
            self.set_attribute(id, CLOSEDBY_ATTRIBUTE, mode);
        }
        id
    }

    pub(crate) fn is_open(&self, id: NodeId) -> bool {
        self.node(id).open.is_some()
    }

    /// Dialogs whose native close actually closed them, in order.
    pub(crate) fn close_log(&self) -> &[NodeId] {
        &self.close_log
    }

    /// Make the native close of `id` fail until [`TestHost::allow_close`].
    pub(crate) fn refuse_close(&mut self, id: NodeId) {
        self.refused_closes.push(id);
    }

    pub(crate) fn allow_close(&mut self, id: NodeId) {
        self.refused_closes.retain(|r| *r != id);
    }

    pub(crate) fn observed(&self) -> &[ScopeId] {
        &self.observed
    }

    pub(crate) fn observe_options(&self, scope: ScopeId) -> Option<ObserveOptions> {
        self.observe_options
            .iter()
            .find(|(s, _)| *s == scope)
            .map(|(_, o)| *o)
    }

    pub(crate) fn listeners(&self) -> &[(ScopeId, EventKinds)] {
        &self.listeners
    }

    pub(crate) fn pending_mutations(&self) -> usize {
        self.mutations.len()
    }

    pub(crate) fn take_mutations(&mut self) -> Vec<MutationRecord<NodeId>> {
        core::mem::take(&mut self.mutations)
    }

    fn record_attribute(&mut self, id: NodeId, name: &str, old_value: Option<String>) {
        let Some(scope) = self.node(id).scope else {
            return;
        };
        let Some(options) = self.observe_options(scope) else {
            return;
        };
        if !options.reports_attribute(name) {
            return;
        }
        let old_value = if options.flags.contains(ObserveFlags::ATTRIBUTE_OLD_VALUE) {
            old_value
        } else {
            None
        };
        self.mutations
            .push(MutationRecord::attribute(id, name, old_value.as_deref()));
    }
}

impl Host for TestHost {
    type Node = NodeId;
    type Scope = ScopeId;

    fn show(&mut self, dialog: NodeId) -> Result<(), HostError> {
        let node = self.node_mut(dialog);
        if !node.dialog {
            return Err(HostError::NotSupported("not a dialog"));
        }
        if node.scope.is_none() {
            return Err(HostError::NotConnected);
        }
        match node.open {
            Some(OpenState::Modal) => Err(HostError::InvalidState("dialog is open as a modal")),
            Some(OpenState::NonModal) => Ok(()),
            None => {
                node.open = Some(OpenState::NonModal);
                Ok(())
            }
        }
    }

    fn show_modal(&mut self, dialog: NodeId) -> Result<(), HostError> {
        let node = self.node_mut(dialog);
        if !node.dialog {
            return Err(HostError::NotSupported("not a dialog"));
        }
        if node.scope.is_none() {
            return Err(HostError::NotConnected);
        }
        match node.open {
            Some(OpenState::NonModal) => Err(HostError::InvalidState("dialog is already open")),
            Some(OpenState::Modal) => Ok(()),
            None => {
                node.open = Some(OpenState::Modal);
                Ok(())
            }
        }
    }

    fn close(&mut self, dialog: NodeId) -> Result<(), HostError> {
        if self.refused_closes.contains(&dialog) {
            return Err(HostError::InvalidState("close refused"));
        }
        if self.node_mut(dialog).open.take().is_some() {
            self.close_log.push(dialog);
        }
        Ok(())
    }

    fn is_modal(&self, dialog: NodeId) -> bool {
        self.node(dialog).open == Some(OpenState::Modal)
    }

    fn is_dialog(&self, node: NodeId) -> bool {
        self.node(node).dialog
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).attributes.get(name).map(String::as_str)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let old = self
            .node_mut(node)
            .attributes
            .insert(name.to_owned(), value.to_owned());
        self.record_attribute(node, name, old);
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(old) = self.node_mut(node).attributes.remove(name) {
            self.record_attribute(node, name, Some(old));
        }
    }

    fn bounding_client_rect(&self, node: NodeId) -> Rect {
        self.node(node).rect
    }

    fn owner_document(&self, node: NodeId) -> Option<ScopeId> {
        self.node(node).scope.map(|_| DOCUMENT)
    }

    fn document(&self) -> ScopeId {
        DOCUMENT
    }

    fn shadow_roots(&self) -> Vec<ScopeId> {
        self.shadow_roots.clone()
    }

    fn attach_shadow(
        &mut self,
        element: NodeId,
        _init: ShadowRootInit,
    ) -> Result<ScopeId, HostError> {
        if self.node(element).shadow_root.is_some() {
            return Err(HostError::NotSupported("element already hosts a shadow root"));
        }
        let scope = ScopeId(self.next_scope);
        self.next_scope += 1;
        self.node_mut(element).shadow_root = Some(scope);
        self.shadow_roots.push(scope);
        Ok(scope)
    }

    fn observe(&mut self, scope: ScopeId, options: &ObserveOptions) {
        if self.observe_options(scope).is_none() {
            self.observed.push(scope);
            self.observe_options.push((scope, *options));
        }
    }

    fn listen(&mut self, scope: ScopeId, events: EventKinds) {
        self.listeners.push((scope, events));
    }
}

impl FeatureProbe for TestHost {
    fn has_dialog_interface(&self) -> bool {
        true
    }

    fn dialog_has_property(&self, name: &str) -> bool {
        self.native_closed_by && name == "closedBy"
    }
}
