// Copyright 2025 the closedby Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Light dismiss, Escape suppression and mode changes against a toy page.
//!
//! This example shows how a host wires itself to the emulator:
//! - dialogs are opened and closed through the `Emulator`,
//! - pointer and key presses are forwarded with their composed path,
//! - mutation records from observed scopes are flushed after each step.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p closedby_demos --example light_dismiss`

use std::collections::HashMap;

use closedby::{
    Emulator, EventKinds, FeatureProbe, Host, HostError, KeyDown, MutationRecord, ObserveOptions,
    PointerDown, ShadowRootInit,
};
use kurbo::{Point, Rect};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct Node(u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct Scope(u32);

const DOCUMENT: Scope = Scope(0);

#[derive(Debug)]
struct Element {
    name: &'static str,
    scope: Scope,
    dialog: bool,
    open: Option<bool>,
    attributes: HashMap<String, String>,
    rect: Rect,
}

/// A flat page: every element lives directly in a scope.
#[derive(Debug, Default)]
struct Page {
    elements: Vec<Element>,
    scopes: u32,
    observed: HashMap<Scope, ObserveOptions>,
    pending: Vec<MutationRecord<Node>>,
}

impl Page {
    fn add(&mut self, name: &'static str, scope: Scope, dialog: bool, rect: Rect) -> Node {
        self.elements.push(Element {
            name,
            scope,
            dialog,
            open: None,
            attributes: HashMap::new(),
            rect,
        });
        Node(u32::try_from(self.elements.len() - 1).expect("node count fits in u32"))
    }

    fn get(&self, node: Node) -> &Element {
        &self.elements[node.0 as usize]
    }

    fn get_mut(&mut self, node: Node) -> &mut Element {
        &mut self.elements[node.0 as usize]
    }

    fn open_names(&self) -> Vec<&'static str> {
        self.elements
            .iter()
            .filter(|e| e.open.is_some())
            .map(|e| e.name)
            .collect()
    }

    fn queue(&mut self, node: Node, name: &str, old: Option<String>) {
        let scope = self.get(node).scope;
        if self
            .observed
            .get(&scope)
            .is_some_and(|o| o.reports_attribute(name))
        {
            self.pending
                .push(MutationRecord::attribute(node, name, old.as_deref()));
        }
    }
}

impl Host for Page {
    type Node = Node;
    type Scope = Scope;

    fn show(&mut self, dialog: Node) -> Result<(), HostError> {
        let element = self.get_mut(dialog);
        match element.open {
            Some(true) => Err(HostError::InvalidState("dialog is open as a modal")),
            Some(false) => Ok(()),
            None => {
                element.open = Some(false);
                Ok(())
            }
        }
    }

    fn show_modal(&mut self, dialog: Node) -> Result<(), HostError> {
        let element = self.get_mut(dialog);
        match element.open {
            Some(false) => Err(HostError::InvalidState("dialog is already open")),
            Some(true) => Ok(()),
            None => {
                element.open = Some(true);
                Ok(())
            }
        }
    }

    fn close(&mut self, dialog: Node) -> Result<(), HostError> {
        self.get_mut(dialog).open = None;
        Ok(())
    }

    fn is_modal(&self, dialog: Node) -> bool {
        self.get(dialog).open == Some(true)
    }

    fn is_dialog(&self, node: Node) -> bool {
        self.get(node).dialog
    }

    fn attribute(&self, node: Node, name: &str) -> Option<&str> {
        self.get(node).attributes.get(name).map(String::as_str)
    }

    fn set_attribute(&mut self, node: Node, name: &str, value: &str) {
        let old = self
            .get_mut(node)
            .attributes
            .insert(name.to_owned(), value.to_owned());
        self.queue(node, name, old);
    }

    fn remove_attribute(&mut self, node: Node, name: &str) {
        if let Some(old) = self.get_mut(node).attributes.remove(name) {
            self.queue(node, name, Some(old));
        }
    }

    fn bounding_client_rect(&self, node: Node) -> Rect {
        self.get(node).rect
    }

    fn owner_document(&self, _node: Node) -> Option<Scope> {
        Some(DOCUMENT)
    }

    fn document(&self) -> Scope {
        DOCUMENT
    }

    fn shadow_roots(&self) -> Vec<Scope> {
        (1..=self.scopes).map(Scope).collect()
    }

    fn attach_shadow(&mut self, _element: Node, _init: ShadowRootInit) -> Result<Scope, HostError> {
        self.scopes += 1;
        Ok(Scope(self.scopes))
    }

    fn observe(&mut self, scope: Scope, options: &ObserveOptions) {
        self.observed.insert(scope, *options);
    }

    fn listen(&mut self, scope: Scope, events: EventKinds) {
        log::info!("listening for {events:?} on {scope:?}");
    }
}

impl FeatureProbe for Page {
    fn has_dialog_interface(&self) -> bool {
        true
    }

    fn dialog_has_property(&self, _name: &str) -> bool {
        false
    }
}

fn flush(emulator: &mut Emulator<Page>) {
    let records = std::mem::take(&mut emulator.host_mut().pending);
    let closed = emulator.on_mutations(&records);
    if !closed.is_empty() {
        println!("  mode change closed {closed:?}");
    }
}

fn main() -> Result<(), HostError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut emulator = Emulator::new(Page::default());
    if !emulator.install_unless_supported() {
        println!("host supports closedby natively");
        return Ok(());
    }

    let page = emulator.host_mut();
    let body = page.add("body", DOCUMENT, false, Rect::new(0.0, 0.0, 800.0, 600.0));
    let settings = page.add("settings", DOCUMENT, true, Rect::new(20.0, 20.0, 320.0, 420.0));
    let picker = page.add("picker", DOCUMENT, true, Rect::new(360.0, 20.0, 560.0, 220.0));
    let confirm = page.add("confirm", DOCUMENT, true, Rect::new(300.0, 250.0, 500.0, 350.0));

    emulator.set_closed_by(settings, "any");
    emulator.set_closed_by(picker, "any");
    emulator.set_closed_by(confirm, "none");
    flush(&mut emulator);

    emulator.show(settings)?;
    emulator.show(picker)?;
    println!("open: {:?}", emulator.host().open_names());

    println!("\n== Press inside settings ==");
    let closed =
        emulator.on_pointer_down(&PointerDown::trusted(Point::new(100.0, 100.0), &[body]));
    println!("  closed {closed:?}; open: {:?}", emulator.host().open_names());

    println!("\n== Script-generated press outside everything ==");
    let closed =
        emulator.on_pointer_down(&PointerDown::untrusted(Point::new(700.0, 500.0), &[body]));
    println!("  closed {closed:?}; open: {:?}", emulator.host().open_names());

    println!("\n== Inescapable confirmation ==");
    emulator.show_modal(confirm)?;
    let path = [confirm];
    let mut escape = KeyDown::trusted("Escape", &path);
    emulator.on_key_down(&mut escape);
    println!("  Escape default prevented: {}", escape.default_prevented);

    println!("\n== Relaxing the confirmation while open ==");
    emulator.set_closed_by(confirm, "closerequest");
    flush(&mut emulator);
    println!("  open: {:?}", emulator.host().open_names());

    println!("\n== Back gesture ==");
    emulator.show(picker)?;
    let reached = emulator.request_close();
    println!("  close request reached {reached:?}; open: {:?}", emulator.host().open_names());

    println!("\n== Press outside everything ==");
    let closed =
        emulator.on_pointer_down(&PointerDown::trusted(Point::new(700.0, 500.0), &[body]));
    println!("  closed {closed:?}; open: {:?}", emulator.host().open_names());

    Ok(())
}
