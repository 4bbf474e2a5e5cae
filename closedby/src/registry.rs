// Copyright 2025 the closedby Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-document registries of open dialogs.
//!
//! Each document scope keeps two insertion-ordered sets covering the dialogs
//! in the document and in every shadow root inside it:
//!
//! - every open dialog, newest last, used for Escape suppression and for
//!   knowing whether a dialog is open at all;
//! - the open dialogs whose mode is [`ClosedBy::Any`], walked newest first by
//!   light dismiss.
//!
//! Sets hold each dialog at most once. A scope is dropped as soon as both of
//! its sets are empty, so nothing outlives the last close.
//!
//! ```
//! use closedby::ClosedBy;
//! use closedby::registry::Registry;
//!
//! let mut registry: Registry<u8, u32> = Registry::new();
//! registry.register(0, 10, ClosedBy::Any);
//! registry.register(0, 11, ClosedBy::None);
//! registry.register(0, 10, ClosedBy::Any);
//!
//! assert_eq!(registry.open_dialogs(&0).collect::<Vec<_>>(), [10, 11]);
//! assert_eq!(registry.light_dismiss_dialogs(&0).collect::<Vec<_>>(), [10]);
//!
//! registry.unregister(&0, 10);
//! registry.unregister(&0, 11);
//! assert!(registry.is_empty());
//! ```

use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::mode::ClosedBy;

/// Insertion-ordered set of dialogs, oldest first.
///
/// Dialog stacks are shallow, so membership is a linear scan over inline
/// storage.
#[derive(Clone, Debug)]
pub struct OpenSet<K> {
    items: SmallVec<[K; 4]>,
}

impl<K> Default for OpenSet<K> {
    fn default() -> Self {
        Self {
            items: SmallVec::new(),
        }
    }
}

impl<K: Copy + Eq> OpenSet<K> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key` unless present. Returns `true` if it was inserted.
    ///
    /// A key already present keeps its original position.
    pub fn insert(&mut self, key: K) -> bool {
        if self.contains(key) {
            return false;
        }
        self.items.push(key);
        true
    }

    /// Remove `key`, preserving the order of the rest. Returns `true` if it was present.
    pub fn remove(&mut self, key: K) -> bool {
        match self.items.iter().position(|k| *k == key) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Whether `key` is in the set.
    pub fn contains(&self, key: K) -> bool {
        self.items.contains(&key)
    }

    /// The most recently inserted key.
    pub fn newest(&self) -> Option<K> {
        self.items.last().copied()
    }

    /// Keys in insertion order, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = K> + ExactSizeIterator + '_ {
        self.items.iter().copied()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The two dialog sets of a single scope.
#[derive(Clone, Debug)]
pub struct ScopeDialogs<K> {
    open: OpenSet<K>,
    light_dismiss: OpenSet<K>,
}

impl<K> Default for ScopeDialogs<K> {
    fn default() -> Self {
        Self {
            open: OpenSet::default(),
            light_dismiss: OpenSet::default(),
        }
    }
}

impl<K: Copy + Eq> ScopeDialogs<K> {
    /// Every open dialog in this scope.
    pub fn open(&self) -> &OpenSet<K> {
        &self.open
    }

    /// Open dialogs whose mode is [`ClosedBy::Any`].
    pub fn light_dismiss(&self) -> &OpenSet<K> {
        &self.light_dismiss
    }

    fn is_empty(&self) -> bool {
        self.open.is_empty() && self.light_dismiss.is_empty()
    }
}

/// Open dialogs, keyed by scope.
#[derive(Clone, Debug)]
pub struct Registry<S, K> {
    scopes: HashMap<S, ScopeDialogs<K>>,
}

impl<S, K> Default for Registry<S, K> {
    fn default() -> Self {
        Self {
            scopes: HashMap::new(),
        }
    }
}

impl<S: Copy + Eq + Hash, K: Copy + Eq> Registry<S, K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `dialog` as open in `scope` with dismissal `mode`.
    ///
    /// The dialog joins the light-dismiss set only for [`ClosedBy::Any`]. When
    /// the dialog is already registered, its position in the open set is kept
    /// and its light-dismiss membership is brought in line with `mode`.
    pub fn register(&mut self, scope: S, dialog: K, mode: ClosedBy) {
        let entry = self.scopes.entry(scope).or_default();
        entry.open.insert(dialog);
        if mode.is_light_dismissable() {
            entry.light_dismiss.insert(dialog);
        } else {
            entry.light_dismiss.remove(dialog);
        }
    }

    /// Remove `dialog` from both sets of `scope`.
    ///
    /// Returns `true` if the dialog was registered there. Missing scopes are
    /// treated as having nothing to remove.
    pub fn unregister(&mut self, scope: &S, dialog: K) -> bool {
        let Some(entry) = self.scopes.get_mut(scope) else {
            return false;
        };
        let in_light_dismiss = entry.light_dismiss.remove(dialog);
        let in_open = entry.open.remove(dialog);
        if entry.is_empty() {
            self.scopes.remove(scope);
        }
        in_open || in_light_dismiss
    }

    /// Remove `dialog` from every scope it is registered in.
    ///
    /// Returns the number of scopes it was removed from.
    pub fn forget(&mut self, dialog: K) -> usize {
        let mut removed = 0;
        self.scopes.retain(|_, entry| {
            let a = entry.light_dismiss.remove(dialog);
            let b = entry.open.remove(dialog);
            if a || b {
                removed += 1;
            }
            !entry.is_empty()
        });
        removed
    }

    /// The dialog sets of `scope`, if any dialog is open there.
    pub fn scope(&self, scope: &S) -> Option<&ScopeDialogs<K>> {
        self.scopes.get(scope)
    }

    /// Every open dialog in `scope`, oldest first.
    pub fn open_dialogs(&self, scope: &S) -> impl DoubleEndedIterator<Item = K> + '_ {
        self.scopes
            .get(scope)
            .into_iter()
            .flat_map(|entry| entry.open.iter())
    }

    /// Light-dismissable dialogs in `scope`, oldest first.
    pub fn light_dismiss_dialogs(&self, scope: &S) -> impl DoubleEndedIterator<Item = K> + '_ {
        self.scopes
            .get(scope)
            .into_iter()
            .flat_map(|entry| entry.light_dismiss.iter())
    }

    /// The most recently opened dialog in `scope`.
    pub fn newest_open(&self, scope: &S) -> Option<K> {
        self.scopes.get(scope).and_then(|entry| entry.open.newest())
    }

    /// Whether `dialog` is registered as open in any scope.
    pub fn is_open(&self, dialog: K) -> bool {
        self.scopes.values().any(|entry| entry.open.contains(dialog))
    }

    /// Number of scopes with at least one open dialog.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Whether no dialog is open in any scope.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
