// Copyright 2025 the closedby Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Close watchers: cancel-gesture subscriptions owned by open dialogs.
//!
//! A dialog whose mode is `any` or `closerequest` owns exactly one watcher
//! while it is open. Watchers stack in creation order; a close request (back
//! gesture, platform cancel) reaches only the newest active watcher. A
//! disposed watcher never fires again, and disposing twice is a no-op.

use alloc::vec::Vec;

/// Identifier of a close watcher. Never reused within one [`CloseWatchers`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatcherId(u64);

/// Active close watchers, oldest first.
#[derive(Clone, Debug)]
pub struct CloseWatchers<K> {
    next: u64,
    active: Vec<(WatcherId, K)>,
}

impl<K> Default for CloseWatchers<K> {
    fn default() -> Self {
        Self {
            next: 0,
            active: Vec::new(),
        }
    }
}

impl<K: Copy + Eq> CloseWatchers<K> {
    /// Create an empty watcher stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a watcher to `owner`, or return the one it already owns.
    pub fn create(&mut self, owner: K) -> WatcherId {
        if let Some(id) = self.watcher_for(owner) {
            return id;
        }
        let id = WatcherId(self.next);
        self.next += 1;
        self.active.push((id, owner));
        id
    }

    /// The watcher owned by `owner`, if any.
    pub fn watcher_for(&self, owner: K) -> Option<WatcherId> {
        self.active
            .iter()
            .find(|(_, k)| *k == owner)
            .map(|(id, _)| *id)
    }

    /// The owner of an active watcher.
    pub fn owner_of(&self, id: WatcherId) -> Option<K> {
        self.active
            .iter()
            .find(|(w, _)| *w == id)
            .map(|(_, k)| *k)
    }

    /// Whether `id` is still active.
    pub fn is_active(&self, id: WatcherId) -> bool {
        self.owner_of(id).is_some()
    }

    /// Dispose watcher `id`. Returns its owner if it was active.
    pub fn dispose(&mut self, id: WatcherId) -> Option<K> {
        let idx = self.active.iter().position(|(w, _)| *w == id)?;
        Some(self.active.remove(idx).1)
    }

    /// Dispose the watcher owned by `owner`. Returns its id if there was one.
    pub fn dispose_for(&mut self, owner: K) -> Option<WatcherId> {
        let idx = self.active.iter().position(|(_, k)| *k == owner)?;
        Some(self.active.remove(idx).0)
    }

    /// The watcher a close request would reach: the newest active one.
    pub fn topmost(&self) -> Option<(WatcherId, K)> {
        self.active.last().copied()
    }

    /// Number of active watchers.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no watcher is active.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
