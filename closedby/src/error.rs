// Copyright 2025 the closedby Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by host operations.

use alloc::string::String;

/// Failure of a native host operation.
///
/// Only operations the host itself can refuse return this: opening, closing
/// and shadow attachment. Dismissal logic never fails; it does nothing when
/// there is nothing to do.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The node is in a state that does not allow the operation, e.g.
    /// `show_modal` on a dialog already open non-modally.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
    /// The node is not connected to a document.
    #[error("node is not connected to a document")]
    NotConnected,
    /// The host does not support the operation on this node.
    #[error("not supported: {0}")]
    NotSupported(&'static str),
    /// Any other host-specific failure.
    #[error("{0}")]
    Other(String),
}
