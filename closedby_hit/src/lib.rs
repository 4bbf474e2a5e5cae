// Copyright 2025 the closedby Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-in-bounds tests for dialog light dismiss.
//!
//! Light dismiss asks one question per open dialog: did the pointer land
//! inside the dialog's bounding rectangle? This crate answers it in viewport
//! coordinates using [`kurbo`] types and is independent of any dialog
//! registry or host.
//!
//! # Edges
//!
//! Unlike [`Rect::contains`], which is half-open, these tests are inclusive
//! on all four edges: a press exactly on the right or bottom border of a
//! dialog counts as inside. A press on the border of a dialog should never
//! dismiss it.
//!
//! ```
//! use closedby_hit::{BoundsHitTest, HitParams};
//! use kurbo::{Point, Rect};
//!
//! let bounds = Rect::new(10.0, 10.0, 110.0, 60.0);
//! let params = HitParams::default();
//!
//! assert!(bounds.hit_test_bounds(Point::new(110.0, 60.0), &params).is_some());
//! assert!(bounds.hit_test_bounds(Point::new(110.5, 60.0), &params).is_none());
//! ```
//!
//! # Tolerance
//!
//! [`HitParams::tolerance`] inflates the bounds on every side. Hits inside
//! the original bounds score a distance of zero; hits that only land in the
//! inflated margin report their distance to the original bounds.

#![no_std]

use kurbo::{Point, Rect, RoundedRect, Shape};

/// Parameters controlling bounds hit tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitParams {
    /// Extra margin, in viewport units, treated as part of the bounds.
    ///
    /// Negative values are clamped to zero.
    pub tolerance: f64,
}

impl Default for HitParams {
    fn default() -> Self {
        Self { tolerance: 0.0 }
    }
}

impl HitParams {
    /// Parameters with the given tolerance.
    pub const fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    fn margin(&self) -> f64 {
        if self.tolerance > 0.0 {
            self.tolerance
        } else {
            0.0
        }
    }
}

/// Score returned from a bounds hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitScore {
    /// Distance from the pointer to the original (uninflated) bounds.
    ///
    /// Zero for any point inside or on the edge of the bounds.
    pub distance: f64,
}

impl HitScore {
    /// A hit inside the bounds.
    pub const fn inside() -> Self {
        Self { distance: 0.0 }
    }

    /// Whether the pointer was within the original bounds.
    pub fn is_inside(&self) -> bool {
        self.distance == 0.0
    }
}

/// Shapes that can answer "is this viewport point within my bounds?".
pub trait BoundsHitTest {
    /// Test `pt` against the shape's bounds, edges inclusive.
    ///
    /// Returns `Some(HitScore)` when the point is a hit.
    fn hit_test_bounds(&self, pt: Point, params: &HitParams) -> Option<HitScore>;
}

impl BoundsHitTest for Rect {
    fn hit_test_bounds(&self, pt: Point, params: &HitParams) -> Option<HitScore> {
        // Hosts may hand out rects with negative width or height.
        let rect = self.abs();
        let margin = params.margin();
        let within = rect.x0 - margin <= pt.x
            && pt.x <= rect.x1 + margin
            && rect.y0 - margin <= pt.y
            && pt.y <= rect.y1 + margin;
        if !within {
            return None;
        }
        let nearest = Point::new(pt.x.clamp(rect.x0, rect.x1), pt.y.clamp(rect.y0, rect.y1));
        if nearest == pt {
            return Some(HitScore::inside());
        }
        let distance = pt.distance(nearest);
        if distance > margin {
            // Corner of the inflated square, outside the rounded margin.
            return None;
        }
        Some(HitScore { distance })
    }
}

/// Rounded dialogs are tested against their bounding box.
///
/// Dialog bounds come from layout as rectangles; corner radii are a paint
/// detail and a press on a transparent corner still lands on the dialog.
impl BoundsHitTest for RoundedRect {
    fn hit_test_bounds(&self, pt: Point, params: &HitParams) -> Option<HitScore> {
        self.bounding_box().hit_test_bounds(pt, params)
    }
}

/// Convenience wrapper returning only whether `pt` hits `bounds`.
pub fn contains_point(bounds: &impl BoundsHitTest, pt: Point, params: &HitParams) -> bool {
    bounds.hit_test_bounds(pt, params).is_some()
}
