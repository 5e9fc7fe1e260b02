//! Axis-aligned bounding boxes for broad-phase overlap filtering.
//!
//! Every geometry owns one box as a cheap, conservative outline of where the
//! agent lives in the scene. The box is never assumed to be tight and is
//! never kept in sync automatically — shape code recomputes it explicitly
//! after mutations that should become visible to broad-phase queries.

use glam::Vec3;

/// Corner sentinel written by [`AxisAlignedBoundingBox::reset`].
///
/// Large enough that any real point collapses the box onto itself on the
/// first `expand_to_include` call. Units are micrometers, so simulation
/// coordinates never come anywhere near this magnitude.
const RESET_SENTINEL: f32 = 1.0e9;

/// An x,y,z-axis aligned 3D bounding box.
///
/// A freshly constructed (or reset) box is *empty*: its min corner sits
/// above its max corner on every axis, so expanding it with the first point
/// establishes true bounds without special-casing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAlignedBoundingBox {
    /// "Bottom-left" corner of the volumetric diagonal [micrometers].
    pub min_corner: Vec3,
    /// "Upper-right" corner of the volumetric diagonal [micrometers].
    pub max_corner: Vec3,
}

impl AxisAlignedBoundingBox {
    /// Construct an empty box, ready to be filled.
    pub fn new() -> Self {
        Self {
            min_corner: Vec3::splat(RESET_SENTINEL),
            max_corner: Vec3::splat(-RESET_SENTINEL),
        }
    }

    /// Make the box empty again (min > max on every axis).
    pub fn reset(&mut self) {
        self.min_corner = Vec3::splat(RESET_SENTINEL);
        self.max_corner = Vec3::splat(-RESET_SENTINEL);
    }

    /// True while the box holds the reset sentinel (covers nothing).
    pub fn is_empty(&self) -> bool {
        self.min_corner.x > self.max_corner.x
            || self.min_corner.y > self.max_corner.y
            || self.min_corner.z > self.max_corner.z
    }

    /// Grow the box to contain `point`.
    pub fn expand_to_include(&mut self, point: Vec3) {
        self.min_corner = self.min_corner.min(point);
        self.max_corner = self.max_corner.max(point);
    }

    /// Grow the box to contain all of `other`. Empty boxes contribute nothing.
    pub fn union(&mut self, other: &Self) {
        if !other.is_empty() {
            self.expand_to_include(other.min_corner);
            self.expand_to_include(other.max_corner);
        }
    }

    /// Componentwise interval-overlap test with `self` inflated by `margin`
    /// on every axis.
    ///
    /// This is the whole broad-phase: an O(1) conservative reject before any
    /// exact geometry query. Empty boxes overlap nothing, whatever the
    /// margin.
    pub fn overlaps(&self, other: &Self, margin: f32) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min_corner.x - margin <= other.max_corner.x
            && self.max_corner.x + margin >= other.min_corner.x
            && self.min_corner.y - margin <= other.max_corner.y
            && self.max_corner.y + margin >= other.min_corner.y
            && self.min_corner.z - margin <= other.max_corner.z
            && self.max_corner.z + margin >= other.min_corner.z
    }

    /// Center of the box, or the origin for an empty box.
    pub fn centroid(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min_corner + self.max_corner) * 0.5
        }
    }

    /// Largest half-extent over the three axes, zero for an empty box.
    pub fn max_half_extent(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            ((self.max_corner - self.min_corner) * 0.5).max_element()
        }
    }
}

impl Default for AxisAlignedBoundingBox {
    fn default() -> Self {
        Self::new()
    }
}
