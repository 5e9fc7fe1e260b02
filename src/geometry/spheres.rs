//! Sphere-cluster shape representation.
//!
//! An agent's geometry is an ordered, fixed-size collection of spheres in a
//! Structure-of-Arrays layout (all centers together, all radii together).
//! The element count is fixed for the lifetime of the value; only center
//! and radius values change. A radius of zero or below marks a slot as
//! disabled — it never collides and never bounds, but it keeps its index so
//! that contact hints stay meaningful across a timestep.

use glam::Vec3;

use super::aabb::AxisAlignedBoundingBox;
use super::proximity::{ContactHint, ProximityPair};
use super::GeometryError;

/// Fallback contact axis when two sphere centers coincide.
const DEGENERATE_AXIS: Vec3 = Vec3::X;

/// Minimum center separation below which the contact axis is degenerate.
const MIN_AXIS_LENGTH: f32 = 1.0e-4;

/// A fixed-size ordered collection of spheres with an owned bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Spheres {
    /// Sphere centers [micrometers]. Length never changes.
    centers: Vec<Vec3>,
    /// Sphere radii [micrometers]. `radius <= 0` disables the slot.
    radii: Vec<f32>,
    /// Conservative outline of the enabled spheres. Not auto-synced;
    /// refreshed only by [`Spheres::set_aabb`].
    aabb: AxisAlignedBoundingBox,
}

impl Spheres {
    /// Create `count` disabled spheres at the origin.
    pub fn new(count: usize) -> Self {
        Self {
            centers: vec![Vec3::ZERO; count],
            radii: vec![0.0; count],
            aabb: AxisAlignedBoundingBox::new(),
        }
    }

    /// Create from explicit (center, radius) pairs and refresh the box.
    pub fn from_spheres(spheres: &[(Vec3, f32)]) -> Self {
        let mut s = Self {
            centers: spheres.iter().map(|(c, _)| *c).collect(),
            radii: spheres.iter().map(|(_, r)| *r).collect(),
            aabb: AxisAlignedBoundingBox::new(),
        };
        s.set_aabb();
        s
    }

    /// Number of sphere slots, enabled or not.
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// True when the collection has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Center of slot `i`.
    pub fn center(&self, i: usize) -> Vec3 {
        self.centers[i]
    }

    /// Radius of slot `i`.
    pub fn radius(&self, i: usize) -> f32 {
        self.radii[i]
    }

    /// Move the center of slot `i`. The bounding box is NOT refreshed.
    pub fn set_center(&mut self, i: usize, center: Vec3) {
        self.centers[i] = center;
    }

    /// Resize slot `i`. Setting a value `<= 0` disables the slot without
    /// shifting any other index. The bounding box is NOT refreshed.
    pub fn set_radius(&mut self, i: usize, radius: f32) {
        self.radii[i] = radius;
    }

    /// Whether slot `i` takes part in bounding and distance queries.
    pub fn is_enabled(&self, i: usize) -> bool {
        self.radii[i] > 0.0
    }

    /// Indices of the enabled slots, in array order.
    pub fn enabled_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(|&i| self.is_enabled(i))
    }

    /// The box last produced by [`Spheres::set_aabb`].
    pub fn aabb(&self) -> &AxisAlignedBoundingBox {
        &self.aabb
    }

    /// Recompute `target` as the union of every enabled sphere's axis cube
    /// (center ± radius per axis).
    ///
    /// With zero enabled spheres the target ends up as the empty sentinel
    /// box, which is valid, not an error.
    pub fn write_aabb(&self, target: &mut AxisAlignedBoundingBox) {
        target.reset();
        for i in self.enabled_indices() {
            let r = Vec3::splat(self.radii[i]);
            target.expand_to_include(self.centers[i] - r);
            target.expand_to_include(self.centers[i] + r);
        }
    }

    /// Refresh this geometry's own bounding box from current shape state.
    pub fn set_aabb(&mut self) {
        let mut aabb = self.aabb;
        self.write_aabb(&mut aabb);
        self.aabb = aabb;
    }

    /// Exact sphere-to-sphere distance query.
    ///
    /// For every enabled pair (i in `self`, j in `other`) the pair distance
    /// is center distance minus the radius sum, so a negative value means
    /// true overlap. A pair is reported iff its distance is strictly below
    /// `threshold`; callers pick the threshold (0.0 reports only real
    /// overlaps, a positive band lets force logic anticipate contact).
    ///
    /// Reported positions are the two surface points on the center line;
    /// hints carry the contributing slot index on each side.
    pub fn distances_to(&self, other: &Spheres, threshold: f32) -> Vec<ProximityPair> {
        let mut pairs = Vec::new();
        for i in self.enabled_indices() {
            for j in other.enabled_indices() {
                let delta = other.centers[j] - self.centers[i];
                let center_distance = delta.length();
                let distance = center_distance - (self.radii[i] + other.radii[j]);
                if distance >= threshold {
                    continue;
                }

                let axis = if center_distance > MIN_AXIS_LENGTH {
                    delta / center_distance
                } else {
                    DEGENERATE_AXIS
                };
                pairs.push(ProximityPair::with_hints(
                    self.centers[i] + axis * self.radii[i],
                    other.centers[j] - axis * other.radii[j],
                    distance,
                    ContactHint::Sphere(i),
                    ContactHint::Sphere(j),
                ));
            }
        }
        pairs
    }

    /// Copy every center and radius from `future`, then refresh the box.
    ///
    /// This is the promotion step of the double buffer: from an outside
    /// observer's viewpoint the whole shape changes at once. Calling it
    /// again without mutating `future` in between leaves `self` unchanged.
    pub fn promote_from(&mut self, future: &Spheres) -> Result<(), GeometryError> {
        if self.len() != future.len() {
            return Err(GeometryError::ElementCountMismatch {
                exposed: self.len(),
                future: future.len(),
            });
        }
        self.centers.copy_from_slice(&future.centers);
        self.radii.copy_from_slice(&future.radii);
        self.set_aabb();
        Ok(())
    }
}
