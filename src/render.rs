//! Debug-rendering port.
//!
//! Visualization is an external collaborator: this crate only exposes a
//! sink trait plus one convenience walk over an agent's drawable state
//! (future-buffer spheres, proximity pairs, bounding box). How the sink
//! turns the primitives into pixels, meshes or log lines is its business.

use glam::Vec3;

use crate::agent::{Agent, NucleusAgent};
use crate::geometry::{AxisAlignedBoundingBox, Geometry};

/// Display color for agents in interphase.
const INTERPHASE_COLOR: u32 = 2;
/// Display color for agents in mitosis.
const MITOSIS_COLOR: u32 = 3;

/// Sink for debug primitives.
///
/// Ids are stable across frames for the same agent and element, so a sink
/// can retain and update primitives instead of redrawing from scratch.
pub trait DisplayUnit {
    /// Draw (or update) a ball primitive.
    fn draw_point(&mut self, id: u64, center: Vec3, radius: f32, color: u32);

    /// Draw (or update) a line primitive.
    fn draw_line(&mut self, id: u64, from: Vec3, to: Vec3);
}

/// Emit the twelve edges of a bounding box. Empty boxes draw nothing.
pub fn draw_aabb(du: &mut dyn DisplayUnit, base_id: u64, aabb: &AxisAlignedBoundingBox) {
    if aabb.is_empty() {
        return;
    }
    let lo = aabb.min_corner;
    let hi = aabb.max_corner;
    let corner = |x: bool, y: bool, z: bool| {
        Vec3::new(
            if x { hi.x } else { lo.x },
            if y { hi.y } else { lo.y },
            if z { hi.z } else { lo.z },
        )
    };

    let mut id = base_id;
    for &(a, b) in &[
        // bottom rectangle
        ((false, false, false), (true, false, false)),
        ((true, false, false), (true, true, false)),
        ((true, true, false), (false, true, false)),
        ((false, true, false), (false, false, false)),
        // top rectangle
        ((false, false, true), (true, false, true)),
        ((true, false, true), (true, true, true)),
        ((true, true, true), (false, true, true)),
        ((false, true, true), (false, false, true)),
        // vertical edges
        ((false, false, false), (false, false, true)),
        ((true, false, false), (true, false, true)),
        ((true, true, false), (true, true, true)),
        ((false, true, false), (false, true, true)),
    ] {
        du.draw_line(id, corner(a.0, a.1, a.2), corner(b.0, b.1, b.2));
        id += 1;
    }
}

impl NucleusAgent {
    /// Walk the agent's in-progress shape into a display sink: one ball
    /// per enabled future sphere (color keyed on the exhibited phase), one
    /// line per proximity pair, and the future bounding box.
    pub fn draw_debug(&self, du: &mut dyn DisplayUnit) {
        let color = if self.exhibited_phase().is_interphase() {
            INTERPHASE_COLOR
        } else {
            MITOSIS_COLOR
        };

        // Per-agent id spaces: spheres above bit 17, pairs get the debug
        // bit, the box sits in its own low block.
        let mut sphere_id = u64::from(self.id()) << 17;
        let Geometry::Spheres(future) = self.future_geometry();
        for i in future.enabled_indices() {
            du.draw_point(sphere_id, future.center(i), future.radius(i), color);
            sphere_id += 1;
        }

        let mut pair_id = (u64::from(self.id()) << 17) | (1 << 16);
        for pair in self.proximity_pairs() {
            du.draw_line(pair_id, pair.local_pos, pair.other_pos);
            pair_id += 1;
        }

        draw_aabb(du, u64::from(self.id()) << 4, future.aabb());
    }
}
