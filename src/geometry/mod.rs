//! Geometry layer: shapes, bounding boxes and proximity queries.
//!
//! Agents never learn each other's concrete shape representation; they talk
//! through [`get_distance`], which dispatches on the ordered pair of shape
//! tags and reports [`ProximityPair`]s. The [`AxisAlignedBoundingBox`] is
//! the broad-phase filter in front of those exact queries.

pub mod aabb;
pub mod dispatch;
pub mod proximity;
pub mod spheres;

pub use aabb::AxisAlignedBoundingBox;
pub use dispatch::{get_distance, Geometry, ShapeForm};
pub use proximity::{ContactHint, ProximityPair};
pub use spheres::Spheres;

use thiserror::Error;

/// Errors from geometry queries and buffer promotion.
///
/// Both variants are fatal to the querying agent's timestep; degenerate
/// geometry (zero enabled spheres, empty boxes) is explicitly *not* an
/// error and yields empty results instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The two buffers of a double-buffered geometry (or two interacting
    /// representations that must match) hold different element counts.
    #[error("geometry element count mismatch: exposed holds {exposed} spheres, future holds {future}")]
    ElementCountMismatch {
        /// Element count of the exposed buffer.
        exposed: usize,
        /// Element count of the future buffer.
        future: usize,
    },

    /// The dispatch table has no distance algorithm for this ordered pair
    /// of shape forms.
    #[error("no distance algorithm for shape pair {local:?} vs {other:?}")]
    UnsupportedShapePair {
        /// Shape form of the querying geometry.
        local: ShapeForm,
        /// Shape form of the queried geometry.
        other: ShapeForm,
    },
}
