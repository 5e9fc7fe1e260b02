//! The five-phase per-timestep agent protocol.
//!
//! Every simulated agent advances through the same five phases each
//! timestep, with the driver holding a barrier between phases: no agent
//! enters phase N+1 until every agent finished phase N. Within a phase the
//! processing order of agents is irrelevant and must not affect results —
//! phases 1, 2, 4 and 5 touch only the agent's own state, and phase 3 reads
//! the world exclusively through a per-step [`NeighborSnapshot`].

use crate::geometry::{AxisAlignedBoundingBox, Geometry, ProximityPair};
use crate::simulation::snapshot::NeighborSnapshot;
use crate::simulation::StepError;

use super::cell_cycle::CellPhase;

/// One simulated agent under the barrier-phased update protocol.
///
/// The read accessors expose exactly what external collaborators need: the
/// scheduler reads `id`/`aabb`/`interaction_radius` to build its snapshot,
/// rendering reads geometry and proximity pairs, behavior gating reads the
/// exhibited phase.
pub trait Agent {
    /// Stable identity of this agent.
    fn id(&self) -> u32;

    /// The geometry other agents' queries are allowed to see.
    ///
    /// Never mutated between two phase-5 promotions.
    fn exposed_geometry(&self) -> &Geometry;

    /// Bounding box of the exposed geometry.
    fn aabb(&self) -> &AxisAlignedBoundingBox;

    /// Distance beyond which this agent ignores all interaction
    /// [micrometers].
    fn interaction_radius(&self) -> f32;

    /// Proximity pairs found in the most recent phase 3.
    fn proximity_pairs(&self) -> &[ProximityPair];

    /// Exhibited cell-cycle phase (externally advanced, read-only here).
    fn exhibited_phase(&self) -> CellPhase;

    /// Phase 1: advance the local clock and stage internal forces.
    ///
    /// Must not read or write any other agent's state. `dt` is the driver's
    /// global step width; agents with their own increment may advance by
    /// that instead.
    fn advance_and_build_int_forces(&mut self, dt: f32) -> Result<(), StepError>;

    /// Phase 2: apply the staged internal forces to the *future* geometry.
    fn adjust_geometry_by_int_forces(&mut self) -> Result<(), StepError>;

    /// Phase 3: query the snapshot for nearby agents, run exact distance
    /// queries against their exposed geometries, and REPLACE the stored
    /// proximity-pair set.
    ///
    /// Reads exposed geometries only (its own and the snapshot's); the only
    /// write is the agent's own pair set.
    fn collect_ext_forces(&mut self, snapshot: &NeighborSnapshot) -> Result<(), StepError>;

    /// Phase 4: convert the collected pairs into forces and apply them to
    /// the *future* geometry.
    fn adjust_geometry_by_ext_forces(&mut self) -> Result<(), StepError>;

    /// Phase 5: promote the future geometry onto the exposed geometry and
    /// refresh the exposed bounding box.
    ///
    /// Atomic from an external observer's viewpoint (observers only look
    /// between phases). Idempotent when no mutation happened in between.
    fn update_geometry(&mut self) -> Result<(), StepError>;

    /// Throw away this step's future-buffer mutations after a failed phase,
    /// re-syncing the future buffer from the (untouched) exposed one.
    fn discard_future_geometry(&mut self);
}
