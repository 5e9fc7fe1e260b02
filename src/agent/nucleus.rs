//! Nucleus agent: a sphere-cluster cell nucleus under the five-phase
//! protocol.
//!
//! The agent owns two geometry buffers of identical shape form and element
//! count. The *exposed* buffer is what other agents' phase-3 queries see and
//! is only ever rewritten by phase 5; the *future* buffer is the private
//! working copy that phases 2 and 4 mutate. The split keeps force
//! computation independent of agent processing order: everyone's phase 3
//! observes a world where nobody has moved yet this step.

use glam::Vec3;
use log::debug;

use crate::geometry::{
    get_distance, AxisAlignedBoundingBox, Geometry, ProximityPair, Spheres,
};
use crate::simulation::config::SimulationConfig;
use crate::simulation::snapshot::NeighborSnapshot;
use crate::simulation::StepError;

use super::cell_cycle::CellPhase;
use super::forces::{Force, ForceKind};
use super::lifecycle::Agent;

/// A simulated cell nucleus.
pub struct NucleusAgent {
    id: u32,
    /// Local simulation clock [minutes].
    curr_time: f32,
    /// Clock increment per timestep [minutes].
    incr_time: f32,
    /// Exhibited cell-cycle phase, pushed in by the external model.
    phase: CellPhase,
    /// Limiting distance beyond which no interaction is considered
    /// [micrometers].
    ignore_distance: f32,
    /// Pair-reporting threshold handed to distance queries [micrometers].
    contact_threshold: f32,
    /// Scale from penetration depth to repulsive force magnitude.
    repulsion_stiffness: f32,
    /// Overdamped drag: displacement = force * dt / drag.
    drag: f32,
    /// Radius drift per minute staged as internal growth [micrometers/min].
    growth_rate: f32,

    /// Geometry other agents are allowed to query.
    exposed: Geometry,
    /// Private working geometry, same shape form and element count.
    future: Geometry,

    /// Pairs found by the most recent phase 3.
    pairs: Vec<ProximityPair>,
    /// Forces staged for the next adjust phase.
    staged: Vec<Force>,
    /// Radius increment staged by phase 1, applied by phase 2.
    staged_growth: f32,
}

impl NucleusAgent {
    /// Create an agent from its initial shape and clock.
    ///
    /// The shape is cloned into both buffers and both bounding boxes are
    /// refreshed, so the agent is immediately queryable. Mechanical
    /// tunables are copied out of `config` at construction.
    pub fn new(
        id: u32,
        shape: Spheres,
        curr_time: f32,
        incr_time: f32,
        config: &SimulationConfig,
    ) -> Self {
        let mut exposed = Geometry::Spheres(shape);
        exposed.set_aabb();
        let future = exposed.clone();

        debug!("nucleus {id} created with {} sphere slots", sphere_count(&exposed));

        Self {
            id,
            curr_time,
            incr_time,
            phase: CellPhase::G1,
            ignore_distance: config.ignore_distance,
            contact_threshold: config.contact_threshold,
            repulsion_stiffness: config.repulsion_stiffness,
            drag: config.drag,
            growth_rate: 0.0,
            exposed,
            future,
            pairs: Vec::new(),
            staged: Vec::new(),
            staged_growth: 0.0,
        }
    }

    /// Builder-style radius growth rate [micrometers/minute].
    pub fn with_growth_rate(mut self, rate: f32) -> Self {
        self.growth_rate = rate;
        self
    }

    /// Local simulation clock [minutes].
    pub fn current_time(&self) -> f32 {
        self.curr_time
    }

    /// The private working geometry (pre-promotion view, e.g. for
    /// rendering the in-progress shape).
    pub fn future_geometry(&self) -> &Geometry {
        &self.future
    }

    /// Push the externally advanced cell-cycle phase onto the agent.
    pub fn set_exhibited_phase(&mut self, phase: CellPhase) {
        self.phase = phase;
    }

    /// Stage an additional force for the next adjust phase.
    ///
    /// Hook for drivers and behavior models (locomotion, body forces); the
    /// staging buffer is drained by whichever adjust phase runs next.
    pub fn stage_force(&mut self, force: Force) {
        self.staged.push(force);
    }

    /// Drain the staging buffer into the future geometry as overdamped
    /// displacements.
    fn apply_staged_forces(&mut self) {
        let mobility = self.incr_time / self.drag;
        let Geometry::Spheres(future) = &mut self.future;
        for force in self.staged.drain(..) {
            if force.sphere < future.len() {
                let center = future.center(force.sphere);
                future.set_center(force.sphere, center + force.vec * mobility);
            }
        }
    }

    /// Replace the future buffer wholesale. Test seam for provoking
    /// malformed-geometry failures.
    #[cfg(test)]
    pub(crate) fn replace_future_geometry(&mut self, future: Geometry) {
        self.future = future;
    }
}

impl Agent for NucleusAgent {
    fn id(&self) -> u32 {
        self.id
    }

    fn exposed_geometry(&self) -> &Geometry {
        &self.exposed
    }

    fn aabb(&self) -> &AxisAlignedBoundingBox {
        self.exposed.aabb()
    }

    fn interaction_radius(&self) -> f32 {
        self.ignore_distance
    }

    fn proximity_pairs(&self) -> &[ProximityPair] {
        &self.pairs
    }

    fn exhibited_phase(&self) -> CellPhase {
        self.phase
    }

    fn advance_and_build_int_forces(&mut self, _dt: f32) -> Result<(), StepError> {
        // The agent runs on its own clock increment, not the driver's.
        self.curr_time += self.incr_time;

        // Internal state so far only stages growth pressure; drivers can
        // stage additional forces between steps via `stage_force`.
        self.staged_growth = self.growth_rate * self.incr_time;
        Ok(())
    }

    fn adjust_geometry_by_int_forces(&mut self) -> Result<(), StepError> {
        self.apply_staged_forces();

        if self.staged_growth != 0.0 {
            let growth = self.staged_growth;
            let Geometry::Spheres(future) = &mut self.future;
            for i in 0..future.len() {
                if future.is_enabled(i) {
                    future.set_radius(i, future.radius(i) + growth);
                }
            }
            self.staged_growth = 0.0;
        }
        Ok(())
    }

    fn collect_ext_forces(&mut self, snapshot: &NeighborSnapshot) -> Result<(), StepError> {
        let nearby = snapshot.nearby(self.id, self.exposed.aabb(), self.ignore_distance);
        debug!("nucleus {}: found {} nearby agents", self.id, nearby.len());

        let mut pairs = Vec::new();
        for entry in nearby {
            pairs.extend(get_distance(
                &self.exposed,
                &entry.geometry,
                self.contact_threshold,
            )?);
        }

        debug!("nucleus {}: found {} proximity pairs", self.id, pairs.len());
        self.pairs = pairs;
        Ok(())
    }

    fn adjust_geometry_by_ext_forces(&mut self) -> Result<(), StepError> {
        for pair in &self.pairs {
            if pair.distance >= 0.0 {
                continue;
            }
            // For a penetrating pair the two surface points sit past each
            // other, so (other_pos - local_pos) already points out of the
            // overlap with magnitude equal to the penetration depth.
            let push: Vec3 = pair.other_pos - pair.local_pos;
            let sphere = match pair.local_hint {
                Some(crate::geometry::ContactHint::Sphere(i)) => i,
                None => 0,
            };
            self.staged.push(Force::new(
                ForceKind::Repulsive,
                push * self.repulsion_stiffness,
                sphere,
            ));
        }
        self.apply_staged_forces();
        Ok(())
    }

    fn update_geometry(&mut self) -> Result<(), StepError> {
        self.exposed.promote_from(&self.future)?;
        Ok(())
    }

    fn discard_future_geometry(&mut self) {
        let resync = match (&mut self.future, &self.exposed) {
            (Geometry::Spheres(future), Geometry::Spheres(exposed)) => {
                future.promote_from(exposed)
            }
        };
        if let Err(err) = resync {
            // Promotion failed earlier for the same reason; the buffers
            // cannot be reconciled from here.
            log::error!("nucleus {}: cannot discard future geometry: {err}", self.id);
        }
    }
}

/// Slot count of a geometry's sphere payload.
fn sphere_count(geometry: &Geometry) -> usize {
    match geometry {
        Geometry::Spheres(s) => s.len(),
    }
}
