use serde::{Deserialize, Serialize};

/// Mechanical configuration for a deterministic simulation run.
///
/// All values are plain tunables; identical configs produce identical runs
/// regardless of how many threads the phases are spread over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Global timestep handed to phase 1 [minutes].
    pub time_step: f32,

    /// Default limiting distance beyond which agents consider no
    /// interaction possible [micrometers].
    pub ignore_distance: f32,

    /// Pair-reporting threshold for distance queries [micrometers].
    ///
    /// `0.0` reports only true overlaps (negative distances); a positive
    /// value additionally reports a separated-but-near band of that width
    /// so force logic can anticipate contact.
    pub contact_threshold: f32,

    /// Scale from penetration depth to repulsive force magnitude.
    pub repulsion_stiffness: f32,

    /// Overdamped drag coefficient: displacement = force * dt / drag.
    pub drag: f32,

    /// Population size above which lifecycle phases run in parallel.
    pub parallel_threshold: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: 0.1,          // 6-second mechanics steps
            ignore_distance: 85.0,   // beyond ~3 nucleus diameters
            contact_threshold: 0.0,  // report true overlaps only
            repulsion_stiffness: 0.2,
            drag: 1.0,
            parallel_threshold: 500,
        }
    }
}
