//! Simulation layer: configuration, the per-step neighbor snapshot and the
//! barrier-phased engine.

pub mod config;
pub mod engine;
pub mod snapshot;

pub use config::SimulationConfig;
pub use engine::{SimulationEngine, StepReport};
pub use snapshot::{NeighborSnapshot, SnapshotEntry};

use thiserror::Error;

use crate::geometry::GeometryError;

/// Failure of one agent's timestep.
///
/// Errors are local to the failing agent: its exposed geometry stays at the
/// pre-step state (phase 5 never runs for it) and no other agent is
/// affected. The driver decides whether to retry, skip or abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// A geometry query or buffer promotion failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The neighbor service could not produce a consistent view for this
    /// agent's phase 3.
    #[error("neighbor snapshot unavailable for agent {agent}")]
    SnapshotUnavailable {
        /// The agent whose phase 3 was aborted.
        agent: u32,
    },
}
