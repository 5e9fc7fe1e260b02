//! Agent layer: the five-phase lifecycle and the nucleus agent.

pub mod cell_cycle;
pub mod forces;
pub mod lifecycle;
pub mod nucleus;

pub use cell_cycle::{CellCycleModel, CellPhase};
pub use forces::{Force, ForceKind};
pub use lifecycle::Agent;
pub use nucleus::NucleusAgent;
