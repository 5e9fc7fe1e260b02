//! Cell-cycle collaboration contract.
//!
//! The mechanics core consumes an exhibited phase value per agent but never
//! drives it: phase transitions are the business of an external cell-cycle
//! model. The core only reads the value for behavior gating and debug
//! rendering.

use serde::{Deserialize, Serialize};

/// Exhibited cell-cycle phase of an agent.
///
/// Opaque to the mechanics core — no transition logic lives here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellPhase {
    /// First gap phase.
    G1,
    /// DNA synthesis.
    S,
    /// Second gap phase.
    G2,
    /// Mitosis: chromatin condensation.
    Prophase,
    /// Mitosis: chromosome alignment.
    Metaphase,
    /// Mitosis: chromatid separation.
    Anaphase,
    /// Mitosis: nuclear reassembly.
    Telophase,
    /// Cytoplasm division.
    Cytokinesis,
}

impl CellPhase {
    /// Whether the phase belongs to interphase (G1/S/G2) rather than
    /// mitosis. Debug rendering keys its color on this.
    pub const fn is_interphase(self) -> bool {
        matches!(self, CellPhase::G1 | CellPhase::S | CellPhase::G2)
    }
}

/// External cell-cycle model contract.
///
/// An implementation is polled by the driver (typically once per timestep
/// or less often) and the returned phase is pushed onto the agent via
/// [`crate::agent::NucleusAgent::set_exhibited_phase`]. The mechanics core
/// never calls back into the model.
pub trait CellCycleModel {
    /// Advance the model for `agent_id` up to simulated `time` [minutes]
    /// and report the phase the agent should exhibit.
    fn advance(&mut self, agent_id: u32, time: f32) -> CellPhase;
}
