//! Barrier-phased driver for a population of agents.
//!
//! One [`SimulationEngine::step`] call advances every agent through the
//! five lifecycle phases with a hard barrier between phases: phase N+1
//! starts for nobody until phase N finished for everybody. Within a phase
//! agents are independent, so large populations are spread over rayon;
//! sequential and parallel execution produce identical results.

use log::warn;
use rayon::prelude::*;

use crate::agent::Agent;

use super::config::SimulationConfig;
use super::snapshot::NeighborSnapshot;
use super::StepError;

/// Outcome of one population step.
#[derive(Debug, Default)]
pub struct StepReport {
    /// Agents whose timestep was aborted, with the phase error that did it.
    /// Their exposed geometry is unchanged from before the step.
    pub failed: Vec<(u32, StepError)>,
}

impl StepReport {
    /// True when every agent completed all five phases.
    pub fn all_ok(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs the five-phase protocol over whole populations.
pub struct SimulationEngine {
    config: SimulationConfig,
}

impl SimulationEngine {
    /// Engine with the given mechanical configuration.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Advance the whole population by one timestep.
    ///
    /// A failing agent is dropped from the remaining phases of this step —
    /// its future-buffer mutations are discarded and its exposed geometry
    /// keeps the pre-step state — while every other agent proceeds
    /// normally.
    pub fn step<A: Agent + Send>(&self, agents: &mut [A]) -> StepReport {
        let mut failures: Vec<Option<StepError>> = Vec::new();
        failures.resize_with(agents.len(), || None);
        let dt = self.config.time_step;

        // Phase 1: advance local clocks, build internal forces.
        self.run_phase(agents, &mut failures, |agent| {
            agent.advance_and_build_int_forces(dt)
        });

        // Phase 2: internal forces move the future buffers.
        self.run_phase(agents, &mut failures, |agent| {
            agent.adjust_geometry_by_int_forces()
        });

        // Barrier: freeze every exposed geometry into one consistent view.
        let snapshot = NeighborSnapshot::build(agents.iter().map(|agent| agent as &dyn Agent));

        // Phase 3: everyone reads the same frozen world.
        self.run_phase(agents, &mut failures, |agent| {
            agent.collect_ext_forces(&snapshot)
        });

        // Phase 4: pairs become forces on the future buffers.
        self.run_phase(agents, &mut failures, |agent| {
            agent.adjust_geometry_by_ext_forces()
        });

        // Phase 5: promote future onto exposed.
        self.run_phase(agents, &mut failures, |agent| agent.update_geometry());

        let mut report = StepReport::default();
        for (agent, failure) in agents.iter_mut().zip(failures.into_iter()) {
            if let Some(error) = failure {
                agent.discard_future_geometry();
                warn!("agent {} aborted its timestep: {error}", agent.id());
                report.failed.push((agent.id(), error));
            }
        }
        report
    }

    /// Run one phase over all not-yet-failed agents, in parallel above the
    /// configured population threshold.
    fn run_phase<A, F>(&self, agents: &mut [A], failures: &mut [Option<StepError>], phase: F)
    where
        A: Agent + Send,
        F: Fn(&mut A) -> Result<(), StepError> + Sync,
    {
        if agents.len() > self.config.parallel_threshold {
            agents
                .par_iter_mut()
                .zip(failures.par_iter_mut())
                .for_each(|(agent, slot)| {
                    if slot.is_none() {
                        if let Err(error) = phase(agent) {
                            *slot = Some(error);
                        }
                    }
                });
        } else {
            for (agent, slot) in agents.iter_mut().zip(failures.iter_mut()) {
                if slot.is_none() {
                    if let Err(error) = phase(agent) {
                        *slot = Some(error);
                    }
                }
            }
        }
    }
}
