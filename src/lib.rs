//! # nucleosim: Mechanics Core for Sphere-Based Cell Simulation
//!
//! nucleosim simulates the mechanical behavior of biological cells (nuclei)
//! as geometric agents that move, grow and interact through proximity-based
//! forces within a time-stepped simulation.
//!
//! ## Architecture Overview
//!
//! The crate is organized into three subsystems plus one external port:
//!
//! ### 1. Geometry ([`geometry`])
//!
//! Shape-polymorphic distance and collision queries:
//! - [`geometry::Spheres`] - fixed-size sphere clusters in SoA layout
//! - [`geometry::AxisAlignedBoundingBox`] - the broad-phase overlap filter
//! - [`geometry::ProximityPair`] - signed-distance point pairs with element hints
//! - [`geometry::get_distance`] - pairwise dispatch over shape tags
//!
//! **Key Design**: collision algorithms are pairwise, so dispatch is keyed
//! by the ordered pair of shape tags rather than a single receiver.
//!
//! ### 2. Agents ([`agent`])
//!
//! The five-phase per-timestep protocol:
//! - [`agent::Agent`] - the lifecycle trait every simulated agent implements
//! - [`agent::NucleusAgent`] - double-buffered sphere-cluster nucleus
//! - [`agent::CellPhase`] / [`agent::CellCycleModel`] - the externally-driven
//!   cell-cycle contract, consumed read-only here
//!
//! **Key Design**: each agent owns a *current/exposed* geometry (what
//! others query) and a *future/working* geometry (what its own phases
//! mutate); promotion happens only in phase 5, so force computation is
//! independent of agent processing order.
//!
//! ### 3. Simulation ([`simulation`])
//!
//! Population-level stepping:
//! - [`simulation::SimulationEngine`] - barrier-ordered phase driver (rayon
//!   above a population threshold)
//! - [`simulation::NeighborSnapshot`] - per-step frozen view of all exposed
//!   geometries, with a uniform-grid broad phase
//! - [`simulation::SimulationConfig`] - serde-backed mechanical tunables
//!
//! ### 4. Render Port ([`render`])
//!
//! A [`render::DisplayUnit`] sink trait; visualization itself lives outside
//! this crate.
//!
//! ## Stepping Model
//!
//! ```text
//! phase 1: advance clock, stage internal forces      (own state only)
//! phase 2: apply internal forces to future geometry  (own state only)
//!          --- snapshot barrier: freeze all exposed geometries ---
//! phase 3: query snapshot, collect proximity pairs   (read-only world)
//! phase 4: apply external forces to future geometry  (own state only)
//! phase 5: promote future -> exposed, refresh AABB
//! ```
//!
//! Within a phase agents may run in any order or on any thread; the
//! barriers plus the double buffer make results order-independent. A
//! failing agent aborts only its own timestep: its exposed geometry keeps
//! the pre-step state and everyone else proceeds.
//!
//! ## Dependencies
//!
//! - **Math**: `glam` (SIMD vector types)
//! - **Concurrency**: `rayon` (parallel phase execution)
//! - **Errors**: `thiserror`; **Logging**: `log`
//! - **Serialization**: `serde` (+ `ron` in tests) for configuration

pub mod agent;
pub mod geometry;
pub mod render;
pub mod simulation;
