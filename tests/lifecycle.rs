//! Population-level behavior of the five-phase lifecycle.

use approx::assert_relative_eq;
use glam::Vec3;

use nucleosim::agent::{Agent, CellCycleModel, CellPhase, NucleusAgent};
use nucleosim::geometry::{ContactHint, Spheres};
use nucleosim::simulation::{NeighborSnapshot, SimulationConfig, SimulationEngine};

fn nucleus(config: &SimulationConfig, id: u32, center: Vec3, radius: f32) -> NucleusAgent {
    NucleusAgent::new(
        id,
        Spheres::from_spheres(&[(center, radius)]),
        0.0,
        0.1,
        config,
    )
}

fn snapshot_of(agents: &[NucleusAgent]) -> NeighborSnapshot {
    NeighborSnapshot::build(agents.iter().map(|a| a as &dyn Agent))
}

fn exposed(agent: &NucleusAgent) -> &Spheres {
    agent
        .exposed_geometry()
        .as_spheres()
        .expect("nucleus agents carry sphere geometry")
}

#[test]
fn overlapping_nuclei_report_distance_minus_two() {
    let config = SimulationConfig::default();
    let mut agents = vec![
        nucleus(&config, 1, Vec3::ZERO, 5.0),
        nucleus(&config, 2, Vec3::new(8.0, 0.0, 0.0), 5.0),
    ];

    let snapshot = snapshot_of(&agents);
    agents[0].collect_ext_forces(&snapshot).unwrap();

    let pairs = agents[0].proximity_pairs();
    assert_eq!(pairs.len(), 1);
    assert_relative_eq!(pairs[0].distance, -2.0);
}

#[test]
fn moving_the_neighbor_out_to_gap_twelve_empties_the_result() {
    let config = SimulationConfig::default();
    assert_eq!(config.contact_threshold, 0.0);

    let mut agents = vec![
        nucleus(&config, 1, Vec3::ZERO, 5.0),
        nucleus(&config, 2, Vec3::new(12.0, 0.0, 0.0), 5.0),
    ];

    let snapshot = snapshot_of(&agents);
    agents[0].collect_ext_forces(&snapshot).unwrap();
    // Geometric distance is +2, above the zero threshold: no pairs.
    assert!(agents[0].proximity_pairs().is_empty());

    // With a wider reporting band the same layout yields distance +2.
    let mut band_config = SimulationConfig::default();
    band_config.contact_threshold = 3.0;
    let mut banded = vec![
        nucleus(&band_config, 1, Vec3::ZERO, 5.0),
        nucleus(&band_config, 2, Vec3::new(12.0, 0.0, 0.0), 5.0),
    ];
    let snapshot = snapshot_of(&banded);
    banded[0].collect_ext_forces(&snapshot).unwrap();
    let pairs = banded[0].proximity_pairs();
    assert_eq!(pairs.len(), 1);
    assert_relative_eq!(pairs[0].distance, 2.0);
}

#[test]
fn all_disabled_agent_has_sentinel_box_and_no_pairs() {
    let config = SimulationConfig::default();
    let mut silent_shape = Spheres::new(3);
    silent_shape.set_aabb();
    let mut agents = vec![
        NucleusAgent::new(1, silent_shape, 0.0, 0.1, &config),
        nucleus(&config, 2, Vec3::ZERO, 5.0),
    ];

    assert!(agents[0].aabb().is_empty());

    let snapshot = snapshot_of(&agents);
    agents[0].collect_ext_forces(&snapshot).unwrap();
    assert!(agents[0].proximity_pairs().is_empty());

    // And nobody finds the silent agent either.
    agents[1].collect_ext_forces(&snapshot).unwrap();
    assert!(agents[1].proximity_pairs().is_empty());
}

#[test]
fn phase_three_results_are_independent_of_agent_order() {
    let config = SimulationConfig::default();
    // A chain of nuclei with alternating overlap.
    let mut agents: Vec<NucleusAgent> = (0..12)
        .map(|i| nucleus(&config, i as u32, Vec3::new(i as f32 * 7.0, 0.0, 0.0), 4.0))
        .collect();

    let snapshot = snapshot_of(&agents);

    // Forward order.
    for agent in agents.iter_mut() {
        agent.collect_ext_forces(&snapshot).unwrap();
    }
    let forward: Vec<_> = agents
        .iter()
        .map(|a| a.proximity_pairs().to_vec())
        .collect();

    // Reverse order against the same snapshot.
    for agent in agents.iter_mut().rev() {
        agent.collect_ext_forces(&snapshot).unwrap();
    }
    let reverse: Vec<_> = agents
        .iter()
        .map(|a| a.proximity_pairs().to_vec())
        .collect();

    assert_eq!(forward, reverse);
}

#[test]
fn repeated_stepping_resolves_a_cluster() {
    let config = SimulationConfig::default();
    let engine = SimulationEngine::new(config.clone());
    // Three mutually overlapping nuclei.
    let mut agents = vec![
        nucleus(&config, 1, Vec3::new(0.0, 0.0, 0.0), 5.0),
        nucleus(&config, 2, Vec3::new(7.0, 0.0, 0.0), 5.0),
        nucleus(&config, 3, Vec3::new(3.5, 6.0, 0.0), 5.0),
    ];

    let initial_overlap: f32 = pairwise_overlap(&agents);
    for _ in 0..50 {
        assert!(engine.step(&mut agents).all_ok());
    }
    let final_overlap = pairwise_overlap(&agents);

    assert!(
        final_overlap < initial_overlap * 0.2,
        "overlap did not relax: {initial_overlap} -> {final_overlap}"
    );
}

fn pairwise_overlap(agents: &[NucleusAgent]) -> f32 {
    let mut total = 0.0;
    for (i, a) in agents.iter().enumerate() {
        for b in agents.iter().skip(i + 1) {
            let (a, b) = (exposed(a), exposed(b));
            let gap = (a.center(0) - b.center(0)).length() - a.radius(0) - b.radius(0);
            if gap < 0.0 {
                total -= gap;
            }
        }
    }
    total
}

#[test]
fn growth_is_visible_to_neighbors_only_after_promotion() {
    let config = SimulationConfig::default();
    let engine = SimulationEngine::new(config.clone());
    let mut agents = vec![
        nucleus(&config, 1, Vec3::ZERO, 5.0).with_growth_rate(2.0),
        nucleus(&config, 2, Vec3::new(20.0, 0.0, 0.0), 5.0),
    ];

    assert!(engine.step(&mut agents).all_ok());
    // growth 2.0 µm/min over a 0.1 min increment
    assert_relative_eq!(exposed(&agents[0]).radius(0), 5.2, epsilon = 1.0e-5);
}

#[test]
fn proximity_hints_identify_the_contributing_spheres() {
    let config = SimulationConfig::default();
    let twin = Spheres::from_spheres(&[
        (Vec3::ZERO, 3.0),
        (Vec3::new(5.0, 0.0, 0.0), 3.0),
    ]);
    let mut agents = vec![
        NucleusAgent::new(1, twin, 0.0, 0.1, &config),
        nucleus(&config, 2, Vec3::new(9.0, 0.0, 0.0), 3.0),
    ];

    let snapshot = snapshot_of(&agents);
    agents[0].collect_ext_forces(&snapshot).unwrap();

    let pairs = agents[0].proximity_pairs();
    // Only the second slot of the twin reaches the neighbor.
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].local_hint, Some(ContactHint::Sphere(1)));
    assert_eq!(pairs[0].other_hint, Some(ContactHint::Sphere(0)));
}

#[test]
fn exhibited_phase_is_consumed_but_never_driven_by_the_core() {
    struct EveryStepMitosis;
    impl CellCycleModel for EveryStepMitosis {
        fn advance(&mut self, _agent_id: u32, _time: f32) -> CellPhase {
            CellPhase::Metaphase
        }
    }

    let config = SimulationConfig::default();
    let engine = SimulationEngine::new(config.clone());
    let mut agents = vec![nucleus(&config, 1, Vec3::ZERO, 5.0)];
    let mut model = EveryStepMitosis;

    assert_eq!(agents[0].exhibited_phase(), CellPhase::G1);
    assert!(engine.step(&mut agents).all_ok());
    // Stepping alone never changes the phase...
    assert_eq!(agents[0].exhibited_phase(), CellPhase::G1);

    // ...the external model does.
    let phase = model.advance(agents[0].id(), agents[0].current_time());
    agents[0].set_exhibited_phase(phase);
    assert_eq!(agents[0].exhibited_phase(), CellPhase::Metaphase);
}
