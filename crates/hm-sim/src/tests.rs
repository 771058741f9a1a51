//! Integration tests for hm-sim.

use std::collections::BTreeSet;

use hm_agent::{AgentState, AgentStore};
use hm_core::{
    AgentId, EffectKind, Phase, PlaceableId, PlaceableKind, SeedingParams, SimConfig, ToolKind, Vec2,
};

use crate::{
    CollisionReport, CollisionResolver, Command, CommandOutcome, DrawItem, FrameStats, NoopObserver, Rejected, RenderSnapshot, Sim,
    SimBuilder, SimError, SimObserver,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn quiet_config() -> SimConfig {
    SimConfig {
        seeding: SeedingParams { initial_agents: 0, ..SeedingParams::default() },
        ..SimConfig::default()
    }
}

fn store_at(points: &[(f64, f64)]) -> AgentStore {
    let mut store = AgentStore::new(42);
    for &(x, y) in points {
        store.spawn(Vec2::new(x, y), 8.0);
    }
    store
}

fn sim_with_agents(points: &[(f64, f64)]) -> Sim {
    SimBuilder::new(quiet_config()).agents(store_at(points)).build().unwrap()
}

fn hut_at(x: f64, y: f64) -> Command {
    Command::Place { tool: ToolKind::Place(PlaceableKind::Hut), position: Vec2::new(x, y) }
}

#[derive(Default)]
struct Recorder {
    frames:    u64,
    flips:     Vec<(u64, Phase)>,
    consumed:  Vec<AgentId>,
    snapshots: Vec<RenderSnapshot>,
    last:      Option<FrameStats>,
}

impl SimObserver for Recorder {
    fn on_frame_start(&mut self, _frame: u64) {
        self.frames += 1;
    }

    fn on_phase_change(&mut self, frame: u64, phase: Phase) {
        self.flips.push((frame, phase));
    }

    fn on_agents_consumed(&mut self, _frame: u64, agents: &[AgentId]) {
        self.consumed.extend_from_slice(agents);
    }

    fn on_frame_end(&mut self, stats: &FrameStats) {
        self.last = Some(*stats);
    }

    fn on_snapshot(&mut self, snapshot: &RenderSnapshot) {
        self.snapshots.push(snapshot.clone());
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn seeds_default_population_around_centre() {
        let sim = SimBuilder::new(SimConfig::default()).build().unwrap();
        let centre = Vec2::new(400.0, 300.0);
        assert_eq!(sim.world.agents().len(), 20);
        assert!(sim.world.agents().iter().all(|a| a.position.distance(centre) <= 70.0 + 1e-9));
        assert!(sim.world.agents().iter().all(|a| a.state() == AgentState::Wandering));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = SimConfig { max_dt: 0.0, ..SimConfig::default() };
        assert!(matches!(SimBuilder::new(cfg).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn overlapping_initial_placement_errors() {
        let result = SimBuilder::new(quiet_config())
            .place(PlaceableKind::Farm, Vec2::new(200.0, 200.0))
            .place(PlaceableKind::Farm, Vec2::new(210.0, 210.0))
            .build();
        match result {
            Err(SimError::InitialPlacement { kind, reason, .. }) => {
                assert_eq!(kind, PlaceableKind::Farm);
                assert_eq!(reason, Rejected::Overlaps { existing: PlaceableId(0) });
            }
            other => panic!("expected initial placement error, got {other:?}"),
        }
    }

    #[test]
    fn initial_hut_adopts_seeded_agents() {
        let sim = SimBuilder::new(SimConfig::default())
            .place(PlaceableKind::Hut, Vec2::new(100.0, 100.0))
            .build()
            .unwrap();
        let housed = sim.world.agents().iter().filter(|a| !a.is_homeless()).count();
        assert_eq!(housed, 4);
        assert!(sim.world.membership_consistent());
    }

    #[test]
    fn cycle_timer_sets_starting_phase() {
        let sim = SimBuilder::new(quiet_config()).cycle_timer(35.0).build().unwrap();
        assert_eq!(sim.world.clock().phase(), Phase::Night);
    }
}

// ── Placement & assignment ────────────────────────────────────────────────────

#[cfg(test)]
mod placement_tests {
    use super::*;

    fn ten_agents() -> Sim {
        let points: Vec<(f64, f64)> = (0..10).map(|i| (300.0 + 20.0 * i as f64, 400.0)).collect();
        sim_with_agents(&points)
    }

    #[test]
    fn hut_adopts_exactly_capacity() {
        let mut sim = ten_agents();
        let CommandOutcome::Placed(hut) = sim.apply(hut_at(100.0, 100.0)).unwrap() else {
            panic!("hut should be placed");
        };
        let homed: Vec<_> = sim.world.agents().iter().filter(|a| a.home() == Some(hut)).collect();
        assert_eq!(homed.len(), 4);
        assert_eq!(sim.world.placeables().hut(hut).unwrap().residents().len(), 4);
        assert!(sim.world.membership_consistent());
    }

    #[test]
    fn resident_choice_is_not_a_fixed_order() {
        let mut chosen = BTreeSet::new();
        for seed in 0..20 {
            let cfg = SimConfig { seed, ..quiet_config() };
            let points: Vec<(f64, f64)> = (0..10).map(|i| (300.0 + 20.0 * i as f64, 400.0)).collect();
            let mut sim = SimBuilder::new(cfg).agents(store_at(&points)).build().unwrap();
            sim.apply(hut_at(100.0, 100.0)).unwrap();
            let mut set: Vec<AgentId> = sim.world.placeables().hut(PlaceableId(0)).unwrap().residents().to_vec();
            set.sort();
            assert_eq!(set.len(), 4);
            chosen.insert(set);
        }
        assert!(chosen.len() > 1, "resident selection should vary with the seed");
    }

    #[test]
    fn later_huts_take_the_remaining_pool() {
        let mut sim = ten_agents();
        sim.apply(hut_at(100.0, 100.0)).unwrap();
        sim.apply(hut_at(200.0, 100.0)).unwrap();
        sim.apply(hut_at(300.0, 100.0)).unwrap();
        sim.apply(hut_at(400.0, 100.0)).unwrap();
        let counts: Vec<usize> = sim.world.placeables().huts().map(|(_, h)| h.residents().len()).collect();
        assert_eq!(counts, vec![4, 4, 2, 0]);
        assert!(sim.world.agents().iter().all(|a| !a.is_homeless()));
        assert!(sim.world.membership_consistent());
    }

    #[test]
    fn overlap_rejection_leaves_world_unchanged() {
        let mut sim = ten_agents();
        sim.apply(hut_at(100.0, 100.0)).unwrap();
        let before = sim.world.agents().homeless_ids();
        let result = sim.apply(hut_at(120.0, 100.0));
        assert_eq!(result, Err(Rejected::Overlaps { existing: PlaceableId(0) }));
        assert_eq!(sim.world.placeables().len(), 1);
        assert_eq!(sim.world.agents().homeless_ids(), before);
    }

    #[test]
    fn out_of_bounds_rejected() {
        let mut sim = ten_agents();
        let position = Vec2::new(900.0, 100.0);
        assert_eq!(sim.apply(hut_at(900.0, 100.0)), Err(Rejected::OutOfBounds { position }));
        assert_eq!(sim.apply(Command::AddAgent(position)), Err(Rejected::OutOfBounds { position }));
        assert!(sim.world.placeables().is_empty());
    }

    #[test]
    fn non_hut_placement_assigns_nobody() {
        let mut sim = ten_agents();
        for (kind, x) in [(PlaceableKind::Farm, 100.0), (PlaceableKind::Factory, 300.0), (PlaceableKind::Tree, 500.0)] {
            sim.apply(Command::Place { tool: kind.into(), position: Vec2::new(x, 100.0) }).unwrap();
        }
        assert_eq!(sim.world.agents().homeless_ids().len(), 10);
    }

    #[test]
    fn add_agent_checks_obstacles_and_stays_homeless() {
        let mut sim = sim_with_agents(&[]);
        sim.apply(hut_at(100.0, 100.0)).unwrap();
        assert_eq!(
            sim.apply(Command::AddAgent(Vec2::new(100.0, 100.0))),
            Err(Rejected::InsideObstacle { obstacle: PlaceableId(0) })
        );
        let outcome = sim.apply(Command::Place { tool: ToolKind::AddAgent, position: Vec2::new(300.0, 300.0) });
        assert_eq!(outcome, Ok(CommandOutcome::AgentAdded(AgentId(0))));
        assert!(sim.world.agents().get(AgentId(0)).unwrap().is_homeless());
        assert_eq!(sim.world.placeables().hut(PlaceableId(0)).unwrap().vacancies(), 4);
    }
}

// ── Collision resolution ──────────────────────────────────────────────────────

#[cfg(test)]
mod collision_tests {
    use super::*;

    fn resolve(sim: &mut Sim, passes: u32) -> CollisionReport {
        let world = &mut sim.world;
        CollisionResolver::new().resolve(&mut world.agents, &world.placeables, &world.config.collision, passes)
    }

    #[test]
    fn overlapping_pair_is_separated() {
        let mut sim = sim_with_agents(&[(400.0, 300.0), (410.0, 300.0)]);
        let report = resolve(&mut sim, 1);
        assert_eq!(report.agent_contacts, 1);
        let a = sim.world.agents().get(AgentId(0)).unwrap().position;
        let b = sim.world.agents().get(AgentId(1)).unwrap().position;
        assert!(a.distance(b) >= 16.0 - 1e-9);
    }

    #[test]
    fn coincident_pair_is_skipped() {
        let mut sim = sim_with_agents(&[(400.0, 300.0), (400.0, 300.0)]);
        let report = resolve(&mut sim, 3);
        assert_eq!(report.agent_contacts, 0);
        assert_eq!(sim.world.agents().get(AgentId(1)).unwrap().position, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn distant_cells_do_not_interact() {
        let mut sim = sim_with_agents(&[(100.0, 100.0), (140.0, 100.0), (700.0, 500.0)]);
        let report = resolve(&mut sim, 1);
        assert_eq!(report.agent_contacts, 0);
        assert_eq!(sim.world.agents().get(AgentId(0)).unwrap().position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn obstacle_pushes_out_and_damps_inward_velocity() {
        let mut sim = sim_with_agents(&[(400.0, 300.0)]);
        sim.apply(Command::Place { tool: PlaceableKind::Tree.into(), position: Vec2::new(405.0, 300.0) })
            .unwrap();
        sim.world.agents.get_mut(AgentId(0)).unwrap().velocity = Vec2::new(10.0, 0.0);

        let report = resolve(&mut sim, 1);
        assert_eq!(report.obstacle_contacts, 1);
        let a = sim.world.agents().get(AgentId(0)).unwrap();
        assert!((a.position.x - 398.5).abs() < 1e-9);
        assert!((a.velocity.x - 2.0).abs() < 1e-9);
    }

    #[test]
    fn own_hut_blocks_only_while_wandering() {
        let mut sim = sim_with_agents(&[(600.0, 160.0)]);
        sim.apply(hut_at(600.0, 150.0)).unwrap();
        assert_eq!(sim.world.agents().get(AgentId(0)).unwrap().home(), Some(PlaceableId(0)));

        let report = resolve(&mut sim, 1);
        assert_eq!(report.obstacle_contacts, 1);
        let pushed = sim.world.agents().get(AgentId(0)).unwrap().position;
        assert_ne!(pushed, Vec2::new(600.0, 160.0));

        for state in [AgentState::GoingHome { target: Vec2::new(600.0, 150.0) }, AgentState::AtHome] {
            sim.world.agents.get_mut(AgentId(0)).unwrap().set_state(state);
            let report = resolve(&mut sim, 1);
            assert_eq!(report.obstacle_contacts, 0);
            assert_eq!(sim.world.agents().get(AgentId(0)).unwrap().position, pushed);
        }
    }

    #[test]
    fn other_huts_still_block_a_homing_agent() {
        let mut sim = sim_with_agents(&[(400.0, 300.0)]);
        sim.apply(hut_at(100.0, 100.0)).unwrap();
        sim.apply(hut_at(400.0, 290.0)).unwrap();
        assert_eq!(sim.world.agents().get(AgentId(0)).unwrap().home(), Some(PlaceableId(0)));
        sim.world
            .agents
            .get_mut(AgentId(0))
            .unwrap()
            .set_state(AgentState::GoingHome { target: Vec2::new(100.0, 100.0) });

        let report = resolve(&mut sim, 1);
        assert_eq!(report.obstacle_contacts, 1);
    }

    #[test]
    fn hole_marks_agent_without_removing_it() {
        let mut sim = sim_with_agents(&[(400.0, 300.0), (200.0, 100.0)]);
        sim.apply(Command::Place { tool: PlaceableKind::Hole.into(), position: Vec2::new(410.0, 300.0) })
            .unwrap();
        let report = resolve(&mut sim, 2);
        assert_eq!(report.consumed, vec![AgentId(0)]);
        assert_eq!(sim.world.agents().len(), 2);
    }

    #[test]
    fn consumed_resident_leaves_its_hut_in_the_same_frame() {
        let mut sim = sim_with_agents(&[(400.0, 300.0), (200.0, 500.0)]);
        sim.apply(hut_at(100.0, 100.0)).unwrap();
        assert!(sim.world.agents().iter().all(|a| a.home() == Some(PlaceableId(0))));
        sim.apply(Command::Place { tool: PlaceableKind::Hole.into(), position: Vec2::new(405.0, 300.0) })
            .unwrap();

        let mut rec = Recorder::default();
        let stats = sim.step(0.016, &mut rec);
        assert_eq!(stats.consumed, 1);
        assert_eq!(rec.consumed, vec![AgentId(0)]);
        assert!(sim.world.agents().get(AgentId(0)).is_none());
        assert_eq!(sim.world.placeables().hut(PlaceableId(0)).unwrap().residents(), &[AgentId(1)]);
        assert!(sim.world.membership_consistent());
    }
}

// ── Frame loop ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod frame_tests {
    use super::*;

    fn homed_at_dusk(cycle_timer: f64) -> Sim {
        SimBuilder::new(quiet_config())
            .agents(store_at(&[(400.0, 300.0)]))
            .place(PlaceableKind::Hut, Vec2::new(600.0, 150.0))
            .cycle_timer(cycle_timer)
            .build()
            .unwrap()
    }

    fn state(sim: &Sim) -> AgentState {
        sim.world.agents().get(AgentId(0)).unwrap().state()
    }

    #[test]
    fn night_flip_sends_agent_home_on_that_frame() {
        let mut sim = homed_at_dusk(29.95);
        let mut rec = Recorder::default();

        sim.step(0.02, &mut rec);
        sim.step(0.02, &mut rec);
        assert_eq!(state(&sim), AgentState::Wandering);
        assert!(rec.flips.is_empty());

        let stats = sim.step(0.02, &mut rec);
        assert_eq!(rec.flips, vec![(2, Phase::Night)]);
        assert_eq!(stats.transitions, 1);
        assert_eq!(state(&sim), AgentState::GoingHome { target: Vec2::new(600.0, 150.0) });
    }

    #[test]
    fn agent_walks_home_and_is_hidden() {
        let mut sim = homed_at_dusk(29.99);
        sim.run_frames(300, 0.05, &mut NoopObserver);
        assert_eq!(state(&sim), AgentState::AtHome);
        assert_eq!(sim.world.agents().get(AgentId(0)).unwrap().velocity, Vec2::ZERO);

        let at = sim.world.agents().get(AgentId(0)).unwrap().position;
        assert!(at.distance(Vec2::new(600.0, 150.0)) <= 15.0 + 1e-9, "left home: {at}");

        let snap = sim.world.snapshot();
        let hidden = snap.agents().any(|i| matches!(i, DrawItem::Agent { hidden: true, .. }));
        assert!(hidden);
    }

    #[test]
    fn agent_walks_home_at_sixty_fps() {
        let mut sim = homed_at_dusk(29.99);
        sim.run_frames(900, 1.0 / 60.0, &mut NoopObserver);
        assert_eq!(sim.world.clock().phase(), Phase::Night);
        assert_eq!(state(&sim), AgentState::AtHome);
        let at = sim.world.agents().get(AgentId(0)).unwrap().position;
        assert!(at.distance(Vec2::new(600.0, 150.0)) <= 15.0 + 1e-9, "left home: {at}");
    }

    #[test]
    fn home_anchor_is_hut_base_centre() {
        let sim = homed_at_dusk(0.0);
        let anchor = sim.world.home_anchor(AgentId(0)).unwrap();
        assert_eq!(anchor.anchor, Vec2::new(600.0, 150.0));
        assert!((anchor.jitter_radius - 15.0).abs() < 1e-9);
        assert!(sim.world.home_anchor(AgentId(9)).is_none());
    }

    #[test]
    fn jumping_the_clock_is_not_reported_as_a_flip() {
        let mut sim = homed_at_dusk(0.0);
        sim.world.clock_mut().set_cycle_timer(40.0);
        let mut rec = Recorder::default();
        sim.step(0.02, &mut rec);
        assert!(rec.flips.is_empty());
        assert_eq!(sim.world.clock().phase(), Phase::Night);
        assert_eq!(state(&sim), AgentState::Wandering);
    }

    #[test]
    fn day_flip_releases_agents() {
        let mut sim = homed_at_dusk(49.99);
        sim.world.agents.get_mut(AgentId(0)).unwrap().set_state(AgentState::AtHome);
        let mut rec = Recorder::default();
        sim.step(0.02, &mut rec);
        assert_eq!(rec.flips, vec![(0, Phase::Day)]);
        assert_eq!(state(&sim), AgentState::Wandering);
    }

    #[test]
    fn dt_is_clamped() {
        let mut sim = sim_with_agents(&[(400.0, 300.0)]);
        let stats = sim.step(1.0, &mut NoopObserver);
        assert_eq!(stats.dt, 0.05);
        assert!((sim.world.clock().now() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn speed_multiplier_scales_simulation_time() {
        let mut sim = sim_with_agents(&[]);
        assert_eq!(sim.apply(Command::AdjustSpeed(1.0)), Ok(CommandOutcome::SpeedChanged(2.0)));
        sim.step(0.05, &mut NoopObserver);
        assert!((sim.world.clock().now() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn speed_command_is_clamped() {
        let mut sim = sim_with_agents(&[]);
        for _ in 0..50 {
            sim.apply(Command::AdjustSpeed(0.2)).unwrap();
        }
        assert_eq!(sim.world.clock().speed_multiplier(), 5.0);
        for _ in 0..50 {
            sim.apply(Command::AdjustSpeed(-0.2)).unwrap();
        }
        assert_eq!(sim.world.clock().speed_multiplier(), 0.2);
    }

    #[test]
    fn slowdown_applies_then_lapses() {
        let mut sim = sim_with_agents(&[(200.0, 200.0), (400.0, 300.0), (600.0, 400.0)]);
        assert_eq!(
            sim.apply(Command::ToggleEffect(EffectKind::Slowdown)),
            Ok(CommandOutcome::EffectStarted(EffectKind::Slowdown))
        );
        sim.step(0.05, &mut NoopObserver);
        assert!(sim.world.agents().iter().all(|a| a.speed_effect_multiplier == 0.6));

        // 10 simulated seconds at 0.05 s per frame.
        sim.run_frames(200, 0.05, &mut NoopObserver);
        assert!(!sim.world.effects().slowdown_active());
        assert!(sim.world.agents().iter().all(|a| a.speed_effect_multiplier == 1.0));
    }

    #[test]
    fn force_field_tool_and_toggle() {
        let mut sim = sim_with_agents(&[(420.0, 300.0)]);
        let centre = Vec2::new(400.0, 300.0);
        assert_eq!(
            sim.apply(Command::Place { tool: ToolKind::ForceField, position: centre }),
            Ok(CommandOutcome::EffectStarted(EffectKind::ForceField))
        );
        let snap = sim.world.snapshot();
        assert_eq!(snap.force_field.map(|c| (c.center, c.radius)), Some((centre, 100.0)));

        sim.step(0.05, &mut NoopObserver);
        assert_eq!(sim.world.agents().get(AgentId(0)).unwrap().accumulated_force, Vec2::ZERO);

        assert_eq!(
            sim.apply(Command::ToggleEffect(EffectKind::ForceField)),
            Ok(CommandOutcome::EffectStopped(EffectKind::ForceField))
        );
        assert_eq!(sim.apply(Command::ToggleEffect(EffectKind::ForceField)), Ok(CommandOutcome::Unchanged));
        assert_eq!(
            sim.apply(Command::Place { tool: ToolKind::ForceField, position: Vec2::new(-5.0, 0.0) }),
            Err(Rejected::OutOfBounds { position: Vec2::new(-5.0, 0.0) })
        );
    }

    #[test]
    fn force_field_expires_after_duration() {
        let mut sim = sim_with_agents(&[]);
        sim.apply(Command::Place { tool: ToolKind::ForceField, position: Vec2::new(400.0, 300.0) }).unwrap();
        sim.run_frames(159, 0.05, &mut NoopObserver);
        assert!(sim.world.effects().force_field().is_some());
        sim.run_frames(2, 0.05, &mut NoopObserver);
        assert!(sim.world.effects().force_field().is_none());
    }
}

// ── Observer & snapshot ───────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[test]
    fn snapshot_interval_is_respected() {
        let cfg = SimConfig { snapshot_interval_frames: 5, ..quiet_config() };
        let mut sim = SimBuilder::new(cfg).agents(store_at(&[(400.0, 300.0)])).build().unwrap();
        let mut rec = Recorder::default();
        sim.run_frames(12, 0.016, &mut rec);
        assert_eq!(rec.frames, 12);
        let frames: Vec<u64> = rec.snapshots.iter().map(|s| s.frame).collect();
        assert_eq!(frames, vec![5, 10]);
        assert_eq!(rec.last.unwrap().frame, 11);
    }

    #[test]
    fn draw_list_is_depth_sorted() {
        let mut sim = sim_with_agents(&[(300.0, 500.0), (500.0, 50.0)]);
        sim.apply(hut_at(100.0, 300.0)).unwrap();
        sim.apply(Command::Place { tool: PlaceableKind::Tree.into(), position: Vec2::new(700.0, 200.0) })
            .unwrap();
        let snap = sim.world.snapshot();
        assert_eq!(snap.entries.len(), 4);
        assert!(snap.entries.windows(2).all(|w| w[0].depth <= w[1].depth));
        // agent y=50, tree bottom 203, hut bottom 315, agent y=500
        assert!(matches!(snap.entries[0].item, DrawItem::Agent { .. }));
        assert!(matches!(snap.entries[1].item, DrawItem::Placeable { kind: PlaceableKind::Tree, .. }));
        assert!(matches!(snap.entries[2].item, DrawItem::Placeable { kind: PlaceableKind::Hut, residents: 2, .. }));
        assert_eq!(snap.phase, Phase::Day);
        assert_eq!(snap.speed_multiplier, 1.0);
        assert!(!snap.slowdown_active);
    }

    #[test]
    fn slowdown_generation_visible_in_snapshot() {
        let mut sim = sim_with_agents(&[]);
        sim.apply(Command::Place { tool: ToolKind::Slowdown, position: Vec2::ZERO }).unwrap();
        sim.apply(Command::ToggleEffect(EffectKind::Slowdown)).unwrap();
        sim.apply(Command::ToggleEffect(EffectKind::Slowdown)).unwrap();
        let snap = sim.world.snapshot();
        assert!(snap.slowdown_active);
        assert_eq!(snap.slowdown_generation, 2);
    }
}

// ── Broadphase ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod grid_tests {
    use super::*;
    use crate::grid::SpatialHash;

    #[test]
    fn neighbouring_cells_pair_up_once() {
        let mut grid = SpatialHash::new();
        grid.rebuild(
            16.0,
            [
                (AgentId(2), Vec2::new(15.0, 15.0)),
                (AgentId(0), Vec2::new(17.0, 15.0)),
                (AgentId(1), Vec2::new(18.0, 31.0)),
                (AgentId(3), Vec2::new(200.0, 200.0)),
            ],
        );
        let mut pairs = Vec::new();
        grid.candidate_pairs(&mut pairs);
        assert_eq!(grid.len(), 4);
        assert_eq!(
            pairs,
            vec![(AgentId(0), AgentId(1)), (AgentId(0), AgentId(2)), (AgentId(1), AgentId(2))]
        );
    }

    #[test]
    fn degenerate_cell_size_falls_back() {
        let mut grid = SpatialHash::new();
        grid.rebuild(0.0, [(AgentId(0), Vec2::new(0.5, 0.5)), (AgentId(1), Vec2::new(1.5, 0.5))]);
        let mut pairs = Vec::new();
        grid.candidate_pairs(&mut pairs);
        assert_eq!(pairs, vec![(AgentId(0), AgentId(1))]);
    }
}
