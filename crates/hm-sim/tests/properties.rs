use hm_agent::AgentStore;
use hm_core::{AgentId, PlaceableKind, SeedingParams, SimConfig, ToolKind, Vec2};
use hm_sim::{Command, NoopObserver, Sim, SimBuilder};
use proptest::prelude::*;

fn arb_kind() -> impl Strategy<Value = PlaceableKind> {
    prop::sample::select(PlaceableKind::ALL.to_vec())
}

prop_compose! {
    fn arb_position()(
        x in 0.0f64..800.0,
        y in 0.0f64..600.0
    ) -> Vec2 {
        Vec2::new(x, y)
    }
}

prop_compose! {
    fn arb_placement()(kind in arb_kind(), position in arb_position()) -> (PlaceableKind, Vec2) {
        (kind, position)
    }
}

fn sim_with(agents: usize, seed: u64) -> Sim {
    let cfg = SimConfig {
        seed,
        seeding: SeedingParams { initial_agents: agents, ..SeedingParams::default() },
        ..SimConfig::default()
    };
    SimBuilder::new(cfg).build().unwrap()
}

fn place_all(sim: &mut Sim, placements: &[(PlaceableKind, Vec2)]) {
    for &(kind, position) in placements {
        // Rejections are part of the property under test.
        let _ = sim.apply(Command::Place { tool: ToolKind::Place(kind), position });
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn placeables_never_overlap(placements in prop::collection::vec(arb_placement(), 1..40)) {
        let mut sim = sim_with(0, 1);
        place_all(&mut sim, &placements);

        let items: Vec<_> = sim.world.placeables().iter().collect();
        for (i, a) in items.iter().enumerate() {
            for b in &items[i + 1..] {
                prop_assert!(!a.bounds.overlaps(&b.bounds), "{} overlaps {}", a.id, b.id);
            }
        }
    }

    #[test]
    fn overlapping_pair_separates_in_one_frame(
        dx in -15.0f64..15.0,
        dy in -15.0f64..15.0
    ) {
        prop_assume!(dx * dx + dy * dy > 0.01);
        let mut store = AgentStore::new(3);
        store.spawn(Vec2::new(400.0, 300.0), 8.0);
        store.spawn(Vec2::new(400.0 + dx, 300.0 + dy), 8.0);
        let cfg = SimConfig {
            seeding: SeedingParams { initial_agents: 0, ..SeedingParams::default() },
            ..SimConfig::default()
        };
        let mut sim = SimBuilder::new(cfg).agents(store).build().unwrap();
        sim.step(0.0, &mut NoopObserver);

        let a = sim.world.agents().get(AgentId(0)).unwrap().position;
        let b = sim.world.agents().get(AgentId(1)).unwrap().position;
        prop_assert!(a.distance(b) >= 16.0 - 1e-9, "distance {}", a.distance(b));
    }

    #[test]
    fn dense_cluster_settles_with_enough_passes(
        agents in 5usize..30,
        seed in any::<u64>()
    ) {
        let cfg = SimConfig {
            seed,
            collision_passes: 200,
            seeding: SeedingParams { initial_agents: agents, ..SeedingParams::default() },
            ..SimConfig::default()
        };
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        sim.step(0.0, &mut NoopObserver);

        let bodies: Vec<_> = sim.world.agents().iter().map(|a| (a.position, a.collision_radius())).collect();
        for (i, &(p, r)) in bodies.iter().enumerate() {
            for &(q, s) in &bodies[i + 1..] {
                let d = p.distance(q);
                prop_assert!(d >= r + s - 1e-6, "pair at distance {} after settling", d);
            }
        }
    }

    #[test]
    fn huts_fill_up_to_capacity(
        agents in 0usize..30,
        seed in any::<u64>(),
        huts in prop::collection::vec(arb_position(), 1..8)
    ) {
        let mut sim = sim_with(agents, seed);
        for &position in &huts {
            let _ = sim.apply(Command::Place { tool: PlaceableKind::Hut.into(), position });
        }

        let placed = sim.world.placeables().huts().count();
        let capacity = sim.world.config().placeables.hut_capacity as usize;
        for (_, hut) in sim.world.placeables().huts() {
            prop_assert!(hut.residents().len() <= capacity);
        }
        let housed = sim.world.agents().iter().filter(|a| !a.is_homeless()).count();
        prop_assert_eq!(housed, agents.min(placed * capacity));
        prop_assert!(sim.world.membership_consistent());
    }

    #[test]
    fn membership_survives_consumption(
        agents in 1usize..25,
        seed in any::<u64>(),
        placements in prop::collection::vec(arb_placement(), 1..12),
        frames in 1u64..120
    ) {
        let mut sim = sim_with(agents, seed);
        place_all(&mut sim, &placements);
        sim.run_frames(frames, 0.05, &mut NoopObserver);

        prop_assert!(sim.world.membership_consistent());
        for (_, hut) in sim.world.placeables().huts() {
            for &resident in hut.residents() {
                prop_assert!(sim.world.agents().contains(resident));
            }
        }
    }

    #[test]
    fn agents_stay_finite_and_near_the_world(
        agents in 1usize..25,
        seed in any::<u64>(),
        frames in 1u64..200,
        dt in 0.0f64..0.2
    ) {
        let mut sim = sim_with(agents, seed);
        sim.run_frames(frames, dt, &mut NoopObserver);

        let world = sim.world.config().world;
        for a in sim.world.agents().iter() {
            prop_assert!(a.position.is_finite() && a.velocity.is_finite());
            prop_assert!(a.position.x > -50.0 && a.position.x < world.width + 50.0);
            prop_assert!(a.position.y > -50.0 && a.position.y < world.height + 50.0);
        }
    }

    #[test]
    fn speed_multiplier_stays_clamped(deltas in prop::collection::vec(-3.0f64..3.0, 0..50)) {
        let mut sim = sim_with(0, 7);
        for delta in deltas {
            let _ = sim.apply(Command::AdjustSpeed(delta));
        }
        let (lo, hi) = sim.world.clock().speed_bounds();
        let speed = sim.world.clock().speed_multiplier();
        prop_assert!((lo..=hi).contains(&speed));
    }
}
