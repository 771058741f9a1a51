//! `headless`: a hamlet run without a window.
//!
//! Loads an optional TOML file (simulation config, run length and a scripted
//! command list), seeds the world, and steps it frame by frame while the
//! observer reports phase flips, hazard losses and periodic summaries
//! through `tracing`.
//!
//! Run with:
//!   cargo run -p headless --release -- demos/headless/hamlet.toml
//!
//! Verbosity follows `RUST_LOG` (default `info`).

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use hm_core::{AgentId, EffectKind, FrameTimer, Phase, PlaceableKind, SimConfig, ToolKind, Vec2};
use hm_sim::{Command, DrawItem, FrameStats, RenderSnapshot, SimBuilder, SimObserver};

// ── Demo file ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(default)]
struct RunParams {
    frames: u64,
    /// Wall seconds per frame.
    dt: f64,
    /// Log a frame summary every N frames.
    report_every: u64,
    /// Pace frames against the wall clock and feed measured frame times
    /// instead of the fixed `dt`.
    realtime: bool,
}

impl Default for RunParams {
    fn default() -> Self {
        Self { frames: 3_000, dt: 1.0 / 60.0, report_every: 300, realtime: false }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Action {
    Place { kind: PlaceableKind, x: f64, y: f64 },
    ForceField { x: f64, y: f64 },
    Toggle { effect: EffectKind },
    Speed { delta: f64 },
    AddAgent { x: f64, y: f64 },
}

impl From<Action> for Command {
    fn from(action: Action) -> Self {
        match action {
            Action::Place { kind, x, y } => Command::Place { tool: kind.into(), position: Vec2::new(x, y) },
            Action::ForceField { x, y } => Command::Place { tool: ToolKind::ForceField, position: Vec2::new(x, y) },
            Action::Toggle { effect } => Command::ToggleEffect(effect),
            Action::Speed { delta } => Command::AdjustSpeed(delta),
            Action::AddAgent { x, y } => Command::AddAgent(Vec2::new(x, y)),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
struct ScriptStep {
    /// Applied before this frame is stepped.
    frame: u64,
    #[serde(flatten)]
    action: Action,
}

#[derive(Deserialize)]
#[serde(default)]
struct DemoFile {
    sim: SimConfig,
    run: RunParams,
    script: Vec<ScriptStep>,
}

impl Default for DemoFile {
    fn default() -> Self {
        let at = |frame, action| ScriptStep { frame, action };
        Self {
            sim: SimConfig::default(),
            run: RunParams::default(),
            script: vec![
                at(0, Action::Place { kind: PlaceableKind::Hut, x: 200.0, y: 150.0 }),
                at(0, Action::Place { kind: PlaceableKind::Hut, x: 600.0, y: 150.0 }),
                at(0, Action::Place { kind: PlaceableKind::Farm, x: 150.0, y: 450.0 }),
                at(0, Action::Place { kind: PlaceableKind::Tree, x: 650.0, y: 420.0 }),
                at(60, Action::Place { kind: PlaceableKind::Hole, x: 520.0, y: 330.0 }),
                at(120, Action::ForceField { x: 400.0, y: 300.0 }),
                at(600, Action::Toggle { effect: EffectKind::Slowdown }),
                at(900, Action::Speed { delta: 1.0 }),
            ],
        }
    }
}

fn load(path: &Path) -> Result<DemoFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct LogObserver {
    report_every: u64,
    nights:       u32,
    lost:         usize,
}

impl SimObserver for LogObserver {
    fn on_phase_change(&mut self, frame: u64, phase: Phase) {
        if phase == Phase::Night {
            self.nights += 1;
            info!(frame, night = self.nights, "dusk");
        }
    }

    fn on_agents_consumed(&mut self, frame: u64, agents: &[AgentId]) {
        self.lost += agents.len();
        info!(frame, lost = agents.len(), total_lost = self.lost, "agents fell into a hole");
    }

    fn on_frame_end(&mut self, stats: &FrameStats) {
        if self.report_every > 0 && stats.frame % self.report_every == 0 {
            info!(
                frame = stats.frame,
                sim_time = %format!("{:.1}", stats.sim_time),
                agents = stats.agents,
                contacts = stats.agent_contacts,
                "progress"
            );
        }
    }

    fn on_snapshot(&mut self, snapshot: &RenderSnapshot) {
        let hidden = snapshot
            .agents()
            .filter(|i| matches!(i, DrawItem::Agent { hidden: true, .. }))
            .count();
        debug!(
            frame = snapshot.frame,
            phase = %snapshot.phase,
            remaining = %format!("{:.1}", snapshot.phase_remaining),
            drawn = snapshot.entries.len() - hidden,
            hidden,
            "snapshot"
        );
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let demo = match std::env::args().nth(1) {
        Some(path) => load(Path::new(&path))?,
        None => DemoFile::default(),
    };
    let DemoFile { sim: config, run, mut script } = demo;
    script.sort_by_key(|s| s.frame);

    info!(
        seed = config.seed,
        agents = config.seeding.initial_agents,
        frames = run.frames,
        steps = script.len(),
        "hamlet starting"
    );

    let mut sim = SimBuilder::new(config).build()?;
    let mut observer = LogObserver { report_every: run.report_every, ..LogObserver::default() };

    let mut timer = FrameTimer::new(sim.world.config().max_dt);
    let mut pending = script.into_iter().peekable();
    for frame in 0..run.frames {
        while let Some(step) = pending.next_if(|s| s.frame <= frame) {
            match sim.apply(step.action.into()) {
                Ok(outcome) => debug!(frame, ?outcome, "command applied"),
                Err(reason) => warn!(frame, action = ?step.action, %reason, "command rejected"),
            }
        }
        let dt = if run.realtime {
            std::thread::sleep(Duration::from_secs_f64(run.dt.max(0.0)));
            timer.tick()
        } else {
            run.dt
        };
        sim.step(dt, &mut observer);
    }

    let world = &sim.world;
    let homeless = world.agents().iter().filter(|a| a.is_homeless()).count();
    info!(
        frames = world.frame(),
        sim_time = %format!("{:.1}", world.clock().now()),
        nights = observer.nights,
        alive = world.agents().len(),
        homeless,
        lost = observer.lost,
        placeables = world.placeables().len(),
        consistent = world.membership_consistent(),
        "run complete"
    );
    Ok(())
}
