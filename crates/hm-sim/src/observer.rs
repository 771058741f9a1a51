//! Simulation observer trait for progress reporting and data collection.

use hm_core::{AgentId, Phase};

use crate::snapshot::RenderSnapshot;

/// Per-frame counters reported to [`SimObserver::on_frame_end`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub frame:             u64,
    /// Clamped wall seconds for this frame.
    pub dt:                f64,
    /// Simulation seconds since start, after this frame.
    pub sim_time:          f64,
    /// Live agents after removal.
    pub agents:            usize,
    pub consumed:          usize,
    pub agent_contacts:    usize,
    pub obstacle_contacts: usize,
    /// Agent state-machine transitions this frame.
    pub transitions:       usize,
}

/// Callbacks invoked by [`Sim::step`][crate::Sim::step] at key points in
/// the frame.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: dusk counter
///
/// ```rust,ignore
/// struct Nights(u32);
///
/// impl SimObserver for Nights {
///     fn on_phase_change(&mut self, _frame: u64, phase: Phase) {
///         if phase == Phase::Night {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each frame, before the clock advances.
    fn on_frame_start(&mut self, _frame: u64) {}

    /// Called on the frame where day turns to night or back.
    fn on_phase_change(&mut self, _frame: u64, _phase: Phase) {}

    /// Called after consumed agents have been removed from the world.
    fn on_agents_consumed(&mut self, _frame: u64, _agents: &[AgentId]) {}

    /// Called at the end of each frame.
    fn on_frame_end(&mut self, _stats: &FrameStats) {}

    /// Called every `config.snapshot_interval_frames` frames.
    fn on_snapshot(&mut self, _snapshot: &RenderSnapshot) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
