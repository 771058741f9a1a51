//! Simulation time model.
//!
//! # Design
//!
//! The host loop measures wall-clock frame time and hands it to the
//! simulation as `dt` seconds, clamped to `max_dt` so a stalled host cannot
//! make agents tunnel through thin obstacles.
//!
//! Inside the simulation there is exactly one clock, [`WorldClock`].  Each
//! frame it advances by `dt × speed_multiplier` simulated seconds.  That
//! scaled time drives:
//!
//! - the day/night cycle (`cycle_timer`),
//! - effect lifetimes ([`WorldClock::now`] is the expiry timebase),
//! - motion, because effective agent speed carries the same multiplier.
//!
//! A phase flip is detected once per frame in [`WorldClock::advance`] and
//! returned to the caller, so every agent sees the same flip on the same
//! frame.

use std::fmt;
use std::time::Instant;

use crate::config::ClockConfig;

// ── Phase ─────────────────────────────────────────────────────────────────────

/// Half of the day/night cycle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Day,
    Night,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Day   => "day",
            Phase::Night => "night",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── WorldClock ────────────────────────────────────────────────────────────────

/// Cyclical day/night clock with a user-adjustable speed multiplier.
///
/// Invariants: `0 <= cycle_timer < day_length + night_length` and
/// `min_speed <= speed_multiplier <= max_speed`.
#[derive(Clone, Debug)]
pub struct WorldClock {
    cycle_timer:      f64,
    is_daytime:       bool,
    speed_multiplier: f64,
    /// Total simulated seconds since start (monotonic, never wraps).
    elapsed:          f64,

    day_length:   f64,
    night_length: f64,
    min_speed:    f64,
    max_speed:    f64,
}

impl WorldClock {
    /// A clock at the start of the first day.
    pub fn new(config: &ClockConfig) -> Self {
        let min_speed = config.min_speed.min(config.max_speed);
        let max_speed = config.max_speed.max(config.min_speed);
        Self {
            cycle_timer:      0.0,
            is_daytime:       config.day_length > 0.0,
            speed_multiplier: config.initial_speed.clamp(min_speed, max_speed),
            elapsed:          0.0,
            day_length:       config.day_length,
            night_length:     config.night_length,
            min_speed,
            max_speed,
        }
    }

    /// Advance by `dt` wall seconds.
    ///
    /// Returns `Some(new_phase)` on the frame where day turns to night or
    /// night turns to day, `None` otherwise.
    pub fn advance(&mut self, dt: f64) -> Option<Phase> {
        let scaled = dt.max(0.0) * self.speed_multiplier;
        self.elapsed += scaled;

        let cycle = self.cycle_length();
        if cycle > 0.0 {
            self.cycle_timer = (self.cycle_timer + scaled).rem_euclid(cycle);
            // rem_euclid can round up to exactly `cycle` for tiny negatives.
            if self.cycle_timer >= cycle {
                self.cycle_timer = 0.0;
            }
        }

        let was_daytime = self.is_daytime;
        self.is_daytime = self.cycle_timer < self.day_length;
        (was_daytime != self.is_daytime).then(|| self.phase())
    }

    /// Add `delta` to the speed multiplier, clamped to its bounds.
    /// Returns the new multiplier.
    pub fn adjust_speed(&mut self, delta: f64) -> f64 {
        if delta.is_finite() {
            self.speed_multiplier = (self.speed_multiplier + delta).clamp(self.min_speed, self.max_speed);
        }
        self.speed_multiplier
    }

    /// Jump to `t` seconds into the cycle without reporting a flip.
    /// The derived day/night flag is updated immediately.
    pub fn set_cycle_timer(&mut self, t: f64) {
        let cycle = self.cycle_length();
        self.cycle_timer = if cycle > 0.0 { t.rem_euclid(cycle) } else { 0.0 };
        if self.cycle_timer >= cycle {
            self.cycle_timer = 0.0;
        }
        self.is_daytime = self.cycle_timer < self.day_length;
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn is_daytime(&self) -> bool {
        self.is_daytime
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        if self.is_daytime { Phase::Day } else { Phase::Night }
    }

    #[inline]
    pub fn cycle_timer(&self) -> f64 {
        self.cycle_timer
    }

    #[inline]
    pub fn cycle_length(&self) -> f64 {
        self.day_length + self.night_length
    }

    #[inline]
    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    #[inline]
    pub fn speed_bounds(&self) -> (f64, f64) {
        (self.min_speed, self.max_speed)
    }

    /// Simulated seconds since start; the timebase for effect expiry.
    #[inline]
    pub fn now(&self) -> f64 {
        self.elapsed
    }

    /// Simulated seconds left in the current phase.
    pub fn phase_remaining(&self) -> f64 {
        if self.is_daytime {
            self.day_length - self.cycle_timer
        } else {
            self.cycle_length() - self.cycle_timer
        }
    }
}

impl fmt::Display for WorldClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.1}s left, x{:.1})",
            self.phase(),
            self.phase_remaining(),
            self.speed_multiplier
        )
    }
}

// ── Frame timing ──────────────────────────────────────────────────────────────

/// Clamp a measured frame duration to `[0, max_dt]`.  Non-finite input
/// yields zero.
#[inline]
pub fn clamp_frame_dt(dt: f64, max_dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 { dt.min(max_dt) } else { 0.0 }
}

/// Wall-clock frame timer for interactive hosts.
///
/// Each call to [`FrameTimer::tick`] returns the seconds since the previous
/// call, clamped to `max_dt`.
#[derive(Debug)]
pub struct FrameTimer {
    last:   Instant,
    max_dt: f64,
}

impl FrameTimer {
    pub fn new(max_dt: f64) -> Self {
        Self { last: Instant::now(), max_dt }
    }

    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        clamp_frame_dt(dt, self.max_dt)
    }
}
