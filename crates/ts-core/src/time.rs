//! Simulation time model.
//!
//! # Design
//!
//! The driver never reads wall-clock time itself.  It asks a [`Clock`] how
//! many seconds elapsed since the previous tick and scales the answer by
//! [`SimConfig::time_factor`]:
//!
//!   elapsed = clock.advance() * time_factor
//!
//! [`FixedStepClock`] returns the same step every call, which makes runs
//! reproducible.  [`WallClock`] returns real elapsed time for interactive
//! front-ends that want the simulation to follow the user's clock.

use std::fmt;
use std::time::Instant;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Number of ticks executed so far.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Source of per-tick elapsed time.
pub trait Clock: Send {
    /// Advance to the next tick and return the seconds elapsed since the
    /// previous call.
    fn advance(&mut self) -> f64;

    /// Ticks completed so far.
    fn current_tick(&self) -> Tick;
}

/// Deterministic clock: every tick lasts exactly `step_secs`.
#[derive(Clone, Debug)]
pub struct FixedStepClock {
    step_secs: f64,
    current:   Tick,
}

impl FixedStepClock {
    pub fn new(step_secs: f64) -> Self {
        Self { step_secs, current: Tick::ZERO }
    }

    pub fn step_secs(&self) -> f64 {
        self.step_secs
    }
}

impl Clock for FixedStepClock {
    fn advance(&mut self) -> f64 {
        self.current = self.current.offset(1);
        self.step_secs
    }

    fn current_tick(&self) -> Tick {
        self.current
    }
}

/// Real-time clock.  The first call measures from construction.
#[derive(Debug)]
pub struct WallClock {
    last:    Instant,
    current: Tick,
}

impl WallClock {
    pub fn new() -> Self {
        Self { last: Instant::now(), current: Tick::ZERO }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn advance(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        self.current = self.current.offset(1);
        elapsed
    }

    fn current_tick(&self) -> Tick {
        self.current
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the simulation builder.  Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Seconds per tick for the fixed-step clock.
    pub step_secs: f64,

    /// Multiplier applied to clock time.  1.0 = real time.
    pub time_factor: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Run the decision phase every tick.  A "dumb" simulation (e.g. one
    /// mirroring another for display) only moves agents.
    pub think: bool,

    /// Ticks executed by `Sim::run`.
    pub total_ticks: u64,
}

impl SimConfig {
    /// Construct the fixed-step clock for this run.
    pub fn make_clock(&self) -> FixedStepClock {
        FixedStepClock::new(self.step_secs)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            step_secs:   1.0,
            time_factor: 1.0,
            seed:        42,
            think:       true,
            total_ticks: 60,
        }
    }
}
