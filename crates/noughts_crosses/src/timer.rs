//! Per-turn countdown.
//!
//! The timer never sleeps on its own. A scheduler calls [`TurnTimer::tick`]
//! once per time unit and routes the returned signals. Each call to
//! [`TurnTimer::start`] bumps a generation counter, and the [`Expiry`] token
//! carries the generation it was emitted under, so an expiry from a replaced
//! or cancelled countdown can always be recognised as stale.

use crate::config::TimerConfig;
use crate::types::Side;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Token emitted when a countdown reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct Expiry {
    /// Side that ran out of time.
    side: Side,
    /// Generation of the countdown that expired.
    generation: u64,
}

/// Something the display or controller needs to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerSignal {
    /// Seconds left for `side`.
    Countdown {
        /// Side on the clock.
        side: Side,
        /// Ticks left.
        remaining: u32,
    },
    /// Remaining time dropped to the hurry threshold.
    Hurry {
        /// Side on the clock.
        side: Side,
        /// Ticks left.
        remaining: u32,
    },
    /// Countdown hit zero.
    Expired(Expiry),
}

/// State of the live countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TurnTimerState {
    /// Ticks left.
    seconds_remaining: u32,
    /// Side whose turn this countdown belongs to.
    owning_turn: Side,
    /// False once expired or cancelled.
    active: bool,
}

/// Cancellable countdown for the current turn.
#[derive(Debug, Clone)]
pub struct TurnTimer {
    config: TimerConfig,
    generation: u64,
    state: Option<TurnTimerState>,
}

impl TurnTimer {
    /// Creates an idle timer.
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            generation: 0,
            state: None,
        }
    }

    /// Starts a fresh countdown for `side`, replacing any previous one.
    ///
    /// Returns the initial countdown signal.
    #[instrument(skip(self))]
    pub fn start(&mut self, side: Side) -> TimerSignal {
        self.generation = self.generation.wrapping_add(1);
        let remaining = *self.config.turn_seconds();
        self.state = Some(TurnTimerState {
            seconds_remaining: remaining,
            owning_turn: side,
            active: true,
        });
        debug!(generation = self.generation, remaining, "Countdown started");
        TimerSignal::Countdown { side, remaining }
    }

    /// Stops the countdown. Further ticks emit nothing.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) {
        if let Some(state) = self.state.as_mut().filter(|state| state.active) {
            state.active = false;
            debug!(generation = self.generation, "Countdown cancelled");
        }
    }

    /// Advances the countdown by one unit.
    ///
    /// Emits the new remaining time, a hurry signal when it reaches the
    /// threshold, and an expiry when it reaches zero. An inactive timer
    /// emits nothing.
    #[instrument(skip(self))]
    pub fn tick(&mut self) -> Vec<TimerSignal> {
        let Some(state) = self.state.as_mut().filter(|state| state.active) else {
            return Vec::new();
        };

        state.seconds_remaining = state.seconds_remaining.saturating_sub(1);
        let side = state.owning_turn;
        let remaining = state.seconds_remaining;
        let mut signals = vec![TimerSignal::Countdown { side, remaining }];

        if remaining > 0 && remaining == *self.config.hurry_threshold() {
            signals.push(TimerSignal::Hurry { side, remaining });
        }

        if remaining == 0 {
            state.active = false;
            debug!(generation = self.generation, ?side, "Countdown expired");
            signals.push(TimerSignal::Expired(Expiry {
                side,
                generation: self.generation,
            }));
        }

        signals
    }

    /// Returns true while a countdown is running.
    pub fn is_active(&self) -> bool {
        self.state.is_some_and(|state| state.active)
    }

    /// The live (or last) countdown, if one was ever started.
    pub fn state(&self) -> Option<&TurnTimerState> {
        self.state.as_ref()
    }

    /// Generation of the most recent countdown.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true if `expiry` came from the most recent countdown and that
    /// countdown actually ran out.
    pub fn is_current(&self, expiry: &Expiry) -> bool {
        expiry.generation == self.generation
            && self.state.is_some_and(|state| {
                state.owning_turn == expiry.side && !state.active && state.seconds_remaining == 0
            })
    }

    /// The configuration this timer counts down with.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }
}
