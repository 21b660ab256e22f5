//! Round state machine.
//!
//! A [`GameController`] runs exactly one round. It borrows the session's
//! [`ScoreStore`] for its whole lifetime and is the only thing that decides a
//! round is over. Moves and timer ticks are both plain method calls, so the
//! caller serializes them simply by owning the controller.

use crate::board::Board;
use crate::config::{ConfigError, TimerConfig};
use crate::error::GameError;
use crate::events::{DRAW_MESSAGE, GameEvent, too_slow_message, turn_message, win_message};
use crate::invariants::{ControllerInvariants, InvariantSet};
use crate::score::ScoreStore;
use crate::timer::{Expiry, TimerSignal, TurnTimer};
use crate::types::{GameStatus, Outcome, Side};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Where a round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundState {
    /// Waiting for `Side` to move.
    Active(Side),
    /// Finished. Terminal.
    Ended(Outcome),
}

impl std::fmt::Display for RoundState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundState::Active(side) => write!(f, "waiting for {side}"),
            RoundState::Ended(outcome) => write!(f, "round ended ({outcome})"),
        }
    }
}

/// Runs one round: board, turn clock and score updates.
#[derive(Debug)]
pub struct GameController<'s> {
    pub(crate) board: Board,
    pub(crate) state: RoundState,
    pub(crate) moves_played: usize,
    pub(crate) timer: TurnTimer,
    store: &'s mut ScoreStore,
    events: Vec<GameEvent>,
    restart_requested: bool,
}

impl<'s> GameController<'s> {
    /// Opens a round on an empty board.
    ///
    /// The first mover comes from the store. The opening status, the current
    /// scores and the first countdown are queued as events.
    ///
    /// # Errors
    ///
    /// `ConfigError` if `config` fails [`TimerConfig::validate`].
    #[instrument(skip(store))]
    pub fn new(store: &'s mut ScoreStore, config: TimerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::open(store, config))
    }

    /// Opens a round with settings the caller has already validated.
    pub(crate) fn open(store: &'s mut ScoreStore, config: TimerConfig) -> Self {
        let first = store.current_first_mover();
        let mut controller = Self {
            board: Board::new(),
            state: RoundState::Active(first),
            moves_played: 0,
            timer: TurnTimer::new(config),
            store,
            events: Vec::new(),
            restart_requested: false,
        };

        info!(first_mover = %first, "Round started");
        controller.emit(GameEvent::Status(turn_message(first)));
        controller.emit(GameEvent::Scores(controller.store.snapshot()));
        controller.start_clock(first);
        controller.check_invariants();
        controller
    }

    /// Plays the current side's mark at `index`.
    ///
    /// Returns the board status after the move.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` once the round has ended, `OutOfRange` or
    /// `AlreadyClaimed` from the board. Nothing changes on error, and the
    /// current turn's clock keeps running.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn play_move(&mut self, index: usize) -> Result<GameStatus, GameError> {
        let RoundState::Active(turn) = self.state else {
            warn!(index, "Move rejected: round is over");
            return Err(GameError::invalid_transition("play a move", self.state));
        };

        self.board.claim(index, turn).inspect_err(|err| {
            warn!(error = %err, "Move rejected");
        })?;
        self.moves_played += 1;
        self.timer.cancel();
        self.emit(GameEvent::CellClaimed { index, side: turn });

        let status = self.board.evaluate(index);
        match status {
            GameStatus::NoughtWon | GameStatus::CrossWon => {
                let winner = turn;
                info!(%winner, moves = self.moves_played, "Line completed");
                self.finish(Outcome::Winner(winner), win_message(winner));
            }
            GameStatus::Draw => {
                info!(moves = self.moves_played, "Board full, no line");
                self.finish(Outcome::Draw, DRAW_MESSAGE.to_string());
            }
            GameStatus::InProgress => {
                let next = turn.opponent();
                self.state = RoundState::Active(next);
                debug!(%next, "Turn passes");
                self.emit(GameEvent::Status(turn_message(next)));
                self.start_clock(next);
            }
        }

        self.check_invariants();
        Ok(status)
    }

    /// Forfeits the round for the side whose countdown expired.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` if the round is over, or if `expiry` belongs to a
    /// countdown that has since been replaced or cancelled. Stale expiries
    /// change nothing.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn on_timer_expired(&mut self, expiry: Expiry) -> Result<Outcome, GameError> {
        let RoundState::Active(turn) = self.state else {
            warn!(?expiry, "Expiry rejected: round is over");
            return Err(GameError::invalid_transition(
                "expire the turn timer",
                self.state,
            ));
        };

        if *expiry.side() != turn || !self.timer.is_current(&expiry) {
            warn!(?expiry, current_generation = self.timer.generation(), "Stale expiry");
            return Err(GameError::invalid_transition(
                "expire a stale turn timer",
                self.state,
            ));
        }

        let winner = turn.opponent();
        info!(slow = %turn, %winner, "Turn timer expired");
        self.emit(GameEvent::Status(too_slow_message(turn)));
        let outcome = Outcome::Winner(winner);
        self.finish(outcome, win_message(winner));

        self.check_invariants();
        Ok(outcome)
    }

    /// Advances the turn clock by one unit.
    ///
    /// Ticking a finished round does nothing.
    #[instrument(skip(self))]
    pub fn tick(&mut self) -> Result<(), GameError> {
        for signal in self.timer.tick() {
            if let Some(expiry) = self.announce(signal) {
                self.on_timer_expired(expiry)?;
            }
        }
        Ok(())
    }

    /// Asks for another round.
    ///
    /// Flips the first mover in the store and returns a copy of the updated
    /// store for the next round.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` while the round is still active, or if a restart
    /// was already requested for this round.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn request_restart(&mut self) -> Result<ScoreStore, GameError> {
        if let RoundState::Active(_) = self.state {
            warn!("Restart rejected: round still active");
            return Err(GameError::invalid_transition("restart", self.state));
        }
        if self.restart_requested {
            warn!("Restart rejected: already requested");
            return Err(GameError::invalid_transition(
                "restart",
                "a restart is already pending",
            ));
        }

        self.store.toggle_first_mover();
        self.restart_requested = true;
        let first_mover = self.store.current_first_mover();
        info!(%first_mover, "Restart requested");
        self.emit(GameEvent::RestartRequested { first_mover });
        Ok(*self.store)
    }

    /// Takes every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events queued but not yet drained.
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The round state.
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// The round state as a board status.
    pub fn status(&self) -> GameStatus {
        match self.state {
            RoundState::Active(_) => GameStatus::InProgress,
            RoundState::Ended(outcome) => outcome.status(),
        }
    }

    /// Side to move, while the round is active.
    pub fn current_turn(&self) -> Option<Side> {
        match self.state {
            RoundState::Active(side) => Some(side),
            RoundState::Ended(_) => None,
        }
    }

    /// Moves accepted this round.
    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// The turn clock.
    pub fn timer(&self) -> &TurnTimer {
        &self.timer
    }

    /// The session's scores.
    pub fn store(&self) -> &ScoreStore {
        &*self.store
    }

    /// Returns true once a restart has been accepted for this round.
    pub fn is_restart_requested(&self) -> bool {
        self.restart_requested
    }

    fn finish(&mut self, outcome: Outcome, headline: String) {
        self.timer.cancel();
        self.state = RoundState::Ended(outcome);
        if let Some(winner) = outcome.winner() {
            self.store.increment(winner);
        }
        self.emit(GameEvent::Status(headline));
        if outcome.winner().is_some() {
            self.emit(GameEvent::Scores(self.store.snapshot()));
        }
        self.emit(GameEvent::RoundOver(outcome));
    }

    fn start_clock(&mut self, side: Side) {
        let signal = self.timer.start(side);
        self.announce(signal);
    }

    /// Queues display events for a clock signal. Hands back expiries.
    fn announce(&mut self, signal: TimerSignal) -> Option<Expiry> {
        match signal {
            TimerSignal::Countdown { side, remaining } => {
                self.emit(GameEvent::Countdown { side, remaining });
                None
            }
            TimerSignal::Hurry { side, remaining } => {
                info!(%side, remaining, "Hurry");
                self.emit(GameEvent::Hurry { side, remaining });
                None
            }
            TimerSignal::Expired(expiry) => Some(expiry),
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Debug builds only.
    fn check_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        if let Err(violations) = ControllerInvariants::check_all(self) {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            panic!("Round invariant violated: {descriptions}");
        }
    }
}
