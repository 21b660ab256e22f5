//! Session: scores and settings that carry across rounds.

use crate::config::{ConfigError, TimerConfig};
use crate::controller::GameController;
use crate::score::ScoreStore;
use tracing::{info, instrument};

/// Owns the score store and hands out one controller per round.
///
/// Dropping a round's controller and asking for a new one is the engine's
/// equivalent of reloading the board: the board is fresh, the store is
/// carried over as-is.
#[derive(Debug, Clone)]
pub struct Session {
    store: ScoreStore,
    config: TimerConfig,
    rounds_started: u32,
}

impl Session {
    /// Starts a session with a fresh store.
    #[instrument]
    pub fn new(config: TimerConfig) -> Result<Self, ConfigError> {
        Self::with_store(ScoreStore::new(), config)
    }

    /// Starts a session from an existing store.
    #[instrument]
    pub fn with_store(store: ScoreStore, config: TimerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(?config, "Session created");
        Ok(Self {
            store,
            config,
            rounds_started: 0,
        })
    }

    /// Opens the next round.
    #[instrument(skip(self), fields(round = self.rounds_started + 1))]
    pub fn new_round(&mut self) -> GameController<'_> {
        self.rounds_started += 1;
        GameController::open(&mut self.store, self.config)
    }

    /// The session's scores.
    pub fn store(&self) -> &ScoreStore {
        &self.store
    }

    /// Timer settings used for every round.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Rounds opened so far.
    pub fn rounds_started(&self) -> u32 {
        self.rounds_started
    }
}
