//! Terminal round loop.
//!
//! One task owns the session and the current round. Clock ticks and input
//! lines are multiplexed with `tokio::select!`, so a move and a tick are
//! never applied at the same time.

use crate::config::EventFormat;
use anyhow::{Context, Result};
use noughts_crosses::{
    GameController, GameError, GameErrorKind, GameEvent, Position, ScoreSnapshot, Session,
};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, instrument};

const HELP: &str = "Type a cell (1-9 or a name like `center`), `board`, `again` after a round, or `quit`.";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Claim a cell (0-8).
    Cell(usize),
    /// Start another round.
    Again,
    /// Reprint the board.
    Board,
    /// Show the help line.
    Help,
    /// Leave.
    Quit,
    /// Blank line.
    Nothing,
    /// Anything else.
    Unknown(String),
}

impl Input {
    /// Parses one line of player input.
    #[instrument]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => Input::Nothing,
            "again" | "restart" | "r" => Input::Again,
            "board" | "b" => Input::Board,
            "help" | "?" => Input::Help,
            "quit" | "exit" | "q" => Input::Quit,
            _ => match Position::parse(trimmed) {
                Some(position) => Input::Cell(position.to_index()),
                None => Input::Unknown(trimmed.to_string()),
            },
        }
    }
}

/// What the loop should do after an input line.
#[derive(Debug)]
pub enum Step {
    /// Stay in this round.
    Continue,
    /// A move was accepted; the clock restarted.
    Moved,
    /// The round asked to be replaced by a new one.
    Restart,
    /// Leave the session.
    Quit,
    /// The engine refused the input.
    Rejected(GameError),
    /// Print something for the player.
    Say(String),
}

/// Applies one input to the round.
#[instrument(skip(round))]
pub fn apply_input(round: &mut GameController<'_>, input: Input) -> Step {
    match input {
        Input::Cell(index) => match round.play_move(index) {
            Ok(_) => Step::Moved,
            Err(err) => Step::Rejected(err),
        },
        Input::Again => match round.request_restart() {
            Ok(_) => Step::Restart,
            Err(err) => Step::Rejected(err),
        },
        Input::Board => Step::Say(round.board().to_string()),
        Input::Help => Step::Say(help_text(round)),
        Input::Quit => Step::Quit,
        Input::Nothing => Step::Continue,
        Input::Unknown(text) => Step::Say(format!("Unrecognised input `{text}`. {HELP}")),
    }
}

/// The help line, plus the open cells while the round is active.
fn help_text(round: &GameController<'_>) -> String {
    if round.current_turn().is_none() {
        return HELP.to_string();
    }
    let open = Position::open_on(round.board())
        .into_iter()
        .map(|position| format!("{} ({})", position.to_index() + 1, position.label()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{HELP}\nOpen cells: {open}")
}

/// Player-facing text for a refused input. Cells are numbered from 1 on
/// screen.
pub fn describe_rejection(err: &GameError) -> String {
    match err.kind() {
        GameErrorKind::OutOfRange { .. } => "There is no such cell.".to_string(),
        GameErrorKind::AlreadyClaimed { index } => format!("Cell {} is already taken.", index + 1),
        GameErrorKind::InvalidTransition {
            operation: "play a move",
            ..
        } => "The round is over. Type `again` or `quit`.".to_string(),
        GameErrorKind::InvalidTransition { .. } => err.kind().to_string(),
    }
}

/// Driver messages for JSON displays, tagged the same way as [`GameEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Notice {
    /// An input was refused.
    Rejected {
        /// What a text display would have printed.
        message: String,
    },
    /// The player left; final scores.
    SessionOver(ScoreSnapshot),
}

/// Writes events for the display collaborator.
pub struct Printer<W: Write> {
    out: W,
    format: EventFormat,
}

impl<W: Write> Printer<W> {
    /// Creates a printer writing to `out`.
    pub fn new(out: W, format: EventFormat) -> Self {
        Self { out, format }
    }

    /// Drains and prints the round's queued events.
    pub fn flush(&mut self, round: &mut GameController<'_>) -> Result<()> {
        for event in round.drain_events() {
            self.event(&event)?;
            if matches!(event, GameEvent::CellClaimed { .. }) && self.format == EventFormat::Text {
                writeln!(self.out, "{}", round.board())?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Prints one event.
    pub fn event(&mut self, event: &GameEvent) -> Result<()> {
        match self.format {
            EventFormat::Text => writeln!(self.out, "{event}")?,
            EventFormat::Json => {
                serde_json::to_writer(&mut self.out, event).context("Failed to encode event")?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }

    /// Reports a refused input.
    pub fn reject(&mut self, err: &GameError) -> Result<()> {
        let message = describe_rejection(err);
        match self.format {
            EventFormat::Text => self.say(&message),
            EventFormat::Json => self.notice(&Notice::Rejected { message }),
        }
    }

    /// Reports the scores the session ended with.
    pub fn session_over(&mut self, scores: ScoreSnapshot) -> Result<()> {
        match self.format {
            EventFormat::Text => self.say(&format!("Final score. {scores}")),
            EventFormat::Json => self.notice(&Notice::SessionOver(scores)),
        }
    }

    fn notice(&mut self, notice: &Notice) -> Result<()> {
        serde_json::to_writer(&mut self.out, notice).context("Failed to encode notice")?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    /// Prints a line for the player (text mode only).
    pub fn say(&mut self, text: &str) -> Result<()> {
        if self.format == EventFormat::Text {
            writeln!(self.out, "{text}")?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// How a round ended from the loop's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundExit {
    Again,
    Quit,
}

/// Plays rounds until the player quits or input runs out.
#[instrument(skip_all, fields(tick = ?tick))]
pub async fn run_session<R, W>(
    session: &mut Session,
    tick: Duration,
    input: R,
    printer: &mut Printer<W>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    printer.say(HELP)?;

    loop {
        let mut round = session.new_round();
        let exit = play_round(&mut round, tick, &mut lines, printer).await?;
        drop(round);

        if exit == RoundExit::Quit {
            let scores = session.store().snapshot();
            info!(%scores, rounds = session.rounds_started(), "Session finished");
            printer.session_over(scores)?;
            return Ok(());
        }
    }
}

async fn play_round<R, W>(
    round: &mut GameController<'_>,
    tick: Duration,
    lines: &mut Lines<R>,
    printer: &mut Printer<W>,
) -> Result<RoundExit>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut clock = interval_at(Instant::now() + tick, tick);
    clock.set_missed_tick_behavior(MissedTickBehavior::Delay);

    printer.say(&round.board().to_string())?;
    printer.flush(round)?;

    loop {
        tokio::select! {
            _ = clock.tick(), if round.current_turn().is_some() => {
                round.tick()?;
                printer.flush(round)?;
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    debug!("Input closed");
                    return Ok(RoundExit::Quit);
                };

                match apply_input(round, Input::parse(&line)) {
                    Step::Continue => {}
                    Step::Moved => clock.reset(),
                    Step::Restart => {
                        printer.flush(round)?;
                        return Ok(RoundExit::Again);
                    }
                    Step::Quit => return Ok(RoundExit::Quit),
                    Step::Rejected(err) => printer.reject(&err)?,
                    Step::Say(text) => printer.say(&text)?,
                }
                printer.flush(round)?;
            }
        }
    }
}
