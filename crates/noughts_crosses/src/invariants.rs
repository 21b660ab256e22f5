//! Round invariants.
//!
//! Logical properties that hold after every accepted transition. The
//! controller checks them in debug builds; tests can check them directly.

use crate::controller::{GameController, RoundState};
use crate::rules::check_winner;
use crate::types::{Outcome, Side};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        collect(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);
        collect(violations)
    }
}

impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);
        check::<S, I4>(state, &mut violations);
        collect(violations)
    }
}

/// Invariant: claimed cells equal moves played.
pub struct MovesMatchBoard;

impl<'s> Invariant<GameController<'s>> for MovesMatchBoard {
    fn holds(round: &GameController<'s>) -> bool {
        round.board.claimed_count() == round.moves_played
    }

    fn description() -> &'static str {
        "Claimed cells equal moves played"
    }
}

/// Invariant: sides alternate, so their mark counts differ by at most one.
pub struct MarksBalanced;

impl<'s> Invariant<GameController<'s>> for MarksBalanced {
    fn holds(round: &GameController<'s>) -> bool {
        let noughts = round.board.count_for(Side::Nought);
        let crosses = round.board.count_for(Side::Cross);
        noughts.abs_diff(crosses) <= 1
    }

    fn description() -> &'static str {
        "Nought and cross counts differ by at most one"
    }
}

/// Invariant: an active round has a live clock owned by the side to move;
/// an ended round has none.
pub struct ClockFollowsTurn;

impl<'s> Invariant<GameController<'s>> for ClockFollowsTurn {
    fn holds(round: &GameController<'s>) -> bool {
        match round.state {
            RoundState::Active(turn) => round
                .timer
                .state()
                .is_some_and(|clock| *clock.active() && *clock.owning_turn() == turn),
            RoundState::Ended(_) => !round.timer.is_active(),
        }
    }

    fn description() -> &'static str {
        "Clock runs for the side to move and only while the round is active"
    }
}

/// Invariant: a completed line ends the round, and the side holding it won.
///
/// A forfeit can end the round with no line on the board, so only the
/// active case and line-backed wins are checked.
pub struct LineEndsRound;

impl<'s> Invariant<GameController<'s>> for LineEndsRound {
    fn holds(round: &GameController<'s>) -> bool {
        match (round.state, check_winner(&round.board)) {
            (_, None) => true,
            (RoundState::Active(_), Some(_)) => false,
            (RoundState::Ended(Outcome::Winner(winner)), Some(holder)) => winner == holder,
            (RoundState::Ended(Outcome::Draw), Some(_)) => false,
        }
    }

    fn description() -> &'static str {
        "A completed line ends the round in its holder's favour"
    }
}

/// Every invariant a round maintains.
pub type ControllerInvariants = (
    MovesMatchBoard,
    MarksBalanced,
    ClockFollowsTurn,
    LineEndsRound,
);
