//! Expiries that arrive after their countdown was replaced must be ignored.

use noughts_crosses::{
    Expiry, GameController, GameErrorKind, ScoreStore, Side, TimerConfig, TimerSignal, TurnTimer,
};

/// Runs a standalone countdown for `side` to zero, `restarts` extra times
/// first, so the expiry carries a chosen generation.
fn expiry_for(side: Side, restarts: usize) -> Expiry {
    let mut timer = TurnTimer::new(TimerConfig::default());
    for _ in 0..restarts {
        timer.start(side);
    }
    timer.start(side);
    (0..10)
        .flat_map(|_| timer.tick())
        .find_map(|signal| match signal {
            TimerSignal::Expired(expiry) => Some(expiry),
            _ => None,
        })
        .expect("countdown runs out")
}

fn assert_rejected_without_change(round: &mut GameController<'_>, expiry: Expiry) {
    let board = round.board().clone();
    let state = round.state();
    let moves = round.moves_played();
    let clock = round.timer().state().copied();
    let generation = round.timer().generation();
    let scores = round.store().snapshot();
    round.drain_events();

    let err = round.on_timer_expired(expiry).unwrap_err();
    assert!(
        matches!(err.kind(), GameErrorKind::InvalidTransition { .. }),
        "unexpected error: {err}"
    );

    assert_eq!(round.board(), &board);
    assert_eq!(round.state(), state);
    assert_eq!(round.moves_played(), moves);
    assert_eq!(round.timer().state().copied(), clock);
    assert_eq!(round.timer().generation(), generation);
    assert_eq!(round.store().snapshot(), scores);
    assert!(round.pending_events().is_empty());
}

#[test]
fn test_expiry_for_previous_turn_rejected() {
    let mut store = ScoreStore::new();
    let mut round =
        GameController::new(&mut store, TimerConfig::default()).expect("valid config");
    let noughts_clock = expiry_for(Side::Nought, 0);

    round.play_move(4).expect("legal move");
    assert_eq!(round.current_turn(), Some(Side::Cross));
    assert_rejected_without_change(&mut round, noughts_clock);
}

#[test]
fn test_expiry_from_same_side_earlier_turn_rejected() {
    let mut store = ScoreStore::new();
    let mut round =
        GameController::new(&mut store, TimerConfig::default()).expect("valid config");
    let first_turn = expiry_for(Side::Nought, 0);

    round.play_move(4).expect("legal move");
    round.play_move(0).expect("legal move");
    assert_eq!(round.current_turn(), Some(Side::Nought));
    assert_rejected_without_change(&mut round, first_turn);
}

#[test]
fn test_expiry_while_clock_still_running_rejected() {
    let mut store = ScoreStore::new();
    let mut round =
        GameController::new(&mut store, TimerConfig::default()).expect("valid config");
    round.tick().expect("tick");

    // Same side and generation as the live clock, but the live clock has
    // time left.
    let lookalike = expiry_for(Side::Nought, 0);
    assert_eq!(*lookalike.generation(), round.timer().generation());
    assert_rejected_without_change(&mut round, lookalike);
}

#[test]
fn test_expiry_after_round_ended_rejected() {
    let mut store = ScoreStore::new();
    let mut round =
        GameController::new(&mut store, TimerConfig::default()).expect("valid config");
    for cell in [0, 3, 1, 4, 2] {
        round.play_move(cell).expect("legal move");
    }
    for restarts in 0..6 {
        assert_rejected_without_change(&mut round, expiry_for(Side::Cross, restarts));
        assert_rejected_without_change(&mut round, expiry_for(Side::Nought, restarts));
    }
    drop(round);
    assert_eq!(*store.nought_points(), 1);
    assert_eq!(*store.cross_points(), 0);
}
