//! Input parsing and scripted sessions.

use noughts_cli::{
    EventFormat, Input, Notice, Printer, Step, apply_input, describe_rejection, run_session,
};
use noughts_crosses::{
    GameController, GameEvent, GameStatus, ScoreSnapshot, ScoreStore, Session, Side, TimerConfig,
};
use std::time::Duration;
use tokio::io::BufReader;

/// Long enough that no tick fires during a scripted test.
const NEVER: Duration = Duration::from_secs(3600);

async fn play_script(script: &str, format: EventFormat) -> (Session, String) {
    let mut session = Session::new(TimerConfig::default()).expect("valid config");
    let mut printer = Printer::new(Vec::new(), format);
    run_session(&mut session, NEVER, BufReader::new(script.as_bytes()), &mut printer)
        .await
        .expect("session runs");
    let output = String::from_utf8(printer.into_inner()).expect("utf-8 output");
    (session, output)
}

/// Splits JSON output into engine events and driver notices.
fn parse_json_lines(output: &str) -> (Vec<GameEvent>, Vec<Notice>) {
    let mut events = Vec::new();
    let mut notices = Vec::new();
    for line in output.lines() {
        match serde_json::from_str::<GameEvent>(line) {
            Ok(event) => events.push(event),
            Err(_) => notices.push(
                serde_json::from_str(line).expect("every line is an event or a notice"),
            ),
        }
    }
    (events, notices)
}

#[test]
fn test_input_parsing() {
    assert_eq!(Input::parse("5"), Input::Cell(4));
    assert_eq!(Input::parse("  top-left "), Input::Cell(0));
    assert_eq!(Input::parse("AGAIN"), Input::Again);
    assert_eq!(Input::parse("q"), Input::Quit);
    assert_eq!(Input::parse(""), Input::Nothing);
    assert_eq!(Input::parse("0"), Input::Unknown("0".to_string()));
    assert_eq!(Input::parse("sideways"), Input::Unknown("sideways".to_string()));
}

#[test]
fn test_apply_input_reports_rejections() {
    let mut store = ScoreStore::new();
    let mut round =
        GameController::new(&mut store, TimerConfig::default()).expect("valid config");

    assert!(matches!(apply_input(&mut round, Input::Cell(4)), Step::Moved));
    match apply_input(&mut round, Input::Cell(4)) {
        Step::Rejected(err) => assert_eq!(describe_rejection(&err), "Cell 5 is already taken."),
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(matches!(apply_input(&mut round, Input::Again), Step::Rejected(_)));
    assert_eq!(round.current_turn(), Some(Side::Cross));
}

#[test]
fn test_help_lists_open_cells() {
    let mut store = ScoreStore::new();
    let mut round =
        GameController::new(&mut store, TimerConfig::default()).expect("valid config");
    round.play_move(4).expect("legal move");

    let Step::Say(text) = apply_input(&mut round, Input::Help) else {
        panic!("help should print a line");
    };
    assert!(text.contains("Open cells: 1 (Top-left), 2 (Top-center)"));
    assert!(!text.contains("5 (Center)"));

    for cell in [0, 3, 1, 6, 2] {
        round.play_move(cell).expect("legal move");
    }
    let Step::Say(text) = apply_input(&mut round, Input::Help) else {
        panic!("help should print a line");
    };
    assert!(!text.contains("Open cells"));
}

#[tokio::test]
async fn test_text_session_win_then_quit() {
    let (session, output) = play_script("1\n4\n2\n5\n3\n9\nquit\n", EventFormat::Text).await;

    assert!(output.contains("Nought's Turn..."));
    assert!(output.contains("Cross's Turn..."));
    assert!(output.contains("Noughts Win!!"));
    assert!(output.contains("The round is over."));
    assert!(output.contains("Final score. Noughts: 1  Crosses: 0"));
    assert_eq!(session.rounds_started(), 1);
}

#[tokio::test]
async fn test_again_opens_round_for_other_side() {
    let (session, output) =
        play_script("1\n4\n2\n5\n3\nagain\n1\n4\n2\n5\n3\n", EventFormat::Text).await;

    assert_eq!(session.rounds_started(), 2);
    assert!(output.contains("New round, Crosses go first"));
    assert!(output.contains("Crosses Win!!"));
    assert_eq!(*session.store().nought_points(), 1);
    assert_eq!(*session.store().cross_points(), 1);
}

#[tokio::test]
async fn test_json_session_emits_one_event_per_line() {
    let (_, output) = play_script("5\nhelp\n1\n", EventFormat::Json).await;

    let (events, notices) = parse_json_lines(&output);
    assert_eq!(
        notices,
        vec![Notice::SessionOver(ScoreSnapshot { nought_points: 0, cross_points: 0 })]
    );

    assert_eq!(events[0], GameEvent::Status("Nought's Turn...".to_string()));
    assert!(events.contains(&GameEvent::CellClaimed { index: 4, side: Side::Nought }));
    assert!(events.contains(&GameEvent::CellClaimed { index: 0, side: Side::Cross }));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::RoundOver(_))));
}

#[tokio::test]
async fn test_json_session_reports_rejections_and_final_score() {
    // 12 is not a cell; it gets help text, which JSON mode does not print.
    let script = "5\n5\n12\n1\n4\n2\n6\n3\nquit\n";
    let (_, output) = play_script(script, EventFormat::Json).await;

    let (events, notices) = parse_json_lines(&output);
    assert!(events.contains(&GameEvent::Status("Noughts Win!!".to_string())));
    assert_eq!(
        notices,
        vec![
            Notice::Rejected { message: "Cell 5 is already taken.".to_string() },
            Notice::Rejected {
                message: "The round is over. Type `again` or `quit`.".to_string()
            },
            Notice::SessionOver(ScoreSnapshot { nought_points: 1, cross_points: 0 }),
        ]
    );
}

#[tokio::test]
async fn test_clock_ticks_forfeit_idle_player() {
    let mut session = Session::new(
        TimerConfig::default()
            .with_turn_seconds(2)
            .with_hurry_threshold(1),
    )
    .expect("valid config");
    let mut printer = Printer::new(Vec::new(), EventFormat::Json);

    // Input never ends on its own; stop once the round is decided.
    let (mut writer, reader) = tokio::io::duplex(64);
    let script = async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        use tokio::io::AsyncWriteExt;
        writer.write_all(b"quit\n").await.expect("write quit");
        writer
    };
    let (result, _writer) = tokio::join!(
        run_session(
            &mut session,
            Duration::from_millis(20),
            BufReader::new(reader),
            &mut printer,
        ),
        script,
    );
    result.expect("session runs");

    let output = String::from_utf8(printer.into_inner()).expect("utf-8");
    let (events, _) = parse_json_lines(&output);
    assert!(events.contains(&GameEvent::Hurry { side: Side::Nought, remaining: 1 }));
    assert!(events.contains(&GameEvent::Status("Noughts took too long".to_string())));
    assert_eq!(
        events.iter().rev().find_map(|e| match e {
            GameEvent::RoundOver(outcome) => Some(outcome.status()),
            _ => None,
        }),
        Some(GameStatus::CrossWon)
    );
    assert_eq!(*session.store().cross_points(), 1);
}
