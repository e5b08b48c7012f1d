//! EngineClient against small scripted UCI engines run through `sh`.
#![cfg(unix)]

use std::path::Path;
use std::time::{Duration, Instant};

use cozy_chess::{util::parse_uci_move, Board};
use evaluation::{EngineClient, EngineSettings, Evaluation, EvaluationError, Evaluator};

const SLICE: Duration = Duration::from_millis(30);

/// Answers every search with a fixed score and e2e4.
const STEADY: &str = r#"
while read -r line; do
  case "$line" in
    uci) echo "id name Steady"; echo "uciok" ;;
    isready) echo "readyok" ;;
    go*) echo "info depth 1 score cp 17 pv e2e4"; echo "bestmove e2e4" ;;
    quit) exit 0 ;;
  esac
done
"#;

/// Writes the last go command to $1 and plays d2d4.
const RECORDER: &str = r#"
while read -r line; do
  case "$line" in
    uci) echo "uciok" ;;
    isready) echo "readyok" ;;
    go*) echo "$line" > "$1"; echo "info depth 1 score cp 1"; echo "bestmove d2d4" ;;
    quit) exit 0 ;;
  esac
done
"#;

/// Dies on its first search; later processes (marker file present) answer.
const CRASH_ONCE: &str = r#"
while read -r line; do
  case "$line" in
    uci) echo "uciok" ;;
    isready) echo "readyok" ;;
    go*)
      if [ -f "$1" ]; then
        echo "info depth 3 score mate 2"; echo "bestmove e2e4"
      else
        : > "$1"; exit 1
      fi ;;
    quit) exit 0 ;;
  esac
done
"#;

/// Logs every start to $1 and dies on every search.
const ALWAYS_CRASH: &str = r#"
echo start >> "$1"
while read -r line; do
  case "$line" in
    uci) echo "uciok" ;;
    isready) echo "readyok" ;;
    go*) exit 1 ;;
    quit) exit 0 ;;
  esac
done
"#;

/// Never answers a search.
const SILENT: &str = r#"
while read -r line; do
  case "$line" in
    uci) echo "uciok" ;;
    isready) echo "readyok" ;;
    quit) exit 0 ;;
  esac
done
"#;

/// Answers with the given bestmove line and no score.
fn bare_bestmove(mv: &str) -> String {
    format!(
        r#"
while read -r line; do
  case "$line" in
    uci) echo "uciok" ;;
    isready) echo "readyok" ;;
    go*) echo "bestmove {}" ;;
    quit) exit 0 ;;
  esac
done
"#,
        mv
    )
}

fn settings(script: &str, arg: Option<&Path>) -> EngineSettings {
    let mut settings = EngineSettings::new("sh");
    settings.args = vec!["-c".to_string(), script.to_string(), "fake-engine".to_string()];
    if let Some(arg) = arg {
        settings.args.push(arg.display().to_string());
    }
    settings.grace = Duration::from_millis(200);
    settings.handshake_timeout = Duration::from_secs(5);
    settings
}

fn client(script: &str, arg: Option<&Path>) -> EngineClient {
    EngineClient::spawn(settings(script, arg)).unwrap()
}

#[test]
fn evaluate_reads_last_score() {
    let client = client(STEADY, None);

    let score = client.evaluate(&Board::default(), SLICE).unwrap();

    assert_eq!(score, Evaluation::centipawns(17));
    assert_eq!(client.round_trips(), 1);
}

#[test]
fn best_move_parses_engine_choice() {
    let client = client(STEADY, None);
    let board = Board::default();

    let best = client.best_move(&board, SLICE, None).unwrap();

    assert_eq!(best.mv, parse_uci_move(&board, "e2e4").unwrap());
    assert_eq!(best.evaluation, Some(Evaluation::centipawns(17)));
}

#[test]
fn best_move_forwards_restriction() {
    let dir = tempfile::tempdir().unwrap();
    let record = dir.path().join("go.txt");
    let client = client(RECORDER, Some(record.as_path()));
    let board = Board::default();
    let only = [parse_uci_move(&board, "d2d4").unwrap()];

    let best = client.best_move(&board, SLICE, Some(&only[..])).unwrap();

    assert_eq!(best.mv, only[0]);
    let go = std::fs::read_to_string(&record).unwrap();
    assert_eq!(go.trim(), "go searchmoves d2d4 movetime 30");
}

#[test]
fn terminal_positions_are_answered_locally() {
    let client = client(STEADY, None);
    let mated: Board = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
        .parse()
        .unwrap();
    let stalemate: Board = "k7/8/1Q6/8/8/8/8/7K b - - 0 1".parse().unwrap();

    assert_eq!(client.evaluate(&mated, SLICE).unwrap(), Evaluation::mated());
    assert_eq!(client.evaluate(&stalemate, SLICE).unwrap(), Evaluation::DRAW);
    assert_eq!(client.round_trips(), 0);
}

#[test]
fn zero_slice_is_rejected() {
    let client = client(STEADY, None);

    let result = client.evaluate(&Board::default(), Duration::from_micros(900));

    assert!(matches!(result, Err(EvaluationError::ZeroSlice)));
    assert_eq!(client.round_trips(), 0);
}

#[test]
fn restarts_once_after_crash() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("crashed");
    let client = client(CRASH_ONCE, Some(marker.as_path()));

    let score = client.evaluate(&Board::default(), SLICE).unwrap();

    assert_eq!(score, Evaluation::mate_in(2));
    // The restarted session is kept for later calls.
    assert_eq!(client.evaluate(&Board::default(), SLICE).unwrap(), score);
}

#[test]
fn gives_up_after_one_restart() {
    let dir = tempfile::tempdir().unwrap();
    let starts = dir.path().join("starts");
    let client = client(ALWAYS_CRASH, Some(starts.as_path()));

    let result = client.evaluate(&Board::default(), SLICE);

    assert!(matches!(result, Err(ref e) if e.is_disconnect()));
    let started = std::fs::read_to_string(&starts).unwrap();
    assert_eq!(started.lines().count(), 2);
}

#[test]
fn overrun_times_out() {
    let client = client(SILENT, None);

    let start = Instant::now();
    let result = client.evaluate(&Board::default(), SLICE);

    assert!(matches!(result, Err(EvaluationError::Timeout)));
    assert!(start.elapsed() < Duration::from_secs(3));
}

#[test]
fn missing_score_is_malformed() {
    let client = client(&bare_bestmove("e2e4"), None);

    let result = client.evaluate(&Board::default(), SLICE);

    assert!(matches!(result, Err(EvaluationError::Malformed(_))));
}

#[test]
fn illegal_bestmove_is_malformed() {
    let client = client(&bare_bestmove("e2e5"), None);

    let result = client.best_move(&Board::default(), SLICE, None);

    assert!(matches!(result, Err(EvaluationError::Malformed(_))));
}

#[test]
fn close_is_idempotent_and_final() {
    let client = client(STEADY, None);

    client.close();
    client.close();

    let result = client.evaluate(&Board::default(), SLICE);
    assert!(matches!(result, Err(EvaluationError::Closed)));
}

#[test]
fn missing_engine_fails_to_spawn() {
    let result = EngineClient::spawn(EngineSettings::new("/nonexistent/engine-binary"));

    assert!(matches!(result, Err(EvaluationError::Spawn { .. })));
}
