//! Persistence tests: best-score file and JSONL journal fed by a real session.

use std::path::PathBuf;

use neon_tetris::core::{Board, GameState, ScriptedSource};
use neon_tetris::store::{BestScoreStore, EventJournal, JournalRecord, SessionTotals};
use neon_tetris::types::{GameAction, PieceKind};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("neon_tetris_{}_{}", std::process::id(), name))
}

fn totals<R: neon_tetris::core::PieceSource>(game: &GameState<R>) -> SessionTotals {
    SessionTotals {
        session_id: game.session_id(),
        score: game.score(),
        lines: game.lines(),
        level: game.level(),
    }
}

#[test]
fn best_score_survives_a_new_process() {
    let path = temp_path("best.dat");
    let _ = std::fs::remove_file(&path);
    let store = BestScoreStore::new(&path);
    assert_eq!(store.load(), 0);

    let board = Board::from_rows(&["III....III"]);
    let mut game = GameState::with_source(ScriptedSource::repeat(PieceKind::I))
        .with_board(board)
        .with_best_score(store.load());
    game.start();
    game.apply_action(GameAction::HardDrop);

    let events = game.take_events();
    assert!(events.new_best);
    store.save(game.best_score());

    // Next run picks the record up again.
    let reloaded = BestScoreStore::new(&path);
    let next = GameState::new(1).with_best_score(reloaded.load());
    assert_eq!(next.best_score(), 1);
    let _ = std::fs::remove_file(path);
}

#[test]
fn best_score_recorded_after_restart_drops_events() {
    let path = temp_path("best_restart.dat");
    let _ = std::fs::remove_file(&path);
    let mut store = BestScoreStore::open(&path);
    assert_eq!(store.recorded(), 0);

    let board = Board::from_rows(&["III....III"]);
    let mut game = GameState::with_source(ScriptedSource::repeat(PieceKind::I))
        .with_board(board)
        .with_best_score(store.recorded());
    game.start();
    game.apply_action(GameAction::HardDrop);
    assert_eq!(game.best_score(), 1);

    // Restart before anyone read the new-best event.
    game.apply_action(GameAction::Restart);
    assert!(game.take_events().is_empty());

    assert!(store.record(game.best_score()));
    assert!(!store.record(game.best_score()));
    assert_eq!(BestScoreStore::open(&path).recorded(), 1);
    let _ = std::fs::remove_file(path);
}

#[test]
fn malformed_best_score_counts_as_zero() {
    let path = temp_path("garbage.dat");
    std::fs::write(&path, "not a number").unwrap();
    let store = BestScoreStore::new(&path);
    assert_eq!(store.load(), 0);
    assert!(store.try_load().is_err());

    std::fs::write(&path, "  321\n").unwrap();
    assert_eq!(store.load(), 321);
    let _ = std::fs::remove_file(path);
}

#[test]
fn journal_records_a_whole_session() {
    let path = temp_path("journal.jsonl");
    let _ = std::fs::remove_file(&path);

    let mut game = GameState::with_source(ScriptedSource::repeat(PieceKind::O));
    {
        let mut journal = EventJournal::open(&path).unwrap();
        journal.record(&JournalRecord::SessionStart {
            session_id: game.session_id(),
            seed: 0,
            randomizer: "scripted",
            best_score: game.best_score(),
        });
        game.start();
        while !game.game_over() {
            game.apply_action(GameAction::HardDrop);
            let events = game.take_events();
            journal.record_events(&events, totals(&game));
        }
        assert_eq!(journal.written(), 13);
    }

    let text = std::fs::read_to_string(&path).unwrap();
    let records: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(records.len(), 13);
    assert_eq!(records[0]["type"], "session_start");
    assert!(records[1..12]
        .iter()
        .all(|r| r["type"] == "lock" && r["kind"] == "o" && r["lines_cleared"] == 0));
    assert_eq!(records[12]["type"], "game_over");
    assert_eq!(records[12]["score"], 0);
    let _ = std::fs::remove_file(path);
}
