//! Terminal Tetris runner (default binary).
//!
//! Uses crossterm for input and a framebuffer-based renderer. The simulation
//! runs on a fixed 16ms step; input is polled until the next step is due.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use neon_tetris::core::{GameSnapshot, GameState};
use neon_tetris::input::{handle_key_event, is_help_key, should_quit, InputHandler, KEY_BINDINGS};
use neon_tetris::store::{BestScoreStore, EventJournal, JournalRecord, SessionTotals};
use neon_tetris::term::{FrameBuffer, GameView, Notices, TerminalRenderer, Viewport};
use neon_tetris::types::{GameAction, Phase, TICK_MS};
use neon_tetris::{AppConfig, HelpScreen};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    let store = BestScoreStore::open(&config.best_score_path);
    let best = store.recorded();

    let journal = match &config.log_path {
        Some(path) => EventJournal::open(path).unwrap_or_else(|e| {
            eprintln!("[Tetris] Event journal disabled: {e:#}");
            EventJournal::disabled()
        }),
        None => EventJournal::disabled(),
    };

    let mut app = App {
        game: config.build_game(best),
        input: InputHandler::new(),
        notices: Notices::new(),
        help: HelpScreen::new(),
        journal,
        store,
        config,
    };
    app.record_session_start();

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = app.run(&mut term);
    // Always try to restore terminal state.
    let _ = term.exit();

    // Persist the record even when the loop ended on an error.
    app.drain_events();
    app.store.record(app.game.best_score());
    app.journal.flush();
    result?;

    println!(
        "[Tetris] Final score {} | lines {} | level {} | best {}",
        app.game.score(),
        app.game.lines(),
        app.game.level(),
        app.game.best_score()
    );
    Ok(())
}

struct App {
    game: GameState,
    input: InputHandler,
    notices: Notices,
    help: HelpScreen,
    journal: EventJournal,
    store: BestScoreStore,
    config: AppConfig,
}

impl App {
    fn run(&mut self, term: &mut TerminalRenderer) -> Result<()> {
        let view = GameView::default();
        let mut fb = FrameBuffer::new(0, 0);
        let mut snap = GameSnapshot::default();

        let tick_duration = Duration::from_millis(TICK_MS as u64);
        let mut last_tick = Instant::now();

        loop {
            // Render.
            let viewport = term.viewport().unwrap_or(Viewport::new(80, 24));
            self.game.snapshot_into(&mut snap);
            view.render_into(&snap, &self.notices, viewport, &mut fb);
            if self.help.is_open() {
                view.draw_help(&mut fb, viewport, KEY_BINDINGS);
            }
            term.draw_swap(&mut fb)?;

            // Input with timeout until next tick.
            let timeout = tick_duration.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => match key.kind {
                        KeyEventKind::Press => {
                            if should_quit(key) {
                                return Ok(());
                            }
                            let close = self.help.is_open() && key.code == KeyCode::Esc;
                            if is_help_key(key) || close {
                                self.help.toggle(&mut self.game);
                                self.input.reset();
                            } else if !self.help.is_open() {
                                self.handle_press(key);
                            }
                        }
                        KeyEventKind::Repeat if !self.help.is_open() => {
                            // Keeps a held key alive; DAS/ARR produces the repeats.
                            let _ = self.input.handle_key_press(key);
                        }
                        KeyEventKind::Repeat => {}
                        KeyEventKind::Release => self.input.handle_key_release(key),
                    },
                    Event::Resize(_, _) => term.invalidate(),
                    _ => {}
                }
            }

            // Tick.
            let elapsed = last_tick.elapsed();
            if elapsed >= tick_duration {
                last_tick = Instant::now();
                self.step(elapsed.as_secs_f32());
            }
        }
    }

    fn handle_press(&mut self, key: KeyEvent) {
        let session = self.game.session_id();

        if let Some(action) = self.input.handle_key_press(key) {
            self.game.apply_action(action);
        } else if let Some(action) = handle_key_event(key) {
            match action {
                // Held movement: repeats come from the DAS/ARR handler.
                GameAction::MoveLeft | GameAction::MoveRight | GameAction::SoftDrop => {}
                GameAction::HardDrop if self.game.phase() == Phase::Start => {
                    self.game.apply_action(GameAction::Start);
                }
                _ => {
                    self.game.apply_action(action);
                }
            }
        }

        // Drain now; a following restart would discard them.
        self.drain_events();

        if self.game.session_id() != session {
            self.input.reset();
            self.notices.clear();
            self.record_session_start();
        }
        if self.game.paused() {
            self.input.reset();
        }
    }

    fn step(&mut self, dt_s: f32) {
        if self.game.phase() == Phase::Playing && !self.game.paused() {
            for action in self.input.update(dt_s) {
                self.game.apply_action(action);
            }
        } else {
            self.input.reset();
        }

        self.game.update(dt_s);
        self.notices.update(dt_s);
        self.drain_events();
    }

    /// Route engine events to notices, the best-score file and the journal.
    fn drain_events(&mut self) {
        let events = self.game.take_events();
        if events.is_empty() {
            return;
        }
        self.notices.push_events(&events, self.game.session_id());
        if events.new_best {
            self.store.record(self.game.best_score());
        }
        self.journal.record_events(
            &events,
            SessionTotals {
                session_id: self.game.session_id(),
                score: self.game.score(),
                lines: self.game.lines(),
                level: self.game.level(),
            },
        );
    }

    fn record_session_start(&mut self) {
        self.journal.record(&JournalRecord::SessionStart {
            session_id: self.game.session_id(),
            seed: self.config.seed,
            randomizer: self.config.randomizer.as_str(),
            best_score: self.game.best_score(),
        });
    }
}
