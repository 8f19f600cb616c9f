//! Help screen state for the terminal host.

use crate::core::{GameState, PieceSource};
use crate::types::{GameAction, Phase};

/// Whether the help screen is up.
///
/// Opening it mid-game pauses the engine. Closing it resumes only a pause it
/// caused, so a game the player paused first stays paused.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HelpScreen {
    visible: bool,
    paused_game: bool,
}

impl HelpScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    pub fn toggle<R: PieceSource>(&mut self, game: &mut GameState<R>) {
        if self.visible {
            self.close(game);
        } else {
            self.open(game);
        }
    }

    pub fn open<R: PieceSource>(&mut self, game: &mut GameState<R>) {
        if self.visible {
            return;
        }
        self.visible = true;
        self.paused_game = game.phase() == Phase::Playing
            && !game.paused()
            && game.apply_action(GameAction::Pause);
    }

    pub fn close<R: PieceSource>(&mut self, game: &mut GameState<R>) {
        if !self.visible {
            return;
        }
        self.visible = false;
        if self.paused_game && game.paused() {
            game.apply_action(GameAction::Pause);
        }
        self.paused_game = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedSource;
    use crate::types::PieceKind;

    fn playing() -> GameState<ScriptedSource> {
        let mut game = GameState::with_source(ScriptedSource::repeat(PieceKind::T));
        game.start();
        game
    }

    #[test]
    fn help_pauses_and_resumes_a_running_game() {
        let mut game = playing();
        let mut help = HelpScreen::new();

        help.toggle(&mut game);
        assert!(help.is_open());
        assert!(game.paused());
        assert!(!game.update(5.0));

        help.toggle(&mut game);
        assert!(!help.is_open());
        assert!(!game.paused());
    }

    #[test]
    fn help_keeps_a_player_pause() {
        let mut game = playing();
        game.apply_action(GameAction::Pause);
        let mut help = HelpScreen::new();

        help.open(&mut game);
        help.close(&mut game);
        assert!(game.paused());
    }

    #[test]
    fn help_on_start_screen_leaves_the_game_alone() {
        let mut game = GameState::with_source(ScriptedSource::repeat(PieceKind::T));
        let mut help = HelpScreen::new();

        help.open(&mut game);
        help.open(&mut game);
        assert!(help.is_open());
        assert_eq!(game.phase(), Phase::Start);
        assert!(!game.paused());

        help.close(&mut game);
        assert!(!help.is_open());
        assert_eq!(game.phase(), Phase::Start);
    }
}
