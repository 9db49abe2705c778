//! GameSession - one game from welcome to win or quit.
//!
//! The session owns the [`GameState`] and threads it through the
//! [`Sequencer`] turn by turn, handing every cue to the presenter.

use crate::board::{Board, BoardError};
use crate::config::GameConfig;
use crate::content::MansionContent;
use crate::cue::Cue;
use crate::input::UnrecognizedInput;
use crate::layout::{random_game_number, Mansion};
use crate::narration::NarrationPresenter;
use crate::sequencer::{CueResult, PlayerAction, Sequencer};
use crate::state::GameState;
use log::{debug, error};

pub struct GameSession {
    sequencer: Sequencer,
    state: GameState,
    presenter: Box<dyn NarrationPresenter>,
    turns: usize,
    finished: bool,
}

impl GameSession {
    /// A session on an already generated mansion.
    pub fn new(
        mansion: Mansion,
        content: &MansionContent,
        presenter: Box<dyn NarrationPresenter>,
    ) -> Self {
        let sequencer = Sequencer::new(mansion, content.phrases.clone());
        let state = sequencer.initial_state();
        Self {
            sequencer,
            state,
            presenter,
            turns: 0,
            finished: false,
        }
    }

    /// Generate the mansion named by `config`, or a fresh one.
    pub fn from_config(
        config: &GameConfig,
        content: &MansionContent,
        presenter: Box<dyn NarrationPresenter>,
    ) -> Result<Self, BoardError> {
        let game_number = config.game_number.unwrap_or_else(random_game_number);
        let mansion = Mansion::generate(content, game_number)?;
        Ok(Self::new(mansion, content, presenter))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        self.sequencer.board()
    }

    pub fn game_number(&self) -> u32 {
        self.sequencer.mansion().game_number()
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Present the opening cue.
    pub fn start(&mut self) -> Cue {
        let cue = self.sequencer.start();
        self.present(&cue);
        cue
    }

    /// Play one action and present its cue.
    pub fn act(&mut self, action: PlayerAction) -> CueResult {
        let turn = self.sequencer.next_cue(&self.state, action);
        self.turns += 1;
        self.state = turn.state;
        self.present(turn.result.cue());
        if turn.result.is_terminal() {
            self.finished = true;
        }
        turn.result
    }

    /// Present whatever `cue` held back. Returns false if it held nothing.
    pub fn reveal_held(&mut self, cue: &Cue) -> bool {
        match &cue.held {
            Some(rest) => {
                self.present(rest);
                true
            }
            None => false,
        }
    }

    /// Tell the player their input made no sense.
    pub fn reject(&mut self, input: &UnrecognizedInput) {
        debug!("Rejected input: {input}");
        let cue = self.sequencer.catalog().invalid();
        self.present(&cue);
    }

    fn present(&mut self, cue: &Cue) {
        if let Err(e) = self.presenter.present(cue) {
            error!("Could not present {:?}: {e}", cue.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narration::TextPresenter;
    use crate::testing::SharedBuffer;

    #[test]
    fn test_session_from_config_is_reproducible() {
        let content = MansionContent::builtin().unwrap();
        let config = GameConfig::plain().with_game_number(77);
        let a = GameSession::from_config(&config, &content, Box::new(TextPresenter::new(Vec::new())))
            .unwrap();
        let b = GameSession::from_config(&config, &content, Box::new(TextPresenter::new(Vec::new())))
            .unwrap();
        assert_eq!(a.game_number(), 77);
        for (ra, rb) in a.board().rooms().zip(b.board().rooms()) {
            assert_eq!(ra.furniture, rb.furniture);
        }
    }

    #[test]
    fn test_act_presents_and_tracks_state() {
        let content = MansionContent::builtin().unwrap();
        let out = SharedBuffer::new();
        let mansion = Mansion::generate(&content, 12).unwrap();
        let mut session = GameSession::new(mansion, &content, Box::new(TextPresenter::new(out.clone())));
        session.start();
        assert!(out.contents().contains("Game number 12."));

        let start = session.board().start();
        let (next, name) = session
            .board()
            .rooms()
            .find(|r| !r.locked && session.board().is_adjacent(start, r.id))
            .map(|r| (r.id, r.name.clone()))
            .unwrap();
        session.act(PlayerAction::Move(next));
        assert!(out.contents().contains(&format!("This is the {name}.")));
        assert_eq!(session.state().current_room, next);
        assert_eq!(session.turns(), 1);

        let result = session.act(PlayerAction::Quit);
        assert!(matches!(result, CueResult::Quit(_)));
        assert!(session.is_finished());
    }
}
