//! Scenario tests played on the sample mansion.
//!
//! The sample mansion is a five-room board with one note of each kind:
//! - Foyer: Clock (trapdoor), Sofa (look in the Large Bookcase)
//! - Library: Large Bookcase (clue card), Small Bookcase (guarded clue card)
//! - Kitchen: Oven (the money), Sink (nothing)
//! - Study, locked: Piano (secret)
//! - Attic: Telescope (hint)

use mansion_core::cue::{Clip, CueId};
use mansion_core::narration::{AudioPresenter, NarrationPresenter};
use mansion_core::state::{Pending, MAX_CLUE_CARDS};
use mansion_core::testing::{
    assert_in_room, assert_last_cue, run_script, sample_mansion, FailingSink, SharedBuffer,
    TestHarness,
};
use mansion_core::{
    select_presenter, CueResult, FurnitureId, GameConfig, Mansion, MansionContent, Outcome,
    PlayerAction, Sequencer,
};

// =============================================================================
// MOVEMENT
// =============================================================================

#[test]
fn test_foyer_to_library() {
    let mut harness = TestHarness::new();
    assert_in_room(&harness, "Foyer");

    let result = harness.go("Library").clone();
    assert_in_room(&harness, "Library");
    let library = harness.room("Library");
    assert!(matches!(result, CueResult::Continue(_)));
    assert_eq!(result.cue().id, CueId::Room(library));
    assert_eq!(
        result.cue(),
        &harness.sequencer().catalog().room(harness.sequencer().board(), library, true)
    );
}

#[test]
fn test_foyer_to_attic_is_refused() {
    let mut harness = TestHarness::new();
    let before = harness.state().clone();

    harness.go("Attic");

    assert_eq!(harness.state(), &before);
    assert_last_cue(&harness, CueId::NoSuchMove);
    assert!(harness.last_text().contains("You can't go that way."));
}

#[test]
fn test_locked_study_needs_a_key() {
    let mut harness = TestHarness::new();
    harness.go("Library");
    harness.go("Study");

    let study = harness.room("Study");
    assert_last_cue(&harness, CueId::Locked(study));
    assert_eq!(harness.state().pending, Some(Pending::Key { room: study }));
    assert_in_room(&harness, "Library");

    harness.answer(true);
    assert_in_room(&harness, "Study");
    assert_last_cue(&harness, CueId::Room(study));

    // Once unlocked it stays open.
    harness.go("Library");
    harness.go("Study");
    assert_in_room(&harness, "Study");
}

#[test]
fn test_entry_clue_told_once() {
    let mut harness = TestHarness::new();
    harness.go("Library");
    harness.go("Study");
    harness.answer(true);

    harness.go("Attic");
    assert!(harness.last_text().contains("Fresh footprints"));
    harness.go("Study");
    harness.go("Attic");
    assert!(!harness.last_text().contains("Fresh footprints"));
}

// =============================================================================
// SEARCHING
// =============================================================================

#[test]
fn test_trapdoor_returns_to_entrance() {
    let mut harness = TestHarness::new();
    harness.go("Library");
    harness.go("Foyer");
    harness.search(221);

    assert_last_cue(&harness, CueId::Trapdoor);
    assert!(harness.last_text().contains("Go to the entrance."));
    assert_in_room(&harness, "Foyer");
}

#[test]
fn test_searched_furniture_is_announced_first() {
    let mut harness = TestHarness::new();
    harness.search(121);
    let text = harness.last_text();
    assert!(text.starts_with("121: Sofa"));
    assert!(text.contains("Look in the Large Bookcase for a clue."));
}

#[test]
fn test_clue_card_is_one_shot() {
    let mut harness = TestHarness::new();
    harness.go("Library");
    harness.search(144);
    assert_last_cue(&harness, CueId::ClueFound);
    harness.search(144);
    assert_last_cue(&harness, CueId::NoClue);
    assert_eq!(harness.state().clue_cards, 1);
}

#[test]
fn test_guarded_clue_card_asks_item_then_person() {
    let mut harness = TestHarness::new();
    harness.go("Library");

    harness.search(131);
    assert!(harness.last_text().contains("Do you have the Tape?"));
    harness.answer(true);
    assert!(harness.last_text().contains("Is the Cook with you?"));
    harness.answer(true);
    assert_last_cue(&harness, CueId::ClueFound);
}

#[test]
fn test_no_answer_keeps_the_note() {
    let mut harness = TestHarness::new();
    harness.go("Library");
    harness.search(131);
    harness.answer(false);
    assert_last_cue(&harness, CueId::Sorry);
    assert_eq!(harness.state().clue_cards, 0);

    // The note is still there for a later search.
    harness.search(131);
    assert!(harness.last_text().contains("Do you have the Tape?"));
}

#[test]
fn test_search_declines_pending_question() {
    let mut harness = TestHarness::new();
    harness.go("Library");
    harness.search(131);
    assert!(harness.state().pending.is_some());

    harness.search(144);
    assert_eq!(harness.state().pending, None);
    assert_last_cue(&harness, CueId::ClueFound);
}

#[test]
fn test_lookup_declines_pending_question() {
    let mut harness = TestHarness::new();
    harness.go("Library");
    harness.search(131);

    harness.act(PlayerAction::Lookup("sofa".to_string()));
    assert_last_cue(&harness, CueId::Lookup);
    assert_eq!(harness.state().pending, None);
    harness.answer(true);
    assert_last_cue(&harness, CueId::NothingPending);
}

#[test]
fn test_look_keeps_pending_question() {
    let mut harness = TestHarness::new();
    harness.go("Library");
    harness.search(131);

    harness.act(PlayerAction::Look);
    assert_last_cue(&harness, CueId::Status);
    assert!(matches!(
        harness.state().pending,
        Some(Pending::Asks { furniture: FurnitureId(131), .. })
    ));
    harness.answer(true);
    assert!(harness.last_text().contains("Is the Cook with you?"));
}

#[test]
fn test_help_keeps_pending_question() {
    let mut harness = TestHarness::new();
    harness.go("Library");
    harness.search(131);
    let pending = harness.state().pending.clone();

    harness.act(PlayerAction::Help);
    assert_last_cue(&harness, CueId::Help);
    assert_eq!(harness.state().pending, pending);
    harness.answer(true);
    assert!(harness.last_text().contains("Is the Cook with you?"));
}

#[test]
fn test_hint_can_be_read_again() {
    let mut harness = TestHarness::new();
    harness.search(121);
    assert_last_cue(&harness, CueId::Hint);
    let first = harness.last_text();

    harness.search(121);
    assert_last_cue(&harness, CueId::Hint);
    assert_eq!(harness.last_text(), first);
    assert!(harness.state().spent_notes.is_empty());
}

#[test]
fn test_secret_asks_again_on_every_search() {
    let mut harness = TestHarness::new();
    harness.go("Library");
    harness.go("Study");
    harness.answer(true);
    harness.search(213);
    harness.answer(true);
    assert_last_cue(&harness, CueId::Secret);

    harness.search(213);
    assert!(harness.last_text().contains("Do you have the Letter?"));
    harness.answer(true);
    assert_last_cue(&harness, CueId::Secret);
    assert!(harness.last_text().contains("The money is not in the Attic."));
}

#[test]
fn test_secret_beeps_and_reveals() {
    let mut harness = TestHarness::new();
    harness.go("Library");
    harness.go("Study");
    harness.answer(true);

    harness.search(213);
    assert!(harness.last_text().contains("Do you have the Letter?"));
    let result = harness.answer(true).clone();
    assert_eq!(result.cue().id, CueId::Secret);
    assert!(result.cue().text().contains("***[SECRET MESSAGE]***"));
    assert!(result.cue().text().contains("The money is not in the Attic."));
    let beeps = result
        .cue()
        .clips
        .iter()
        .filter(|c| matches!(c, Clip::Beep { hertz: 900, millis: 175 }))
        .count();
    assert_eq!(beeps, 3);
}

#[test]
fn test_finding_the_money_wins() {
    let mut harness = TestHarness::new();
    harness.go("Kitchen");
    harness.search(134);
    assert!(harness.last_text().contains("Do you have the Map?"));
    harness.answer(true);
    assert!(harness.last_text().contains("Is the Butler with you?"));
    let result = harness.answer(true).clone();

    assert!(matches!(result, CueResult::Solved(_)));
    assert_eq!(result.cue().id, CueId::Win);
    assert!(harness.state().solved);

    // Every later action answers with the win.
    let later = harness.go("Foyer").clone();
    assert!(matches!(later, CueResult::Solved(_)));
    assert_in_room(&harness, "Kitchen");
    assert!(matches!(harness.act(PlayerAction::Quit), CueResult::Quit(_)));
}

#[test]
fn test_repeat_after_the_win_stays_solved() {
    let mut harness = TestHarness::new();
    harness.go("Kitchen");
    harness.search(134);
    harness.answer(true);
    harness.answer(true);
    let state = harness.state().clone();

    let repeated = harness.act(PlayerAction::Repeat).clone();
    assert!(matches!(repeated, CueResult::Solved(_)));
    assert!(repeated.is_terminal());
    assert_eq!(repeated.cue().id, CueId::Win);
    assert_eq!(harness.state(), &state);
}

#[test]
fn test_money_declined_is_not_a_win() {
    let mut harness = TestHarness::new();
    harness.go("Kitchen");
    harness.search(134);
    harness.answer(true);
    harness.answer(false);
    assert!(!harness.state().solved);
    assert_last_cue(&harness, CueId::Sorry);
}

#[test]
fn test_clue_cards_run_out_after_ten() {
    // A real layout hides eleven unguarded clue cards, one more than the box holds.
    let content = MansionContent::builtin().unwrap();
    let mansion = Mansion::generate(&content, 1).unwrap();
    let cards: Vec<FurnitureId> = mansion
        .notes()
        .filter(|(_, note)| note.is_clue_card() && note.asks().is_empty())
        .map(|(id, _)| *id)
        .collect();
    assert!(cards.len() > MAX_CLUE_CARDS as usize);

    // Stand next to each card in turn, skipping the walk there.
    let mut sequencer = Sequencer::new(mansion.clone(), content.phrases.clone());
    let mut state = sequencer.initial_state();
    let mut outcomes = Vec::new();
    for card in &cards {
        state.current_room = mansion.board().room_of(*card).unwrap().id;
        let turn = sequencer.next_cue(&state, PlayerAction::Search(*card));
        state = turn.state;
        outcomes.push(turn.result.cue().id);
    }

    let found = outcomes.iter().filter(|id| **id == CueId::ClueFound).count();
    let take = outcomes.iter().filter(|id| **id == CueId::ClueTake).count();
    assert_eq!(found, MAX_CLUE_CARDS as usize);
    assert_eq!(take, cards.len() - MAX_CLUE_CARDS as usize);
    assert_eq!(outcomes.last(), Some(&CueId::ClueTake));
    assert_eq!(state.clue_cards, MAX_CLUE_CARDS);
}

// =============================================================================
// PRESENTATION
// =============================================================================

#[test]
fn test_audio_unavailable_still_shows_text() {
    let out = SharedBuffer::new();
    let mut presenter = select_presenter(&GameConfig::new().with_audio(true), out.clone());
    let mut harness = TestHarness::new();
    let result = harness.go("Library").clone();

    presenter.present(result.cue()).unwrap();
    assert!(out.contents().contains("This is the Library."));
}

#[test]
fn test_audio_lost_mid_game_degrades_to_text() {
    let out = SharedBuffer::new();
    let mut presenter = AudioPresenter::new(out.clone(), Box::new(FailingSink::unavailable()));
    let mut harness = TestHarness::new();

    let first = harness.go("Library").clone();
    assert!(presenter.present(first.cue()).is_ok());
    let second = harness.search(144).clone();
    assert!(presenter.present(second.cue()).is_ok());

    assert!(!presenter.has_audio());
    assert!(out.contents().contains("You found a clue!"));
}

// =============================================================================
// CONSOLE
// =============================================================================

#[test]
fn test_console_plays_to_a_win() {
    let (outcome, transcript) = run_script(sample_mansion(), "21\n134\ny\ny\n").unwrap();
    assert_eq!(outcome, Outcome::Solved { moves: 1 });
    assert!(transcript.contains("You found the money! You WIN!"));
    assert!(transcript.contains("y/n: "));
}

#[test]
fn test_console_survives_garbage() {
    let (outcome, transcript) = run_script(sample_mansion(), "\n7\n12345\nquit\n").unwrap();
    assert_eq!(outcome, Outcome::Quit);
    assert_eq!(transcript.matches("Invalid value entered.").count(), 2);
    assert!(transcript.contains("Thanks for playing Mystery Mansion!"));
}

#[test]
fn test_console_waits_before_showing_a_secret() {
    let (outcome, transcript) = run_script(sample_mansion(), "13\n31\ny\n213\ny\n\nq\n").unwrap();
    assert_eq!(outcome, Outcome::Quit);
    let banner = transcript.find("***[SECRET MESSAGE]***").unwrap();
    let wait = transcript.find("Press Enter to view.").unwrap();
    let hint = transcript.find("The money is not in the Attic.").unwrap();
    assert!(banner < wait && wait < hint, "{transcript}");
    assert_eq!(transcript.matches("The money is not in the Attic.").count(), 1);
}

#[test]
fn test_console_shows_secret_when_input_ends() {
    let (outcome, transcript) = run_script(sample_mansion(), "13\n31\ny\n213\ny\n").unwrap();
    assert_eq!(outcome, Outcome::Quit);
    assert!(transcript.contains("The money is not in the Attic."));
}

#[test]
fn test_console_lookup_by_name() {
    let (_, transcript) = run_script(sample_mansion(), "bookcase\nq\n").unwrap();
    assert!(transcript.contains("Matching Furniture:"));
    assert!(transcript.contains("131: Small Bookcase"));
    assert!(transcript.contains("144: Large Bookcase"));
}
