//! End-to-end editing sessions driven through the tracker with the built-in detectors.

use nudge_keymap::KeybindingTable;
use nudge_patterns::commands;
use nudge_patterns::{PatternId, PatternMatch, PatternsConfig, SubPattern};
use nudge_primitives::{DocumentId, ManualClock, Position, Range, Rope, Selection, Timestamp, UriScheme};
use nudge_tracker::{ActiveEditor, EditorActionTracker, HostEvent, TextChange, TrackerConfig};
use pretty_assertions::assert_eq;

const DOC: DocumentId = DocumentId(1);

/// A single file editor: edits are applied to the rope first, then reported.
struct Session {
	tracker: EditorActionTracker<Vec<PatternMatch>, KeybindingTable, ManualClock>,
	clock: ManualClock,
	doc: Rope,
}

impl Session {
	fn new(text: &str) -> Self {
		let clock = ManualClock::new(0);
		let mut keys = KeybindingTable::new();
		keys.insert(commands::DELETE_LINES, "ctrl+shift+k");
		keys.insert(commands::MOVE_LINES_DOWN, "alt+down");
		let mut tracker = EditorActionTracker::with_default_patterns(TrackerConfig::default(), &PatternsConfig::default(), Vec::<PatternMatch>::new(), keys, clock.clone());
		tracker.start();
		tracker.dispatch::<Rope>(HostEvent::ActiveEditorChanged(Some(ActiveEditor {
			document: DOC,
			scheme: UriScheme::File,
		})));
		Self {
			tracker,
			clock,
			doc: Rope::from_str(text),
		}
	}

	fn at(&mut self, now: Timestamp) -> &mut Self {
		self.clock.set(now);
		self
	}

	fn char_idx(&self, pos: Position) -> usize {
		self.doc.line_to_char(pos.line) + pos.character
	}

	fn change(&mut self, change: TextChange) {
		self.tracker.dispatch(HostEvent::TextChanged {
			document: DOC,
			scheme: UriScheme::File,
			snapshot: self.doc.clone(),
			changes: vec![change],
			reason: None,
		});
	}

	fn delete(&mut self, range: Range) {
		let (from, to) = (self.char_idx(range.start), self.char_idx(range.end));
		let removed = self.doc.slice(from..to).to_string();
		self.doc.remove(from..to);
		self.change(TextChange::delete(range, to - from).with_removed_text(removed));
	}

	fn backspace(&mut self, line: usize, character: usize) {
		self.delete(Range::on_line(line, character - 1, character));
	}

	fn insert(&mut self, at: Position, text: &str) {
		let idx = self.char_idx(at);
		self.doc.insert(idx, text);
		self.change(TextChange::insert(Range::point(at), text));
	}

	fn select(&mut self, line: usize, anchor: usize, active: usize) {
		self.tracker.dispatch(HostEvent::SelectionChanged {
			document: DOC,
			scheme: UriScheme::File,
			snapshot: self.doc.clone(),
			selections: vec![Selection::new(Position::new(line, anchor), Position::new(line, active))],
		});
	}

	fn cursor(&mut self, line: usize, character: usize) {
		self.select(line, character, character);
	}

	fn command(&mut self, command: &str) {
		self.tracker.dispatch::<Rope>(HostEvent::CommandExecuted { command: command.to_owned() });
	}

	fn matches_for(&self, id: PatternId) -> Vec<&PatternMatch> {
		self.tracker.notifier().iter().filter(|found| found.pattern_id == id).collect()
	}
}

#[test]
fn backspacing_a_whole_line() {
	let mut session = Session::new("hello\nworld\n");
	for (i, col) in (1..=5).rev().enumerate() {
		session.at(i as u64 * 50).backspace(0, col);
	}

	let found = session.matches_for(PatternId::LineDeleteBackspace);
	assert_eq!(found.len(), 1);
	assert_eq!(found[0].sub_pattern_id, Some(SubPattern::CharByChar));
	assert_eq!(found[0].suggested_command, commands::DELETE_LINES);
	assert!(found[0].message.contains("Ctrl+Shift+K"), "{}", found[0].message);
	assert_eq!(session.tracker.state().len(), 5);
}

#[test]
fn delete_lines_command_supersedes_backspacing() {
	let mut session = Session::new("hello\nworld\n");
	for (i, col) in (2..=5).rev().enumerate() {
		session.at(i as u64 * 50).backspace(0, col);
	}
	session.at(180).command(commands::DELETE_LINES);
	session.at(200).backspace(0, 1);

	assert!(session.matches_for(PatternId::LineDeleteBackspace).is_empty());
}

#[test]
fn arrowing_through_a_word() {
	let mut session = Session::new("hello world example text\n");
	session.at(0).cursor(0, 14);
	for (i, col) in (15..=19).enumerate() {
		session.at((i as u64 + 1) * 100).cursor(0, col);
	}

	let found = session.matches_for(PatternId::ArrowNavigation);
	assert_eq!(found.len(), 1);
	assert_eq!(found[0].sub_pattern_id, Some(SubPattern::WordTraversal));
	assert_eq!(found[0].suggested_command, commands::CURSOR_WORD_RIGHT);
}

#[test]
fn mouse_clicks_do_not_count_as_arrow_steps() {
	let mut session = Session::new("hello world example text\n");
	session.at(0).cursor(0, 14);
	for (i, col) in (15..=19).enumerate() {
		let t = (i as u64 + 1) * 100;
		session.at(t - 20).tracker.notify_mouse_pressed();
		session.at(t - 10).tracker.notify_mouse_released();
		session.at(t).cursor(0, col);
	}

	assert!(session.tracker.notifier().is_empty());
	assert_eq!(session.tracker.state().len(), 1);
}

#[test]
fn cutting_and_pasting_a_block_one_line_down() {
	let mut session = Session::new("a\nline b\nline c\nd\ne\n");
	session.at(0).delete(Range::new(Position::new(1, 0), Position::new(3, 0)));
	session.at(300).insert(Position::new(2, 0), "line b\nline c\n");

	let found = session.matches_for(PatternId::LineMovementManual);
	assert_eq!(found.len(), 1);
	assert_eq!(found[0].suggested_command, commands::MOVE_LINES_DOWN);
	assert_eq!(session.doc.to_string(), "a\nd\nline b\nline c\ne\n");
}

#[test]
fn move_command_between_cut_and_paste_is_not_manual() {
	let mut session = Session::new("a\nline b\nline c\nd\ne\n");
	session.at(0).delete(Range::new(Position::new(1, 0), Position::new(3, 0)));
	session.at(200).command(commands::MOVE_LINES_DOWN);
	session.at(300).insert(Position::new(2, 0), "line b\nline c\n");

	assert!(session.matches_for(PatternId::LineMovementManual).is_empty());
}

#[test]
fn selecting_the_same_word_three_times() {
	let mut session = Session::new("foo = foo + foo;\n");
	session.at(0).select(0, 0, 3);
	session.at(300).cursor(0, 3);
	session.at(600).select(0, 6, 9);
	session.at(900).cursor(0, 9);
	session.at(1_200).select(0, 12, 15);

	let found = session.matches_for(PatternId::WordSelectionRepeated);
	assert_eq!(found.len(), 1);
	assert_eq!(found[0].suggested_command, commands::ADD_SELECTION_TO_NEXT_FIND_MATCH);
}

#[test]
fn typing_moves_the_cursor_without_arrow_matches() {
	let mut session = Session::new("\n");
	for (i, ch) in "example".chars().enumerate() {
		let t = i as u64 * 100;
		session.at(t).command(commands::TYPE);
		session.insert(Position::new(0, i), &ch.to_string());
		session.at(t + 10).cursor(0, i + 1);
	}

	assert!(session.matches_for(PatternId::ArrowNavigation).is_empty());
}

#[test]
fn focus_loss_discards_partial_sequences() {
	let mut session = Session::new("hello world example text\n");
	session.at(0).cursor(0, 14);
	for (i, col) in (15..=17).enumerate() {
		session.at((i as u64 + 1) * 100).cursor(0, col);
	}
	session.tracker.dispatch::<Rope>(HostEvent::WindowFocusChanged { focused: false });
	session.at(350).cursor(0, 18);
	session.tracker.dispatch::<Rope>(HostEvent::WindowFocusChanged { focused: true });
	session.at(400).cursor(0, 18);
	session.at(500).cursor(0, 19);

	assert!(session.matches_for(PatternId::ArrowNavigation).is_empty());
}

#[test]
fn matches_serialize_for_the_host() {
	let mut session = Session::new("foo = foo + foo;\n");
	session.at(0).select(0, 0, 3);
	session.at(300).select(0, 6, 9);
	session.at(600).select(0, 12, 15);

	let found = session.matches_for(PatternId::WordSelectionRepeated);
	let json = serde_json::to_value(found[0]).unwrap();
	assert_eq!(json["pattern_id"], "word-selection-repeated");
	assert_eq!(json["suggested_command"], commands::ADD_SELECTION_TO_NEXT_FIND_MATCH);
	assert_eq!(json["detected_events"][0]["type"], "selection");
	assert_eq!(json["detected_events"][0]["timestamp"], 600);
}
