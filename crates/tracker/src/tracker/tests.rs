use std::cell::RefCell;
use std::rc::Rc;

use nudge_patterns::{EventRecord, PatternId, PatternMatch};
use nudge_primitives::{ManualClock, Position, Range, Rope};
use pretty_assertions::assert_eq;

use super::*;

#[derive(Debug, Default)]
struct Calls {
	processed: Vec<EventRecord>,
	resets: usize,
}

/// Records every call and matches on inserts of `"!"`.
struct Probe {
	id: PatternId,
	enabled: bool,
	calls: Rc<RefCell<Calls>>,
}

impl Pattern for Probe {
	fn id(&self) -> PatternId {
		self.id
	}

	fn is_enabled(&self) -> bool {
		self.enabled
	}

	fn reset(&mut self) {
		self.calls.borrow_mut().resets += 1;
	}

	fn process(&mut self, event: &EditingEvent<'_>, cx: &PatternContext<'_>) -> Option<PatternMatch> {
		self.calls.borrow_mut().processed.push(event.record());
		(event.kind.text() == Some("!")).then(|| PatternMatch::new(self.id, "probe", cx.key_hint("probe")).with_event(event))
	}
}

const DOC: DocumentId = DocumentId(7);

type TestTracker = EditorActionTracker<Vec<PatternMatch>, KeybindingTable, ManualClock>;

fn tracker_with(ids: &[(PatternId, bool)]) -> (TestTracker, ManualClock, Vec<Rc<RefCell<Calls>>>) {
	let clock = ManualClock::new(10_000);
	let mut keys = KeybindingTable::new();
	keys.insert("probe", "ctrl+alt+p");
	let mut tracker = EditorActionTracker::new(TrackerConfig::default(), Vec::<PatternMatch>::new(), keys, clock.clone());
	let calls = ids
		.iter()
		.map(|&(id, enabled)| {
			let calls = Rc::new(RefCell::new(Calls::default()));
			tracker.register_pattern(Box::new(Probe {
				id,
				enabled,
				calls: Rc::clone(&calls),
			}));
			calls
		})
		.collect();
	tracker.start();
	tracker.active_editor_changed(Some(ActiveEditor {
		document: DOC,
		scheme: UriScheme::File,
	}));
	(tracker, clock, calls)
}

fn type_text(tracker: &mut TestTracker, text: &str) -> usize {
	let doc = Rope::from_str("abc\n");
	let change = TextChange::insert(Range::point(Position::new(0, 0)), text);
	tracker.handle_text_change(DOC, &UriScheme::File, &doc, vec![change], None)
}

fn move_cursor(tracker: &mut TestTracker, character: usize) -> usize {
	let doc = Rope::from_str("abcdef\n");
	tracker.handle_selection_change(DOC, &UriScheme::File, &doc, &[Selection::cursor(Position::new(0, character))])
}

#[test]
fn events_reach_enabled_patterns_in_order() {
	let (mut tracker, _clock, calls) = tracker_with(&[(PatternId::LineDeleteBackspace, true), (PatternId::WordDeleteBackspace, false)]);

	assert_eq!(type_text(&mut tracker, "x"), 0);
	assert_eq!(calls[0].borrow().processed.len(), 1);
	assert_eq!(calls[1].borrow().processed.len(), 0);
	assert_eq!(tracker.state().len(), 1);
	assert_eq!(tracker.state().last_text(), Some("x"));
}

#[test]
fn matches_are_forwarded_with_hints() {
	let (mut tracker, clock, _calls) = tracker_with(&[(PatternId::LineDeleteBackspace, true), (PatternId::LineMovementManual, true)]);

	clock.set(10_500);
	assert_eq!(type_text(&mut tracker, "!"), 2);
	let found = tracker.notifier();
	assert_eq!(found.len(), 2);
	assert_eq!(found[0].pattern_id, PatternId::LineDeleteBackspace);
	assert_eq!(found[0].message, "Ctrl+Alt+P");
	assert_eq!(found[1].detected_events[0].timestamp, 10_500);
}

#[test]
fn events_are_ignored_unless_running() {
	let (mut tracker, _clock, calls) = tracker_with(&[(PatternId::LineDeleteBackspace, true)]);
	tracker.stop();
	assert_eq!(tracker.run_state(), RunState::Stopped);

	type_text(&mut tracker, "x");
	move_cursor(&mut tracker, 1);
	assert!(calls[0].borrow().processed.is_empty());
	assert!(tracker.state().is_empty());
}

#[test]
fn undo_and_redo_are_ignored() {
	let (mut tracker, _clock, calls) = tracker_with(&[(PatternId::LineDeleteBackspace, true)]);
	let doc = Rope::from_str("abc\n");
	for reason in [ChangeReason::Undo, ChangeReason::Redo] {
		let change = TextChange::delete(Range::on_line(0, 0, 1), 1);
		tracker.handle_text_change(DOC, &UriScheme::File, &doc, vec![change], Some(reason));
	}
	assert!(calls[0].borrow().processed.is_empty());
}

#[test]
fn only_the_active_file_editor_is_observed() {
	let (mut tracker, _clock, calls) = tracker_with(&[(PatternId::LineDeleteBackspace, true)]);
	let doc = Rope::from_str("abc\n");
	let change = || vec![TextChange::insert(Range::point(Position::new(0, 0)), "x")];

	tracker.handle_text_change(DocumentId(8), &UriScheme::File, &doc, change(), None);
	tracker.handle_text_change(DOC, &UriScheme::from("output"), &doc, change(), None);
	tracker.handle_selection_change(DocumentId(8), &UriScheme::File, &doc, &[Selection::cursor(Position::new(0, 1))]);
	assert!(calls[0].borrow().processed.is_empty());
}

#[test]
fn multiple_changes_are_classified_separately() {
	let (mut tracker, _clock, calls) = tracker_with(&[(PatternId::LineDeleteBackspace, true)]);
	let doc = Rope::from_str("abc\n");
	let changes = vec![
		TextChange::insert(Range::point(Position::new(0, 0)), "x"),
		TextChange::delete(Range::on_line(0, 1, 2), 1),
		TextChange {
			range: Range::on_line(0, 2, 3),
			range_length: 1,
			text: "y".to_owned(),
			removed_text: None,
		},
	];
	tracker.handle_text_change(DOC, &UriScheme::File, &doc, changes, None);

	let labels: Vec<&str> = calls[0].borrow().processed.iter().map(|r| r.kind.label()).collect();
	assert_eq!(labels, vec!["insert", "delete", "replace"]);
}

#[test]
fn selection_after_edit_command_is_a_side_effect() {
	let (mut tracker, clock, calls) = tracker_with(&[(PatternId::ArrowNavigation, true)]);

	clock.set(20_000);
	tracker.notify_command_executed(commands::DELETE_LEFT);
	clock.set(20_049);
	move_cursor(&mut tracker, 1);
	assert!(calls[0].borrow().processed.is_empty());

	clock.set(20_050);
	move_cursor(&mut tracker, 1);
	assert_eq!(calls[0].borrow().processed.len(), 1);
}

#[test]
fn mouse_drags_are_not_keyboard_selections() {
	let (mut tracker, clock, calls) = tracker_with(&[(PatternId::TextSelectionNavigation, true)]);

	clock.set(20_000);
	tracker.notify_mouse_pressed();
	clock.set(20_400);
	move_cursor(&mut tracker, 2);
	tracker.notify_mouse_released();
	clock.set(20_699);
	move_cursor(&mut tracker, 3);
	assert!(tracker.is_mouse_selection_likely());
	assert!(calls[0].borrow().processed.is_empty());

	clock.set(20_700);
	assert!(!tracker.is_mouse_selection_likely());
	move_cursor(&mut tracker, 4);
	assert_eq!(calls[0].borrow().processed.len(), 1);
}

#[test]
fn empty_selection_list_is_ignored() {
	let (mut tracker, _clock, calls) = tracker_with(&[(PatternId::ArrowNavigation, true)]);
	let doc = Rope::from_str("abc\n");
	assert_eq!(tracker.handle_selection_change(DOC, &UriScheme::File, &doc, &[]), 0);
	assert!(calls[0].borrow().processed.is_empty());
}

#[test]
fn commands_reset_the_patterns_they_supersede() {
	let (mut tracker, clock, calls) = tracker_with(&[(PatternId::LineMovementManual, true), (PatternId::LineDuplicationManual, true)]);

	tracker.notify_command_executed(commands::MOVE_LINES_DOWN);
	tracker.notify_command_executed(commands::CURSOR_WORD_RIGHT);
	assert_eq!(calls[0].borrow().resets, 1);
	assert_eq!(calls[1].borrow().resets, 0);

	clock.advance(100);
	tracker.notify_command_executed(commands::COPY_LINES_DOWN);
	assert_eq!(calls[1].borrow().resets, 1);
	assert_eq!(tracker.last_command_execution_time(commands::COPY_LINES_DOWN), Some(10_100));
	assert!(tracker.was_command_recently_executed(commands::MOVE_LINES_DOWN, None));
	assert!(!tracker.was_command_recently_executed(commands::MOVE_LINES_DOWN, Some(100)));
}

#[test]
fn commands_are_recorded_while_stopped() {
	let (mut tracker, _clock, _calls) = tracker_with(&[]);
	tracker.stop();
	tracker.notify_command_executed(commands::DELETE_LINES);
	assert_eq!(tracker.ledger().executions(commands::DELETE_LINES), &[10_000]);
}

#[test]
fn switching_file_editors_resets_everything() {
	let (mut tracker, _clock, calls) = tracker_with(&[(PatternId::ArrowNavigation, true)]);
	type_text(&mut tracker, "x");

	tracker.active_editor_changed(Some(ActiveEditor {
		document: DocumentId(9),
		scheme: UriScheme::from("output"),
	}));
	assert_eq!(calls[0].borrow().resets, 0);
	assert_eq!(tracker.state().len(), 1);

	tracker.active_editor_changed(Some(ActiveEditor {
		document: DocumentId(9),
		scheme: UriScheme::File,
	}));
	assert_eq!(calls[0].borrow().resets, 1);
	assert!(tracker.state().is_empty());
	assert_eq!(tracker.active_editor().map(|e| e.document), Some(DocumentId(9)));

	tracker.active_editor_changed(None);
	assert_eq!(type_text(&mut tracker, "!"), 0);
}

#[test]
fn focus_loss_pauses_and_focus_gain_resumes() {
	let (mut tracker, _clock, calls) = tracker_with(&[(PatternId::ArrowNavigation, true)]);

	tracker.window_focus_changed(false);
	assert_eq!(tracker.run_state(), RunState::Paused);
	assert_eq!(calls[0].borrow().resets, 1);
	move_cursor(&mut tracker, 1);
	assert!(calls[0].borrow().processed.is_empty());

	tracker.window_focus_changed(true);
	assert!(tracker.is_active());
	move_cursor(&mut tracker, 1);
	assert_eq!(calls[0].borrow().processed.len(), 1);
}

#[test]
fn focus_gain_does_not_restart_a_stopped_tracker() {
	let (mut tracker, _clock, _calls) = tracker_with(&[]);
	tracker.window_focus_changed(false);
	tracker.stop();
	tracker.window_focus_changed(true);
	assert_eq!(tracker.run_state(), RunState::Stopped);
}

#[test]
fn dispose_forgets_commands() {
	let (mut tracker, _clock, calls) = tracker_with(&[(PatternId::ArrowNavigation, true)]);
	tracker.notify_command_executed(commands::CURSOR_END);
	tracker.dispose();
	assert!(tracker.ledger().is_empty());
	assert_eq!(tracker.run_state(), RunState::Stopped);
	assert_eq!(calls[0].borrow().resets, 1);
}

#[test]
fn dispatch_routes_host_events() {
	let (mut tracker, clock, calls) = tracker_with(&[(PatternId::ArrowNavigation, true)]);
	let snapshot = Rope::from_str("abc\n");

	let events = vec![
		HostEvent::CommandExecuted {
			command: commands::SELECT_ALL.to_owned(),
		},
		HostEvent::TextChanged {
			document: DOC,
			scheme: UriScheme::File,
			snapshot: snapshot.clone(),
			changes: vec![TextChange::insert(Range::point(Position::new(0, 0)), "!")],
			reason: None,
		},
		HostEvent::SelectionChanged {
			document: DOC,
			scheme: UriScheme::File,
			snapshot,
			selections: vec![Selection::cursor(Position::new(0, 1))],
		},
		HostEvent::MousePressed,
		HostEvent::MouseReleased,
		HostEvent::WindowFocusChanged { focused: false },
	];
	assert_eq!(tracker.drive(events), 1);

	assert_eq!(calls[0].borrow().processed.len(), 2);
	assert_eq!(tracker.last_command_execution_time(commands::SELECT_ALL), Some(clock.now()));
	assert_eq!(tracker.mouse().last_release, Some(clock.now()));
	assert_eq!(tracker.run_state(), RunState::Paused);
}

#[test]
fn default_patterns_follow_registration_order() {
	let tracker = EditorActionTracker::with_default_patterns(TrackerConfig::default(), &PatternsConfig::default(), Vec::<PatternMatch>::new(), (), ManualClock::new(0));
	let ids: Vec<PatternId> = tracker.patterns().iter().map(|p| p.id()).collect();
	assert_eq!(ids, PatternId::ALL.to_vec());
	assert_eq!(tracker.run_state(), RunState::Stopped);
}
