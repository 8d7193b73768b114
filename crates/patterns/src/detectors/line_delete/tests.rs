use nudge_primitives::{Position, Range};
use pretty_assertions::assert_eq;

use super::*;
use crate::commands;
use crate::test_support::TestEditor;

#[test]
fn backspacing_a_line_char_by_char() {
	let mut ed = TestEditor::new("hello\nworld\n");
	let mut pattern = LineDeletePattern::default();

	for (i, col) in (1..=4).rev().enumerate() {
		let found = ed.at(i as u64 * 50).backspace(&mut pattern, 0, col + 1);
		assert_eq!(found, None, "deletion {i}");
	}
	let found = ed.at(200).backspace(&mut pattern, 0, 1).expect("fifth deletion completes the line");

	assert_eq!(found.pattern_id, PatternId::LineDeleteBackspace);
	assert_eq!(found.sub_pattern_id, Some(SubPattern::CharByChar));
	assert_eq!(found.suggested_command, commands::DELETE_LINES);
	assert!(found.message.contains("character-by-character"));
	assert_eq!(found.detected_events.len(), 1);
	assert_eq!(ed.doc.to_string(), "\nworld\n");
}

#[test]
fn deleting_a_line_word_by_word() {
	let mut ed = TestEditor::new("foo bar baz\n");
	let mut pattern = LineDeletePattern::default();

	assert_eq!(ed.at(0).delete(&mut pattern, Range::on_line(0, 8, 11)), None);
	assert_eq!(ed.at(200).delete(&mut pattern, Range::on_line(0, 4, 8)), None);
	let found = ed.at(400).delete(&mut pattern, Range::on_line(0, 0, 4)).unwrap();

	assert_eq!(found.sub_pattern_id, Some(SubPattern::WordByWord));
	assert!(found.message.contains("word-by-word"));
}

#[test]
fn interruption_abandons_short_sequence() {
	let mut ed = TestEditor::new("hello\n");
	let mut pattern = LineDeletePattern::default();

	for (i, col) in (2..=5).rev().enumerate() {
		assert_eq!(ed.at(i as u64 * 50).backspace(&mut pattern, 0, col), None);
	}
	assert_eq!(ed.at(220).cursor(&mut pattern, 0, 1), None);
	assert_eq!(ed.at(250).backspace(&mut pattern, 0, 1), None);
	assert_eq!(ed.doc.to_string(), "\n");
}

#[test]
fn multi_line_delete_resets() {
	let mut ed = TestEditor::new("hello\nworld\n");
	let mut pattern = LineDeletePattern::default();

	for (i, col) in (3..=5).rev().enumerate() {
		assert_eq!(ed.at(i as u64 * 50).backspace(&mut pattern, 0, col), None);
	}
	let range = Range::new(Position::new(0, 2), Position::new(1, 0));
	assert_eq!(ed.at(200).delete(&mut pattern, range), None);
	assert_eq!(pattern.deletions.len(), 0);
	assert_eq!(pattern.current_line, None);
}

#[test]
fn switching_lines_starts_a_new_sequence() {
	let mut ed = TestEditor::new("abc\nhello\n");
	let mut pattern = LineDeletePattern::default();

	assert_eq!(ed.at(0).backspace(&mut pattern, 0, 3), None);
	assert_eq!(ed.at(50).backspace(&mut pattern, 1, 5), None);
	assert_eq!(pattern.current_line, Some(1));
	assert_eq!(pattern.deletions.len(), 1);
	assert_eq!(pattern.initial_line_text, "hell");
}

#[test]
fn disabled_by_config() {
	let pattern = LineDeletePattern::new(LineDeleteConfig {
		enabled: false,
		..LineDeleteConfig::default()
	});
	assert!(!pattern.is_enabled());
}
