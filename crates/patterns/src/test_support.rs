//! Scripted editor used by detector tests.

use std::collections::HashMap;

use nudge_primitives::{Position, Range, Rope, Selection, Timestamp};

use crate::context::{CommandHistory, PatternContext};
use crate::event::{EditKind, EditingEvent, PatternMatch};
use crate::pattern::Pattern;

#[derive(Debug, Default)]
pub(crate) struct History(HashMap<String, Timestamp>);

impl<const N: usize> From<[(&str, Timestamp); N]> for History {
	fn from(entries: [(&str, Timestamp); N]) -> Self {
		Self(entries.into_iter().map(|(command, at)| (command.to_owned(), at)).collect())
	}
}

impl CommandHistory for History {
	fn last_execution(&self, command: &str) -> Option<Timestamp> {
		self.0.get(command).copied()
	}
}

/// A rope plus a clock and command history. Edits are applied before the
/// event is fed, so detectors see post-change text.
pub(crate) struct TestEditor {
	pub doc: Rope,
	pub history: History,
	pub now: Timestamp,
}

impl TestEditor {
	pub fn new(text: &str) -> Self {
		Self {
			doc: Rope::from_str(text),
			history: History::default(),
			now: 0,
		}
	}

	pub fn at(&mut self, now: Timestamp) -> &mut Self {
		self.now = now;
		self
	}

	pub fn run_command(&mut self, command: &str) -> &mut Self {
		self.history.0.insert(command.to_owned(), self.now);
		self
	}

	fn char_idx(&self, pos: Position) -> usize {
		self.doc.line_to_char(pos.line) + pos.character
	}

	pub fn feed(&self, pattern: &mut impl Pattern, kind: &EditKind) -> Option<PatternMatch> {
		let event = EditingEvent::new(kind, self.now, &self.doc);
		let cx = PatternContext::new(self.now, &self.history, &());
		pattern.process(&event, &cx)
	}

	pub fn delete(&mut self, pattern: &mut impl Pattern, range: Range) -> Option<PatternMatch> {
		let (from, to) = (self.char_idx(range.start), self.char_idx(range.end));
		let removed = self.doc.slice(from..to).to_string();
		self.doc.remove(from..to);
		let kind = EditKind::Delete {
			range,
			range_length: to - from,
			removed_text: Some(removed),
		};
		self.feed(pattern, &kind)
	}

	/// Deletes the character left of `(line, character)`.
	pub fn backspace(&mut self, pattern: &mut impl Pattern, line: usize, character: usize) -> Option<PatternMatch> {
		self.delete(pattern, Range::on_line(line, character - 1, character))
	}

	pub fn insert(&mut self, pattern: &mut impl Pattern, at: Position, text: &str) -> Option<PatternMatch> {
		let idx = self.char_idx(at);
		self.doc.insert(idx, text);
		let kind = EditKind::Insert {
			range: Range::point(at),
			text: text.to_owned(),
		};
		self.feed(pattern, &kind)
	}

	pub fn select(&mut self, pattern: &mut impl Pattern, line: usize, anchor: usize, active: usize) -> Option<PatternMatch> {
		let kind = EditKind::Selection {
			selection: Selection::new(Position::new(line, anchor), Position::new(line, active)),
		};
		self.feed(pattern, &kind)
	}

	pub fn cursor(&mut self, pattern: &mut impl Pattern, line: usize, character: usize) -> Option<PatternMatch> {
		self.select(pattern, line, character, character)
	}
}
