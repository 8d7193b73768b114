//! Deleting a word one character at a time.
//!
//! Consecutive single-line deletions on one line are grouped into segments
//! split at word boundaries. A segment long enough, reaching a boundary, is a
//! word deleted by hand unless a word-delete command ran during the sequence.


use nudge_primitives::{Document, HorizontalDirection, Position, Range, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::commands;
use crate::context::PatternContext;
use crate::event::{EditKind, EditingEvent, PatternMatch};
use crate::id::PatternId;
use crate::pattern::Pattern;
use crate::sequence::{SequenceConfig, SequenceTracker, Timestamped};
use crate::utils::is_word_boundary;

pub const MIN_SEGMENT_LENGTH: usize = 3;
pub const MIN_TOTAL_DELETIONS: usize = 4;
pub const TIMEOUT_MS: u64 = 1500;
pub const MAX_TRACKED: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WordDeleteConfig {
	pub enabled: bool,
	pub min_segment_length: usize,
	pub min_total_deletions: usize,
	pub sequence: SequenceConfig,
}

impl Default for WordDeleteConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			min_segment_length: MIN_SEGMENT_LENGTH,
			min_total_deletions: MIN_TOTAL_DELETIONS,
			sequence: SequenceConfig::new(MAX_TRACKED, TIMEOUT_MS),
		}
	}
}

#[derive(Debug, Clone, Copy)]
struct DeleteStep {
	timestamp: Timestamp,
	line: usize,
	character: usize,
	range_length: usize,
}

impl Timestamped for DeleteStep {
	fn timestamp(&self) -> Timestamp {
		self.timestamp
	}
}

#[derive(Debug)]
pub struct WordDeletePattern {
	config: WordDeleteConfig,
	deletions: SequenceTracker<DeleteStep>,
	/// Backspace deletes leftwards, Delete rightwards. Unknown until the second deletion.
	direction: HorizontalDirection,
	/// Deletions since the last word boundary.
	segment: usize,
}

impl WordDeletePattern {
	pub fn new(config: WordDeleteConfig) -> Self {
		Self {
			config,
			deletions: SequenceTracker::new(config.sequence),
			direction: HorizontalDirection::Unknown,
			segment: 0,
		}
	}

	fn direction_of(&self, range: &Range) -> HorizontalDirection {
		match self.deletions.last() {
			Some(last) if range.start.character >= last.character => HorizontalDirection::Right,
			Some(_) => HorizontalDirection::Left,
			None => HorizontalDirection::Unknown,
		}
	}

	/// Returns true if the deletion at `range` now touches a word boundary in `doc`.
	fn at_word_boundary(&self, doc: &dyn Document, range: &Range) -> bool {
		let start = range.start;
		match self.direction {
			HorizontalDirection::Left => {
				let Some(before) = start.character.checked_sub(1) else {
					return true;
				};
				doc.char_at(Position::new(start.line, before))
					.is_some_and(is_word_boundary)
			}
			HorizontalDirection::Right => {
				let Some(len) = doc.line_len(start.line) else {
					return false;
				};
				start.character >= len || doc.char_at(start).is_some_and(is_word_boundary)
			}
			HorizontalDirection::Unknown => false,
		}
	}

	fn check_and_reset(&mut self, reason: &'static str, event: &EditingEvent<'_>, cx: &PatternContext<'_>) -> Option<PatternMatch> {
		trace!(reason, deletions = self.deletions.len(), segment = self.segment, "patterns.word_delete.interrupt");
		let result = self.check_for_match(event, cx);
		self.reset();
		result
	}

	fn check_for_match(&mut self, event: &EditingEvent<'_>, cx: &PatternContext<'_>) -> Option<PatternMatch> {
		if self.deletions.len() < self.config.min_total_deletions || self.segment < self.config.min_segment_length {
			return None;
		}
		let (first, last) = (self.deletions.first()?.timestamp, self.deletions.last()?.timestamp);
		if cx.was_any_executed_between(commands::WORD_DELETE_COMMANDS, first, last) {
			debug!(first, last, "patterns.word_delete.command_used");
			return None;
		}

		let command = match self.direction {
			HorizontalDirection::Right => commands::DELETE_WORD_RIGHT,
			_ => commands::DELETE_WORD_LEFT,
		};
		let chars: usize = self.deletions.iter().map(|d| d.range_length).sum();
		let message = format!(
			"You deleted {chars} characters one at a time. Try {} to delete whole words!",
			cx.key_hint(command)
		);
		info!(deletions = self.deletions.len(), chars, command, "patterns.word_delete.match");
		let found = PatternMatch::new(self.id(), command, message).with_event(event);
		self.reset();
		Some(found)
	}
}

impl Default for WordDeletePattern {
	fn default() -> Self {
		Self::new(WordDeleteConfig::default())
	}
}

impl Pattern for WordDeletePattern {
	fn id(&self) -> PatternId {
		PatternId::WordDeleteBackspace
	}

	fn is_enabled(&self) -> bool {
		self.config.enabled
	}

	fn reset(&mut self) {
		self.deletions.reset();
		self.direction = HorizontalDirection::Unknown;
		self.segment = 0;
	}

	fn process(&mut self, event: &EditingEvent<'_>, cx: &PatternContext<'_>) -> Option<PatternMatch> {
		let EditKind::Delete { range, range_length, .. } = event.kind else {
			return self.check_and_reset("non-delete event", event, cx);
		};
		if !range.is_single_line() {
			return self.check_and_reset("multi-line deletion", event, cx);
		}
		if self.deletions.last().is_some_and(|last| last.line != range.start.line) {
			return self.check_and_reset("line changed", event, cx);
		}

		let current = self.direction_of(range);
		if current != HorizontalDirection::Unknown {
			if self.direction != HorizontalDirection::Unknown && self.direction != current {
				trace!(from = ?self.direction, to = ?current, "patterns.word_delete.direction_changed");
				self.reset();
			}
			if self.direction == HorizontalDirection::Unknown {
				self.direction = current;
			}
		}

		if let Some(last) = self.deletions.last() {
			let expected = match self.direction {
				HorizontalDirection::Left => last.character.checked_sub(1),
				_ => Some(last.character),
			};
			if expected != Some(range.start.character) {
				trace!(expected, actual = range.start.character, "patterns.word_delete.discontinuous");
				self.reset();
				self.direction = current;
			}
		}

		self.deletions.add(DeleteStep {
			timestamp: event.timestamp,
			line: range.start.line,
			character: range.start.character,
			range_length: *range_length,
		});
		self.segment += 1;

		if self.at_word_boundary(event.document, range) {
			if self.segment >= self.config.min_segment_length
				&& self.deletions.len() >= self.config.min_total_deletions
				&& let Some(found) = self.check_for_match(event, cx)
			{
				return Some(found);
			}
			self.segment = 0;
		}
		None
	}
}
