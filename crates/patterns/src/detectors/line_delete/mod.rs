//! Clearing a whole line with repeated Backspace.
//!
//! Deletions are tracked per line. Once the line is (nearly) empty and the
//! deleted total accounts for its original content, the sequence is judged:
//! any multi-character deletion makes it word-by-word, otherwise it is
//! char-by-char.

#[cfg(test)]
mod tests;

use nudge_primitives::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::context::PatternContext;
use crate::event::{EditKind, EditingEvent, PatternMatch};
use crate::id::{PatternId, SubPattern};
use crate::pattern::Pattern;
use crate::sequence::{SequenceConfig, SequenceTracker, Timestamped};

pub const MIN_CHAR_DELETIONS: usize = 5;
pub const MIN_WORD_DELETIONS: usize = 2;
pub const TIMEOUT_MS: u64 = 2000;
pub const MAX_TRACKED: usize = 30;
/// Characters the deleted total may fall short of the line's original length.
pub const LENGTH_SLACK: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LineDeleteConfig {
	pub enabled: bool,
	pub min_char_deletions: usize,
	pub min_word_deletions: usize,
	pub length_slack: usize,
	pub sequence: SequenceConfig,
}

impl Default for LineDeleteConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			min_char_deletions: MIN_CHAR_DELETIONS,
			min_word_deletions: MIN_WORD_DELETIONS,
			length_slack: LENGTH_SLACK,
			sequence: SequenceConfig::new(MAX_TRACKED, TIMEOUT_MS),
		}
	}
}

#[derive(Debug, Clone, Copy)]
struct Deletion {
	timestamp: Timestamp,
	range_length: usize,
}

impl Timestamped for Deletion {
	fn timestamp(&self) -> Timestamp {
		self.timestamp
	}
}

#[derive(Debug)]
pub struct LineDeletePattern {
	config: LineDeleteConfig,
	deletions: SequenceTracker<Deletion>,
	current_line: Option<usize>,
	/// Line text right after the first tracked deletion.
	initial_line_text: String,
	total_deleted: usize,
}

impl LineDeletePattern {
	pub fn new(config: LineDeleteConfig) -> Self {
		Self {
			config,
			deletions: SequenceTracker::new(config.sequence),
			current_line: None,
			initial_line_text: String::new(),
			total_deleted: 0,
		}
	}

	fn initial_len(&self) -> usize {
		self.initial_line_text.trim().chars().count()
	}

	fn accounts_for_line(&self) -> bool {
		let initial = self.initial_len();
		initial > 0 && self.total_deleted + self.config.length_slack >= initial
	}

	fn check_and_reset(&mut self, event: &EditingEvent<'_>, cx: &PatternContext<'_>) -> Option<PatternMatch> {
		let result = if self.deletions.is_empty() {
			None
		} else {
			self.check_for_match(event, cx)
		};
		self.reset();
		result
	}

	fn check_for_match(&mut self, event: &EditingEvent<'_>, cx: &PatternContext<'_>) -> Option<PatternMatch> {
		if !self.accounts_for_line() {
			return None;
		}

		let word_by_word = self.deletions.any(|d| d.range_length > 1);
		let (sub, needed) = if word_by_word {
			(SubPattern::WordByWord, self.config.min_word_deletions)
		} else {
			(SubPattern::CharByChar, self.config.min_char_deletions)
		};
		if self.deletions.len() < needed {
			trace!(deletions = self.deletions.len(), needed, "patterns.line_delete.too_few");
			return None;
		}

		let command = self.suggested_command();
		let method = if word_by_word { "word-by-word" } else { "character-by-character" };
		let message = format!(
			"You deleted a line {method} ({} deletions). Try {} to delete the whole line at once!",
			self.deletions.len(),
			cx.key_hint(command)
		);
		info!(
			line = self.current_line,
			deletions = self.deletions.len(),
			total = self.total_deleted,
			sub = %sub,
			"patterns.line_delete.match"
		);
		let found = PatternMatch::new(self.id(), command, message)
			.with_sub_pattern(sub)
			.with_event(event);
		self.reset();
		Some(found)
	}
}

impl Default for LineDeletePattern {
	fn default() -> Self {
		Self::new(LineDeleteConfig::default())
	}
}

impl Pattern for LineDeletePattern {
	fn id(&self) -> PatternId {
		PatternId::LineDeleteBackspace
	}

	fn is_enabled(&self) -> bool {
		self.config.enabled
	}

	fn reset(&mut self) {
		self.deletions.reset();
		self.current_line = None;
		self.initial_line_text.clear();
		self.total_deleted = 0;
	}

	fn process(&mut self, event: &EditingEvent<'_>, cx: &PatternContext<'_>) -> Option<PatternMatch> {
		let EditKind::Delete { range, range_length, .. } = event.kind else {
			return self.check_and_reset(event, cx);
		};
		if !range.is_single_line() {
			return self.check_and_reset(event, cx);
		}

		let line = range.start.line;
		if self.current_line.is_some_and(|current| current != line) {
			debug!(from = self.current_line, to = line, "patterns.line_delete.line_changed");
			if let Some(found) = self.check_and_reset(event, cx) {
				return Some(found);
			}
		}

		if self.current_line.is_none() {
			self.current_line = Some(line);
			self.initial_line_text = event.document.line_text(line).map(|text| text.into_owned()).unwrap_or_default();
		}

		self.deletions.add(Deletion {
			timestamp: event.timestamp,
			range_length: *range_length,
		});
		self.total_deleted += range_length;

		let remaining = event.document.line_text(line)?;
		if remaining.trim().chars().count() <= 1 && self.accounts_for_line() {
			return self.check_for_match(event, cx);
		}
		None
	}
}
