//! Selecting the same word again and again instead of adding a cursor at the next match.


use nudge_primitives::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::context::PatternContext;
use crate::event::{EditKind, EditingEvent, PatternMatch};
use crate::id::PatternId;
use crate::pattern::Pattern;
use crate::utils::{DEFAULT_TIMEOUT_MS, is_word_text};

pub const MIN_REPEATS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WordSelectionConfig {
	pub enabled: bool,
	pub min_repeats: usize,
	pub timeout_ms: u64,
}

impl Default for WordSelectionConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			min_repeats: MIN_REPEATS,
			timeout_ms: DEFAULT_TIMEOUT_MS,
		}
	}
}

#[derive(Debug, Default)]
pub struct WordSelectionPattern {
	config: WordSelectionConfig,
	last_word: Option<String>,
	repeats: usize,
	last_time: Option<Timestamp>,
}

impl WordSelectionPattern {
	pub fn new(config: WordSelectionConfig) -> Self {
		Self {
			config,
			..Self::default()
		}
	}
}

impl Pattern for WordSelectionPattern {
	fn id(&self) -> PatternId {
		PatternId::WordSelectionRepeated
	}

	fn is_enabled(&self) -> bool {
		self.config.enabled
	}

	fn reset(&mut self) {
		self.last_word = None;
		self.repeats = 0;
		self.last_time = None;
	}

	fn process(&mut self, event: &EditingEvent<'_>, cx: &PatternContext<'_>) -> Option<PatternMatch> {
		let EditKind::Selection { selection } = event.kind else {
			return None;
		};
		if selection.is_empty() {
			return None;
		}

		if self
			.last_time
			.is_some_and(|last| event.timestamp.saturating_sub(last) > self.config.timeout_ms)
		{
			trace!("patterns.word_selection.timeout");
			self.reset();
		}
		self.last_time = Some(event.timestamp);

		let Some(text) = event.document.text_in(selection.range()).filter(|text| is_word_text(text)) else {
			self.reset();
			return None;
		};

		if self.last_word.as_deref() == Some(text.as_str()) {
			self.repeats += 1;
			trace!(word = %text, repeats = self.repeats, "patterns.word_selection.repeat");
			if self.repeats >= self.config.min_repeats {
				let command = self.suggested_command();
				let message = format!(
					"You selected \"{text}\" {} times. Try {} to add the next occurrence to the selection!",
					self.repeats,
					cx.key_hint(command)
				);
				info!(word = %text, repeats = self.repeats, "patterns.word_selection.match");
				let found = PatternMatch::new(self.id(), command, message).with_event(event);
				self.reset();
				return Some(found);
			}
		} else {
			self.last_word = Some(text);
			self.repeats = 1;
		}
		None
	}
}
