//! Duplicating a line by pasting the same text onto adjacent lines.


use nudge_primitives::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::commands;
use crate::context::PatternContext;
use crate::event::{EditKind, EditingEvent, PatternMatch};
use crate::id::PatternId;
use crate::pattern::Pattern;
use crate::sequence::{SequenceConfig, SequenceTracker, Timestamped};
use crate::utils::{FAST_ACTION_THRESHOLD_MS, is_too_fast};

pub const MIN_TEXT_LENGTH: usize = 3;
pub const MIN_DUPLICATIONS: usize = 2;
pub const TIMEOUT_MS: u64 = 5000;
pub const MAX_TRACKED: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LineDuplicationConfig {
	pub enabled: bool,
	pub min_text_length: usize,
	pub min_duplications: usize,
	pub fast_threshold_ms: u64,
	pub sequence: SequenceConfig,
}

impl Default for LineDuplicationConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			min_text_length: MIN_TEXT_LENGTH,
			min_duplications: MIN_DUPLICATIONS,
			fast_threshold_ms: FAST_ACTION_THRESHOLD_MS,
			sequence: SequenceConfig::new(MAX_TRACKED, TIMEOUT_MS),
		}
	}
}

#[derive(Debug, Clone)]
struct Insertion {
	timestamp: Timestamp,
	line: usize,
	text: String,
}

impl Timestamped for Insertion {
	fn timestamp(&self) -> Timestamp {
		self.timestamp
	}
}

#[derive(Debug)]
pub struct LineDuplicationPattern {
	config: LineDuplicationConfig,
	insertions: SequenceTracker<Insertion>,
}

impl LineDuplicationPattern {
	pub fn new(config: LineDuplicationConfig) -> Self {
		Self {
			config,
			insertions: SequenceTracker::new(config.sequence),
		}
	}

	fn check_for_match(&mut self, event: &EditingEvent<'_>, cx: &PatternContext<'_>) -> Option<PatternMatch> {
		let needed = self.config.min_duplications.max(1);
		if self.insertions.len() < needed {
			return None;
		}
		let recent = self.insertions.last_n(needed);
		let first_text = &recent[0].text;
		if recent.iter().any(|ins| ins.text != *first_text) {
			return None;
		}

		let mut lines: Vec<usize> = recent.iter().map(|ins| ins.line).collect();
		lines.sort_unstable();
		lines.dedup();
		if lines.len() != needed {
			return None;
		}
		let span = lines[lines.len() - 1] - lines[0];
		if span > needed + 1 {
			return None;
		}

		let timestamps: Vec<Timestamp> = recent.iter().map(|ins| ins.timestamp).collect();
		if is_too_fast(&timestamps, self.config.fast_threshold_ms) {
			trace!("patterns.line_duplication.too_fast");
			self.reset();
			return None;
		}
		if cx.was_any_executed_between(commands::COPY_LINE_COMMANDS, timestamps[0], timestamps[timestamps.len() - 1]) {
			trace!("patterns.line_duplication.command_used");
			self.reset();
			return None;
		}

		let command = self.suggested_command();
		let message = format!("You manually duplicated a line. Try {} to duplicate lines faster!", cx.key_hint(command));
		info!(lines = ?lines, "patterns.line_duplication.match");
		let found = PatternMatch::new(self.id(), command, message).with_event(event);
		self.reset();
		Some(found)
	}
}

impl Default for LineDuplicationPattern {
	fn default() -> Self {
		Self::new(LineDuplicationConfig::default())
	}
}

impl Pattern for LineDuplicationPattern {
	fn id(&self) -> PatternId {
		PatternId::LineDuplicationManual
	}

	fn is_enabled(&self) -> bool {
		self.config.enabled
	}

	fn reset(&mut self) {
		self.insertions.reset();
	}

	fn process(&mut self, event: &EditingEvent<'_>, cx: &PatternContext<'_>) -> Option<PatternMatch> {
		let EditKind::Insert { range, text } = event.kind else {
			return None;
		};
		let trimmed = text.trim();
		if trimmed.chars().count() < self.config.min_text_length {
			return None;
		}

		self.insertions.add(Insertion {
			timestamp: event.timestamp,
			line: range.start.line,
			text: trimmed.to_owned(),
		});
		self.check_for_match(event, cx)
	}
}
