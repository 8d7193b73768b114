//! Moving lines by cutting them and pasting them a line or two away.


use nudge_primitives::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::commands;
use crate::context::PatternContext;
use crate::event::{EditKind, EditingEvent, PatternMatch};
use crate::id::PatternId;
use crate::pattern::Pattern;
use crate::utils::{DEFAULT_TIMEOUT_MS, FAST_ACTION_THRESHOLD_MS};

pub const MIN_LINE_LENGTH: usize = 3;
pub const MAX_LINE_DISTANCE: usize = 2;
pub const MAX_MOVE_DURATION_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LineMovementConfig {
	pub enabled: bool,
	/// Inactivity after which a pending deletion is forgotten.
	pub timeout_ms: u64,
	pub min_line_length: usize,
	pub max_line_distance: usize,
	pub max_move_duration_ms: u64,
	/// Re-insertions faster than this are assumed to be programmatic.
	pub min_move_duration_ms: u64,
}

impl Default for LineMovementConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			timeout_ms: DEFAULT_TIMEOUT_MS,
			min_line_length: MIN_LINE_LENGTH,
			max_line_distance: MAX_LINE_DISTANCE,
			max_move_duration_ms: MAX_MOVE_DURATION_MS,
			min_move_duration_ms: FAST_ACTION_THRESHOLD_MS,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MoveState {
	Idle,
	/// Whole lines were removed and may be re-inserted nearby.
	Deleted { line: usize, content: String, at: Timestamp },
}

#[derive(Debug)]
pub struct LineMovementPattern {
	config: LineMovementConfig,
	state: MoveState,
	last_event_time: Option<Timestamp>,
}

impl LineMovementPattern {
	pub fn new(config: LineMovementConfig) -> Self {
		Self {
			config,
			state: MoveState::Idle,
			last_event_time: None,
		}
	}

	fn handle_idle(&mut self, event: &EditingEvent<'_>) {
		let EditKind::Delete {
			range,
			range_length,
			removed_text,
		} = event.kind
		else {
			return;
		};
		if *range_length == 0 || range.end.line <= range.start.line {
			return;
		}

		let Some(deleted) = removed_text.clone().or_else(|| event.document.text_in(*range)) else {
			trace!(line = range.start.line, "patterns.line_movement.no_deleted_text");
			return;
		};
		let content = deleted.trim();
		if content.chars().count() < self.config.min_line_length {
			return;
		}

		trace!(line = range.start.line, len = content.len(), "patterns.line_movement.deleted");
		self.state = MoveState::Deleted {
			line: range.start.line,
			content: content.to_owned(),
			at: event.timestamp,
		};
	}

	fn handle_deleted(&mut self, event: &EditingEvent<'_>, cx: &PatternContext<'_>) -> Option<PatternMatch> {
		let MoveState::Deleted { line, content, at } = &self.state else {
			return None;
		};
		let (deleted_line, deleted_at) = (*line, *at);

		let (range, text) = match event.kind {
			EditKind::Insert { range, text } => (range, text),
			EditKind::Selection { .. } => return None,
			_ => {
				self.reset();
				return None;
			}
		};

		let inserted = text.trim();
		if inserted.is_empty() {
			return None;
		}

		let elapsed = event.timestamp.saturating_sub(deleted_at);
		let insert_line = range.start.line;
		let reject = if elapsed < self.config.min_move_duration_ms {
			Some("too fast")
		} else if cx.was_any_executed_between(commands::MOVE_LINE_COMMANDS, deleted_at, event.timestamp) {
			Some("move command used")
		} else if insert_line == deleted_line {
			Some("same line")
		} else if !inserted.contains(content.as_str()) && !content.contains(inserted) {
			Some("different content")
		} else {
			None
		};
		if let Some(reason) = reject {
			trace!(reason, elapsed, "patterns.line_movement.rejected");
			self.reset();
			return None;
		}

		let distance = insert_line.abs_diff(deleted_line);
		if distance > self.config.max_line_distance || !text.contains('\n') || elapsed >= self.config.max_move_duration_ms {
			return None;
		}

		let command = if insert_line < deleted_line {
			commands::MOVE_LINES_UP
		} else {
			commands::MOVE_LINES_DOWN
		};
		let message = format!("You manually moved a line. Try {} to move lines faster!", cx.key_hint(command));
		info!(from = deleted_line, to = insert_line, elapsed, command, "patterns.line_movement.match");
		let found = PatternMatch::new(self.id(), command, message).with_event(event);
		self.reset();
		Some(found)
	}
}

impl Default for LineMovementPattern {
	fn default() -> Self {
		Self::new(LineMovementConfig::default())
	}
}

impl Pattern for LineMovementPattern {
	fn id(&self) -> PatternId {
		PatternId::LineMovementManual
	}

	fn is_enabled(&self) -> bool {
		self.config.enabled
	}

	fn reset(&mut self) {
		self.state = MoveState::Idle;
		self.last_event_time = None;
	}

	fn process(&mut self, event: &EditingEvent<'_>, cx: &PatternContext<'_>) -> Option<PatternMatch> {
		if self
			.last_event_time
			.is_some_and(|last| event.timestamp.saturating_sub(last) > self.config.timeout_ms)
		{
			trace!("patterns.line_movement.timeout");
			self.reset();
		}
		self.last_event_time = Some(event.timestamp);

		match self.state {
			MoveState::Idle => {
				self.handle_idle(event);
				None
			}
			MoveState::Deleted { .. } => self.handle_deleted(event, cx),
		}
	}
}
