//! Growing a selection one character (or one word) at a time.
//!
//! Each non-empty selection event that extends the previous selection on the
//! same line becomes a [`SelectionStep`]. Word-sized steps only count as such
//! when a word-select command explains them. The habits recognised:
//!
//! - char steps that leave a word: select by word instead
//! - char or word steps that reach a line edge from far away: select to the edge
//! - any sufficiently long run when the selection ends: select by word, or to the edge


use nudge_primitives::{Direction, Document, EdgeSide, HorizontalDirection, Selection, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::commands;
use crate::context::PatternContext;
use crate::event::{EditKind, EditingEvent, PatternMatch};
use crate::id::{PatternId, SubPattern};
use crate::pattern::Pattern;
use crate::sequence::{SequenceConfig, SequenceTracker};
use crate::utils::{
	DEFAULT_MAX_STEP_INTERVAL_MS, DEFAULT_TIMEOUT_MS, DIRECTION_MAJORITY_RATIO, NavigationStep, SelectionStep, is_position_in_word,
	line_edge_info, predominant_horizontal_direction,
};

pub const MAX_TRACKED: usize = 50;
pub const MIN_CHAR_STEPS_FOR_WORD: usize = 4;
pub const MIN_CHAR_STEPS_FOR_LINE: usize = 6;
pub const MIN_WORD_STEPS_FOR_LINE: usize = 2;
pub const MIN_CHARS_FOR_LINE_EDGE: usize = 5;
pub const MIN_LINE_TEXT: usize = 3;
pub const COMMAND_WINDOW_MS: u64 = 100;
/// A word-select command this recent means the user already selects by word.
pub const WORD_COMMAND_WINDOW_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextSelectionConfig {
	pub enabled: bool,
	pub sequence: SequenceConfig,
	pub max_step_interval_ms: u64,
	pub min_char_steps_for_word: usize,
	pub min_char_steps_for_line: usize,
	pub min_word_steps_for_line: usize,
	pub min_chars_for_line_edge: usize,
	pub min_line_text: usize,
	pub command_window_ms: u64,
	pub word_command_window_ms: u64,
}

impl Default for TextSelectionConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			sequence: SequenceConfig::new(MAX_TRACKED, DEFAULT_TIMEOUT_MS),
			max_step_interval_ms: DEFAULT_MAX_STEP_INTERVAL_MS,
			min_char_steps_for_word: MIN_CHAR_STEPS_FOR_WORD,
			min_char_steps_for_line: MIN_CHAR_STEPS_FOR_LINE,
			min_word_steps_for_line: MIN_WORD_STEPS_FOR_LINE,
			min_chars_for_line_edge: MIN_CHARS_FOR_LINE_EDGE,
			min_line_text: MIN_LINE_TEXT,
			command_window_ms: COMMAND_WINDOW_MS,
			word_command_window_ms: WORD_COMMAND_WINDOW_MS,
		}
	}
}

fn edge_select_command(side: EdgeSide) -> &'static str {
	match side {
		EdgeSide::Start => commands::CURSOR_HOME_SELECT,
		EdgeSide::End => commands::CURSOR_END_SELECT,
	}
}

fn word_select_command(direction: HorizontalDirection) -> Option<&'static str> {
	match direction {
		HorizontalDirection::Right => Some(commands::CURSOR_WORD_RIGHT_SELECT),
		HorizontalDirection::Left => Some(commands::CURSOR_WORD_LEFT_SELECT),
		HorizontalDirection::Unknown => None,
	}
}

#[derive(Debug)]
pub struct TextSelectionNavigationPattern {
	config: TextSelectionConfig,
	steps: SequenceTracker<SelectionStep>,
	last_selection: Option<Selection>,
	sequence_start: Option<Selection>,
	last_time: Option<Timestamp>,
}

impl TextSelectionNavigationPattern {
	pub fn new(config: TextSelectionConfig) -> Self {
		Self {
			config,
			steps: SequenceTracker::new(config.sequence),
			last_selection: None,
			sequence_start: None,
			last_time: None,
		}
	}

	fn counts(&self) -> (usize, usize) {
		let word = self.steps.filter(|s| s.step.is_word_step).count();
		(word, self.steps.len() - word)
	}

	fn direction(&self) -> HorizontalDirection {
		predominant_horizontal_direction(self.steps.iter().map(|s| s.step.direction), DIRECTION_MAJORITY_RATIO)
	}

	/// Judges the finished sequence.
	pub fn check_for_pattern(&self, cx: &PatternContext<'_>) -> Option<PatternMatch> {
		if self.steps.len() < self.config.min_char_steps_for_word {
			return None;
		}
		let direction = self.direction();
		let command = word_select_command(direction)?;
		let (word_steps, char_steps) = self.counts();

		if word_steps >= self.config.min_word_steps_for_line {
			let side = if direction == HorizontalDirection::Right {
				EdgeSide::End
			} else {
				EdgeSide::Start
			};
			let command = edge_select_command(side);
			let message = format!(
				"You selected {word_steps} words one by one. Try {} to select to the line {}!",
				cx.key_hint(command),
				side.as_str()
			);
			return Some(PatternMatch::new(self.id(), command, message).with_sub_pattern(SubPattern::WordToLine));
		}

		let message = format!(
			"You extended the selection {char_steps} times one character at a time. Try {} to select by word!",
			cx.key_hint(command)
		);
		Some(PatternMatch::new(self.id(), command, message).with_sub_pattern(SubPattern::GeneralSelection))
	}

	fn begin_at(&mut self, selection: Selection, ts: Timestamp) {
		self.last_selection = Some(selection);
		self.sequence_start = Some(selection);
		self.last_time = Some(ts);
	}

	fn finish(&mut self, event: &EditingEvent<'_>, cx: &PatternContext<'_>) -> Option<PatternMatch> {
		let found = self.check_for_pattern(cx).map(|found| found.with_event(event));
		if let Some(found) = &found {
			info!(sub = ?found.sub_pattern_id, steps = self.steps.len(), "patterns.text_selection.sequence_match");
		}
		self.reset();
		found
	}

	fn analyze_step(&self, doc: &dyn Document, cx: &PatternContext<'_>, last: Selection, current: Selection, ts: Timestamp) -> Option<SelectionStep> {
		let (last_start, last_end) = (last.start(), last.end());
		let (start, end) = (current.start(), current.end());
		if !start.same_line(last_start) || !end.same_line(last_end) {
			return None;
		}

		let (direction, step_size) = if start == last_start && end.character > last_end.character {
			(Direction::Right, end.character - last_end.character)
		} else if end == last_end && start.character < last_start.character {
			(Direction::Left, last_start.character - start.character)
		} else {
			return None;
		};

		let is_word_step =
			step_size > 1 && cx.was_any_recently_executed(commands::WORD_SELECTION_COMMANDS, self.config.command_window_ms);
		let active = current.active;
		Some(SelectionStep {
			step: NavigationStep {
				timestamp: ts,
				line: active.line,
				character: active.character,
				direction,
				step_size,
				is_word_step,
				was_in_word: is_position_in_word(doc, active),
			},
			start_char: start.character,
			end_char: end.character,
		})
	}

	fn check_smart_patterns(&self, doc: &dyn Document, cx: &PatternContext<'_>, selection: Selection) -> Option<PatternMatch> {
		let (word_steps, char_steps) = self.counts();

		if word_steps >= self.config.min_word_steps_for_line
			&& let Some(found) = self.line_edge_selection(doc, cx, selection, true)
		{
			return Some(found);
		}
		if char_steps < self.config.min_char_steps_for_word {
			return None;
		}
		if !cx.was_any_recently_executed(commands::WORD_SELECTION_COMMANDS, self.config.word_command_window_ms)
			&& let Some(found) = self.word_selection(doc, cx, selection, char_steps)
		{
			return Some(found);
		}
		if char_steps >= self.config.min_char_steps_for_line {
			return self.line_edge_selection(doc, cx, selection, false);
		}
		None
	}

	fn word_selection(&self, doc: &dyn Document, cx: &PatternContext<'_>, selection: Selection, char_steps: usize) -> Option<PatternMatch> {
		if is_position_in_word(doc, selection.active) || !self.steps.any(|s| s.step.was_in_word) {
			return None;
		}
		let command = word_select_command(self.direction())?;
		let message = format!(
			"You extended the selection {char_steps} characters across a word. Try {} to select by word!",
			cx.key_hint(command)
		);
		Some(PatternMatch::new(self.id(), command, message).with_sub_pattern(SubPattern::WordSelection))
	}

	fn line_edge_selection(&self, doc: &dyn Document, cx: &PatternContext<'_>, selection: Selection, by_word: bool) -> Option<PatternMatch> {
		let origin = self.sequence_start?.active;
		let active = selection.active;
		let edge = line_edge_info(doc, active)?;
		if edge.line_text.trim().chars().count() < self.config.min_line_text {
			return None;
		}

		let selecting_left = active.character < selection.anchor.character;
		let side = if edge.at_line_start && selecting_left {
			EdgeSide::Start
		} else if edge.at_line_end && !selecting_left {
			EdgeSide::End
		} else {
			return None;
		};

		let selected = selection.end().character.saturating_sub(selection.start().character);
		if selected < self.config.min_chars_for_line_edge {
			return None;
		}
		let min = self.config.min_chars_for_line_edge;
		let started_away = match side {
			EdgeSide::Start => origin.character > min,
			EdgeSide::End => origin.character + min < edge.line_length,
		};
		if !started_away {
			return None;
		}

		let command = edge_select_command(side);
		let method = if by_word { "word by word" } else { "character by character" };
		let message = format!(
			"You selected to the line {} {method}. Try {} to do it in one keystroke!",
			side.as_str(),
			cx.key_hint(command)
		);
		Some(PatternMatch::new(self.id(), command, message).with_sub_pattern(SubPattern::LineEdgeSelection))
	}
}

impl Default for TextSelectionNavigationPattern {
	fn default() -> Self {
		Self::new(TextSelectionConfig::default())
	}
}

impl Pattern for TextSelectionNavigationPattern {
	fn id(&self) -> PatternId {
		PatternId::TextSelectionNavigation
	}

	fn is_enabled(&self) -> bool {
		self.config.enabled
	}

	fn reset(&mut self) {
		self.steps.reset();
		self.last_selection = None;
		self.sequence_start = None;
		self.last_time = None;
	}

	fn process(&mut self, event: &EditingEvent<'_>, cx: &PatternContext<'_>) -> Option<PatternMatch> {
		let EditKind::Selection { selection } = event.kind else {
			return None;
		};
		let selection = *selection;
		if selection.is_empty() {
			return self.finish(event, cx);
		}
		if cx.was_any_recently_executed(commands::INSTANT_SELECTION_COMMANDS, self.config.command_window_ms) {
			trace!("patterns.text_selection.instant_command");
			self.reset();
			return None;
		}

		let ts = event.timestamp;
		let Some(last) = self.last_selection else {
			self.begin_at(selection, ts);
			return None;
		};

		let gap = self
			.last_time
			.is_some_and(|last_time| ts.saturating_sub(last_time) > self.config.max_step_interval_ms);
		let step = if gap {
			None
		} else {
			self.analyze_step(event.document, cx, last, selection, ts)
		};
		let Some(step) = step else {
			trace!(gap, "patterns.text_selection.sequence_broken");
			let found = self.finish(event, cx);
			self.begin_at(selection, ts);
			return found;
		};

		self.steps.add(step);
		self.last_selection = Some(selection);
		self.last_time = Some(ts);

		let found = self.check_smart_patterns(event.document, cx, selection)?;
		info!(sub = ?found.sub_pattern_id, steps = self.steps.len(), "patterns.text_selection.match");
		self.reset();
		Some(found.with_event(event))
	}
}
