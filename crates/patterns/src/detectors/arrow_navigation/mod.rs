//! Excessive arrow-key navigation.
//!
//! Cursor-only selection events are turned into [`NavigationStep`]s. While the
//! sequence grows, three horizontal habits are checked after every step:
//!
//! - word jumps that end at a line edge far from where they started
//! - single-character moves that end at a line edge
//! - single-character moves that walk out of a word
//!
//! Vertical habits (page scrolling, file navigation) are judged when the
//! sequence ends. Pressing an arrow key against a line edge that the cursor
//! cannot pass is recorded as an edge bounce.


use std::cmp::Ordering;

use nudge_primitives::{Direction, Document, EdgeSide, HorizontalDirection, Position, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::commands;
use crate::context::PatternContext;
use crate::event::{EditKind, EditingEvent, PatternMatch};
use crate::id::{PatternId, SubPattern};
use crate::pattern::Pattern;
use crate::sequence::{SequenceConfig, SequenceTracker};
use crate::utils::{
	DEFAULT_MAX_STEP_INTERVAL_MS, DEFAULT_TIMEOUT_MS, DIRECTION_MAJORITY_RATIO, LineEdgeInfo, NavigationStep, is_position_in_word,
	line_edge_info, predominant_horizontal_direction,
};

pub const MAX_TRACKED: usize = 50;
pub const EDGE_BOUNCE_INTERVAL_MS: u64 = 300;
pub const REQUIRED_EDGE_BOUNCES: usize = 2;
pub const MIN_MOVES_BEFORE_BOUNCE: usize = 3;
pub const MIN_CHAR_MOVES_FOR_WORD: usize = 5;
pub const MIN_CHAR_MOVES_FOR_LINE: usize = 5;
pub const MIN_WORD_JUMPS_FOR_LINE: usize = 3;
pub const MIN_CHARS_FOR_LINE_TRAVERSAL: usize = 5;
pub const MIN_VERTICAL_MOVES: usize = 5;
pub const FILE_JUMP_VERTICAL_MOVES: usize = 15;
/// Column change tolerated on a vertical step.
pub const MAX_VERTICAL_DRIFT: usize = 3;
/// Cursor moves this soon after an edit command are the edit's side effect.
pub const EDIT_SUPPRESSION_MS: u64 = 200;
pub const COMMAND_WINDOW_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArrowNavigationConfig {
	pub enabled: bool,
	pub sequence: SequenceConfig,
	pub max_move_interval_ms: u64,
	pub edge_bounce_interval_ms: u64,
	pub required_edge_bounces: usize,
	pub min_moves_before_bounce: usize,
	pub min_char_moves_for_word: usize,
	pub min_char_moves_for_line: usize,
	pub min_word_jumps_for_line: usize,
	pub min_chars_for_line_traversal: usize,
	pub min_vertical_moves: usize,
	pub file_jump_vertical_moves: usize,
	pub max_vertical_drift: usize,
	pub edit_suppression_ms: u64,
	/// Window in which an instant-navigation or word-jump command explains a move.
	pub command_window_ms: u64,
}

impl Default for ArrowNavigationConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			sequence: SequenceConfig::new(MAX_TRACKED, DEFAULT_TIMEOUT_MS),
			max_move_interval_ms: DEFAULT_MAX_STEP_INTERVAL_MS,
			edge_bounce_interval_ms: EDGE_BOUNCE_INTERVAL_MS,
			required_edge_bounces: REQUIRED_EDGE_BOUNCES,
			min_moves_before_bounce: MIN_MOVES_BEFORE_BOUNCE,
			min_char_moves_for_word: MIN_CHAR_MOVES_FOR_WORD,
			min_char_moves_for_line: MIN_CHAR_MOVES_FOR_LINE,
			min_word_jumps_for_line: MIN_WORD_JUMPS_FOR_LINE,
			min_chars_for_line_traversal: MIN_CHARS_FOR_LINE_TRAVERSAL,
			min_vertical_moves: MIN_VERTICAL_MOVES,
			file_jump_vertical_moves: FILE_JUMP_VERTICAL_MOVES,
			max_vertical_drift: MAX_VERTICAL_DRIFT,
			edit_suppression_ms: EDIT_SUPPRESSION_MS,
			command_window_ms: COMMAND_WINDOW_MS,
		}
	}
}

enum Bounce {
	/// Not a bounce; treat as a broken sequence.
	Rejected,
	Counted,
	Matched(PatternMatch),
}

#[derive(Debug)]
pub struct ArrowNavigationPattern {
	config: ArrowNavigationConfig,
	moves: SequenceTracker<NavigationStep>,
	last_position: Option<Position>,
	sequence_start: Option<Position>,
	last_time: Option<Timestamp>,
	edge_bounces: usize,
	last_bounce_time: Option<Timestamp>,
}

fn edge_command(side: EdgeSide) -> &'static str {
	match side {
		EdgeSide::Start => commands::CURSOR_HOME,
		EdgeSide::End => commands::CURSOR_END,
	}
}

/// Prefers the end for empty lines, where both edges coincide.
fn edge_side(edge: &LineEdgeInfo) -> Option<EdgeSide> {
	if edge.at_line_end {
		Some(EdgeSide::End)
	} else if edge.at_line_start {
		Some(EdgeSide::Start)
	} else {
		None
	}
}

impl ArrowNavigationPattern {
	pub fn new(config: ArrowNavigationConfig) -> Self {
		Self {
			config,
			moves: SequenceTracker::new(config.sequence),
			last_position: None,
			sequence_start: None,
			last_time: None,
			edge_bounces: 0,
			last_bounce_time: None,
		}
	}

	/// Judges the vertical part of the current sequence.
	///
	/// Enough up/down steps suggest page scrolling; many more suggest jumping
	/// to the top or bottom of the file.
	pub fn check_for_pattern(&self, cx: &PatternContext<'_>) -> Option<PatternMatch> {
		let (mut up, mut down) = (0usize, 0usize);
		for step in self.moves.iter() {
			match step.direction {
				Direction::Up => up += 1,
				Direction::Down => down += 1,
				_ => {}
			}
		}
		let vertical = up + down;
		if vertical < self.config.min_vertical_moves {
			return None;
		}

		let downward = down > up;
		let (command, sub, target) = if vertical >= self.config.file_jump_vertical_moves {
			let command = if downward { commands::CURSOR_BOTTOM } else { commands::CURSOR_TOP };
			(command, SubPattern::FileJump, if downward { "bottom of the file" } else { "top of the file" })
		} else {
			let command = if downward {
				commands::CURSOR_PAGE_DOWN
			} else {
				commands::CURSOR_PAGE_UP
			};
			(command, SubPattern::PageScroll, if downward { "next page" } else { "previous page" })
		};
		let message = format!(
			"You pressed an arrow key {vertical} times to move vertically. Try {} to jump to the {target}!",
			cx.key_hint(command)
		);
		info!(up, down, sub = %sub, "patterns.arrow_navigation.vertical_match");
		Some(PatternMatch::new(self.id(), command, message).with_sub_pattern(sub))
	}

	fn begin_at(&mut self, pos: Position, ts: Timestamp) {
		self.last_position = Some(pos);
		self.sequence_start = Some(pos);
		self.last_time = Some(ts);
	}

	/// Ends the current sequence and starts a new one at `pos`.
	fn restart(&mut self, pos: Position, event: &EditingEvent<'_>, cx: &PatternContext<'_>) -> Option<PatternMatch> {
		let found = self.check_for_pattern(cx).map(|found| found.with_event(event));
		self.reset();
		self.begin_at(pos, event.timestamp);
		found
	}

	fn at_line_end(doc: &dyn Document, pos: Position) -> bool {
		doc.line_len(pos.line).is_some_and(|len| pos.character >= len)
	}

	fn analyze_movement(&self, doc: &dyn Document, last: Position, pos: Position, ts: Timestamp) -> Option<NavigationStep> {
		let (direction, step_size) = if pos.line == last.line {
			match pos.character.cmp(&last.character) {
				Ordering::Greater => (Direction::Right, pos.character - last.character),
				Ordering::Less => (Direction::Left, last.character - pos.character),
				Ordering::Equal => return None,
			}
		} else {
			// Moving onto a shorter line clamps the column, and moving off it restores it.
			let drift_ok = pos.character.abs_diff(last.character) <= self.config.max_vertical_drift
				|| Self::at_line_end(doc, pos)
				|| Self::at_line_end(doc, last);
			if !drift_ok {
				return None;
			}
			let direction = if pos.line > last.line { Direction::Down } else { Direction::Up };
			(direction, pos.line.abs_diff(last.line))
		};

		Some(NavigationStep {
			timestamp: ts,
			line: pos.line,
			character: pos.character,
			direction,
			step_size,
			is_word_step: step_size > 1,
			was_in_word: is_position_in_word(doc, last),
		})
	}

	fn register_bounce(&mut self, event: &EditingEvent<'_>, cx: &PatternContext<'_>, pos: Position) -> Bounce {
		if self.moves.len() < self.config.min_moves_before_bounce {
			return Bounce::Rejected;
		}
		let Some(direction) = self.moves.last().map(|step| step.direction) else {
			return Bounce::Rejected;
		};
		let Some(edge) = line_edge_info(event.document, pos) else {
			return Bounce::Rejected;
		};
		let side = match direction {
			Direction::Right if edge.at_line_end => EdgeSide::End,
			Direction::Left if edge.at_line_start => EdgeSide::Start,
			_ => return Bounce::Rejected,
		};

		let ts = event.timestamp;
		let chained = self
			.last_bounce_time
			.is_some_and(|last| ts.saturating_sub(last) < self.config.edge_bounce_interval_ms);
		self.edge_bounces = if chained { self.edge_bounces + 1 } else { 1 };
		self.last_bounce_time = Some(ts);
		self.last_time = Some(ts);
		trace!(bounces = self.edge_bounces, side = side.as_str(), "patterns.arrow_navigation.bounce");

		if self.edge_bounces < self.config.required_edge_bounces {
			return Bounce::Counted;
		}

		let command = edge_command(side);
		let message = format!(
			"You kept pressing the arrow key at the line {}. Try {} to get there in one keystroke!",
			side.as_str(),
			cx.key_hint(command)
		);
		debug!(bounces = self.edge_bounces, side = side.as_str(), "patterns.arrow_navigation.edge_bounce");
		let found = PatternMatch::new(self.id(), command, message)
			.with_sub_pattern(SubPattern::EdgeBounce)
			.with_event(event);
		self.reset();
		Bounce::Matched(found)
	}

	fn check_smart_patterns(&self, doc: &dyn Document, cx: &PatternContext<'_>, pos: Position) -> Option<PatternMatch> {
		let word_jumps = self.moves.filter(|step| step.is_word_step).count();
		let char_moves = self.moves.len() - word_jumps;

		if word_jumps >= self.config.min_word_jumps_for_line
			&& let Some(found) = self.word_jumps_to_line_edge(doc, cx, pos, word_jumps)
		{
			return Some(found);
		}

		if char_moves < self.config.min_char_moves_for_word {
			return None;
		}
		if char_moves >= self.config.min_char_moves_for_line
			&& let Some(found) = self.line_traversal(doc, cx, pos, char_moves)
		{
			return Some(found);
		}
		self.word_traversal(doc, cx, pos, char_moves)
	}

	/// Edge reached on the sequence's starting line, and the side it sits on.
	fn edge_on_start_line(&self, doc: &dyn Document, pos: Position) -> Option<(Position, LineEdgeInfo, EdgeSide)> {
		let start = self.sequence_start?;
		if start.line != pos.line {
			return None;
		}
		let edge = line_edge_info(doc, pos)?;
		let side = edge_side(&edge)?;
		Some((start, edge, side))
	}

	fn horizontal_direction(&self) -> HorizontalDirection {
		predominant_horizontal_direction(self.moves.iter().map(|step| step.direction), DIRECTION_MAJORITY_RATIO)
	}

	fn word_jumps_to_line_edge(&self, doc: &dyn Document, cx: &PatternContext<'_>, pos: Position, jumps: usize) -> Option<PatternMatch> {
		let (start, edge, side) = self.edge_on_start_line(doc, pos)?;
		let distance = match side {
			EdgeSide::End => edge.line_length.saturating_sub(start.character),
			EdgeSide::Start => start.character,
		};
		if distance < self.config.min_chars_for_line_traversal {
			return None;
		}

		let command = edge_command(side);
		let message = format!(
			"You jumped {jumps} words to reach the line {}. Try {} to get there directly!",
			side.as_str(),
			cx.key_hint(command)
		);
		Some(PatternMatch::new(self.id(), command, message).with_sub_pattern(SubPattern::WordJumpToLineEdge))
	}

	fn line_traversal(&self, doc: &dyn Document, cx: &PatternContext<'_>, pos: Position, moves: usize) -> Option<PatternMatch> {
		let (start, _, side) = self.edge_on_start_line(doc, pos)?;
		if pos.character.abs_diff(start.character) < self.config.min_chars_for_line_traversal {
			return None;
		}
		if self.horizontal_direction() == HorizontalDirection::Unknown {
			return None;
		}

		let command = edge_command(side);
		let message = format!(
			"You pressed the arrow key {moves} times to reach the line {}. Try {} to get there directly!",
			side.as_str(),
			cx.key_hint(command)
		);
		Some(PatternMatch::new(self.id(), command, message).with_sub_pattern(SubPattern::LineTraversal))
	}

	fn word_traversal(&self, doc: &dyn Document, cx: &PatternContext<'_>, pos: Position, moves: usize) -> Option<PatternMatch> {
		if is_position_in_word(doc, pos) || !self.moves.any(|step| step.was_in_word) {
			return None;
		}
		let command = match self.horizontal_direction() {
			HorizontalDirection::Right => commands::CURSOR_WORD_RIGHT,
			HorizontalDirection::Left => commands::CURSOR_WORD_LEFT,
			HorizontalDirection::Unknown => return None,
		};
		let message = format!(
			"You pressed the arrow key {moves} times to cross a word. Try {} to move by word!",
			cx.key_hint(command)
		);
		Some(PatternMatch::new(self.id(), command, message).with_sub_pattern(SubPattern::WordTraversal))
	}
}

impl Default for ArrowNavigationPattern {
	fn default() -> Self {
		Self::new(ArrowNavigationConfig::default())
	}
}

impl Pattern for ArrowNavigationPattern {
	fn id(&self) -> PatternId {
		PatternId::ArrowNavigation
	}

	fn is_enabled(&self) -> bool {
		self.config.enabled
	}

	fn reset(&mut self) {
		self.moves.reset();
		self.last_position = None;
		self.sequence_start = None;
		self.last_time = None;
		self.edge_bounces = 0;
		self.last_bounce_time = None;
	}

	fn process(&mut self, event: &EditingEvent<'_>, cx: &PatternContext<'_>) -> Option<PatternMatch> {
		let EditKind::Selection { selection } = event.kind else {
			return None;
		};
		if !selection.is_empty() {
			let found = self.check_for_pattern(cx).map(|found| found.with_event(event));
			self.reset();
			return found;
		}
		// Typing or an instant jump moved the cursor; the run so far is discarded unjudged.
		if cx.was_any_recently_executed(commands::EDIT_COMMANDS, self.config.edit_suppression_ms) {
			trace!("patterns.arrow_navigation.edit_side_effect");
			self.reset();
			return None;
		}
		if cx.was_any_recently_executed(commands::INSTANT_NAVIGATION_COMMANDS, self.config.command_window_ms) {
			trace!("patterns.arrow_navigation.instant_command");
			self.reset();
			return None;
		}

		let pos = selection.active;
		let ts = event.timestamp;
		let Some(last) = self.last_position else {
			self.begin_at(pos, ts);
			return None;
		};

		if self
			.last_time
			.is_some_and(|last_time| ts.saturating_sub(last_time) > self.config.max_move_interval_ms)
		{
			trace!("patterns.arrow_navigation.gap");
			return self.restart(pos, event, cx);
		}

		if pos == last {
			return match self.register_bounce(event, cx, pos) {
				Bounce::Counted => None,
				Bounce::Matched(found) => Some(found),
				Bounce::Rejected => self.restart(pos, event, cx),
			};
		}

		let Some(step) = self.analyze_movement(event.document, last, pos, ts) else {
			return self.restart(pos, event, cx);
		};
		if step.is_word_step
			&& step.direction.is_horizontal()
			&& !cx.was_any_recently_executed(commands::WORD_JUMP_COMMANDS, self.config.command_window_ms)
		{
			trace!(size = step.step_size, "patterns.arrow_navigation.unexplained_jump");
			return self.restart(pos, event, cx);
		}

		self.moves.add(step);
		self.last_position = Some(pos);
		self.last_time = Some(ts);

		let found = self.check_smart_patterns(event.document, cx, pos)?;
		info!(
			sub = ?found.sub_pattern_id,
			moves = self.moves.len(),
			command = %found.suggested_command,
			"patterns.arrow_navigation.match"
		);
		self.reset();
		Some(found.with_event(event))
	}
}
