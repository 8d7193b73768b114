//! Stateless helpers shared by detectors.
//!
//! All of these are total: an out-of-range position or a missing line yields
//! the neutral answer (`false`, `None`, [`Direction::Unknown`]) instead of an error.


use std::sync::LazyLock;

use nudge_primitives::{Direction, Document, HorizontalDirection, Position, Timestamp};
use regex::Regex;

use crate::sequence::Timestamped;

/// Inactivity window after which a detector abandons its hypothesis.
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;
/// Longest gap between two steps of one navigation sequence.
pub const DEFAULT_MAX_STEP_INTERVAL_MS: u64 = 1000;
/// Intervals shorter than this are treated as programmatic, not human.
pub const FAST_ACTION_THRESHOLD_MS: u64 = 150;
/// Share of steps one direction needs to count as predominant.
pub const DIRECTION_MAJORITY_RATIO: f64 = 0.7;

/// Characters that end a word for deletion purposes.
pub const WORD_BOUNDARY_CHARS: &[char] = &[
	'.', ',', '(', ')', '[', ']', '{', '}', ' ', '\t', ';', ':', '"', '\'', '<', '>', '/', '\\', '|', '!', '?', '@', '#', '$', '%', '^',
	'&', '*', '+', '=', '-', '~', '`',
];

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w+$").expect("word regex is valid"));

/// One cursor movement in a navigation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationStep {
	pub timestamp: Timestamp,
	pub line: usize,
	pub character: usize,
	pub direction: Direction,
	pub step_size: usize,
	/// Moved more than one unit at once.
	pub is_word_step: bool,
	/// The position the step is measured from sat inside a word.
	pub was_in_word: bool,
}

impl Timestamped for NavigationStep {
	fn timestamp(&self) -> Timestamp {
		self.timestamp
	}
}

/// A selection-growing step: a [`NavigationStep`] at the active end plus the selection bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionStep {
	pub step: NavigationStep,
	pub start_char: usize,
	pub end_char: usize,
}

impl Timestamped for SelectionStep {
	fn timestamp(&self) -> Timestamp {
		self.step.timestamp
	}
}

/// Where a position sits relative to its line's edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdgeInfo {
	pub at_line_start: bool,
	pub at_line_end: bool,
	pub line_length: usize,
	pub line_text: String,
}

impl LineEdgeInfo {
	pub fn at_edge(&self) -> bool {
		self.at_line_start || self.at_line_end
	}
}

/// Returns the direction holding at least `min_ratio` of `directions`.
///
/// Only directional steps count towards the total; [`Direction::Unknown`]
/// inputs are skipped. Ties resolve to the first of left, right, up, down.
/// No directional input or no majority yields [`Direction::Unknown`].
pub fn predominant_direction(directions: impl IntoIterator<Item = Direction>, min_ratio: f64) -> Direction {
	const ORDER: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

	let mut counts = [0usize; 4];
	let mut total = 0usize;
	for direction in directions {
		if let Some(slot) = ORDER.iter().position(|d| *d == direction) {
			counts[slot] += 1;
			total += 1;
		}
	}
	if total == 0 {
		return Direction::Unknown;
	}

	let mut best = (Direction::Unknown, 0usize);
	for (direction, count) in ORDER.into_iter().zip(counts) {
		if count > best.1 {
			best = (direction, count);
		}
	}

	if (best.1 as f64) < total as f64 * min_ratio {
		return Direction::Unknown;
	}
	best.0
}

/// Like [`predominant_direction`] over the horizontal members of `directions` only.
pub fn predominant_horizontal_direction(directions: impl IntoIterator<Item = Direction>, min_ratio: f64) -> HorizontalDirection {
	predominant_direction(directions.into_iter().filter(|d| d.is_horizontal()), min_ratio).horizontal()
}

/// Returns true if each position follows its predecessor per `expected_next`.
pub fn is_continuous_sequence(positions: &[Position], expected_next: impl Fn(Position) -> Option<Position>) -> bool {
	positions.windows(2).all(|pair| expected_next(pair[0]) == Some(pair[1]))
}

/// Returns true if any two consecutive timestamps are closer than `threshold_ms`.
pub fn is_too_fast(timestamps: &[Timestamp], threshold_ms: u64) -> bool {
	timestamps.windows(2).any(|pair| pair[1].saturating_sub(pair[0]) < threshold_ms)
}

/// Returns true if `text` is non-empty and made of word characters only.
pub fn is_word_text(text: &str) -> bool {
	WORD.is_match(text)
}

/// Returns true if `c` is a word character.
pub fn is_word_char(c: char) -> bool {
	let mut buf = [0u8; 4];
	is_word_text(c.encode_utf8(&mut buf))
}

/// Returns true if the character at `pos` is a word character.
pub fn is_position_in_word(doc: &dyn Document, pos: Position) -> bool {
	doc.char_at(pos).is_some_and(is_word_char)
}

pub fn is_word_boundary(c: char) -> bool {
	WORD_BOUNDARY_CHARS.contains(&c)
}

/// Describes `pos` relative to its line, or `None` if the line does not exist.
pub fn line_edge_info(doc: &dyn Document, pos: Position) -> Option<LineEdgeInfo> {
	let line_text = doc.line_text(pos.line)?.into_owned();
	let line_length = line_text.chars().count();
	Some(LineEdgeInfo {
		at_line_start: pos.character == 0,
		at_line_end: pos.character >= line_length,
		line_length,
		line_text,
	})
}

pub fn is_at_line_edge(doc: &dyn Document, pos: Position) -> bool {
	line_edge_info(doc, pos).is_some_and(|info| info.at_edge())
}

/// Mean gap between consecutive timestamps, `0.0` with fewer than two.
pub fn average_time_diff(timestamps: &[Timestamp]) -> f64 {
	if timestamps.len() < 2 {
		return 0.0;
	}
	let total: u64 = timestamps.windows(2).map(|pair| pair[1].saturating_sub(pair[0])).sum();
	total as f64 / (timestamps.len() - 1) as f64
}
