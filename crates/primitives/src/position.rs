use serde::{Deserialize, Serialize};

/// A position in line/character coordinates.
///
/// Characters are Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
	/// Zero-based line index.
	pub line: usize,
	/// Zero-based character offset in the line.
	pub character: usize,
}

impl Position {
	/// Creates a new position.
	pub const fn new(line: usize, character: usize) -> Self {
		Self { line, character }
	}

	/// Returns true if both positions are on the same line.
	#[inline]
	pub fn same_line(&self, other: Position) -> bool {
		self.line == other.line
	}
}

/// A range with start and end positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
	/// Start position (inclusive).
	pub start: Position,
	/// End position (exclusive).
	pub end: Position,
}

impl Range {
	/// Creates a new range.
	pub const fn new(start: Position, end: Position) -> Self {
		Self { start, end }
	}

	/// Creates a range on a single line spanning `from..to` characters.
	pub const fn on_line(line: usize, from: usize, to: usize) -> Self {
		Self {
			start: Position::new(line, from),
			end: Position::new(line, to),
		}
	}

	/// Creates a zero-length range at a position.
	pub const fn point(pos: Position) -> Self {
		Self { start: pos, end: pos }
	}

	/// Returns true if start and end coincide.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	/// Returns true if the range does not cross a line break.
	#[inline]
	pub fn is_single_line(&self) -> bool {
		self.start.line == self.end.line
	}

	/// Returns true if `pos` lies within `start..end`.
	pub fn contains(&self, pos: Position) -> bool {
		self.start <= pos && pos < self.end
	}
}
