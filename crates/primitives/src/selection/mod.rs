use serde::{Deserialize, Serialize};

use crate::position::{Position, Range};


/// A selection defined by anchor and active positions.
///
/// The anchor is the fixed end; the active end is where the cursor is and
/// moves when the selection is extended. An empty selection is a plain cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
	/// The fixed end of the selection.
	pub anchor: Position,
	/// The moving end of the selection (cursor position).
	pub active: Position,
}

impl Selection {
	/// Creates a new selection from anchor to active.
	pub const fn new(anchor: Position, active: Position) -> Self {
		Self { anchor, active }
	}

	/// Creates an empty selection (cursor) at the given position.
	pub const fn cursor(pos: Position) -> Self {
		Self::new(pos, pos)
	}

	/// Returns the earlier of anchor and active.
	#[inline]
	pub fn start(&self) -> Position {
		std::cmp::min(self.anchor, self.active)
	}

	/// Returns the later of anchor and active.
	#[inline]
	pub fn end(&self) -> Position {
		std::cmp::max(self.anchor, self.active)
	}

	/// Returns true if anchor equals active.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.anchor == self.active
	}

	/// Returns true if the active end is before the anchor.
	#[inline]
	pub fn is_reversed(&self) -> bool {
		self.active < self.anchor
	}

	/// Returns true if both ends are on the same line.
	#[inline]
	pub fn is_single_line(&self) -> bool {
		self.anchor.line == self.active.line
	}

	/// Returns the covered range, ordered start to end.
	pub fn range(&self) -> Range {
		Range::new(self.start(), self.end())
	}
}
