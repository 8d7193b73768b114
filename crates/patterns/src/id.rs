//! Stable identifiers for detected habits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::commands;

/// Identifies a detector and the habit it recognises.
///
/// The string form is stable and used for per-habit statistics on the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternId {
	LineDeleteBackspace,
	WordDeleteBackspace,
	LineMovementManual,
	LineDuplicationManual,
	WordSelectionRepeated,
	#[serde(rename = "arrow-navigation-excessive")]
	ArrowNavigation,
	TextSelectionNavigation,
}

impl PatternId {
	/// All identifiers in registration order.
	pub const ALL: [Self; 7] = [
		Self::LineDeleteBackspace,
		Self::WordDeleteBackspace,
		Self::LineMovementManual,
		Self::LineDuplicationManual,
		Self::WordSelectionRepeated,
		Self::ArrowNavigation,
		Self::TextSelectionNavigation,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::LineDeleteBackspace => "line-delete-backspace",
			Self::WordDeleteBackspace => "word-delete-backspace",
			Self::LineMovementManual => "line-movement-manual",
			Self::LineDuplicationManual => "line-duplication-manual",
			Self::WordSelectionRepeated => "word-selection-repeated",
			Self::ArrowNavigation => "arrow-navigation-excessive",
			Self::TextSelectionNavigation => "text-selection-navigation",
		}
	}

	/// Human-readable habit name.
	pub fn friendly_name(self) -> &'static str {
		match self {
			Self::LineDeleteBackspace => "Line deletion with Backspace",
			Self::WordDeleteBackspace => "Word deletion character-by-character",
			Self::LineMovementManual => "Manual line movement",
			Self::LineDuplicationManual => "Manual line duplication",
			Self::WordSelectionRepeated => "Repeated word selection",
			Self::ArrowNavigation => "Excessive arrow key navigation",
			Self::TextSelectionNavigation => "Inefficient text selection",
		}
	}

	/// Command suggested when a match does not pick a more specific one.
	pub fn default_command(self) -> &'static str {
		match self {
			Self::LineDeleteBackspace => commands::DELETE_LINES,
			Self::WordDeleteBackspace => commands::DELETE_WORD_LEFT,
			Self::LineMovementManual => commands::MOVE_LINES_UP,
			Self::LineDuplicationManual => commands::COPY_LINES_DOWN,
			Self::WordSelectionRepeated => commands::ADD_SELECTION_TO_NEXT_FIND_MATCH,
			Self::ArrowNavigation => commands::CURSOR_HOME,
			Self::TextSelectionNavigation => commands::CURSOR_WORD_RIGHT_SELECT,
		}
	}

	/// Commands whose execution clears this detector's in-progress state.
	pub fn reset_commands(self) -> &'static [&'static str] {
		match self {
			Self::LineMovementManual => commands::MOVE_LINE_COMMANDS,
			Self::LineDuplicationManual => commands::COPY_LINE_COMMANDS,
			Self::LineDeleteBackspace => &[commands::DELETE_LINES],
			Self::WordDeleteBackspace => commands::WORD_DELETE_COMMANDS,
			_ => &[],
		}
	}
}

impl fmt::Display for PatternId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Unknown pattern identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPatternId(pub String);

impl fmt::Display for UnknownPatternId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unknown pattern id `{}`", self.0)
	}
}

impl std::error::Error for UnknownPatternId {}

impl FromStr for PatternId {
	type Err = UnknownPatternId;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|id| id.as_str() == s)
			.ok_or_else(|| UnknownPatternId(s.to_owned()))
	}
}

/// Refines a match into the concrete variant of the habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubPattern {
	CharByChar,
	WordByWord,
	WordTraversal,
	LineTraversal,
	WordJumpToLineEdge,
	EdgeBounce,
	PageScroll,
	FileJump,
	WordSelection,
	LineEdgeSelection,
	WordToLine,
	GeneralSelection,
}

impl SubPattern {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::CharByChar => "char-by-char",
			Self::WordByWord => "word-by-word",
			Self::WordTraversal => "word-traversal",
			Self::LineTraversal => "line-traversal",
			Self::WordJumpToLineEdge => "word-jump-to-line-edge",
			Self::EdgeBounce => "edge-bounce",
			Self::PageScroll => "page-scroll",
			Self::FileJump => "file-jump",
			Self::WordSelection => "word-selection",
			Self::LineEdgeSelection => "line-edge-selection",
			Self::WordToLine => "word-to-line",
			Self::GeneralSelection => "general-selection",
		}
	}

	/// Human-readable name, where the sub-pattern has one of its own.
	pub fn friendly_name(self) -> Option<&'static str> {
		Some(match self {
			Self::WordTraversal => "Word-by-word arrow navigation",
			Self::LineTraversal => "Line start/end arrow navigation",
			Self::EdgeBounce => "Line edge bouncing",
			Self::PageScroll => "Page scrolling with arrows",
			Self::FileJump => "File navigation with arrows",
			Self::WordSelection => "Word selection with Shift+Arrow",
			Self::LineEdgeSelection => "Line edge selection with Shift+Arrow",
			Self::GeneralSelection => "Slow text selection",
			_ => return None,
		})
	}
}

impl fmt::Display for SubPattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Friendly name for a `pattern` or `pattern:sub` key, falling back to the key itself.
pub fn friendly_name(key: &str) -> String {
	let (pattern, sub) = match key.split_once(':') {
		Some((pattern, sub)) => (pattern, Some(sub)),
		None => (key, None),
	};
	let sub_name = sub.and_then(|sub| {
		[
			SubPattern::WordTraversal,
			SubPattern::LineTraversal,
			SubPattern::EdgeBounce,
			SubPattern::PageScroll,
			SubPattern::FileJump,
			SubPattern::WordSelection,
			SubPattern::LineEdgeSelection,
			SubPattern::GeneralSelection,
		]
		.into_iter()
		.find(|candidate| candidate.as_str() == sub)
		.and_then(SubPattern::friendly_name)
	});
	if let Some(name) = sub_name {
		return name.to_owned();
	}
	pattern
		.parse::<PatternId>()
		.map(|id| id.friendly_name().to_owned())
		.unwrap_or_else(|_| key.to_owned())
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	#[test]
	fn ids_round_trip_through_str() {
		for id in PatternId::ALL {
			assert_eq!(id.as_str().parse::<PatternId>(), Ok(id));
			assert_eq!(serde_json::to_string(&id).unwrap(), format!("\"{}\"", id.as_str()));
		}
		assert!("line-delete".parse::<PatternId>().is_err());
	}

	#[rstest]
	#[case("line-delete-backspace", "Line deletion with Backspace")]
	#[case("arrow-navigation-excessive:edge-bounce", "Line edge bouncing")]
	#[case("arrow-navigation-excessive:word-jump-to-line-edge", "Excessive arrow key navigation")]
	#[case("text-selection-navigation:general-selection", "Slow text selection")]
	#[case("something-else", "something-else")]
	fn friendly_names(#[case] key: &str, #[case] expected: &str) {
		assert_eq!(friendly_name(key), expected);
	}
}
