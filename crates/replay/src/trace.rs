//! The JSON-lines trace format.
//!
//! One host event per line:
//!
//! ```text
//! {"at": 0, "type": "open", "document": 1, "text": "hello\n"}
//! {"at": 0, "type": "focus_editor", "document": 1}
//! {"at": 50, "type": "edit", "document": 1, "range": {"start": {"line": 0, "character": 4}, "end": {"line": 0, "character": 5}}, "text": ""}
//! {"at": 90, "type": "select", "document": 1, "anchor": {"line": 0, "character": 4}, "active": {"line": 0, "character": 4}}
//! {"at": 120, "type": "command", "id": "cursorWordRight"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use nudge_primitives::{ChangeReason, DocumentId, Position, Range, Timestamp, UriScheme};
use serde::Deserialize;

use crate::error::{ReplayError, Result};

/// One trace line: when it happened and what happened.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TraceLine {
	pub at: Timestamp,
	#[serde(flatten)]
	pub event: TraceEvent,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceEvent {
	Open {
		document: DocumentId,
		#[serde(default)]
		scheme: UriScheme,
		text: String,
	},
	/// A `null` document means no text editor has focus.
	FocusEditor { document: Option<DocumentId> },
	/// Replace `range` (pre-change coordinates) with `text`.
	Edit {
		document: DocumentId,
		range: Range,
		#[serde(default)]
		text: String,
		#[serde(default)]
		reason: Option<ChangeReason>,
	},
	Select {
		document: DocumentId,
		anchor: Position,
		active: Position,
	},
	Command { id: String },
	MouseDown,
	MouseUp,
	WindowFocus { focused: bool },
}

/// Parses trace line `number` (1-based). Returns `None` for blank and comment lines.
pub fn parse_line(number: usize, raw: &str) -> Result<Option<TraceLine>> {
	let raw = raw.trim();
	if raw.is_empty() || raw.starts_with('#') {
		return Ok(None);
	}
	serde_json::from_str(raw)
		.map(Some)
		.map_err(|source| ReplayError::Parse { line: number, source })
}
