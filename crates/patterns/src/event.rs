//! Editing events fed to detectors and the matches they produce.

use std::fmt;

use nudge_primitives::{ChangeReason, Document, Range, Selection, Timestamp};
use serde::{Deserialize, Serialize};

use crate::id::{PatternId, SubPattern};

/// What happened in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditKind {
	/// Text inserted at an empty range.
	Insert { range: Range, text: String },
	/// Text removed without replacement.
	Delete {
		range: Range,
		/// Number of characters removed.
		range_length: usize,
		/// Pre-change text of `range`, when the host supplies it.
		#[serde(default, skip_serializing_if = "Option::is_none")]
		removed_text: Option<String>,
	},
	/// Text removed and replaced in one change.
	Replace {
		range: Range,
		range_length: usize,
		text: String,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		removed_text: Option<String>,
	},
	/// Primary selection or cursor moved.
	Selection { selection: Selection },
}

impl EditKind {
	/// Classifies a host content change by what it removed and inserted.
	///
	/// Non-empty text over a non-empty range is a replace, text alone an
	/// insert, and anything else a delete.
	pub fn from_change(range: Range, range_length: usize, text: String, removed_text: Option<String>) -> Self {
		match (text.is_empty(), range_length > 0) {
			(false, true) => Self::Replace {
				range,
				range_length,
				text,
				removed_text,
			},
			(false, false) => Self::Insert { range, text },
			(true, _) => Self::Delete {
				range,
				range_length,
				removed_text,
			},
		}
	}

	/// Returns the changed range for text edits.
	pub fn range(&self) -> Option<Range> {
		match self {
			Self::Insert { range, .. } | Self::Delete { range, .. } | Self::Replace { range, .. } => Some(*range),
			Self::Selection { .. } => None,
		}
	}

	/// Returns inserted text for inserts and replaces.
	pub fn text(&self) -> Option<&str> {
		match self {
			Self::Insert { text, .. } | Self::Replace { text, .. } => Some(text),
			_ => None,
		}
	}

	/// Returns the selection for selection events.
	pub fn selection(&self) -> Option<Selection> {
		match self {
			Self::Selection { selection } => Some(*selection),
			_ => None,
		}
	}

	/// Returns a short label for logs.
	pub fn label(&self) -> &'static str {
		match self {
			Self::Insert { .. } => "insert",
			Self::Delete { .. } => "delete",
			Self::Replace { .. } => "replace",
			Self::Selection { .. } => "selection",
		}
	}
}

/// One event as seen by detectors.
///
/// `document` is the affected document in its post-change state. Detectors
/// only read line text from it.
#[derive(Clone, Copy)]
pub struct EditingEvent<'a> {
	pub kind: &'a EditKind,
	pub timestamp: Timestamp,
	pub document: &'a dyn Document,
	pub reason: Option<ChangeReason>,
}

impl<'a> EditingEvent<'a> {
	/// Creates a user event (no undo/redo reason).
	pub fn new(kind: &'a EditKind, timestamp: Timestamp, document: &'a dyn Document) -> Self {
		Self {
			kind,
			timestamp,
			document,
			reason: None,
		}
	}

	/// Returns an owned, document-free copy for logs and matches.
	pub fn record(&self) -> EventRecord {
		EventRecord {
			kind: self.kind.clone(),
			timestamp: self.timestamp,
		}
	}
}

impl fmt::Debug for EditingEvent<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EditingEvent")
			.field("kind", self.kind)
			.field("timestamp", &self.timestamp)
			.field("reason", &self.reason)
			.finish_non_exhaustive()
	}
}

/// An event detached from its document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
	#[serde(flatten)]
	pub kind: EditKind,
	pub timestamp: Timestamp,
}

/// One successful detection.
///
/// `detected_events` holds the event that completed the detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternMatch {
	pub pattern_id: PatternId,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sub_pattern_id: Option<SubPattern>,
	pub suggested_command: String,
	pub message: String,
	pub detected_events: Vec<EventRecord>,
}

impl PatternMatch {
	/// Creates a match without a sub-pattern.
	pub fn new(pattern_id: PatternId, suggested_command: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			pattern_id,
			sub_pattern_id: None,
			suggested_command: suggested_command.into(),
			message: message.into(),
			detected_events: Vec::new(),
		}
	}

	/// Sets the sub-pattern.
	pub fn with_sub_pattern(mut self, sub: SubPattern) -> Self {
		self.sub_pattern_id = Some(sub);
		self
	}

	/// Attaches the completing event.
	pub fn with_event(mut self, event: &EditingEvent<'_>) -> Self {
		self.detected_events.push(event.record());
		self
	}

	/// Returns `pattern` or `pattern:sub` for per-habit bookkeeping.
	pub fn key(&self) -> String {
		match self.sub_pattern_id {
			Some(sub) => format!("{}:{}", self.pattern_id, sub),
			None => self.pattern_id.to_string(),
		}
	}
}
