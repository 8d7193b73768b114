//! Events the host delivers to the tracker.

use nudge_primitives::{ChangeReason, DocumentId, Range, Rope, Selection, UriScheme};
use serde::{Deserialize, Serialize};

/// One content change inside a text-change notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChange {
	/// Replaced range, in pre-change coordinates.
	pub range: Range,
	/// Characters removed.
	pub range_length: usize,
	/// Inserted text. Empty for pure deletions.
	#[serde(default)]
	pub text: String,
	/// Pre-change text of `range`, when the host has it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub removed_text: Option<String>,
}

impl TextChange {
	pub fn insert(range: Range, text: impl Into<String>) -> Self {
		Self {
			range,
			range_length: 0,
			text: text.into(),
			removed_text: None,
		}
	}

	pub fn delete(range: Range, range_length: usize) -> Self {
		Self {
			range,
			range_length,
			text: String::new(),
			removed_text: None,
		}
	}

	pub fn with_removed_text(mut self, removed: impl Into<String>) -> Self {
		self.removed_text = Some(removed.into());
		self
	}
}

/// The editor that now has focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEditor {
	pub document: DocumentId,
	pub scheme: UriScheme,
}

/// A host notification.
///
/// `snapshot` is the affected document after the change. With the default
/// [`Rope`] it is a cheap clone, so events can cross a channel.
#[derive(Debug, Clone)]
pub enum HostEvent<D = Rope> {
	TextChanged {
		document: DocumentId,
		scheme: UriScheme,
		snapshot: D,
		changes: Vec<TextChange>,
		reason: Option<ChangeReason>,
	},
	SelectionChanged {
		document: DocumentId,
		scheme: UriScheme,
		snapshot: D,
		/// All selections; only the primary (first) one is observed.
		selections: Vec<Selection>,
	},
	/// `None` when no text editor has focus.
	ActiveEditorChanged(Option<ActiveEditor>),
	WindowFocusChanged { focused: bool },
	CommandExecuted { command: String },
	MousePressed,
	MouseReleased,
}

impl<D> HostEvent<D> {
	/// Short label for logs.
	pub fn label(&self) -> &'static str {
		match self {
			Self::TextChanged { .. } => "text_changed",
			Self::SelectionChanged { .. } => "selection_changed",
			Self::ActiveEditorChanged(_) => "active_editor_changed",
			Self::WindowFocusChanged { .. } => "window_focus_changed",
			Self::CommandExecuted { .. } => "command_executed",
			Self::MousePressed => "mouse_pressed",
			Self::MouseReleased => "mouse_released",
		}
	}
}
