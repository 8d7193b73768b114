//! Read-only view of the document an event refers to.
//!
//! Detectors only ever read line text through [`Document`]. Every lookup is
//! total: a position that no longer exists yields `None`, never a panic, so
//! detectors fail to match instead of failing the host.

use std::borrow::Cow;

use ropey::Rope;
use serde::{Deserialize, Serialize};

use crate::position::{Position, Range};


/// Line-oriented read access to a text document.
pub trait Document {
	/// Returns the number of lines.
	fn line_count(&self) -> usize;

	/// Returns the text of line `idx` without its line terminator.
	fn line_text(&self, idx: usize) -> Option<Cow<'_, str>>;

	/// Returns the text covered by `range`.
	///
	/// Characters past the end of a line clamp to that line's end. Returns
	/// `None` if either line is missing or the range is inverted.
	fn text_in(&self, range: Range) -> Option<String>;

	/// Returns the character length of line `idx`.
	fn line_len(&self, idx: usize) -> Option<usize> {
		self.line_text(idx).map(|line| line.chars().count())
	}

	/// Returns the character at `pos`, if it is inside its line.
	fn char_at(&self, pos: Position) -> Option<char> {
		self.line_text(pos.line)?.chars().nth(pos.character)
	}
}

impl Document for Rope {
	fn line_count(&self) -> usize {
		self.len_lines()
	}

	fn line_text(&self, idx: usize) -> Option<Cow<'_, str>> {
		let slice = self.get_line(idx)?;
		Some(trim_line_ending(Cow::from(slice)))
	}

	fn text_in(&self, range: Range) -> Option<String> {
		let from = rope_char_index(self, range.start)?;
		let to = rope_char_index(self, range.end)?;
		if from > to {
			return None;
		}
		self.get_slice(from..to).map(|slice| slice.to_string())
	}
}

fn rope_char_index(rope: &Rope, pos: Position) -> Option<usize> {
	let line_len = Document::line_len(rope, pos.line)?;
	let line_start = rope.try_line_to_char(pos.line).ok()?;
	Some(line_start + pos.character.min(line_len))
}

impl Document for str {
	fn line_count(&self) -> usize {
		self.split('\n').count()
	}

	fn line_text(&self, idx: usize) -> Option<Cow<'_, str>> {
		self.split('\n').nth(idx).map(|line| Cow::Borrowed(line.trim_end_matches('\r')))
	}

	fn text_in(&self, range: Range) -> Option<String> {
		let from = str_byte_offset(self, range.start)?;
		let to = str_byte_offset(self, range.end)?;
		self.get(from..to).map(str::to_owned)
	}
}

impl Document for String {
	fn line_count(&self) -> usize {
		self.as_str().line_count()
	}

	fn line_text(&self, idx: usize) -> Option<Cow<'_, str>> {
		self.as_str().line_text(idx)
	}

	fn text_in(&self, range: Range) -> Option<String> {
		self.as_str().text_in(range)
	}
}

fn str_byte_offset(text: &str, pos: Position) -> Option<usize> {
	let mut line_start = 0;
	for (idx, raw) in text.split('\n').enumerate() {
		if idx == pos.line {
			let line = raw.trim_end_matches('\r');
			let within = line.char_indices().nth(pos.character).map_or(line.len(), |(byte, _)| byte);
			return Some(line_start + within);
		}
		line_start += raw.len() + 1;
	}
	None
}

fn trim_line_ending(line: Cow<'_, str>) -> Cow<'_, str> {
	match line {
		Cow::Borrowed(text) => Cow::Borrowed(text.trim_end_matches(['\n', '\r'])),
		Cow::Owned(mut text) => {
			let len = text.trim_end_matches(['\n', '\r']).len();
			text.truncate(len);
			Cow::Owned(text)
		}
	}
}

/// Host-assigned identity of an open document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub u64);

/// URI scheme of a document. Only [`UriScheme::File`] documents are observed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UriScheme {
	#[default]
	File,
	/// Output panels, untitled buffers, settings views, and the like.
	Other(String),
}

impl UriScheme {
	/// Returns true for on-disk documents.
	#[inline]
	pub fn is_file(&self) -> bool {
		matches!(self, Self::File)
	}
}

impl From<String> for UriScheme {
	fn from(scheme: String) -> Self {
		if scheme == "file" { Self::File } else { Self::Other(scheme) }
	}
}

impl From<&str> for UriScheme {
	fn from(scheme: &str) -> Self {
		Self::from(scheme.to_owned())
	}
}

impl From<UriScheme> for String {
	fn from(scheme: UriScheme) -> Self {
		match scheme {
			UriScheme::File => "file".to_owned(),
			UriScheme::Other(other) => other,
		}
	}
}

/// Why a text change happened, when it was not a plain user edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeReason {
	Undo,
	Redo,
}
