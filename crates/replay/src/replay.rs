//! Drives a trace through an [`EditorActionTracker`].

use std::io::BufRead;

use nudge_config::Config;
use nudge_keymap::KeybindingTable;
use nudge_primitives::{Clock, Document, DocumentId, ManualClock, Position, Range, Rope, Selection, UriScheme};
use nudge_tracker::{ActiveEditor, EditorActionTracker, HostEvent, Notifier, TextChange};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::error::{ReplayError, Result};
use crate::trace::{TraceEvent, TraceLine, parse_line};

/// Counts for a finished replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
	pub events: usize,
	pub matches: usize,
}

#[derive(Debug)]
struct OpenDocument {
	scheme: UriScheme,
	text: Rope,
}

/// Host stand-in: owns the documents, applies edits and stamps time.
pub struct Replay<N: Notifier> {
	tracker: EditorActionTracker<N, KeybindingTable, ManualClock>,
	clock: ManualClock,
	documents: FxHashMap<DocumentId, OpenDocument>,
}

impl<N: Notifier> Replay<N> {
	/// Creates a replay with the built-in detectors, already started.
	pub fn new(config: &Config, notifier: N, keybindings: KeybindingTable) -> Self {
		let clock = ManualClock::new(0);
		let mut tracker = EditorActionTracker::with_default_patterns(config.tracker, &config.patterns, notifier, keybindings, clock.clone());
		tracker.start();
		Self {
			tracker,
			clock,
			documents: FxHashMap::default(),
		}
	}

	pub fn tracker(&self) -> &EditorActionTracker<N, KeybindingTable, ManualClock> {
		&self.tracker
	}

	pub fn into_notifier(self) -> N {
		self.tracker.into_notifier()
	}

	/// Replays every line of `reader`.
	pub fn run(&mut self, reader: impl BufRead) -> Result<Summary> {
		let mut summary = Summary::default();
		for (idx, raw) in reader.lines().enumerate() {
			let number = idx + 1;
			let raw = raw.map_err(|error| ReplayError::Read { line: number, error })?;
			let Some(line) = parse_line(number, &raw)? else {
				continue;
			};
			summary.matches += self.apply(number, line)?;
			summary.events += 1;
		}
		Ok(summary)
	}

	/// Applies one trace line and returns how many matches it produced.
	pub fn apply(&mut self, number: usize, line: TraceLine) -> Result<usize> {
		if line.at < self.clock.now() {
			warn!(line = number, at = line.at, now = self.clock.now(), "replay.time_went_backwards");
		}
		self.clock.set(line.at);

		let event = match line.event {
			TraceEvent::Open { document, scheme, text } => {
				debug!(line = number, document = document.0, "replay.open");
				self.documents.insert(
					document,
					OpenDocument {
						scheme,
						text: Rope::from_str(&text),
					},
				);
				return Ok(0);
			}
			TraceEvent::FocusEditor { document: None } => HostEvent::ActiveEditorChanged(None),
			TraceEvent::FocusEditor { document: Some(document) } => {
				let scheme = self.document(number, document)?.scheme.clone();
				HostEvent::ActiveEditorChanged(Some(ActiveEditor { document, scheme }))
			}
			TraceEvent::Edit {
				document,
				range,
				text,
				reason,
			} => {
				let change = self.edit(number, document, range, text)?;
				let open = self.document(number, document)?;
				HostEvent::TextChanged {
					document,
					scheme: open.scheme.clone(),
					snapshot: open.text.clone(),
					changes: vec![change],
					reason,
				}
			}
			TraceEvent::Select { document, anchor, active } => {
				let open = self.document(number, document)?;
				HostEvent::SelectionChanged {
					document,
					scheme: open.scheme.clone(),
					snapshot: open.text.clone(),
					selections: vec![Selection::new(anchor, active)],
				}
			}
			TraceEvent::Command { id } => HostEvent::CommandExecuted { command: id },
			TraceEvent::MouseDown => HostEvent::MousePressed,
			TraceEvent::MouseUp => HostEvent::MouseReleased,
			TraceEvent::WindowFocus { focused } => HostEvent::WindowFocusChanged { focused },
		};
		Ok(self.tracker.dispatch(event))
	}

	fn document(&self, line: usize, document: DocumentId) -> Result<&OpenDocument> {
		self.documents.get(&document).ok_or(ReplayError::UnknownDocument { line, document })
	}

	/// Applies an edit to the owned rope and describes it the way an editor would.
	fn edit(&mut self, line: usize, document: DocumentId, range: Range, text: String) -> Result<TextChange> {
		let open = self
			.documents
			.get_mut(&document)
			.ok_or(ReplayError::UnknownDocument { line, document })?;
		let out_of_range = || ReplayError::OutOfRange { line, document, range };

		let from = char_index(&open.text, range.start).ok_or_else(out_of_range)?;
		let to = char_index(&open.text, range.end).ok_or_else(out_of_range)?;
		if from > to {
			return Err(out_of_range());
		}

		let removed = open.text.slice(from..to).to_string();
		open.text.remove(from..to);
		open.text.insert(from, &text);

		let range_length = to - from;
		Ok(TextChange {
			range,
			range_length,
			text,
			removed_text: (range_length > 0).then_some(removed),
		})
	}
}

/// Character index of `pos`, which may sit at most at its line's end.
fn char_index(rope: &Rope, pos: Position) -> Option<usize> {
	let len = Document::line_len(rope, pos.line)?;
	if pos.character > len {
		return None;
	}
	Some(rope.try_line_to_char(pos.line).ok()? + pos.character)
}
