//! Rolling log of accepted events.

use std::collections::VecDeque;

use nudge_patterns::{EditKind, EventRecord};
use nudge_primitives::Selection;

use crate::config::STATE_LOG_CAPACITY;

/// Recent events plus the last selection and inserted text.
///
/// Cleared whenever the active editor changes.
#[derive(Debug, Clone)]
pub struct EditorStateManager {
	log: VecDeque<EventRecord>,
	capacity: usize,
	last_selection: Option<Selection>,
	last_text: Option<String>,
	document_version: u64,
}

impl EditorStateManager {
	pub fn new(capacity: usize) -> Self {
		let capacity = capacity.max(1);
		Self {
			log: VecDeque::with_capacity(capacity),
			capacity,
			last_selection: None,
			last_text: None,
			document_version: 0,
		}
	}

	pub fn record(&mut self, record: EventRecord) {
		match &record.kind {
			EditKind::Selection { selection } => self.last_selection = Some(*selection),
			kind => {
				if let Some(text) = kind.text().filter(|text| !text.is_empty()) {
					self.last_text = Some(text.to_owned());
				}
			}
		}
		self.log.push_back(record);
		while self.log.len() > self.capacity {
			self.log.pop_front();
		}
		self.document_version += 1;
	}

	pub fn last_event(&self) -> Option<&EventRecord> {
		self.log.back()
	}

	pub fn last_selection(&self) -> Option<Selection> {
		self.last_selection
	}

	pub fn last_text(&self) -> Option<&str> {
		self.last_text.as_deref()
	}

	/// Number of events recorded since the last reset.
	pub fn document_version(&self) -> u64 {
		self.document_version
	}

	/// The last `count` events, oldest first.
	pub fn recent(&self, count: usize) -> impl Iterator<Item = &EventRecord> {
		self.log.iter().skip(self.log.len().saturating_sub(count))
	}

	pub fn len(&self) -> usize {
		self.log.len()
	}

	pub fn is_empty(&self) -> bool {
		self.log.is_empty()
	}

	pub fn reset(&mut self) {
		self.log.clear();
		self.last_selection = None;
		self.last_text = None;
		self.document_version = 0;
	}
}

impl Default for EditorStateManager {
	fn default() -> Self {
		Self::new(STATE_LOG_CAPACITY)
	}
}

#[cfg(test)]
mod tests {
	use nudge_primitives::{Position, Range};
	use pretty_assertions::assert_eq;

	use super::*;

	fn insert(text: &str, timestamp: u64) -> EventRecord {
		EventRecord {
			kind: EditKind::Insert {
				range: Range::point(Position::new(0, 0)),
				text: text.to_owned(),
			},
			timestamp,
		}
	}

	#[test]
	fn log_is_bounded() {
		let mut state = EditorStateManager::new(3);
		for t in 0..5 {
			state.record(insert("x", t));
		}
		assert_eq!(state.len(), 3);
		assert_eq!(state.recent(2).map(|r| r.timestamp).collect::<Vec<_>>(), vec![3, 4]);
		assert_eq!(state.recent(10).count(), 3);
		assert_eq!(state.document_version(), 5);
	}

	#[test]
	fn tracks_last_selection_and_text() {
		let mut state = EditorStateManager::default();
		let selection = Selection::cursor(Position::new(2, 4));
		state.record(insert("abc", 1));
		state.record(EventRecord {
			kind: EditKind::Selection { selection },
			timestamp: 2,
		});
		assert_eq!(state.last_selection(), Some(selection));
		assert_eq!(state.last_text(), Some("abc"));
		assert_eq!(state.last_event().map(|r| r.timestamp), Some(2));

		state.reset();
		assert!(state.is_empty());
		assert_eq!(state.last_selection(), None);
		assert_eq!(state.last_text(), None);
		assert_eq!(state.document_version(), 0);
	}
}
