//! Recent command executions.

use nudge_patterns::CommandHistory;
use nudge_primitives::Timestamp;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::config::{COMMAND_WINDOW_MS, MAX_TRACKED_EXECUTIONS};

/// Executions kept inline per command before spilling to the heap.
pub const INLINE_EXECUTIONS: usize = 10;

/// Per-command execution timestamps, oldest first.
///
/// Each append drops executions older than the window (relative to the new
/// one) and keeps at most `max_executions`. Entries are never pruned by
/// reads, so the last execution stays queryable until the next append.
#[derive(Debug, Clone)]
pub struct CommandLedger {
	executions: FxHashMap<String, SmallVec<[Timestamp; INLINE_EXECUTIONS]>>,
	window_ms: u64,
	max_executions: usize,
}

impl CommandLedger {
	pub fn new(window_ms: u64, max_executions: usize) -> Self {
		Self {
			executions: FxHashMap::default(),
			window_ms,
			max_executions: max_executions.max(1),
		}
	}

	/// Records that `command` ran at `now` and returns how many recent
	/// executions of it are remembered.
	pub fn record(&mut self, command: &str, now: Timestamp) -> usize {
		let window = self.window_ms;
		let entry = self.executions.entry(command.to_owned()).or_default();
		entry.retain(|at| now.saturating_sub(*at) < window);
		entry.push(now);
		if entry.len() > self.max_executions {
			let excess = entry.len() - self.max_executions;
			entry.drain(..excess);
		}
		trace!(command, count = entry.len(), "tracker.ledger.record");
		entry.len()
	}

	/// Remembered executions of `command`, oldest first.
	pub fn executions(&self, command: &str) -> &[Timestamp] {
		self.executions.get(command).map_or(&[], |entry| entry.as_slice())
	}

	/// Returns true if `command` last ran less than `within_ms` before `now`.
	pub fn was_recently_executed(&self, command: &str, now: Timestamp, within_ms: u64) -> bool {
		self.last_execution(command)
			.is_some_and(|at| now.saturating_sub(at) < within_ms)
	}

	/// Number of distinct commands remembered.
	pub fn len(&self) -> usize {
		self.executions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.executions.is_empty()
	}

	pub fn clear(&mut self) {
		self.executions.clear();
	}
}

impl Default for CommandLedger {
	fn default() -> Self {
		Self::new(COMMAND_WINDOW_MS, MAX_TRACKED_EXECUTIONS)
	}
}

impl CommandHistory for CommandLedger {
	fn last_execution(&self, command: &str) -> Option<Timestamp> {
		self.executions(command).last().copied()
	}

	fn executed_between(&self, command: &str, start: Timestamp, end: Timestamp) -> bool {
		self.executions(command).iter().any(|at| (start..=end).contains(at))
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn append_prunes_to_window() {
		let mut ledger = CommandLedger::default();
		ledger.record("cursorWordRight", 0);
		ledger.record("cursorWordRight", 1_500);
		assert_eq!(ledger.record("cursorWordRight", 2_100), 2);
		assert_eq!(ledger.executions("cursorWordRight"), &[1_500, 2_100]);
	}

	#[test]
	fn append_caps_executions() {
		let mut ledger = CommandLedger::new(10_000, 3);
		for at in 0..5 {
			ledger.record("deleteLeft", at * 10);
		}
		assert_eq!(ledger.executions("deleteLeft"), &[20, 30, 40]);
	}

	#[test]
	fn reads_do_not_prune() {
		let mut ledger = CommandLedger::default();
		ledger.record("editor.action.deleteLines", 100);
		assert_eq!(ledger.last_execution("editor.action.deleteLines"), Some(100));
		assert!(!ledger.was_recently_executed("editor.action.deleteLines", 99_999, 2_000));
		assert!(ledger.was_recently_executed("editor.action.deleteLines", 150, 100));
		assert!(!ledger.was_recently_executed("editor.action.deleteLines", 200, 100));
	}

	#[test]
	fn executed_between_sees_every_execution() {
		let mut ledger = CommandLedger::default();
		ledger.record("deleteWordLeft", 100);
		ledger.record("deleteWordLeft", 900);
		assert!(ledger.executed_between("deleteWordLeft", 50, 150));
		assert!(ledger.executed_between("deleteWordLeft", 900, 900));
		assert!(!ledger.executed_between("deleteWordLeft", 200, 800));
		assert!(!ledger.executed_between("deleteWordRight", 0, 1_000));
	}

	#[test]
	fn unknown_commands_are_empty() {
		let ledger = CommandLedger::default();
		assert!(ledger.is_empty());
		assert_eq!(ledger.executions("cut"), &[] as &[Timestamp]);
		assert_eq!(ledger.last_execution("cut"), None);
	}
}
