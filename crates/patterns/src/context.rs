//! Read-only view of the host that detectors consult while processing an event.

use nudge_keymap::{KeybindingLookup, format_first};
use nudge_primitives::Timestamp;
use tracing::trace;

/// Most recent execution time per command.
pub trait CommandHistory {
	/// Returns when `command` last ran, if it is still remembered.
	fn last_execution(&self, command: &str) -> Option<Timestamp>;

	/// Returns true if `command` ran at some time in `[start, end]`.
	///
	/// The default only sees the last execution, which suffices for histories
	/// that keep one timestamp per command.
	fn executed_between(&self, command: &str, start: Timestamp, end: Timestamp) -> bool {
		self.last_execution(command).is_some_and(|at| (start..=end).contains(&at))
	}
}

/// Empty history: nothing ever ran.
impl CommandHistory for () {
	fn last_execution(&self, _command: &str) -> Option<Timestamp> {
		None
	}
}

/// Per-event context handed to [`Pattern::process`](crate::Pattern::process).
///
/// `now` is the timestamp of the event being processed, so every "recently"
/// question is answered relative to when the event happened.
#[derive(Clone, Copy)]
pub struct PatternContext<'a> {
	now: Timestamp,
	history: &'a dyn CommandHistory,
	keybindings: &'a dyn KeybindingLookup,
}

impl<'a> PatternContext<'a> {
	pub fn new(now: Timestamp, history: &'a dyn CommandHistory, keybindings: &'a dyn KeybindingLookup) -> Self {
		Self { now, history, keybindings }
	}

	/// Context with no command history and no keybindings.
	pub fn detached(now: Timestamp) -> PatternContext<'static> {
		PatternContext {
			now,
			history: &(),
			keybindings: &(),
		}
	}

	pub fn now(&self) -> Timestamp {
		self.now
	}

	/// Returns true if `command` last ran less than `within_ms` before now.
	pub fn was_recently_executed(&self, command: &str, within_ms: u64) -> bool {
		self.history
			.last_execution(command)
			.is_some_and(|at| self.now.saturating_sub(at) < within_ms)
	}

	pub fn was_any_recently_executed(&self, commands: &[&str], within_ms: u64) -> bool {
		commands.iter().any(|command| self.was_recently_executed(command, within_ms))
	}

	/// Returns true if any of `commands` ran within `[start, end]`.
	pub fn was_any_executed_between(&self, commands: &[&str], start: Timestamp, end: Timestamp) -> bool {
		let hit = commands.iter().find(|command| self.history.executed_between(command, start, end));
		if let Some(command) = hit {
			trace!(command, start, end, "patterns.context.executed_between");
		}
		hit.is_some()
	}

	pub fn keybindings_for(&self, command: &str) -> Vec<String> {
		self.keybindings.keybindings_for(command)
	}

	/// Display form of the first chord bound to `command`, or a generic fallback.
	pub fn key_hint(&self, command: &str) -> String {
		format_first(&self.keybindings_for(command))
	}
}
