use serde::{Deserialize, Serialize};

pub const MOUSE_GRACE_MS: u64 = 300;
/// Selection changes this soon after an edit command are its side effect.
pub const EDIT_SUPPRESSION_MS: u64 = 50;
pub const COMMAND_WINDOW_MS: u64 = 2000;
pub const MAX_TRACKED_EXECUTIONS: usize = 10;
pub const STATE_LOG_CAPACITY: usize = 50;

/// Orchestrator tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
	/// A mouse release this recent makes a selection change mouse-driven.
	pub mouse_grace_ms: u64,
	pub edit_suppression_ms: u64,
	/// How long the command ledger remembers an execution.
	pub command_window_ms: u64,
	pub max_tracked_executions: usize,
	pub state_log_capacity: usize,
}

impl Default for TrackerConfig {
	fn default() -> Self {
		Self {
			mouse_grace_ms: MOUSE_GRACE_MS,
			edit_suppression_ms: EDIT_SUPPRESSION_MS,
			command_window_ms: COMMAND_WINDOW_MS,
			max_tracked_executions: MAX_TRACKED_EXECUTIONS,
			state_log_capacity: STATE_LOG_CAPACITY,
		}
	}
}
