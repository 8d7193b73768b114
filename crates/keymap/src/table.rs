use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Resolves the chords bound to a command.
pub trait KeybindingLookup {
	/// Returns the chords bound to `command`, most preferred first.
	///
	/// An unbound command yields an empty list.
	fn keybindings_for(&self, command: &str) -> Vec<String>;
}

/// No bindings at all. Hints fall back to generic wording.
impl KeybindingLookup for () {
	fn keybindings_for(&self, _command: &str) -> Vec<String> {
		Vec::new()
	}
}

/// One `{ key, command }` binding as hosts serialize them.
///
/// A command prefixed with `-` removes `key` from that command instead of adding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeybindingEntry {
	/// Chord, e.g. `ctrl+shift+k`.
	pub key: String,
	/// Command id, optionally prefixed with `-`.
	pub command: String,
}

impl KeybindingEntry {
	/// Creates a new entry.
	pub fn new(key: impl Into<String>, command: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			command: command.into(),
		}
	}
}

/// In-memory command → chords table.
#[derive(Debug, Clone, Default)]
pub struct KeybindingTable {
	bindings: FxHashMap<String, Vec<String>>,
}

impl KeybindingTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a table by applying `entries` in order.
	pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a KeybindingEntry>) -> Self {
		let mut table = Self::new();
		table.apply(entries);
		table
	}

	/// Appends `key` to the chords of `command`.
	pub fn insert(&mut self, command: impl Into<String>, key: impl Into<String>) {
		self.bindings.entry(command.into()).or_default().push(key.into());
	}

	/// Removes every occurrence of `key` from `command`.
	pub fn remove(&mut self, command: &str, key: &str) {
		if let Some(keys) = self.bindings.get_mut(command) {
			keys.retain(|bound| bound != key);
		}
	}

	/// Applies entries in order; later entries override earlier ones.
	pub fn apply<'a>(&mut self, entries: impl IntoIterator<Item = &'a KeybindingEntry>) {
		let mut added = 0usize;
		let mut removed = 0usize;
		for entry in entries {
			match entry.command.strip_prefix('-') {
				Some(command) => {
					self.remove(command, &entry.key);
					removed += 1;
				}
				None => {
					self.insert(entry.command.as_str(), entry.key.as_str());
					added += 1;
				}
			}
		}
		debug!(added, removed, commands = self.bindings.len(), "keymap.table.apply");
	}

	/// Returns the number of commands with an entry (possibly empty after removals).
	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	/// Returns true if no command has ever been bound.
	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}
}

impl KeybindingLookup for KeybindingTable {
	fn keybindings_for(&self, command: &str) -> Vec<String> {
		self.bindings.get(command).cloned().unwrap_or_default()
	}
}
