//! Configuration for nudge.
//!
//! Every threshold the tracker and its detectors use can be overridden from
//! TOML. Missing keys keep their built-in defaults; unknown keys are errors.
//!
//! ```toml
//! [tracker]
//! mouse_grace_ms = 400
//!
//! [patterns.word_delete]
//! min_total_deletions = 5
//!
//! [patterns.arrow_navigation]
//! enabled = false
//!
//! [patterns.line_delete.sequence]
//! timeout_ms = 2500
//!
//! [[keybindings]]
//! key = "ctrl+shift+k"
//! command = "editor.action.deleteLines"
//! ```
//!
//! Several files can be layered with [`Config::load_layered`]: tables merge
//! key by key and later files win.

pub mod error;
mod validate;

use std::path::Path;

pub use error::{ConfigError, Result};
use nudge_keymap::KeybindingEntry;
use nudge_patterns::PatternsConfig;
use nudge_tracker::TrackerConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parsed configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub tracker: TrackerConfig,
	pub patterns: PatternsConfig,
	/// Keybinding patches applied on top of the host's table.
	pub keybindings: Vec<KeybindingEntry>,
}

impl Config {
	/// Parse and validate a TOML string.
	pub fn parse(input: &str) -> Result<Self> {
		Self::from_table(input.parse()?)
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let config = Self::parse(&read(path)?)?;
		debug!(path = %path.display(), "config.load");
		Ok(config)
	}

	/// Load and merge several files, later ones overriding earlier ones.
	///
	/// Missing files are skipped. Validation runs once on the merged result,
	/// so a layer may rely on values from another.
	pub fn load_layered<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Self> {
		let mut merged = toml::Table::new();
		for path in paths {
			let path = path.as_ref();
			if !path.exists() {
				debug!(path = %path.display(), "config.layer.missing");
				continue;
			}
			let layer: toml::Table = read(path)?.parse()?;
			merge_tables(&mut merged, layer);
			debug!(path = %path.display(), "config.layer");
		}
		Self::from_table(merged)
	}

	/// Validate an assembled configuration.
	pub fn validate(&self) -> Result<()> {
		validate::tracker(&self.tracker)?;
		validate::patterns(&self.patterns)?;
		validate::keybindings(&self.keybindings)
	}

	fn from_table(table: toml::Table) -> Result<Self> {
		let config: Self = toml::Value::Table(table).try_into()?;
		config.validate()?;
		Ok(config)
	}
}

fn read(path: &Path) -> Result<String> {
	std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
		path: path.to_path_buf(),
		error,
	})
}

/// Deep-merges `overlay` into `base`. Nested tables merge; any other value,
/// arrays included, replaces what was there.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
	for (key, value) in overlay {
		match (base.get_mut(&key), value) {
			(Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => merge_tables(existing, incoming),
			(_, value) => {
				base.insert(key, value);
			}
		}
	}
}
