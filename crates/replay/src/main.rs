//! Nudge replay binary.
//!
//! Feeds a recorded JSON-lines editor session through the habit detectors and
//! prints every suggestion as a JSON object on stdout. Logs go to stderr.

mod error;
mod output;
mod replay;
mod trace;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use nudge_config::Config;
use nudge_keymap::{KeybindingEntry, KeybindingTable};
use tracing::info;

use crate::error::ReplayError;
use crate::output::JsonLines;
use crate::replay::Replay;

/// Replay command line arguments.
#[derive(Parser, Debug)]
#[command(name = "nudge-replay")]
#[command(about = "Replay an editor session trace and print editing-habit suggestions")]
struct Args {
	/// JSON-lines trace of editor events
	#[arg(value_name = "TRACE")]
	trace: PathBuf,

	/// TOML configuration file
	#[arg(short, long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// JSON array of `{key, command}` keybindings
	#[arg(short, long, value_name = "FILE")]
	keybindings: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	setup_tracing(args.verbose);

	let config = match &args.config {
		Some(path) => Config::load(path).with_context(|| format!("loading config {}", path.display()))?,
		None => Config::default(),
	};

	let mut keybindings = KeybindingTable::new();
	if let Some(path) = &args.keybindings {
		keybindings.apply(&load_keybindings(path)?);
	}
	keybindings.apply(&config.keybindings);
	info!(commands = keybindings.len(), "replay.keybindings");

	let file = File::open(&args.trace).map_err(|error| ReplayError::Io {
		path: args.trace.clone(),
		error,
	})?;

	let mut replay = Replay::new(&config, JsonLines::new(io::stdout().lock()), keybindings);
	let summary = replay
		.run(BufReader::new(file))
		.with_context(|| format!("replaying {}", args.trace.display()))?;
	let written = replay.into_notifier().finish().context("writing matches")?;

	info!(events = summary.events, matches = summary.matches, written, "replay.done");
	Ok(())
}

fn load_keybindings(path: &Path) -> Result<Vec<KeybindingEntry>, ReplayError> {
	let text = std::fs::read_to_string(path).map_err(|error| ReplayError::Io {
		path: path.to_path_buf(),
		error,
	})?;
	serde_json::from_str(&text).map_err(|source| ReplayError::Keybindings {
		path: path.to_path_buf(),
		source,
	})
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("nudge=debug,info")
		} else {
			EnvFilter::new("nudge=info,warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.with_target(true)
		.init();
}

#[cfg(test)]
mod tests {
	use nudge_keymap::KeybindingLookup;
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn keybindings_file_is_a_json_array() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("keybindings.json");
		std::fs::write(
			&path,
			r#"[{"key": "ctrl+shift+k", "command": "editor.action.deleteLines"}, {"key": "ctrl+shift+k", "command": "-editor.action.deleteLines"}]"#,
		)
		.unwrap();

		let entries = load_keybindings(&path).unwrap();
		assert_eq!(entries.len(), 2);
		let table = KeybindingTable::from_entries(&entries);
		assert!(table.keybindings_for("editor.action.deleteLines").is_empty());
	}

	#[test]
	fn malformed_keybindings_name_the_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("keybindings.json");
		std::fs::write(&path, "{}").unwrap();
		match load_keybindings(&path) {
			Err(ReplayError::Keybindings { path: reported, .. }) => assert_eq!(reported, path),
			other => panic!("expected keybindings error, got {other:?}"),
		}
	}

	#[test]
	fn cli_parses() {
		let args = Args::try_parse_from(["nudge-replay", "session.jsonl", "--config", "nudge.toml", "-v"]).unwrap();
		assert_eq!(args.trace, PathBuf::from("session.jsonl"));
		assert_eq!(args.config, Some(PathBuf::from("nudge.toml")));
		assert!(args.verbose);
	}
}
