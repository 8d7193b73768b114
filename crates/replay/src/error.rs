use std::path::PathBuf;

use nudge_primitives::{DocumentId, Range};
use thiserror::Error;

/// Errors that stop a replay.
#[derive(Debug, Error)]
pub enum ReplayError {
	#[error("I/O error reading {path}: {error}")]
	Io { path: PathBuf, error: std::io::Error },

	#[error("trace line {line}: read failed: {error}")]
	Read { line: usize, error: std::io::Error },

	#[error("trace line {line}: {source}")]
	Parse {
		line: usize,
		#[source]
		source: serde_json::Error,
	},

	#[error("invalid keybindings file {path}: {source}")]
	Keybindings {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("trace line {line}: document {} was never opened", document.0)]
	UnknownDocument { line: usize, document: DocumentId },

	#[error("trace line {line}: range {range:?} is outside document {}", document.0)]
	OutOfRange { line: usize, document: DocumentId, range: Range },
}

pub type Result<T> = std::result::Result<T, ReplayError>;
