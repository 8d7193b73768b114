//! Pattern detection for manual editing habits.
//!
//! Each detector is a small state machine fed one [`EditingEvent`] at a time.
//! When the accumulated events show a habit that a dedicated command does
//! faster (deleting a line with Backspace, walking a word with arrow keys),
//! the detector returns a [`PatternMatch`] naming that command and resets.
//!
//! Detectors share two primitives:
//! - [`SequenceTracker`]: a bounded, time-windowed buffer of timestamped steps
//! - [`utils`]: direction voting, word/boundary tests and line-edge introspection
//!
//! Detectors never touch the document or the host. Everything they know about
//! recently executed commands and keybindings comes through [`PatternContext`].

pub mod commands;
pub mod config;
pub mod context;
pub mod detectors;
pub mod event;
pub mod id;
pub mod pattern;
pub mod sequence;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::PatternsConfig;
pub use context::{CommandHistory, PatternContext};
pub use detectors::{
	ArrowNavigationPattern, LineDeletePattern, LineDuplicationPattern, LineMovementPattern, TextSelectionNavigationPattern,
	WordDeletePattern, WordSelectionPattern,
};
pub use event::{EditKind, EditingEvent, EventRecord, PatternMatch};
pub use id::{PatternId, SubPattern};
pub use pattern::Pattern;
pub use sequence::{SequenceConfig, SequenceTracker, Timestamped};
