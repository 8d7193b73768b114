//! Keybinding lookup for suggestion hints.
//!
//! The engine never resolves keys itself. It asks a [`KeybindingLookup`] which
//! chords are bound to a command and formats the first one for display:
//! - Lookup: [`KeybindingLookup`], backed in memory by [`KeybindingTable`]
//! - Overrides: entries whose command starts with `-` unbind a chord
//! - Display: `ctrl+shift+k` renders as `Ctrl+Shift+K`

pub use format::{FALLBACK_HINT, format_all, format_chord, format_first};
pub use table::{KeybindingEntry, KeybindingLookup, KeybindingTable};

mod format;
mod table;
