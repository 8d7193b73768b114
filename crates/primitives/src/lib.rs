//! Core types shared by the detection engine: positions, selections, time, and documents.

/// Cursor and step directions.
pub mod direction;
/// Read-only document access and document identity.
pub mod document;
/// Line/character positions and ranges.
pub mod position;
/// Anchor/active selections.
pub mod selection;
/// Millisecond timestamps and clocks.
pub mod time;

pub use direction::{Direction, EdgeSide, HorizontalDirection};
pub use document::{ChangeReason, Document, DocumentId, UriScheme};
pub use position::{Position, Range};
pub use ropey::{Rope, RopeSlice};
pub use selection::Selection;
pub use time::{Clock, ManualClock, SystemClock, Timestamp};
