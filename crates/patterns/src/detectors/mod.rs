//! The built-in detectors, in registration order.

pub mod arrow_navigation;
pub mod line_delete;
pub mod line_duplication;
pub mod line_movement;
pub mod text_selection;
pub mod word_delete;
pub mod word_selection;

pub use arrow_navigation::{ArrowNavigationConfig, ArrowNavigationPattern};
pub use line_delete::{LineDeleteConfig, LineDeletePattern};
pub use line_duplication::{LineDuplicationConfig, LineDuplicationPattern};
pub use line_movement::{LineMovementConfig, LineMovementPattern};
pub use text_selection::{TextSelectionConfig, TextSelectionNavigationPattern};
pub use word_delete::{WordDeleteConfig, WordDeletePattern};
pub use word_selection::{WordSelectionConfig, WordSelectionPattern};
