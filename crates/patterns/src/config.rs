//! Per-detector settings and the default detector set.

use serde::{Deserialize, Serialize};

pub use crate::detectors::{
	ArrowNavigationConfig, LineDeleteConfig, LineDuplicationConfig, LineMovementConfig, TextSelectionConfig, WordDeleteConfig,
	WordSelectionConfig,
};
use crate::detectors::{
	ArrowNavigationPattern, LineDeletePattern, LineDuplicationPattern, LineMovementPattern, TextSelectionNavigationPattern,
	WordDeletePattern, WordSelectionPattern,
};
use crate::id::PatternId;
use crate::pattern::Pattern;

/// Settings for every built-in detector. Missing sections take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatternsConfig {
	pub line_delete: LineDeleteConfig,
	pub word_delete: WordDeleteConfig,
	pub line_movement: LineMovementConfig,
	pub line_duplication: LineDuplicationConfig,
	pub word_selection: WordSelectionConfig,
	pub arrow_navigation: ArrowNavigationConfig,
	pub text_selection: TextSelectionConfig,
}

impl PatternsConfig {
	/// Returns whether the detector for `id` is enabled.
	pub fn is_enabled(&self, id: PatternId) -> bool {
		match id {
			PatternId::LineDeleteBackspace => self.line_delete.enabled,
			PatternId::WordDeleteBackspace => self.word_delete.enabled,
			PatternId::LineMovementManual => self.line_movement.enabled,
			PatternId::LineDuplicationManual => self.line_duplication.enabled,
			PatternId::WordSelectionRepeated => self.word_selection.enabled,
			PatternId::ArrowNavigation => self.arrow_navigation.enabled,
			PatternId::TextSelectionNavigation => self.text_selection.enabled,
		}
	}

	/// Builds every detector in registration order.
	///
	/// Disabled detectors are still built; the tracker skips them.
	pub fn build(&self) -> Vec<Box<dyn Pattern>> {
		vec![
			Box::new(LineDeletePattern::new(self.line_delete)),
			Box::new(WordDeletePattern::new(self.word_delete)),
			Box::new(LineMovementPattern::new(self.line_movement)),
			Box::new(LineDuplicationPattern::new(self.line_duplication)),
			Box::new(WordSelectionPattern::new(self.word_selection)),
			Box::new(ArrowNavigationPattern::new(self.arrow_navigation)),
			Box::new(TextSelectionNavigationPattern::new(self.text_selection)),
		]
	}
}
