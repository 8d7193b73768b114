use crate::context::PatternContext;
use crate::event::{EditingEvent, PatternMatch};
use crate::id::PatternId;

/// A habit detector.
///
/// Detectors are fed every event the tracker accepts, in arrival order. A
/// detector returns `None` while its hypothesis is building or after it was
/// abandoned, and a [`PatternMatch`] once the habit is established. Emitting
/// a match resets the detector.
pub trait Pattern {
	fn id(&self) -> PatternId;

	/// Command suggested when no more specific one applies.
	fn suggested_command(&self) -> &'static str {
		self.id().default_command()
	}

	/// Disabled detectors are skipped by the tracker.
	fn is_enabled(&self) -> bool {
		true
	}

	/// Drops all in-progress state.
	fn reset(&mut self);

	/// Feeds one event, returning a match when the habit is complete.
	fn process(&mut self, event: &EditingEvent<'_>, cx: &PatternContext<'_>) -> Option<PatternMatch>;
}
