use nudge_primitives::Timestamp;

/// Last mouse button press and release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseState {
	pub last_press: Option<Timestamp>,
	pub last_release: Option<Timestamp>,
}

impl MouseState {
	pub fn press(&mut self, now: Timestamp) {
		self.last_press = Some(now);
	}

	pub fn release(&mut self, now: Timestamp) {
		self.last_release = Some(now);
	}

	/// Returns true while the button is held.
	pub fn is_pressed(&self) -> bool {
		match (self.last_press, self.last_release) {
			(Some(press), Some(release)) => press > release,
			(Some(_), None) => true,
			(None, _) => false,
		}
	}

	/// Returns true if a selection change at `now` is probably a mouse drag:
	/// the button is held, or was released less than `grace_ms` ago.
	pub fn is_selection_likely(&self, now: Timestamp, grace_ms: u64) -> bool {
		self.is_pressed() || self.last_release.is_some_and(|release| now.saturating_sub(release) < grace_ms)
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case::idle(None, None, 1_000, false)]
	#[case::held(Some(900), None, 5_000, true)]
	#[case::held_again(Some(900), Some(500), 5_000, true)]
	#[case::just_released(Some(100), Some(800), 1_000, true)]
	#[case::released_long_ago(Some(100), Some(200), 1_000, false)]
	#[case::grace_is_exclusive(Some(100), Some(700), 1_000, false)]
	fn selection_attribution(#[case] press: Option<Timestamp>, #[case] release: Option<Timestamp>, #[case] now: Timestamp, #[case] expected: bool) {
		let mouse = MouseState {
			last_press: press,
			last_release: release,
		};
		assert_eq!(mouse.is_selection_likely(now, 300), expected);
	}
}
