use serde::{Deserialize, Serialize};

/// Direction of a single cursor or selection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	Left,
	Right,
	Up,
	Down,
	/// No movement, or movement that fits no axis.
	#[default]
	Unknown,
}

impl Direction {
	/// Returns true for [`Direction::Left`] and [`Direction::Right`].
	#[inline]
	pub fn is_horizontal(self) -> bool {
		matches!(self, Self::Left | Self::Right)
	}

	/// Returns true for [`Direction::Up`] and [`Direction::Down`].
	#[inline]
	pub fn is_vertical(self) -> bool {
		matches!(self, Self::Up | Self::Down)
	}

	/// Narrows to the horizontal axis.
	pub fn horizontal(self) -> HorizontalDirection {
		match self {
			Self::Left => HorizontalDirection::Left,
			Self::Right => HorizontalDirection::Right,
			_ => HorizontalDirection::Unknown,
		}
	}
}

/// Direction restricted to the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalDirection {
	Left,
	Right,
	#[default]
	Unknown,
}

impl From<HorizontalDirection> for Direction {
	fn from(dir: HorizontalDirection) -> Self {
		match dir {
			HorizontalDirection::Left => Self::Left,
			HorizontalDirection::Right => Self::Right,
			HorizontalDirection::Unknown => Self::Unknown,
		}
	}
}

/// Which edge of a line a position sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeSide {
	Start,
	End,
}

impl EdgeSide {
	/// Returns `"start"` or `"end"`.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Start => "start",
			Self::End => "end",
		}
	}
}
