//! Bounded, time-windowed buffer of timestamped steps.


use nudge_primitives::Timestamp;
use serde::{Deserialize, Serialize};

/// Default capacity of a [`SequenceTracker`].
pub const DEFAULT_MAX_LENGTH: usize = 50;
/// Default inactivity window of a [`SequenceTracker`].
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;
/// Default length at which a sequence counts as established.
pub const DEFAULT_MIN_LENGTH: usize = 1;

/// Anything carrying the time it happened.
pub trait Timestamped {
	fn timestamp(&self) -> Timestamp;
}

impl Timestamped for Timestamp {
	fn timestamp(&self) -> Timestamp {
		*self
	}
}

/// Sizing and expiry for a [`SequenceTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequenceConfig {
	/// Maximum number of retained items; the oldest are dropped first.
	pub max_length: usize,
	/// Items older than this relative to the newest are dropped, and a gap
	/// longer than this clears the whole buffer.
	pub timeout_ms: u64,
	/// Length reported as established by [`SequenceTracker::has_min_length`].
	pub min_length: usize,
}

impl SequenceConfig {
	pub const fn new(max_length: usize, timeout_ms: u64) -> Self {
		Self {
			max_length,
			timeout_ms,
			min_length: DEFAULT_MIN_LENGTH,
		}
	}

	/// Clamps values that would make the tracker unusable.
	fn sanitized(self) -> Self {
		Self {
			max_length: self.max_length.max(1),
			timeout_ms: self.timeout_ms.max(1),
			min_length: self.min_length,
		}
	}
}

impl Default for SequenceConfig {
	fn default() -> Self {
		Self::new(DEFAULT_MAX_LENGTH, DEFAULT_TIMEOUT_MS)
	}
}

/// Ordered, bounded buffer of timestamped items.
///
/// Invariants after every [`add`](Self::add):
/// - `len() <= max_length`
/// - every retained item is strictly younger than `timeout_ms` relative to the newest
/// - a gap longer than `timeout_ms` since the previous add discards everything before the new item
#[derive(Debug, Clone)]
pub struct SequenceTracker<T> {
	items: Vec<T>,
	last_time: Option<Timestamp>,
	config: SequenceConfig,
}

impl<T: Timestamped> SequenceTracker<T> {
	pub fn new(config: SequenceConfig) -> Self {
		let config = config.sanitized();
		Self {
			items: Vec::with_capacity(config.max_length.min(64)),
			last_time: None,
			config,
		}
	}

	pub fn config(&self) -> SequenceConfig {
		self.config
	}

	/// Appends `item`, expiring stale items and evicting the oldest beyond capacity.
	pub fn add(&mut self, item: T) {
		let now = item.timestamp();
		if self.has_timed_out(now) {
			self.reset();
		}

		let timeout = self.config.timeout_ms;
		self.items.retain(|old| now.saturating_sub(old.timestamp()) < timeout);
		self.items.push(item);
		self.last_time = Some(now);

		let excess = self.items.len().saturating_sub(self.config.max_length);
		if excess > 0 {
			self.items.drain(..excess);
		}
	}

	/// Returns true if more than `timeout_ms` passed between the last add and `now`.
	pub fn has_timed_out(&self, now: Timestamp) -> bool {
		self.last_time.is_some_and(|last| now.saturating_sub(last) > self.config.timeout_ms)
	}

	pub fn reset(&mut self) {
		self.items.clear();
		self.last_time = None;
	}

	pub fn items(&self) -> &[T] {
		&self.items
	}

	pub fn iter(&self) -> std::slice::Iter<'_, T> {
		self.items.iter()
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn first(&self) -> Option<&T> {
		self.items.first()
	}

	pub fn last(&self) -> Option<&T> {
		self.items.last()
	}

	/// Timestamp of the most recent add, if any survived.
	pub fn last_time(&self) -> Option<Timestamp> {
		self.last_time
	}

	pub fn has_min_length(&self) -> bool {
		self.items.len() >= self.config.min_length
	}

	pub fn filter<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a T> + 'a
	where
		P: FnMut(&&'a T) -> bool + 'a,
	{
		self.items.iter().filter(predicate)
	}

	pub fn any(&self, predicate: impl FnMut(&T) -> bool) -> bool {
		self.items.iter().any(predicate)
	}

	pub fn all(&self, predicate: impl FnMut(&T) -> bool) -> bool {
		self.items.iter().all(predicate)
	}

	/// Returns `items[from..to]` with both bounds clamped to the buffer.
	pub fn slice(&self, from: usize, to: usize) -> &[T] {
		let to = to.min(self.items.len());
		let from = from.min(to);
		&self.items[from..to]
	}

	/// Returns the newest `n` items, oldest first.
	pub fn last_n(&self, n: usize) -> &[T] {
		let from = self.items.len().saturating_sub(n);
		&self.items[from..]
	}
}

impl<T: Timestamped> Default for SequenceTracker<T> {
	fn default() -> Self {
		Self::new(SequenceConfig::default())
	}
}
