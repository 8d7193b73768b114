use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds. Absolute for clock readings and event stamps, relative for windows.
pub type Timestamp = u64;

/// Source of the current time in milliseconds.
pub trait Clock {
	/// Returns the current time.
	fn now(&self) -> Timestamp;
}

/// Wall clock: milliseconds since the UNIX epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> Timestamp {
		SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map(|d| d.as_millis() as Timestamp)
			.unwrap_or_default()
	}
}

/// Manually driven clock.
///
/// Clones share the same reading, so a host can hand one clone to the
/// tracker and keep another to advance time between events.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
	now: Arc<AtomicU64>,
}

impl ManualClock {
	/// Creates a clock reading `start`.
	pub fn new(start: Timestamp) -> Self {
		Self {
			now: Arc::new(AtomicU64::new(start)),
		}
	}

	/// Sets the current reading.
	pub fn set(&self, now: Timestamp) {
		self.now.store(now, Ordering::Relaxed);
	}

	/// Moves the reading forward by `ms`.
	pub fn advance(&self, ms: u64) {
		self.now.fetch_add(ms, Ordering::Relaxed);
	}
}

impl Clock for ManualClock {
	fn now(&self) -> Timestamp {
		self.now.load(Ordering::Relaxed)
	}
}
