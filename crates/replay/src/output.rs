use std::io::{self, Write};

use nudge_patterns::PatternMatch;
use nudge_tracker::Notifier;
use tracing::{info, warn};

/// Writes each match as one line of JSON.
///
/// [`Notifier::notify`] cannot fail, so the first write error is kept and
/// returned by [`finish`](Self::finish); later matches are dropped.
pub struct JsonLines<W: Write> {
	out: W,
	written: usize,
	error: Option<io::Error>,
}

impl<W: Write> JsonLines<W> {
	pub fn new(out: W) -> Self {
		Self {
			out,
			written: 0,
			error: None,
		}
	}

	fn write(&mut self, found: &PatternMatch) -> io::Result<()> {
		serde_json::to_writer(&mut self.out, found)?;
		self.out.write_all(b"\n")
	}

	/// Flushes and returns the number of matches written.
	pub fn finish(mut self) -> io::Result<usize> {
		if let Some(error) = self.error.take() {
			return Err(error);
		}
		self.out.flush()?;
		Ok(self.written)
	}
}

impl<W: Write> Notifier for JsonLines<W> {
	fn notify(&mut self, found: PatternMatch) {
		if self.error.is_some() {
			return;
		}
		info!(key = %found.key(), "replay.match");
		match self.write(&found) {
			Ok(()) => self.written += 1,
			Err(error) => {
				warn!(%error, "replay.output_failed");
				self.error = Some(error);
			}
		}
	}
}
