//! Wall-clock sources used for expiry comparisons.

// self
use crate::_prelude::*;

/// Supplies the current instant to token sources.
pub trait Clock
where
	Self: Send + Sync,
{
	/// Returns the current UTC instant.
	fn now(&self) -> OffsetDateTime;
}

/// Clock backed by the system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
	fn now(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc()
	}
}

/// Manually driven clock for deterministic expiry tests.
///
/// Clones share the same instant, so a test can keep one handle and advance the clock a source
/// was built with.
#[derive(Clone, Debug)]
pub struct ManualClock(Arc<Mutex<OffsetDateTime>>);
impl ManualClock {
	/// Creates a clock frozen at `start`.
	pub fn new(start: OffsetDateTime) -> Self {
		Self(Arc::new(Mutex::new(start)))
	}

	/// Moves the clock forward (or backward, for negative durations).
	pub fn advance(&self, by: Duration) {
		let mut now = self.0.lock();

		*now += by;
	}

	/// Jumps the clock to `instant`.
	pub fn set(&self, instant: OffsetDateTime) {
		*self.0.lock() = instant;
	}
}
impl Default for ManualClock {
	fn default() -> Self {
		Self::new(OffsetDateTime::UNIX_EPOCH)
	}
}
impl Clock for ManualClock {
	fn now(&self) -> OffsetDateTime {
		*self.0.lock()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn manual_clock_clones_share_time() {
		let clock = ManualClock::new(datetime!(2025-03-01 12:00 UTC));
		let shared = clock.clone();

		shared.advance(Duration::seconds(90));

		assert_eq!(clock.now(), datetime!(2025-03-01 12:01:30 UTC));

		clock.set(datetime!(2030-01-01 00:00 UTC));

		assert_eq!(shared.now(), datetime!(2030-01-01 00:00 UTC));
	}

	#[test]
	fn system_clock_is_utc() {
		assert!(SystemClock.now().offset().is_utc());
	}
}
