//! Optional observability helpers for token refreshes.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to run every refresh inside an `oauth2_token_source.refresh` span carrying
//!   the `endpoint` field.
//! - Enable `metrics` to increment the `oauth2_token_source_refresh_total` counter, labeled by
//!   `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each refresh decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefreshOutcome {
	/// A token endpoint request is about to be sent.
	Attempt,
	/// A new token was installed in the cache.
	Success,
	/// The refresh failed and the error went back to the caller.
	Failure,
	/// The caller waited on the refresh lock and found a token installed by another caller.
	Coalesced,
}
impl RefreshOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RefreshOutcome::Attempt => "attempt",
			RefreshOutcome::Success => "success",
			RefreshOutcome::Failure => "failure",
			RefreshOutcome::Coalesced => "coalesced",
		}
	}
}
impl Display for RefreshOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
