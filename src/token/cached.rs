//! Immutable cache entry produced by each successful token fetch.

// self
use crate::{_prelude::*, error::ResponseFormatError, token::TokenSecret};

/// Access token plus the absolute instant it stops being valid.
///
/// Entries are never mutated; a renewal installs a new entry in place of the old one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedToken {
	/// Bearer value handed to callers.
	pub value: TokenSecret,
	/// Absolute expiry instant.
	pub expires_at: OffsetDateTime,
}
impl CachedToken {
	/// Creates an entry with an absolute expiry.
	pub fn new(value: impl Into<String>, expires_at: OffsetDateTime) -> Self {
		Self { value: TokenSecret::new(value), expires_at }
	}

	/// Creates an entry that expires `expires_in_secs` seconds after `now`.
	pub fn from_expires_in(
		value: impl Into<String>,
		now: OffsetDateTime,
		expires_in_secs: u64,
	) -> Result<Self, ResponseFormatError> {
		let secs =
			i64::try_from(expires_in_secs).map_err(|_| ResponseFormatError::ExpiresInOutOfRange)?;
		let lifetime = Duration::milliseconds(
			secs.checked_mul(1_000).ok_or(ResponseFormatError::ExpiresInOutOfRange)?,
		);
		let expires_at =
			now.checked_add(lifetime).ok_or(ResponseFormatError::ExpiresInOutOfRange)?;

		Ok(Self::new(value, expires_at))
	}

	/// Returns `true` once `now + lead` reaches the expiry instant.
	pub fn needs_renewal(&self, now: OffsetDateTime, lead: Duration) -> bool {
		match now.checked_add(lead) {
			Some(deadline) => deadline >= self.expires_at,
			None => true,
		}
	}

	/// Expiry expressed as milliseconds since the Unix epoch.
	pub fn expires_at_epoch_millis(&self) -> i64 {
		(self.expires_at.unix_timestamp_nanos() / 1_000_000) as i64
	}
}
