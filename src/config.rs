//! Settings for OAuth-backed token sources.
//!
//! [`OAuthSettings`] deserializes from any serde format so hosts can embed it in their own
//! configuration files. Where the client id and secret come from is left to the host.

// self
use crate::{_prelude::*, source::oauth::RENEW_LEAD_TIME};

const DEFAULT_SCOPE: &str = "all-apis";
const DEFAULT_RENEW_LEAD_TIME_MS: u64 = RENEW_LEAD_TIME.whole_milliseconds() as u64;

/// Token endpoint, client credentials, and cache tuning for an
/// [`OAuthTokenSource`](crate::source::OAuthTokenSource).
#[derive(Clone, Deserialize)]
pub struct OAuthSettings {
	/// Token endpoint receiving the client-credentials POST.
	pub token_endpoint: Url,
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret; never printed by [`Debug`].
	pub client_secret: String,
	/// Value sent as the `scope` form parameter.
	#[serde(default = "default_scope")]
	pub scope: String,
	/// How long before expiry a cached token is renewed, in milliseconds.
	#[serde(default = "default_renew_lead_time_ms")]
	pub renew_lead_time_ms: u64,
}
impl OAuthSettings {
	/// Creates settings with the default `all-apis` scope and a 30 second lead time.
	pub fn new(
		token_endpoint: Url,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Self {
		Self {
			token_endpoint,
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			scope: default_scope(),
			renew_lead_time_ms: DEFAULT_RENEW_LEAD_TIME_MS,
		}
	}

	/// Overrides the requested scope.
	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = scope.into();

		self
	}

	/// Overrides the renewal lead time; negative values clamp to zero.
	pub fn with_renew_lead_time(mut self, lead: Duration) -> Self {
		self.renew_lead_time_ms = u64::try_from(lead.whole_milliseconds()).unwrap_or(0);

		self
	}

	/// Renewal lead time as a [`Duration`].
	pub fn renew_lead_time(&self) -> Duration {
		Duration::milliseconds(i64::try_from(self.renew_lead_time_ms).unwrap_or(i64::MAX))
	}
}
impl Debug for OAuthSettings {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuthSettings")
			.field("token_endpoint", &self.token_endpoint.as_str())
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.field("scope", &self.scope)
			.field("renew_lead_time_ms", &self.renew_lead_time_ms)
			.finish()
	}
}

fn default_scope() -> String {
	DEFAULT_SCOPE.into()
}

fn default_renew_lead_time_ms() -> u64 {
	DEFAULT_RENEW_LEAD_TIME_MS
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn deserializes_with_defaults() {
		let settings: OAuthSettings = serde_json::from_str(
			r#"{
				"token_endpoint": "https://auth.example.com/oidc/v1/token",
				"client_id": "svc-ingest",
				"client_secret": "s3cr3t"
			}"#,
		)
		.expect("Minimal settings should deserialize.");

		assert_eq!(settings.token_endpoint.as_str(), "https://auth.example.com/oidc/v1/token");
		assert_eq!(settings.scope, "all-apis");
		assert_eq!(settings.renew_lead_time(), RENEW_LEAD_TIME);
		assert_eq!(settings.renew_lead_time_ms, 30_000);
	}

	#[test]
	fn rejects_invalid_endpoint() {
		let result = serde_json::from_str::<OAuthSettings>(
			r#"{"token_endpoint": "not a url", "client_id": "a", "client_secret": "b"}"#,
		);

		assert!(result.is_err());
	}

	#[test]
	fn overrides_and_redaction() {
		let endpoint =
			Url::parse("https://auth.example.com/token").expect("Failed to parse endpoint URL.");
		let settings = OAuthSettings::new(endpoint, "svc", "s3cr3t")
			.with_scope("sql")
			.with_renew_lead_time(Duration::seconds(-5));

		assert_eq!(settings.scope, "sql");
		assert_eq!(settings.renew_lead_time(), Duration::ZERO);

		let rendered = format!("{settings:?}");

		assert!(rendered.contains("<redacted>"));
		assert!(!rendered.contains("s3cr3t"));
	}
}
