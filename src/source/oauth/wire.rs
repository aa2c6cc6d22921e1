//! Client-credentials request encoding and token response decoding.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use oauth2::{
	HttpRequest,
	http::{
		Method, Request,
		header::{AUTHORIZATION, CONTENT_TYPE},
	},
};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, ResponseFormatError},
	token::CachedToken,
};

const GRANT_TYPE: &str = "client_credentials";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// `Authorization` header value for HTTP Basic client authentication.
pub(crate) fn basic_credentials(client_id: &str, client_secret: &str) -> String {
	format!("Basic {}", STANDARD.encode(format!("{client_id}:{client_secret}")))
}

/// `grant_type=client_credentials&scope=<scope>`.
pub(crate) fn form_body(scope: &str) -> String {
	form_urlencoded::Serializer::new(String::new())
		.append_pair("grant_type", GRANT_TYPE)
		.append_pair("scope", scope)
		.finish()
}

pub(crate) fn build_request(
	endpoint: &Url,
	authorization: &str,
	scope: &str,
) -> Result<HttpRequest> {
	Request::builder()
		.method(Method::POST)
		.uri(endpoint.as_str())
		.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
		.header(AUTHORIZATION, authorization)
		.body(form_body(scope).into_bytes())
		.map_err(|e| ConfigError::from(e).into())
}

#[derive(Deserialize)]
struct TokenResponse {
	access_token: String,
	expires_in: ExpiresIn,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExpiresIn {
	Seconds(u64),
	Text(String),
}
impl ExpiresIn {
	fn seconds(self) -> Result<u64, ResponseFormatError> {
		match self {
			ExpiresIn::Seconds(secs) => Ok(secs),
			ExpiresIn::Text(raw) =>
				raw.trim().parse().map_err(|_| ResponseFormatError::InvalidExpiresIn { value: raw }),
		}
	}
}

/// Decodes a `200 OK` body into a cache entry expiring `expires_in` seconds after `now`.
///
/// Fields other than `access_token` and `expires_in` are ignored.
pub(crate) fn parse_token_response(
	body: &str,
	now: OffsetDateTime,
) -> Result<CachedToken, ResponseFormatError> {
	let de = &mut serde_json::Deserializer::from_str(body);
	let response: TokenResponse = serde_path_to_error::deserialize(de)
		.map_err(|source| ResponseFormatError::Json { source })?;
	let expires_in = response.expires_in.seconds()?;

	CachedToken::from_expires_in(response.access_token, now, expires_in)
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	const NOW: OffsetDateTime = datetime!(2025-03-01 12:00 UTC);

	#[test]
	fn basic_credentials_decode_to_id_and_secret() {
		let header = basic_credentials("svc-ingest", "p@ss:word");
		let encoded = header.strip_prefix("Basic ").expect("Header should use the Basic scheme.");
		let decoded = STANDARD.decode(encoded).expect("Header payload should be valid base64.");

		assert_eq!(decoded, b"svc-ingest:p@ss:word");
	}

	#[test]
	fn form_body_keeps_literal_values() {
		assert_eq!(form_body("all-apis"), "grant_type=client_credentials&scope=all-apis");
	}

	#[test]
	fn request_carries_headers_and_body() {
		let endpoint =
			Url::parse("https://auth.example.com/oidc/v1/token").expect("Failed to parse URL.");
		let request = build_request(&endpoint, "Basic YTpi", "all-apis")
			.expect("Request should build for a valid endpoint.");

		assert_eq!(request.method(), Method::POST);
		assert_eq!(request.uri(), "https://auth.example.com/oidc/v1/token");
		assert_eq!(request.headers()[CONTENT_TYPE], FORM_CONTENT_TYPE);
		assert_eq!(request.headers()[AUTHORIZATION], "Basic YTpi");
		assert_eq!(request.body().as_slice(), b"grant_type=client_credentials&scope=all-apis");
	}

	#[test]
	fn accepts_string_and_numeric_expires_in() {
		let text = parse_token_response(r#"{"access_token":"T1","expires_in":"3600"}"#, NOW)
			.expect("String expires_in should parse.");
		let number = parse_token_response(
			r#"{"access_token":"T1","expires_in":3600,"token_type":"Bearer","scope":"all-apis"}"#,
			NOW,
		)
		.expect("Numeric expires_in with extra fields should parse.");

		assert_eq!(text.value.expose(), "T1");
		assert_eq!(text.expires_at, datetime!(2025-03-01 13:00 UTC));
		assert_eq!(text, number);
	}

	#[test]
	fn rejects_missing_or_non_numeric_expires_in() {
		assert!(matches!(
			parse_token_response(r#"{"access_token":"T1"}"#, NOW),
			Err(ResponseFormatError::Json { .. })
		));
		assert!(matches!(
			parse_token_response(r#"{"access_token":"T1","expires_in":"soon"}"#, NOW),
			Err(ResponseFormatError::InvalidExpiresIn { value }) if value == "soon"
		));
		assert!(matches!(
			parse_token_response(r#"{"access_token":"T1","expires_in":-5}"#, NOW),
			Err(ResponseFormatError::Json { .. })
		));
		assert!(matches!(
			parse_token_response("<html>gateway</html>", NOW),
			Err(ResponseFormatError::Json { .. })
		));
	}
}
