//! Error types surfaced by token sources.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by [`TokenSource`](crate::source::TokenSource) implementations.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeouts).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token endpoint answered with something other than `200 OK`.
	#[error("Failed to obtain access token from {endpoint}, status code: {status}, body: {body}.")]
	TokenEndpoint {
		/// Token endpoint that was called, in its normalized URL form (a bare host gains a
		/// trailing `/`).
		endpoint: String,
		/// HTTP status code returned by the endpoint.
		status: u16,
		/// Full response body, kept for diagnostics.
		body: String,
	},
	/// Successful response whose body could not be interpreted.
	#[error(transparent)]
	ResponseFormat(#[from] ResponseFormatError),
	/// Source was closed; its HTTP client has been released.
	#[error("Token source has been closed.")]
	Closed,
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// A fixed token source was given an empty token.
	#[error("Fixed token cannot be empty.")]
	EmptyToken,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while refreshing the access token.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport or shutdown.
	#[error("I/O error occurred while talking to the token endpoint.")]
	Io(#[from] std::io::Error),
	/// HTTP client failed without a typed cause.
	#[error("HTTP client error occurred while refreshing the access token: {message}.")]
	Other {
		/// Client-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// The token endpoint returned `200 OK` with a body of the wrong shape.
#[derive(Debug, ThisError)]
pub enum ResponseFormatError {
	/// Body is not JSON, or lacks `access_token`/`expires_in`.
	#[error("Token endpoint returned malformed JSON.")]
	Json {
		/// Structured parsing failure, including the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// `expires_in` is not a non-negative decimal integer.
	#[error("Token endpoint returned a non-numeric expires_in: {value:?}.")]
	InvalidExpiresIn {
		/// Raw value as received.
		value: String,
	},
	/// `expires_in` does not fit the supported time range.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn token_endpoint_error_embeds_diagnostics() {
		let err = Error::TokenEndpoint {
			endpoint: "https://auth.example.com/oidc/v1/token".into(),
			status: 401,
			body: "invalid_client".into(),
		};
		let message = err.to_string();

		assert!(message.contains("https://auth.example.com/oidc/v1/token"));
		assert!(message.contains("401"));
		assert!(message.contains("invalid_client"));
	}

	#[test]
	fn transport_error_names_the_refresh() {
		let err: Error = TransportError::Io(std::io::Error::other("connection reset")).into();

		assert!(err.to_string().contains("token endpoint"));
		assert!(err.source().is_some());
	}
}
