//! Source that always returns one pre-issued token.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	source::{CloseSource, TokenFuture, TokenSource},
	token::TokenSecret,
};

/// Returns the same pre-issued token on every call; never touches the network.
#[derive(Clone, Debug)]
pub struct FixedTokenSource {
	token: TokenSecret,
}
impl FixedTokenSource {
	/// Wraps `token`, rejecting only the empty string.
	pub fn new(token: impl Into<String>) -> Result<Self> {
		let token = TokenSecret::new(token);

		if token.is_empty() {
			return Err(ConfigError::EmptyToken.into());
		}

		Ok(Self { token })
	}
}
impl TokenSource for FixedTokenSource {
	fn access_token(&self) -> TokenFuture<'_, String> {
		let token = self.token.expose().to_owned();

		Box::pin(async move { Ok(token) })
	}
}
impl CloseSource for FixedTokenSource {
	fn close(&self) -> Result<()> {
		Ok(())
	}
}
