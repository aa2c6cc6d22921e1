//! Token source contracts and the built-in fixed and OAuth-backed sources.
//!
//! Retrieval and release are separate capabilities: [`TokenSource`] hands out bearer values,
//! [`CloseSource`] frees whatever the source owns. Whoever owns a source's lifetime holds both.

pub mod fixed;
pub mod oauth;

pub use fixed::FixedTokenSource;
pub use oauth::OAuthTokenSource;

// self
use crate::_prelude::*;

/// Boxed future returned by [`TokenSource::access_token`].
pub type TokenFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Supplies bearer access tokens to callers.
pub trait TokenSource
where
	Self: Send + Sync,
{
	/// Returns a token that is valid right now, fetching a new one first if needed.
	fn access_token(&self) -> TokenFuture<'_, String>;
}

/// Releases resources held by a token source.
pub trait CloseSource {
	/// Frees owned transport resources. Must not race an in-flight
	/// [`TokenSource::access_token`] call.
	fn close(&self) -> Result<()>;
}

impl<T> TokenSource for Arc<T>
where
	T: ?Sized + TokenSource,
{
	fn access_token(&self) -> TokenFuture<'_, String> {
		(**self).access_token()
	}
}
impl<T> CloseSource for Arc<T>
where
	T: ?Sized + CloseSource,
{
	fn close(&self) -> Result<()> {
		(**self).close()
	}
}
