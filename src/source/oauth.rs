//! OAuth 2.0 client-credentials source with a lazily refreshed, singleflight cache.
//!
//! [`OAuthTokenSource::current_token`] reads the cache slot without taking the refresh lock. Only
//! when the slot is empty or inside the renewal lead window does a caller take the lock, check
//! the slot again (another caller may have refreshed while it waited), and then POST to the
//! token endpoint. Callers arriving during a refresh wait for it instead of sending their own
//! request. A failed refresh leaves the previous entry in place.

mod wire;

// crates.io
use oauth2::{AsyncHttpClient, ClientId, ClientSecret, http::StatusCode};
// self
use crate::{
	_prelude::*,
	clock::{Clock, SystemClock},
	config::OAuthSettings,
	error::TransportError,
	http::{self, TokenHttpClient},
	obs::{self, RefreshOutcome, RefreshSpan},
	source::{CloseSource, TokenFuture, TokenSource},
	token::CachedToken,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Default time before expiry at which a cached token is renewed.
pub const RENEW_LEAD_TIME: Duration = Duration::seconds(30);

#[cfg(feature = "reqwest")]
/// Source specialized for the crate's default reqwest transport.
pub type ReqwestTokenSource = OAuthTokenSource<ReqwestHttpClient>;

/// Obtains bearer tokens through the client-credentials grant and caches them until they are
/// about to expire.
///
/// One instance manages one token lineage. Share it behind [`Arc`] to serve concurrent callers.
pub struct OAuthTokenSource<C>
where
	C: TokenHttpClient,
{
	endpoint: Url,
	client_id: ClientId,
	client_secret: ClientSecret,
	scope: String,
	renew_lead_time: Duration,
	clock: Arc<dyn Clock>,
	http_client: Mutex<Option<Arc<C>>>,
	cached: RwLock<Option<Arc<CachedToken>>>,
	refresh_lock: AsyncMutex<()>,
}
#[cfg(feature = "reqwest")]
impl OAuthTokenSource<ReqwestHttpClient> {
	/// Creates a source for `endpoint` that authenticates with HTTP Basic credentials.
	///
	/// Uses the `all-apis` scope, the [`RENEW_LEAD_TIME`] window, and a redirect-free reqwest
	/// client owned by the source.
	pub fn new(
		endpoint: Url,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Result<Self> {
		Self::from_settings(OAuthSettings::new(endpoint, client_id, client_secret))
	}

	/// Creates a source from deserialized settings with the default reqwest transport.
	pub fn from_settings(settings: OAuthSettings) -> Result<Self> {
		Ok(Self::with_http_client(settings, ReqwestHttpClient::without_redirects()?))
	}
}
impl<C> OAuthTokenSource<C>
where
	C: TokenHttpClient,
{
	/// Creates a source that sends token requests through `http_client`.
	pub fn with_http_client(settings: OAuthSettings, http_client: impl Into<Arc<C>>) -> Self {
		let renew_lead_time = settings.renew_lead_time();
		let OAuthSettings { token_endpoint, client_id, client_secret, scope, .. } = settings;

		Self {
			endpoint: token_endpoint,
			client_id: ClientId::new(client_id),
			client_secret: ClientSecret::new(client_secret),
			scope,
			renew_lead_time,
			clock: Arc::new(SystemClock),
			http_client: Mutex::new(Some(http_client.into())),
			cached: RwLock::new(None),
			refresh_lock: AsyncMutex::new(()),
		}
	}

	/// Replaces the clock used for expiry checks.
	pub fn with_clock(mut self, clock: impl 'static + Clock) -> Self {
		self.clock = Arc::new(clock);

		self
	}

	/// Token endpoint this source calls.
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	/// Returns the current cache entry, if any, without refreshing it.
	pub fn cached_token(&self) -> Option<Arc<CachedToken>> {
		self.cached.read().clone()
	}

	/// Returns a cache entry outside the renewal window, refreshing it first if needed.
	pub async fn current_token(&self) -> Result<Arc<CachedToken>> {
		if let Some(token) = self.fresh_cached() {
			return Ok(token);
		}

		let _refresh = self.refresh_lock.lock().await;

		if let Some(token) = self.fresh_cached() {
			obs::record_refresh_outcome(RefreshOutcome::Coalesced);

			return Ok(token);
		}

		self.refresh().await
	}

	fn fresh_cached(&self) -> Option<Arc<CachedToken>> {
		let now = self.clock.now();

		self.cached
			.read()
			.as_ref()
			.filter(|token| !token.needs_renewal(now, self.renew_lead_time))
			.cloned()
	}

	// Caller must hold `refresh_lock`.
	async fn refresh(&self) -> Result<Arc<CachedToken>> {
		let http_client = self.http_client.lock().clone().ok_or(Error::Closed)?;
		let span = RefreshSpan::new(&self.endpoint);

		obs::record_refresh_outcome(RefreshOutcome::Attempt);

		let result = span.instrument(self.request_token(http_client.as_ref())).await;

		match result {
			Ok(token) => {
				let token = Arc::new(token);

				*self.cached.write() = Some(token.clone());

				obs::record_refresh_outcome(RefreshOutcome::Success);

				Ok(token)
			},
			Err(e) => {
				obs::record_refresh_outcome(RefreshOutcome::Failure);

				Err(e)
			},
		}
	}

	async fn request_token(&self, http_client: &C) -> Result<CachedToken> {
		let authorization =
			wire::basic_credentials(self.client_id.as_str(), self.client_secret.secret());
		let request = wire::build_request(&self.endpoint, &authorization, &self.scope)?;
		let handle = http_client.handle();
		let response = handle.call(request).await.map_err(http::map_http_client_error)?;
		let status = response.status();
		let body = String::from_utf8_lossy(response.body()).into_owned();

		if status != StatusCode::OK {
			return Err(Error::TokenEndpoint {
				endpoint: self.endpoint.to_string(),
				status: status.as_u16(),
				body,
			});
		}

		Ok(wire::parse_token_response(&body, self.clock.now())?)
	}
}
impl<C> TokenSource for OAuthTokenSource<C>
where
	C: TokenHttpClient,
{
	fn access_token(&self) -> TokenFuture<'_, String> {
		Box::pin(async move {
			let token = self.current_token().await?;

			Ok(token.value.expose().to_owned())
		})
	}
}
impl<C> CloseSource for OAuthTokenSource<C>
where
	C: TokenHttpClient,
{
	/// Releases the HTTP client. Closing twice is a no-op; refreshes after close fail with
	/// [`Error::Closed`].
	fn close(&self) -> Result<()> {
		let Some(http_client) = self.http_client.lock().take() else {
			return Ok(());
		};

		http_client.shutdown().map_err(TransportError::from)?;

		Ok(())
	}
}
impl<C> Debug for OAuthTokenSource<C>
where
	C: TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuthTokenSource")
			.field("endpoint", &self.endpoint.as_str())
			.field("client_id", &self.client_id.as_str())
			.field("scope", &self.scope)
			.field("renew_lead_time", &self.renew_lead_time)
			.field("cached", &self.cached.read().as_deref())
			.field("closed", &self.http_client.lock().is_none())
			.finish()
	}
}
