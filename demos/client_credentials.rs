//! Demonstrates an OAuth-backed token source against a mock token endpoint, then swaps in a
//! fixed token behind the same `TokenSource` interface.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use oauth2_token_source::{
	CloseSource, FixedTokenSource, OAuthSettings, OAuthTokenSource, TokenSource, url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oidc/v1/token");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":"demo-access","token_type":"Bearer","expires_in":"900"}"#);
		})
		.await;
	let settings =
		OAuthSettings::new(Url::parse(&server.url("/oidc/v1/token"))?, "demo-client", "demo-secret");
	let oauth = Arc::new(OAuthTokenSource::from_settings(settings)?);
	let sources: [Arc<dyn TokenSource>; 2] =
		[oauth.clone(), Arc::new(FixedTokenSource::new("pre-issued-token")?)];

	for source in &sources {
		println!("Access token: {}.", source.access_token().await?);
	}

	// Served from cache; the endpoint is only called once.
	println!("Access token again: {}.", oauth.access_token().await?);

	token_mock.assert_async().await;
	oauth.close()?;

	Ok(())
}
