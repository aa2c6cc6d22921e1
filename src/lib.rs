//! Lazily refreshed bearer tokens: hand out a fixed token, or obtain one through the OAuth 2.0
//! client-credentials grant and keep it fresh behind a singleflight, lead-time aware cache.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod clock;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod source;
pub mod token;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::Deserialize;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::OAuthSettings;
#[cfg(feature = "reqwest")] pub use source::oauth::ReqwestTokenSource;
pub use source::{CloseSource, FixedTokenSource, OAuthTokenSource, TokenFuture, TokenSource};
pub use token::{CachedToken, TokenSecret};
