//! Token values handed to callers and the cache entries that carry their expiry.

pub mod cached;
pub mod secret;

pub use cached::*;
pub use secret::*;
