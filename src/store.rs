//! Token slot contract and built-in slot implementations.
//!
//! A gateway owns exactly one slot. The slot is read before every request, written by the
//! refresh step or an external login, and cleared when a refresh fails.

pub mod file;
pub mod memory;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

// self
use crate::{_prelude::*, token::StoredToken};

/// Key under which key-value backends persist the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Boxed future returned by [`TokenStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Single-value persistence contract for the current bearer credential.
pub trait TokenStore
where
	Self: Send + Sync,
{
	/// Returns the stored credential, if any.
	fn load(&self) -> StoreFuture<'_, Option<StoredToken>>;

	/// Persists `token`, replacing any previous value.
	fn save(&self, token: StoredToken) -> StoreFuture<'_, ()>;

	/// Removes the stored credential and returns what was there.
	fn clear(&self) -> StoreFuture<'_, Option<StoredToken>>;
}

/// Error type produced by [`TokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
