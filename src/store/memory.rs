//! Thread-safe in-memory [`TokenStore`] for tests and short-lived processes.

// self
use crate::{
	_prelude::*,
	store::{StoreError, StoreFuture, TokenStore},
	token::StoredToken,
};

type Slot = Arc<RwLock<Option<StoredToken>>>;

/// Token slot that lives only as long as the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore(Slot);
impl MemoryTokenStore {
	/// Creates a slot pre-populated with `token`.
	pub fn with_token(token: StoredToken) -> Self {
		Self(Arc::new(RwLock::new(Some(token))))
	}

	/// Returns the current value without going through the async contract.
	pub fn snapshot(&self) -> Option<StoredToken> {
		self.0.read().clone()
	}

	fn save_now(slot: Slot, token: StoredToken) -> Result<(), StoreError> {
		*slot.write() = Some(token);

		Ok(())
	}
}
impl TokenStore for MemoryTokenStore {
	fn load(&self) -> StoreFuture<'_, Option<StoredToken>> {
		let slot = self.0.clone();

		Box::pin(async move { Ok(slot.read().clone()) })
	}

	fn save(&self, token: StoredToken) -> StoreFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move { Self::save_now(slot, token) })
	}

	fn clear(&self) -> StoreFuture<'_, Option<StoredToken>> {
		let slot = self.0.clone();

		Box::pin(async move { Ok(slot.write().take()) })
	}
}
