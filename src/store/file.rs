//! File-backed [`TokenStore`] that behaves like browser local storage.
//!
//! The file holds a JSON object of string keys. The credential lives under
//! [`TOKEN_KEY`](crate::store::TOKEN_KEY); other keys written by the host application are
//! preserved across writes.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	store::{StoreError, StoreFuture, TOKEN_KEY, TokenStore},
	token::StoredToken,
};

type Entries = BTreeMap<String, serde_json::Value>;

/// Persists the token slot to a JSON file after each mutation.
///
/// The in-memory view only changes once the file write has succeeded, so a failed `save` or
/// `clear` leaves both in their previous state.
#[derive(Clone, Debug)]
pub struct FileTokenStore {
	path: PathBuf,
	inner: Arc<RwLock<Entries>>,
}
impl FileTokenStore {
	/// Opens (or creates) a store at the provided path, eagerly loading existing data.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = Self::load_snapshot(&path)?;

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	/// Location of the backing file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn load_snapshot(path: &Path) -> Result<Entries, StoreError> {
		if !path.exists() {
			return Ok(Entries::new());
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		if bytes.iter().all(u8::is_ascii_whitespace) {
			return Ok(Entries::new());
		}

		serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
			message: format!("Failed to parse {}: {e}", path.display()),
		})
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn persist_locked(&self, contents: &Entries) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let serialized =
			serde_json::to_vec_pretty(contents).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize token slot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}

	fn decode(value: &serde_json::Value) -> Result<StoredToken, StoreError> {
		StoredToken::deserialize(value).map_err(|e| StoreError::Serialization {
			message: format!("Failed to decode the `{TOKEN_KEY}` entry: {e}"),
		})
	}
}
impl TokenStore for FileTokenStore {
	fn load(&self) -> StoreFuture<'_, Option<StoredToken>> {
		Box::pin(async move { self.inner.read().get(TOKEN_KEY).map(Self::decode).transpose() })
	}

	fn save(&self, token: StoredToken) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let value = serde_json::to_value(&token).map_err(|e| StoreError::Serialization {
				message: format!("Failed to encode the `{TOKEN_KEY}` entry: {e}"),
			})?;
			let mut guard = self.inner.write();
			let mut next = guard.clone();

			next.insert(TOKEN_KEY.to_owned(), value);
			self.persist_locked(&next)?;

			*guard = next;

			Ok(())
		})
	}

	fn clear(&self) -> StoreFuture<'_, Option<StoredToken>> {
		Box::pin(async move {
			let mut guard = self.inner.write();
			let mut next = guard.clone();
			let Some(previous) = next.remove(TOKEN_KEY) else {
				return Ok(None);
			};

			self.persist_locked(&next)?;

			*guard = next;

			// A malformed entry is still gone; report it as absent.
			Ok(Self::decode(&previous).ok())
		})
	}
}
