//! The `{status, data}` wire envelope returned by the support API.
//!
//! Callers never see the envelope: the gateway decodes it at the boundary and hands back
//! `data`. Decoding is strict, so a missing `data` field fails with the offending path instead
//! of silently yielding a default.

// self
use crate::{_prelude::*, error::DecodeError, http::ApiResponse};

/// Backend response wrapper.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
	/// Server-reported outcome label (for example `"ok"` or `"success"`).
	pub status: String,
	/// Payload handed back to callers.
	pub data: T,
}
impl<T> Envelope<T> {
	/// Wraps `data` with the given status label.
	pub fn new(status: impl Into<String>, data: T) -> Self {
		Self { status: status.into(), data }
	}

	/// Drops the envelope and returns the payload.
	pub fn into_data(self) -> T {
		self.data
	}
}

/// Decodes `response` as an [`Envelope<T>`] and returns its payload.
///
/// An empty body (e.g. `204 No Content`) yields `T` decoded from `null`, which succeeds for
/// `()` and `Option<_>` targets.
pub fn unwrap<T>(response: &ApiResponse) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	if response.body.iter().all(u8::is_ascii_whitespace) {
		return response.decode();
	}

	response.decode::<Envelope<T>>().map(Envelope::into_data)
}
