//! Bearer credential held in the token slot, redacted wherever it could reach a log line.

// self
use crate::_prelude::*;

/// Redacted bearer token wrapper keeping credentials out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BearerToken(String);
impl BearerToken {
	/// Wraps a new token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Formats the `Authorization` header value for this token.
	pub fn header_value(&self) -> String {
		format!("Bearer {}", self.0)
	}
}
impl AsRef<str> for BearerToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl From<&str> for BearerToken {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
impl From<String> for BearerToken {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}
impl Debug for BearerToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("BearerToken").field(&"<redacted>").finish()
	}
}
impl Display for BearerToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Value persisted in the token slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
	/// Current bearer credential.
	pub token: BearerToken,
	/// Instant the credential was written to the slot.
	#[serde(with = "time::serde::rfc3339")]
	pub stored_at: OffsetDateTime,
}
impl StoredToken {
	/// Stamps `token` with the current UTC time.
	pub fn new(token: impl Into<BearerToken>) -> Self {
		Self { token: token.into(), stored_at: OffsetDateTime::now_utc() }
	}
}
