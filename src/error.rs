//! Gateway-level error types shared across the transport, token slot, and support services.

// self
use crate::{_prelude::*, config::GatewayConfigError, store::StoreError, support::ContactFormError};

/// Gateway-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical gateway error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Token slot failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] GatewayConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Body could not be encoded or decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Session refresh failed; the token slot has been cleared.
	#[error(transparent)]
	AuthRefresh(#[from] AuthRefreshError),
	/// Contact form payload failed local validation.
	#[error(transparent)]
	Validation(#[from] ContactFormError),

	/// Resource identifier cannot be used as a single path segment.
	#[error("`{id}` is not a valid resource identifier.")]
	InvalidId {
		/// Offending identifier.
		id: String,
	},

	/// Server answered with a non-2xx status.
	#[error("Request failed with HTTP status {status}.")]
	Http {
		/// HTTP status code returned by the server.
		status: u16,
		/// Response body as lossy UTF-8, for diagnostics.
		body: String,
	},
}
impl Error {
	/// Returns the HTTP status carried by this error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Http { status, .. } => Some(*status),
			Self::AuthRefresh(AuthRefreshError::Rejected { status, .. }) => Some(*status),
			_ => None,
		}
	}

	/// Whether the server rejected the request's credentials.
	pub fn is_unauthorized(&self) -> bool {
		matches!(self, Self::Http { status: 401, .. })
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Body encoding and decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Response body was not the JSON shape the caller asked for.
	#[error("Response with HTTP status {status} could not be decoded.")]
	Response {
		/// Structured parsing failure, including the JSON path that failed.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Request payload could not be serialized.
	#[error("Request body could not be encoded as JSON.")]
	Request(#[source] serde_json::Error),
}

/// Failures of the session refresh call. Each one ends the session.
#[derive(Debug, ThisError)]
pub enum AuthRefreshError {
	/// Refresh call failed before a response arrived.
	#[error("Session refresh failed in transport.")]
	Transport(#[source] TransportError),
	/// Refresh endpoint answered with a non-2xx status.
	#[error("Session refresh was rejected with HTTP status {status}.")]
	Rejected {
		/// HTTP status code returned by the refresh endpoint.
		status: u16,
		/// Response body as lossy UTF-8, for diagnostics.
		body: String,
	},
	/// Refresh response had no usable `token` field.
	#[error("Session refresh response did not contain a token.")]
	MissingToken,
	/// Refresh response was not valid JSON.
	#[error("Session refresh response could not be decoded.")]
	Decode(#[source] DecodeError),
	/// Refresh endpoint could not be resolved against the base URL.
	#[error("Session refresh endpoint is invalid.")]
	Config(#[source] GatewayConfigError),
	/// Token slot could not be read or written.
	#[error("Session token could not be persisted.")]
	Storage(#[source] StoreError),
	/// Another call ended the session while this one waited to refresh.
	#[error("Session was cleared while waiting to refresh.")]
	SessionCleared,
}
