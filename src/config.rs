//! Validated gateway configuration: where the API lives, where sessions are refreshed, and where
//! users are sent when a session ends.

// std
use std::time::Duration as StdDuration;
// self
use crate::_prelude::*;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
/// Path of the session refresh endpoint, relative to the base URL.
pub const DEFAULT_REFRESH_PATH: &str = "/auth/refresh";
/// Client-side location users are redirected to once a session cannot be refreshed.
pub const DEFAULT_LOGIN_LOCATION: &str = "/login";
/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "SUPPORT_API_URL";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while constructing or validating configuration.
#[derive(Debug, ThisError)]
pub enum GatewayConfigError {
	/// Base URL failed to parse.
	#[error("Base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Offending input.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses a scheme other than HTTP(S).
	#[error("Base URL `{url}` must use http or https.")]
	UnsupportedScheme {
		/// Offending input.
		url: String,
	},
	/// Refresh path is empty.
	#[error("Refresh path must not be empty.")]
	EmptyRefreshPath,
	/// Login location is empty.
	#[error("Login location must not be empty.")]
	EmptyLoginLocation,
	/// Request path could not be joined onto the base URL.
	#[error("Path `{path}` cannot be resolved against the base URL.")]
	InvalidPath {
		/// Offending path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl GatewayConfigError {
	/// Wraps a transport's builder failure.
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Immutable configuration consumed by the gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
	/// API root; always ends with `/` so joins keep its path.
	pub base_url: Url,
	/// Refresh endpoint path, relative to [`base_url`](Self::base_url).
	pub refresh_path: String,
	/// Where the navigator sends users after a failed refresh.
	pub login_location: String,
	/// Default per-request timeout; `None` leaves it to the transport.
	pub timeout: Option<StdDuration>,
}
impl GatewayConfig {
	/// Creates a new builder seeded with the defaults.
	pub fn builder() -> GatewayConfigBuilder {
		GatewayConfigBuilder::default()
	}

	/// Builds a configuration from the process environment.
	///
	/// Reads [`BASE_URL_ENV`] and falls back to [`DEFAULT_BASE_URL`].
	pub fn from_env() -> Result<Self, GatewayConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Builds a configuration from an arbitrary variable lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut builder = Self::builder();

		if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
			builder = builder.base_url(url.trim());
		}

		builder.build()
	}

	/// Resolves `path` (with optional query string) against the base URL.
	///
	/// Leading slashes are treated as relative to the API root, not the host root.
	pub fn endpoint(&self, path: &str) -> Result<Url, GatewayConfigError> {
		self.base_url
			.join(path.trim_start_matches('/'))
			.map_err(|source| GatewayConfigError::InvalidPath { path: path.to_owned(), source })
	}
}

/// Builder for [`GatewayConfig`] values.
#[derive(Debug)]
pub struct GatewayConfigBuilder {
	/// Raw base URL; parsed on [`build`](Self::build).
	pub base_url: String,
	/// Refresh endpoint path.
	pub refresh_path: String,
	/// Login redirect location.
	pub login_location: String,
	/// Default per-request timeout.
	pub timeout: Option<StdDuration>,
}
impl GatewayConfigBuilder {
	/// Sets the API base URL.
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = url.into();

		self
	}

	/// Sets the refresh endpoint path.
	pub fn refresh_path(mut self, path: impl Into<String>) -> Self {
		self.refresh_path = path.into();

		self
	}

	/// Sets the login redirect location.
	pub fn login_location(mut self, location: impl Into<String>) -> Self {
		self.login_location = location.into();

		self
	}

	/// Sets the default per-request timeout.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<GatewayConfig, GatewayConfigError> {
		let raw = self.base_url.trim();
		let mut base_url = Url::parse(raw)
			.map_err(|source| GatewayConfigError::InvalidBaseUrl { url: raw.to_owned(), source })?;

		if !matches!(base_url.scheme(), "http" | "https") {
			return Err(GatewayConfigError::UnsupportedScheme { url: raw.to_owned() });
		}
		if !base_url.path().ends_with('/') {
			let path = format!("{}/", base_url.path());

			base_url.set_path(&path);
		}
		if self.refresh_path.trim().is_empty() {
			return Err(GatewayConfigError::EmptyRefreshPath);
		}
		if self.login_location.trim().is_empty() {
			return Err(GatewayConfigError::EmptyLoginLocation);
		}

		Ok(GatewayConfig {
			base_url,
			refresh_path: self.refresh_path,
			login_location: self.login_location,
			timeout: self.timeout,
		})
	}
}
impl Default for GatewayConfigBuilder {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_owned(),
			refresh_path: DEFAULT_REFRESH_PATH.to_owned(),
			login_location: DEFAULT_LOGIN_LOCATION.to_owned(),
			timeout: None,
		}
	}
}
