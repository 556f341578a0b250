//! Transport primitives for gateway calls.
//!
//! The module exposes [`HttpTransport`] alongside the request/response types that flow
//! through it. [`ApiRequest`] is the logical call a caller issues (relative path, JSON body,
//! per-call options, and the retried flag); the gateway resolves it against its
//! configuration into an [`HttpRequest`] before handing it to the transport, so custom
//! transports only ever see absolute URLs and final headers.

// std
use std::time::Duration as StdDuration;
// self
use crate::{
	_prelude::*,
	config::{GatewayConfig, GatewayConfigError},
	error::{DecodeError, TransportError},
	token::BearerToken,
};

/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing resolved gateway requests.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared by
/// every clone of a gateway, and the returned futures must be `Send` so calls can hop
/// executors. Non-2xx responses are not errors at this layer: return them as
/// [`ApiResponse`] values and let the gateway classify them.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves to the raw response.
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// HTTP verbs exposed by the gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
	/// `PUT`.
	Put,
	/// `PATCH`.
	Patch,
	/// `DELETE`.
	Delete,
}
impl Method {
	/// Returns the canonical upper-case verb.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Patch => "PATCH",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Per-call knobs layered on top of the gateway defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
	/// Extra headers appended after the gateway's own.
	pub headers: Vec<(String, String)>,
	/// Query pairs appended to the resolved URL.
	pub query: Vec<(String, String)>,
	/// Overrides the configured request timeout.
	pub timeout: Option<StdDuration>,
}
impl RequestOptions {
	/// Appends a header.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Appends a query pair.
	pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((name.into(), value.into()));

		self
	}

	/// Appends a query pair only when `value` is present and non-blank.
	pub fn query_opt(self, name: impl Into<String>, value: Option<&str>) -> Self {
		match value.map(str::trim).filter(|v| !v.is_empty()) {
			Some(value) => self.query(name, value),
			None => self,
		}
	}

	/// Sets a timeout for this call.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}
}

/// Logical request issued through the gateway.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
	/// HTTP verb.
	pub method: Method,
	/// Path relative to the configured base URL, optionally with a query string.
	pub path: String,
	/// JSON payload, if any.
	pub body: Option<serde_json::Value>,
	/// Per-call options.
	pub options: RequestOptions,
	/// Set once the request has been retried after a session refresh.
	pub retried: bool,
	authorization: Option<BearerToken>,
}
impl ApiRequest {
	/// Creates a body-less request for `path`.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			body: None,
			options: RequestOptions::default(),
			retried: false,
			authorization: None,
		}
	}

	/// Serializes `body` as the JSON payload.
	pub fn with_json<B>(mut self, body: &B) -> Result<Self, DecodeError>
	where
		B: ?Sized + Serialize,
	{
		self.body = Some(serde_json::to_value(body).map_err(DecodeError::Request)?);

		Ok(self)
	}

	/// Replaces the per-call options.
	pub fn with_options(mut self, options: RequestOptions) -> Self {
		self.options = options;

		self
	}

	/// Bearer token that will be attached on dispatch.
	pub fn authorization(&self) -> Option<&BearerToken> {
		self.authorization.as_ref()
	}

	pub(crate) fn set_authorization(&mut self, token: Option<BearerToken>) {
		self.authorization = token;
	}

	/// Resolves the request against `config` into a transport-ready [`HttpRequest`].
	pub fn prepare(&self, config: &GatewayConfig) -> Result<HttpRequest, GatewayConfigError> {
		let mut url = config.endpoint(&self.path)?;

		if !self.options.query.is_empty() {
			url.query_pairs_mut().extend_pairs(self.options.query.iter());
		}

		let mut headers = vec![
			("content-type".to_owned(), "application/json".to_owned()),
			("accept".to_owned(), "application/json".to_owned()),
		];

		if let Some(token) = &self.authorization {
			headers.push(("authorization".to_owned(), token.header_value()));
		}

		headers.extend(self.options.headers.iter().cloned());

		let body = self.body.as_ref().map(|value| value.to_string().into_bytes());

		Ok(HttpRequest {
			method: self.method,
			url,
			headers,
			body,
			timeout: self.options.timeout.or(config.timeout),
		})
	}
}

/// Fully resolved request handed to an [`HttpTransport`].
///
/// `Debug` output masks the `Authorization` header value.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
	/// HTTP verb.
	pub method: Method,
	/// Absolute URL including query.
	pub url: Url,
	/// Header pairs in send order; names are lower-case for gateway-owned headers.
	pub headers: Vec<(String, String)>,
	/// Encoded JSON payload.
	pub body: Option<Vec<u8>>,
	/// Effective timeout.
	pub timeout: Option<StdDuration>,
}
impl HttpRequest {
	/// Returns the last value of header `name`, compared case-insensitively.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.rev()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

impl Debug for HttpRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let headers = self
			.headers
			.iter()
			.map(|(name, value)| {
				let value = if name.eq_ignore_ascii_case("authorization") {
					"<redacted>"
				} else {
					value.as_str()
				};

				(name.as_str(), value)
			})
			.collect::<Vec<_>>();

		f.debug_struct("HttpRequest")
			.field("method", &self.method)
			.field("url", &self.url.as_str())
			.field("headers", &headers)
			.field("body_len", &self.body.as_ref().map(Vec::len))
			.field("timeout", &self.timeout)
			.finish()
	}
}

/// Raw response produced by an [`HttpTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Creates a response from its parts.
	pub fn new(status: u16, body: Vec<u8>) -> Self {
		Self { status, body }
	}

	/// Whether the status is in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Body as lossy UTF-8.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Decodes the body as JSON, reporting the failing path on error.
	///
	/// An empty body decodes as JSON `null`, so `()` and `Option<_>` targets accept
	/// `204 No Content` style responses.
	pub fn decode<T>(&self) -> Result<T, DecodeError>
	where
		T: DeserializeOwned,
	{
		let bytes: &[u8] =
			if self.body.iter().all(u8::is_ascii_whitespace) { b"null" } else { &self.body };
		let mut deserializer = serde_json::Deserializer::from_slice(bytes);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| DecodeError::Response { source, status: self.status })
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The default client keeps a cookie store so session cookies set by the API (including
/// the refresh endpoint) accompany later calls.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client with a cookie store enabled.
	pub fn new() -> Result<Self, GatewayConfigError> {
		let client = ReqwestClient::builder()
			.cookie_store(true)
			.build()
			.map_err(GatewayConfigError::http_client_build)?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				Method::Get => reqwest::Method::GET,
				Method::Post => reqwest::Method::POST,
				Method::Put => reqwest::Method::PUT,
				Method::Patch => reqwest::Method::PATCH,
				Method::Delete => reqwest::Method::DELETE,
			};
			let mut builder = client.request(method, request.url);

			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}
			if let Some(timeout) = request.timeout {
				builder = builder.timeout(timeout);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(ApiResponse { status, body })
		})
	}
}
