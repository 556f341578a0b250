//! The authenticated request gateway.
//!
//! Every call goes through [`Gateway::execute`], which drives a small per-call state machine:
//!
//! ```text
//! Initial --2xx--> done
//!    |  \--other failure--> failed
//!    401 (not yet retried)
//!    v
//! Refreshing --refresh failed--> failed (slot cleared, login redirect)
//!    |
//!    v
//! Retrying --2xx--> done
//!          \--any failure, including 401--> failed
//! ```
//!
//! The retried flag on [`ApiRequest`] is the loop guard: a request that has already been
//! retried never enters `Refreshing` again.

pub mod refresh;

mod verbs;

pub use refresh::{RefreshMetrics, RefreshSnapshot};

// self
use crate::{
	_prelude::*,
	config::GatewayConfig,
	envelope,
	http::{ApiRequest, ApiResponse, HttpTransport},
	navigator::{LogNavigator, LoginNavigator},
	obs::{self, CallOutcome, CallPhase, CallSpan},
	store::TokenStore,
	token::{BearerToken, StoredToken},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Gateway specialized for the crate's default reqwest transport.
pub type ReqwestGateway = Gateway<ReqwestHttpClient>;

/// Where a logical call currently stands.
#[derive(Clone, Debug, PartialEq, Eq)]
enum CallState {
	/// Sending the caller's request for the first time.
	Initial,
	/// First attempt came back 401; `rejected` is the token it carried.
	Refreshing { rejected: Option<BearerToken> },
	/// Sending the request again with the refreshed token.
	Retrying,
}

/// Wraps an HTTP transport so every call is token-authenticated and a 401 triggers one
/// transparent refresh-and-retry.
///
/// The gateway owns the transport, the token slot, and the login navigator behind `Arc`s, so
/// clones are cheap and share the same session. Refreshes are serialized per gateway: calls
/// that fail with the same stale token while a refresh is in flight reuse its result instead
/// of issuing their own.
pub struct Gateway<C>
where
	C: ?Sized + HttpTransport,
{
	/// HTTP transport used for every outbound request.
	pub http_client: Arc<C>,
	/// Token slot holding the current bearer credential.
	pub store: Arc<dyn TokenStore>,
	/// Receives the login location when a session ends.
	pub navigator: Arc<dyn LoginNavigator>,
	/// Endpoint and redirect configuration.
	pub config: GatewayConfig,
	/// Shared counters for refresh outcomes.
	pub refresh_metrics: Arc<RefreshMetrics>,
	refresh_guard: Arc<AsyncMutex<()>>,
}
impl<C> Gateway<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a gateway over the caller-provided transport.
	pub fn with_http_client(
		config: GatewayConfig,
		store: Arc<dyn TokenStore>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			store,
			navigator: Arc::new(LogNavigator),
			config,
			refresh_metrics: Default::default(),
			refresh_guard: Default::default(),
		}
	}

	/// Replaces the login navigator.
	pub fn with_navigator(mut self, navigator: Arc<dyn LoginNavigator>) -> Self {
		self.navigator = navigator;

		self
	}

	/// Stores a token obtained by an external login flow.
	pub async fn login(&self, token: impl Into<BearerToken>) -> Result<()> {
		self.store.save(StoredToken::new(token)).await?;

		Ok(())
	}

	/// Clears the token slot, ending the session locally.
	pub async fn logout(&self) -> Result<()> {
		self.store.clear().await?;

		Ok(())
	}

	/// Returns the token currently held by the slot.
	pub async fn current_token(&self) -> Result<Option<BearerToken>> {
		Ok(self.store.load().await?.map(|stored| stored.token))
	}

	/// Executes `request` and returns the unwrapped envelope payload.
	pub async fn send<T>(&self, request: ApiRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let response = self.execute(request).await?;

		Ok(envelope::unwrap(&response)?)
	}

	/// Executes `request` through the authentication state machine and returns the raw 2xx
	/// response.
	///
	/// Transport errors and non-401 HTTP errors propagate unchanged. A 401 on the first attempt
	/// triggers a refresh; if that fails the slot is cleared, the navigator is sent to the login
	/// location, and the refresh error is returned. A 401 on the retry is returned as is.
	pub async fn execute(&self, mut request: ApiRequest) -> Result<ApiResponse> {
		let span = CallSpan::new(CallPhase::Request, "execute");

		span.instrument(async move {
			let mut state = CallState::Initial;

			loop {
				state = match state {
					CallState::Initial => {
						request.set_authorization(self.current_token().await?);

						match self.dispatch(CallPhase::Request, &request).await {
							Ok(response) => return Ok(response),
							Err(e) if e.is_unauthorized() && !request.retried => {
								let rejected = request.authorization().cloned();

								CallState::Refreshing { rejected }
							},
							Err(e) => return Err(e),
						}
					},
					CallState::Refreshing { rejected } => {
						request.retried = true;

						let token = self.refresh_session(rejected.as_ref()).await?;

						request.set_authorization(Some(token));

						CallState::Retrying
					},
					CallState::Retrying => return self.dispatch(CallPhase::Retry, &request).await,
				};
			}
		})
		.await
	}

	/// Sends one attempt of `request` as-is and classifies the response.
	async fn dispatch(&self, phase: CallPhase, request: &ApiRequest) -> Result<ApiResponse> {
		obs::record_call_outcome(phase, CallOutcome::Attempt);

		let result = async {
			let prepared = request.prepare(&self.config)?;
			let response = self.http_client.execute(prepared).await?;

			if response.is_success() {
				Ok(response)
			} else {
				Err(Error::Http { status: response.status, body: response.text() })
			}
		}
		.await;

		match &result {
			Ok(_) => obs::record_call_outcome(phase, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(phase, CallOutcome::Failure),
		}

		result
	}
}
#[cfg(feature = "reqwest")]
impl Gateway<ReqwestHttpClient> {
	/// Creates a gateway backed by a fresh cookie-keeping reqwest client.
	pub fn new(config: GatewayConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
		Ok(Self::with_http_client(config, store, ReqwestHttpClient::new()?))
	}
}
impl<C> Clone for Gateway<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			store: self.store.clone(),
			navigator: self.navigator.clone(),
			config: self.config.clone(),
			refresh_metrics: self.refresh_metrics.clone(),
			refresh_guard: self.refresh_guard.clone(),
		}
	}
}
impl<C> Debug for Gateway<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Gateway")
			.field("base_url", &self.config.base_url.as_str())
			.field("refresh_path", &self.config.refresh_path)
			.field("login_location", &self.config.login_location)
			.finish()
	}
}
