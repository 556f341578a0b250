//! Session refresh with a singleflight guard and terminal teardown.
//!
//! A 401 on a first attempt lands in [`Gateway::refresh_session`]. Refreshes are serialized
//! behind one async mutex per gateway; once a caller holds it, it re-reads the token slot. If
//! the slot already carries a different token than the one that was rejected, a concurrent
//! call has refreshed in the meantime and the token is reused. Otherwise the caller issues
//! `POST <refresh_path>` itself. Any refresh failure clears the slot and sends the navigator
//! to the login location.

mod metrics;

pub use metrics::{RefreshMetrics, RefreshSnapshot};

// self
use crate::{
	_prelude::*,
	error::AuthRefreshError,
	gateway::Gateway,
	http::{ApiRequest, HttpTransport, Method},
	obs::{self, CallOutcome, CallPhase, CallSpan},
	token::{BearerToken, StoredToken},
};

#[derive(Debug, Deserialize)]
struct RefreshResponse {
	#[serde(default)]
	token: Option<String>,
}

impl<C> Gateway<C>
where
	C: ?Sized + HttpTransport,
{
	/// Forces a session refresh using the token currently in the slot.
	///
	/// Goes through the same singleflight guard as the automatic path, so it coalesces with
	/// refreshes already in flight. A failure ends the session exactly like a failed automatic
	/// refresh does.
	pub async fn refresh_token(&self) -> Result<BearerToken> {
		let current = self.current_token().await?;

		self.refresh_session(current.as_ref()).await
	}

	/// Obtains a token to replace `rejected`, refreshing at most once per stale token.
	pub(crate) async fn refresh_session(
		&self,
		rejected: Option<&BearerToken>,
	) -> Result<BearerToken> {
		let span = CallSpan::new(CallPhase::Refresh, "refresh_session");

		span.instrument(async move {
			let _singleflight = self.refresh_guard.lock().await;
			let current = match self.store.load().await {
				Ok(stored) => stored.map(|stored| stored.token),
				Err(e) => return Err(self.end_session(AuthRefreshError::Storage(e)).await),
			};

			match (current, rejected) {
				(Some(current), rejected) if Some(&current) != rejected => {
					self.refresh_metrics.record_coalesced();
					obs::record_refresh_coalesced();

					Ok(current)
				},
				// The slot was emptied after this call was rejected: the session already ended.
				(None, Some(_)) => Err(AuthRefreshError::SessionCleared.into()),
				(current, _) => {
					self.refresh_metrics.record_attempt();

					match self.request_refresh(current).await {
						Ok(token) => {
							self.refresh_metrics.record_success();

							Ok(token)
						},
						Err(e) => Err(self.end_session(e).await),
					}
				},
			}
		})
		.await
	}

	/// Calls the refresh endpoint once and persists the returned token.
	async fn request_refresh(
		&self,
		current: Option<BearerToken>,
	) -> Result<BearerToken, AuthRefreshError> {
		obs::record_call_outcome(CallPhase::Refresh, CallOutcome::Attempt);

		let result = async move {
			let mut request = ApiRequest::new(Method::Post, self.config.refresh_path.clone());

			request.set_authorization(current);

			let prepared = request.prepare(&self.config).map_err(AuthRefreshError::Config)?;
			let response =
				self.http_client.execute(prepared).await.map_err(AuthRefreshError::Transport)?;

			if !response.is_success() {
				return Err(AuthRefreshError::Rejected {
					status: response.status,
					body: response.text(),
				});
			}

			let token = response
				.decode::<RefreshResponse>()
				.map_err(AuthRefreshError::Decode)?
				.token
				.filter(|token| !token.trim().is_empty())
				.map(BearerToken::new)
				.ok_or(AuthRefreshError::MissingToken)?;

			self.store
				.save(StoredToken::new(token.clone()))
				.await
				.map_err(AuthRefreshError::Storage)?;

			Ok(token)
		}
		.await;

		match &result {
			Ok(_) => obs::record_call_outcome(CallPhase::Refresh, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(CallPhase::Refresh, CallOutcome::Failure),
		}

		result
	}

	/// Clears the slot, redirects to login, and returns `cause` as the call's error.
	///
	/// A slot that refuses to clear is reported through the observability layer and counted;
	/// `cause` stays the returned error.
	async fn end_session(&self, cause: AuthRefreshError) -> Error {
		self.refresh_metrics.record_failure();

		if let Err(e) = self.store.clear().await {
			self.refresh_metrics.record_clear_failure();
			obs::record_session_clear_failure(&e);
		}

		self.navigator.navigate(&self.config.login_location);

		cause.into()
	}
}
