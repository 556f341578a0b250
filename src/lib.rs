//! Authenticated REST gateway for customer-support dashboards.
//!
//! Every call carries the stored bearer token. A 401 triggers one transparent refresh and one
//! retry, and response envelopes are unwrapped into typed tickets, FAQs, and knowledge-base
//! articles.

#![deny(clippy::all, missing_docs)]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub mod config;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod http;
pub mod navigator;
pub mod obs;
pub mod store;
pub mod support;
pub mod token;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// self
	use crate::{
		error::TransportError,
		http::{ApiResponse, HttpRequest, HttpTransport, TransportFuture},
	};
	#[cfg(feature = "reqwest")]
	use crate::{
		config::GatewayConfig,
		gateway::Gateway,
		http::ReqwestHttpClient,
		navigator::RecordingNavigator,
		store::{MemoryTokenStore, TokenStore},
	};

	/// Gateway type alias used by reqwest-backed integration tests.
	#[cfg(feature = "reqwest")]
	pub type ReqwestTestGateway = Gateway<ReqwestHttpClient>;

	/// Reqwest-backed gateway plus handles to the collaborators tests inspect.
	#[cfg(feature = "reqwest")]
	#[derive(Debug)]
	pub struct TestGateway {
		/// Gateway under test.
		pub gateway: ReqwestTestGateway,
		/// In-memory token slot shared with the gateway.
		pub store: Arc<MemoryTokenStore>,
		/// Navigator recording login redirects.
		pub navigator: Arc<RecordingNavigator>,
	}

	/// Builds a cookie-keeping reqwest HTTP client that accepts the self-signed certificates
	/// produced by `httpmock` during tests.
	#[cfg(feature = "reqwest")]
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.cookie_store(true)
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a [`Gateway`] rooted at `base_url`, backed by an in-memory token slot and a
	/// recording navigator.
	#[cfg(feature = "reqwest")]
	pub fn build_reqwest_test_gateway(base_url: &str) -> TestGateway {
		let config = GatewayConfig::builder()
			.base_url(base_url)
			.build()
			.expect("Test gateway configuration should be valid.");
		let store = Arc::new(MemoryTokenStore::default());
		let navigator = Arc::new(RecordingNavigator::default());
		let slot: Arc<dyn TokenStore> = store.clone();
		let gateway = Gateway::with_http_client(config, slot, test_reqwest_http_client())
			.with_navigator(navigator.clone());

		TestGateway { gateway, store, navigator }
	}

	/// Transport double that replays scripted responses and records every request it sees.
	#[derive(Clone, Debug, Default)]
	pub struct ScriptedTransport {
		responses: Arc<Mutex<VecDeque<Result<ApiResponse, String>>>>,
		requests: Arc<Mutex<Vec<HttpRequest>>>,
	}
	impl ScriptedTransport {
		/// Queues a response with the given status and JSON body.
		pub fn respond(self, status: u16, body: &str) -> Self {
			self.responses.lock().push_back(Ok(ApiResponse::new(status, body.as_bytes().to_vec())));

			self
		}

		/// Queues a transport-level failure.
		pub fn fail(self, message: &str) -> Self {
			self.responses.lock().push_back(Err(message.to_owned()));

			self
		}

		/// Returns every request dispatched so far.
		pub fn requests(&self) -> Vec<HttpRequest> {
			self.requests.lock().clone()
		}

		/// Returns the `Authorization` header of each dispatched request, in order.
		pub fn authorizations(&self) -> Vec<Option<String>> {
			self.requests.lock().iter().map(|r| r.header("authorization").map(str::to_owned)).collect()
		}
	}
	impl HttpTransport for ScriptedTransport {
		fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
			self.requests.lock().push(request);

			let next = self.responses.lock().pop_front();

			Box::pin(async move {
				match next {
					Some(Ok(response)) => Ok(response),
					Some(Err(message)) =>
						Err(TransportError::network(std::io::Error::other(message))),
					None => Err(TransportError::network(std::io::Error::other(
						"Scripted transport has no response queued.",
					))),
				}
			})
		}
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
