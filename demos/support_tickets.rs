//! Walks through an expired session against a local mock API: the first call is rejected, the
//! gateway refreshes the token once, and the retried call returns the user's tickets.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use support_gateway::{
	config::GatewayConfig,
	gateway::Gateway,
	http::ReqwestHttpClient,
	reqwest::Client,
	store::{MemoryTokenStore, TokenStore},
	support::{SupportService, TicketStatus, filter_tickets},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let expired = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/support/tickets").header("authorization", "Bearer stale");
			then.status(401).body("{\"message\":\"Token expired\"}");
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"token\":\"fresh\"}");
		})
		.await;
	let tickets = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/support/tickets").header("authorization", "Bearer fresh");
			then.status(200).header("content-type", "application/json").body(
				"{\"status\":\"success\",\"data\":[{\"id\":\"ticket-1\",\"name\":\"Demo User\",\"email\":\"demo@example.com\",\"subject\":\"Cannot log in\",\"message\":\"Help!\",\"status\":\"open\"}]}",
			);
		})
		.await;
	let config = GatewayConfig::builder().base_url(server.url("/api")).build()?;
	let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::default());
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.cookie_store(true)
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let gateway: Gateway<ReqwestHttpClient> =
		Gateway::with_http_client(config, store, http_client);

	gateway.login("stale").await?;

	let support = SupportService::new(gateway.clone());
	let all = support.user_tickets().await?;
	let open = filter_tickets(&all, Some(TicketStatus::Open));

	expired.assert_calls_async(1).await;
	refresh.assert_calls_async(1).await;
	tickets.assert_calls_async(1).await;

	println!("Fetched {} ticket(s), {} open.", all.len(), open.len());
	println!(
		"Refresh attempts: {}, current token rotated: {}.",
		gateway.refresh_metrics.attempts(),
		gateway.current_token().await?.is_some_and(|token| token.expose() == "fresh"),
	);

	Ok(())
}
