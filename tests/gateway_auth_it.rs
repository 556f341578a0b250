#![cfg(feature = "reqwest")]

// std
use std::time::Duration as StdDuration;
// crates.io
use httpmock::prelude::*;
// self
use support_gateway::{
	_preludet::*,
	config::GatewayConfig,
	error::AuthRefreshError,
	gateway::Gateway,
	store::{FileTokenStore, TokenStore},
	token::StoredToken,
};

async fn seed(test: &TestGateway, token: &str) {
	test.store.save(StoredToken::new(token)).await.expect("Seeding the token slot should succeed.");
}

fn stored(test: &TestGateway) -> Option<String> {
	test.store.snapshot().map(|stored| stored.token.expose().to_owned())
}

#[tokio::test]
async fn bearer_token_is_attached_and_envelope_unwrapped() {
	let server = MockServer::start_async().await;
	let test = build_reqwest_test_gateway(&server.url("/api"));

	seed(&test, "T1").await;

	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/support/tickets").header("authorization", "Bearer T1");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"status":"success","data":[{"id":"t1"}]}"#);
		})
		.await;
	let tickets: Vec<serde_json::Value> =
		test.gateway.get("/support/tickets").await.expect("Authenticated GET should succeed.");

	mock.assert_async().await;

	assert_eq!(tickets, vec![serde_json::json!({ "id": "t1" })]);
	assert!(test.navigator.visits().is_empty());
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_retried() {
	let server = MockServer::start_async().await;
	let test = build_reqwest_test_gateway(&server.url("/api"));

	seed(&test, "T1").await;

	let stale = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/support/tickets").header("authorization", "Bearer T1");
			then.status(401).body(r#"{"message":"Token expired"}"#);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh").header("authorization", "Bearer T1");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"token":"T2"}"#);
		})
		.await;
	let fresh = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/support/tickets").header("authorization", "Bearer T2");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"status":"success","data":[{"id":"t1"}]}"#);
		})
		.await;
	let tickets: Vec<serde_json::Value> =
		test.gateway.get("/support/tickets").await.expect("Retried GET should succeed.");

	stale.assert_calls_async(1).await;
	refresh.assert_calls_async(1).await;
	fresh.assert_calls_async(1).await;

	assert_eq!(tickets.len(), 1);
	assert_eq!(stored(&test), Some("T2".to_owned()));
	assert_eq!(test.gateway.refresh_metrics.successes(), 1);
}

#[tokio::test]
async fn second_401_after_refresh_is_returned() {
	let server = MockServer::start_async().await;
	let test = build_reqwest_test_gateway(&server.url("/api"));

	seed(&test, "T1").await;

	let protected = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/support/tickets");
			then.status(401).body("still unauthorized");
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"token":"T2"}"#);
		})
		.await;
	let err = test
		.gateway
		.get::<serde_json::Value>("/support/tickets")
		.await
		.expect_err("A 401 on the retry should surface.");

	protected.assert_calls_async(2).await;
	refresh.assert_calls_async(1).await;

	assert_eq!(err.status(), Some(401));
	assert!(err.is_unauthorized());
	assert!(test.navigator.visits().is_empty());
}

#[tokio::test]
async fn rejected_refresh_ends_the_session() {
	let server = MockServer::start_async().await;
	let test = build_reqwest_test_gateway(&server.url("/api"));

	seed(&test, "T1").await;

	let protected = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/support/tickets");
			then.status(401);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(401).body(r#"{"message":"Refresh token revoked"}"#);
		})
		.await;
	let err = test
		.gateway
		.get::<serde_json::Value>("/support/tickets")
		.await
		.expect_err("Refresh rejection should fail the call.");

	protected.assert_calls_async(1).await;
	refresh.assert_calls_async(1).await;

	assert!(matches!(err, Error::AuthRefresh(AuthRefreshError::Rejected { status: 401, .. })));
	assert_eq!(stored(&test), None);
	assert_eq!(test.navigator.visits(), vec!["/login".to_owned()]);
}

#[tokio::test]
async fn concurrent_401s_share_one_refresh() {
	let server = MockServer::start_async().await;
	let test = build_reqwest_test_gateway(&server.url("/api"));

	seed(&test, "T1").await;

	// Every first attempt is in flight with T1 before any of them is answered.
	let stale = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/support/faq").header("authorization", "Bearer T1");
			then.status(401).delay(StdDuration::from_millis(300));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200)
				.header("content-type", "application/json")
				.delay(StdDuration::from_millis(200))
				.body(r#"{"token":"T2"}"#);
		})
		.await;
	let fresh = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/support/faq").header("authorization", "Bearer T2");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"status":"success","data":[]}"#);
		})
		.await;
	let gateway = &test.gateway;
	let (a, b, c) = tokio::join!(
		gateway.get::<Vec<serde_json::Value>>("/support/faq"),
		gateway.get::<Vec<serde_json::Value>>("/support/faq"),
		gateway.get::<Vec<serde_json::Value>>("/support/faq"),
	);

	for result in [a, b, c] {
		assert!(result.expect("Every concurrent call should succeed.").is_empty());
	}

	stale.assert_calls_async(3).await;
	refresh.assert_calls_async(1).await;
	fresh.assert_calls_async(3).await;

	assert_eq!(gateway.refresh_metrics.attempts(), 1);
	assert_eq!(gateway.refresh_metrics.coalesced(), 2);
	assert_eq!(stored(&test), Some("T2".to_owned()));
}

#[tokio::test]
async fn server_errors_do_not_trigger_refresh() {
	let server = MockServer::start_async().await;
	let test = build_reqwest_test_gateway(&server.url("/api"));

	seed(&test, "T1").await;

	let failing = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/api/support/tickets/t1");
			then.status(503).body("maintenance");
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200).body(r#"{"token":"unused"}"#);
		})
		.await;
	let err = test
		.gateway
		.delete::<()>("/support/tickets/t1")
		.await
		.expect_err("A 503 should propagate.");

	failing.assert_calls_async(1).await;
	refresh.assert_calls_async(0).await;

	assert!(matches!(err, Error::Http { status: 503, ref body } if body == "maintenance"));
	assert_eq!(stored(&test), Some("T1".to_owned()));
}

#[tokio::test]
async fn file_backed_session_survives_a_new_gateway() {
	let server = MockServer::start_async().await;
	let path = std::env::temp_dir().join(format!(
		"support-gateway-it-{}-{}.json",
		std::process::id(),
		OffsetDateTime::now_utc().unix_timestamp_nanos()
	));
	let config = GatewayConfig::builder()
		.base_url(server.url("/api"))
		.build()
		.expect("Configuration should be valid.");
	let first: Arc<dyn TokenStore> =
		Arc::new(FileTokenStore::open(&path).expect("File store should open."));
	let gateway: ReqwestTestGateway =
		Gateway::with_http_client(config.clone(), first, test_reqwest_http_client());

	gateway.login("persisted").await.expect("Login should persist the token.");

	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/support/kb").header("authorization", "Bearer persisted");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"status":"success","data":[]}"#);
		})
		.await;
	let reopened: Arc<dyn TokenStore> =
		Arc::new(FileTokenStore::open(&path).expect("File store should reopen."));
	let gateway: ReqwestTestGateway =
		Gateway::with_http_client(config, reopened, test_reqwest_http_client());
	let articles: Vec<serde_json::Value> =
		gateway.get("/support/kb").await.expect("Reopened session should authenticate.");

	mock.assert_async().await;

	assert!(articles.is_empty());

	let _ = std::fs::remove_file(&path);
}
