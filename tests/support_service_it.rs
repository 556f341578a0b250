#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use support_gateway::{
	_preludet::*,
	store::TokenStore,
	support::{
		NewTicket, ReqwestSupportService, SupportService, TicketStatus, TicketUpdate,
		related_articles, search_articles, seed,
	},
	token::StoredToken,
};

async fn service(server: &MockServer) -> ReqwestSupportService {
	let test = build_reqwest_test_gateway(&server.url("/api"));

	test.store.save(StoredToken::new("T1")).await.expect("Seeding the token slot should succeed.");

	SupportService::new(test.gateway)
}

fn envelope(data: impl Serialize) -> String {
	serde_json::json!({ "status": "success", "data": data }).to_string()
}

#[tokio::test]
async fn tickets_round_trip_through_the_api() {
	let server = MockServer::start_async().await;
	let service = service(&server).await;
	let tickets = seed::tickets();
	let mut closed = tickets[0].clone();

	closed.status = Some(TicketStatus::Closed);

	let create = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/support/tickets")
				.header("authorization", "Bearer T1")
				.json_body(serde_json::json!({
					"name": "Test User",
					"email": "test@example.com",
					"subject": "Cannot connect LinkedIn account",
					"message": "The connection dialog closes without linking my profile.",
					"category": "Technical"
				}));
			then.status(201)
				.header("content-type", "application/json")
				.body(envelope(&tickets[0]));
		})
		.await;
	let list = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/support/tickets");
			then.status(200).header("content-type", "application/json").body(envelope(&tickets));
		})
		.await;
	let update = server
		.mock_async(|when, then| {
			when.method(PATCH)
				.path("/api/support/tickets/ticket-1")
				.json_body(serde_json::json!({ "status": "closed" }));
			then.status(200).header("content-type", "application/json").body(envelope(&closed));
		})
		.await;
	let form = NewTicket {
		name: "Test User".into(),
		email: "test@example.com".into(),
		subject: "Cannot connect LinkedIn account".into(),
		message: "The connection dialog closes without linking my profile.".into(),
		category: Some("Technical".into()),
	};
	let created = service.create_ticket(&form).await.expect("Ticket should be created.");
	let listed = service.user_tickets().await.expect("Tickets should be listed.");
	let patched = service
		.update_ticket(
			"ticket-1",
			&TicketUpdate { status: Some(TicketStatus::Closed), ..Default::default() },
		)
		.await
		.expect("Ticket should be updated.");

	create.assert_async().await;
	list.assert_async().await;
	update.assert_async().await;

	assert_eq!(created.id.as_deref(), Some("ticket-1"));
	assert_eq!(listed, tickets);
	assert_eq!(patched.status, Some(TicketStatus::Closed));
}

#[tokio::test]
async fn faq_and_knowledge_base_filters_are_sent_as_query() {
	let server = MockServer::start_async().await;
	let service = service(&server).await;
	let articles = seed::knowledge_base_articles();
	let faq = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/support/faq").query_param("category", "Billing");
			then.status(200)
				.header("content-type", "application/json")
				.body(envelope(&seed::faqs()[2..]));
		})
		.await;
	let kb = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/support/kb")
				.query_param("category", "Technical")
				.query_param("tag", "linkedin");
			then.status(200)
				.header("content-type", "application/json")
				.body(envelope(&articles[2..]));
		})
		.await;
	let article = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/support/kb/kb-1");
			then.status(200).header("content-type", "application/json").body(envelope(&articles[0]));
		})
		.await;
	let faqs = service.faqs(Some("Billing")).await.expect("FAQs should load.");
	let filtered = service
		.knowledge_base_articles(Some("Technical"), Some("linkedin"))
		.await
		.expect("Articles should load.");
	let first = service.knowledge_base_article("kb-1").await.expect("Article should load.");

	faq.assert_async().await;
	kb.assert_async().await;
	article.assert_async().await;

	assert_eq!(faqs.len(), 1);
	assert_eq!(faqs[0].id, "faq-3");
	assert_eq!(filtered, articles[2..].to_vec());
	assert_eq!(related_articles(&first, &articles)[0].id, "kb-3");
	assert_eq!(search_articles(&filtered, "password").len(), 1);
}
