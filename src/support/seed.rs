//! Fixture data for tests and demos.

// self
use crate::support::{FaqItem, KnowledgeBaseArticle, SupportTicket, TicketStatus};

/// Two tickets owned by `user-1`: one open, one resolved.
pub fn tickets() -> Vec<SupportTicket> {
	vec![
		SupportTicket {
			id: Some("ticket-1".into()),
			user_id: Some("user-1".into()),
			name: "Test User".into(),
			email: "test@example.com".into(),
			subject: "Cannot connect LinkedIn account".into(),
			message: "The connection dialog closes without linking my profile.".into(),
			status: Some(TicketStatus::Open),
			category: Some("Technical".into()),
			created_at: Some("2024-01-15T10:00:00Z".into()),
			updated_at: Some("2024-01-15T10:00:00Z".into()),
		},
		SupportTicket {
			id: Some("ticket-2".into()),
			user_id: Some("user-1".into()),
			name: "Test User".into(),
			email: "test@example.com".into(),
			subject: "Invoice shows the wrong plan".into(),
			message: "I upgraded last week but the invoice still lists the starter plan.".into(),
			status: Some(TicketStatus::Resolved),
			category: Some("Billing".into()),
			created_at: Some("2024-01-10T09:30:00Z".into()),
			updated_at: Some("2024-01-12T16:45:00Z".into()),
		},
	]
}

/// Three FAQs across the `Getting Started`, `Campaigns`, and `Billing` categories.
pub fn faqs() -> Vec<FaqItem> {
	vec![
		FaqItem {
			id: "faq-1".into(),
			question: "How do I connect my LinkedIn account?".into(),
			answer: "Open Settings, choose Integrations, and follow the LinkedIn prompt.".into(),
			category: "Getting Started".into(),
			order: 1,
		},
		FaqItem {
			id: "faq-2".into(),
			question: "How many campaigns can I run at once?".into(),
			answer: "Every plan supports unlimited concurrent campaigns.".into(),
			category: "Campaigns".into(),
			order: 1,
		},
		FaqItem {
			id: "faq-3".into(),
			question: "Can I change my plan mid-cycle?".into(),
			answer: "Yes. Upgrades apply immediately and are prorated.".into(),
			category: "Billing".into(),
			order: 1,
		},
	]
}

/// Three knowledge-base articles; `kb-1` and `kb-3` share the `linkedin` tag.
pub fn knowledge_base_articles() -> Vec<KnowledgeBaseArticle> {
	vec![
		KnowledgeBaseArticle {
			id: "kb-1".into(),
			title: "Getting started guide".into(),
			content: "A walkthrough for beginners setting up their workspace.".into(),
			category: "Getting Started".into(),
			tags: vec!["setup".into(), "linkedin".into()],
			created_at: "2024-01-01T00:00:00Z".into(),
			updated_at: "2024-01-05T00:00:00Z".into(),
		},
		KnowledgeBaseArticle {
			id: "kb-2".into(),
			title: "Writing outreach that converts".into(),
			content: "Structure each campaign around a single clear ask.".into(),
			category: "Campaigns".into(),
			tags: vec!["messaging".into()],
			created_at: "2024-01-02T00:00:00Z".into(),
			updated_at: "2024-01-02T00:00:00Z".into(),
		},
		KnowledgeBaseArticle {
			id: "kb-3".into(),
			title: "Troubleshooting account connections".into(),
			content: "Reconnect the integration after changing your password.".into(),
			category: "Technical".into(),
			tags: vec!["LinkedIn".into(), "linkedin".into()],
			created_at: "2024-01-03T00:00:00Z".into(),
			updated_at: "2024-01-04T00:00:00Z".into(),
		},
	]
}
