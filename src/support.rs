//! Customer-support API surface built on the gateway: tickets, FAQs, and the knowledge base.

pub mod filter;
pub mod model;
#[cfg(any(test, feature = "test"))] pub mod seed;
pub mod service;

pub use filter::{
	RELATED_ARTICLE_LIMIT, faqs_by_category, filter_tickets, related_articles, search_articles,
};
pub use model::{
	ContactFormError, FaqItem, KnowledgeBaseArticle, NewTicket, SupportTicket, TicketStatus,
	TicketUpdate,
};
#[cfg(feature = "reqwest")] pub use service::ReqwestSupportService;
pub use service::SupportService;
