//! Typed client for the `/support` endpoints.

// self
use crate::{
	_prelude::*,
	gateway::Gateway,
	http::{HttpTransport, RequestOptions},
	support::{FaqItem, KnowledgeBaseArticle, NewTicket, SupportTicket, TicketUpdate},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

const TICKETS_PATH: &str = "/support/tickets";
const FAQ_PATH: &str = "/support/faq";
const KNOWLEDGE_BASE_PATH: &str = "/support/kb";

#[cfg(feature = "reqwest")]
/// Support service specialized for the crate's default reqwest transport.
pub type ReqwestSupportService = SupportService<ReqwestHttpClient>;

/// Support tickets, FAQs, and knowledge-base articles, fetched through an authenticated
/// [`Gateway`].
///
/// Every method is a single gateway call, so each one inherits the refresh-and-retry behavior.
pub struct SupportService<C>
where
	C: ?Sized + HttpTransport,
{
	gateway: Gateway<C>,
}
impl<C> SupportService<C>
where
	C: ?Sized + HttpTransport,
{
	/// Wraps an existing gateway.
	pub fn new(gateway: Gateway<C>) -> Self {
		Self { gateway }
	}

	/// Returns the underlying gateway.
	pub fn gateway(&self) -> &Gateway<C> {
		&self.gateway
	}

	/// Opens a ticket from a contact form submission.
	///
	/// The form is validated locally first; an invalid form never reaches the network.
	pub async fn create_ticket(&self, ticket: &NewTicket) -> Result<SupportTicket> {
		ticket.validate()?;

		self.gateway.post(TICKETS_PATH, ticket).await
	}

	/// Lists the current user's tickets.
	pub async fn user_tickets(&self) -> Result<Vec<SupportTicket>> {
		self.gateway.get(TICKETS_PATH).await
	}

	/// Fetches a single ticket.
	pub async fn ticket(&self, id: &str) -> Result<SupportTicket> {
		self.gateway.get(&ticket_path(id)?).await
	}

	/// Applies a partial update to a ticket and returns the updated record.
	pub async fn update_ticket(&self, id: &str, update: &TicketUpdate) -> Result<SupportTicket> {
		self.gateway.patch(&ticket_path(id)?, update).await
	}

	/// Lists FAQs, optionally restricted to one category.
	pub async fn faqs(&self, category: Option<&str>) -> Result<Vec<FaqItem>> {
		let options = RequestOptions::default().query_opt("category", category);

		self.gateway.get_with(FAQ_PATH, options).await
	}

	/// Lists knowledge-base articles, optionally filtered by category and tag.
	pub async fn knowledge_base_articles(
		&self,
		category: Option<&str>,
		tag: Option<&str>,
	) -> Result<Vec<KnowledgeBaseArticle>> {
		let options =
			RequestOptions::default().query_opt("category", category).query_opt("tag", tag);

		self.gateway.get_with(KNOWLEDGE_BASE_PATH, options).await
	}

	/// Fetches a single knowledge-base article.
	pub async fn knowledge_base_article(&self, id: &str) -> Result<KnowledgeBaseArticle> {
		self.gateway.get(&format!("{KNOWLEDGE_BASE_PATH}/{}", path_segment(id)?)).await
	}
}
impl<C> Clone for SupportService<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { gateway: self.gateway.clone() }
	}
}
impl<C> Debug for SupportService<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SupportService").field("gateway", &self.gateway).finish()
	}
}

fn ticket_path(id: &str) -> Result<String> {
	Ok(format!("{TICKETS_PATH}/{}", path_segment(id)?))
}

/// Percent-encodes `id` so it stays one path segment; dot segments would be normalized away.
fn path_segment(id: &str) -> Result<String> {
	if id.is_empty() || id == "." || id == ".." {
		return Err(Error::InvalidId { id: id.to_owned() });
	}

	Ok(urlencoding::encode(id).into_owned())
}
