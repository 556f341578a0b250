//! Local list helpers for already-fetched support data.

// self
use crate::{
	_prelude::*,
	support::{FaqItem, KnowledgeBaseArticle, SupportTicket, TicketStatus},
};

/// Maximum number of entries [`related_articles`] returns.
pub const RELATED_ARTICLE_LIMIT: usize = 3;

/// Case-insensitive substring match over title, content, and tags.
///
/// A blank query keeps every article. Otherwise the query is matched as typed, surrounding
/// whitespace included.
pub fn search_articles<'a>(
	articles: &'a [KnowledgeBaseArticle],
	query: &str,
) -> Vec<&'a KnowledgeBaseArticle> {
	if query.trim().is_empty() {
		return articles.iter().collect();
	}

	let needle = query.to_lowercase();

	articles
		.iter()
		.filter(|article| {
			article.title.to_lowercase().contains(&needle)
				|| article.content.to_lowercase().contains(&needle)
				|| article.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
		})
		.collect()
}

/// Up to [`RELATED_ARTICLE_LIMIT`] articles sharing a category or at least one tag with
/// `article`, excluding itself, in input order.
pub fn related_articles<'a>(
	article: &KnowledgeBaseArticle,
	articles: &'a [KnowledgeBaseArticle],
) -> Vec<&'a KnowledgeBaseArticle> {
	articles
		.iter()
		.filter(|other| other.id != article.id)
		.filter(|other| {
			other.category == article.category
				|| other.tags.iter().any(|tag| article.tags.contains(tag))
		})
		.take(RELATED_ARTICLE_LIMIT)
		.collect()
}

/// Tickets with the given status; `None` keeps all of them.
pub fn filter_tickets(
	tickets: &[SupportTicket],
	status: Option<TicketStatus>,
) -> Vec<&SupportTicket> {
	tickets.iter().filter(|ticket| status.is_none() || ticket.status == status).collect()
}

/// Groups FAQs by category, each group sorted by display order.
pub fn faqs_by_category(faqs: &[FaqItem]) -> BTreeMap<&str, Vec<&FaqItem>> {
	let mut groups = BTreeMap::<&str, Vec<&FaqItem>>::new();

	for faq in faqs {
		groups.entry(faq.category.as_str()).or_default().push(faq);
	}
	for group in groups.values_mut() {
		group.sort_by_key(|faq| faq.order);
	}

	groups
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::support::seed;

	#[test]
	fn search_matches_title_content_and_tags_case_insensitively() {
		let articles = seed::knowledge_base_articles();
		let ids = |hits: Vec<&KnowledgeBaseArticle>| -> Vec<String> {
			hits.into_iter().map(|a| a.id.clone()).collect()
		};

		assert_eq!(ids(search_articles(&articles, "CAMPAIGN")), vec!["kb-2"]);
		assert_eq!(ids(search_articles(&articles, "linkedin")), vec!["kb-1", "kb-3"]);
		assert_eq!(ids(search_articles(&articles, "Beginners")), vec!["kb-1"]);
		assert_eq!(search_articles(&articles, "   ").len(), articles.len());
		assert!(search_articles(&articles, "refund").is_empty());
	}

	#[test]
	fn related_articles_share_category_or_tag_and_exclude_self() {
		let mut articles = seed::knowledge_base_articles();
		let related = related_articles(&articles[0], &articles);

		assert_eq!(related.len(), 1);
		assert_eq!(related[0].id, "kb-3");
		assert!(related_articles(&articles[1], &articles).is_empty());

		articles[2].category = "Campaigns".into();

		let related = related_articles(&articles[1], &articles);

		assert_eq!(related.len(), 1);
		assert_eq!(related[0].id, "kb-3");
	}

	#[test]
	fn search_keeps_surrounding_whitespace_in_the_query() {
		let articles = seed::knowledge_base_articles();

		assert!(search_articles(&articles, " linkedin ").is_empty());
		assert_eq!(search_articles(&articles, " campaign").len(), 1);
	}

	#[test]
	fn related_articles_are_capped() {
		let mut articles = seed::knowledge_base_articles();
		let template = articles[1].clone();

		for n in 0..4 {
			articles.push(KnowledgeBaseArticle { id: format!("kb-extra-{n}"), ..template.clone() });
		}

		let related = related_articles(&articles[1], &articles);
		let ids: Vec<_> = related.iter().map(|article| article.id.as_str()).collect();

		assert_eq!(ids, vec!["kb-extra-0", "kb-extra-1", "kb-extra-2"]);
	}

	#[test]
	fn filter_tickets_by_status() {
		let tickets = seed::tickets();

		assert_eq!(filter_tickets(&tickets, None).len(), 2);

		let open = filter_tickets(&tickets, Some(TicketStatus::Open));

		assert_eq!(open.len(), 1);
		assert_eq!(open[0].id.as_deref(), Some("ticket-1"));
		assert!(filter_tickets(&tickets, Some(TicketStatus::Closed)).is_empty());
	}

	#[test]
	fn faqs_group_and_sort() {
		let mut faqs = seed::faqs();

		faqs.push(FaqItem {
			id: "faq-0".into(),
			question: "Where do I start?".into(),
			answer: "Here.".into(),
			category: "Getting Started".into(),
			order: 0,
		});

		let groups = faqs_by_category(&faqs);
		let getting_started: Vec<_> =
			groups["Getting Started"].iter().map(|faq| faq.id.as_str()).collect();

		assert_eq!(groups.len(), 3);
		assert_eq!(getting_started, vec!["faq-0", "faq-1"]);
	}
}
