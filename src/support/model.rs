//! Pass-through DTOs for the support API.
//!
//! Fields mirror the backend's camelCase JSON. Timestamps stay as strings: the gateway neither
//! interprets nor rewrites them.

// self
use crate::_prelude::*;

/// Lifecycle of a support ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
	/// Awaiting a first response.
	Open,
	/// Being worked on.
	InProgress,
	/// Answered; awaiting confirmation.
	Resolved,
	/// Done.
	Closed,
}
impl TicketStatus {
	/// Returns the wire label.
	pub const fn as_str(self) -> &'static str {
		match self {
			TicketStatus::Open => "open",
			TicketStatus::InProgress => "in_progress",
			TicketStatus::Resolved => "resolved",
			TicketStatus::Closed => "closed",
		}
	}
}
impl Display for TicketStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Support ticket as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
	/// Server-assigned identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Owning user.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,
	/// Requester name.
	pub name: String,
	/// Requester email.
	pub email: String,
	/// Short summary.
	pub subject: String,
	/// Full description.
	pub message: String,
	/// Current status.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<TicketStatus>,
	/// Free-form category label.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
	/// Creation timestamp, as sent by the server.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_at: Option<String>,
	/// Last update timestamp, as sent by the server.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<String>,
}

/// Contact form payload used to open a ticket.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
	/// Requester name.
	pub name: String,
	/// Requester email.
	pub email: String,
	/// Short summary.
	pub subject: String,
	/// Full description.
	pub message: String,
	/// Optional category label.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
}
impl NewTicket {
	/// Checks that every required field is filled in and the email looks like one.
	pub fn validate(&self) -> Result<(), ContactFormError> {
		for (field, value) in [
			("name", &self.name),
			("email", &self.email),
			("subject", &self.subject),
			("message", &self.message),
		] {
			if value.trim().is_empty() {
				return Err(ContactFormError::MissingField { field });
			}
		}

		match self.email.trim().split_once('@') {
			Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
			_ => Err(ContactFormError::InvalidEmail { email: self.email.clone() }),
		}
	}
}

/// Partial update applied to an existing ticket.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketUpdate {
	/// New status.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<TicketStatus>,
	/// New subject.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub subject: Option<String>,
	/// New message body.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	/// New category.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
}

/// Frequently asked question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqItem {
	/// Identifier.
	pub id: String,
	/// Question text.
	pub question: String,
	/// Answer text.
	pub answer: String,
	/// Category label.
	pub category: String,
	/// Display position within the list.
	pub order: u32,
}

/// Knowledge-base article.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBaseArticle {
	/// Identifier.
	pub id: String,
	/// Title.
	pub title: String,
	/// Body text.
	pub content: String,
	/// Category label.
	pub category: String,
	/// Free-form tags.
	#[serde(default)]
	pub tags: Vec<String>,
	/// Creation timestamp, as sent by the server.
	pub created_at: String,
	/// Last update timestamp, as sent by the server.
	pub updated_at: String,
}

/// Contact form validation failures.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ContactFormError {
	/// A required field is blank.
	#[error("The {field} field is required.")]
	MissingField {
		/// Name of the blank field.
		field: &'static str,
	},
	/// Email address has no `local@domain` shape.
	#[error("`{email}` is not a valid email address.")]
	InvalidEmail {
		/// Offending input.
		email: String,
	},
}
