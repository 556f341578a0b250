//! Where users go when their session cannot be refreshed.
//!
//! A browser client performs a hard navigation to the login route. Library consumers decide
//! what that means for them by implementing [`LoginNavigator`].

// self
use crate::{_prelude::*, obs};

/// Receives the login location once the gateway has ended a session.
pub trait LoginNavigator
where
	Self: Send + Sync,
{
	/// Sends the user to `location`.
	fn navigate(&self, location: &str);
}

/// Default navigator: records the redirect through the observability layer only.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNavigator;
impl LoginNavigator for LogNavigator {
	fn navigate(&self, location: &str) {
		obs::record_login_redirect(location);
	}
}

/// Navigator that remembers every redirect so the host can act on it later.
#[derive(Clone, Debug, Default)]
pub struct RecordingNavigator(Arc<Mutex<Vec<String>>>);
impl RecordingNavigator {
	/// Returns all locations visited so far.
	pub fn visits(&self) -> Vec<String> {
		self.0.lock().clone()
	}

	/// Drains the history and returns the most recent redirect.
	pub fn take_last(&self) -> Option<String> {
		let mut visits = self.0.lock();
		let last = visits.pop();

		visits.clear();

		last
	}
}
impl LoginNavigator for RecordingNavigator {
	fn navigate(&self, location: &str) {
		obs::record_login_redirect(location);
		self.0.lock().push(location.to_owned());
	}
}
