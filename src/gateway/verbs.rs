//! Typed verb helpers layered over [`Gateway::send`].

// self
use crate::{
	_prelude::*,
	gateway::Gateway,
	http::{ApiRequest, HttpTransport, Method, RequestOptions},
};

impl<C> Gateway<C>
where
	C: ?Sized + HttpTransport,
{
	/// `GET path`, returning the unwrapped payload.
	pub async fn get<T>(&self, path: &str) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.get_with(path, RequestOptions::default()).await
	}

	/// `GET path` with per-call options.
	pub async fn get_with<T>(&self, path: &str, options: RequestOptions) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.send(ApiRequest::new(Method::Get, path).with_options(options)).await
	}

	/// `POST path` with a JSON body.
	pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		self.post_with(path, Some(body), RequestOptions::default()).await
	}

	/// `POST path` with an optional body and per-call options.
	pub async fn post_with<T, B>(
		&self,
		path: &str,
		body: Option<&B>,
		options: RequestOptions,
	) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		self.send(build(Method::Post, path, body, options)?).await
	}

	/// `PUT path` with a JSON body.
	pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		self.put_with(path, Some(body), RequestOptions::default()).await
	}

	/// `PUT path` with an optional body and per-call options.
	pub async fn put_with<T, B>(
		&self,
		path: &str,
		body: Option<&B>,
		options: RequestOptions,
	) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		self.send(build(Method::Put, path, body, options)?).await
	}

	/// `PATCH path` with a JSON body.
	pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		self.patch_with(path, Some(body), RequestOptions::default()).await
	}

	/// `PATCH path` with an optional body and per-call options.
	pub async fn patch_with<T, B>(
		&self,
		path: &str,
		body: Option<&B>,
		options: RequestOptions,
	) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		self.send(build(Method::Patch, path, body, options)?).await
	}

	/// `DELETE path`, returning the unwrapped payload (use `()` for empty responses).
	pub async fn delete<T>(&self, path: &str) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.delete_with(path, RequestOptions::default()).await
	}

	/// `DELETE path` with per-call options.
	pub async fn delete_with<T>(&self, path: &str, options: RequestOptions) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.send(ApiRequest::new(Method::Delete, path).with_options(options)).await
	}
}

fn build<B>(
	method: Method,
	path: &str,
	body: Option<&B>,
	options: RequestOptions,
) -> Result<ApiRequest>
where
	B: ?Sized + Serialize,
{
	let request = ApiRequest::new(method, path).with_options(options);

	match body {
		Some(body) => Ok(request.with_json(body)?),
		None => Ok(request),
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{sync::Arc, time::Duration as StdDuration};
	// self
	use crate::{
		_preludet::ScriptedTransport,
		config::GatewayConfig,
		gateway::Gateway,
		http::{Method, RequestOptions},
		store::{MemoryTokenStore, TokenStore},
	};

	fn gateway(transport: ScriptedTransport) -> Gateway<ScriptedTransport> {
		let config = GatewayConfig::builder()
			.base_url("https://support.example.com/api")
			.timeout(StdDuration::from_secs(30))
			.build()
			.expect("Test configuration should be valid.");
		let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::default());

		Gateway::with_http_client(config, store, transport)
	}

	#[tokio::test]
	async fn verbs_map_to_methods_and_bodies() {
		let ok = r#"{"status":"ok","data":null}"#;
		let transport = ScriptedTransport::default()
			.respond(200, ok)
			.respond(200, ok)
			.respond(200, ok)
			.respond(200, ok)
			.respond(204, "");
		let gateway = gateway(transport.clone());
		let body = serde_json::json!({ "status": "closed" });

		gateway.get::<()>("/a").await.expect("GET should succeed.");
		gateway.post::<(), _>("/b", &body).await.expect("POST should succeed.");
		gateway.put::<(), _>("/c", &body).await.expect("PUT should succeed.");
		gateway.patch::<(), _>("/d", &body).await.expect("PATCH should succeed.");
		gateway.delete::<()>("/e").await.expect("DELETE should succeed.");

		let requests = transport.requests();
		let methods: Vec<_> = requests.iter().map(|r| r.method).collect();

		assert_eq!(
			methods,
			vec![Method::Get, Method::Post, Method::Put, Method::Patch, Method::Delete]
		);
		assert!(requests[0].body.is_none());
		assert_eq!(requests[3].body.as_deref(), Some(&br#"{"status":"closed"}"#[..]));
		assert!(requests.iter().all(|r| r.timeout == Some(StdDuration::from_secs(30))));
	}

	#[tokio::test]
	async fn options_override_timeout_and_add_headers() {
		let transport = ScriptedTransport::default().respond(200, r#"{"status":"ok","data":1}"#);
		let gateway = gateway(transport.clone());
		let options = RequestOptions::default()
			.header("x-request-id", "abc")
			.timeout(StdDuration::from_secs(2));
		let value: u8 = gateway
			.post_with::<_, ()>("/support/tickets", None, options)
			.await
			.expect("POST should succeed.");
		let requests = transport.requests();
		let request = &requests[0];

		assert_eq!(value, 1);
		assert!(request.body.is_none());
		assert_eq!(request.header("X-Request-Id"), Some("abc"));
		assert_eq!(request.timeout, Some(StdDuration::from_secs(2)));
	}
}
