//! Transport primitives for the Kuzzle HTTP API.
//!
//! The module exposes [`KuzzleHttpClient`], the only dependency the provider has on an
//! HTTP stack. The configurator receives an implementation (typically behind `Arc<T>`)
//! and hands it to every helper call, so tests can swap in a scripted client instead of
//! reaching the network. Requests and responses are plain data ([`HttpRequest`],
//! [`HttpResponse`]) so implementations stay independent from any client crate.

// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::CONTENT_TYPE;
// self
#[cfg(feature = "reqwest")] use crate::error::ConfigError;
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`KuzzleHttpClient::execute`].
pub type HttpFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports able to reach a Kuzzle server.
///
/// Implementations must be `Send + Sync + 'static` so a single client can be shared by the
/// provider and every resource it configures. A transport failure (DNS, refused connection,
/// TLS) is reported as [`TransportError`]; any HTTP status, including 4xx and 5xx, is a
/// successful [`HttpResponse`] and left to the caller to interpret.
pub trait KuzzleHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and buffers the full response body.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, HttpResponse>;
}

/// HTTP verbs used by the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
}
impl HttpMethod {
	/// Returns the canonical method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outbound request description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
	/// Request method.
	pub method: HttpMethod,
	/// Absolute target URL.
	pub url: Url,
	/// JSON body, sent with `content-type: application/json` when present.
	pub body: Option<Vec<u8>>,
}
impl HttpRequest {
	/// Builds a body-less `GET` request.
	pub fn get(url: Url) -> Self {
		Self { method: HttpMethod::Get, url, body: None }
	}

	/// Builds a `POST` request carrying a JSON body.
	pub fn post_json(url: Url, body: Vec<u8>) -> Self {
		Self { method: HttpMethod::Post, url, body: Some(body) }
	}
}

/// Buffered response returned by a transport.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Creates a response from a status and body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns `true` for `200 OK`.
	pub fn is_ok(&self) -> bool {
		self.status == 200
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	const USER_AGENT: &'static str =
		concat!("terraform-provider-kuzzle/", env!("CARGO_PKG_VERSION"));

	/// Builds the default client used by the provider.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.user_agent(Self::USER_AGENT)
			.build()
			.map_err(ConfigError::http_client_build)?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl KuzzleHttpClient for ReqwestHttpClient {
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, HttpResponse> {
		Box::pin(async move {
			let HttpRequest { method, url, body } = request;
			let mut builder = match method {
				HttpMethod::Get => self.0.get(url),
				HttpMethod::Post => self.0.post(url),
			};

			if let Some(body) = body {
				builder = builder.header(CONTENT_TYPE, "application/json").body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(HttpResponse { status, body })
		})
	}
}
