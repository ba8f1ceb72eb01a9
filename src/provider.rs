//! The Kuzzle provider: schema, settings validation, and the configuration pass.
//!
//! [`KuzzleProvider`] is what the plugin host talks to. It owns the injected HTTP client
//! and keeps the [`ProviderConfig`] produced by the last configuration pass so resources
//! can read the endpoint and token they must use.

mod configure;

pub use configure::*;

// self
use crate::{
	_prelude::*,
	auth::Secret,
	diag::{Diagnostic, Diagnostics},
	http::KuzzleHttpClient,
	schema::{self, ProviderSchema},
	settings::RawProviderSettings,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Provider specialized for the crate's default reqwest transport.
pub type ReqwestProvider = KuzzleProvider<ReqwestHttpClient>;

/// Endpoint and token handed to resources once the provider is configured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
	/// Kuzzle endpoint URL.
	pub endpoint: Url,
	/// API key or JWT; empty for anonymous access.
	pub token: Secret,
}
impl ProviderConfig {
	/// Creates a configuration carrying `token`.
	pub fn new(endpoint: Url, token: Secret) -> Self {
		Self { endpoint, token }
	}

	/// Creates a configuration without a token.
	pub fn anonymous(endpoint: Url) -> Self {
		Self::new(endpoint, Secret::default())
	}

	/// Returns `true` when requests will carry no token.
	pub fn is_anonymous(&self) -> bool {
		self.token.is_empty()
	}

	/// Value of the `Authorization` header for authenticated requests.
	pub fn authorization_header(&self) -> Option<String> {
		(!self.is_anonymous()).then(|| format!("Bearer {}", self.token.expose()))
	}
}

/// Kuzzle provider bound to an HTTP transport.
pub struct KuzzleProvider<C>
where
	C: ?Sized + KuzzleHttpClient,
{
	/// HTTP client used for every outbound Kuzzle request.
	pub http_client: Arc<C>,
	configured: RwLock<Option<Arc<ProviderConfig>>>,
}
impl<C> KuzzleProvider<C>
where
	C: ?Sized + KuzzleHttpClient,
{
	/// Creates a provider that reuses the caller-provided transport.
	pub fn with_http_client(http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), configured: Default::default() }
	}

	/// Declares the provider block and the (empty) resource set.
	pub fn schema(&self) -> ProviderSchema {
		schema::provider_schema()
	}

	/// Validates host-supplied settings without contacting Kuzzle.
	pub fn validate(&self, raw: &RawProviderSettings) -> Diagnostics {
		match raw.validate() {
			Ok(_) => Diagnostics::default(),
			Err(e) => {
				let mut diagnostic =
					Diagnostic::error("Invalid provider configuration", e.to_string());

				if let Some(attribute) = e.attribute() {
					diagnostic = diagnostic.with_attribute(attribute);
				}

				[diagnostic].into_iter().collect()
			},
		}
	}

	/// Configuration produced by the last pass, if it succeeded.
	pub fn config(&self) -> Option<Arc<ProviderConfig>> {
		self.configured.read().clone()
	}
}
#[cfg(feature = "reqwest")]
impl KuzzleProvider<ReqwestHttpClient> {
	/// Creates a provider backed by the default reqwest transport.
	pub fn new() -> Result<Self> {
		Ok(Self::with_http_client(ReqwestHttpClient::new()?))
	}
}
impl<C> Debug for KuzzleProvider<C>
where
	C: ?Sized + KuzzleHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("KuzzleProvider").field("configured", &self.configured.read()).finish()
	}
}
