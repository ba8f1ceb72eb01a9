//! Kuzzle HTTP API calls used while configuring the provider.
//!
//! [`KuzzleApi`] binds an endpoint to an injected [`KuzzleHttpClient`]. Each operation is a
//! single request with no retry and no caching:
//!
//! - [`KuzzleApi::check_connection`] probes `GET /`,
//! - [`KuzzleApi::check_token`] verifies an API key with `POST /_checkToken`,
//! - [`KuzzleApi::try_authenticate`] exchanges a username/password pair for a JWT with
//!   `POST /_login/local`.

mod connection;
mod login;
mod token;

pub use login::*;
pub use token::*;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, FormatError},
	http::{HttpRequest, HttpResponse, KuzzleHttpClient},
};

/// Route verifying API keys and JWTs.
pub const CHECK_TOKEN_ROUTE: &str = "_checkToken";
/// Route authenticating with the `local` strategy.
pub const LOGIN_LOCAL_ROUTE: &str = "_login/local";

/// Kuzzle endpoint bound to an HTTP transport.
pub struct KuzzleApi<C>
where
	C: ?Sized + KuzzleHttpClient,
{
	/// Kuzzle endpoint URL.
	pub endpoint: Url,
	/// Transport used for every request.
	pub http_client: Arc<C>,
}
impl<C> KuzzleApi<C>
where
	C: ?Sized + KuzzleHttpClient,
{
	/// Binds `endpoint` to `http_client`.
	pub fn new(endpoint: Url, http_client: impl Into<Arc<C>>) -> Self {
		Self { endpoint, http_client: http_client.into() }
	}

	/// Resolves `route` below the endpoint, keeping any base path.
	pub fn route_url(&self, route: &'static str) -> Result<Url> {
		let base = self.endpoint.as_str().trim_end_matches('/');

		Url::parse(&format!("{base}/{route}"))
			.map_err(|source| ConfigError::InvalidRoute { route, source }.into())
	}

	async fn post_json<B>(&self, route: &'static str, body: &B) -> Result<HttpResponse>
	where
		B: ?Sized + Serialize,
	{
		let url = self.route_url(route)?;
		let body =
			serde_json::to_vec(body).map_err(|source| FormatError::Request { route, source })?;

		Ok(self.http_client.execute(HttpRequest::post_json(url, body)).await?)
	}
}
impl<C> Clone for KuzzleApi<C>
where
	C: ?Sized + KuzzleHttpClient,
{
	fn clone(&self) -> Self {
		Self { endpoint: self.endpoint.clone(), http_client: self.http_client.clone() }
	}
}
impl<C> Debug for KuzzleApi<C>
where
	C: ?Sized + KuzzleHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("KuzzleApi").field("endpoint", &self.endpoint.as_str()).finish()
	}
}

/// Standard Kuzzle response envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
	result: T,
}

fn decode_result<T>(route: &'static str, body: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let deserializer = &mut serde_json::Deserializer::from_slice(body);
	let envelope: Envelope<T> = serde_path_to_error::deserialize(deserializer)
		.map_err(|source| FormatError::Response { route, source })?;

	Ok(envelope.result)
}
