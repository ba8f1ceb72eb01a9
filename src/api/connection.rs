//! Reachability probe.

// self
use crate::{
	_prelude::*,
	api::KuzzleApi,
	error::ConnectionError,
	http::{HttpRequest, KuzzleHttpClient},
	obs::{self, StepKind},
};

/// Statuses meaning a proxy answered for a Kuzzle node that is down.
const UNAVAILABLE_STATUSES: [u16; 2] = [502, 503];

impl<C> KuzzleApi<C>
where
	C: ?Sized + KuzzleHttpClient,
{
	/// Sends `GET` to the endpoint root.
	///
	/// Fails when the request cannot be sent or when the answer is `502`/`503`. Every other
	/// status, `403` and `404` included, proves the server is reachable.
	pub async fn check_connection(&self) -> Result<()> {
		obs::observe(StepKind::CheckConnection, "check_connection", async move {
			let response = self.http_client.execute(HttpRequest::get(self.endpoint.clone())).await?;

			if UNAVAILABLE_STATUSES.contains(&response.status) {
				return Err(ConnectionError::Unavailable { status: response.status }.into());
			}

			Ok(())
		})
		.await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::{Reply, ScriptedHttpClient},
		http::HttpMethod,
	};

	async fn probe(reply: Reply) -> Result<()> {
		let client = ScriptedHttpClient::default().on(HttpMethod::Get, "/", reply);
		let api = KuzzleApi::new(
			Url::parse("http://kuzzle:7512").expect("Fixture endpoint should parse."),
			client,
		);

		api.check_connection().await
	}

	#[tokio::test]
	async fn any_status_but_bad_gateway_and_unavailable_is_reachable() {
		for status in [200, 201, 301, 401, 403, 404, 500, 501, 504] {
			assert!(probe(Reply::status(status, "")).await.is_ok(), "HTTP {status} is reachable.");
		}
	}

	#[tokio::test]
	async fn unhealthy_statuses_fail() {
		for status in UNAVAILABLE_STATUSES {
			let err = probe(Reply::status(status, "")).await.expect_err("Probe should fail.");

			assert!(matches!(
				err,
				Error::Connection(ConnectionError::Unavailable { status: s }) if s == status
			));
		}
	}

	#[tokio::test]
	async fn transport_failure_is_a_connection_error() {
		let err = probe(Reply::TransportFailure).await.expect_err("Probe should fail.");

		assert!(matches!(err, Error::Connection(ConnectionError::Transport(_))));
	}
}
