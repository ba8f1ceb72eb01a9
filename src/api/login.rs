//! Username/password authentication through `/_login/local`.

// crates.io
use serde::{Deserializer, de::DeserializeOwned};
// self
use crate::{
	_prelude::*,
	api::{self, KuzzleApi, LOGIN_LOCAL_ROUTE},
	auth::Secret,
	http::KuzzleHttpClient,
	obs::{self, StepKind},
};

#[derive(Serialize)]
struct LoginRequest<'a> {
	username: &'a str,
	password: &'a str,
}

/// `result` member of a `/_login/local` response.
///
/// Only `jwt` is required. The informational members decode to `None` when Kuzzle sends
/// them with an unexpected type.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResult {
	/// Issued JWT.
	pub jwt: Secret,
	/// Kuzzle user identifier.
	#[serde(default, rename = "_id", deserialize_with = "lenient")]
	pub kuid: Option<String>,
	/// Expiration timestamp, in milliseconds since the epoch.
	#[serde(default, rename = "expiresAt", deserialize_with = "lenient")]
	pub expires_at: Option<i64>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
	D: Deserializer<'de>,
	T: DeserializeOwned,
{
	let value = serde_json::Value::deserialize(deserializer)?;

	Ok(serde_json::from_value(value).ok())
}

impl<C> KuzzleApi<C>
where
	C: ?Sized + KuzzleHttpClient,
{
	/// Authenticates with the `local` strategy and returns the issued JWT.
	///
	/// Any status other than `200` is an [`Error::Authentication`]; a `200` whose body lacks a
	/// string `result.jwt` is a format error.
	pub async fn try_authenticate(&self, username: &str, password: &Secret) -> Result<LoginResult> {
		obs::observe(StepKind::Login, "try_authenticate", async move {
			let request = LoginRequest { username, password: password.expose() };
			let response = self.post_json(LOGIN_LOCAL_ROUTE, &request).await?;

			if !response.is_ok() {
				return Err(Error::Authentication { status: response.status });
			}

			api::decode_result(LOGIN_LOCAL_ROUTE, &response.body)
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
		error::{ConnectionError, FormatError},
		http::HttpMethod,
	};

	async fn login(reply: Reply) -> (Result<LoginResult>, ScriptedHttpClient) {
		let client = ScriptedHttpClient::default().on(HttpMethod::Post, "/_login/local", reply);
		let api = KuzzleApi::new(
			Url::parse("http://kuzzle:7512").expect("Fixture endpoint should parse."),
			client.clone(),
		);

		(api.try_authenticate("admin", &Secret::new("password")).await, client)
	}

	#[tokio::test]
	async fn success_returns_jwt_and_sends_credentials() {
		let (result, client) = login(Reply::status(
			200,
			r#"{"result":{"_id":"admin","jwt":"mySuperAuthenticationToken","expiresAt":1700000000000}}"#,
		))
		.await;
		let result = result.expect("Login should succeed.");

		assert_eq!(result.jwt.expose(), "mySuperAuthenticationToken");
		assert_eq!(result.kuid.as_deref(), Some("admin"));
		assert_eq!(result.expires_at, Some(1_700_000_000_000));

		let requests = client.requests();
		let body: serde_json::Value = serde_json::from_slice(
			requests[0].body.as_deref().expect("Request should carry a body."),
		)
		.expect("Request body should be JSON.");

		assert_eq!(body, serde_json::json!({ "username": "admin", "password": "password" }));
	}

	#[tokio::test]
	async fn oddly_typed_informational_members_are_ignored() {
		let (result, _) =
			login(Reply::status(200, r#"{"result":{"jwt":"t","_id":42,"expiresAt":1.7e12}}"#))
				.await;
		let result = result.expect("A string jwt should be enough to log in.");

		assert_eq!(result.jwt.expose(), "t");
		assert_eq!(result.kuid, None);
		assert_eq!(result.expires_at, None);
	}

	#[tokio::test]
	async fn unauthorized_is_an_authentication_error() {
		let (result, _) = login(Reply::status(401, "")).await;

		assert!(matches!(result, Err(Error::Authentication { status: 401 })));
	}

	#[tokio::test]
	async fn missing_or_non_string_jwt_is_a_format_error() {
		for body in ["Not a JSON response", r#"{"result":{}}"#, r#"{"result":{"jwt":42}}"#] {
			let (result, _) = login(Reply::status(200, body)).await;

			assert!(
				matches!(result, Err(Error::Format(FormatError::Response { .. }))),
				"Body {body:?} should be rejected."
			);
		}
	}

	#[tokio::test]
	async fn transport_failure_is_a_connection_error() {
		let (result, _) = login(Reply::TransportFailure).await;

		assert!(matches!(result, Err(Error::Connection(ConnectionError::Transport(_)))));
	}
}
