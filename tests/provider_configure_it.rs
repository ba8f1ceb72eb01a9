// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use kuzzle_provider::{
	diag::Severity,
	http::ReqwestHttpClient,
	provider::KuzzleProvider,
	settings::{ENDPOINT_ENV, PASSWORD_ENV, ProviderSettings, RawProviderSettings, USERNAME_ENV},
	url::Url,
};

fn provider() -> KuzzleProvider<ReqwestHttpClient> {
	KuzzleProvider::new().expect("Default provider should build.")
}

fn settings(server: &MockServer) -> ProviderSettings {
	ProviderSettings::new(Url::parse(&server.base_url()).expect("Mock URL should parse."))
		.expect("Mock endpoint should validate.")
}

async fn reachable(server: &MockServer) -> httpmock::Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(GET).path("/");
			then.status(200).header("content-type", "application/json").body(r#"{"result":"ok"}"#);
		})
		.await
}

#[tokio::test]
async fn anonymous_configuration_warns_once() {
	let server = MockServer::start_async().await;
	let root = reachable(&server).await;
	let provider = provider();
	let (config, diags) = provider.configure(&settings(&server)).await.into_parts();
	let config = config.expect("Anonymous configuration should be produced.");

	assert!(config.is_anonymous());
	assert_eq!(config.authorization_header(), None);
	assert_eq!(diags.len(), 1);
	assert!(diags.iter().all(|d| d.severity == Severity::Warning));

	root.assert_async().await;
}

#[tokio::test]
async fn login_configuration_uses_the_jwt() {
	let server = MockServer::start_async().await;
	let root = reachable(&server).await;
	let login = server
		.mock_async(|when, then| {
			when.method(POST).path("/_login/local");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"result":{"jwt":"mySuperAuthenticationToken"}}"#);
		})
		.await;
	let provider = provider();
	let (config, diags) =
		provider.configure(&settings(&server).with_login("admin", "password")).await.into_parts();

	assert_eq!(
		config.expect("Login should configure the provider.").token.expose(),
		"mySuperAuthenticationToken"
	);
	assert!(diags.is_empty());
	assert_eq!(
		provider.config().and_then(|c| c.authorization_header()),
		Some("Bearer mySuperAuthenticationToken".into())
	);

	root.assert_async().await;
	login.assert_async().await;
}

#[tokio::test]
async fn api_key_configuration_keeps_the_key() {
	let server = MockServer::start_async().await;
	let _root = reachable(&server).await;
	let check = server
		.mock_async(|when, then| {
			when.method(POST).path("/_checkToken").json_body(json!({ "jwt": "abc123" }));
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"result":{"valid":true}}"#);
		})
		.await;
	let (config, diags) =
		provider().configure(&settings(&server).with_api_key("abc123")).await.into_parts();

	assert_eq!(config.expect("API key should configure the provider.").token.expose(), "abc123");
	assert!(diags.is_empty());

	check.assert_async().await;
}

#[tokio::test]
async fn unhealthy_server_aborts_before_authentication() {
	let server = MockServer::start_async().await;
	let root = server
		.mock_async(|when, then| {
			when.method(GET).path("/");
			then.status(503);
		})
		.await;
	let login = server
		.mock_async(|when, then| {
			when.method(POST).path("/_login/local");
			then.status(200).body(r#"{"result":{"jwt":"unused"}}"#);
		})
		.await;
	let (config, diags) = provider()
		.configure(&settings(&server).with_login("admin", "password"))
		.await
		.into_parts();

	assert!(config.is_none());
	assert_eq!(diags.len(), 1);
	assert!(diags.has_errors());

	root.assert_async().await;
	login.assert_calls_async(0).await;
}

#[tokio::test]
async fn host_payload_with_env_fallback_configures_the_provider() {
	let server = MockServer::start_async().await;
	let _root = reachable(&server).await;
	let login = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/_login/local")
				.json_body(json!({ "username": "env-admin", "password": "env-password" }));
			then.status(200).body(r#"{"result":{"jwt":"env-jwt"}}"#);
		})
		.await;
	let base_url = server.base_url();
	let raw = RawProviderSettings::from_value(json!({ "endpoint": null, "api_key": "" }))
		.expect("Host payload should decode.")
		.with_env_fallback(|key| match key {
			ENDPOINT_ENV => Some(base_url.clone()),
			USERNAME_ENV => Some("env-admin".into()),
			PASSWORD_ENV => Some("env-password".into()),
			_ => None,
		});
	let outcome = provider().configure_raw(raw).await;

	assert_eq!(
		outcome.config.expect("Env credentials should configure the provider.").token.expose(),
		"env-jwt"
	);
	assert!(outcome.diagnostics.is_empty());

	login.assert_async().await;
}
