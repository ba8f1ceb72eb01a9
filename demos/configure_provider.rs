//! Demonstrates a provider configuration pass against a mocked Kuzzle server, reading the
//! credentials from the host payload with the `KUZZLE_*` environment fallback.

// crates.io
use color_eyre::{Result, eyre::eyre};
use httpmock::prelude::*;
use serde_json::json;
// self
use kuzzle_provider::{provider::ReqwestProvider, settings::RawProviderSettings};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let root_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/");
			then.status(200).body(r#"{"result":"ok"}"#);
		})
		.await;
	let check_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/_checkToken").json_body(json!({ "jwt": "demo-api-key" }));
			then.status(200).body(r#"{"result":{"valid":true}}"#);
		})
		.await;
	let provider = ReqwestProvider::new()?;
	let raw = RawProviderSettings::from_value(json!({
		"endpoint": server.base_url(),
		"api_key": "demo-api-key",
	}))?
	.with_process_env();

	for diagnostic in &provider.validate(&raw) {
		println!("{diagnostic}");
	}

	let (config, diagnostics) = provider.configure_raw(raw).await.into_parts();

	for diagnostic in &diagnostics {
		println!("{diagnostic}");
	}

	let config = config.ok_or_else(|| eyre!("Provider configuration failed."))?;

	println!(
		"Configured against {} ({}).",
		config.endpoint,
		if config.is_anonymous() { "anonymous" } else { "authenticated" }
	);

	root_mock.assert_async().await;
	check_mock.assert_async().await;

	Ok(())
}
