//! The configuration pass.
//!
//! A pass probes the endpoint, resolves which credential to trust (see
//! [`Credentials::resolve`]), verifies it with a single request, and yields either a
//! [`ProviderConfig`] or error diagnostics. Only an unreachable endpoint stops the pass
//! before credentials are looked at; no step is retried.

// self
use crate::{
	_prelude::*,
	api::KuzzleApi,
	auth::{Credentials, Secret},
	diag::Diagnostics,
	http::KuzzleHttpClient,
	obs::{self, StepKind},
	provider::{KuzzleProvider, ProviderConfig},
	settings::{ProviderSettings, RawProviderSettings},
};

/// Result of a configuration pass: a configuration, diagnostics, or both.
///
/// `config` is `None` exactly when `diagnostics` holds at least one error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigureOutcome {
	/// Configuration handed to resources.
	pub config: Option<Arc<ProviderConfig>>,
	/// Messages for the end user, in emission order.
	pub diagnostics: Diagnostics,
}
impl ConfigureOutcome {
	/// Splits the outcome into its configuration and diagnostics.
	pub fn into_parts(self) -> (Option<Arc<ProviderConfig>>, Diagnostics) {
		(self.config, self.diagnostics)
	}

	fn failed(diagnostics: Diagnostics) -> Self {
		Self { config: None, diagnostics }
	}
}

impl<C> KuzzleProvider<C>
where
	C: ?Sized + KuzzleHttpClient,
{
	/// Validates host-supplied settings, then runs [`KuzzleProvider::configure`].
	///
	/// Invalid settings produce error diagnostics without any network call.
	pub async fn configure_raw(&self, raw: RawProviderSettings) -> ConfigureOutcome {
		match raw.validate() {
			Ok(settings) => self.configure(&settings).await,
			Err(_) => {
				*self.configured.write() = None;

				ConfigureOutcome::failed(self.validate(&raw))
			},
		}
	}

	/// Runs a configuration pass and records its configuration for [`KuzzleProvider::config`].
	pub async fn configure(&self, settings: &ProviderSettings) -> ConfigureOutcome {
		let outcome =
			obs::trace_step(StepKind::Configure, "configure", self.run_pass(settings), |outcome| {
				outcome.diagnostics.has_errors()
			})
			.await;

		*self.configured.write() = outcome.config.clone();

		outcome
	}

	async fn run_pass(&self, settings: &ProviderSettings) -> ConfigureOutcome {
		let api = KuzzleApi::<C>::new(settings.endpoint.clone(), self.http_client.clone());
		let mut diagnostics = Diagnostics::default();

		if let Err(e) = api.check_connection().await {
			diagnostics.error(format!("Error connecting to Kuzzle: {e}"), "");

			return ConfigureOutcome::failed(diagnostics);
		}

		let resolution = Credentials::resolve(settings);

		if resolution.ignored_login {
			diagnostics.warning(
				"Kuzzle username/password ignored",
				"Both an API key and a username/password pair are configured. The API key takes precedence.",
			);
		}
		if resolution.incomplete_login {
			diagnostics.warning(
				"Kuzzle username/password pair is incomplete",
				"Both username and password must be set to authenticate with the local strategy.",
			);
		}

		#[cfg(feature = "tracing")]
		tracing::debug!(method = resolution.credentials.as_str(), "resolved Kuzzle credentials");

		let token = match resolution.credentials {
			Credentials::ApiKey(api_key) => match api.check_token(api_key.expose()).await {
				Ok(_) => api_key,
				Err(e) => {
					diagnostics.error("Kuzzle provided API key is invalid", e.to_string());

					return ConfigureOutcome::failed(diagnostics);
				},
			},
			Credentials::Login { username, password } =>
				match api.try_authenticate(&username, &password).await {
					Ok(login) => login.jwt,
					Err(e) => {
						diagnostics.error("Kuzzle authentication failed", e.to_string());

						return ConfigureOutcome::failed(diagnostics);
					},
				},
			Credentials::Anonymous => {
				diagnostics.warning(
					"Kuzzle authentication credentials not provided",
					"No authentication credentials provided. Using anonymous authentication...",
				);

				Secret::default()
			},
		};
		let config = ProviderConfig::new(settings.endpoint.clone(), token);

		ConfigureOutcome { config: Some(Arc::new(config)), diagnostics }
	}
}
