//! Provider settings: host-supplied values, environment fallback, and validation.
//!
//! The host hands the provider a loosely typed attribute map ([`RawProviderSettings`]).
//! Attributes the configuration leaves unset fall back to the `KUZZLE_*` environment
//! variables, then [`RawProviderSettings::validate`] produces the immutable
//! [`ProviderSettings`] consumed by the configurator.

// self
use crate::{_prelude::*, auth::Secret};

/// Environment fallback for `endpoint`.
pub const ENDPOINT_ENV: &str = "KUZZLE_ENDPOINT";
/// Environment fallback for `api_key`.
pub const API_KEY_ENV: &str = "KUZZLE_API_KEY";
/// Environment fallback for `username`.
pub const USERNAME_ENV: &str = "KUZZLE_USERNAME";
/// Environment fallback for `password`.
pub const PASSWORD_ENV: &str = "KUZZLE_PASSWORD";

/// Errors raised while decoding or validating provider settings.
#[derive(Debug, ThisError)]
pub enum SettingsError {
	/// Host payload does not match the provider schema.
	#[error("Provider configuration is malformed: {source}.")]
	Malformed {
		/// Located decoding failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Neither the configuration nor the environment defines an endpoint.
	#[error("The argument \"endpoint\" is required, but no definition was found.")]
	MissingEndpoint,
	/// Endpoint is an empty string.
	#[error("\"endpoint\" must be a non-empty string.")]
	EmptyEndpoint,
	/// Endpoint does not parse as a URL.
	#[error("\"endpoint\" must be a valid URL.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint uses a scheme other than `http` or `https`.
	#[error("\"endpoint\" must be a valid URL with http or https scheme, got {scheme:?}.")]
	UnsupportedScheme {
		/// Scheme that was supplied.
		scheme: String,
	},
}
impl SettingsError {
	/// Attribute the error refers to, when it refers to a single one.
	pub fn attribute(&self) -> Option<&'static str> {
		match self {
			Self::Malformed { .. } => None,
			_ => Some("endpoint"),
		}
	}
}

/// Attribute values as supplied by the host, before validation.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawProviderSettings {
	/// Kuzzle endpoint URL.
	#[serde(default)]
	pub endpoint: Option<String>,
	/// Kuzzle API key.
	#[serde(default)]
	pub api_key: Option<String>,
	/// Kuzzle username.
	#[serde(default)]
	pub username: Option<String>,
	/// Kuzzle password.
	#[serde(default)]
	pub password: Option<String>,
}
impl RawProviderSettings {
	/// Decodes the host's attribute object.
	pub fn from_value(value: serde_json::Value) -> Result<Self, SettingsError> {
		serde_path_to_error::deserialize(value)
			.map_err(|source| SettingsError::Malformed { source })
	}

	/// Fills unset attributes through `lookup`, keyed by the `KUZZLE_*` variable names.
	pub fn with_env_fallback<F>(mut self, lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String>,
	{
		for (slot, key) in [
			(&mut self.endpoint, ENDPOINT_ENV),
			(&mut self.api_key, API_KEY_ENV),
			(&mut self.username, USERNAME_ENV),
			(&mut self.password, PASSWORD_ENV),
		] {
			if slot.is_none() {
				*slot = lookup(key);
			}
		}

		self
	}

	/// Fills unset attributes from the process environment.
	pub fn with_process_env(self) -> Self {
		self.with_env_fallback(|key| std::env::var(key).ok())
	}

	/// Validates the endpoint and normalizes optional credentials.
	pub fn validate(&self) -> Result<ProviderSettings, SettingsError> {
		let endpoint = self.endpoint.as_deref().ok_or(SettingsError::MissingEndpoint)?;

		if endpoint.is_empty() {
			return Err(SettingsError::EmptyEndpoint);
		}

		let endpoint =
			Url::parse(endpoint).map_err(|source| SettingsError::InvalidEndpoint { source })?;
		let mut settings = ProviderSettings::new(endpoint)?;

		if let Some(api_key) = non_empty(&self.api_key) {
			settings = settings.with_api_key(api_key);
		}

		settings.username = non_empty(&self.username).map(ToOwned::to_owned);
		settings.password = non_empty(&self.password).map(Secret::new);

		Ok(settings)
	}
}
impl Debug for RawProviderSettings {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RawProviderSettings")
			.field("endpoint", &self.endpoint)
			.field("api_key_set", &self.api_key.is_some())
			.field("username", &self.username)
			.field("password_set", &self.password.is_some())
			.finish()
	}
}

/// Validated, immutable provider settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderSettings {
	/// Kuzzle endpoint, `http` or `https`.
	pub endpoint: Url,
	/// Non-empty API key, if configured.
	pub api_key: Option<Secret>,
	/// Non-empty username, if configured.
	pub username: Option<String>,
	/// Non-empty password, if configured.
	pub password: Option<Secret>,
}
impl ProviderSettings {
	/// Creates anonymous settings for `endpoint`.
	pub fn new(endpoint: Url) -> Result<Self, SettingsError> {
		match endpoint.scheme() {
			"http" | "https" => {},
			scheme => return Err(SettingsError::UnsupportedScheme { scheme: scheme.into() }),
		}

		Ok(Self { endpoint, api_key: None, username: None, password: None })
	}

	/// Sets the API key; an empty key clears it.
	pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
		self.api_key = Some(Secret::new(api_key)).filter(|key| !key.is_empty());

		self
	}

	/// Sets the username/password pair; empty values clear the matching field.
	pub fn with_login(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
		self.username = Some(username.into()).filter(|name| !name.is_empty());
		self.password = Some(Secret::new(password)).filter(|password| !password.is_empty());

		self
	}
}

fn non_empty(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	fn raw(endpoint: &str) -> RawProviderSettings {
		RawProviderSettings { endpoint: Some(endpoint.into()), ..Default::default() }
	}

	#[test]
	fn endpoint_validation_covers_every_failure() {
		assert!(matches!(
			RawProviderSettings::default().validate(),
			Err(SettingsError::MissingEndpoint)
		));
		assert!(matches!(raw("").validate(), Err(SettingsError::EmptyEndpoint)));
		assert!(matches!(raw("not a url").validate(), Err(SettingsError::InvalidEndpoint { .. })));
		assert!(matches!(
			raw("ftp://kuzzle:7512").validate(),
			Err(SettingsError::UnsupportedScheme { scheme }) if scheme == "ftp"
		));

		let settings =
			raw("https://kuzzle:7512").validate().expect("HTTPS endpoint should validate.");

		assert_eq!(settings.endpoint.as_str(), "https://kuzzle:7512/");
		assert!(settings.api_key.is_none());
	}

	#[test]
	fn empty_credentials_are_treated_as_absent() {
		let settings = RawProviderSettings {
			endpoint: Some("http://kuzzle:7512".into()),
			api_key: Some(String::new()),
			username: Some("admin".into()),
			password: Some(String::new()),
		}
		.validate()
		.expect("Settings with empty credentials should validate.");

		assert!(settings.api_key.is_none());
		assert_eq!(settings.username.as_deref(), Some("admin"));
		assert!(settings.password.is_none());
	}

	#[test]
	fn env_fallback_only_fills_unset_attributes() {
		let env = HashMap::from([
			(ENDPOINT_ENV, "http://env:7512"),
			(API_KEY_ENV, "env-key"),
			(USERNAME_ENV, "env-user"),
		]);
		let settings = RawProviderSettings {
			endpoint: Some("http://declared:7512".into()),
			api_key: Some(String::new()),
			..Default::default()
		}
		.with_env_fallback(|key| env.get(key).map(|value| value.to_string()));

		assert_eq!(settings.endpoint.as_deref(), Some("http://declared:7512"));
		assert_eq!(settings.api_key.as_deref(), Some(""));
		assert_eq!(settings.username.as_deref(), Some("env-user"));
		assert_eq!(settings.password, None);
	}

	#[test]
	fn host_payload_decodes_with_nulls() {
		let settings = RawProviderSettings::from_value(serde_json::json!({
			"endpoint": "http://kuzzle:7512",
			"api_key": null,
			"username": "admin",
		}))
		.expect("Host payload should decode.");

		assert_eq!(settings.endpoint.as_deref(), Some("http://kuzzle:7512"));
		assert_eq!(settings.api_key, None);
		assert_eq!(settings.username.as_deref(), Some("admin"));

		let err = RawProviderSettings::from_value(serde_json::json!({ "endpoint": 7512 }))
			.expect_err("Numeric endpoint should be rejected.");

		assert!(err.to_string().contains("endpoint"));
		assert_eq!(err.attribute(), None);
	}

	#[test]
	fn raw_debug_hides_secrets() {
		let settings = RawProviderSettings {
			api_key: Some("abc123".into()),
			password: Some("hunter2".into()),
			..raw("http://kuzzle:7512")
		};
		let rendered = format!("{settings:?}");

		assert!(!rendered.contains("abc123"));
		assert!(!rendered.contains("hunter2"));
	}
}
