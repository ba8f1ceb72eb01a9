//! Credential precedence applied before any authentication request.
//!
//! Settings may carry an API key, a username/password pair, both, or neither. The
//! resolution below picks exactly one method per configuration pass:
//!
//! 1. a non-empty API key wins; a complete username/password pair configured next to it is
//!    ignored and reported,
//! 2. otherwise a complete username/password pair is used,
//! 3. otherwise the provider runs anonymously, reporting a half-configured pair if any.

// self
use crate::{auth::Secret, settings::ProviderSettings};

/// Authentication method selected for a configuration pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
	/// Verify the API key through `/_checkToken` and use it as the token.
	ApiKey(Secret),
	/// Exchange the pair for a JWT through `/_login/local`.
	Login {
		/// Kuzzle username.
		username: String,
		/// Kuzzle password.
		password: Secret,
	},
	/// No credentials; requests carry no token.
	Anonymous,
}
impl Credentials {
	/// Applies the precedence rules to `settings`.
	pub fn resolve(settings: &ProviderSettings) -> CredentialResolution {
		let login = match (&settings.username, &settings.password) {
			(Some(username), Some(password)) => Some(Credentials::Login {
				username: username.clone(),
				password: password.clone(),
			}),
			_ => None,
		};
		let incomplete_login =
			login.is_none() && (settings.username.is_some() || settings.password.is_some());

		if let Some(api_key) = &settings.api_key {
			return CredentialResolution {
				credentials: Credentials::ApiKey(api_key.clone()),
				ignored_login: login.is_some(),
				incomplete_login,
			};
		}

		CredentialResolution {
			credentials: login.unwrap_or(Credentials::Anonymous),
			ignored_login: false,
			incomplete_login,
		}
	}

	/// Returns a stable label suitable for span fields.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Credentials::ApiKey(_) => "api_key",
			Credentials::Login { .. } => "login",
			Credentials::Anonymous => "anonymous",
		}
	}
}

/// Outcome of [`Credentials::resolve`], including what was left unused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredentialResolution {
	/// Selected method.
	pub credentials: Credentials,
	/// A complete username/password pair was shadowed by the API key.
	pub ignored_login: bool,
	/// Only one of username/password was configured.
	pub incomplete_login: bool,
}
