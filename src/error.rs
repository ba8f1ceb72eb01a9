//! Provider-level error types shared by the Kuzzle API helpers and the configurator.

// self
use crate::_prelude::*;

/// Provider-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical provider error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Kuzzle could not be reached or answered as unhealthy.
	#[error(transparent)]
	Connection(#[from] ConnectionError),
	/// Kuzzle returned a malformed payload.
	#[error(transparent)]
	Format(#[from] FormatError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// Kuzzle rejected the username/password pair.
	#[error("Kuzzle authentication failed (HTTP {status}).")]
	Authentication {
		/// HTTP status returned by `/_login/local`.
		status: u16,
	},
	/// Kuzzle reported the token as invalid.
	#[error("Kuzzle API key is invalid{}.", state_suffix(.state))]
	InvalidToken {
		/// Kuzzle's explanation, when supplied.
		state: Option<String>,
	},
	/// `/_checkToken` answered with a non-200 status.
	#[error("Kuzzle refused to check the API key (HTTP {status}).")]
	TokenCheckRejected {
		/// HTTP status returned by `/_checkToken`.
		status: u16,
	},
}

fn state_suffix(state: &Option<String>) -> String {
	state.as_deref().map(|s| format!(": {s}")).unwrap_or_default()
}

/// Reachability failures; fatal for a configuration pass.
#[derive(Debug, ThisError)]
pub enum ConnectionError {
	/// Request could not be sent.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Server answered but is unhealthy (502 or 503).
	#[error("Kuzzle server is not reachable (HTTP {status}).")]
	Unavailable {
		/// HTTP status returned by the endpoint root.
		status: u16,
	},
}
impl From<TransportError> for Error {
	fn from(e: TransportError) -> Self {
		Self::Connection(e.into())
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling Kuzzle: {source}.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling Kuzzle.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Payload encoding and decoding failures.
#[derive(Debug, ThisError)]
pub enum FormatError {
	/// Response body could not be decoded into the expected shape.
	#[error("Kuzzle returned a malformed response for {route}: {source}.")]
	Response {
		/// Route that produced the payload.
		route: &'static str,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Request body could not be serialized.
	#[error("Request body for {route} could not be encoded.")]
	Request {
		/// Route the body was meant for.
		route: &'static str,
		/// Serialization failure.
		#[source]
		source: serde_json::Error,
	},
}

/// Configuration failures raised before any request leaves the process.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A Kuzzle route could not be derived from the endpoint.
	#[error("Route {route} cannot be derived from the endpoint.")]
	InvalidRoute {
		/// Route that failed to resolve.
		route: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn invalid_token_includes_state_when_present() {
		let err = Error::InvalidToken { state: Some("Token expired".into()) };

		assert_eq!(err.to_string(), "Kuzzle API key is invalid: Token expired.");
		assert_eq!(Error::InvalidToken { state: None }.to_string(), "Kuzzle API key is invalid.");
	}

	#[test]
	fn transport_errors_are_connection_errors() {
		let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
		let err = Error::from(TransportError::from(io));

		assert!(matches!(err, Error::Connection(ConnectionError::Transport(_))));
	}
}
