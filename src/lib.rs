//! Terraform provider core for Kuzzle: validates provider settings, probes the backend, and
//! resolves the authentication token handed to resources.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod diag;
pub mod error;
pub mod http;
pub mod obs;
pub mod provider;
pub mod schema;
pub mod settings;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test`
	//! crate feature.

	pub use crate::_prelude::*;

	// std
	use std::collections::HashMap;
	// crates.io
	use parking_lot::Mutex;
	// self
	use crate::{
		error::TransportError,
		http::{HttpFuture, HttpMethod, HttpRequest, HttpResponse, KuzzleHttpClient},
	};

	/// Scripted answer for a single route.
	#[derive(Clone, Debug)]
	pub enum Reply {
		/// Answer with a status and body.
		Status {
			/// HTTP status code.
			status: u16,
			/// Raw response body.
			body: Vec<u8>,
		},
		/// Fail as if the connection was refused.
		TransportFailure,
	}
	impl Reply {
		/// Answers with `status` and `body`.
		pub fn status(status: u16, body: impl Into<Vec<u8>>) -> Self {
			Self::Status { status, body: body.into() }
		}
	}

	/// In-process [`KuzzleHttpClient`] answering from a route table and recording requests.
	///
	/// Unscripted routes fail with a refused connection. Clones share the request log.
	#[derive(Clone, Debug, Default)]
	pub struct ScriptedHttpClient {
		routes: HashMap<(HttpMethod, String), Reply>,
		requests: Arc<Mutex<Vec<HttpRequest>>>,
	}
	impl ScriptedHttpClient {
		/// Scripts the reply for `method` on `path`.
		pub fn on(mut self, method: HttpMethod, path: &str, reply: Reply) -> Self {
			self.routes.insert((method, path.to_owned()), reply);

			self
		}

		/// Requests received so far, in order.
		pub fn requests(&self) -> Vec<HttpRequest> {
			self.requests.lock().clone()
		}
	}
	impl KuzzleHttpClient for ScriptedHttpClient {
		fn execute(&self, request: HttpRequest) -> HttpFuture<'_, HttpResponse> {
			let reply = self.routes.get(&(request.method, request.url.path().to_owned())).cloned();

			self.requests.lock().push(request);

			Box::pin(async move {
				match reply {
					Some(Reply::Status { status, body }) => Ok(HttpResponse { status, body }),
					Some(Reply::TransportFailure) | None => Err(TransportError::from(
						std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
					)),
				}
			})
		}
	}
}

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
