//! API key verification through `/_checkToken`.

// self
use crate::{
	_prelude::*,
	api::{self, CHECK_TOKEN_ROUTE, KuzzleApi},
	http::KuzzleHttpClient,
	obs::{self, StepKind},
};

#[derive(Serialize)]
struct CheckTokenRequest<'a> {
	jwt: &'a str,
}

/// `result` member of a `/_checkToken` response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CheckTokenResult {
	/// Whether Kuzzle accepts the token.
	pub valid: bool,
	/// Reason given for an invalid token.
	#[serde(default)]
	pub state: Option<String>,
}

impl<C> KuzzleApi<C>
where
	C: ?Sized + KuzzleHttpClient,
{
	/// Asks Kuzzle whether `token` is valid.
	///
	/// Any status other than `200` is reported as [`Error::TokenCheckRejected`] rather than
	/// accepted, so an API key is only trusted once Kuzzle has positively validated it.
	pub async fn check_token(&self, token: &str) -> Result<CheckTokenResult> {
		obs::observe(StepKind::CheckToken, "check_token", async move {
			let response =
				self.post_json(CHECK_TOKEN_ROUTE, &CheckTokenRequest { jwt: token }).await?;

			if !response.is_ok() {
				return Err(Error::TokenCheckRejected { status: response.status });
			}

			let result: CheckTokenResult = api::decode_result(CHECK_TOKEN_ROUTE, &response.body)?;

			if !result.valid {
				return Err(Error::InvalidToken { state: result.state });
			}

			Ok(result)
		})
		.await
	}
}
