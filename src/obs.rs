//! Optional observability helpers for the configuration pass.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (on by default) to emit structured spans named `kuzzle_provider.step`
//!   with the `step` and `stage` (call site) fields.
//! - Enable `metrics` to increment the `kuzzle_provider_step_total` counter for every
//!   attempt/success/failure, labeled by `step` + `outcome`.

// self
use crate::_prelude::*;

/// Steps of a configuration pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepKind {
	/// Whole configuration pass.
	Configure,
	/// Reachability probe (`GET /`).
	CheckConnection,
	/// API key verification (`POST /_checkToken`).
	CheckToken,
	/// Username/password login (`POST /_login/local`).
	Login,
}
impl StepKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StepKind::Configure => "configure",
			StepKind::CheckConnection => "check_connection",
			StepKind::CheckToken => "check_token",
			StepKind::Login => "login",
		}
	}
}
impl Display for StepKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepOutcome {
	/// Entry to a step.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl StepOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StepOutcome::Attempt => "attempt",
			StepOutcome::Success => "success",
			StepOutcome::Failure => "failure",
		}
	}
}
impl Display for StepOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `fut` inside a `kuzzle_provider.step` span and counts its attempt and outcome.
///
/// `failed` classifies the output, so steps that report failures without an `Err` (the
/// configuration pass yields diagnostics) are counted correctly.
pub(crate) async fn trace_step<Fut, F>(
	kind: StepKind,
	stage: &'static str,
	fut: Fut,
	failed: F,
) -> Fut::Output
where
	Fut: Future,
	F: FnOnce(&Fut::Output) -> bool,
{
	count_step(kind, StepOutcome::Attempt);

	#[cfg(feature = "tracing")]
	let output = {
		use tracing::Instrument;

		fut.instrument(tracing::info_span!("kuzzle_provider.step", step = kind.as_str(), stage))
			.await
	};
	#[cfg(not(feature = "tracing"))]
	let output = {
		let _ = stage;

		fut.await
	};

	count_step(kind, if failed(&output) { StepOutcome::Failure } else { StepOutcome::Success });

	output
}

/// [`trace_step`] for fallible API calls; failures are also logged at `debug`.
pub(crate) async fn observe<T, Fut>(kind: StepKind, stage: &'static str, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let result = trace_step(kind, stage, fut, |result| result.is_err()).await;

	#[cfg(feature = "tracing")]
	{
		if let Err(e) = &result {
			tracing::debug!(step = kind.as_str(), stage, error = %e, "step failed");
		}
	}

	result
}

fn count_step(kind: StepKind, outcome: StepOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"kuzzle_provider_step_total",
			"step" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}
