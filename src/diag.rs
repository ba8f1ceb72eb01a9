//! User-facing diagnostics returned to the host instead of errors.

// self
use crate::_prelude::*;

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
	/// The operation failed.
	Error,
	/// The operation succeeded with a caveat.
	Warning,
}
impl Severity {
	/// Returns a stable label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Severity::Error => "error",
			Severity::Warning => "warning",
		}
	}
}
impl Display for Severity {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Single message surfaced to the end user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
	/// Severity of the message.
	pub severity: Severity,
	/// One-line summary.
	pub summary: String,
	/// Longer explanation, possibly empty.
	pub detail: String,
	/// Configuration attribute the message refers to.
	pub attribute: Option<String>,
}
impl Diagnostic {
	/// Creates an error diagnostic.
	pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
		Self::new(Severity::Error, summary, detail)
	}

	/// Creates a warning diagnostic.
	pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
		Self::new(Severity::Warning, summary, detail)
	}

	/// Attaches the attribute the message refers to.
	pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
		self.attribute = Some(attribute.into());

		self
	}

	/// Returns `true` for [`Severity::Error`].
	pub fn is_error(&self) -> bool {
		self.severity == Severity::Error
	}

	fn new(severity: Severity, summary: impl Into<String>, detail: impl Into<String>) -> Self {
		Self { severity, summary: summary.into(), detail: detail.into(), attribute: None }
	}
}
impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}: {}", self.severity, self.summary)?;

		if !self.detail.is_empty() {
			write!(f, " ({})", self.detail)?;
		}

		Ok(())
	}
}

/// Ordered collection of diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);
impl Diagnostics {
	/// Appends a diagnostic.
	pub fn push(&mut self, diagnostic: Diagnostic) {
		self.0.push(diagnostic);
	}

	/// Appends an error diagnostic.
	pub fn error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
		self.push(Diagnostic::error(summary, detail));
	}

	/// Appends a warning diagnostic.
	pub fn warning(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
		self.push(Diagnostic::warning(summary, detail));
	}

	/// Returns `true` when at least one error was recorded.
	pub fn has_errors(&self) -> bool {
		self.0.iter().any(Diagnostic::is_error)
	}

	/// Iterates in insertion order.
	pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
		self.0.iter()
	}

	/// Number of recorded diagnostics.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` when nothing was recorded.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Consumes the collection.
	pub fn into_vec(self) -> Vec<Diagnostic> {
		self.0
	}
}
impl Extend<Diagnostic> for Diagnostics {
	fn extend<I>(&mut self, iter: I)
	where
		I: IntoIterator<Item = Diagnostic>,
	{
		self.0.extend(iter);
	}
}
impl FromIterator<Diagnostic> for Diagnostics {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = Diagnostic>,
	{
		Self(iter.into_iter().collect())
	}
}
impl IntoIterator for Diagnostics {
	type IntoIter = std::vec::IntoIter<Diagnostic>;
	type Item = Diagnostic;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}
impl<'a> IntoIterator for &'a Diagnostics {
	type IntoIter = std::slice::Iter<'a, Diagnostic>;
	type Item = &'a Diagnostic;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
