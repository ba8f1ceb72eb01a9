//! Provider schema declaration handed to the host.

// self
use crate::{
	_prelude::*,
	settings::{API_KEY_ENV, ENDPOINT_ENV, PASSWORD_ENV, USERNAME_ENV},
};

/// Attribute value types used by the provider block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
	/// UTF-8 string.
	String,
}

/// Declaration of a single provider attribute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AttributeSchema {
	/// Attribute name in configuration files.
	pub name: &'static str,
	/// Value type.
	#[serde(rename = "type")]
	pub kind: AttributeType,
	/// Must be set (directly or through the environment).
	pub required: bool,
	/// Human-readable description.
	pub description: &'static str,
	/// Environment variable consulted when the attribute is unset.
	pub env_var: &'static str,
	/// Value must be hidden from plan output.
	pub sensitive: bool,
}
impl AttributeSchema {
	const fn string(name: &'static str, description: &'static str, env_var: &'static str) -> Self {
		Self {
			name,
			kind: AttributeType::String,
			required: false,
			description,
			env_var,
			sensitive: false,
		}
	}

	const fn required(mut self) -> Self {
		self.required = true;

		self
	}

	const fn sensitive(mut self) -> Self {
		self.sensitive = true;

		self
	}
}

/// Schema of the provider block plus the resources it serves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProviderSchema {
	/// Provider block attributes.
	pub attributes: Vec<AttributeSchema>,
	/// Resource type names served by the provider.
	pub resources: Vec<String>,
	/// Data source type names served by the provider.
	pub data_sources: Vec<String>,
}
impl ProviderSchema {
	/// Looks up an attribute by name.
	pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
		self.attributes.iter().find(|attribute| attribute.name == name)
	}
}

/// Builds the Kuzzle provider schema.
pub fn provider_schema() -> ProviderSchema {
	ProviderSchema {
		attributes: vec![
			AttributeSchema::string("endpoint", "Kuzzle endpoint URL", ENDPOINT_ENV).required(),
			AttributeSchema::string("api_key", "Kuzzle API key", API_KEY_ENV).sensitive(),
			AttributeSchema::string("username", "Kuzzle username", USERNAME_ENV),
			AttributeSchema::string("password", "Kuzzle password", PASSWORD_ENV).sensitive(),
		],
		resources: Vec::new(),
		data_sources: Vec::new(),
	}
}
