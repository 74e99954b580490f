//! Generator configuration.
//!
//! Options live under a `[lut]` table so they can share a file with settings
//! owned by the caller; everything outside that table is ignored.
//!
//! ```toml
//! [lut]
//! vectorize_inheritance = true
//! static_name = "RETAINER_CACHE"
//! accessor_name = "get_cached"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, LutError, Result};

/// Options controlling resolution and the shape of the emitted table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LutConfig {
	/// Derive entries for subclasses from their nearest associated ancestor.
	pub vectorize_inheritance: bool,
	/// Identifier of the generated backing static.
	pub static_name: String,
	/// Identifier of the generated lookup function.
	pub accessor_name: String,
	/// Identifier of the generated `RetainerCache` implementor.
	pub cache_type_name: String,
	/// Path through which generated code reaches the runtime crate.
	pub runtime_path: String,
}

impl Default for LutConfig {
	fn default() -> Self {
		Self {
			vectorize_inheritance: false,
			static_name: "RETAINER_CACHE".to_owned(),
			accessor_name: "get_cached".to_owned(),
			cache_type_name: "RetainerCacheImpl".to_owned(),
			runtime_path: "::keepsake_retain".to_owned(),
		}
	}
}

#[derive(Debug, Default, Deserialize)]
struct Document {
	#[serde(default)]
	lut: LutConfig,
}

impl LutConfig {
	/// Reads the `[lut]` table of a TOML document. A missing table yields defaults.
	pub fn from_toml_str(content: &str) -> std::result::Result<Self, ConfigError> {
		let doc: Document = toml::from_str(content)?;
		Ok(doc.lut)
	}

	pub fn load(path: &Path) -> std::result::Result<Self, ConfigError> {
		let content = fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&content)
	}

	/// Checks that every configured name can be spliced into Rust source.
	pub fn validate(&self) -> Result<()> {
		for (field, value) in [
			("static_name", &self.static_name),
			("accessor_name", &self.accessor_name),
			("cache_type_name", &self.cache_type_name),
		] {
			if syn::parse_str::<syn::Ident>(value).is_err() {
				return Err(LutError::InvalidIdentifier {
					field,
					value: value.clone(),
				});
			}
		}
		if syn::parse_str::<syn::Path>(&self.runtime_path).is_err() {
			return Err(LutError::InvalidIdentifier {
				field: "runtime_path",
				value: self.runtime_path.clone(),
			});
		}
		Ok(())
	}
}
