//! TOML hierarchy manifest.
//!
//! ```toml
//! [[types]]
//! name = "app.model.Widget"
//!
//! [[types]]
//! name = "app.model.Button"
//! extends = "app.model.Widget"
//!
//! [[types]]
//! name = "app.model.Button.Style"
//! kind = "enum"
//! enclosing = "app.model.Button"
//!
//! [[associations]]
//! type = "app.model.Widget"
//! handler = "crate::retainers::WidgetRetainer"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ManifestError;
use crate::graph::TypeKind;

/// Declarations of a compiled program plus the upstream associations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
	#[serde(default)]
	pub types: Vec<TypeDecl>,
	#[serde(default)]
	pub associations: Vec<AssociationDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDecl {
	pub name: String,
	#[serde(default)]
	pub kind: TypeKind,
	/// Superclass reference, e.g. `app.Base` or `app.Base<String>`.
	#[serde(default)]
	pub extends: Option<String>,
	/// Qualified name of the declaring type, for nested declarations.
	#[serde(default)]
	pub enclosing: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssociationDecl {
	#[serde(rename = "type")]
	pub type_name: String,
	pub handler: String,
}

impl Manifest {
	pub fn from_toml_str(content: &str) -> Result<Self, ManifestError> {
		Ok(toml::from_str(content)?)
	}

	pub fn load(path: &Path) -> Result<Self, ManifestError> {
		let content = fs::read_to_string(path).map_err(|error| ManifestError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&content)
	}

	/// Upstream `(type, retainer)` pairs in declaration order.
	pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
		self.associations
			.iter()
			.map(|a| (a.type_name.as_str(), a.handler.as_str()))
	}
}
