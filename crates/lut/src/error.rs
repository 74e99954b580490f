//! Error types for table generation.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors of a generation run.
///
/// Any of these aborts the run before an artifact is written.
#[derive(Debug, Error)]
pub enum LutError {
	/// The same type was given two different retainers upstream.
	#[error("conflicting retainers for {type_name}: {existing} vs {incoming}")]
	DuplicateAssociation {
		type_name: String,
		existing: String,
		incoming: String,
	},

	/// A type ended up in both the explicit and the derived map.
	#[error("type {type_name} has both an explicit ({explicit}) and a derived ({derived}) retainer")]
	MergeConflict {
		type_name: String,
		explicit: String,
		derived: String,
	},

	/// The retainer reference cannot be spliced into generated code.
	#[error("retainer for {type_name} is not a plain Rust path: {path:?}")]
	InvalidHandlerPath { type_name: String, path: String },

	/// An association arrived without a type name.
	#[error("association for retainer {handler} has an empty type name")]
	EmptyTypeName { handler: String },

	/// A configured identifier is not a valid Rust identifier or path.
	#[error("invalid {field}: {value:?}")]
	InvalidIdentifier { field: &'static str, value: String },

	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error(transparent)]
	Manifest(#[from] ManifestError),

	/// A variable cargo sets for build scripts is missing.
	#[error("environment variable {0} is not set (not running under cargo?)")]
	MissingEnv(&'static str),

	/// Writing the generated table failed.
	#[error("I/O error writing {path}: {error}")]
	Io {
		path: PathBuf,
		#[source]
		error: std::io::Error,
	},
}

/// Errors that can occur when loading generator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		#[source]
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or shape.
	#[error("config parse error: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Errors that can occur when loading a hierarchy manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
	#[error("I/O error reading {path}: {error}")]
	Io {
		path: PathBuf,
		#[source]
		error: std::io::Error,
	},

	#[error("manifest parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// Two declarations share a qualified name.
	#[error("type {0} is declared more than once")]
	DuplicateType(String),

	/// A declaration names an enclosing type that is not declared.
	#[error("type {name} is enclosed by undeclared type {enclosing}")]
	UnknownEnclosing { name: String, enclosing: String },

	#[error("type declaration with an empty name")]
	EmptyName,

	/// An `extends` reference could not be parsed.
	#[error("malformed type reference {reference:?} on {name}")]
	MalformedTypeRef { name: String, reference: String },
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, LutError>;
