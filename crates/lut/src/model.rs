//! Association data model shared by the collector, resolver and emitter.

use std::collections::BTreeMap;
use std::fmt;

use syn::PathArguments;

use crate::error::{LutError, Result};

/// Reference to a generated retainer, as a Rust path usable in expression position.
///
/// Stored in canonical form (`::a::b` or `a::b`, no whitespace) so that two
/// spellings of the same path compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerRef(Box<str>);

impl HandlerRef {
	/// Parses and canonicalizes `path`, the retainer associated with `type_name`.
	///
	/// Generic arguments are rejected since the path is emitted as `&path`.
	pub fn parse(type_name: &str, path: &str) -> Result<Self> {
		let invalid = || LutError::InvalidHandlerPath {
			type_name: type_name.to_owned(),
			path: path.to_owned(),
		};

		let parsed: syn::Path = syn::parse_str(path.trim()).map_err(|_| invalid())?;
		if parsed
			.segments
			.iter()
			.any(|seg| !matches!(seg.arguments, PathArguments::None))
		{
			return Err(invalid());
		}

		let mut canonical = String::with_capacity(path.len());
		if parsed.leading_colon.is_some() {
			canonical.push_str("::");
		}
		for (i, seg) in parsed.segments.iter().enumerate() {
			if i > 0 {
				canonical.push_str("::");
			}
			canonical.push_str(&seg.ident.to_string());
		}
		Ok(Self(canonical.into_boxed_str()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for HandlerRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Explicit associations keyed by qualified type name.
pub type ExplicitMap = BTreeMap<String, HandlerRef>;

/// A retainer borrowed from an ancestor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derived {
	pub handler: HandlerRef,
	/// Qualified name of the ancestor that owns `handler`.
	pub ancestor: String,
}

/// Derived associations keyed by qualified type name.
pub type DerivedMap = BTreeMap<String, Derived>;

/// Where an association came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
	/// Produced upstream for a type that declared retained state.
	Explicit,
	/// Inherited from the nearest associated ancestor.
	Derived { ancestor: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
	pub type_name: String,
	pub handler: HandlerRef,
	pub origin: Origin,
}

/// Merged, immutable type → retainer mapping, sorted by type name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationTable {
	entries: Vec<Association>,
}

impl AssociationTable {
	/// Builds a table from entries that are already sorted and unique.
	pub(crate) fn from_sorted(entries: Vec<Association>) -> Self {
		debug_assert!(entries.windows(2).all(|w| w[0].type_name < w[1].type_name));
		Self { entries }
	}

	/// Returns the retainer for `type_name`, if any.
	pub fn get(&self, type_name: &str) -> Option<&HandlerRef> {
		self.entry(type_name).map(|a| &a.handler)
	}

	pub fn entry(&self, type_name: &str) -> Option<&Association> {
		self.entries
			.binary_search_by(|a| a.type_name.as_str().cmp(type_name))
			.ok()
			.map(|idx| &self.entries[idx])
	}

	pub fn iter(&self) -> impl Iterator<Item = &Association> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn explicit_count(&self) -> usize {
		self.entries
			.iter()
			.filter(|a| a.origin == Origin::Explicit)
			.count()
	}

	pub fn derived_count(&self) -> usize {
		self.len() - self.explicit_count()
	}
}
