//! Type-graph query facade.
//!
//! The generator never inspects source code itself. Everything it knows about
//! the compiled program's declarations comes through [`TypeGraph`], a
//! side-effect-free oracle that may be queried any number of times.

use std::fmt;
use std::hash::Hash;

use serde::Deserialize;

/// Kind of a declared type. Only [`TypeKind::Class`] is eligible for a retainer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
	#[default]
	Class,
	Interface,
	Enum,
	Annotation,
	Record,
}

impl TypeKind {
	pub fn is_class(self) -> bool {
		self == Self::Class
	}
}

impl fmt::Display for TypeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Class => write!(f, "class"),
			Self::Interface => write!(f, "interface"),
			Self::Enum => write!(f, "enum"),
			Self::Annotation => write!(f, "annotation"),
			Self::Record => write!(f, "record"),
		}
	}
}

/// Read-only view of a program's type hierarchy.
///
/// `Decl` identifies a declaration. `TypeRef` is a use of a type, which may
/// instantiate a generic declaration (`Base<String>`); [`TypeGraph::declaration_of`]
/// erases the instantiation, so two references are the same declared type
/// exactly when they map to the same `Decl`.
pub trait TypeGraph {
	type Decl: Copy + Eq + Hash + fmt::Debug;
	type TypeRef: fmt::Debug;

	/// Fully qualified name of `decl`, unique within the graph.
	fn qualified_name(&self, decl: Self::Decl) -> &str;

	fn kind(&self, decl: Self::Decl) -> TypeKind;

	/// Direct superclass reference, or `None` for a root of the hierarchy.
	fn superclass(&self, decl: Self::Decl) -> Option<Self::TypeRef>;

	/// Declaration a reference points at, or `None` if it lies outside the graph.
	///
	/// This is the only type-equality test the resolver performs: an ancestor
	/// reference matches an associated type when both map to the same `Decl`.
	fn declaration_of(&self, ty: &Self::TypeRef) -> Option<Self::Decl>;

	/// Declarations nested directly inside `decl`.
	fn enclosed(&self, decl: Self::Decl) -> &[Self::Decl];

	/// Looks up a declaration by qualified name.
	fn find(&self, qualified_name: &str) -> Option<Self::Decl>;
}
