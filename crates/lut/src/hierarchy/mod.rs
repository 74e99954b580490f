//! In-memory [`TypeGraph`] built from a [`Manifest`].

mod manifest;

use std::fmt;

use rustc_hash::FxHashMap as HashMap;

pub use self::manifest::{AssociationDecl, Manifest, TypeDecl};
use crate::error::ManifestError;
use crate::graph::{TypeGraph, TypeKind};

/// Index of a declaration inside a [`HierarchyGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclId(u32);

/// A use of a type: a qualified declaration name plus generic arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
	pub name: String,
	pub args: Vec<String>,
}

impl TypeRef {
	/// Parses `app.Base`, `app.Base<String>` or `app.Map<K, List<V>>`.
	///
	/// Arguments are kept verbatim; only the declaration name takes part in
	/// resolution.
	pub fn parse(input: &str) -> Option<Self> {
		let input = input.trim();
		let Some(open) = input.find('<') else {
			return (!input.is_empty() && !input.contains('>')).then(|| Self {
				name: input.to_owned(),
				args: Vec::new(),
			});
		};

		let name = input[..open].trim();
		let inner = input[open + 1..].strip_suffix('>')?;
		if name.is_empty() {
			return None;
		}

		let mut args = Vec::new();
		let mut depth = 0usize;
		let mut start = 0;
		for (i, c) in inner.char_indices() {
			match c {
				'<' => depth += 1,
				'>' => depth = depth.checked_sub(1)?,
				',' if depth == 0 => {
					args.push(inner[start..i].trim().to_owned());
					start = i + 1;
				}
				_ => {}
			}
		}
		if depth != 0 {
			return None;
		}
		args.push(inner[start..].trim().to_owned());
		if args.iter().any(String::is_empty) {
			return None;
		}

		Some(Self {
			name: name.to_owned(),
			args,
		})
	}
}

impl fmt::Display for TypeRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.name)?;
		if !self.args.is_empty() {
			write!(f, "<{}>", self.args.join(", "))?;
		}
		Ok(())
	}
}

#[derive(Debug, Clone)]
struct DeclData {
	name: String,
	kind: TypeKind,
	extends: Option<TypeRef>,
	nested: Vec<DeclId>,
}

/// Type hierarchy of a program, as described by a manifest.
///
/// Roots are the declarations without an enclosing type, in manifest order.
/// A superclass that is not declared in the manifest ends every walk through
/// it, like reaching the universal root type.
#[derive(Debug, Clone, Default)]
pub struct HierarchyGraph {
	decls: Vec<DeclData>,
	by_name: HashMap<String, DeclId>,
	roots: Vec<DeclId>,
}

impl HierarchyGraph {
	pub fn from_manifest(manifest: &Manifest) -> Result<Self, ManifestError> {
		let mut graph = Self::default();

		for decl in &manifest.types {
			let name = decl.name.trim();
			if name.is_empty() {
				return Err(ManifestError::EmptyName);
			}
			let extends = match &decl.extends {
				Some(raw) => Some(TypeRef::parse(raw).ok_or_else(|| {
					ManifestError::MalformedTypeRef {
						name: name.to_owned(),
						reference: raw.clone(),
					}
				})?),
				None => None,
			};

			let id = DeclId(graph.decls.len() as u32);
			if graph.by_name.insert(name.to_owned(), id).is_some() {
				return Err(ManifestError::DuplicateType(name.to_owned()));
			}
			graph.decls.push(DeclData {
				name: name.to_owned(),
				kind: decl.kind,
				extends,
				nested: Vec::new(),
			});
		}

		for (idx, decl) in manifest.types.iter().enumerate() {
			let id = DeclId(idx as u32);
			match decl.enclosing.as_deref().map(str::trim) {
				Some(enclosing) => {
					let Some(&parent) = graph.by_name.get(enclosing) else {
						return Err(ManifestError::UnknownEnclosing {
							name: decl.name.trim().to_owned(),
							enclosing: enclosing.to_owned(),
						});
					};
					graph.decls[parent.0 as usize].nested.push(id);
				}
				None => graph.roots.push(id),
			}
		}

		Ok(graph)
	}

	/// Top-level declarations.
	pub fn roots(&self) -> &[DeclId] {
		&self.roots
	}

	pub fn len(&self) -> usize {
		self.decls.len()
	}

	pub fn is_empty(&self) -> bool {
		self.decls.is_empty()
	}

	fn data(&self, decl: DeclId) -> &DeclData {
		&self.decls[decl.0 as usize]
	}
}

impl TypeGraph for HierarchyGraph {
	type Decl = DeclId;
	type TypeRef = TypeRef;

	fn qualified_name(&self, decl: DeclId) -> &str {
		&self.data(decl).name
	}

	fn kind(&self, decl: DeclId) -> TypeKind {
		self.data(decl).kind
	}

	fn superclass(&self, decl: DeclId) -> Option<TypeRef> {
		self.data(decl).extends.clone()
	}

	fn declaration_of(&self, ty: &TypeRef) -> Option<DeclId> {
		self.by_name.get(&ty.name).copied()
	}

	fn enclosed(&self, decl: DeclId) -> &[DeclId] {
		&self.data(decl).nested
	}

	fn find(&self, qualified_name: &str) -> Option<DeclId> {
		self.by_name.get(qualified_name).copied()
	}
}

#[cfg(test)]
mod tests;
