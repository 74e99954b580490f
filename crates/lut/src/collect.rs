//! Collection of explicit associations produced upstream.

use std::collections::btree_map::Entry;

use tracing::debug;

use crate::error::{LutError, Result};
use crate::model::{ExplicitMap, HandlerRef};

/// Gathers `(type name, retainer path)` pairs into an [`ExplicitMap`].
///
/// Type names are trimmed, matching how declarations are named in a
/// [`HierarchyGraph`](crate::hierarchy::HierarchyGraph). Repeating an
/// identical pair is harmless. Giving one type two different
/// retainers fails with [`LutError::DuplicateAssociation`], since no choice
/// between them would be safe.
pub fn collect<I, N, H>(pairs: I) -> Result<ExplicitMap>
where
	I: IntoIterator<Item = (N, H)>,
	N: Into<String>,
	H: AsRef<str>,
{
	let mut map = ExplicitMap::new();

	for (type_name, path) in pairs {
		let type_name: String = type_name.into();
		let type_name = type_name.trim();
		let path = path.as_ref();
		if type_name.is_empty() {
			return Err(LutError::EmptyTypeName {
				handler: path.to_owned(),
			});
		}
		let handler = HandlerRef::parse(type_name, path)?;

		match map.entry(type_name.to_owned()) {
			Entry::Vacant(v) => {
				v.insert(handler);
			}
			Entry::Occupied(o) if *o.get() == handler => {
				debug!(type_name = %o.key(), %handler, "repeated association");
			}
			Entry::Occupied(o) => {
				return Err(LutError::DuplicateAssociation {
					type_name: o.key().clone(),
					existing: o.get().to_string(),
					incoming: handler.to_string(),
				});
			}
		}
	}

	Ok(map)
}
