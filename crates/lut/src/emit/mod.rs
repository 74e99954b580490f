//! Table emission.
//!
//! Merges explicit and derived associations and renders them as Rust source
//! meant to be `include!`d by the crate that owns the retainers:
//!
//! - a private `LazyLock<HandlerTable>` static populated once, on first use,
//!   with one `insert` per entry in lexicographic type-name order;
//! - a public generic accessor returning the retainer narrowed to the
//!   caller's expected type;
//! - a unit struct implementing `RetainerCache` over the same static.
//!
//! Rendering is a pure function of its inputs, so unchanged input yields a
//! byte-identical file.

use tracing::info;

use crate::config::LutConfig;
use crate::error::{LutError, Result};
use crate::model::{Association, AssociationTable, DerivedMap, ExplicitMap, Origin};

/// Header line identifying generated files.
pub const GENERATED_MARKER: &str = "// @generated by keepsake-lut. Do not edit.";

/// Rendered table plus the merged associations it was rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTable {
	pub source: String,
	pub table: AssociationTable,
}

/// Renders association tables according to a [`LutConfig`].
pub struct TableEmitter<'c> {
	config: &'c LutConfig,
}

impl<'c> TableEmitter<'c> {
	pub fn new(config: &'c LutConfig) -> Self {
		Self { config }
	}

	/// Merges both maps and renders the result.
	///
	/// Fails with [`LutError::MergeConflict`] if a type appears in both maps,
	/// and with [`LutError::InvalidIdentifier`] if the configured names are
	/// not valid Rust.
	pub fn emit(&self, explicit: &ExplicitMap, derived: &DerivedMap) -> Result<GeneratedTable> {
		self.config.validate()?;
		let table = merge(explicit, derived)?;
		let source = self.render(&table);
		info!(
			entries = table.len(),
			explicit = table.explicit_count(),
			derived = table.derived_count(),
			bytes = source.len(),
			"emitted retainer table"
		);
		Ok(GeneratedTable { source, table })
	}

	/// Renders an already merged table.
	pub fn render(&self, table: &AssociationTable) -> String {
		let LutConfig {
			static_name,
			accessor_name,
			cache_type_name,
			runtime_path: rt,
			..
		} = self.config;

		let mut out = String::new();
		out.push_str(GENERATED_MARKER);
		out.push('\n');
		out.push_str(&format!(
			"// entries: {} (explicit: {}, derived: {})\n\n",
			table.len(),
			table.explicit_count(),
			table.derived_count()
		));

		out.push_str(&format!(
			"static {static_name}: ::std::sync::LazyLock<{rt}::HandlerTable> = ::std::sync::LazyLock::new("
		));
		if table.is_empty() {
			out.push_str(&format!("|| {rt}::HandlerTable::builder().build());\n"));
		} else {
			out.push_str("|| {\n");
			out.push_str(&format!("\tlet mut table = {rt}::HandlerTable::builder();\n"));
			for assoc in table.iter() {
				out.push_str(&insert_line(assoc));
			}
			out.push_str("\ttable.build()\n});\n");
		}
		out.push('\n');

		out.push_str("/// Returns the retainer registered for `type_name`, narrowed to `H`.\n");
		out.push_str("///\n");
		out.push_str("/// `None` if the type has no retainer or its retainer is not an `H`.\n");
		out.push_str(&format!(
			"pub fn {accessor_name}<H: ::std::any::Any>(type_name: &str) -> ::std::option::Option<&'static H> {{\n"
		));
		out.push_str(&format!("\t{static_name}.get::<H>(type_name)\n"));
		out.push_str("}\n\n");

		out.push_str("/// Type-erased view of the generated table.\n");
		out.push_str(&format!("pub struct {cache_type_name};\n\n"));
		out.push_str(&format!("impl {rt}::RetainerCache for {cache_type_name} {{\n"));
		out.push_str(&format!(
			"\tfn handler(&self, type_name: &str) -> ::std::option::Option<{rt}::Handler> {{\n"
		));
		out.push_str(&format!("\t\t{static_name}.get_raw(type_name)\n"));
		out.push_str("\t}\n}\n");

		out
	}
}

/// One `insert` statement. Derived entries name their ancestor in a trailing
/// comment, escaped so that it cannot end the line.
fn insert_line(assoc: &Association) -> String {
	let mut line = format!("\ttable.insert({:?}, &{});", assoc.type_name, assoc.handler);
	if let Origin::Derived { ancestor } = &assoc.origin {
		line.push_str(&format!(" // inherited from {}", ancestor.escape_debug()));
	}
	line.push('\n');
	line
}

/// Unions explicit and derived associations into one sorted table.
///
/// The resolver never derives an explicitly associated type, so an overlap
/// here is a bug and is reported rather than resolved.
pub fn merge(explicit: &ExplicitMap, derived: &DerivedMap) -> Result<AssociationTable> {
	if let Some((type_name, d)) = derived.iter().find(|(k, _)| explicit.contains_key(*k)) {
		return Err(LutError::MergeConflict {
			type_name: type_name.clone(),
			explicit: explicit[type_name].to_string(),
			derived: d.handler.to_string(),
		});
	}

	let mut entries: Vec<Association> = explicit
		.iter()
		.map(|(name, handler)| Association {
			type_name: name.clone(),
			handler: handler.clone(),
			origin: Origin::Explicit,
		})
		.chain(derived.iter().map(|(name, d)| Association {
			type_name: name.clone(),
			handler: d.handler.clone(),
			origin: Origin::Derived {
				ancestor: d.ancestor.clone(),
			},
		}))
		.collect();
	entries.sort_unstable_by(|a, b| a.type_name.cmp(&b.type_name));

	Ok(AssociationTable::from_sorted(entries))
}

#[cfg(test)]
mod tests;
