//! Runtime support for generated retainer tables.
//!
//! Generated code builds a [`HandlerTable`] once, inside a `LazyLock`, and
//! exposes it through a typed accessor and a [`RetainerCache`] implementor.
//! Retainers are stored type-erased; lookups narrow them back with
//! [`Any::downcast_ref`], so asking for the wrong retainer type yields `None`
//! rather than a bad cast.

use std::any::Any;
use std::fmt;

use rustc_hash::FxHashMap as HashMap;

/// A type-erased reference to a retainer.
pub type Handler = &'static (dyn Any + Send + Sync);

/// Immutable type name → retainer map.
pub struct HandlerTable {
	by_name: HashMap<&'static str, Handler>,
}

impl HandlerTable {
	pub fn builder() -> HandlerTableBuilder {
		HandlerTableBuilder::default()
	}

	/// Returns the retainer for `type_name` if it is an `H`.
	pub fn get<H: Any>(&self, type_name: &str) -> Option<&'static H> {
		self.get_raw(type_name)?.downcast_ref::<H>()
	}

	/// Returns the type-erased retainer for `type_name`.
	pub fn get_raw(&self, type_name: &str) -> Option<Handler> {
		self.by_name.get(type_name).copied()
	}

	pub fn contains(&self, type_name: &str) -> bool {
		self.by_name.contains_key(type_name)
	}

	pub fn len(&self) -> usize {
		self.by_name.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_name.is_empty()
	}

	/// All registered type names, sorted.
	pub fn type_names(&self) -> Vec<&'static str> {
		let mut names: Vec<_> = self.by_name.keys().copied().collect();
		names.sort_unstable();
		names
	}
}

impl fmt::Debug for HandlerTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HandlerTable")
			.field("type_names", &self.type_names())
			.finish()
	}
}

/// Collects entries for a [`HandlerTable`].
#[derive(Default)]
pub struct HandlerTableBuilder {
	by_name: HashMap<&'static str, Handler>,
}

impl HandlerTableBuilder {
	/// Registers `handler` for `type_name`.
	///
	/// # Panics
	///
	/// If `type_name` is already registered. Generated tables never repeat a
	/// name.
	pub fn insert(&mut self, type_name: &'static str, handler: Handler) {
		if self.by_name.insert(type_name, handler).is_some() {
			panic!("duplicate retainer for type {type_name:?}");
		}
	}

	pub fn build(self) -> HandlerTable {
		HandlerTable {
			by_name: self.by_name,
		}
	}
}

/// Lookup surface implemented by generated tables.
pub trait RetainerCache: Send + Sync {
	/// Type-erased retainer for `type_name`.
	fn handler(&self, type_name: &str) -> Option<Handler>;

	/// Retainer for `type_name`, narrowed to `H`.
	fn get_cached<H: Any>(&self, type_name: &str) -> Option<&'static H>
	where
		Self: Sized,
	{
		self.handler(type_name)?.downcast_ref::<H>()
	}
}

impl dyn RetainerCache + '_ {
	/// [`RetainerCache::get_cached`] for trait objects.
	pub fn get<H: Any>(&self, type_name: &str) -> Option<&'static H> {
		self.handler(type_name)?.downcast_ref::<H>()
	}
}

impl RetainerCache for HandlerTable {
	fn handler(&self, type_name: &str) -> Option<Handler> {
		self.get_raw(type_name)
	}
}

#[cfg(test)]
mod tests {
	use std::sync::LazyLock;

	use super::*;

	struct WidgetRetainer;
	struct ButtonRetainer;

	static TABLE: LazyLock<HandlerTable> = LazyLock::new(|| {
		let mut table = HandlerTable::builder();
		table.insert("ui.Widget", &WidgetRetainer);
		table.insert("ui.Label", &WidgetRetainer);
		table.insert("ui.Button", &ButtonRetainer);
		table.build()
	});

	#[test]
	fn typed_lookup() {
		assert!(TABLE.get::<WidgetRetainer>("ui.Widget").is_some());
		assert!(TABLE.get::<WidgetRetainer>("ui.Label").is_some());
		assert!(TABLE.get::<ButtonRetainer>("ui.Button").is_some());
		assert!(TABLE.get::<WidgetRetainer>("ui.Missing").is_none());
	}

	#[test]
	fn wrong_type_yields_none() {
		assert!(TABLE.get_raw("ui.Button").is_some());
		assert!(TABLE.get::<WidgetRetainer>("ui.Button").is_none());
	}

	#[test]
	fn introspection() {
		assert_eq!(TABLE.len(), 3);
		assert!(!TABLE.is_empty());
		assert!(TABLE.contains("ui.Label"));
		assert_eq!(TABLE.type_names(), ["ui.Button", "ui.Label", "ui.Widget"]);
		assert!(HandlerTable::builder().build().is_empty());
	}

	#[test]
	fn cache_trait_and_trait_object() {
		let table: &HandlerTable = &TABLE;
		assert!(table.get_cached::<ButtonRetainer>("ui.Button").is_some());

		let cache: &dyn RetainerCache = table;
		assert!(cache.get::<WidgetRetainer>("ui.Widget").is_some());
		assert!(cache.get::<WidgetRetainer>("ui.Button").is_none());
		assert!(cache.handler("nope").is_none());
	}

	#[test]
	#[should_panic(expected = "duplicate retainer")]
	fn duplicate_insert_panics() {
		let mut table = HandlerTable::builder();
		table.insert("ui.Widget", &WidgetRetainer);
		table.insert("ui.Widget", &ButtonRetainer);
	}
}
