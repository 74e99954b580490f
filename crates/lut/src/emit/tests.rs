use pretty_assertions::assert_eq;

use super::*;
use crate::collect::collect;
use crate::model::{Derived, HandlerRef};

fn explicit(pairs: &[(&str, &str)]) -> ExplicitMap {
	collect(pairs.iter().copied()).unwrap()
}

fn derived(entries: &[(&str, &str, &str)]) -> DerivedMap {
	entries
		.iter()
		.map(|&(name, handler, ancestor)| {
			(
				name.to_owned(),
				Derived {
					handler: HandlerRef::parse(name, handler).unwrap(),
					ancestor: ancestor.to_owned(),
				},
			)
		})
		.collect()
}

#[test]
fn renders_sorted_table_with_accessor() {
	let config = LutConfig::default();
	let out = TableEmitter::new(&config)
		.emit(
			&explicit(&[("app.C", "crate::CRetainer"), ("app.A", "crate::ARetainer")]),
			&derived(&[
				("app.D", "crate::CRetainer", "app.C"),
				("app.B", "crate::ARetainer", "app.A"),
			]),
		)
		.unwrap();

	let expected = concat!(
		"// @generated by keepsake-lut. Do not edit.\n",
		"// entries: 4 (explicit: 2, derived: 2)\n",
		"\n",
		"static RETAINER_CACHE: ::std::sync::LazyLock<::keepsake_retain::HandlerTable> = ::std::sync::LazyLock::new(|| {\n",
		"\tlet mut table = ::keepsake_retain::HandlerTable::builder();\n",
		"\ttable.insert(\"app.A\", &crate::ARetainer);\n",
		"\ttable.insert(\"app.B\", &crate::ARetainer); // inherited from app.A\n",
		"\ttable.insert(\"app.C\", &crate::CRetainer);\n",
		"\ttable.insert(\"app.D\", &crate::CRetainer); // inherited from app.C\n",
		"\ttable.build()\n",
		"});\n",
		"\n",
		"/// Returns the retainer registered for `type_name`, narrowed to `H`.\n",
		"///\n",
		"/// `None` if the type has no retainer or its retainer is not an `H`.\n",
		"pub fn get_cached<H: ::std::any::Any>(type_name: &str) -> ::std::option::Option<&'static H> {\n",
		"\tRETAINER_CACHE.get::<H>(type_name)\n",
		"}\n",
		"\n",
		"/// Type-erased view of the generated table.\n",
		"pub struct RetainerCacheImpl;\n",
		"\n",
		"impl ::keepsake_retain::RetainerCache for RetainerCacheImpl {\n",
		"\tfn handler(&self, type_name: &str) -> ::std::option::Option<::keepsake_retain::Handler> {\n",
		"\t\tRETAINER_CACHE.get_raw(type_name)\n",
		"\t}\n",
		"}\n",
	);
	assert_eq!(out.source, expected);
	assert_eq!(out.table.len(), 4);
}

#[test]
fn empty_table_renders_without_inserts() {
	let config = LutConfig::default();
	let out = TableEmitter::new(&config)
		.emit(&ExplicitMap::new(), &DerivedMap::new())
		.unwrap();

	assert!(out.source.contains(
		"::std::sync::LazyLock::new(|| ::keepsake_retain::HandlerTable::builder().build());\n"
	));
	assert!(!out.source.contains("table.insert"));
	assert!(out.source.contains("// entries: 0 (explicit: 0, derived: 0)"));
}

#[test]
fn configured_names_are_used() {
	let config = LutConfig {
		static_name: "HANDLERS".into(),
		accessor_name: "retainer_for".into(),
		cache_type_name: "Handlers".into(),
		runtime_path: "crate::rt".into(),
		..LutConfig::default()
	};
	let out = TableEmitter::new(&config)
		.emit(&explicit(&[("app.A", "crate::ARetainer")]), &DerivedMap::new())
		.unwrap();

	assert!(out.source.contains("static HANDLERS: ::std::sync::LazyLock<crate::rt::HandlerTable>"));
	assert!(out.source.contains("pub fn retainer_for<H: ::std::any::Any>"));
	assert!(out.source.contains("impl crate::rt::RetainerCache for Handlers {"));
	assert!(out.source.contains("\t\tHANDLERS.get_raw(type_name)\n"));
}

#[test]
fn type_names_are_escaped_as_literals() {
	let config = LutConfig::default();
	let out = TableEmitter::new(&config)
		.emit(&explicit(&[("app.\"Quoted\"\\Name", "crate::Q")]), &DerivedMap::new())
		.unwrap();
	assert!(out.source.contains(r#"table.insert("app.\"Quoted\"\\Name", &crate::Q);"#));
}

#[test]
fn ancestor_comment_stays_on_its_line() {
	let config = LutConfig::default();
	let out = TableEmitter::new(&config)
		.emit(
			&ExplicitMap::new(),
			&derived(&[("app.B", "crate::ARetainer", "app.A\ncompile_error!(\"x\");")]),
		)
		.unwrap();

	assert!(
		out.source
			.contains(r#"table.insert("app.B", &crate::ARetainer); // inherited from app.A\ncompile_error!(\"x\");"#)
	);
	assert!(!out.source.lines().any(|l| l.trim_start().starts_with("compile_error!")));
}

#[test]
fn invalid_config_aborts_before_rendering() {
	let config = LutConfig {
		accessor_name: "fn".into(),
		..LutConfig::default()
	};
	let err = TableEmitter::new(&config)
		.emit(&ExplicitMap::new(), &DerivedMap::new())
		.unwrap_err();
	assert!(matches!(err, LutError::InvalidIdentifier { field: "accessor_name", .. }));
}

#[test]
fn overlapping_keys_are_a_merge_conflict() {
	let err = merge(
		&explicit(&[("app.A", "crate::ARetainer")]),
		&derived(&[("app.A", "crate::BaseRetainer", "app.Base")]),
	)
	.unwrap_err();

	match err {
		LutError::MergeConflict {
			type_name,
			explicit,
			derived,
		} => {
			assert_eq!(type_name, "app.A");
			assert_eq!(explicit, "crate::ARetainer");
			assert_eq!(derived, "crate::BaseRetainer");
		}
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn merge_keeps_origin() {
	let table = merge(
		&explicit(&[("app.A", "crate::ARetainer")]),
		&derived(&[("app.B", "crate::ARetainer", "app.A")]),
	)
	.unwrap();

	assert_eq!(table.entry("app.A").unwrap().origin, Origin::Explicit);
	assert_eq!(
		table.entry("app.B").unwrap().origin,
		Origin::Derived {
			ancestor: "app.A".into()
		}
	);
	let names: Vec<&str> = table.iter().map(|a| a.type_name.as_str()).collect();
	assert_eq!(names, ["app.A", "app.B"]);
}

#[test]
fn repeated_emission_is_byte_identical() {
	let config = LutConfig::default();
	let e = explicit(&[("app.Z", "crate::Z"), ("app.M", "crate::M"), ("app.A", "crate::A")]);
	let d = derived(&[("app.N", "crate::M", "app.M"), ("app.B", "crate::A", "app.A")]);

	let first = TableEmitter::new(&config).emit(&e, &d).unwrap();
	let second = TableEmitter::new(&config).emit(&e, &d).unwrap();
	assert_eq!(first.source, second.source);
}
