use rstest::rstest;

use super::*;

fn graph(toml: &str) -> HierarchyGraph {
	let manifest = Manifest::from_toml_str(toml).expect("manifest parses");
	HierarchyGraph::from_manifest(&manifest).expect("graph builds")
}

#[rstest]
#[case("app.Base", "app.Base", &[])]
#[case("  app.Base ", "app.Base", &[])]
#[case("app.Base<String>", "app.Base", &["String"])]
#[case("app.Map<K, List<V>>", "app.Map", &["K", "List<V>"])]
#[case("app.Map<Map<A, B>, C>", "app.Map", &["Map<A, B>", "C"])]
fn type_ref_parses(#[case] input: &str, #[case] name: &str, #[case] args: &[&str]) {
	let parsed = TypeRef::parse(input).expect("parses");
	assert_eq!(parsed.name, name);
	assert_eq!(parsed.args, args);
}

#[rstest]
#[case("")]
#[case("<String>")]
#[case("app.Base<")]
#[case("app.Base<>")]
#[case("app.Base<String>>")]
#[case("app.Base<A,>")]
#[case("app.Base>")]
fn type_ref_rejects(#[case] input: &str) {
	assert_eq!(TypeRef::parse(input), None);
}

#[test]
fn type_ref_display_round_trips_shape() {
	let parsed = TypeRef::parse("app.Map<K,List<V>>").unwrap();
	assert_eq!(parsed.to_string(), "app.Map<K, List<V>>");
}

#[test]
fn roots_and_nesting() {
	let g = graph(
		r#"
		[[types]]
		name = "app.Outer"

		[[types]]
		name = "app.Outer.Inner"
		enclosing = "app.Outer"

		[[types]]
		name = "app.Other"
		kind = "interface"
		"#,
	);

	assert_eq!(g.len(), 3);
	let names: Vec<&str> = g.roots().iter().map(|&d| g.qualified_name(d)).collect();
	assert_eq!(names, ["app.Outer", "app.Other"]);

	let outer = g.find("app.Outer").unwrap();
	let inner = g.find("app.Outer.Inner").unwrap();
	assert_eq!(g.enclosed(outer), &[inner]);
	assert_eq!(g.kind(g.find("app.Other").unwrap()), TypeKind::Interface);
	assert_eq!(g.kind(inner), TypeKind::Class);
}

#[test]
fn generic_superclass_erases_to_declaration() {
	let g = graph(
		r#"
		[[types]]
		name = "app.Base"

		[[types]]
		name = "app.Child"
		extends = "app.Base<String>"
		"#,
	);

	let base = g.find("app.Base").unwrap();
	let child = g.find("app.Child").unwrap();
	let sup = g.superclass(child).unwrap();

	assert_eq!(sup.args, ["String"]);
	assert_eq!(g.declaration_of(&sup), Some(base));
	assert_ne!(g.declaration_of(&sup), Some(child));

	let other = TypeRef::parse("app.Base<u8>").unwrap();
	assert_ne!(other, sup);
	assert_eq!(g.declaration_of(&other), g.declaration_of(&sup));
	assert!(g.superclass(base).is_none());
}

#[test]
fn superclass_outside_manifest_has_no_declaration() {
	let g = graph(
		r#"
		[[types]]
		name = "app.View"
		extends = "platform.Activity"
		"#,
	);
	let view = g.find("app.View").unwrap();
	let sup = g.superclass(view).unwrap();
	assert_eq!(g.declaration_of(&sup), None);
}

#[test]
fn duplicate_type_is_rejected() {
	let manifest = Manifest::from_toml_str(
		r#"
		[[types]]
		name = "app.A"

		[[types]]
		name = "app.A"
		"#,
	)
	.unwrap();
	let err = HierarchyGraph::from_manifest(&manifest).unwrap_err();
	assert!(matches!(err, ManifestError::DuplicateType(ref n) if n == "app.A"));
}

#[test]
fn unknown_enclosing_is_rejected() {
	let manifest = Manifest::from_toml_str(
		r#"
		[[types]]
		name = "app.A.B"
		enclosing = "app.A"
		"#,
	)
	.unwrap();
	let err = HierarchyGraph::from_manifest(&manifest).unwrap_err();
	assert!(matches!(err, ManifestError::UnknownEnclosing { .. }));
}

#[test]
fn malformed_extends_is_rejected() {
	let manifest = Manifest::from_toml_str(
		r#"
		[[types]]
		name = "app.A"
		extends = "app.Base<"
		"#,
	)
	.unwrap();
	let err = HierarchyGraph::from_manifest(&manifest).unwrap_err();
	assert!(matches!(err, ManifestError::MalformedTypeRef { ref name, .. } if name == "app.A"));
}

#[test]
fn unknown_manifest_keys_are_rejected() {
	let err = Manifest::from_toml_str(
		r#"
		[[types]]
		name = "app.A"
		superclass = "app.B"
		"#,
	)
	.unwrap_err();
	assert!(matches!(err, ManifestError::Parse(_)));
}

#[test]
fn manifest_loads_from_disk() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("hierarchy.toml");
	std::fs::write(
		&path,
		r#"
		[[types]]
		name = "app.A"

		[[associations]]
		type = "app.A"
		handler = "crate::ARetainer"
		"#,
	)
	.unwrap();

	let manifest = Manifest::load(&path).unwrap();
	assert_eq!(manifest.types.len(), 1);
	assert_eq!(manifest.pairs().collect::<Vec<_>>(), [("app.A", "crate::ARetainer")]);

	let missing = Manifest::load(&dir.path().join("missing.toml")).unwrap_err();
	assert!(matches!(missing, ManifestError::Io { .. }));
}
