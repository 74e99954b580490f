//! Build-time generator for the type → retainer lookup table.
//!
//! An upstream stage produces one retainer per type that declares retained
//! state. This crate turns those `(type, retainer)` pairs and the program's
//! type hierarchy into a single generated table, so that at run time any
//! type, including a subclass that declares nothing itself, resolves to the
//! retainer of its nearest associated ancestor.
//!
//! # Pipeline
//!
//! 1. [`collect()`] - explicit pairs into an [`ExplicitMap`], rejecting conflicts.
//! 2. [`InheritanceResolver`] - optional; derives entries for unassociated
//!    classes by walking their ancestor chains through a [`TypeGraph`].
//! 3. [`TableEmitter`] - merges both maps and renders Rust source.
//!
//! [`generate`] runs all three. [`compile::BuildCtx`] wires the result into a
//! build script.

pub mod collect;
pub mod compile;
pub mod config;
pub mod emit;
pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod model;
pub mod resolve;

pub use collect::collect;
pub use config::LutConfig;
pub use emit::{GeneratedTable, TableEmitter};
pub use error::{ConfigError, LutError, ManifestError, Result};
pub use graph::{TypeGraph, TypeKind};
pub use hierarchy::{HierarchyGraph, Manifest};
pub use model::{Association, AssociationTable, DerivedMap, ExplicitMap, HandlerRef, Origin};
pub use resolve::InheritanceResolver;
use tracing::info_span;

/// Runs one generation: collect, resolve (if enabled), emit.
///
/// Any error aborts the run; no partial table is returned.
pub fn generate<G, I, N, H>(graph: &G, roots: &[G::Decl], pairs: I, config: &LutConfig) -> Result<GeneratedTable>
where
	G: TypeGraph,
	I: IntoIterator<Item = (N, H)>,
	N: Into<String>,
	H: AsRef<str>,
{
	let _span = info_span!("generate", vectorize_inheritance = config.vectorize_inheritance).entered();

	config.validate()?;
	let explicit = collect(pairs)?;
	let derived = InheritanceResolver::new(graph, config.vectorize_inheritance).resolve(&explicit, roots);
	TableEmitter::new(config).emit(&explicit, &derived)
}

/// [`generate`] over a manifest's own hierarchy and associations.
pub fn generate_from_manifest(manifest: &Manifest, config: &LutConfig) -> Result<GeneratedTable> {
	let graph = HierarchyGraph::from_manifest(manifest)?;
	generate(&graph, graph.roots(), manifest.pairs(), config)
}
