//! Inheritance resolution.
//!
//! # Purpose
//!
//! Types that declare no retained state of their own still need a table entry
//! when an ancestor has one, so that a run-time lookup by the concrete type
//! finds the ancestor's retainer. This pass derives those entries.
//!
//! # Mental Model
//!
//! 1. **Enumerate:** every declaration reachable from the roots, including
//!    those nested in classes, is visited once. Only classes without an
//!    explicit association are candidates.
//! 2. **Walk:** for a candidate, follow `superclass` references upward. The
//!    first ancestor that is explicitly associated, or whose outcome is
//!    already known, decides the candidate and every intermediate type on the
//!    walked chain.
//! 3. **Record:** decided outcomes are memoized in [`ResolutionVisitState`], so
//!    each declaration's superclass is queried at most once per run.
//!
//! # Invariants
//!
//! - Nearest associated ancestor wins.
//!   - Enforced in: [`ResolutionVisitState::resolve`] (walk stops at first hit).
//!   - Tested by: `tests::nearest_ancestor_wins`
//! - Explicit associations are never overridden or re-derived.
//!   - Enforced in: [`InheritanceResolver::resolve`] (explicit keys are skipped).
//!   - Tested by: `tests::explicit_entries_are_not_derived`
//! - Walks terminate, even on a malformed graph with an ancestor cycle.
//!   - Enforced in: [`ResolutionVisitState::resolve`] (on-path set).
//!   - Tested by: `tests::ancestor_cycle_terminates_unresolved`
//! - Declarations nested in a non-class are never enumerated.
//!   - Enforced in: `reachable` (only classes are descended into).
//!   - Tested by: `tests::nested_declarations_are_visited`
//! - Outcome does not depend on enumeration order.
//!   - Tested by: `tests::root_order_does_not_change_result`

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use tracing::{debug, info, trace, warn};

use crate::graph::TypeGraph;
use crate::model::{Derived, DerivedMap, ExplicitMap, HandlerRef};

/// Derives associations for unassociated subclasses of associated types.
pub struct InheritanceResolver<'g, G: TypeGraph> {
	graph: &'g G,
	enabled: bool,
}

impl<'g, G: TypeGraph> InheritanceResolver<'g, G> {
	/// `enabled` mirrors the `vectorize_inheritance` option; when false the
	/// resolver derives nothing.
	pub fn new(graph: &'g G, enabled: bool) -> Self {
		Self { graph, enabled }
	}

	/// Returns the derived associations for every class reachable from `roots`.
	///
	/// `explicit` is only read. The result never shares a key with it.
	pub fn resolve(&self, explicit: &ExplicitMap, roots: &[G::Decl]) -> DerivedMap {
		let mut derived = DerivedMap::new();
		if !self.enabled {
			return derived;
		}

		let mut state = ResolutionVisitState::new(self.graph, explicit);
		let mut visited = 0usize;

		for decl in reachable(self.graph, roots) {
			visited += 1;
			if !self.graph.kind(decl).is_class() {
				continue;
			}
			let name = self.graph.qualified_name(decl);
			if explicit.contains_key(name) {
				continue;
			}

			let Some(found) = state.resolve(decl) else {
				trace!(type_name = name, "no associated ancestor");
				continue;
			};
			let ancestor = self.graph.qualified_name(found.ancestor);
			debug!(type_name = name, ancestor, handler = %found.handler, "derived retainer");
			derived.insert(
				name.to_owned(),
				Derived {
					handler: found.handler.clone(),
					ancestor: ancestor.to_owned(),
				},
			);
		}

		info!(
			visited,
			explicit = explicit.len(),
			derived = derived.len(),
			superclass_queries = state.queries,
			"inheritance resolution complete"
		);
		derived
	}
}

/// Every declaration reachable from `roots` through nesting, each exactly
/// once, in depth-first pre-order.
///
/// Only classes are descended into; declarations nested in an interface,
/// enum, annotation or record are not visited.
fn reachable<G: TypeGraph>(graph: &G, roots: &[G::Decl]) -> Vec<G::Decl> {
	let mut seen = HashSet::default();
	let mut order = Vec::new();
	let mut stack: Vec<G::Decl> = roots.iter().rev().copied().collect();

	while let Some(decl) = stack.pop() {
		if !seen.insert(decl) {
			continue;
		}
		order.push(decl);
		if graph.kind(decl).is_class() {
			stack.extend(graph.enclosed(decl).iter().rev().copied());
		}
	}
	order
}

/// The associated ancestor a type resolved to.
#[derive(Debug, Clone, Copy)]
struct Resolved<'a, D> {
	handler: &'a HandlerRef,
	ancestor: D,
}

/// Per-run bookkeeping of decided declarations.
struct ResolutionVisitState<'a, G: TypeGraph> {
	graph: &'a G,
	/// Explicit associations keyed by declaration, for same-declaration matching.
	explicit: HashMap<G::Decl, &'a HandlerRef>,
	/// Outcome for every declaration walked so far; `None` means proven unresolvable.
	decided: HashMap<G::Decl, Option<Resolved<'a, G::Decl>>>,
	queries: usize,
}

impl<'a, G: TypeGraph> ResolutionVisitState<'a, G> {
	fn new(graph: &'a G, explicit: &'a ExplicitMap) -> Self {
		let mut by_decl = HashMap::default();
		for (name, handler) in explicit {
			match graph.find(name) {
				Some(decl) => {
					by_decl.insert(decl, handler);
				}
				None => debug!(type_name = %name, "explicit type not in graph; cannot be an ancestor"),
			}
		}
		Self {
			graph,
			explicit: by_decl,
			decided: HashMap::default(),
			queries: 0,
		}
	}

	/// Resolves `start` to its nearest associated ancestor.
	///
	/// Walks iteratively; the chain of undecided declarations is kept in
	/// `chain` and all of them share the outcome of the walk.
	fn resolve(&mut self, start: G::Decl) -> Option<Resolved<'a, G::Decl>> {
		if let Some(&known) = self.decided.get(&start) {
			return known;
		}

		let mut chain = vec![start];
		let mut on_path: HashSet<G::Decl> = HashSet::default();
		on_path.insert(start);
		let mut cursor = start;

		let outcome = loop {
			self.queries += 1;
			let Some(parent_ref) = self.graph.superclass(cursor) else {
				break None;
			};
			let Some(parent) = self.graph.declaration_of(&parent_ref) else {
				trace!(type_name = self.graph.qualified_name(cursor), ?parent_ref, "superclass outside graph");
				break None;
			};
			if let Some(&handler) = self.explicit.get(&parent) {
				break Some(Resolved {
					handler,
					ancestor: parent,
				});
			}
			if let Some(&known) = self.decided.get(&parent) {
				break known;
			}
			if !self.graph.kind(parent).is_class() {
				break None;
			}
			if !on_path.insert(parent) {
				warn!(
					type_name = self.graph.qualified_name(start),
					cycle_at = self.graph.qualified_name(parent),
					"ancestor cycle; leaving chain unresolved"
				);
				break None;
			}
			chain.push(parent);
			cursor = parent;
		};

		for decl in chain {
			self.decided.insert(decl, outcome);
		}
		outcome
	}
}
