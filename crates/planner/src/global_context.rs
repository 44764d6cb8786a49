// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Global planner context
//!
//! Shared by the nested subqueries of one top-level query, constructed
//! fresh per query and discarded with it. Registration is first-writer
//! wins: a later registration under an equal key is an idempotent lookup,
//! not an update. If two logically different set sources ever collide on
//! the structural hash, the first-registered set is returned for both;
//! this behavior is inherited from the source system as-is.

use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::Rc;

use sql_analyzer_ir::TreeHash;

use crate::set::{PlannedSet, SubqueryForSet};

/// Shared handle to the per-top-level-query context
pub type GlobalPlannerContextPtr = Rc<RefCell<GlobalPlannerContext>>;

/// Registry of deduplicated sets and deferred subqueries
#[derive(Debug, Default)]
pub struct GlobalPlannerContext {
    set_source_to_set: HashMap<TreeHash, Rc<PlannedSet>>,
    subqueries_for_sets: HashMap<String, SubqueryForSet>,
}

impl GlobalPlannerContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_ptr() -> GlobalPlannerContextPtr {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Register the set built from the source with the given structural
    /// hash. The first registration wins; later ones are discarded so that
    /// re-analysis of an already-planned subtree does not re-materialize
    /// the underlying subquery.
    pub fn register_set(&mut self, source_hash: TreeHash, set: Rc<PlannedSet>) {
        match self.set_source_to_set.entry(source_hash) {
            Entry::Vacant(slot) => {
                slot.insert(set);
            }
            Entry::Occupied(_) => {
                tracing::debug!(?source_hash, "set already registered, discarding duplicate");
            }
        }
    }

    /// The first-registered set for the hash, if any.
    pub fn get_set(&self, source_hash: TreeHash) -> Option<Rc<PlannedSet>> {
        self.set_source_to_set.get(&source_hash).cloned()
    }

    /// Register a deferred subquery descriptor. First registration wins.
    pub fn register_subquery_for_set(&mut self, key: String, subquery_for_set: SubqueryForSet) {
        match self.subqueries_for_sets.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(subquery_for_set);
            }
            Entry::Occupied(slot) => {
                tracing::debug!(
                    key = %slot.key(),
                    "subquery already registered for set, discarding duplicate",
                );
            }
        }
    }

    pub fn subqueries_for_sets(&self) -> &HashMap<String, SubqueryForSet> {
        &self.subqueries_for_sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sql_analyzer_ir::DataType;

    #[test]
    fn test_first_registered_set_wins() {
        let mut context = GlobalPlannerContext::new();
        let hash = TreeHash(42);
        let first = Rc::new(PlannedSet::new(vec![DataType::UInt64]));
        let second = Rc::new(PlannedSet::new(vec![DataType::String]));

        context.register_set(hash, first.clone());
        context.register_set(hash, second);

        let stored = context.get_set(hash).unwrap();
        assert!(Rc::ptr_eq(&stored, &first));
    }

    #[test]
    fn test_get_set_unknown_hash() {
        let context = GlobalPlannerContext::new();
        assert!(context.get_set(TreeHash(7)).is_none());
    }
}
