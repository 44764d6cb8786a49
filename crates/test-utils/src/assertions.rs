// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Assertion helpers for query tree tests

use sql_analyzer_ir::{dump_tree, tree_equal, QueryTreeNodePtr};

/// Assert two trees are structurally equal, printing both dumps on failure.
pub fn assert_trees_equal(expected: &QueryTreeNodePtr, actual: &QueryTreeNodePtr) {
    assert!(
        tree_equal(expected, actual),
        "query trees differ\n--- expected ---\n{}\n--- actual ---\n{}",
        dump_tree(expected),
        dump_tree(actual),
    );
}

/// Assert the diagnostic dump of a tree contains the given fragment.
pub fn assert_dump_contains(node: &QueryTreeNodePtr, fragment: &str) {
    let dump = dump_tree(node);
    assert!(
        dump.contains(fragment),
        "fragment '{}' not found in dump:\n{}",
        fragment,
        dump,
    );
}
