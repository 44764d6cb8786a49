// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Per-table-expression column catalog
//!
//! One catalog exists per table-expression node of the query tree. It
//! records the columns the expression exposes, which of them are alias
//! columns, and the identifier assigned to each name. A name is bound at
//! most once across the plain and alias sets combined.

use std::collections::{HashMap, HashSet};

use sql_analyzer_ir::NameAndType;

use crate::error::{PlannerError, PlannerResult};
use crate::identifier::ColumnIdentifier;

/// Columns available from one table expression
#[derive(Debug, Clone, Default)]
pub struct TableExpressionColumns {
    /// Ordered (name, type) list
    columns: Vec<NameAndType>,

    /// Plain column names
    column_names: HashSet<String>,

    /// Alias column names
    alias_column_names: HashSet<String>,

    /// Name to assigned identifier
    column_name_to_identifier: HashMap<String, ColumnIdentifier>,
}

impl TableExpressionColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` is known, as either a plain or an alias column.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.contains(name) || self.alias_column_names.contains(name)
    }

    /// Record a column and its identifier.
    ///
    /// Inserting a name that is already present is an internal-invariant
    /// violation.
    pub fn add_column(
        &mut self,
        column: NameAndType,
        identifier: ColumnIdentifier,
    ) -> PlannerResult<()> {
        if self.has_column(&column.name) {
            return Err(PlannerError::DuplicateColumnName(column.name));
        }
        self.insert(column, identifier);
        Ok(())
    }

    /// Idempotent variant of [`add_column`](Self::add_column) for
    /// multi-path traversals that reach the same table expression more
    /// than once.
    pub fn add_column_if_not_exists(&mut self, column: NameAndType, identifier: ColumnIdentifier) {
        if self.has_column(&column.name) {
            return;
        }
        self.insert(column, identifier);
    }

    pub fn add_alias_column_name(&mut self, name: impl Into<String>) {
        self.alias_column_names.insert(name.into());
    }

    pub fn columns(&self) -> &[NameAndType] {
        &self.columns
    }

    pub fn column_names(&self) -> &HashSet<String> {
        &self.column_names
    }

    pub fn alias_column_names(&self) -> &HashSet<String> {
        &self.alias_column_names
    }

    pub fn column_identifiers(&self) -> &HashMap<String, ColumnIdentifier> {
        &self.column_name_to_identifier
    }

    /// Identifier for `name`; absence is an internal-invariant violation.
    pub fn get_column_identifier(&self, name: &str) -> PlannerResult<&ColumnIdentifier> {
        self.column_name_to_identifier
            .get(name)
            .ok_or_else(|| PlannerError::ColumnIdentifierMissing(name.to_string()))
    }

    /// Identifier for `name`, or `None` when it was never assigned.
    pub fn find_column_identifier(&self, name: &str) -> Option<&ColumnIdentifier> {
        self.column_name_to_identifier.get(name)
    }

    fn insert(&mut self, column: NameAndType, identifier: ColumnIdentifier) {
        self.column_names.insert(column.name.clone());
        self.column_name_to_identifier
            .insert(column.name.clone(), identifier);
        self.columns.push(column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sql_analyzer_ir::DataType;

    fn identifier(value: &str) -> ColumnIdentifier {
        ColumnIdentifier::new(value.to_string())
    }

    #[test]
    fn test_add_column_twice_is_an_invariant_violation() {
        let mut catalog = TableExpressionColumns::new();
        catalog
            .add_column(NameAndType::new("id", DataType::UInt64), identifier("c0"))
            .unwrap();

        let err = catalog
            .add_column(NameAndType::new("id", DataType::UInt64), identifier("c1"))
            .unwrap_err();
        assert_eq!(err, PlannerError::DuplicateColumnName("id".to_string()));
    }

    #[test]
    fn test_add_column_if_not_exists_is_idempotent() {
        let mut catalog = TableExpressionColumns::new();
        catalog.add_column_if_not_exists(NameAndType::new("id", DataType::UInt64), identifier("c0"));
        catalog.add_column_if_not_exists(NameAndType::new("id", DataType::String), identifier("c1"));

        assert_eq!(catalog.columns().len(), 1);
        assert_eq!(catalog.columns()[0].data_type, DataType::UInt64);
        assert_eq!(catalog.get_column_identifier("id").unwrap(), &identifier("c0"));
    }

    #[test]
    fn test_alias_name_blocks_plain_insertion() {
        let mut catalog = TableExpressionColumns::new();
        catalog.add_alias_column_name("shadow");

        let err = catalog
            .add_column(
                NameAndType::new("shadow", DataType::String),
                identifier("c0"),
            )
            .unwrap_err();
        assert_eq!(err, PlannerError::DuplicateColumnName("shadow".to_string()));
        assert!(catalog.has_column("shadow"));
    }

    #[test]
    fn test_columns_keep_insertion_order() {
        let mut catalog = TableExpressionColumns::new();
        for name in ["b", "a", "c"] {
            catalog
                .add_column(NameAndType::new(name, DataType::String), identifier(name))
                .unwrap();
        }
        let names: Vec<_> = catalog.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_get_column_identifier_missing_is_an_invariant_violation() {
        let catalog = TableExpressionColumns::new();
        assert_eq!(
            catalog.get_column_identifier("ghost").unwrap_err(),
            PlannerError::ColumnIdentifierMissing("ghost".to_string()),
        );
        assert!(catalog.find_column_identifier("ghost").is_none());
    }
}
