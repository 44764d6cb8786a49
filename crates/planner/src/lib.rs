// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sql-analyzer - Planner Context
//!
//! Per-query planning state for the analysis layer:
//!
//! - [`PlannerContext`]: column-identifier allocation and registration,
//!   table-expression naming and column catalogs. One per in-flight query
//!   analysis, never shared.
//! - [`GlobalPlannerContext`]: deduplicated subquery-backed sets, shared
//!   by the nested subqueries of one top-level query.
//!
//! Both are constructed fresh per top-level query and passed explicitly
//! through the analysis and planning call chain; there is no process-wide
//! state. Everything is single-threaded; the shared handle to the global
//! context is a plain reference-counted cell.

pub mod context;
pub mod error;
pub mod global_context;
pub mod identifier;
pub mod set;
pub mod table_expression;

pub use context::PlannerContext;
pub use error::{PlannerError, PlannerResult};
pub use global_context::{GlobalPlannerContext, GlobalPlannerContextPtr};
pub use identifier::ColumnIdentifier;
pub use set::{PlannedSet, SubqueryForSet};
pub use table_expression::TableExpressionColumns;
