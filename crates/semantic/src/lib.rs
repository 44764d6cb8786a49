// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sql-analyzer - Rewrite Passes
//!
//! This crate implements the rule-based rewrite layer over the query
//! tree: a generic in-place visitor, a pass pipeline, and the concrete
//! OR-of-LIKE consolidation pass.
//!
//! Everything here is single-threaded and synchronous. A pass either
//! completes or raises an error that aborts the analysis of the current
//! query; there is no partial progress to resume.

pub mod error;
pub mod or_like_pass;
pub mod pass_manager;
pub mod visitor;

pub use error::{SemanticError, SemanticResult};
pub use or_like_pass::OrLikeConsolidationPass;
pub use pass_manager::{default_passes, QueryTreePassManager};
pub use visitor::{visit_depth_first, QueryTreePass};
