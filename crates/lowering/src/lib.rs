// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sql-analyzer - Legacy Lowering
//!
//! This crate lowers analyzed query trees back to the legacy surface
//! syntax consumed by compatibility paths. It defines the legacy schema
//! ([`Ast`] and friends) and the lowering walker ([`lower_to_ast`]).

pub mod ast;
pub mod error;
pub mod lower;

pub use ast::{Ast, SelectQuery, SelectWithUnion, Subquery, UnionMode};
pub use error::{LoweringError, LoweringResult};
pub use lower::lower_to_ast;
