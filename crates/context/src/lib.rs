// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sql-analyzer - Execution Context
//!
//! The execution context is the opaque handle the analysis layer receives
//! from the session layer. This layer only consults it for settings; the
//! surrounding system attaches whatever else a query execution needs.
//!
//! One context belongs to one query execution. The analysis layer never
//! mutates it.

pub mod settings;

pub use settings::Settings;

/// Per-query execution context
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    settings: Settings,
}

impl ExecutionContext {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_settings() {
        let context = ExecutionContext::default();
        assert!(context.settings().optimize_or_like_chain);
    }
}
