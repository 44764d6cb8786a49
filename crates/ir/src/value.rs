// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Literal values
//!
//! This module defines the tagged literal value carried by constant nodes
//! of the query tree, together with the unified [`DataType`] model used for
//! node result types and column catalogs.
//!
//! Values know their own [`DataType`], so a constant node can be built from
//! a bare value without spelling the type out at every call site.

use serde::{Deserialize, Serialize};
use std::fmt;

/// SQL data types (unified across dialects)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DataType {
    Boolean,
    UInt64,
    Int64,
    Float64,
    String,
    Array(Box<DataType>),
}

impl DataType {
    /// Whether this type is a string type.
    ///
    /// The OR-of-LIKE consolidation pass uses this to decide whether a
    /// constant pattern argument is eligible for rewriting.
    pub fn is_string(&self) -> bool {
        matches!(self, DataType::String)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Boolean => write!(f, "Boolean"),
            DataType::UInt64 => write!(f, "UInt64"),
            DataType::Int64 => write!(f, "Int64"),
            DataType::Float64 => write!(f, "Float64"),
            DataType::String => write!(f, "String"),
            DataType::Array(inner) => write!(f, "Array({})", inner),
        }
    }
}

/// A tagged literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Value {
    Boolean(bool),
    UInt64(u64),
    Int64(i64),
    Float64(f64),
    String(String),
    Array(Vec<Value>),
}

impl Value {
    /// The data type of this value.
    ///
    /// Empty arrays default to `Array(String)`; the analysis layer only
    /// synthesizes string arrays, so there is nothing better to infer from.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Boolean(_) => DataType::Boolean,
            Value::UInt64(_) => DataType::UInt64,
            Value::Int64(_) => DataType::Int64,
            Value::Float64(_) => DataType::Float64,
            Value::String(_) => DataType::String,
            Value::Array(items) => {
                let element = items
                    .first()
                    .map(Value::data_type)
                    .unwrap_or(DataType::String);
                DataType::Array(Box::new(element))
            }
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Renders the value the way it appears in semantic names and tree
    /// dumps: strings quoted, arrays bracketed, scalars bare.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(v) => write!(f, "{}", v),
            Value::UInt64(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "'{}'", v),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_data_type() {
        assert_eq!(Value::Boolean(true).data_type(), DataType::Boolean);
        assert_eq!(Value::String("x".into()).data_type(), DataType::String);
        assert_eq!(
            Value::Array(vec![Value::String("a".into())]).data_type(),
            DataType::Array(Box::new(DataType::String)),
        );
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Boolean(false).to_string(), "false");
        assert_eq!(Value::String("a%".into()).to_string(), "'a%'");
        assert_eq!(
            Value::Array(vec![Value::String("^a.*$".into()), Value::UInt64(3)]).to_string(),
            "['^a.*$', 3]",
        );
    }

    #[test]
    fn test_data_type_display() {
        assert_eq!(
            DataType::Array(Box::new(DataType::String)).to_string(),
            "Array(String)",
        );
    }

    #[test]
    fn test_value_serde_round_trip() {
        let value = Value::Array(vec![Value::String("^a.*".into()), Value::Boolean(true)]);
        let json = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
