// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type for registry lookups and by-name field access.
//!
//! Everything that can be decided at compile time (out-of-range ordinals,
//! mismatched field types on ordinal access, unknown `field_index!` names)
//! is rejected by the compiler. `ReflectError` only covers lookups whose key
//! is a runtime string or index.

use std::fmt;

/// Errors for registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReflectError {
    /// No registered field carries this name.
    FieldNotFound {
        /// Owning type (as reported by `std::any::type_name`).
        type_name: &'static str,
        /// Name that was looked up.
        field: String,
    },
    /// The value type does not match the field's declared type.
    TypeMismatch {
        /// Field that was addressed.
        field: String,
        /// Declared type of the field.
        expected: &'static str,
        /// Type of the supplied value.
        got: &'static str,
    },
    /// Ordinal past the end of the registry.
    IndexOutOfBounds { index: usize, length: usize },
}

impl fmt::Display for ReflectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldNotFound { type_name, field } => {
                write!(f, "Field not found: {}::{}", type_name, field)
            }
            Self::TypeMismatch {
                field,
                expected,
                got,
            } => write!(
                f,
                "Type mismatch on field '{}': expected {}, got {}",
                field, expected, got
            ),
            Self::IndexOutOfBounds { index, length } => {
                write!(f, "Field index out of bounds: {} >= {}", index, length)
            }
        }
    }
}

impl std::error::Error for ReflectError {}

/// Result alias for registry operations.
pub type Result<T, E = ReflectError> = std::result::Result<T, E>;
