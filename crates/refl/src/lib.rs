// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # refl - compile-time field reflection for Rust structs
//!
//! Registers a struct's fields (name, byte offset, original type) once, then lets
//! generic code read and write fields by name and recover each field's type at
//! compile time from its ordinal. A companion matcher decides at compile time
//! whether a type fits a pattern with wildcards.
//!
//! ## Quick Start
//!
//! ```rust
//! use refl::{FieldTypeOf, Reflect};
//!
//! #[derive(Reflect, Default)]
//! struct Foo {
//!     i: i32,
//!     d: f64,
//! }
//!
//! #[derive(Reflect, Default)]
//! struct Bar {
//!     foo: Foo,
//!     name: String,
//! }
//!
//! let mut bar = Bar::default();
//! Bar::registry().set_field_value(&mut bar, "foo", Foo { i: 10, d: 3.14 })?;
//! Bar::registry().set_field_value(&mut bar, "name", String::from("xxx"))?;
//! assert_eq!(bar.foo.i, 10);
//! assert_eq!(bar.name, "xxx");
//!
//! // Ordinal 0 of Foo is an i32, known to the compiler.
//! let recovered: FieldTypeOf<Foo, 0> = 42;
//! # let _ = recovered;
//! # Ok::<(), refl::ReflectError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |  #[derive(Reflect)] / reflect!(T as TField { a: A, b: B })          |
//! +----------------------------------+----------------------------------+
//! |  Registry<T>  (name/offset path) |  TYPE_TABLE + FieldAt<I>         |
//! |  Vec<Box<dyn FieldBase<T>>>      |  (type recovery path)            |
//! |  set/get by name, TypeId-checked |  enum TField { a(TypeCarrier<A>) }|
//! +----------------------------------+----------------------------------+
//! |  matcher: TypeShape + const fn shape_matches (independent)          |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Modules Overview
//!
//! - [`registry`] - per-type descriptor list, by-name access
//! - [`catalogue`] - placeholder table, `FieldAt`, `FieldTypeOf`, visitors
//! - [`matcher`] - structural fuzzy matching with [`DontCare`] wildcards
//!
//! ## Features
//!
//! - `derive` (default): `#[derive(Reflect)]` and `#[derive(TypeShape)]`
//!
//! ## Limitations
//!
//! - Reflected types must be `'static` and non-generic (one registry per concrete type).
//! - Type recovery is by ordinal (or by compile-time name via [`field_index!`]).
//!   Reverse lookup from a type to a field is not provided: two fields may share a type.

// Lets the derives' `::refl::` paths resolve inside this crate's own tests.
extern crate self as refl;

pub mod catalogue;
mod const_str;
pub mod error;
pub mod matcher;
pub mod registry;

pub use catalogue::{
    carrier_of, visit_fields, FieldAt, FieldTypeOf, FieldTypeVariant, FieldTypeVisitor,
    TypeCarrier,
};
pub use error::{ReflectError, Result};
pub use matcher::{
    is_a, is_fuzzy_matched, is_fuzzy_matched_with, shape_eq, shape_matches, DontCare, FuzzyMatch,
    MatchPolicy, Shape, TypeShape,
};
pub use registry::{get_field, get_field_mut, set_field, Field, FieldBase, Reflect, Registry};

#[cfg(feature = "derive")]
pub use refl_codegen::{Reflect, TypeShape};
