// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type placeholder table and ordinal type recovery.
//!
//! Every reflected type carries two index-aligned views of its fields:
//!
//! - the registry (`crate::registry`) with name/offset descriptors behind a
//!   `dyn FieldBase<T>` handle, and
//! - the placeholder table `Reflect::TYPE_TABLE`, a fixed array of
//!   `(name, variant)` pairs where the variant is a generated closed enum with one
//!   `TypeCarrier<FT>` alternative per field.
//!
//! The handle cannot give back `FT` (it is erased behind the vtable), so type
//! recovery goes through the table instead:
//!
//! - statically, `FieldTypeOf<T, I>` names the declared type of field `I`;
//! - from a table entry, `FieldTypeVariant::accept` does the exhaustive case
//!   split and calls `FieldTypeVisitor::visit::<FT>` with the original type.
//!
//! ```rust
//! use refl::{FieldTypeOf, Reflect};
//!
//! #[derive(Reflect)]
//! struct Sample {
//!     id: u32,
//!     ratio: f64,
//! }
//!
//! let ratio: FieldTypeOf<Sample, 1> = 0.5;
//! let id: FieldTypeOf<Sample, { refl::field_index!(Sample, "id") }> = 7u32;
//! assert_eq!(Sample::FIELD_COUNT, 2);
//! # let _ = (ratio, id);
//! ```

mod carrier;

pub use carrier::TypeCarrier;

use crate::const_str;
use crate::registry::Reflect;
use std::fmt;

/// One alternative per registered field. Implemented by the enum that
/// `#[derive(Reflect)]` / `reflect!` generate.
pub trait FieldTypeVariant: Copy + fmt::Debug + 'static {
    /// Registered field name.
    fn name(&self) -> &'static str;

    /// Ordinal of the field (registration order).
    fn index(&self) -> usize;

    /// Case-split over the alternatives and hand the original field type to `visitor`.
    fn accept<V: FieldTypeVisitor>(&self, visitor: &mut V) -> V::Output;
}

/// Receives the original type of a field as a generic argument.
pub trait FieldTypeVisitor {
    type Output;

    fn visit<FT: 'static>(&mut self, name: &'static str, carrier: TypeCarrier<FT>)
        -> Self::Output;
}

/// Compile-time description of field `I` of a reflected type.
///
/// # Safety
///
/// `OFFSET` must be the byte offset of a field of type `Type` inside `Self`,
/// and `NAME`/`I` must agree with `Reflect::TYPE_TABLE[I]`.
pub unsafe trait FieldAt<const I: usize>: Reflect {
    type Type: 'static;
    const NAME: &'static str;
    const OFFSET: usize;
}

/// Declared type of field `I` of `T`.
pub type FieldTypeOf<T, const I: usize> = <T as FieldAt<I>>::Type;

/// Value-level handle on the declared type of field `I` of `T`.
pub const fn carrier_of<T: FieldAt<I>, const I: usize>() -> TypeCarrier<FieldTypeOf<T, I>> {
    TypeCarrier::new()
}

/// Position of `name` in a placeholder table.
pub const fn find_index<V>(table: &[(&str, V)], name: &str) -> Option<usize> {
    let mut i = 0;
    while i < table.len() {
        if const_str::eq(table[i].0, name) {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Position of `name` in a placeholder table.
///
/// # Panics
///
/// Panics if `name` is not registered. In const context (see `field_index!`)
/// that is a compile error.
pub const fn index_of<V>(table: &[(&str, V)], name: &str) -> usize {
    match find_index(table, name) {
        Some(index) => index,
        None => panic!("field not found in reflected type"),
    }
}

/// Visits every entry of `T`'s placeholder table in ordinal order.
pub fn visit_fields<T: Reflect, V: FieldTypeVisitor>(visitor: &mut V) -> Vec<V::Output> {
    T::TYPE_TABLE
        .iter()
        .map(|(_, variant)| variant.accept(visitor))
        .collect()
}

/// Ordinal of a field resolved at compile time.
///
/// Expands to a `const` expression; an unknown name fails the build.
///
/// ```rust
/// # use refl::Reflect;
/// #[derive(Reflect)]
/// struct Pair {
///     left: i8,
///     right: i16,
/// }
///
/// const RIGHT: usize = refl::field_index!(Pair, "right");
/// assert_eq!(RIGHT, 1);
/// ```
#[macro_export]
macro_rules! field_index {
    ($owner:ty, $name:expr) => {
        $crate::catalogue::index_of(<$owner as $crate::Reflect>::TYPE_TABLE, $name)
    };
}
