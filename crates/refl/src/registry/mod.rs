// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-type field registry.
//!
//! A `Registry<T>` is the ordered list of `T`'s field descriptors. It is built
//! once per type (first call to `Reflect::registry()`) and then only read. Field
//! values are written through it on caller-supplied instances:
//!
//! ```rust
//! use refl::Reflect;
//!
//! #[derive(Reflect, Default)]
//! struct Foo {
//!     i: i32,
//!     d: f64,
//! }
//!
//! let mut foo = Foo::default();
//! Foo::registry().set_field_value(&mut foo, "i", 10).unwrap();
//! Foo::registry().set_field_value(&mut foo, "d", 3.14).unwrap();
//! assert_eq!(foo.i, 10);
//! assert_eq!(foo.d, 3.14);
//!
//! // Unknown names and wrong value types are reported, not ignored.
//! assert!(Foo::registry().set_field_value(&mut foo, "x", 1).is_err());
//! assert!(Foo::registry().set_field_value(&mut foo, "i", 1u8).is_err());
//! ```

mod field;
mod macros;

pub use field::{Field, FieldBase};

use crate::catalogue::{FieldAt, FieldTypeOf, FieldTypeVariant};
use crate::error::{ReflectError, Result};
use std::any::TypeId;
use std::fmt;

/// A type whose fields are registered.
///
/// Implement it with `#[derive(Reflect)]` or `reflect!`.
///
/// # Safety
///
/// `registry()` must return descriptors whose offsets and types are those of
/// `Self`'s fields, in the same order as `TYPE_TABLE`. The registry writes
/// through those offsets without further checks.
pub unsafe trait Reflect: Sized + 'static {
    /// Closed catalogue of the field types (one alternative per field).
    type FieldType: FieldTypeVariant;

    const TYPE_NAME: &'static str;

    /// Placeholder table, index-aligned with `registry()`.
    const TYPE_TABLE: &'static [(&'static str, Self::FieldType)];

    const FIELD_COUNT: usize = Self::TYPE_TABLE.len();

    /// Process-wide registry, built on first use.
    fn registry() -> &'static Registry<Self>;
}

/// Ordered catalogue of `T`'s field descriptors.
pub struct Registry<T> {
    type_name: &'static str,
    fields: Vec<Box<dyn FieldBase<T>>>,
}

impl<T: Reflect> Registry<T> {
    /// Build the registry of a reflected type from field tokens, in ordinal order.
    ///
    /// Errors and logs report the type as `T::TYPE_NAME`.
    pub fn new(fields: Vec<Box<dyn FieldBase<T>>>) -> Self {
        Self::with_type_name(T::TYPE_NAME, fields)
    }
}

impl<T: 'static> Registry<T> {
    /// Build a registry reported under `type_name`.
    pub fn with_type_name(type_name: &'static str, fields: Vec<Box<dyn FieldBase<T>>>) -> Self {
        for (index, field) in fields.iter().enumerate() {
            if fields[..index].iter().any(|f| f.name() == field.name()) {
                log::warn!(
                    "[refl] duplicate field name '{}' in {} (index {}), lookups resolve to the first",
                    field.name(),
                    type_name,
                    index
                );
            }
        }
        log::debug!("[refl] registered {} field(s) for {}", fields.len(), type_name);
        Self { type_name, fields }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Descriptors in ordinal order.
    pub fn fields(&self) -> impl Iterator<Item = &dyn FieldBase<T>> + '_ {
        self.fields.iter().map(|f| f.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    /// Descriptor by name.
    pub fn field(&self, name: &str) -> Result<&dyn FieldBase<T>> {
        match self.fields.iter().find(|f| f.name() == name) {
            Some(field) => Ok(field.as_ref()),
            None => {
                log::debug!("[refl] no field '{}' in {}", name, self.type_name());
                Err(ReflectError::FieldNotFound {
                    type_name: self.type_name(),
                    field: name.to_string(),
                })
            }
        }
    }

    /// Descriptor by ordinal.
    pub fn field_at(&self, index: usize) -> Result<&dyn FieldBase<T>> {
        self.fields
            .get(index)
            .map(|f| f.as_ref())
            .ok_or(ReflectError::IndexOutOfBounds {
                index,
                length: self.fields.len(),
            })
    }

    /// Overwrite the field `name` of `instance` with `value`.
    ///
    /// The previous value is dropped in place.
    pub fn set_field_value<V: 'static>(&self, instance: &mut T, name: &str, value: V) -> Result<()> {
        let field = self.typed_field::<V>(name)?;
        debug_assert_eq!(field.projected_offset(instance), field.offset());

        // SAFETY: `field` belongs to `T` (Reflect contract), so `offset` addresses a
        // field of type `V` inside `*instance` (TypeId checked by `typed_field`).
        unsafe {
            let slot = (instance as *mut T)
                .cast::<u8>()
                .add(field.offset())
                .cast::<V>();
            *slot = value;
        }

        log::trace!("[refl] set {}::{}", self.type_name(), name);
        Ok(())
    }

    /// Borrow the field `name` of `instance` as a `V`.
    pub fn get_field_value<'a, V: 'static>(&self, instance: &'a T, name: &str) -> Result<&'a V> {
        let field = self.typed_field::<V>(name)?;
        debug_assert_eq!(field.projected_offset(instance), field.offset());

        // SAFETY: see `set_field_value`.
        unsafe {
            let slot = (instance as *const T)
                .cast::<u8>()
                .add(field.offset())
                .cast::<V>();
            Ok(&*slot)
        }
    }

    /// Mutably borrow the field `name` of `instance` as a `V`.
    pub fn get_field_value_mut<'a, V: 'static>(
        &self,
        instance: &'a mut T,
        name: &str,
    ) -> Result<&'a mut V> {
        let field = self.typed_field::<V>(name)?;
        debug_assert_eq!(field.projected_offset(instance), field.offset());

        // SAFETY: see `set_field_value`.
        unsafe {
            let slot = (instance as *mut T)
                .cast::<u8>()
                .add(field.offset())
                .cast::<V>();
            Ok(&mut *slot)
        }
    }

    fn typed_field<V: 'static>(&self, name: &str) -> Result<&dyn FieldBase<T>> {
        let field = self.field(name)?;
        if field.type_id() != TypeId::of::<V>() {
            return Err(ReflectError::TypeMismatch {
                field: name.to_string(),
                expected: field.type_name(),
                got: std::any::type_name::<V>(),
            });
        }
        Ok(field)
    }
}

impl<T: 'static> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("type", &self.type_name())
            .field("fields", &self.fields)
            .finish()
    }
}

/// Borrow field `I` of `instance`.
pub fn get_field<T: FieldAt<I>, const I: usize>(instance: &T) -> &FieldTypeOf<T, I> {
    // SAFETY: `FieldAt` guarantees `OFFSET` addresses a `FieldTypeOf<T, I>` inside `T`.
    unsafe {
        &*(instance as *const T)
            .cast::<u8>()
            .add(T::OFFSET)
            .cast::<FieldTypeOf<T, I>>()
    }
}

/// Mutably borrow field `I` of `instance`.
pub fn get_field_mut<T: FieldAt<I>, const I: usize>(instance: &mut T) -> &mut FieldTypeOf<T, I> {
    // SAFETY: see `get_field`.
    unsafe {
        &mut *(instance as *mut T)
            .cast::<u8>()
            .add(T::OFFSET)
            .cast::<FieldTypeOf<T, I>>()
    }
}

/// Overwrite field `I` of `instance`. The value type is checked at compile time.
pub fn set_field<T: FieldAt<I>, const I: usize>(instance: &mut T, value: FieldTypeOf<T, I>) {
    *get_field_mut::<T, I>(instance) = value;
}
