// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field descriptors and the erased `FieldBase` handle.

use std::any::TypeId;
use std::fmt;
use std::mem;

/// Uniform view of one registered field of `T`.
///
/// Only the operations that are the same for every field live here (name,
/// offset, erased type identity). The field's original type is recovered through
/// the placeholder table, not through this handle.
///
/// # Safety
///
/// The registry writes and borrows values through `offset()` without further
/// checks. Implementors must guarantee that `offset()` is the byte offset of a
/// field of `T` whose type is the one identified by `type_id()`, and that
/// `size()`/`align()` describe that type. `Field<T, FT>` (built by the
/// registration macros) is the provided implementor; a hand-written descriptor
/// cannot be plugged in without `unsafe`:
///
/// ```compile_fail,E0200
/// use refl::{FieldBase, Registry};
/// use std::any::TypeId;
///
/// struct Pair {
///     a: u32,
///     b: u32,
/// }
///
/// struct Forged;
///
/// impl FieldBase<Pair> for Forged {
///     fn name(&self) -> &'static str { "a" }
///     fn offset(&self) -> usize { 0 }
///     fn type_id(&self) -> TypeId { TypeId::of::<u64>() }
///     fn type_name(&self) -> &'static str { "u64" }
///     fn size(&self) -> usize { 8 }
///     fn align(&self) -> usize { 8 }
///     fn projected_offset(&self, _: &Pair) -> usize { 0 }
/// }
///
/// let fields: Vec<Box<dyn FieldBase<Pair>>> = vec![Box::new(Forged)];
/// let registry = Registry::with_type_name("Pair", fields);
/// # let _ = registry;
/// ```
pub unsafe trait FieldBase<T>: Send + Sync {
    fn name(&self) -> &'static str;

    /// Byte offset of the field inside `T`.
    fn offset(&self) -> usize;

    fn type_id(&self) -> TypeId;

    fn type_name(&self) -> &'static str;

    fn size(&self) -> usize;

    fn align(&self) -> usize;

    /// Offset observed by projecting `owner` through the field accessor.
    /// Must equal `offset()`.
    fn projected_offset(&self, owner: &T) -> usize;
}

/// Descriptor for a field of type `FT` inside `T`.
pub struct Field<T, FT> {
    name: &'static str,
    offset: usize,
    project: fn(&T) -> &FT,
}

impl<T, FT> Field<T, FT> {
    /// Create a descriptor.
    ///
    /// `project` is the field accessor (`|owner| &owner.field`). Besides backing
    /// `projected_offset`, it pins `FT` to the field's declared type: a wrong
    /// `FT` fails to type-check.
    ///
    /// # Safety
    ///
    /// `offset` must be `core::mem::offset_of!(T, field)` for the field that
    /// `project` returns. The registry writes values of type `FT` at that offset.
    pub const unsafe fn new(name: &'static str, offset: usize, project: fn(&T) -> &FT) -> Self {
        Self {
            name,
            offset,
            project,
        }
    }
}

// SAFETY: `Field::new` requires `offset` to be the offset of the field that
// `project` returns, and `project` fixes that field's type to `FT`.
unsafe impl<T: 'static, FT: 'static> FieldBase<T> for Field<T, FT> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn type_id(&self) -> TypeId {
        TypeId::of::<FT>()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<FT>()
    }

    fn size(&self) -> usize {
        mem::size_of::<FT>()
    }

    fn align(&self) -> usize {
        mem::align_of::<FT>()
    }

    fn projected_offset(&self, owner: &T) -> usize {
        let base = owner as *const T as usize;
        let field = (self.project)(owner) as *const FT as usize;
        field - base
    }
}

impl<T> fmt::Debug for dyn FieldBase<T> + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name())
            .field("offset", &self.offset())
            .field("type", &self.type_name())
            .finish()
    }
}
