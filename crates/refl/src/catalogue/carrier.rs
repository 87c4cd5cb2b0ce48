// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Zero-sized type carrier.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem;

/// Names a type without holding a value of it.
///
/// `TypeCarrier<T>` is zero-sized and `Copy + Send + Sync` for every `T`, including
/// raw pointers and types without a `Default` impl. Nothing here ever materializes
/// a `T`.
pub struct TypeCarrier<T>(PhantomData<fn() -> T>);

impl<T> TypeCarrier<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    /// Typed null handle. Never dereference it.
    pub const fn null(self) -> *const T {
        std::ptr::null()
    }

    pub const fn size(self) -> usize {
        mem::size_of::<T>()
    }

    pub const fn align(self) -> usize {
        mem::align_of::<T>()
    }

    pub fn type_name(self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl<T: 'static> TypeCarrier<T> {
    pub fn type_id(self) -> TypeId {
        TypeId::of::<T>()
    }

    /// True if `U` is exactly the carried type.
    pub fn is<U: 'static>(self) -> bool {
        TypeId::of::<T>() == TypeId::of::<U>()
    }
}

// Manual impls: derives would add `T: Clone` / `T: PartialEq` bounds.

impl<T> Clone for TypeCarrier<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypeCarrier<T> {}

impl<T> Default for TypeCarrier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PartialEq for TypeCarrier<T> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<T> Eq for TypeCarrier<T> {}

impl<T> Hash for TypeCarrier<T> {
    fn hash<H: Hasher>(&self, _state: &mut H) {}
}

impl<T> fmt::Debug for TypeCarrier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeCarrier<{}>", std::any::type_name::<T>())
    }
}
