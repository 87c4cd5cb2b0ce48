// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `TypeShape` for primitives and std types.

use super::shape::{PTR_CONST, PTR_MUT, REF, REF_MUT, SLICE, TUPLE};
use super::{Shape, TypeShape};
use std::collections::hash_map::{DefaultHasher, RandomState};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::BuildHasherDefault;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

macro_rules! atom_shapes {
    ($($ty:ty => $name:expr),+ $(,)?) => {
        $(
            impl TypeShape for $ty {
                const SHAPE: Shape = Shape::Atom($name);
            }
        )+
    };
}

atom_shapes! {
    bool => "bool",
    char => "char",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
    str => "str",
    () => "()",
    String => "alloc::string::String",
    RandomState => "std::hash::RandomState",
    DefaultHasher => "std::hash::DefaultHasher",
}

// Constructors with one argument; `?Sized` where std allows it.
macro_rules! unary_shapes {
    ($($head:expr => $ty:ident<T $(: ?$sized:ident)?>),+ $(,)?) => {
        $(
            impl<T: TypeShape $(+ ?$sized)?> TypeShape for $ty<T> {
                const SHAPE: Shape = Shape::Applied {
                    head: $head,
                    args: &[T::SHAPE],
                };
            }
        )+
    };
}

unary_shapes! {
    "alloc::vec::Vec" => Vec<T>,
    "alloc::collections::VecDeque" => VecDeque<T>,
    "alloc::collections::BTreeSet" => BTreeSet<T>,
    "core::option::Option" => Option<T>,
    "alloc::boxed::Box" => Box<T: ?Sized>,
    "alloc::rc::Rc" => Rc<T: ?Sized>,
    "alloc::sync::Arc" => Arc<T: ?Sized>,
    "core::marker::PhantomData" => PhantomData<T: ?Sized>,
}

impl<H: TypeShape> TypeShape for BuildHasherDefault<H> {
    const SHAPE: Shape = Shape::Applied {
        head: "core::hash::BuildHasherDefault",
        args: &[H::SHAPE],
    };
}

// The hasher is a type argument like any other: maps with different hashers
// are different types.
impl<T: TypeShape, S: TypeShape> TypeShape for HashSet<T, S> {
    const SHAPE: Shape = Shape::Applied {
        head: "std::collections::HashSet",
        args: &[T::SHAPE, S::SHAPE],
    };
}

impl<K: TypeShape, V: TypeShape, S: TypeShape> TypeShape for HashMap<K, V, S> {
    const SHAPE: Shape = Shape::Applied {
        head: "std::collections::HashMap",
        args: &[K::SHAPE, V::SHAPE, S::SHAPE],
    };
}

impl<K: TypeShape, V: TypeShape> TypeShape for BTreeMap<K, V> {
    const SHAPE: Shape = Shape::Applied {
        head: "alloc::collections::BTreeMap",
        args: &[K::SHAPE, V::SHAPE],
    };
}

impl<T: TypeShape, E: TypeShape> TypeShape for Result<T, E> {
    const SHAPE: Shape = Shape::Applied {
        head: "core::result::Result",
        args: &[T::SHAPE, E::SHAPE],
    };
}

impl<T: TypeShape + ?Sized> TypeShape for &T {
    const SHAPE: Shape = Shape::Applied {
        head: REF,
        args: &[T::SHAPE],
    };
}

impl<T: TypeShape + ?Sized> TypeShape for &mut T {
    const SHAPE: Shape = Shape::Applied {
        head: REF_MUT,
        args: &[T::SHAPE],
    };
}

impl<T: TypeShape + ?Sized> TypeShape for *const T {
    const SHAPE: Shape = Shape::Applied {
        head: PTR_CONST,
        args: &[T::SHAPE],
    };
}

impl<T: TypeShape + ?Sized> TypeShape for *mut T {
    const SHAPE: Shape = Shape::Applied {
        head: PTR_MUT,
        args: &[T::SHAPE],
    };
}

impl<T: TypeShape> TypeShape for [T] {
    const SHAPE: Shape = Shape::Applied {
        head: SLICE,
        args: &[T::SHAPE],
    };
}

impl<T: TypeShape, const N: usize> TypeShape for [T; N] {
    const SHAPE: Shape = Shape::Array {
        len: N,
        elem: &T::SHAPE,
    };
}

macro_rules! tuple_shapes {
    ($(($($name:ident),+)),+ $(,)?) => {
        $(
            impl<$($name: TypeShape),+> TypeShape for ($($name,)+) {
                const SHAPE: Shape = Shape::Applied {
                    head: TUPLE,
                    args: &[$($name::SHAPE),+],
                };
            }
        )+
    };
}

tuple_shapes! {
    (A),
    (A, B),
    (A, B, C),
    (A, B, C, D),
    (A, B, C, D, E),
    (A, B, C, D, E, F),
    (A, B, C, D, E, F, G),
    (A, B, C, D, E, F, G, H),
    (A, B, C, D, E, F, G, H, I),
    (A, B, C, D, E, F, G, H, I, J),
    (A, B, C, D, E, F, G, H, I, J, K),
    (A, B, C, D, E, F, G, H, I, J, K, L),
}
