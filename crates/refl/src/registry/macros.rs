// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declarative registration.
//!
//! `#[derive(Reflect)]` registers every field in declaration order. `reflect!`
//! takes an explicit token list instead: the caller picks which fields are
//! registered and in which order (the order fixes the ordinals), and states each
//! field's type. A stated type that differs from the declared one does not
//! compile.

/// Registration token for one field of `Self`.
///
/// Only valid inside an `impl` block for the owning type. It expands to a
/// `Box<dyn FieldBase<Self>>` whose offset comes from `core::mem::offset_of!`.
#[macro_export]
macro_rules! refl_field {
    ($field:ident : $fty:ty) => {
        $crate::refl_field!($field : $fty => ::core::stringify!($field))
    };
    ($field:ident : $fty:ty => $name:expr) => {
        ::std::boxed::Box::new(
            // SAFETY: offset and accessor are derived from the same field of `Self`.
            unsafe {
                $crate::Field::<Self, $fty>::new(
                    $name,
                    ::core::mem::offset_of!(Self, $field),
                    |owner| &owner.$field,
                )
            },
        ) as ::std::boxed::Box<dyn $crate::FieldBase<Self>>
    };
}

/// Implement `Reflect` for a struct from an explicit field list.
///
/// ```rust
/// #[derive(Default)]
/// struct Foo {
///     i: i32,
///     d: f64,
/// }
///
/// refl::reflect!(Foo as FooField { d: f64, i: i32 });
///
/// use refl::Reflect;
/// let names: Vec<_> = Foo::registry().names().collect();
/// assert_eq!(names, ["d", "i"]);
/// let d: refl::FieldTypeOf<Foo, 0> = 1.5;
/// # let _ = d;
/// ```
///
/// `FooField` is the generated catalogue enum; its alternatives are named after
/// the fields.
///
/// Field types must name the owner explicitly. `Self` is rejected:
///
/// ```compile_fail
/// struct Node {
///     next: Option<Box<Node>>,
/// }
///
/// refl::reflect!(Node as NodeField { next: Option<Box<Self>> });
/// ```
#[macro_export]
macro_rules! reflect {
    ($vis:vis $owner:ident as $catalogue:ident { $($field:ident : $fty:ty),+ $(,)? }) => {
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $catalogue {
            $($field($crate::TypeCarrier<$fty>)),+
        }

        impl $crate::FieldTypeVariant for $catalogue {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$field(_) => ::core::stringify!($field)),+
                }
            }

            fn index(&self) -> usize {
                $crate::__reflect_variant_index!(self, $catalogue; 0usize; []; $($field),+)
            }

            fn accept<V: $crate::FieldTypeVisitor>(&self, visitor: &mut V) -> V::Output {
                match self {
                    $(Self::$field(carrier) => visitor.visit(::core::stringify!($field), *carrier)),+
                }
            }
        }

        // SAFETY: offsets come from `offset_of!` on the listed fields, and the
        // table, registry and `FieldAt` impls are generated from the same list.
        unsafe impl $crate::Reflect for $owner {
            type FieldType = $catalogue;

            const TYPE_NAME: &'static str =
                ::core::concat!(::core::module_path!(), "::", ::core::stringify!($owner));

            const TYPE_TABLE: &'static [(&'static str, $catalogue)] = &[
                $((::core::stringify!($field), $catalogue::$field($crate::TypeCarrier::new()))),+
            ];

            fn registry() -> &'static $crate::Registry<Self> {
                static REGISTRY: ::std::sync::OnceLock<$crate::Registry<$owner>> =
                    ::std::sync::OnceLock::new();
                REGISTRY.get_or_init(|| {
                    $crate::Registry::new(::std::vec![$($crate::refl_field!($field : $fty)),+])
                })
            }
        }

        $crate::__reflect_field_at!($owner; 0usize; $($field : $fty),+);

        // Field types are copied into the catalogue enum, where `Self` would name
        // the enum. Outside an impl `Self` does not resolve, so it is rejected here.
        $(
            const _: ::core::marker::PhantomData<$fty> = ::core::marker::PhantomData;
        )+
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __reflect_field_at {
    ($owner:ident; $index:expr;) => {};
    ($owner:ident; $index:expr; $field:ident : $fty:ty $(, $rest:ident : $rty:ty)*) => {
        // SAFETY: see `reflect!`.
        unsafe impl $crate::FieldAt<{ $index }> for $owner {
            type Type = $fty;
            const NAME: &'static str = ::core::stringify!($field);
            const OFFSET: usize = ::core::mem::offset_of!($owner, $field);
        }

        $crate::__reflect_field_at!($owner; $index + 1; $($rest : $rty),*);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __reflect_variant_index {
    ($value:ident, $catalogue:ident; $index:expr; [$($arms:tt)*];) => {
        match $value {
            $($arms)*
        }
    };
    ($value:ident, $catalogue:ident; $index:expr; [$($arms:tt)*]; $field:ident $(, $rest:ident)*) => {
        $crate::__reflect_variant_index!(
            $value, $catalogue; $index + 1; [$($arms)* $catalogue::$field(_) => $index,]; $($rest),*
        )
    };
}
