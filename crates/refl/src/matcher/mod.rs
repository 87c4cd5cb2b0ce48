// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural fuzzy type matching.
//!
//! Decides at compile time whether a type matches a pattern that may contain the
//! wildcard marker [`DontCare`] at any position and depth:
//!
//! - a wildcard on either side matches anything (including a whole nested subtree);
//! - atoms match when they are the same type;
//! - two applied types match when they have the same number of arguments and every
//!   argument matches positionally. Wildcards fill exactly one position; there is no
//!   variable-length gap.
//!
//! Under the default [`MatchPolicy::Structural`] the outer type constructor is
//! ignored (`Vec<i32>` matches `Option<_>`); [`MatchPolicy::Nominal`] requires the
//! constructors to agree as well.
//!
//! All predicates are `const fn` and are meant to be evaluated in const context:
//!
//! ```rust
//! use refl::{is_fuzzy_matched, DontCare};
//!
//! const _: () = assert!(is_fuzzy_matched::<Vec<Vec<i32>>, Vec<DontCare>>());
//! const _: () = assert!(!is_fuzzy_matched::<(i32, f32), (DontCare,)>());
//! refl::assert_fuzzy_match!((i32, f32, (f64,)), (i32, f32, DontCare));
//! ```
//!
//! Deeply nested shapes are bounded only by the compiler's const-evaluation limits.

mod impls;
mod shape;

pub use shape::Shape;

use crate::const_str;
use std::marker::PhantomData;

/// Types with a known structural shape.
///
/// Implemented here for primitives and common std containers, and by
/// `#[derive(TypeShape)]` for user types.
pub trait TypeShape {
    const SHAPE: Shape;
}

/// Wildcard marker: matches any type in fuzzy comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DontCare;

impl TypeShape for DontCare {
    const SHAPE: Shape = Shape::Wildcard;
}

/// How applied types compare their outer constructor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MatchPolicy {
    /// Compare argument lists only.
    #[default]
    Structural,
    /// Constructors must be identical too.
    Nominal,
}

/// Exact structural equality (no wildcard absorption).
pub const fn shape_eq(x: &Shape, y: &Shape) -> bool {
    match (x, y) {
        (Shape::Wildcard, Shape::Wildcard) => true,
        (Shape::Atom(a), Shape::Atom(b)) => const_str::eq(a, b),
        (
            Shape::Applied {
                head: hx,
                args: ax,
            },
            Shape::Applied {
                head: hy,
                args: ay,
            },
        ) => {
            if !const_str::eq(hx, hy) || ax.len() != ay.len() {
                return false;
            }
            let mut i = 0;
            while i < ax.len() {
                if !shape_eq(&ax[i], &ay[i]) {
                    return false;
                }
                i += 1;
            }
            true
        }
        (Shape::Array { len: lx, elem: ex }, Shape::Array { len: ly, elem: ey }) => {
            *lx == *ly && shape_eq(ex, ey)
        }
        _ => false,
    }
}

/// Fuzzy match of two shapes under `policy`.
pub const fn shape_matches(x: &Shape, y: &Shape, policy: MatchPolicy) -> bool {
    match (x, y) {
        (Shape::Wildcard, _) | (_, Shape::Wildcard) => true,
        (Shape::Atom(a), Shape::Atom(b)) => const_str::eq(a, b),
        (
            Shape::Applied {
                head: hx,
                args: ax,
            },
            Shape::Applied {
                head: hy,
                args: ay,
            },
        ) => {
            if matches!(policy, MatchPolicy::Nominal) && !const_str::eq(hx, hy) {
                return false;
            }
            if ax.len() != ay.len() {
                return false;
            }
            let mut i = 0;
            while i < ax.len() {
                if !shape_matches(&ax[i], &ay[i], policy) {
                    return false;
                }
                i += 1;
            }
            true
        }
        (Shape::Array { len: lx, elem: ex }, Shape::Array { len: ly, elem: ey }) => {
            *lx == *ly && shape_matches(ex, ey, policy)
        }
        _ => false,
    }
}

/// `X` fuzzy-matches `Y` under the default (structural) policy.
pub const fn is_fuzzy_matched<X: TypeShape + ?Sized, Y: TypeShape + ?Sized>() -> bool {
    shape_matches(&X::SHAPE, &Y::SHAPE, MatchPolicy::Structural)
}

/// `X` fuzzy-matches `Y` under `policy`.
pub const fn is_fuzzy_matched_with<X: TypeShape + ?Sized, Y: TypeShape + ?Sized>(
    policy: MatchPolicy,
) -> bool {
    shape_matches(&X::SHAPE, &Y::SHAPE, policy)
}

/// Shallow check: `X` and `Y` are the same type, or either one is exactly the
/// wildcard. Does not look inside type arguments.
pub const fn is_a<X: TypeShape + ?Sized, Y: TypeShape + ?Sized>() -> bool {
    X::SHAPE.is_wildcard() || Y::SHAPE.is_wildcard() || shape_eq(&X::SHAPE, &Y::SHAPE)
}

/// Associated-const form of [`is_fuzzy_matched`], usable in generic code.
pub struct FuzzyMatch<X: ?Sized, Y: ?Sized>(PhantomData<fn() -> (*const X, *const Y)>);

impl<X: TypeShape + ?Sized, Y: TypeShape + ?Sized> FuzzyMatch<X, Y> {
    pub const VALUE: bool = is_fuzzy_matched::<X, Y>();
    pub const NOMINAL: bool = is_fuzzy_matched_with::<X, Y>(MatchPolicy::Nominal);
}

/// Compile-time assertion that `$x` fuzzy-matches `$y`.
#[macro_export]
macro_rules! assert_fuzzy_match {
    ($x:ty, $y:ty $(,)?) => {
        const _: () = ::core::assert!(
            $crate::is_fuzzy_matched::<$x, $y>(),
            ::core::concat!(
                "expected ",
                ::core::stringify!($x),
                " to fuzzy-match ",
                ::core::stringify!($y)
            )
        );
    };
}

/// Compile-time assertion that `$x` does not fuzzy-match `$y`.
#[macro_export]
macro_rules! assert_not_fuzzy_match {
    ($x:ty, $y:ty $(,)?) => {
        const _: () = ::core::assert!(
            !$crate::is_fuzzy_matched::<$x, $y>(),
            ::core::concat!(
                "expected ",
                ::core::stringify!($x),
                " not to fuzzy-match ",
                ::core::stringify!($y)
            )
        );
    };
}
