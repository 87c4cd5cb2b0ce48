// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type shapes: the structural view of a type used by the fuzzy matcher.

use std::fmt;

/// Structural description of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Matches any shape.
    Wildcard,
    /// Opaque type identified by its path (`i32`, `alloc::string::String`, `my_crate::Foo`).
    Atom(&'static str),
    /// Type constructor applied to an ordered argument list (`Vec<T>`, tuples, `&T`).
    Applied {
        head: &'static str,
        args: &'static [Shape],
    },
    /// Fixed-length array `[T; N]`.
    Array { len: usize, elem: &'static Shape },
}

pub(crate) const TUPLE: &str = "(..)";
pub(crate) const SLICE: &str = "[..]";
pub(crate) const REF: &str = "&";
pub(crate) const REF_MUT: &str = "&mut";
pub(crate) const PTR_CONST: &str = "*const";
pub(crate) const PTR_MUT: &str = "*mut";

impl Shape {
    pub const fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// Number of type arguments (0 for atoms and wildcards, 1 for arrays).
    pub const fn arity(&self) -> usize {
        match self {
            Self::Wildcard | Self::Atom(_) => 0,
            Self::Applied { args, .. } => args.len(),
            Self::Array { .. } => 1,
        }
    }

    /// Nesting depth (atoms and wildcards are depth 1).
    pub const fn depth(&self) -> usize {
        match self {
            Self::Wildcard | Self::Atom(_) => 1,
            Self::Applied { args, .. } => {
                let mut deepest = 0;
                let mut i = 0;
                while i < args.len() {
                    let depth = args[i].depth();
                    if depth > deepest {
                        deepest = depth;
                    }
                    i += 1;
                }
                deepest + 1
            }
            Self::Array { elem, .. } => elem.depth() + 1,
        }
    }

    /// True if a wildcard occurs anywhere in the shape.
    pub const fn contains_wildcard(&self) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Atom(_) => false,
            Self::Applied { args, .. } => {
                let mut i = 0;
                while i < args.len() {
                    if args[i].contains_wildcard() {
                        return true;
                    }
                    i += 1;
                }
                false
            }
            Self::Array { elem, .. } => elem.contains_wildcard(),
        }
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Shape]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", arg)?;
    }
    Ok(())
}

/// Renders Rust-like syntax, e.g. `alloc::vec::Vec<(i32, _)>`.
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => write!(f, "_"),
            Self::Atom(name) => write!(f, "{}", name),
            Self::Array { len, elem } => write!(f, "[{}; {}]", elem, len),
            Self::Applied { head, args } => match (*head, args) {
                (TUPLE, [single]) => write!(f, "({},)", single),
                (TUPLE, _) => {
                    write!(f, "(")?;
                    write_args(f, args)?;
                    write!(f, ")")
                }
                (SLICE, [elem]) => write!(f, "[{}]", elem),
                (REF, [target]) => write!(f, "&{}", target),
                (REF_MUT | PTR_CONST | PTR_MUT, [target]) => write!(f, "{} {}", head, target),
                _ => {
                    write!(f, "{}<", head)?;
                    write_args(f, args)?;
                    write!(f, ">")
                }
            },
        }
    }
}
