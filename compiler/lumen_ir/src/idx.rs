//! Type index handle.
//!
//! `Idx` is the only way values refer to types. Types live in a
//! [`TypePool`](crate::TypePool) and are compared by index, never
//! structurally.

use std::fmt;

use crate::BasicValueType;

/// A 32-bit index into the type pool.
///
/// Primitive basic types occupy fixed indices matching the declaration order
/// of [`BasicValueType`]; structure types are allocated after them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Primitive Types (indices 0-8) ===

    /// The `void` type.
    pub const VOID: Self = Self(0);
    /// The `i1` type (boolean).
    pub const INT1: Self = Self(1);
    /// The `i8` type.
    pub const INT8: Self = Self(2);
    /// The `i16` type.
    pub const INT16: Self = Self(3);
    /// The `i32` type.
    pub const INT32: Self = Self(4);
    /// The `i64` type.
    pub const INT64: Self = Self(5);
    /// The `f16` type.
    pub const FLOAT16: Self = Self(6);
    /// The `f32` type.
    pub const FLOAT32: Self = Self(7);
    /// The `f64` type.
    pub const FLOAT64: Self = Self(8);

    /// Number of pre-interned primitive types.
    pub const PRIMITIVE_COUNT: u32 = 9;

    /// Create an index from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the index as `usize` (for indexing into `Vec`s).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is a pre-interned primitive type.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::PRIMITIVE_COUNT
    }

    /// The fixed index of a primitive basic type.
    #[inline]
    pub const fn of_basic(basic: BasicValueType) -> Self {
        Self(basic as u32)
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match BasicValueType::from_idx(*self) {
            Some(basic) => write!(f, "Idx::{}", basic.name()),
            None => write!(f, "Idx({})", self.0),
        }
    }
}
