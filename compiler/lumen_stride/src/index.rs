//! Rank-2 and rank-3 index tuples.
//!
//! Indices are plain values with no identity. The same types describe
//! extents (the size of each dimension).

use std::fmt;

use crate::StrideError;

macro_rules! index_type {
    ($(#[$meta:meta])* $name:ident, $int:ty, [$($dim:ident),+]) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            $(pub $dim: $int,)+
        }

        impl $name {
            /// All components zero.
            pub const ZERO: Self = Self { $($dim: 0,)+ };
            /// All components one.
            pub const ONE: Self = Self { $($dim: 1,)+ };

            #[inline]
            pub const fn new($($dim: $int),+) -> Self {
                Self { $($dim,)+ }
            }

            /// Product of all components, widened to 64 bits.
            #[inline]
            pub fn long_size(self) -> i64 {
                1i64 $(* i64::from(self.$dim))+
            }

            /// Product of all components, if it fits an `i32`.
            pub fn size(self) -> Result<i32, StrideError> {
                narrow(self.long_size())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let components = [$(self.$dim.to_string()),+];
                write!(f, "({})", components.join(", "))
            }
        }
    };
}

index_type!(
    /// 32-bit 2D index `(x, y)`; `x` varies fastest in row-major layouts.
    Index2, i32, [x, y]
);
index_type!(
    /// 64-bit 2D index `(x, y)`.
    LongIndex2, i64, [x, y]
);
index_type!(
    /// 32-bit 3D index `(x, y, z)`.
    Index3, i32, [x, y, z]
);
index_type!(
    /// 64-bit 3D index `(x, y, z)`.
    LongIndex3, i64, [x, y, z]
);

pub(crate) fn narrow(value: i64) -> Result<i32, StrideError> {
    i32::try_from(value).map_err(|_| StrideError::IndexOverflow { value })
}

impl From<Index2> for LongIndex2 {
    fn from(index: Index2) -> Self {
        Self::new(index.x.into(), index.y.into())
    }
}

impl From<Index3> for LongIndex3 {
    fn from(index: Index3) -> Self {
        Self::new(index.x.into(), index.y.into(), index.z.into())
    }
}

impl TryFrom<LongIndex2> for Index2 {
    type Error = StrideError;

    fn try_from(index: LongIndex2) -> Result<Self, StrideError> {
        Ok(Self::new(narrow(index.x)?, narrow(index.y)?))
    }
}

impl TryFrom<LongIndex3> for Index3 {
    type Error = StrideError;

    fn try_from(index: LongIndex3) -> Result<Self, StrideError> {
        Ok(Self::new(narrow(index.x)?, narrow(index.y)?, narrow(index.z)?))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
