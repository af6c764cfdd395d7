//! Rank-2 stride descriptors.
//!
//! | Variant     | Fixed   | Free  |
//! |-------------|---------|-------|
//! | [`DenseX`]  | x = 1   | y     |
//! | [`DenseY`]  | y = 1   | x     |
//! | [`General2D`] | none | x, y  |

use std::fmt;

use crate::index::narrow;
use crate::{
    general_buffer_length, pitched_leading_dimension, Index2, LongIndex2, Stride, StrideError,
};

/// Row-major dense layout: `x` is contiguous, rows are `y_stride` apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct DenseX {
    y_stride: i32,
}

impl DenseX {
    pub fn new(y_stride: i32) -> Self {
        assert!(y_stride >= 1, "DenseX y stride must be positive, got {y_stride}");
        Self { y_stride }
    }

    /// Tightly packed rows of `extent.x` elements.
    pub fn from_extent(extent: Index2) -> Self {
        Self::new(extent.x.max(1))
    }

    /// Rows of `extent.x` elements padded to start on `alignment_in_bytes`.
    pub fn pitched(
        extent: Index2,
        alignment_in_bytes: i64,
        element_size_in_bytes: i64,
    ) -> Result<Self, StrideError> {
        let pitch =
            pitched_leading_dimension(extent.x.into(), alignment_in_bytes, element_size_in_bytes)?;
        Ok(Self::new(narrow(pitch)?.max(1)))
    }

    #[inline]
    pub fn y_stride(self) -> i32 {
        self.y_stride
    }
}

impl Stride for DenseX {
    type Index = Index2;
    type LongIndex = LongIndex2;
    type General = General2D;

    fn stride_extent(&self) -> Index2 {
        Index2::new(1, self.y_stride)
    }

    fn compute_element_index(&self, index: Index2) -> i32 {
        index.x + index.y * self.y_stride
    }

    fn compute_element_index_long(&self, index: LongIndex2) -> i64 {
        index.x + index.y * i64::from(self.y_stride)
    }

    fn compute_buffer_length(&self, extent: Index2) -> i64 {
        assert!(
            extent.x <= self.y_stride,
            "extent {extent} exceeds pitch: x extent {} > y stride {}",
            extent.x,
            self.y_stride,
        );
        i64::from(self.y_stride) * i64::from(extent.y)
    }

    fn as_general(&self) -> General2D {
        General2D::new(1, self.y_stride)
    }
}

/// Column-major dense layout: `y` is contiguous, columns are `x_stride`
/// apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct DenseY {
    x_stride: i32,
}

impl DenseY {
    pub fn new(x_stride: i32) -> Self {
        assert!(x_stride >= 1, "DenseY x stride must be positive, got {x_stride}");
        Self { x_stride }
    }

    /// Tightly packed columns of `extent.y` elements.
    pub fn from_extent(extent: Index2) -> Self {
        Self::new(extent.y.max(1))
    }

    /// Columns of `extent.y` elements padded to start on
    /// `alignment_in_bytes`.
    pub fn pitched(
        extent: Index2,
        alignment_in_bytes: i64,
        element_size_in_bytes: i64,
    ) -> Result<Self, StrideError> {
        let pitch =
            pitched_leading_dimension(extent.y.into(), alignment_in_bytes, element_size_in_bytes)?;
        Ok(Self::new(narrow(pitch)?.max(1)))
    }

    #[inline]
    pub fn x_stride(self) -> i32 {
        self.x_stride
    }
}

impl Stride for DenseY {
    type Index = Index2;
    type LongIndex = LongIndex2;
    type General = General2D;

    fn stride_extent(&self) -> Index2 {
        Index2::new(self.x_stride, 1)
    }

    fn compute_element_index(&self, index: Index2) -> i32 {
        index.x * self.x_stride + index.y
    }

    fn compute_element_index_long(&self, index: LongIndex2) -> i64 {
        index.x * i64::from(self.x_stride) + index.y
    }

    fn compute_buffer_length(&self, extent: Index2) -> i64 {
        assert!(
            extent.y <= self.x_stride,
            "extent {extent} exceeds pitch: y extent {} > x stride {}",
            extent.y,
            self.x_stride,
        );
        i64::from(self.x_stride) * i64::from(extent.x)
    }

    fn as_general(&self) -> General2D {
        General2D::new(self.x_stride, 1)
    }
}

/// Arbitrary per-dimension strides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct General2D {
    x_stride: i32,
    y_stride: i32,
}

impl General2D {
    pub fn new(x_stride: i32, y_stride: i32) -> Self {
        assert!(
            x_stride >= 1 && y_stride >= 1,
            "strides must be positive, got ({x_stride}, {y_stride})"
        );
        Self { x_stride, y_stride }
    }

    #[inline]
    pub fn x_stride(self) -> i32 {
        self.x_stride
    }

    #[inline]
    pub fn y_stride(self) -> i32 {
        self.y_stride
    }
}

impl Stride for General2D {
    type Index = Index2;
    type LongIndex = LongIndex2;
    type General = Self;

    fn stride_extent(&self) -> Index2 {
        Index2::new(self.x_stride, self.y_stride)
    }

    fn compute_element_index(&self, index: Index2) -> i32 {
        index.x * self.x_stride + index.y * self.y_stride
    }

    fn compute_element_index_long(&self, index: LongIndex2) -> i64 {
        index.x * i64::from(self.x_stride) + index.y * i64::from(self.y_stride)
    }

    fn compute_buffer_length(&self, extent: Index2) -> i64 {
        general_buffer_length(&[(self.x_stride, extent.x), (self.y_stride, extent.y)])
    }

    fn as_general(&self) -> Self {
        *self
    }
}

/// Rank-2 layout policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Stride2D {
    DenseX(DenseX),
    DenseY(DenseY),
    General(General2D),
}

impl Stride2D {
    /// `true` if one dimension has stride 1 by construction.
    pub fn is_dense(self) -> bool {
        !matches!(self, Self::General(_))
    }
}

impl From<DenseX> for Stride2D {
    fn from(stride: DenseX) -> Self {
        Self::DenseX(stride)
    }
}

impl From<DenseY> for Stride2D {
    fn from(stride: DenseY) -> Self {
        Self::DenseY(stride)
    }
}

impl From<General2D> for Stride2D {
    fn from(stride: General2D) -> Self {
        Self::General(stride)
    }
}

impl Stride for Stride2D {
    type Index = Index2;
    type LongIndex = LongIndex2;
    type General = General2D;

    fn stride_extent(&self) -> Index2 {
        match self {
            Self::DenseX(s) => s.stride_extent(),
            Self::DenseY(s) => s.stride_extent(),
            Self::General(s) => s.stride_extent(),
        }
    }

    fn compute_element_index(&self, index: Index2) -> i32 {
        match self {
            Self::DenseX(s) => s.compute_element_index(index),
            Self::DenseY(s) => s.compute_element_index(index),
            Self::General(s) => s.compute_element_index(index),
        }
    }

    fn compute_element_index_long(&self, index: LongIndex2) -> i64 {
        match self {
            Self::DenseX(s) => s.compute_element_index_long(index),
            Self::DenseY(s) => s.compute_element_index_long(index),
            Self::General(s) => s.compute_element_index_long(index),
        }
    }

    fn compute_buffer_length(&self, extent: Index2) -> i64 {
        match self {
            Self::DenseX(s) => s.compute_buffer_length(extent),
            Self::DenseY(s) => s.compute_buffer_length(extent),
            Self::General(s) => s.compute_buffer_length(extent),
        }
    }

    fn as_general(&self) -> General2D {
        match self {
            Self::DenseX(s) => s.as_general(),
            Self::DenseY(s) => s.as_general(),
            Self::General(s) => s.as_general(),
        }
    }
}

impl fmt::Display for Stride2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DenseX(s) => write!(f, "DenseX(y: {})", s.y_stride),
            Self::DenseY(s) => write!(f, "DenseY(x: {})", s.x_stride),
            Self::General(s) => write!(f, "General2D(x: {}, y: {})", s.x_stride, s.y_stride),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
