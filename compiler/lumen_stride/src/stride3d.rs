//! Rank-3 stride descriptors.
//!
//! [`DenseXY`] is the row-major volume layout (`x` contiguous, then rows,
//! then planes). [`DenseZY`] is its transpose with `z` contiguous.

use std::fmt;

use crate::index::narrow;
use crate::{
    general_buffer_length, pitched_leading_dimension, Index3, LongIndex3, Stride, StrideError,
};

/// `x` contiguous; rows `y_stride` apart; planes `z_stride` apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct DenseXY {
    y_stride: i32,
    z_stride: i32,
}

impl DenseXY {
    pub fn new(y_stride: i32, z_stride: i32) -> Self {
        assert!(y_stride >= 1, "DenseXY y stride must be positive, got {y_stride}");
        assert!(
            z_stride >= y_stride,
            "DenseXY z stride {z_stride} must be at least the y stride {y_stride}"
        );
        Self { y_stride, z_stride }
    }

    /// Tightly packed rows and planes.
    ///
    /// Fails with [`StrideError::IndexOverflow`] when a plane does not fit
    /// the 32-bit stride space.
    pub fn from_extent(extent: Index3) -> Result<Self, StrideError> {
        let y_stride = extent.x.max(1);
        let plane = i64::from(y_stride) * i64::from(extent.y.max(1));
        Ok(Self::new(y_stride, narrow(plane)?))
    }

    /// Rows padded to `alignment_in_bytes`, planes packed from padded rows.
    pub fn pitched(
        extent: Index3,
        alignment_in_bytes: i64,
        element_size_in_bytes: i64,
    ) -> Result<Self, StrideError> {
        let pitch = narrow(pitched_leading_dimension(
            extent.x.into(),
            alignment_in_bytes,
            element_size_in_bytes,
        )?)?
        .max(1);
        let plane = i64::from(pitch) * i64::from(extent.y.max(1));
        Ok(Self::new(pitch, narrow(plane)?))
    }

    #[inline]
    pub fn y_stride(self) -> i32 {
        self.y_stride
    }

    #[inline]
    pub fn z_stride(self) -> i32 {
        self.z_stride
    }
}

impl Stride for DenseXY {
    type Index = Index3;
    type LongIndex = LongIndex3;
    type General = General3D;

    fn stride_extent(&self) -> Index3 {
        Index3::new(1, self.y_stride, self.z_stride)
    }

    fn compute_element_index(&self, index: Index3) -> i32 {
        index.x + index.y * self.y_stride + index.z * self.z_stride
    }

    fn compute_element_index_long(&self, index: LongIndex3) -> i64 {
        index.x + index.y * i64::from(self.y_stride) + index.z * i64::from(self.z_stride)
    }

    fn compute_buffer_length(&self, extent: Index3) -> i64 {
        assert!(
            extent.x <= self.y_stride,
            "extent {extent} exceeds pitch: x extent {} > y stride {}",
            extent.x,
            self.y_stride,
        );
        let plane = i64::from(extent.y) * i64::from(self.y_stride);
        assert!(
            plane <= i64::from(self.z_stride),
            "extent {extent} exceeds pitch: plane of {plane} elements > z stride {}",
            self.z_stride,
        );
        i64::from(self.z_stride) * i64::from(extent.z)
    }

    fn as_general(&self) -> General3D {
        General3D::new(1, self.y_stride, self.z_stride)
    }
}

/// `z` contiguous; `y` rows `y_stride` apart; `x` planes `x_stride` apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct DenseZY {
    y_stride: i32,
    x_stride: i32,
}

impl DenseZY {
    pub fn new(y_stride: i32, x_stride: i32) -> Self {
        assert!(y_stride >= 1, "DenseZY y stride must be positive, got {y_stride}");
        assert!(
            x_stride >= y_stride,
            "DenseZY x stride {x_stride} must be at least the y stride {y_stride}"
        );
        Self { y_stride, x_stride }
    }

    pub fn from_extent(extent: Index3) -> Result<Self, StrideError> {
        let y_stride = extent.z.max(1);
        let plane = i64::from(y_stride) * i64::from(extent.y.max(1));
        Ok(Self::new(y_stride, narrow(plane)?))
    }

    pub fn pitched(
        extent: Index3,
        alignment_in_bytes: i64,
        element_size_in_bytes: i64,
    ) -> Result<Self, StrideError> {
        let pitch = narrow(pitched_leading_dimension(
            extent.z.into(),
            alignment_in_bytes,
            element_size_in_bytes,
        )?)?
        .max(1);
        let plane = i64::from(pitch) * i64::from(extent.y.max(1));
        Ok(Self::new(pitch, narrow(plane)?))
    }

    #[inline]
    pub fn y_stride(self) -> i32 {
        self.y_stride
    }

    #[inline]
    pub fn x_stride(self) -> i32 {
        self.x_stride
    }
}

impl Stride for DenseZY {
    type Index = Index3;
    type LongIndex = LongIndex3;
    type General = General3D;

    fn stride_extent(&self) -> Index3 {
        Index3::new(self.x_stride, self.y_stride, 1)
    }

    fn compute_element_index(&self, index: Index3) -> i32 {
        index.x * self.x_stride + index.y * self.y_stride + index.z
    }

    fn compute_element_index_long(&self, index: LongIndex3) -> i64 {
        index.x * i64::from(self.x_stride) + index.y * i64::from(self.y_stride) + index.z
    }

    fn compute_buffer_length(&self, extent: Index3) -> i64 {
        assert!(
            extent.z <= self.y_stride,
            "extent {extent} exceeds pitch: z extent {} > y stride {}",
            extent.z,
            self.y_stride,
        );
        let plane = i64::from(extent.y) * i64::from(self.y_stride);
        assert!(
            plane <= i64::from(self.x_stride),
            "extent {extent} exceeds pitch: plane of {plane} elements > x stride {}",
            self.x_stride,
        );
        i64::from(self.x_stride) * i64::from(extent.x)
    }

    fn as_general(&self) -> General3D {
        General3D::new(self.x_stride, self.y_stride, 1)
    }
}

/// Arbitrary per-dimension strides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct General3D {
    x_stride: i32,
    y_stride: i32,
    z_stride: i32,
}

impl General3D {
    pub fn new(x_stride: i32, y_stride: i32, z_stride: i32) -> Self {
        assert!(
            x_stride >= 1 && y_stride >= 1 && z_stride >= 1,
            "strides must be positive, got ({x_stride}, {y_stride}, {z_stride})"
        );
        Self {
            x_stride,
            y_stride,
            z_stride,
        }
    }

    #[inline]
    pub fn x_stride(self) -> i32 {
        self.x_stride
    }

    #[inline]
    pub fn y_stride(self) -> i32 {
        self.y_stride
    }

    #[inline]
    pub fn z_stride(self) -> i32 {
        self.z_stride
    }
}

impl Stride for General3D {
    type Index = Index3;
    type LongIndex = LongIndex3;
    type General = Self;

    fn stride_extent(&self) -> Index3 {
        Index3::new(self.x_stride, self.y_stride, self.z_stride)
    }

    fn compute_element_index(&self, index: Index3) -> i32 {
        index.x * self.x_stride + index.y * self.y_stride + index.z * self.z_stride
    }

    fn compute_element_index_long(&self, index: LongIndex3) -> i64 {
        index.x * i64::from(self.x_stride)
            + index.y * i64::from(self.y_stride)
            + index.z * i64::from(self.z_stride)
    }

    fn compute_buffer_length(&self, extent: Index3) -> i64 {
        general_buffer_length(&[
            (self.x_stride, extent.x),
            (self.y_stride, extent.y),
            (self.z_stride, extent.z),
        ])
    }

    fn as_general(&self) -> Self {
        *self
    }
}

/// Rank-3 layout policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Stride3D {
    DenseXY(DenseXY),
    DenseZY(DenseZY),
    General(General3D),
}

impl Stride3D {
    pub fn is_dense(self) -> bool {
        !matches!(self, Self::General(_))
    }
}

impl From<DenseXY> for Stride3D {
    fn from(stride: DenseXY) -> Self {
        Self::DenseXY(stride)
    }
}

impl From<DenseZY> for Stride3D {
    fn from(stride: DenseZY) -> Self {
        Self::DenseZY(stride)
    }
}

impl From<General3D> for Stride3D {
    fn from(stride: General3D) -> Self {
        Self::General(stride)
    }
}

impl Stride for Stride3D {
    type Index = Index3;
    type LongIndex = LongIndex3;
    type General = General3D;

    fn stride_extent(&self) -> Index3 {
        match self {
            Self::DenseXY(s) => s.stride_extent(),
            Self::DenseZY(s) => s.stride_extent(),
            Self::General(s) => s.stride_extent(),
        }
    }

    fn compute_element_index(&self, index: Index3) -> i32 {
        match self {
            Self::DenseXY(s) => s.compute_element_index(index),
            Self::DenseZY(s) => s.compute_element_index(index),
            Self::General(s) => s.compute_element_index(index),
        }
    }

    fn compute_element_index_long(&self, index: LongIndex3) -> i64 {
        match self {
            Self::DenseXY(s) => s.compute_element_index_long(index),
            Self::DenseZY(s) => s.compute_element_index_long(index),
            Self::General(s) => s.compute_element_index_long(index),
        }
    }

    fn compute_buffer_length(&self, extent: Index3) -> i64 {
        match self {
            Self::DenseXY(s) => s.compute_buffer_length(extent),
            Self::DenseZY(s) => s.compute_buffer_length(extent),
            Self::General(s) => s.compute_buffer_length(extent),
        }
    }

    fn as_general(&self) -> General3D {
        match self {
            Self::DenseXY(s) => s.as_general(),
            Self::DenseZY(s) => s.as_general(),
            Self::General(s) => s.as_general(),
        }
    }
}

impl fmt::Display for Stride3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DenseXY(s) => write!(f, "DenseXY(y: {}, z: {})", s.y_stride, s.z_stride),
            Self::DenseZY(s) => write!(f, "DenseZY(y: {}, x: {})", s.y_stride, s.x_stride),
            Self::General(s) => write!(
                f,
                "General3D(x: {}, y: {}, z: {})",
                s.x_stride, s.y_stride, s.z_stride
            ),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
