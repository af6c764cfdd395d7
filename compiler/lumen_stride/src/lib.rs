//! Strided addressing for the Lumen kernel compiler.
//!
//! A stride descriptor maps a logical 2D or 3D index to a linear element
//! index and computes how many elements a buffer of a given extent needs.
//!
//! - **Index tuples** ([`Index2`], [`Index3`], [`LongIndex2`],
//!   [`LongIndex3`]): plain `i32`/`i64` coordinates.
//! - **Descriptors** ([`Stride2D`], [`Stride3D`]): closed sets of layout
//!   policies. Dense variants fix the fastest dimension's stride to 1;
//!   general variants store every stride.
//! - **[`Stride`]**: the capability surface every descriptor shares, so
//!   address generation can be written once and specialized per layout.
//! - **Pitch** ([`pitched_leading_dimension`]): pads a leading dimension so
//!   every row starts on an aligned byte boundary.
//!
//! # Preconditions
//!
//! Dense constructors assert that their strides are positive and ordered,
//! and `compute_buffer_length` asserts that the extent fits the declared
//! pitch. A violation is a bug in the caller and panics; it is never
//! reported as a recoverable error.

mod error;
mod index;
mod pitch;
mod stride2d;
mod stride3d;

pub use error::StrideError;
pub use index::{Index2, Index3, LongIndex2, LongIndex3};
pub use pitch::pitched_leading_dimension;
pub use stride2d::{DenseX, DenseY, General2D, Stride2D};
pub use stride3d::{DenseXY, DenseZY, General3D, Stride3D};

/// Uniform addressing capabilities of a stride descriptor.
pub trait Stride: Copy {
    /// 32-bit index (and extent) type of this rank.
    type Index: Copy;
    /// 64-bit index type of this rank.
    type LongIndex: Copy;
    /// The fully general descriptor of this rank.
    type General: Stride<Index = Self::Index, LongIndex = Self::LongIndex>;

    /// Per-dimension strides, with fixed components reported as 1.
    fn stride_extent(&self) -> Self::Index;

    /// Linear element index of `index`.
    ///
    /// The address must fit an `i32`; larger layouts go through
    /// [`compute_element_index_long`](Self::compute_element_index_long).
    fn compute_element_index(&self, index: Self::Index) -> i32;

    /// Linear element index of a 64-bit `index`.
    fn compute_element_index_long(&self, index: Self::LongIndex) -> i64;

    /// Number of elements a buffer of `extent` needs under this layout.
    fn compute_buffer_length(&self, extent: Self::Index) -> i64;

    /// The same layout with no fixed components.
    fn as_general(&self) -> Self::General;
}

/// Buffer length of a general layout given `(stride, extent)` per dimension.
///
/// At least the largest `stride * extent` span, and for a non-empty extent
/// at least one past the highest addressed element.
fn general_buffer_length(dimensions: &[(i32, i32)]) -> i64 {
    let span = dimensions
        .iter()
        .map(|&(stride, extent)| i64::from(stride) * i64::from(extent))
        .max()
        .unwrap_or(0);
    if dimensions.iter().any(|&(_, extent)| extent <= 0) {
        return span;
    }
    let last: i64 = dimensions
        .iter()
        .map(|&(stride, extent)| i64::from(stride) * (i64::from(extent) - 1))
        .sum();
    span.max(last + 1)
}
