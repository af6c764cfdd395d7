//! Pitch alignment for leading dimensions.

use crate::StrideError;

/// Smallest length ≥ `leading_dimension_length` whose byte size is a
/// multiple of `alignment_in_bytes`.
///
/// Used to pick the free stride of a dense descriptor so that every row
/// (or plane) starts on an aligned byte boundary.
///
/// `alignment_in_bytes` must be a positive power of two and a multiple of
/// a positive `element_size_in_bytes`; anything else cannot yield a pitched
/// stride and fails with [`StrideError::UnsupportedAlignment`]. A negative
/// length fails with [`StrideError::OutOfRange`].
pub fn pitched_leading_dimension(
    leading_dimension_length: i64,
    alignment_in_bytes: i64,
    element_size_in_bytes: i64,
) -> Result<i64, StrideError> {
    if leading_dimension_length < 0 {
        return Err(StrideError::OutOfRange {
            what: "leading dimension length",
            value: leading_dimension_length,
        });
    }
    if element_size_in_bytes <= 0 {
        return Err(StrideError::OutOfRange {
            what: "element size",
            value: element_size_in_bytes,
        });
    }
    if alignment_in_bytes <= 0
        || alignment_in_bytes.count_ones() != 1
        || alignment_in_bytes % element_size_in_bytes != 0
    {
        return Err(StrideError::UnsupportedAlignment {
            alignment: alignment_in_bytes,
            element_size: element_size_in_bytes,
        });
    }

    // Elements per aligned chunk.
    let chunk = alignment_in_bytes / element_size_in_bytes;
    leading_dimension_length
        .checked_add(chunk - 1)
        .map(|padded| padded / chunk * chunk)
        .ok_or(StrideError::OutOfRange {
            what: "leading dimension length",
            value: leading_dimension_length,
        })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
