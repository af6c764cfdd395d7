use pretty_assertions::assert_eq;

use super::*;

#[test]
fn rounds_up_to_alignment() {
    assert_eq!(pitched_leading_dimension(5, 16, 4), Ok(8));
    assert_eq!(pitched_leading_dimension(8, 16, 4), Ok(8));
    assert_eq!(pitched_leading_dimension(9, 16, 4), Ok(12));
    assert_eq!(pitched_leading_dimension(0, 16, 4), Ok(0));
    assert_eq!(pitched_leading_dimension(100, 128, 8), Ok(112));
}

#[test]
fn alignment_equal_to_element_size_is_identity() {
    assert_eq!(pitched_leading_dimension(7, 4, 4), Ok(7));
    assert_eq!(pitched_leading_dimension(7, 1, 1), Ok(7));
}

#[test]
fn non_power_of_two_alignment_is_unsupported() {
    assert_eq!(
        pitched_leading_dimension(5, 3, 1),
        Err(StrideError::UnsupportedAlignment {
            alignment: 3,
            element_size: 1,
        })
    );
    assert_eq!(
        pitched_leading_dimension(5, 24, 4),
        Err(StrideError::UnsupportedAlignment {
            alignment: 24,
            element_size: 4,
        })
    );
}

#[test]
fn alignment_below_element_size_is_unsupported() {
    assert_eq!(
        pitched_leading_dimension(5, 8, 16),
        Err(StrideError::UnsupportedAlignment {
            alignment: 8,
            element_size: 16,
        })
    );
}

#[test]
fn non_positive_alignment_is_unsupported() {
    assert!(matches!(
        pitched_leading_dimension(5, 0, 4),
        Err(StrideError::UnsupportedAlignment { .. })
    ));
    assert!(matches!(
        pitched_leading_dimension(5, -16, 4),
        Err(StrideError::UnsupportedAlignment { .. })
    ));
}

#[test]
fn invalid_lengths_are_out_of_range() {
    assert_eq!(
        pitched_leading_dimension(-1, 16, 4),
        Err(StrideError::OutOfRange {
            what: "leading dimension length",
            value: -1,
        })
    );
    assert_eq!(
        pitched_leading_dimension(5, 16, 0),
        Err(StrideError::OutOfRange {
            what: "element size",
            value: 0,
        })
    );
    assert!(matches!(
        pitched_leading_dimension(i64::MAX, 16, 4),
        Err(StrideError::OutOfRange { .. })
    ));
}

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_pitch {
    use super::super::pitched_leading_dimension;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn result_is_smallest_aligned_length(
            len in 0i64..100_000,
            alignment_log2 in 0u32..10,
            element_log2 in 0u32..4,
        ) {
            let alignment = 1i64 << alignment_log2;
            let element_size = 1i64 << element_log2;
            prop_assume!(alignment >= element_size);

            let pitched = pitched_leading_dimension(len, alignment, element_size).unwrap();
            prop_assert!(pitched >= len);
            prop_assert_eq!(pitched * element_size % alignment, 0);
            // Nothing in [len, pitched) is aligned.
            let chunk = alignment / element_size;
            prop_assert!(pitched - len < chunk);
        }
    }
}
