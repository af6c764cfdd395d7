//! Recoverable stride errors.

/// Invalid input to a pitch or index conversion.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StrideError {
    /// The alignment cannot produce a pitched stride for this element size.
    #[error(
        "unsupported alignment {alignment} bytes for {element_size}-byte elements: \
         alignment must be a positive power of two and a multiple of the element size"
    )]
    UnsupportedAlignment { alignment: i64, element_size: i64 },

    /// A length or size argument outside its valid range.
    #[error("{what} out of range: {value}")]
    OutOfRange { what: &'static str, value: i64 },

    /// A 64-bit value that does not fit the 32-bit index space.
    #[error("value {value} does not fit a 32-bit index")]
    IndexOverflow { value: i64 },
}
