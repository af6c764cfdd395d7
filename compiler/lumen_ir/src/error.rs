//! Errors reported by the value builder.

use crate::{FieldAccessChain, HostKind};

/// Failure of a builder operation.
///
/// Every error is reported at the call that introduces the inconsistency.
/// A failed call leaves the value graph exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IrError {
    /// A field or value type disagrees with what the access requires.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A chain index is past the field count of the structure it indexes.
    #[error("field access {chain} out of range: index {index} into a structure with {field_count} fields")]
    OutOfRangeAccess {
        chain: FieldAccessChain,
        index: u32,
        field_count: usize,
    },

    /// A host instance that a flat structure value cannot represent.
    #[error("unsupported host type `{type_name}`: {kind} instances cannot be mirrored as structure values")]
    UnsupportedHostType { type_name: String, kind: HostKind },

    /// An argument that is invalid regardless of types.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
