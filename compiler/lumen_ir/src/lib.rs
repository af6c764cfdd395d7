//! Structured-value IR for the Lumen kernel compiler.
//!
//! This crate provides:
//!
//! - **Type pool** ([`TypePool`], [`Idx`]): primitive basic types at fixed
//!   indices plus interned [`StructureType`]s. Structurally equal structure
//!   types share one [`Idx`], so type equality is an index comparison.
//!
//! - **Field access chains** ([`FieldAccessChain`]): paths of field indices
//!   addressing (possibly nested) fields of a structure type.
//!
//! - **Value graph** ([`ValueGraph`], [`ValueId`], [`ValueKind`]): an
//!   append-only arena of immutable SSA values grouped into basic blocks.
//!   Operands are handles into the arena, never owning pointers.
//!
//! - **Builder** ([`ValueBuilder`]): creates structure values, field reads
//!   and field writes, forwarding reads to recorded writes as the graph is
//!   built.
//!
//! - **Host conversion** ([`HostTypeDescriptor`], [`PrimitiveValueFactory`]):
//!   mirrors host composite instances into structure values.
//!
//! - **Verification** ([`verify()`]): checks graph invariants after
//!   construction.
//!
//! # Design
//!
//! Writes never mutate: `create_set_field` chains a new version onto the
//! previous one, and `create_get_field` walks that version chain backwards
//! to find the stored value. Every version stays reachable through operand
//! edges, so consumers can traverse the graph read-only.

mod builder;
mod chain;
mod error;
mod host;
mod idx;
mod types;
mod value;
pub mod verify;

#[cfg(test)]
mod test_helpers;

pub use builder::ValueBuilder;
pub use chain::FieldAccessChain;
pub use error::IrError;
pub use host::{HostKind, HostTypeDescriptor, PrimitiveValueFactory};
pub use idx::Idx;
pub use types::{BasicValueType, StructureType, TypeData, TypeDisplay, TypePool};
pub use value::{BlockId, GraphDisplay, PrimitiveConstant, Value, ValueGraph, ValueId, ValueKind};
pub use verify::{verify, VerifyProblem};
