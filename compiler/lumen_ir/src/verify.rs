//! Value graph verification.
//!
//! Walks every value and reports violations of the graph invariants:
//! - every operand handle refers to an earlier value (the arena is acyclic)
//! - every value's block exists and lists the value
//! - `SetField` and `GetField` chains resolve in the object type, with the
//!   stored or result type matching the addressed field
//! - `SetField` keeps the object type; `Primitive` carries its basic type
//! - every type handle is in the pool
//!
//! The builder maintains these by construction. Consumers that deserialize
//! or transform graphs run the verifier to catch corrupted input early.

use std::fmt;

use crate::{Idx, IrError, TypePool, ValueGraph, ValueId, ValueKind};

/// One invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyProblem {
    /// An operand that is not an earlier value.
    ForwardOperand { value: ValueId, operand: ValueId },
    /// A value assigned to a block that does not exist.
    UnknownBlock { value: ValueId },
    /// A value missing from its block's member list.
    NotInBlock { value: ValueId },
    /// A value or operand whose type is not in the pool.
    UnknownType { value: ValueId },
    /// A field chain that does not resolve in the object type.
    InvalidAccess { value: ValueId, error: IrError },
    /// A type that disagrees with what the value kind requires.
    TypeMismatch {
        value: ValueId,
        expected: Idx,
        found: Idx,
    },
}

impl fmt::Display for VerifyProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForwardOperand { value, operand } => write!(
                f,
                "%{} uses %{}, which is not defined before it",
                value.raw(),
                operand.raw()
            ),
            Self::UnknownBlock { value } => {
                write!(f, "%{} is assigned to a nonexistent block", value.raw())
            }
            Self::NotInBlock { value } => {
                write!(f, "%{} is missing from its block", value.raw())
            }
            Self::UnknownType { value } => {
                write!(f, "%{} refers to a type outside the pool", value.raw())
            }
            Self::InvalidAccess { value, error } => write!(f, "%{}: {error}", value.raw()),
            Self::TypeMismatch {
                value,
                expected,
                found,
            } => write!(
                f,
                "%{} has type {found:?}, expected {expected:?}",
                value.raw()
            ),
        }
    }
}

/// Check every invariant of `graph` against `pool`.
///
/// Returns all problems found; an empty list means the graph is valid.
pub fn verify(graph: &ValueGraph, pool: &TypePool) -> Vec<VerifyProblem> {
    let mut problems = Vec::new();

    for (id, value) in graph.iter() {
        let mut operands_valid = true;
        for operand in value.kind.operands() {
            if operand >= id {
                problems.push(VerifyProblem::ForwardOperand { value: id, operand });
                operands_valid = false;
            }
        }

        if value.block.index() >= graph.num_blocks() {
            problems.push(VerifyProblem::UnknownBlock { value: id });
        } else if !graph.block_values(value.block).contains(&id) {
            problems.push(VerifyProblem::NotInBlock { value: id });
        }

        if operands_valid {
            verify_types(graph, pool, id, &mut problems);
        }
    }

    if !problems.is_empty() {
        tracing::debug!(count = problems.len(), "value graph failed verification");
    }
    problems
}

fn verify_types(
    graph: &ValueGraph,
    pool: &TypePool,
    id: ValueId,
    problems: &mut Vec<VerifyProblem>,
) {
    let value = graph.value(id);
    let in_pool = |value: ValueId| pool.contains(graph.ty(value));
    if !in_pool(id) || !value.kind.operands().into_iter().all(in_pool) {
        problems.push(VerifyProblem::UnknownType { value: id });
        return;
    }

    match &value.kind {
        ValueKind::Null | ValueKind::Parameter { .. } => {}
        ValueKind::Primitive(constant) => {
            expect_type(problems, id, Idx::of_basic(constant.basic_type()), value.ty);
        }
        ValueKind::SetField {
            object,
            chain,
            value: stored,
        } => {
            let object_ty = graph.ty(*object);
            expect_type(problems, id, object_ty, value.ty);
            match pool.resolve_chain(object_ty, chain) {
                Ok(field_ty) => expect_type(problems, id, field_ty, graph.ty(*stored)),
                Err(error) => problems.push(VerifyProblem::InvalidAccess { value: id, error }),
            }
        }
        ValueKind::GetField { object, chain } => {
            match pool.resolve_chain(graph.ty(*object), chain) {
                Ok(field_ty) => expect_type(problems, id, field_ty, value.ty),
                Err(error) => problems.push(VerifyProblem::InvalidAccess { value: id, error }),
            }
        }
    }
}

fn expect_type(problems: &mut Vec<VerifyProblem>, value: ValueId, expected: Idx, found: Idx) {
    if expected != found {
        problems.push(VerifyProblem::TypeMismatch {
            value,
            expected,
            found,
        });
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
