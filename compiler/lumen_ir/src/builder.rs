//! Value builder: structure construction and field access with load
//! forwarding.
//!
//! # Forwarding
//!
//! A field write never mutates; it appends a `SetField` whose `object`
//! operand is the previous version. A field read walks that version chain
//! backwards from the object it is given:
//!
//! - a write to exactly the requested chain answers the read with the
//!   written value itself (no node is created);
//! - a write to a chain that encloses the requested one answers the read by
//!   reading the rest of the chain out of the written value;
//! - a write nested inside the requested field stops forwarding (the field
//!   is partially overwritten), and the read is materialized;
//! - a write to an unrelated field is skipped and the walk continues;
//! - reaching a `Null` answers the read with the default of the field type;
//! - reaching any other producer materializes a `GetField`.

use crate::value::GraphCheckpoint;
use crate::{
    BlockId, FieldAccessChain, Idx, IrError, PrimitiveConstant, TypePool, ValueGraph, ValueId,
    ValueKind,
};

/// Builder state a failed multi-node operation rolls back to.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BuilderCheckpoint {
    graph: GraphCheckpoint,
    types: usize,
    block: BlockId,
}

/// Outcome of walking a version chain for a field read.
#[derive(Debug)]
enum Forward {
    /// The read resolves to this existing value.
    Stored(ValueId),
    /// The read resolves to reading `suffix` out of a stored value.
    Nested {
        value: ValueId,
        suffix: FieldAccessChain,
    },
    /// The walk reached a `Null`: the field holds its default.
    Default,
    /// No static answer; a `GetField` must be materialized.
    Opaque,
}

/// Builder for values in a [`ValueGraph`].
///
/// Borrows the graph and the type pool for the duration of construction
/// and appends values to the current block.
///
/// Follows the "position at a block, emit values" pattern: the builder
/// starts in the entry block and [`position_at`](Self::position_at) moves
/// the insertion point.
pub struct ValueBuilder<'a> {
    graph: &'a mut ValueGraph,
    pool: &'a mut TypePool,
    current_block: BlockId,
}

impl<'a> ValueBuilder<'a> {
    /// Create a builder positioned at the entry block.
    pub fn new(graph: &'a mut ValueGraph, pool: &'a mut TypePool) -> Self {
        Self {
            graph,
            pool,
            current_block: BlockId::ENTRY,
        }
    }

    #[inline]
    pub fn graph(&self) -> &ValueGraph {
        self.graph
    }

    #[inline]
    pub fn pool(&self) -> &TypePool {
        self.pool
    }

    /// Mutable pool access, for collaborators that intern types.
    #[inline]
    pub fn pool_mut(&mut self) -> &mut TypePool {
        self.pool
    }

    // Block management

    /// Allocate a new empty block and return its ID.
    pub fn new_block(&mut self) -> BlockId {
        self.graph.add_block()
    }

    /// Set the insertion point to `block`.
    pub fn position_at(&mut self, block: BlockId) {
        debug_assert!(
            block.index() < self.graph.num_blocks(),
            "BlockId {} out of bounds (have {} blocks)",
            block.raw(),
            self.graph.num_blocks(),
        );
        self.current_block = block;
    }

    #[inline]
    pub fn current_block(&self) -> BlockId {
        self.current_block
    }

    // Leaf values

    fn append(&mut self, kind: ValueKind, ty: Idx) -> ValueId {
        let id = self.graph.push(kind, ty, self.current_block);
        tracing::trace!(
            value = id.raw(),
            block = self.current_block.raw(),
            kind = self.graph.kind(id).name(),
            "appended value"
        );
        id
    }

    /// The all-default value of `ty`.
    pub fn create_null(&mut self, ty: Idx) -> ValueId {
        self.append(ValueKind::Null, ty)
    }

    /// A fresh opaque parameter of type `ty`.
    pub fn add_parameter(&mut self, ty: Idx) -> ValueId {
        let index = self.graph.next_param_index();
        self.append(ValueKind::Parameter { index }, ty)
    }

    /// A primitive constant.
    pub fn create_primitive(&mut self, constant: PrimitiveConstant) -> ValueId {
        let ty = self.pool.primitive(constant.basic_type());
        self.append(ValueKind::Primitive(constant), ty)
    }

    // Structure values

    /// The canonical default instance of structure type `ty`.
    ///
    /// Each call appends a new `Null`; results of two calls are structurally
    /// equal but not identical.
    pub fn create_structure_value(&mut self, ty: Idx) -> Result<ValueId, IrError> {
        if !self.pool.is_structure(ty) {
            return Err(IrError::TypeMismatch {
                expected: "a structure type".to_owned(),
                found: self.pool.display(ty).to_string(),
            });
        }
        Ok(self.create_null(ty))
    }

    /// A structure whose field `i` holds `operands[i]`.
    ///
    /// The structure type is interned from the operand types in order, and
    /// the operands are folded into its default value by one `SetField` per
    /// field.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "field counts never exceed u32"
    )]
    pub fn create_structure_from_values(
        &mut self,
        operands: &[ValueId],
    ) -> Result<ValueId, IrError> {
        if operands.is_empty() {
            return Err(IrError::InvalidArgument(
                "structure value needs at least one operand",
            ));
        }

        let field_types: Vec<Idx> = operands.iter().map(|&op| self.graph.ty(op)).collect();
        let ty = self.pool.structure(&field_types);

        let mut current = self.create_null(ty);
        for (index, &operand) in operands.iter().enumerate() {
            current =
                self.create_set_field(current, &FieldAccessChain::single(index as u32), operand)?;
        }
        Ok(current)
    }

    // Field access

    /// Type of the field addressed by `chain` in `object`.
    fn field_type(&self, object: ValueId, chain: &FieldAccessChain) -> Result<Idx, IrError> {
        let object_ty = self.graph.ty(object);
        if !self.pool.is_structure(object_ty) {
            return Err(IrError::TypeMismatch {
                expected: "a structure value".to_owned(),
                found: self.pool.display(object_ty).to_string(),
            });
        }
        self.pool.resolve_chain(object_ty, chain)
    }

    /// Read the field at `chain` of `object`.
    ///
    /// Forwards to a recorded write when the version chain of `object`
    /// answers the read statically; see the module docs.
    pub fn create_get_field(
        &mut self,
        object: ValueId,
        chain: &FieldAccessChain,
    ) -> Result<ValueId, IrError> {
        let field_ty = self.field_type(object, chain)?;

        match self.forward(object, chain) {
            Forward::Stored(value) => {
                tracing::debug!(
                    object = object.raw(),
                    %chain,
                    value = value.raw(),
                    "forwarded field read to stored value"
                );
                Ok(value)
            }
            Forward::Nested { value, suffix } => self.create_get_field(value, &suffix),
            Forward::Default => Ok(self.create_null(field_ty)),
            Forward::Opaque => {
                tracing::debug!(object = object.raw(), %chain, "materialized field read");
                Ok(self.append(
                    ValueKind::GetField {
                        object,
                        chain: chain.clone(),
                    },
                    field_ty,
                ))
            }
        }
    }

    /// Walk the version chain of `object` looking for the value at `chain`.
    ///
    /// Inspects every predecessor: writes to unrelated fields never end the
    /// walk early.
    fn forward(&self, object: ValueId, chain: &FieldAccessChain) -> Forward {
        let mut current = object;
        loop {
            match self.graph.kind(current) {
                ValueKind::SetField {
                    object: previous,
                    chain: stored,
                    value,
                } => {
                    if stored == chain {
                        return Forward::Stored(*value);
                    }
                    if let Some(suffix) = chain.strip_prefix(stored) {
                        return Forward::Nested {
                            value: *value,
                            suffix,
                        };
                    }
                    if chain.is_prefix_of(stored) {
                        return Forward::Opaque;
                    }
                    current = *previous;
                }
                ValueKind::Null => return Forward::Default,
                ValueKind::Parameter { .. }
                | ValueKind::Primitive(_)
                | ValueKind::GetField { .. } => return Forward::Opaque,
            }
        }
    }

    /// Write `value` into the field at `chain` of `object`.
    ///
    /// Always appends a new version; writes are never elided, even when
    /// `value` equals the current field value.
    pub fn create_set_field(
        &mut self,
        object: ValueId,
        chain: &FieldAccessChain,
        value: ValueId,
    ) -> Result<ValueId, IrError> {
        let field_ty = self.field_type(object, chain)?;
        let value_ty = self.graph.ty(value);
        if field_ty != value_ty {
            return Err(IrError::TypeMismatch {
                expected: self.pool.display(field_ty).to_string(),
                found: self.pool.display(value_ty).to_string(),
            });
        }

        let object_ty = self.graph.ty(object);
        Ok(self.append(
            ValueKind::SetField {
                object,
                chain: chain.clone(),
                value,
            },
            object_ty,
        ))
    }

    // Rollback support for multi-node operations

    pub(crate) fn checkpoint(&self) -> BuilderCheckpoint {
        BuilderCheckpoint {
            graph: self.graph.checkpoint(),
            types: self.pool.checkpoint(),
            block: self.current_block,
        }
    }

    /// Undo every value appended and every type interned since
    /// `checkpoint`, and restore the insertion point.
    pub(crate) fn rollback(&mut self, checkpoint: BuilderCheckpoint) {
        self.graph.rollback(checkpoint.graph);
        self.pool.rollback(checkpoint.types);
        self.current_block = checkpoint.block;
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
