//! Value graph: the append-only arena of SSA values.
//!
//! # Architecture
//!
//! - **[`ValueGraph`]**: owns every value and the block membership lists
//! - **[`Value`]**: kind, result type and owning block of one node
//! - **[`ValueKind`]**: what the node computes; its operands are derived
//!   from the kind
//!
//! Values are named by [`ValueId`] and blocks by [`BlockId`]. Both are
//! allocated sequentially from 0. Because the arena only grows and every
//! operand is created before its user, operand handles always point
//! backwards and the graph is acyclic by construction.

use std::fmt;

use smallvec::SmallVec;

use crate::{BasicValueType, FieldAccessChain, Idx, TypePool};

// ── ID newtypes ─────────────────────────────────────────────────────

/// Handle of a value in a [`ValueGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct ValueId(u32);

impl ValueId {
    /// Create a value ID from a raw index.
    #[inline]
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw `u32` value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Get the index as `usize` (for indexing into `Vec`s).
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle of a basic block (scheduling point) in a [`ValueGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct BlockId(u32);

impl BlockId {
    /// The entry block every graph starts with.
    pub const ENTRY: Self = Self(0);

    /// Create a block ID from a raw index.
    #[inline]
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw `u32` value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Get the index as `usize` (for indexing into `Vec`s).
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ── Constants ───────────────────────────────────────────────────────

/// Primitive constant.
///
/// Floats are stored as raw bits so constants stay `Eq + Hash`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimitiveConstant {
    Int1(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float16(u16),
    Float32(u32),
    Float64(u64),
}

impl PrimitiveConstant {
    /// `f32` constant from its value.
    pub fn f32(value: f32) -> Self {
        Self::Float32(value.to_bits())
    }

    /// `f64` constant from its value.
    pub fn f64(value: f64) -> Self {
        Self::Float64(value.to_bits())
    }

    /// The basic type of this constant.
    pub fn basic_type(self) -> BasicValueType {
        match self {
            Self::Int1(_) => BasicValueType::Int1,
            Self::Int8(_) => BasicValueType::Int8,
            Self::Int16(_) => BasicValueType::Int16,
            Self::Int32(_) => BasicValueType::Int32,
            Self::Int64(_) => BasicValueType::Int64,
            Self::Float16(_) => BasicValueType::Float16,
            Self::Float32(_) => BasicValueType::Float32,
            Self::Float64(_) => BasicValueType::Float64,
        }
    }
}

impl fmt::Display for PrimitiveConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Int1(v) => write!(f, "{v}"),
            Self::Int8(v) => write!(f, "{v}"),
            Self::Int16(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float16(bits) => write!(f, "0x{bits:04x}"),
            Self::Float32(bits) => write!(f, "{}", f32::from_bits(bits)),
            Self::Float64(bits) => write!(f, "{}", f64::from_bits(bits)),
        }
    }
}

// ── Values ──────────────────────────────────────────────────────────

/// What a value computes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    /// The all-default instance of the value's type.
    Null,
    /// Opaque kernel parameter.
    Parameter { index: u32 },
    /// Primitive constant.
    Primitive(PrimitiveConstant),
    /// Functional update: `object` with the field at `chain` replaced by
    /// `value`. `object` is the previous version.
    SetField {
        object: ValueId,
        chain: FieldAccessChain,
        value: ValueId,
    },
    /// Materialized read of the field at `chain`.
    GetField {
        object: ValueId,
        chain: FieldAccessChain,
    },
}

impl ValueKind {
    /// Operands in order.
    pub fn operands(&self) -> SmallVec<[ValueId; 2]> {
        match *self {
            Self::Null | Self::Parameter { .. } | Self::Primitive(_) => SmallVec::new(),
            Self::SetField { object, value, .. } => smallvec::smallvec![object, value],
            Self::GetField { object, .. } => smallvec::smallvec![object],
        }
    }

    /// Mnemonic used in graph dumps.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Parameter { .. } => "param",
            Self::Primitive(_) => "const",
            Self::SetField { .. } => "set_field",
            Self::GetField { .. } => "get_field",
        }
    }
}

/// One node of the value graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Value {
    pub kind: ValueKind,
    pub ty: Idx,
    pub block: BlockId,
}

/// Position in a graph that a failed multi-node operation can roll back to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct GraphCheckpoint {
    values: usize,
    blocks: usize,
    num_params: u32,
}

/// Append-only arena of values, grouped into blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueGraph {
    values: Vec<Value>,
    /// Values owned by each block, in creation order.
    blocks: Vec<Vec<ValueId>>,
    num_params: u32,
}

impl Default for ValueGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueGraph {
    /// Create a graph with an empty entry block.
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            blocks: vec![Vec::new()],
            num_params: 0,
        }
    }

    // Read-only access

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn value(&self, id: ValueId) -> &Value {
        &self.values[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: ValueId) -> &ValueKind {
        &self.value(id).kind
    }

    #[inline]
    pub fn ty(&self, id: ValueId) -> Idx {
        self.value(id).ty
    }

    #[inline]
    pub fn block(&self, id: ValueId) -> BlockId {
        self.value(id).block
    }

    pub fn operands(&self, id: ValueId) -> SmallVec<[ValueId; 2]> {
        self.kind(id).operands()
    }

    /// `true` if `id` names a value in this graph.
    #[inline]
    pub fn contains(&self, id: ValueId) -> bool {
        id.index() < self.values.len()
    }

    /// All values in creation order.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value indices never exceed u32"
    )]
    pub fn iter(&self) -> impl Iterator<Item = (ValueId, &Value)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, value)| (ValueId::new(i as u32), value))
    }

    #[inline]
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Number of parameters created so far.
    #[inline]
    pub fn num_params(&self) -> u32 {
        self.num_params
    }

    /// Values scheduled in `block`, in creation order.
    pub fn block_values(&self, block: BlockId) -> &[ValueId] {
        &self.blocks[block.index()]
    }

    // Mutation (builder only)

    #[expect(
        clippy::cast_possible_truncation,
        reason = "value indices never exceed u32"
    )]
    pub(crate) fn push(&mut self, kind: ValueKind, ty: Idx, block: BlockId) -> ValueId {
        debug_assert!(
            block.index() < self.blocks.len(),
            "BlockId {} out of bounds (have {} blocks)",
            block.raw(),
            self.blocks.len(),
        );
        let id = ValueId::new(self.values.len() as u32);
        self.values.push(Value { kind, ty, block });
        self.blocks[block.index()].push(id);
        id
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "block indices never exceed u32"
    )]
    pub(crate) fn add_block(&mut self) -> BlockId {
        let id = BlockId::new(self.blocks.len() as u32);
        self.blocks.push(Vec::new());
        id
    }

    /// Allocate the next parameter index.
    pub(crate) fn next_param_index(&mut self) -> u32 {
        let index = self.num_params;
        self.num_params += 1;
        index
    }

    pub(crate) fn checkpoint(&self) -> GraphCheckpoint {
        GraphCheckpoint {
            values: self.values.len(),
            blocks: self.blocks.len(),
            num_params: self.num_params,
        }
    }

    /// Drop every value, block and parameter created after `checkpoint`.
    pub(crate) fn rollback(&mut self, checkpoint: GraphCheckpoint) {
        self.values.truncate(checkpoint.values);
        self.blocks.truncate(checkpoint.blocks);
        for members in &mut self.blocks {
            while members
                .last()
                .is_some_and(|id| id.index() >= checkpoint.values)
            {
                members.pop();
            }
        }
        self.num_params = checkpoint.num_params;
    }

    // Structural comparison

    /// `true` if `a` and `b` compute the same thing: same kind, same type
    /// and structurally equal operands.
    ///
    /// Identical handles are trivially equal; two `Null`s of one type are
    /// equal even though they are distinct nodes.
    pub fn structurally_equal(&self, a: ValueId, b: ValueId) -> bool {
        let mut worklist = vec![(a, b)];
        while let Some((a, b)) = worklist.pop() {
            if a == b {
                continue;
            }
            let (va, vb) = (self.value(a), self.value(b));
            if va.ty != vb.ty {
                return false;
            }
            match (&va.kind, &vb.kind) {
                (ValueKind::Null, ValueKind::Null) => {}
                (ValueKind::Parameter { index: ia }, ValueKind::Parameter { index: ib }) => {
                    if ia != ib {
                        return false;
                    }
                }
                (ValueKind::Primitive(ca), ValueKind::Primitive(cb)) => {
                    if ca != cb {
                        return false;
                    }
                }
                (
                    ValueKind::SetField {
                        object: oa,
                        chain: ca,
                        value: xa,
                    },
                    ValueKind::SetField {
                        object: ob,
                        chain: cb,
                        value: xb,
                    },
                ) => {
                    if ca != cb {
                        return false;
                    }
                    worklist.push((*oa, *ob));
                    worklist.push((*xa, *xb));
                }
                (
                    ValueKind::GetField {
                        object: oa,
                        chain: ca,
                    },
                    ValueKind::GetField {
                        object: ob,
                        chain: cb,
                    },
                ) => {
                    if ca != cb {
                        return false;
                    }
                    worklist.push((*oa, *ob));
                }
                _ => return false,
            }
        }
        true
    }

    /// Render the graph one value per line, grouped by block.
    pub fn display<'a>(&'a self, pool: &'a TypePool) -> GraphDisplay<'a> {
        GraphDisplay { graph: self, pool }
    }
}

/// `Display` adapter for a [`ValueGraph`].
///
/// ```text
/// block 0:
///   %0: {i32, f32} = null
///   %1: i32 = param 0
///   %2: {i32, f32} = set_field %0 [0] %1
/// ```
pub struct GraphDisplay<'a> {
    graph: &'a ValueGraph,
    pool: &'a TypePool,
}

impl fmt::Display for GraphDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (block_index, members) in self.graph.blocks.iter().enumerate() {
            writeln!(f, "block {block_index}:")?;
            for &id in members {
                let value = self.graph.value(id);
                write!(
                    f,
                    "  %{}: {} = {}",
                    id.raw(),
                    self.pool.display(value.ty),
                    value.kind.name()
                )?;
                match &value.kind {
                    ValueKind::Null => {}
                    ValueKind::Parameter { index } => write!(f, " {index}")?,
                    ValueKind::Primitive(constant) => write!(f, " {constant}")?,
                    ValueKind::SetField {
                        object,
                        chain,
                        value,
                    } => write!(f, " %{} {chain} %{}", object.raw(), value.raw())?,
                    ValueKind::GetField { object, chain } => {
                        write!(f, " %{} {chain}", object.raw())?;
                    }
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
