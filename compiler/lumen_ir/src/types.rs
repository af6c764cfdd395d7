//! Type pool: primitive basic types and interned structure types.
//!
//! # Design
//!
//! Every type is stored once in a flat `Vec<TypeData>` and referenced by
//! its [`Idx`]. Primitives are pre-interned at fixed indices. Structure
//! types go through a content-addressed cache keyed by the ordered field
//! list, so two structurally equal structures always share one `Idx` and
//! type comparison in the builder is a single integer compare.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::{FieldAccessChain, Idx, IrError};

/// Primitive basic types of the kernel IR.
///
/// The declaration order defines the fixed [`Idx`] of each primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BasicValueType {
    Void,
    Int1,
    Int8,
    Int16,
    Int32,
    Int64,
    Float16,
    Float32,
    Float64,
}

impl BasicValueType {
    /// All basic types in index order.
    pub const ALL: [Self; 9] = [
        Self::Void,
        Self::Int1,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Float16,
        Self::Float32,
        Self::Float64,
    ];

    /// Short IR spelling (`i32`, `f64`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Int1 => "i1",
            Self::Int8 => "i8",
            Self::Int16 => "i16",
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::Float16 => "f16",
            Self::Float32 => "f32",
            Self::Float64 => "f64",
        }
    }

    /// Storage size in bytes. `void` occupies no storage.
    pub const fn size_in_bytes(self) -> u32 {
        match self {
            Self::Void => 0,
            Self::Int1 | Self::Int8 => 1,
            Self::Int16 | Self::Float16 => 2,
            Self::Int32 | Self::Float32 => 4,
            Self::Int64 | Self::Float64 => 8,
        }
    }

    /// The basic type stored at a primitive index, if any.
    pub fn from_idx(idx: Idx) -> Option<Self> {
        Self::ALL.get(idx.index()).copied()
    }
}

/// Immutable ordered list of field types.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct StructureType {
    fields: Box<[Idx]>,
}

impl StructureType {
    /// Field types in declaration order.
    #[inline]
    pub fn fields(&self) -> &[Idx] {
        &self.fields
    }

    #[inline]
    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    /// Type of field `index`, or `None` if out of range.
    #[inline]
    pub fn field(&self, index: u32) -> Option<Idx> {
        self.fields.get(index as usize).copied()
    }
}

/// Contents of one pool entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeData {
    Primitive(BasicValueType),
    Structure(StructureType),
}

/// Owner of all types referenced by a value graph.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypePool {
    types: Vec<TypeData>,
    /// Structure cache: ordered field list → interned index.
    structures: FxHashMap<Box<[Idx]>, Idx>,
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}

impl TypePool {
    /// Create a pool with every primitive pre-interned at its fixed index.
    pub fn new() -> Self {
        let types = BasicValueType::ALL
            .iter()
            .map(|&basic| TypeData::Primitive(basic))
            .collect();
        Self {
            types,
            structures: FxHashMap::default(),
        }
    }

    /// Number of types in the pool, primitives included.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always `false`: primitives are pre-interned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Index of a primitive basic type.
    #[inline]
    pub fn primitive(&self, basic: BasicValueType) -> Idx {
        Idx::of_basic(basic)
    }

    /// Intern a structure type with the given ordered field types.
    ///
    /// Returns the existing index if a structure with the same field list
    /// was interned before.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "type pool indices never exceed u32"
    )]
    pub fn structure(&mut self, fields: &[Idx]) -> Idx {
        debug_assert!(
            fields.iter().all(|field| field.index() < self.types.len()),
            "structure field references a type outside the pool",
        );

        if let Some(&idx) = self.structures.get(fields) {
            return idx;
        }

        let idx = Idx::from_raw(self.types.len() as u32);
        let fields: Box<[Idx]> = fields.into();
        self.types.push(TypeData::Structure(StructureType {
            fields: fields.clone(),
        }));
        self.structures.insert(fields, idx);
        tracing::trace!(idx = idx.raw(), "interned structure type");
        idx
    }

    /// Look up a type's contents.
    ///
    /// Panics if `idx` was not allocated by this pool; use
    /// [`try_get`](Self::try_get) for handles of unknown origin.
    #[inline]
    pub fn get(&self, idx: Idx) -> &TypeData {
        &self.types[idx.index()]
    }

    /// Look up a type's contents, or `None` if `idx` is not in this pool.
    #[inline]
    pub fn try_get(&self, idx: Idx) -> Option<&TypeData> {
        self.types.get(idx.index())
    }

    /// `true` if `idx` was allocated by this pool.
    #[inline]
    pub fn contains(&self, idx: Idx) -> bool {
        idx.index() < self.types.len()
    }

    /// The structure type at `idx`, or `None` for primitives and handles
    /// outside the pool.
    pub fn structure_type(&self, idx: Idx) -> Option<&StructureType> {
        match self.try_get(idx)? {
            TypeData::Structure(structure) => Some(structure),
            TypeData::Primitive(_) => None,
        }
    }

    #[inline]
    pub fn is_structure(&self, idx: Idx) -> bool {
        self.structure_type(idx).is_some()
    }

    /// Resolve the type addressed by `chain` inside structure type `ty`.
    ///
    /// Every level of the chain must index into a structure and stay within
    /// its field count. The empty chain is rejected: it addresses no field.
    pub fn resolve_chain(&self, ty: Idx, chain: &FieldAccessChain) -> Result<Idx, IrError> {
        if chain.is_empty() {
            return Err(IrError::InvalidArgument("empty field access chain"));
        }

        let mut current = ty;
        for &index in chain.indices() {
            let Some(structure) = self.structure_type(current) else {
                return Err(IrError::TypeMismatch {
                    expected: "a structure type".to_owned(),
                    found: self.display(current).to_string(),
                });
            };
            current = structure
                .field(index)
                .ok_or_else(|| IrError::OutOfRangeAccess {
                    chain: chain.clone(),
                    index,
                    field_count: structure.num_fields(),
                })?;
        }
        Ok(current)
    }

    /// Render a type for diagnostics and graph dumps.
    pub fn display(&self, idx: Idx) -> TypeDisplay<'_> {
        TypeDisplay { pool: self, idx }
    }

    // Rollback support for multi-node builder operations

    pub(crate) fn checkpoint(&self) -> usize {
        self.types.len()
    }

    /// Forget every structure interned after `checkpoint`.
    pub(crate) fn rollback(&mut self, checkpoint: usize) {
        if checkpoint >= self.types.len() {
            return;
        }
        self.types.truncate(checkpoint);
        self.structures.retain(|_, idx| idx.index() < checkpoint);
    }
}

/// `Display` adapter for a pooled type: `i32`, `{i32, {f32, f32}}`.
pub struct TypeDisplay<'a> {
    pool: &'a TypePool,
    idx: Idx,
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pool.try_get(self.idx) {
            None => write!(f, "<unknown type {}>", self.idx.raw()),
            Some(TypeData::Primitive(basic)) => f.write_str(basic.name()),
            Some(TypeData::Structure(structure)) => {
                f.write_str("{")?;
                for (i, &field) in structure.fields().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", self.pool.display(field))?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
