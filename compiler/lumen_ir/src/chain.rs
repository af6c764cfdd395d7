//! Field access chains.
//!
//! A chain is the path of field indices from a structure value down to one
//! of its (possibly nested) fields: `[1, 0]` is field 0 of field 1.

use std::fmt;

use smallvec::SmallVec;

/// Immutable ordered sequence of field indices.
///
/// Chains are lookup keys: equality is element-wise and they own nothing
/// but the indices themselves. Most chains are one or two levels deep, so
/// up to four indices are stored inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldAccessChain(SmallVec<[u32; 4]>);

impl FieldAccessChain {
    /// Create a chain from a slice of field indices.
    pub fn new(indices: &[u32]) -> Self {
        Self(SmallVec::from_slice(indices))
    }

    /// The single-field chain `[index]`.
    pub fn single(index: u32) -> Self {
        let mut indices = SmallVec::new();
        indices.push(index);
        Self(indices)
    }

    /// The field indices, outermost first.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    /// Number of levels in the chain.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` for the empty chain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A new chain with `index` appended as the innermost access.
    #[must_use]
    pub fn append(&self, index: u32) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// The first `len` accesses of this chain.
    ///
    /// Returns `None` if `len` exceeds the chain length.
    pub fn prefix(&self, len: usize) -> Option<Self> {
        self.0.get(..len).map(Self::new)
    }

    /// `true` if `self` is a prefix of `other` (including `self == other`).
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.0.starts_with(&self.0)
    }

    /// The remainder of `self` after removing a strict `prefix`.
    ///
    /// Returns `None` when `prefix` is not a proper prefix of `self`.
    pub fn strip_prefix(&self, prefix: &Self) -> Option<Self> {
        if prefix.len() < self.len() && prefix.is_prefix_of(self) {
            Some(Self::new(&self.0[prefix.len()..]))
        } else {
            None
        }
    }
}

impl From<&[u32]> for FieldAccessChain {
    fn from(indices: &[u32]) -> Self {
        Self::new(indices)
    }
}

impl<const N: usize> From<[u32; N]> for FieldAccessChain {
    fn from(indices: [u32; N]) -> Self {
        Self::new(&indices)
    }
}

impl FromIterator<u32> for FieldAccessChain {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for FieldAccessChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{index}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
