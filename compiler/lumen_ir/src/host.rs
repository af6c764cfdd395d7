//! Host object conversion.
//!
//! The builder never inspects host objects itself. A [`HostTypeDescriptor`]
//! supplied by the frontend classifies instances and exposes their fields;
//! a [`PrimitiveValueFactory`] turns primitive and enumeration instances
//! into leaf values. Composite instances are mirrored as structure values
//! field by field.

use std::fmt;

use crate::{FieldAccessChain, Idx, IrError, ValueBuilder, ValueId};

/// Classification of a host instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostKind {
    /// A null reference.
    Null,
    /// Boolean, integer or floating-point scalar.
    Primitive,
    /// Enumeration value (lowered like its underlying primitive).
    Enumeration,
    /// Value type with ordered fields.
    Composite,
    /// Instance with shared, mutable reference semantics.
    Reference,
    /// Array instance.
    Array,
}

impl fmt::Display for HostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Primitive => "primitive",
            Self::Enumeration => "enumeration",
            Self::Composite => "composite",
            Self::Reference => "reference",
            Self::Array => "array",
        })
    }
}

/// Type and field introspection for host instances.
///
/// Queried, never mutated, during conversion.
pub trait HostTypeDescriptor {
    /// The host-side instance representation.
    type Instance: ?Sized;

    fn kind(&self, instance: &Self::Instance) -> HostKind;

    /// Host type name, for diagnostics.
    fn type_name(&self, instance: &Self::Instance) -> String;

    /// Number of fields of a composite instance.
    fn field_count(&self, instance: &Self::Instance) -> usize;

    /// Runtime value of field `index` of a composite instance, in
    /// declaration order.
    fn field_value<'i>(
        &self,
        instance: &'i Self::Instance,
        index: usize,
    ) -> Option<&'i Self::Instance>;
}

/// Converts primitive and enumeration instances into leaf values.
pub trait PrimitiveValueFactory<I: ?Sized> {
    fn create_primitive_value(
        &mut self,
        builder: &mut ValueBuilder<'_>,
        instance: &I,
    ) -> Result<ValueId, IrError>;
}

impl ValueBuilder<'_> {
    /// Mirror a host instance as a value.
    ///
    /// Primitive and enumeration instances go through `factory`. Composite
    /// instances become a structure value: fields are converted in
    /// declaration order, the structure type is interned from their types,
    /// and each field is chained onto the default value with a `SetField`.
    ///
    /// Reference and array instances are rejected with
    /// [`IrError::UnsupportedHostType`]: a flat structure cannot represent
    /// shared mutable state. A null instance is an
    /// [`IrError::InvalidArgument`].
    ///
    /// On failure every value appended and every structure type interned
    /// by this call is rolled back.
    pub fn create_value_from_host<D, F>(
        &mut self,
        instance: &D::Instance,
        descriptor: &D,
        factory: &mut F,
    ) -> Result<ValueId, IrError>
    where
        D: HostTypeDescriptor,
        F: PrimitiveValueFactory<D::Instance>,
    {
        let checkpoint = self.checkpoint();
        let result = self.convert_host(instance, descriptor, factory);
        if let Err(error) = &result {
            tracing::debug!(%error, "host conversion failed, rolling back");
            self.rollback(checkpoint);
        }
        result
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "field counts never exceed u32"
    )]
    fn convert_host<D, F>(
        &mut self,
        instance: &D::Instance,
        descriptor: &D,
        factory: &mut F,
    ) -> Result<ValueId, IrError>
    where
        D: HostTypeDescriptor,
        F: PrimitiveValueFactory<D::Instance>,
    {
        match descriptor.kind(instance) {
            HostKind::Null => Err(IrError::InvalidArgument("null host instance")),
            HostKind::Primitive | HostKind::Enumeration => {
                factory.create_primitive_value(self, instance)
            }
            kind @ (HostKind::Reference | HostKind::Array) => Err(IrError::UnsupportedHostType {
                type_name: descriptor.type_name(instance),
                kind,
            }),
            HostKind::Composite => {
                let count = descriptor.field_count(instance);
                let mut fields = Vec::with_capacity(count);
                for index in 0..count {
                    let field = descriptor.field_value(instance, index).ok_or(
                        IrError::InvalidArgument("host descriptor is missing a declared field"),
                    )?;
                    fields.push(self.convert_host(field, descriptor, factory)?);
                }

                let field_types: Vec<Idx> =
                    fields.iter().map(|&field| self.graph().ty(field)).collect();
                let ty = self.pool_mut().structure(&field_types);

                let mut current = self.create_structure_value(ty)?;
                for (index, field) in fields.into_iter().enumerate() {
                    current = self.create_set_field(
                        current,
                        &FieldAccessChain::single(index as u32),
                        field,
                    )?;
                }
                tracing::debug!(
                    host_type = %descriptor.type_name(instance),
                    value = current.raw(),
                    "mirrored host composite"
                );
                Ok(current)
            }
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
