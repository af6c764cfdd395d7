use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{chain, init_tracing};
use crate::{PrimitiveConstant, TypePool, ValueGraph, ValueKind};

/// Minimal host object model standing in for runtime instances.
#[derive(Debug)]
#[allow(dead_code)] // payload exists only to model the host shape
enum HostValue {
    Null,
    Int(i32),
    Float(f32),
    Enum(i8),
    Struct(&'static str, Vec<HostValue>),
    Object(&'static str),
    Array(Vec<HostValue>),
}

struct Descriptor;

impl HostTypeDescriptor for Descriptor {
    type Instance = HostValue;

    fn kind(&self, instance: &HostValue) -> HostKind {
        match instance {
            HostValue::Null => HostKind::Null,
            HostValue::Int(_) | HostValue::Float(_) => HostKind::Primitive,
            HostValue::Enum(_) => HostKind::Enumeration,
            HostValue::Struct(..) => HostKind::Composite,
            HostValue::Object(_) => HostKind::Reference,
            HostValue::Array(_) => HostKind::Array,
        }
    }

    fn type_name(&self, instance: &HostValue) -> String {
        match instance {
            HostValue::Null => "null".to_owned(),
            HostValue::Int(_) => "int".to_owned(),
            HostValue::Float(_) => "float".to_owned(),
            HostValue::Enum(_) => "Color".to_owned(),
            HostValue::Struct(name, _) | HostValue::Object(name) => (*name).to_owned(),
            HostValue::Array(_) => "int[]".to_owned(),
        }
    }

    fn field_count(&self, instance: &HostValue) -> usize {
        match instance {
            HostValue::Struct(_, fields) => fields.len(),
            _ => 0,
        }
    }

    fn field_value<'i>(&self, instance: &'i HostValue, index: usize) -> Option<&'i HostValue> {
        match instance {
            HostValue::Struct(_, fields) => fields.get(index),
            _ => None,
        }
    }
}

/// Factory that lowers ints, floats and enums, counting its calls.
#[derive(Default)]
struct Factory {
    calls: usize,
}

impl PrimitiveValueFactory<HostValue> for Factory {
    fn create_primitive_value(
        &mut self,
        builder: &mut ValueBuilder<'_>,
        instance: &HostValue,
    ) -> Result<ValueId, IrError> {
        self.calls += 1;
        match *instance {
            HostValue::Int(v) => Ok(builder.create_primitive(PrimitiveConstant::Int32(v))),
            HostValue::Float(v) => Ok(builder.create_primitive(PrimitiveConstant::f32(v))),
            HostValue::Enum(v) => Ok(builder.create_primitive(PrimitiveConstant::Int8(v))),
            _ => Err(IrError::InvalidArgument("not a primitive")),
        }
    }
}

fn point(x: i32, y: f32) -> HostValue {
    HostValue::Struct("Point", vec![HostValue::Int(x), HostValue::Float(y)])
}

#[test]
fn primitive_is_delegated_to_factory() {
    let mut graph = ValueGraph::new();
    let mut pool = TypePool::new();
    let mut builder = ValueBuilder::new(&mut graph, &mut pool);
    let mut factory = Factory::default();

    let v = builder
        .create_value_from_host(&HostValue::Int(5), &Descriptor, &mut factory)
        .unwrap();
    let e = builder
        .create_value_from_host(&HostValue::Enum(2), &Descriptor, &mut factory)
        .unwrap();

    assert_eq!(factory.calls, 2);
    assert_eq!(
        builder.graph().kind(v),
        &ValueKind::Primitive(PrimitiveConstant::Int32(5))
    );
    assert_eq!(builder.graph().ty(e), Idx::INT8);
}

#[test]
fn composite_mirrors_fields_in_order() {
    init_tracing();
    let mut graph = ValueGraph::new();
    let mut pool = TypePool::new();
    let mut builder = ValueBuilder::new(&mut graph, &mut pool);
    let mut factory = Factory::default();

    let s = builder
        .create_value_from_host(&point(3, 0.5), &Descriptor, &mut factory)
        .unwrap();

    let expected_ty = builder.pool_mut().structure(&[Idx::INT32, Idx::FLOAT32]);
    assert_eq!(builder.graph().ty(s), expected_ty);

    let x = builder.create_get_field(s, &chain(&[0])).unwrap();
    let y = builder.create_get_field(s, &chain(&[1])).unwrap();
    assert_eq!(
        builder.graph().kind(x),
        &ValueKind::Primitive(PrimitiveConstant::Int32(3))
    );
    assert_eq!(
        builder.graph().kind(y),
        &ValueKind::Primitive(PrimitiveConstant::f32(0.5))
    );
}

#[test]
fn nested_composites_intern_one_type() {
    let mut graph = ValueGraph::new();
    let mut pool = TypePool::new();
    let mut builder = ValueBuilder::new(&mut graph, &mut pool);
    let mut factory = Factory::default();

    let line = HostValue::Struct("Line", vec![point(0, 0.0), point(4, 2.0)]);
    let s = builder
        .create_value_from_host(&line, &Descriptor, &mut factory)
        .unwrap();

    let point_ty = builder.pool_mut().structure(&[Idx::INT32, Idx::FLOAT32]);
    let line_ty = builder.pool_mut().structure(&[point_ty, point_ty]);
    assert_eq!(builder.graph().ty(s), line_ty);

    let end_x = builder.create_get_field(s, &chain(&[1, 0])).unwrap();
    assert_eq!(
        builder.graph().kind(end_x),
        &ValueKind::Primitive(PrimitiveConstant::Int32(4))
    );
}

#[test]
fn reference_and_array_are_rejected() {
    let mut graph = ValueGraph::new();
    let mut pool = TypePool::new();
    let mut builder = ValueBuilder::new(&mut graph, &mut pool);
    let mut factory = Factory::default();

    assert_eq!(
        builder.create_value_from_host(&HostValue::Object("Buffer"), &Descriptor, &mut factory),
        Err(IrError::UnsupportedHostType {
            type_name: "Buffer".to_owned(),
            kind: HostKind::Reference,
        })
    );
    assert_eq!(
        builder.create_value_from_host(
            &HostValue::Array(vec![HostValue::Int(1)]),
            &Descriptor,
            &mut factory
        ),
        Err(IrError::UnsupportedHostType {
            type_name: "int[]".to_owned(),
            kind: HostKind::Array,
        })
    );
    assert_eq!(factory.calls, 0);
    assert!(builder.graph().is_empty());
}

#[test]
fn null_instance_is_invalid() {
    let mut graph = ValueGraph::new();
    let mut pool = TypePool::new();
    let mut builder = ValueBuilder::new(&mut graph, &mut pool);
    let mut factory = Factory::default();

    assert_eq!(
        builder.create_value_from_host(&HostValue::Null, &Descriptor, &mut factory),
        Err(IrError::InvalidArgument("null host instance"))
    );
}

#[test]
fn failure_inside_composite_rolls_back() {
    let mut graph = ValueGraph::new();
    let mut pool = TypePool::new();
    let mut builder = ValueBuilder::new(&mut graph, &mut pool);
    let mut factory = Factory::default();

    let kept = builder.add_parameter(Idx::INT32);
    let pair_ty = builder.pool_mut().structure(&[Idx::INT32, Idx::INT32]);
    let types_before = builder.pool().len();
    let bad = HostValue::Struct(
        "Holder",
        vec![HostValue::Int(1), point(2, 3.0), HostValue::Object("Shared")],
    );
    let err = builder
        .create_value_from_host(&bad, &Descriptor, &mut factory)
        .unwrap_err();

    assert!(matches!(
        err,
        IrError::UnsupportedHostType {
            kind: HostKind::Reference,
            ..
        }
    ));
    assert_eq!(factory.calls, 3);
    assert_eq!(builder.graph().len(), 1);
    assert_eq!(builder.graph().block_values(builder.current_block()), &[kept]);

    // `Point` was interned while converting the second field; it is gone,
    // while structures interned before the call survive.
    assert_eq!(builder.pool().len(), types_before);
    assert!(builder.pool().contains(pair_ty));
    assert!(!builder.pool().contains(Idx::from_raw(pair_ty.raw() + 1)));
}

#[test]
fn host_kind_display() {
    assert_eq!(HostKind::Reference.to_string(), "reference");
    assert_eq!(HostKind::Enumeration.to_string(), "enumeration");
}
