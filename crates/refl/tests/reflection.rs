// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::float_cmp)] // Test assertions with constants
#![allow(clippy::doc_markdown)] // Test documentation
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(clippy::items_after_statements)] // Test helpers
#![allow(clippy::wildcard_imports)] // Test utility imports
#![allow(clippy::similar_names)] // Test variable naming

//! End-to-end reflection through `#[derive(Reflect)]`.
//!
//! Covers by-name writes on flat and nested structs, registration order, type
//! recovery by ordinal and the derive attributes.

use refl::{
    get_field, set_field, visit_fields, FieldAt, FieldTypeOf, FieldTypeVariant, FieldTypeVisitor,
    Reflect, ReflectError, TypeCarrier,
};
use std::any::TypeId;
use std::mem::offset_of;

#[derive(Reflect, Debug, Default, Clone, PartialEq)]
struct Foo {
    i: i32,
    d: f64,
}

#[derive(Reflect, Debug, Default)]
struct Bar {
    foo: Foo,
    str: String,
}

/// No `Default`, no `Clone`: the catalogue must never need a value.
struct Handle {
    raw: u64,
}

impl Handle {
    fn open(raw: u64) -> Self {
        Self { raw }
    }
}

#[derive(Reflect)]
struct Mixed {
    count: i32,
    ratio: f64,
    handle: Handle,
    cursor: *mut i32,
}

#[derive(Reflect, Default)]
#[reflect(catalogue = SensorSlot)]
struct Sensor {
    sensor_id: u32,
    #[reflect(rename = "temp")]
    temperature: f64,
    #[reflect(skip)]
    scratch: Vec<u8>,
    r#type: u8,
}

#[derive(Reflect, Default)]
struct Node {
    val: i32,
    next: Option<Box<Self>>,
}

fn same_type<A: 'static, B: 'static>() -> bool {
    TypeId::of::<A>() == TypeId::of::<B>()
}

#[test]
fn test_set_primitive_fields_by_name() {
    let mut foo = Foo::default();
    let registry = Foo::registry();

    registry.set_field_value(&mut foo, "i", 10).unwrap();
    registry.set_field_value(&mut foo, "d", 3.14).unwrap();

    assert_eq!(foo, Foo { i: 10, d: 3.14 });
}

#[test]
fn test_set_nested_and_string_fields_by_name() {
    let mut bar = Bar::default();

    Bar::registry()
        .set_field_value(&mut bar, "foo", Foo { i: 10, d: 3.14 })
        .unwrap();
    Bar::registry()
        .set_field_value(&mut bar, "str", String::from("xxx"))
        .unwrap();

    assert_eq!(bar.foo.i, 10);
    assert_eq!(bar.foo.d, 3.14);
    assert_eq!(bar.str, "xxx");

    // Overwriting drops the previous String.
    Bar::registry()
        .set_field_value(&mut bar, "str", "replaced".to_string())
        .unwrap();
    assert_eq!(bar.str, "replaced");
}

#[test]
fn test_unknown_name_leaves_instance_unchanged() {
    let mut foo = Foo { i: 1, d: 2.0 };

    let err = Foo::registry()
        .set_field_value(&mut foo, "missing", 5)
        .unwrap_err();

    assert!(matches!(err, ReflectError::FieldNotFound { .. }));
    assert_eq!(foo, Foo { i: 1, d: 2.0 });
}

#[test]
fn test_wrong_value_type_is_rejected() {
    let mut foo = Foo { i: 1, d: 2.0 };

    let err = Foo::registry()
        .set_field_value(&mut foo, "d", 7_i32)
        .unwrap_err();

    match err {
        ReflectError::TypeMismatch {
            field,
            expected,
            got,
        } => {
            assert_eq!(field, "d");
            assert_eq!(expected, "f64");
            assert_eq!(got, "i32");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(foo.d, 2.0);
}

#[test]
fn test_registration_order_is_declaration_order() {
    let names: Vec<_> = Bar::registry().names().collect();
    assert_eq!(names, ["foo", "str"]);

    let names: Vec<_> = Mixed::registry().names().collect();
    assert_eq!(names, ["count", "ratio", "handle", "cursor"]);
}

#[test]
fn test_offsets_match_layout() {
    let registry = Mixed::registry();
    assert_eq!(registry.field("count").unwrap().offset(), offset_of!(Mixed, count));
    assert_eq!(registry.field("ratio").unwrap().offset(), offset_of!(Mixed, ratio));
    assert_eq!(registry.field("handle").unwrap().offset(), offset_of!(Mixed, handle));
    assert_eq!(registry.field("cursor").unwrap().offset(), offset_of!(Mixed, cursor));
}

#[test]
fn test_type_recovery_by_ordinal() {
    assert!(same_type::<FieldTypeOf<Mixed, 0>, i32>());
    assert!(same_type::<FieldTypeOf<Mixed, 1>, f64>());
    assert!(same_type::<FieldTypeOf<Mixed, 2>, Handle>());
    assert!(same_type::<FieldTypeOf<Mixed, 3>, *mut i32>());

    // Recovered types are usable as ordinary types.
    let mut slot = 0;
    let mixed = Mixed {
        count: <FieldTypeOf<Mixed, 0>>::default(),
        ratio: 0.5,
        handle: Handle::open(0xfeed),
        cursor: &mut slot as FieldTypeOf<Mixed, 3>,
    };
    assert_eq!(get_field::<Mixed, 2>(&mixed).raw, 0xfeed);
    assert_eq!(*get_field::<Mixed, 1>(&mixed), 0.5);
}

#[test]
fn test_table_alternatives_follow_ordinals() {
    for (index, (name, variant)) in Mixed::TYPE_TABLE.iter().enumerate() {
        assert_eq!(variant.index(), index);
        assert_eq!(variant.name(), *name);
        assert_eq!(Mixed::registry().field_at(index).unwrap().name(), *name);
    }
    assert!(matches!(Mixed::TYPE_TABLE[2].1, MixedField::Handle(_)));
    assert!(matches!(Mixed::TYPE_TABLE[3].1, MixedField::Cursor(_)));
}

struct Layout(Vec<(&'static str, usize, usize)>);

impl FieldTypeVisitor for Layout {
    type Output = bool;

    fn visit<FT: 'static>(&mut self, name: &'static str, carrier: TypeCarrier<FT>) -> bool {
        self.0.push((name, carrier.size(), carrier.align()));
        carrier.is::<*mut i32>()
    }
}

#[test]
fn test_visitor_sees_every_field_type() {
    let mut layout = Layout(Vec::new());
    let pointers = visit_fields::<Mixed, _>(&mut layout);

    assert_eq!(pointers, [false, false, false, true]);
    assert_eq!(layout.0[0], ("count", 4, 4));
    assert_eq!(layout.0[2].1, std::mem::size_of::<Handle>());
}

#[test]
fn test_ordinal_write_is_checked_at_compile_time() {
    let mut bar = Bar::default();
    set_field::<Bar, 1>(&mut bar, "ordinal".to_string());
    set_field::<Bar, 0>(&mut bar, Foo { i: 3, d: 0.0 });

    assert_eq!(bar.str, "ordinal");
    assert_eq!(bar.foo.i, 3);
}

#[test]
fn test_rename_skip_and_raw_identifiers() {
    let names: Vec<_> = Sensor::registry().names().collect();
    assert_eq!(names, ["sensor_id", "temp", "type"]);
    assert_eq!(Sensor::FIELD_COUNT, 3);

    let mut sensor = Sensor::default();
    Sensor::registry()
        .set_field_value(&mut sensor, "temp", 21.5)
        .unwrap();
    Sensor::registry()
        .set_field_value(&mut sensor, "type", 2_u8)
        .unwrap();
    assert_eq!(sensor.temperature, 21.5);
    assert_eq!(sensor.r#type, 2);
    assert!(sensor.scratch.is_empty());

    assert!(Sensor::registry().field("scratch").is_err());
    assert!(Sensor::registry().field("temperature").is_err());

    // Skipped fields close up the ordinals.
    assert_eq!(<Sensor as FieldAt<1>>::NAME, "temp");
    assert_eq!(<Sensor as FieldAt<2>>::OFFSET, offset_of!(Sensor, r#type));
    assert!(matches!(Sensor::TYPE_TABLE[0].1, SensorSlot::SensorId(_)));
}

#[test]
fn test_compile_time_name_lookup() {
    const TEMP: usize = refl::field_index!(Sensor, "temp");
    assert_eq!(TEMP, 1);
    assert!(same_type::<FieldTypeOf<Sensor, { refl::field_index!(Sensor, "type") }>, u8>());
}

#[test]
fn test_registry_is_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|n| {
            std::thread::spawn(move || {
                let mut foo = Foo::default();
                Foo::registry().set_field_value(&mut foo, "i", n).unwrap();
                (Foo::registry() as *const _ as usize, foo.i)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let first = results[0].0;
    for (n, (addr, value)) in results.into_iter().enumerate() {
        assert_eq!(addr, first);
        assert_eq!(value, n as i32);
    }
}

struct TypeNames(Vec<&'static str>);

impl FieldTypeVisitor for TypeNames {
    type Output = bool;

    fn visit<FT: 'static>(&mut self, _name: &'static str, carrier: TypeCarrier<FT>) -> bool {
        self.0.push(carrier.type_name());
        carrier.is::<Option<Box<Node>>>()
    }
}

#[test]
fn test_self_in_field_type_names_the_struct() {
    let mut names = TypeNames(Vec::new());
    let matches = visit_fields::<Node, _>(&mut names);

    assert_eq!(matches, [false, true]);
    assert_eq!(names.0[1], std::any::type_name::<Option<Box<Node>>>());
    assert_eq!(
        names.0[1],
        Node::registry().field_at(1).unwrap().type_name()
    );
    assert!(same_type::<FieldTypeOf<Node, 1>, Option<Box<Node>>>());

    let mut head = Node::default();
    Node::registry()
        .set_field_value(&mut head, "next", Some(Box::new(Node { val: 2, next: None })))
        .unwrap();
    assert_eq!(head.next.as_ref().map(|n| n.val), Some(2));
}

#[test]
fn test_type_name_is_module_qualified() {
    assert_eq!(Foo::TYPE_NAME, concat!(module_path!(), "::Foo"));
    assert_eq!(Sensor::registry().type_name(), Sensor::TYPE_NAME);

    let err = Bar::registry().field("nope").unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Field not found: {}::Bar::nope", module_path!())
    );
}
