// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::float_cmp)] // Test assertions with constants
#![allow(clippy::cast_possible_truncation)] // Test parameters
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(clippy::wildcard_imports)] // Test utility imports

//! Random test-data generation driven by reflection.
//!
//! Two generators: a typed one that recovers each field type by ordinal, and a
//! visitor that walks the placeholder table and writes through the registry by
//! name.

use refl::{set_field, visit_fields, FieldAt, FieldTypeOf, FieldTypeVisitor, Reflect, TypeCarrier};

trait Generate {
    fn generate(rng: &mut fastrand::Rng) -> Self;
}

impl Generate for u16 {
    fn generate(rng: &mut fastrand::Rng) -> Self {
        rng.u16(..)
    }
}

impl Generate for i64 {
    fn generate(rng: &mut fastrand::Rng) -> Self {
        rng.i64(-1000..1000)
    }
}

impl Generate for f32 {
    fn generate(rng: &mut fastrand::Rng) -> Self {
        rng.f32()
    }
}

impl Generate for String {
    fn generate(rng: &mut fastrand::Rng) -> Self {
        let len = rng.usize(1..16);
        std::iter::repeat_with(|| rng.alphanumeric()).take(len).collect()
    }
}

#[derive(Reflect, Debug, Default, Clone, PartialEq)]
struct Sample {
    id: u16,
    offset: i64,
    gain: f32,
    label: String,
}

/// Fill a 4-field reflected type with generated values, one ordinal at a time.
fn fill_typed<T>(instance: &mut T, rng: &mut fastrand::Rng)
where
    T: FieldAt<0> + FieldAt<1> + FieldAt<2> + FieldAt<3>,
    FieldTypeOf<T, 0>: Generate,
    FieldTypeOf<T, 1>: Generate,
    FieldTypeOf<T, 2>: Generate,
    FieldTypeOf<T, 3>: Generate,
{
    set_field::<T, 0>(instance, Generate::generate(rng));
    set_field::<T, 1>(instance, Generate::generate(rng));
    set_field::<T, 2>(instance, Generate::generate(rng));
    set_field::<T, 3>(instance, Generate::generate(rng));
}

/// Writes a generated value into every field whose type it knows.
struct RandomFill<'a, T: Reflect> {
    instance: &'a mut T,
    rng: fastrand::Rng,
    skipped: Vec<&'static str>,
}

impl<T: Reflect> RandomFill<'_, T> {
    fn write<V: 'static>(&mut self, name: &str, value: V) -> bool {
        T::registry()
            .set_field_value(self.instance, name, value)
            .is_ok()
    }
}

impl<T: Reflect> FieldTypeVisitor for RandomFill<'_, T> {
    type Output = bool;

    fn visit<FT: 'static>(&mut self, name: &'static str, carrier: TypeCarrier<FT>) -> bool {
        if carrier.is::<u16>() {
            let value = u16::generate(&mut self.rng);
            self.write(name, value)
        } else if carrier.is::<i64>() {
            let value = i64::generate(&mut self.rng);
            self.write(name, value)
        } else if carrier.is::<f32>() {
            let value = f32::generate(&mut self.rng);
            self.write(name, value)
        } else if carrier.is::<String>() {
            let value = String::generate(&mut self.rng);
            self.write(name, value)
        } else {
            self.skipped.push(name);
            false
        }
    }
}

#[test]
fn test_typed_generation_is_deterministic_per_seed() {
    let mut first = Sample::default();
    let mut second = Sample::default();

    fill_typed(&mut first, &mut fastrand::Rng::with_seed(7));
    fill_typed(&mut second, &mut fastrand::Rng::with_seed(7));

    assert_eq!(first, second);
    assert!(!first.label.is_empty());
    assert!((-1000..1000).contains(&first.offset));
    assert!((0.0..1.0).contains(&first.gain));
}

#[test]
fn test_visitor_generation_matches_typed_generation() {
    let mut typed = Sample::default();
    fill_typed(&mut typed, &mut fastrand::Rng::with_seed(42));

    let mut visited = Sample::default();
    let mut fill = RandomFill {
        instance: &mut visited,
        rng: fastrand::Rng::with_seed(42),
        skipped: Vec::new(),
    };
    let written = visit_fields::<Sample, _>(&mut fill);

    assert_eq!(written, [true; 4]);
    assert!(fill.skipped.is_empty());
    assert_eq!(typed, visited);
}

#[derive(Reflect, Default)]
struct Partial {
    count: u16,
    flags: Vec<bool>,
}

#[test]
fn test_visitor_reports_unsupported_types() {
    let mut partial = Partial::default();
    let mut fill = RandomFill {
        instance: &mut partial,
        rng: fastrand::Rng::with_seed(1),
        skipped: Vec::new(),
    };

    let written = visit_fields::<Partial, _>(&mut fill);

    assert_eq!(written, [true, false]);
    assert_eq!(fill.skipped, ["flags"]);
    assert!(partial.flags.is_empty());
}

#[test]
fn test_many_seeds_stay_in_range() {
    for seed in 0..64 {
        let mut sample = Sample::default();
        fill_typed(&mut sample, &mut fastrand::Rng::with_seed(seed));
        assert!(sample.label.len() < 16, "seed {}", seed);
        assert!(sample.label.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
