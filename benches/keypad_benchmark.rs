// ============================================================================
// Keypad Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Digit Entry - Integer and fractional typing through the controller
// 2. Backspace - Removing digits across the separator
// 3. Field Resync - Adopting values written by other code
// 4. Space Estimation - Data-logger footprint for growing variable sets
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use keypad_entry::prelude::*;
use keypad_entry::storage::{estimate_space, DataLoggerConfig, LoggedDataType, LoggedVariable};
use std::hint::black_box;
use std::sync::Arc;

fn keypad() -> KeypadController<SpinBox> {
    KeypadController::new(
        SpinBox::default(),
        KeypadConfig::comma_decimal(),
        Arc::new(NoOpEventHandler),
    )
}

fn tokens(count: usize) -> Vec<&'static str> {
    const DIGITS: [&str; 10] = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"];
    (0..count).map(|i| DIGITS[i % DIGITS.len()]).collect()
}

// ============================================================================
// Digit Entry Benchmarks
// ============================================================================

fn benchmark_integer_entry(c: &mut Criterion) {
    let mut group = c.benchmark_group("integer_entry");

    for num_digits in [1usize, 6, 12].iter() {
        let typed = tokens(*num_digits);
        group.bench_with_input(
            BenchmarkId::new("apply_token", num_digits),
            &typed,
            |b, typed| {
                b.iter(|| {
                    let mut keypad = keypad();
                    for token in typed {
                        black_box(keypad.apply_token(token).unwrap());
                    }
                    black_box(keypad.value())
                });
            },
        );
    }

    group.finish();
}

fn benchmark_fraction_entry(c: &mut Criterion) {
    c.bench_function("fraction_entry_12_345", |b| {
        b.iter(|| {
            let mut keypad = keypad();
            for token in ["1", "2", ",", "3", "4", "5"] {
                keypad.apply_token(black_box(token)).unwrap();
            }
            black_box(keypad.display_text())
        });
    });
}

// ============================================================================
// Backspace Benchmarks
// ============================================================================

fn benchmark_backspace(c: &mut Criterion) {
    c.bench_function("backspace_across_separator", |b| {
        b.iter(|| {
            let mut keypad = keypad();
            for token in ["9", "8", "7", ",", "6", "5"] {
                keypad.apply_token(token).unwrap();
            }
            for _ in 0..6 {
                black_box(keypad.backspace().unwrap());
            }
        });
    });
}

// ============================================================================
// Field Resync Benchmarks
// ============================================================================

fn benchmark_field_resync(c: &mut Criterion) {
    c.bench_function("sync_external_write", |b| {
        let field = SharedField::new(0.0);
        let mut keypad = KeypadController::new(
            field.clone(),
            KeypadConfig::comma_decimal(),
            Arc::new(NoOpEventHandler),
        );
        let mut next = 0.0f64;
        b.iter(|| {
            next += 1.25;
            field.set(black_box(next));
            keypad.sync_from_field().unwrap();
            if next > 1_000_000.0 {
                next = 0.0;
            }
        });
    });
}

// ============================================================================
// Space Estimation Benchmarks
// ============================================================================

fn benchmark_space_estimation(c: &mut Criterion) {
    let mut group = c.benchmark_group("space_estimation");

    for num_variables in [10usize, 100, 1000].iter() {
        let config = DataLoggerConfig {
            variables: (0..*num_variables)
                .map(|i| match i % 3 {
                    0 => LoggedVariable::new(format!("var_{}", i), LoggedDataType::Double),
                    1 => LoggedVariable::new(format!("var_{}", i), LoggedDataType::UtcTime),
                    _ => LoggedVariable::linked(format!("var_{}", i), LoggedDataType::Int32),
                })
                .collect(),
            sampling_period_ms: 500,
            log_local_time: true,
        };

        group.bench_with_input(
            BenchmarkId::new("estimate_space", num_variables),
            &config,
            |b, config| {
                b.iter(|| black_box(estimate_space(config).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_integer_entry,
    benchmark_fraction_entry,
    benchmark_backspace,
    benchmark_field_resync,
    benchmark_space_estimation
);

criterion_main!(benches);
