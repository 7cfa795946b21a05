//! Performance benchmarks for the sentence calculation engine.
//!
//! This benchmark suite verifies that the calculation engine meets
//! performance targets:
//! - Single-sentence booking: < 100μs mean
//! - Ten-sentence consecutive booking: < 1ms mean
//! - Batch of 100 bookings: < 100ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use sentence_engine::calculation::{ReleasePointPolicy, calculate_booking};
use sentence_engine::config::{ConfigLoader, EligibilityConfig};
use sentence_engine::models::Booking;

/// Loads the shipped eligibility configuration.
fn load_config() -> EligibilityConfig {
    ConfigLoader::load("./config/sds_plus")
        .expect("Failed to load config")
        .eligibility()
        .clone()
}

/// Creates a booking with the given number of consecutively linked
/// sentences.
fn create_booking(sentence_count: usize) -> Booking {
    let mut sentences = Vec::new();
    let mut classifications = serde_json::Map::new();
    for index in 0..sentence_count {
        let id = format!("sent_{:03}", index);
        let mut sentence = serde_json::json!({
            "id": id,
            "offence": {"code": "COML025", "committed_at": "2019-06-01"},
            "sentenced_at": "2021-06-01",
            "type": "STANDARD_DETERMINATE",
            "duration": {"months": 12}
        });
        if index > 0 {
            sentence["consecutive_to"] = serde_json::json!(format!("sent_{:03}", index - 1));
        }
        sentences.push(sentence);
        classifications.insert(
            id,
            serde_json::json!({"track": "SDS_STANDARD_RELEASE", "release_date_types": ["SLED", "CRD"]}),
        );
    }
    let booking = serde_json::json!({
        "offender": {"reference": "A1234BC", "date_of_birth": "1985-04-02"},
        "sentences": sentences,
        "adjustments": {
            "REMAND": [{"from_date": "2021-01-01", "number_of_days": 30}]
        },
        "classifications": classifications
    });
    serde_json::from_value(booking).expect("booking should deserialize")
}

fn bench_single_sentence(c: &mut Criterion) {
    let config = load_config();
    let policy = ReleasePointPolicy::standard();
    c.bench_function("single_sentence_booking", |b| {
        b.iter(|| {
            let booking = create_booking(1);
            calculate_booking(black_box(booking), &config, &policy).unwrap()
        })
    });
}

fn bench_consecutive_chain(c: &mut Criterion) {
    let config = load_config();
    let policy = ReleasePointPolicy::standard();
    let mut group = c.benchmark_group("consecutive_chain");
    for size in [2usize, 5, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let booking = create_booking(size);
                calculate_booking(black_box(booking), &config, &policy).unwrap()
            })
        });
    }
    group.finish();
}

fn bench_booking_batch(c: &mut Criterion) {
    let config = load_config();
    let policy = ReleasePointPolicy::standard();
    let mut group = c.benchmark_group("booking_batch");
    for batch in [100usize] {
        group.throughput(Throughput::Elements(batch as u64));
        group.bench_with_input(BenchmarkId::from_parameter(batch), &batch, |b, &batch| {
            b.iter(|| {
                for _ in 0..batch {
                    let booking = create_booking(1);
                    calculate_booking(black_box(booking), &config, &policy).unwrap();
                }
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_single_sentence,
    bench_consecutive_chain,
    bench_booking_batch
);
criterion_main!(benches);
