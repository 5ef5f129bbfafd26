//! # Air-Bridge Subsystem Benchmarks
//!
//! | Subsystem | Operation | Expectation |
//! |-----------|-----------|-------------|
//! | ab-02 Key Encoder | valid-key search for one bit | a few point decompressions |
//! | ab-02 Key Encoder | lookup pair (2 searches + 2 hashes) | < 1ms |
//! | ab-01 Crypto Engine | decrypt one report (ECDH + KDF + AES-GCM) | < 1ms |
//! | ab-04 Bit Channel | resolve one byte against an in-memory provider | 16 searches + 1 query |

use ab_01_crypto_engine::fixtures::{seal_report, LocationFix};
use ab_01_crypto_engine::{decrypt_report, CryptoEngine, LocationDecryptionApi};
use ab_02_key_encoder::{find_valid, is_valid_point, template_for, KeyEncoder, KeyEncoderApi};
use ab_04_bit_channel::{BitChannelApi, QueryMode};
use bridge_tests::beacon::{now_millis, SimulatedBeacon};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use p224::SecretKey;
use rand::Rng;
use shared_types::{KeyLayout, KeyTemplateParams, LocationPrivateKey, LookBack};
use std::time::Duration;

const MAGIC: [u8; 2] = [0xBA, 0xBE];
const MODEM_ID: [u8; 4] = [0xDE, 0xAD, 0xBE, 0xEF];

// ============================================================================
// AB-02: Key Encoder
// ============================================================================

fn bench_key_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("ab-02-key-encoder");

    for layout in [KeyLayout::IndexFirst, KeyLayout::MessageFirst] {
        let params = KeyTemplateParams::new(layout, &MAGIC, &MODEM_ID).unwrap();
        let template = template_for(&params);

        group.bench_with_input(BenchmarkId::new("find_valid", layout), &layout, |b, _| {
            let mut bit_index = 0u32;
            b.iter(|| {
                bit_index = bit_index.wrapping_add(1);
                black_box(find_valid(template.as_ref(), 0, bit_index, true, 500).unwrap())
            })
        });

        let encoder = KeyEncoder::new(&params);
        group.bench_with_input(BenchmarkId::new("lookup_pair", layout), &layout, |b, _| {
            b.iter(|| black_box(encoder.lookup_pair(black_box(5), black_box(3)).unwrap()))
        });
    }

    let candidates: Vec<[u8; 28]> = {
        let mut rng = rand::thread_rng();
        (0..256).map(|_| rng.gen()).collect()
    };
    group.throughput(Throughput::Elements(candidates.len() as u64));
    group.bench_function("is_valid_point_random", |b| {
        b.iter(|| {
            candidates
                .iter()
                .filter(|c| is_valid_point(black_box(c.as_slice())))
                .count()
        })
    });

    group.finish();
}

// ============================================================================
// AB-01: Crypto Engine
// ============================================================================

fn bench_decrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("ab-01-crypto-engine");
    group.measurement_time(Duration::from_secs(10));

    let recipient = SecretKey::random(&mut rand::thread_rng());
    let fix = LocationFix {
        latitude: 52.52,
        longitude: 13.405,
        accuracy_metres: 25,
        confidence: 2,
        seen_at: 700_000_000,
    };
    let payload = seal_report(
        &recipient.public_key(),
        &SecretKey::random(&mut rand::thread_rng()),
        &fix,
    )
    .unwrap();

    group.bench_function("decrypt_report", |b| {
        b.iter(|| black_box(decrypt_report(black_box(&payload), &recipient).unwrap()))
    });

    let engine =
        CryptoEngine::new(&LocationPrivateKey::from_slice(&recipient.to_bytes()).unwrap()).unwrap();
    for size in [10usize, 100] {
        let batch: Vec<Vec<u8>> = (0..size)
            .map(|_| {
                seal_report(
                    &recipient.public_key(),
                    &SecretKey::random(&mut rand::thread_rng()),
                    &fix,
                )
                .unwrap()
            })
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("decrypt_batch", size), &batch, |b, batch| {
            b.iter(|| {
                batch
                    .iter()
                    .filter(|p| engine.decrypt(p).is_ok())
                    .count()
            })
        });
    }

    group.finish();
}

// ============================================================================
// AB-04: Bit Channel
// ============================================================================

fn bench_resolve_byte(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let beacon = SimulatedBeacon::new(KeyLayout::IndexFirst);
    let start = now_millis() - 5 * 60_000;
    rt.block_on(beacon.transmit_byte(0, 0, 0x4B, std::array::from_fn(|i| start + i as i64 * 1_000)));
    let services = beacon.services(QueryMode::Batched);

    c.bench_function("ab-04-resolve_byte_in_memory", |b| {
        b.iter(|| {
            rt.block_on(services.channel.resolve_byte(
                0,
                0,
                LookBack::days(1),
                Duration::from_secs(30 * 60),
            ))
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_key_search, bench_decrypt, bench_resolve_byte);
criterion_main!(benches);
