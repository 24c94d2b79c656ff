/// Benchmarks for the scoring engine and the readings boundary.
use biomarker_risk::core::{Marker, RawReadings, RawValue, ScreeningInput, SmokingStatus};
use biomarker_risk::risk::RiskEngine;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn full_panel(seed: usize) -> ScreeningInput {
    let shift = (seed % 50) as f64;
    ScreeningInput::new()
        .with(Marker::GlucoseFasting, 90.0 + shift)
        .with(Marker::GlucosePp, 160.0 + shift)
        .with(Marker::Hba1c, 5.4 + shift / 40.0)
        .with(Marker::Hdl, 55.0 - shift / 2.0)
        .with(Marker::Ldl, 110.0 + shift)
        .with(Marker::Triglycerides, 120.0 + shift)
        .with(Marker::Creatinine, 0.9 + shift / 100.0)
        .with(Marker::Alt, 30.0 + shift / 2.0)
        .with(Marker::SystolicBp, 115.0 + shift / 2.0)
        .with(Marker::Height, 172.0)
        .with(Marker::Weight, 70.0 + shift)
        .with_smoking(SmokingStatus::Former)
}

fn bench_score(c: &mut Criterion) {
    let engine = RiskEngine::default();
    let mut group = c.benchmark_group("risk_score");

    group.bench_function("empty_input", |b| {
        let input = ScreeningInput::new();
        b.iter(|| engine.score(black_box(&input)))
    });

    group.bench_function("full_panel", |b| {
        let input = full_panel(30);
        b.iter(|| engine.score(black_box(&input)))
    });

    for batch_size in [100, 1000].iter() {
        let inputs: Vec<ScreeningInput> = (0..*batch_size).map(full_panel).collect();
        group.bench_with_input(BenchmarkId::new("batch", batch_size), &inputs, |b, inputs| {
            b.iter(|| {
                for input in inputs {
                    black_box(engine.score(input));
                }
            })
        });
    }

    group.finish();
}

fn bench_from_raw(c: &mut Criterion) {
    let raw: RawReadings = full_panel(10).to_raw();
    let mut with_null = raw.clone();
    with_null.insert("insulin".to_string(), RawValue::Null);

    c.bench_function("readings_from_raw", |b| {
        b.iter(|| ScreeningInput::from_raw(black_box(&with_null)))
    });
}

criterion_group!(benches, bench_score, bench_from_raw);
criterion_main!(benches);
