use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use unitcheck::{AssertionReport, Reporter, UnitTest};

/// Discards reports so the benchmark measures the engine, not stdout.
struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _report: &AssertionReport) {}
}

fn quiet_engine() -> UnitTest<u64> {
    UnitTest::new().with_display().with_reporter(Arc::new(NullReporter))
}

fn bench_immediate(c: &mut Criterion) {
    let engine = quiet_engine();
    let haystack: Vec<u64> = (0..256).collect();

    let mut group = c.benchmark_group("immediate");
    group.throughput(Throughput::Elements(1));
    group.bench_function("assert_equal", |b| {
        b.iter(|| engine.assert_equal(&std::hint::black_box(42), &42));
    });
    group.bench_function("assert_in_256", |b| {
        b.iter(|| engine.assert_in(&std::hint::black_box(255), &haystack));
    });
    group.finish();
}

fn bench_replay(c: &mut Criterion) {
    const ENTRIES: u64 = 1024;

    let mut group = c.benchmark_group("deferred");
    group.throughput(Throughput::Elements(ENTRIES));
    group.bench_function("register_1024", |b| {
        b.iter_batched(
            quiet_engine,
            |mut engine| {
                for i in 0..ENTRIES {
                    engine.defer(UnitTest::<u64>::assert_equal, (i, i));
                }
                engine
            },
            BatchSize::SmallInput,
        );
    });

    let mut engine = quiet_engine();
    for i in 0..ENTRIES {
        engine.defer(UnitTest::<u64>::assert_equal, (i, i % 7));
    }
    group.bench_function("replay_1024", |b| {
        b.iter(|| engine.replay());
    });
    group.finish();
}

criterion_group!(benches, bench_immediate, bench_replay);
criterion_main!(benches);
