use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use custody_ledger::{Ledger, LedgerReader};
use custody_types::Record;

fn build(n: usize) -> Ledger {
    let mut ledger = Ledger::new();
    for i in 0..n {
        let record = Record::new(format!("unit-{i}"), "Acme Pharma", "Produced")
            .expect("valid record");
        ledger.append(record).expect("append");
    }
    ledger
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");
    for n in [100, 1_000, 10_000] {
        let ledger = build(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &ledger, |b, ledger| {
            b.iter(|| black_box(ledger.verify()))
        });
    }
    group.finish();
}

fn bench_append(c: &mut Criterion) {
    c.bench_function("append_1000", |b| b.iter(|| black_box(build(1_000))));
}

criterion_group!(benches, bench_verify, bench_append);
criterion_main!(benches);
