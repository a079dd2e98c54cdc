use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rust_decimal::Decimal;
use rusty_accounts::AccountStore;
use std::time::Duration;

const ACCOUNTS: u64 = 10_000;

fn populated_store() -> AccountStore {
    let mut store = AccountStore::new();
    for i in 0..ACCOUNTS {
        store
            .create(
                &format!("holder-{}", i),
                &format!("{:04}", i % 10_000),
                Decimal::new(i as i64 * 101, 2),
            )
            .unwrap();
    }
    store
}

fn snapshot_round_trip(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bank_data.json");
    let mut store = populated_store();

    let mut group = c.benchmark_group("throughput");
    group.throughput(Throughput::Elements(ACCOUNTS));
    group.measurement_time(Duration::from_secs(20));
    group.sample_size(50);

    group.bench_function("save_10K_accounts", |b| {
        b.iter(|| store.save(&path).unwrap());
    });

    group.bench_function("load_10K_accounts", |b| {
        b.iter(|| {
            let loaded = AccountStore::load(&path);
            assert!(loaded.warning.is_none());
            loaded.store
        });
    });

    group.bench_function("create_10K_accounts", |b| {
        b.iter(populated_store);
    });

    group.finish();
}

criterion_group!(benches, snapshot_round_trip);
criterion_main!(benches);
