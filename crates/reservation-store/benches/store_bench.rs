use chrono::{Duration, NaiveDate, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use reservation_store::{
    InMemoryReservationStore, ListQuery, ReservationId, ReservationRecord, ReservationStore,
};

fn make_record(i: i64) -> ReservationRecord {
    let mut record = ReservationRecord::pending(
        ReservationId::new(),
        format!("guest-{}", i % 50),
        if i % 3 == 0 { "SUITE" } else { "DOUBLE" },
        NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 12, 4).unwrap(),
    );
    record.created_at = Utc::now() + Duration::milliseconds(i);
    record
}

fn bench_upsert(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryReservationStore::new();

    c.bench_function("store/upsert", |b| {
        let mut i = 0;
        b.iter(|| {
            i += 1;
            rt.block_on(store.upsert(make_record(i))).unwrap();
        });
    });
}

fn bench_list(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("store/list");

    for size in [100_i64, 1_000, 10_000] {
        let store = InMemoryReservationStore::new();
        rt.block_on(async {
            for i in 0..size {
                store.upsert(make_record(i)).await.unwrap();
            }
        });

        group.bench_with_input(BenchmarkId::from_parameter(size), &store, |b, store| {
            b.iter(|| {
                rt.block_on(store.list(ListQuery::new().room_type("SUITE")))
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_upsert, bench_list);
criterion_main!(benches);
