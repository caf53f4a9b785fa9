use chrono::{Duration, Utc};
use common::ReservationId;
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{
    AggregateRoot, CheckInGuest, CheckOutGuest, ConfirmReservation, CreateReservation, Email,
    GuestProfile, InMemoryEventDispatcher, InMemoryGuestGateway, LoyaltyTier, Phone, RequestType,
    Reservation, ReservationPeriod, ReservationPolicy, ReservationService, StoreRepository,
    StubInventoryGateway,
};
use reservation_store::InMemoryReservationStore;

type BenchService = ReservationService<
    StoreRepository<InMemoryReservationStore>,
    InMemoryGuestGateway,
    StubInventoryGateway,
    InMemoryEventDispatcher,
>;

fn service() -> BenchService {
    let guests = InMemoryGuestGateway::new();
    guests.register(GuestProfile::new(
        "bench-guest",
        "Bench Guest",
        Email::new("bench@example.com").unwrap(),
        Phone::new("+15550001111").unwrap(),
        "BENCH-1",
        LoyaltyTier::Gold,
    ));

    ReservationService::new(
        StoreRepository::new(InMemoryReservationStore::new()),
        guests,
        ReservationPolicy::new(StubInventoryGateway::new()),
        InMemoryEventDispatcher::new(),
    )
}

fn period() -> ReservationPeriod {
    let today = Utc::now().date_naive();
    ReservationPeriod::new(today + Duration::days(1), today + Duration::days(4)).unwrap()
}

fn bench_aggregate_lifecycle(c: &mut Criterion) {
    c.bench_function("domain/aggregate_lifecycle", |b| {
        b.iter(|| {
            let mut reservation =
                Reservation::create(ReservationId::new(), "bench-guest".into(), period(), "DOUBLE");
            reservation
                .add_special_request(RequestType::LateCheckOut, "Leave at noon")
                .unwrap();
            reservation.confirm().unwrap();
            reservation.check_in("101").unwrap();
            reservation.check_out().unwrap();
            reservation.pull_domain_events()
        });
    });
}

fn bench_create_reservation(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = service();
    let today = Utc::now().date_naive();

    c.bench_function("domain/create_reservation", |b| {
        b.iter(|| {
            rt.block_on(async {
                let cmd = CreateReservation::new(
                    "bench-guest",
                    today + Duration::days(2),
                    today + Duration::days(5),
                    "SUITE",
                );
                service.create_reservation(cmd).await.unwrap();
            });
        });
    });
}

fn bench_full_stay(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = service();
    let today = Utc::now().date_naive();

    c.bench_function("domain/full_stay", |b| {
        b.iter(|| {
            rt.block_on(async {
                let cmd = CreateReservation::new(
                    "bench-guest",
                    today + Duration::days(1),
                    today + Duration::days(3),
                    "DOUBLE",
                );
                let id = service.create_reservation(cmd).await.unwrap().reservation.id();
                service
                    .confirm_reservation(ConfirmReservation::new(id))
                    .await
                    .unwrap();
                service
                    .check_in_guest(CheckInGuest::new(id, "210"))
                    .await
                    .unwrap();
                service
                    .check_out_guest(CheckOutGuest::new(id))
                    .await
                    .unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_aggregate_lifecycle,
    bench_create_reservation,
    bench_full_stay
);
criterion_main!(benches);
