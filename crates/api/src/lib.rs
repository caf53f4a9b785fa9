//! HTTP API server for the hotel reservation core.
//!
//! Provides REST endpoints for booking and running reservations through
//! their lifecycle, with structured logging (tracing) and Prometheus metrics.
//! Integration events are published for confirmations, check-ins,
//! check-outs and cancellations.

pub mod config;
pub mod error;
pub mod routes;
pub mod seed;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use domain::{
    InMemoryGuestGateway, PolicyConfig, ReservationPolicy, ReservationService, StoreRepository,
    StubInventoryGateway,
};
use integration::{IntegrationEventPublisher, IntegrationEventTranslator, LoggingPublisher};
use metrics_exporter_prometheus::PrometheusHandle;
use reservation_store::ReservationStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Publisher shared by the translator, chosen at startup.
pub type SharedPublisher = Arc<dyn IntegrationEventPublisher>;

/// Domain event dispatcher used by the service.
pub type AppTranslator<S> =
    IntegrationEventTranslator<StoreRepository<S>, InMemoryGuestGateway, SharedPublisher>;

/// The reservation service as wired by the API.
pub type AppService<S> = ReservationService<
    StoreRepository<S>,
    InMemoryGuestGateway,
    StubInventoryGateway,
    AppTranslator<S>,
>;

/// Shared application state accessible from all handlers.
pub struct AppState<S: ReservationStore> {
    pub service: AppService<S>,
    pub guests: InMemoryGuestGateway,
    pub inventory: StubInventoryGateway,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: ReservationStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    use routes::reservations;

    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/reservations", post(reservations::create::<S>))
        .route("/reservations", get(reservations::list::<S>))
        .route("/reservations/{id}", get(reservations::get::<S>))
        .route("/reservations/{id}/confirm", post(reservations::confirm::<S>))
        .route("/reservations/{id}/check-in", post(reservations::check_in::<S>))
        .route("/reservations/{id}/check-out", post(reservations::check_out::<S>))
        .route("/reservations/{id}/cancel", post(reservations::cancel::<S>))
        .route(
            "/reservations/{id}/special-requests",
            post(reservations::add_special_request::<S>),
        )
        .route(
            "/reservations/{id}/special-requests/{request_id}/fulfill",
            post(reservations::fulfill_special_request::<S>),
        )
        .route(
            "/reservations/{id}/special-requests/{request_id}",
            delete(reservations::remove_special_request::<S>),
        )
        .route("/room-types/{room_type}", get(routes::room_types::get::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wires the service over `store` with in-memory guest and inventory
/// gateways, publishing integration events through `publisher`.
pub fn create_state<S: ReservationStore + Clone + 'static>(
    store: S,
    policy: PolicyConfig,
    publisher: SharedPublisher,
) -> Arc<AppState<S>> {
    let guests = InMemoryGuestGateway::new();
    let inventory = StubInventoryGateway::new();

    let translator = IntegrationEventTranslator::new(
        StoreRepository::new(store.clone()),
        guests.clone(),
        publisher,
    );
    let service = ReservationService::new(
        StoreRepository::new(store),
        guests.clone(),
        ReservationPolicy::with_config(inventory.clone(), policy),
        translator,
    );

    Arc::new(AppState {
        service,
        guests,
        inventory,
    })
}

/// Creates the default application state, logging integration events.
pub fn create_default_state<S: ReservationStore + Clone + 'static>(
    store: S,
    policy: PolicyConfig,
) -> Arc<AppState<S>> {
    create_state(store, policy, Arc::new(LoggingPublisher::new()))
}
