//! Translation of reservation domain events into integration events.

use async_trait::async_trait;
use common::ReservationId;
use domain::{
    DispatchError, DomainEvent, EventDispatcher, GuestGateway, GuestInfo, Reservation,
    ReservationEvent, ReservationRepository,
};

use crate::error::{IntegrationError, Result};
use crate::events::{
    GuestCheckedInPayload, GuestCheckedOutPayload, IntegrationEvent, ReservationCancelledPayload,
    ReservationConfirmedPayload,
};
use crate::publisher::IntegrationEventPublisher;

/// Listens to reservation domain events and publishes the matching
/// integration event.
///
/// Only confirmation, check-in, check-out and cancellation leave the
/// context. Every other domain event is accepted and ignored. Each handler
/// reloads the saved reservation, so it must run after the save.
pub struct IntegrationEventTranslator<R, G, P> {
    reservations: R,
    guests: G,
    publisher: P,
}

impl<R, G, P> IntegrationEventTranslator<R, G, P>
where
    R: ReservationRepository,
    G: GuestGateway,
    P: IntegrationEventPublisher,
{
    pub fn new(reservations: R, guests: G, publisher: P) -> Self {
        Self {
            reservations,
            guests,
            publisher,
        }
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Builds the integration event for a domain event, if one is routed.
    pub async fn translate(&self, event: &ReservationEvent) -> Result<Option<IntegrationEvent>> {
        let translated = match event {
            ReservationEvent::ReservationConfirmed(data) => {
                let reservation = self.load(data.reservation_id).await?;
                let guest = self.guest_of(&reservation).await?;
                IntegrationEvent::ReservationConfirmed(ReservationConfirmedPayload {
                    reservation_id: reservation.id().to_string(),
                    guest_email: guest_email(guest.as_ref()),
                    room_type: reservation.room_type().to_string(),
                    check_in: reservation.period().check_in(),
                    check_out: reservation.period().check_out(),
                    is_vip: is_vip(guest.as_ref()),
                    occurred_at: data.occurred_on,
                })
            }
            ReservationEvent::GuestCheckedIn(data) => {
                let reservation = self.load(data.reservation_id).await?;
                let guest = self.guest_of(&reservation).await?;
                IntegrationEvent::GuestCheckedIn(GuestCheckedInPayload {
                    reservation_id: reservation.id().to_string(),
                    room_number: data.room_number.clone(),
                    guest_email: guest_email(guest.as_ref()),
                    is_vip: is_vip(guest.as_ref()),
                    occurred_at: data.occurred_on,
                })
            }
            ReservationEvent::GuestCheckedOut(data) => {
                let reservation = self.load(data.reservation_id).await?;
                let guest = self.guest_of(&reservation).await?;
                IntegrationEvent::GuestCheckedOut(GuestCheckedOutPayload {
                    reservation_id: reservation.id().to_string(),
                    room_number: reservation
                        .assigned_room_number()
                        .unwrap_or_default()
                        .to_string(),
                    guest_email: guest_email(guest.as_ref()),
                    occurred_at: data.occurred_on,
                })
            }
            ReservationEvent::ReservationCancelled(data) => {
                let reservation = self.load(data.reservation_id).await?;
                IntegrationEvent::ReservationCancelled(ReservationCancelledPayload {
                    reservation_id: reservation.id().to_string(),
                    room_type: reservation.room_type().to_string(),
                    check_in: reservation.period().check_in(),
                    check_out: reservation.period().check_out(),
                    reason: data.reason.clone(),
                    occurred_at: data.occurred_on,
                })
            }
            ReservationEvent::ReservationCreated(_)
            | ReservationEvent::SpecialRequestAdded(_)
            | ReservationEvent::SpecialRequestFulfilled(_) => return Ok(None),
        };

        Ok(Some(translated))
    }

    /// Translates and publishes one domain event.
    #[tracing::instrument(skip(self, event), fields(event_type = event.event_type()))]
    pub async fn handle(&self, event: &ReservationEvent) -> Result<()> {
        match self.translate(event).await? {
            Some(integration_event) => {
                self.publisher.publish(integration_event).await?;
                tracing::debug!(
                    reservation_id = %event.reservation_id(),
                    "integration event published"
                );
            }
            None => tracing::trace!("no integration event for domain event"),
        }
        Ok(())
    }

    async fn load(&self, id: ReservationId) -> Result<Reservation> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or(IntegrationError::ReservationNotFound(id))
    }

    async fn guest_of(&self, reservation: &Reservation) -> Result<Option<GuestInfo>> {
        let guest = self
            .guests
            .find_by_id(reservation.guest_profile_id())
            .await?;
        if guest.is_none() {
            tracing::warn!(
                reservation_id = %reservation.id(),
                guest_profile_id = %reservation.guest_profile_id(),
                "guest profile not found; publishing without guest details"
            );
        }
        Ok(guest)
    }
}

#[async_trait]
impl<R, G, P> EventDispatcher for IntegrationEventTranslator<R, G, P>
where
    R: ReservationRepository,
    G: GuestGateway,
    P: IntegrationEventPublisher,
{
    async fn dispatch(&self, event: &ReservationEvent) -> std::result::Result<(), DispatchError> {
        self.handle(event).await.map_err(|error| {
            metrics::counter!("integration_translation_failed_total", "event" => event.event_type())
                .increment(1);
            DispatchError::new(event.event_type(), error.to_string())
        })
    }
}

fn guest_email(guest: Option<&GuestInfo>) -> String {
    guest.map(|g| g.email.as_str().to_string()).unwrap_or_default()
}

fn is_vip(guest: Option<&GuestInfo>) -> bool {
    guest.is_some_and(|g| g.is_vip)
}
