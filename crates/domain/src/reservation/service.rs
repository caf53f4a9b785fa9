//! Reservation service: the application-layer entry point for commands and queries.

use std::collections::HashMap;

use chrono::Utc;
use common::{GuestProfileId, PaginatedResult, Pagination, ReservationId, SpecialRequestId};

use crate::command::{Command, CommandHandler, CommandResult};
use crate::dispatch::EventDispatcher;
use crate::error::DomainError;
use crate::gateway::{GuestGateway, GuestInfo, InventoryGateway, RoomTypeInfo};

use super::{
    AddSpecialRequest, CancelReservation, CancelSpecialRequest, ChangeSpecialRequestDescription,
    CheckInGuest, CheckOutGuest, ConfirmReservation, CreateReservation, FulfillSpecialRequest,
    RemoveSpecialRequest, Reservation, ReservationFilter, ReservationPeriod, ReservationPolicy,
    ReservationReadModel, ReservationRepository,
};

/// Service for managing reservations.
///
/// Wraps a [`CommandHandler`] with the collaborators that creation needs
/// (guest lookup and booking policy) and exposes one method per command.
/// Each command is counted in `reservation_commands_total`, and failures in
/// `reservation_commands_failed_total`, labelled by command name.
pub struct ReservationService<R, G, I, D> {
    handler: CommandHandler<R, D>,
    guests: G,
    policy: ReservationPolicy<I>,
}

impl<R, G, I, D> ReservationService<R, G, I, D>
where
    R: ReservationRepository,
    G: GuestGateway,
    I: InventoryGateway,
    D: EventDispatcher,
{
    pub fn new(repository: R, guests: G, policy: ReservationPolicy<I>, dispatcher: D) -> Self {
        Self {
            handler: CommandHandler::new(repository, dispatcher),
            guests,
            policy,
        }
    }

    /// Returns a reference to the underlying command handler.
    pub fn handler(&self) -> &CommandHandler<R, D> {
        &self.handler
    }

    pub fn guests(&self) -> &G {
        &self.guests
    }

    pub fn policy(&self) -> &ReservationPolicy<I> {
        &self.policy
    }

    /// Books a room after resolving the guest and checking the policy.
    #[tracing::instrument(skip(self))]
    pub async fn create_reservation(
        &self,
        cmd: CreateReservation,
    ) -> Result<CommandResult, DomainError> {
        track(cmd.name(), self.create(&cmd).await)
    }

    async fn create(&self, cmd: &CreateReservation) -> Result<CommandResult, DomainError> {
        let guest = self
            .guests
            .find_by_id(&cmd.guest_profile_id)
            .await?
            .ok_or_else(|| DomainError::GuestNotFound(cmd.guest_profile_id.clone()))?;

        let period = ReservationPeriod::new(cmd.check_in, cmd.check_out)?;

        let eligibility = self
            .policy
            .evaluate_on(
                Utc::now().date_naive(),
                guest.is_vip,
                &period,
                &cmd.room_type,
            )
            .await?;
        if !eligibility.is_eligible() {
            return Err(DomainError::PolicyRejected(eligibility.to_string()));
        }

        let id = self.handler.repository().next_identity();
        let reservation = Reservation::create(
            id,
            cmd.guest_profile_id.clone(),
            period,
            cmd.room_type.clone(),
        );
        self.handler.commit(reservation).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn confirm_reservation(
        &self,
        cmd: ConfirmReservation,
    ) -> Result<CommandResult, DomainError> {
        let result = self
            .handler
            .execute(cmd.reservation_id, |r| r.confirm())
            .await;
        track(cmd.name(), result)
    }

    #[tracing::instrument(skip(self))]
    pub async fn check_in_guest(&self, cmd: CheckInGuest) -> Result<CommandResult, DomainError> {
        let room_number = cmd.room_number.clone();
        let result = self
            .handler
            .execute(cmd.reservation_id, |r| r.check_in(room_number))
            .await;
        track(cmd.name(), result)
    }

    #[tracing::instrument(skip(self))]
    pub async fn check_out_guest(&self, cmd: CheckOutGuest) -> Result<CommandResult, DomainError> {
        let result = self
            .handler
            .execute(cmd.reservation_id, |r| r.check_out())
            .await;
        track(cmd.name(), result)
    }

    #[tracing::instrument(skip(self))]
    pub async fn cancel_reservation(
        &self,
        cmd: CancelReservation,
    ) -> Result<CommandResult, DomainError> {
        let reason = cmd.reason.clone();
        let result = self
            .handler
            .execute(cmd.reservation_id, |r| r.cancel(reason))
            .await;
        track(cmd.name(), result)
    }

    /// Adds a special request and returns its id with the command result.
    #[tracing::instrument(skip(self))]
    pub async fn add_special_request(
        &self,
        cmd: AddSpecialRequest,
    ) -> Result<(SpecialRequestId, CommandResult), DomainError> {
        let description = cmd.description.clone();
        let result = self
            .handler
            .execute_with(cmd.reservation_id, |r| {
                r.add_special_request(cmd.request_type, description)
            })
            .await;
        track(cmd.name(), result)
    }

    #[tracing::instrument(skip(self))]
    pub async fn fulfill_special_request(
        &self,
        cmd: FulfillSpecialRequest,
    ) -> Result<CommandResult, DomainError> {
        let result = self
            .handler
            .execute(cmd.reservation_id, |r| {
                r.fulfill_special_request(cmd.request_id)
            })
            .await;
        track(cmd.name(), result)
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_special_request(
        &self,
        cmd: RemoveSpecialRequest,
    ) -> Result<CommandResult, DomainError> {
        let result = self
            .handler
            .execute(cmd.reservation_id, |r| {
                r.remove_special_request(cmd.request_id)
            })
            .await;
        track(cmd.name(), result)
    }

    #[tracing::instrument(skip(self))]
    pub async fn cancel_special_request(
        &self,
        cmd: CancelSpecialRequest,
    ) -> Result<CommandResult, DomainError> {
        let result = self
            .handler
            .execute(cmd.reservation_id, |r| {
                r.cancel_special_request(cmd.request_id)
            })
            .await;
        track(cmd.name(), result)
    }

    #[tracing::instrument(skip(self))]
    pub async fn change_special_request_description(
        &self,
        cmd: ChangeSpecialRequestDescription,
    ) -> Result<CommandResult, DomainError> {
        let description = cmd.description.clone();
        let result = self
            .handler
            .execute(cmd.reservation_id, |r| {
                r.change_special_request_description(cmd.request_id, description)
            })
            .await;
        track(cmd.name(), result)
    }

    // Queries

    /// Loads one reservation with its guest block resolved.
    #[tracing::instrument(skip(self))]
    pub async fn get_reservation(
        &self,
        id: ReservationId,
    ) -> Result<ReservationReadModel, DomainError> {
        let reservation = self.handler.load(id).await?;
        let guest = self.guests.find_by_id(reservation.guest_profile_id()).await?;
        Ok(ReservationReadModel::from_reservation(&reservation, guest))
    }

    /// Lists reservations newest first, resolving each guest once per page.
    #[tracing::instrument(skip(self))]
    pub async fn list_reservations(
        &self,
        filter: ReservationFilter,
        pagination: Pagination,
    ) -> Result<PaginatedResult<ReservationReadModel>, DomainError> {
        let page = self.handler.repository().list(&filter, pagination).await?;

        let mut guests: HashMap<GuestProfileId, Option<GuestInfo>> = HashMap::new();
        for reservation in &page.items {
            let id = reservation.guest_profile_id();
            if !guests.contains_key(id) {
                let guest = self.guests.find_by_id(id).await?;
                guests.insert(id.clone(), guest);
            }
        }

        Ok(page.map(|reservation| {
            let guest = guests
                .get(reservation.guest_profile_id())
                .cloned()
                .flatten();
            ReservationReadModel::from_reservation(&reservation, guest)
        }))
    }

    /// Describes a room type using the inventory gateway.
    #[tracing::instrument(skip(self))]
    pub async fn room_type_info(&self, room_type: &str) -> Result<RoomTypeInfo, DomainError> {
        Ok(self.policy.inventory().room_type_info(room_type).await?)
    }
}

fn track<T>(command: &'static str, result: Result<T, DomainError>) -> Result<T, DomainError> {
    metrics::counter!("reservation_commands_total", "command" => command).increment(1);

    match &result {
        Ok(_) => tracing::info!(command, "reservation command applied"),
        Err(error) => {
            metrics::counter!("reservation_commands_failed_total", "command" => command)
                .increment(1);
            if error.is_infrastructure() {
                tracing::error!(command, %error, "reservation command failed");
            } else {
                tracing::warn!(command, %error, "reservation command rejected");
            }
        }
    }

    result
}
