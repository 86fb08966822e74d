use eyre::Result;
use sqlx::types::Uuid;
use validator::Validate;

use crate::domain::auth::Session;
use crate::domain::booking::{BookingChanged, BookingCreated, BookingRequest, BookingWithRoom};
use crate::error::Error;
use crate::service::auth::AuthService;
use crate::service::bookings::BookingService;
use crate::service::tickets::TicketService;

#[derive(Clone)]
pub struct Api {
    pub booking_service: BookingService,
    pub ticket_service: TicketService,
    pub auth_service: AuthService,
}

impl Api {
    pub async fn get_user_by_session_token(&self, token: Uuid) -> Result<Option<Session>> {
        self.auth_service.get_user_by_session_token(token).await
    }

    pub async fn get_booking(&self, user_id: i32) -> Result<BookingWithRoom> {
        self.booking_service.get_booking(user_id).await
    }

    pub async fn insert_booking(
        &self,
        user_id: i32,
        request: BookingRequest,
    ) -> Result<BookingCreated> {
        request
            .validate()
            .map_err(|e| Error::InvalidRequest(e.to_string()))?;
        self.ticket_service.ensure_hotel_ticket(user_id).await?;
        let id = self
            .booking_service
            .insert_booking(user_id, request.room_id)
            .await?;
        Ok(BookingCreated { id })
    }

    /// The body is only looked at once the caller is known to own the
    /// booking, so a missing body does not hide a 404 or 403.
    pub async fn change_booking(
        &self,
        user_id: i32,
        booking_id: i32,
        request: std::result::Result<BookingRequest, Error>,
    ) -> Result<BookingChanged> {
        self.booking_service
            .ensure_booking_owner(user_id, booking_id)
            .await?;
        let request = request?;
        request
            .validate()
            .map_err(|e| Error::InvalidRequest(e.to_string()))?;
        let booking_id = self
            .booking_service
            .change_booking(user_id, booking_id, request.room_id)
            .await?;
        Ok(BookingChanged { booking_id })
    }
}
