use axum::http::StatusCode;
use log::error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Booking not found")]
    BookingNotFound,
    #[error("Room not found")]
    RoomNotFound,
    #[error("Room is full")]
    RoomIsFull,
    #[error("User already has a booking")]
    AlreadyBooked,
    #[error("Booking does not belong to user")]
    NotBookingOwner,
    #[error("User has no enrollment")]
    MissingEnrollment,
    #[error("User has no ticket")]
    MissingTicket,
    #[error("Ticket is not paid or does not include a hotel")]
    TicketNotEligible,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BookingNotFound => StatusCode::NOT_FOUND,
            Error::RoomNotFound => StatusCode::NOT_FOUND,
            Error::RoomIsFull => StatusCode::FORBIDDEN,
            Error::AlreadyBooked => StatusCode::FORBIDDEN,
            Error::NotBookingOwner => StatusCode::FORBIDDEN,
            Error::MissingEnrollment => StatusCode::FORBIDDEN,
            Error::MissingTicket => StatusCode::FORBIDDEN,
            Error::TicketNotEligible => StatusCode::FORBIDDEN,
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn into_response_tuple(self) -> (StatusCode, String) {
        (self.status_code(), self.to_string())
    }
}

/// Maps a service report to a response. Reports that do not carry a domain
/// [`Error`] answer with `fallback`.
pub fn report_into_response(e: eyre::Report, fallback: StatusCode) -> (StatusCode, String) {
    error!("Error occurred: {:?}", e);
    match e.downcast::<Error>() {
        Ok(error) => error.into_response_tuple(),
        Err(_) => (fallback, "".to_string()),
    }
}
