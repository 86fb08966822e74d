use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::FromRow;
use validator::Validate;

use crate::domain::room::Room;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i32,
    pub user_id: i32,
    pub room_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user's booking as returned by `GET /bookings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingWithRoom {
    pub id: i32,
    #[serde(rename = "Room")]
    pub room: Room,
}

#[derive(Debug, Validate, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[validate(range(min = 1))]
    pub room_id: i32,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct BookingCreated {
    pub id: i32,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingChanged {
    pub booking_id: i32,
}
