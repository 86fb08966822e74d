use eyre::{ensure, Result};
use log::{debug, info};
use std::sync::Arc;

use crate::domain::booking::BookingWithRoom;
use crate::domain::room::RoomOccupancy;
use crate::error::Error;
use crate::repository::bookings::BookingRepository;

#[derive(Clone)]
pub struct BookingService {
    pub booking_repository: Arc<BookingRepository>,
}

impl BookingService {
    pub async fn get_booking(&self, user_id: i32) -> Result<BookingWithRoom> {
        let booking = self
            .booking_repository
            .find_booking_by_user(user_id)
            .await?
            .ok_or(Error::BookingNotFound)?;
        debug!("User {} holds booking {}", user_id, booking.id);
        Ok(booking)
    }

    pub async fn check_room_capacity(&self, room_id: i32) -> Result<RoomOccupancy> {
        let occupancy = self.booking_repository.find_room_occupancy(room_id).await?;
        ensure!(!occupancy.is_full(), Error::RoomIsFull);
        Ok(occupancy)
    }

    pub async fn insert_booking(&self, user_id: i32, room_id: i32) -> Result<i32> {
        ensure!(
            self.booking_repository
                .find_booking_by_user(user_id)
                .await?
                .is_none(),
            Error::AlreadyBooked
        );
        self.check_room_capacity(room_id).await?;
        let booking = self
            .booking_repository
            .create_booking(user_id, room_id)
            .await?
            .ok_or(Error::RoomIsFull)?;
        info!(
            "User {} booked room {} (booking {})",
            user_id, room_id, booking.id
        );
        Ok(booking.id)
    }

    /// Returns the caller's booking if it is the one identified by `booking_id`.
    pub async fn ensure_booking_owner(
        &self,
        user_id: i32,
        booking_id: i32,
    ) -> Result<BookingWithRoom> {
        let current = self
            .booking_repository
            .find_booking_by_user(user_id)
            .await?
            .ok_or(Error::BookingNotFound)?;
        ensure!(current.id == booking_id, Error::NotBookingOwner);
        Ok(current)
    }

    // ownership is checked before the target room's capacity
    pub async fn change_booking(&self, user_id: i32, booking_id: i32, room_id: i32) -> Result<i32> {
        let current = self.ensure_booking_owner(user_id, booking_id).await?;
        self.check_room_capacity(room_id).await?;
        self.booking_repository
            .find_booking_by_id(booking_id)
            .await?
            .ok_or(Error::BookingNotFound)?;
        let booking = self
            .booking_repository
            .update_booking_room(booking_id, room_id)
            .await?
            .ok_or(Error::RoomIsFull)?;
        info!(
            "User {} moved booking {} from room {} to room {}",
            user_id, booking.id, current.room.id, booking.room_id
        );
        Ok(booking.id)
    }
}
