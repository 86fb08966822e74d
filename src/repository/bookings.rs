use eyre::{bail, Result};
use log::debug;
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::domain::booking::{Booking, BookingWithRoom};
use crate::domain::room::{Room, RoomOccupancy};
use crate::error::Error;

#[cfg_attr(test, faux::create)]
pub struct BookingRepository {
    pool: PgPool,
}

#[derive(FromRow)]
struct BookingRoomRow {
    id: i32,
    room_id: i32,
    room_name: String,
    room_capacity: i32,
    room_hotel_id: i32,
    room_created_at: DateTime<Utc>,
    room_updated_at: DateTime<Utc>,
}

impl From<BookingRoomRow> for BookingWithRoom {
    fn from(row: BookingRoomRow) -> Self {
        BookingWithRoom {
            id: row.id,
            room: Room {
                id: row.room_id,
                name: row.room_name,
                capacity: row.room_capacity,
                hotel_id: row.room_hotel_id,
                created_at: row.room_created_at,
                updated_at: row.room_updated_at,
            },
        }
    }
}

#[cfg_attr(test, faux::methods)]
impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_booking_by_user(&self, user_id: i32) -> Result<Option<BookingWithRoom>> {
        let row: Option<BookingRoomRow> = sqlx::query_as(
            r#"
            SELECT b.id, r.id AS room_id, r.name AS room_name, r.capacity AS room_capacity,
                   r.hotel_id AS room_hotel_id, r.created_at AS room_created_at,
                   r.updated_at AS room_updated_at
            FROM bookings b
            JOIN rooms r ON r.id = b.room_id
            WHERE b.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    pub async fn find_booking_by_id(&self, booking_id: i32) -> Result<Option<Booking>> {
        sqlx::query_as(
            r#"
            SELECT * FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_room_occupancy(&self, room_id: i32) -> Result<RoomOccupancy> {
        let occupancy: Option<RoomOccupancy> = sqlx::query_as(
            r#"
            SELECT r.capacity, COUNT(b.id) AS booking_count
            FROM rooms r
            LEFT JOIN bookings b ON b.room_id = r.id
            WHERE r.id = $1
            GROUP BY r.id
            "#,
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(occupancy.ok_or(Error::RoomNotFound)?)
    }

    /// Inserts the booking unless the room filled up in the meantime, in
    /// which case `None` is returned. The room row stays locked until the
    /// insert commits.
    pub async fn create_booking(&self, user_id: i32, room_id: i32) -> Result<Option<Booking>> {
        let mut tx = self.pool.begin().await?;
        if lock_room_occupancy(&mut tx, room_id).await?.is_full() {
            debug!("Room {} filled up before booking could be created", room_id);
            tx.rollback().await?;
            return Ok(None);
        }
        let booking = sqlx::query_as(
            r#"
            INSERT INTO bookings (user_id, room_id)
            VALUES ($1, $2) RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(room_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                eyre::Report::new(Error::AlreadyBooked)
            }
            e => e.into(),
        })?;
        tx.commit().await?;
        Ok(Some(booking))
    }

    /// Moves the booking to `room_id` under the same locking rule as
    /// [`BookingRepository::create_booking`].
    pub async fn update_booking_room(
        &self,
        booking_id: i32,
        room_id: i32,
    ) -> Result<Option<Booking>> {
        let mut tx = self.pool.begin().await?;
        if lock_room_occupancy(&mut tx, room_id).await?.is_full() {
            debug!("Room {} filled up before booking could be moved", room_id);
            tx.rollback().await?;
            return Ok(None);
        }
        let booking: Option<Booking> = sqlx::query_as(
            r#"
            UPDATE bookings
            SET room_id = $1, updated_at = now()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(room_id)
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await?;
        match booking {
            None => {
                tx.rollback().await?;
                bail!(Error::BookingNotFound);
            }
            Some(booking) => {
                tx.commit().await?;
                Ok(Some(booking))
            }
        }
    }
}

async fn lock_room_occupancy(
    tx: &mut Transaction<'_, Postgres>,
    room_id: i32,
) -> Result<RoomOccupancy> {
    let capacity: Option<i32> = sqlx::query_scalar(
        r#"
        SELECT capacity FROM rooms
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(room_id)
    .fetch_optional(&mut **tx)
    .await?;
    let Some(capacity) = capacity else {
        bail!(Error::RoomNotFound);
    };
    let booking_count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM bookings
        WHERE room_id = $1
        "#,
    )
    .bind(room_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(RoomOccupancy {
        capacity,
        booking_count,
    })
}
