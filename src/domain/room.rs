use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub hotel_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// How many bookings a room accepts and how many it currently holds.
#[derive(Debug, Clone, Copy, PartialEq, FromRow)]
pub struct RoomOccupancy {
    pub capacity: i32,
    pub booking_count: i64,
}

impl RoomOccupancy {
    pub fn is_full(&self) -> bool {
        self.booking_count >= i64::from(self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_full() {
        let occupancy = RoomOccupancy {
            capacity: 3,
            booking_count: 2,
        };
        assert!(!occupancy.is_full());

        let occupancy = RoomOccupancy {
            capacity: 3,
            booking_count: 3,
        };
        assert!(occupancy.is_full());

        let occupancy = RoomOccupancy {
            capacity: 0,
            booking_count: 0,
        };
        assert!(occupancy.is_full());
    }
}
