use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "ticket_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketStatus {
    Reserved,
    Paid,
}

/// A ticket joined with the type it was bought as.
#[derive(Debug, Clone, FromRow)]
pub struct Ticket {
    pub id: i32,
    pub enrollment_id: i32,
    pub status: TicketStatus,
    pub is_remote: bool,
    pub includes_hotel: bool,
}

impl Ticket {
    /// Only paid, in-person tickets with accommodation may book a room.
    pub fn allows_hotel_booking(&self) -> bool {
        self.status == TicketStatus::Paid && !self.is_remote && self.includes_hotel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TicketStatus::Paid, false, true, true)]
    #[case(TicketStatus::Reserved, false, true, false)]
    #[case(TicketStatus::Paid, true, true, false)]
    #[case(TicketStatus::Paid, false, false, false)]
    fn test_allows_hotel_booking(
        #[case] status: TicketStatus,
        #[case] is_remote: bool,
        #[case] includes_hotel: bool,
        #[case] expected: bool,
    ) {
        let ticket = Ticket {
            id: 1,
            enrollment_id: 1,
            status,
            is_remote,
            includes_hotel,
        };
        assert_eq!(ticket.allows_hotel_booking(), expected);
    }
}
