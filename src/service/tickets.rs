use eyre::{ensure, Result};
use std::sync::Arc;

use crate::error::Error;
use crate::repository::tickets::TicketRepository;

#[derive(Clone)]
pub struct TicketService {
    pub ticket_repository: Arc<TicketRepository>,
}

impl TicketService {
    pub async fn ensure_hotel_ticket(&self, user_id: i32) -> Result<()> {
        let enrollment_id = self
            .ticket_repository
            .find_enrollment_id(user_id)
            .await?
            .ok_or(Error::MissingEnrollment)?;
        let ticket = self
            .ticket_repository
            .find_ticket_by_enrollment(enrollment_id)
            .await?
            .ok_or(Error::MissingTicket)?;
        ensure!(ticket.allows_hotel_booking(), Error::TicketNotEligible);
        Ok(())
    }
}
