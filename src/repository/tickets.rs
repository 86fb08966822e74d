use eyre::Result;
use sqlx::PgPool;

use crate::domain::ticket::Ticket;

#[cfg_attr(test, faux::create)]
pub struct TicketRepository {
    pool: PgPool,
}

#[cfg_attr(test, faux::methods)]
impl TicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_enrollment_id(&self, user_id: i32) -> Result<Option<i32>> {
        sqlx::query_scalar(
            r#"
            SELECT id FROM enrollments
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_ticket_by_enrollment(&self, enrollment_id: i32) -> Result<Option<Ticket>> {
        sqlx::query_as(
            r#"
            SELECT t.id, t.enrollment_id, t.status, tt.is_remote, tt.includes_hotel
            FROM tickets t
            JOIN ticket_types tt ON tt.id = t.ticket_type_id
            WHERE t.enrollment_id = $1
            "#,
        )
        .bind(enrollment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }
}
