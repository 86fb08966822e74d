use sqlx::types::chrono::{DateTime, Utc};
use sqlx::types::Uuid;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: i32,
    pub user_id: i32,
    pub token: Uuid,
    pub created_at: DateTime<Utc>,
}
