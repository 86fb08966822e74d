use eyre::Result;
use sqlx::types::Uuid;
use sqlx::PgPool;

use crate::domain::auth::Session;

#[cfg_attr(test, faux::create)]
pub struct AuthRepository {
    pool: PgPool,
}

#[cfg_attr(test, faux::methods)]
impl AuthRepository {
    pub fn new(pool: PgPool) -> Self {
        AuthRepository { pool }
    }

    pub async fn get_by_session_token(&self, token: Uuid) -> Result<Option<Session>> {
        sqlx::query_as(
            r#"
            SELECT * FROM sessions
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }
}
