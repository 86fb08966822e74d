use eyre::Result;
use sqlx::types::Uuid;
use std::sync::Arc;

use crate::domain::auth::Session;
use crate::repository::auth::AuthRepository;

#[derive(Clone)]
pub struct AuthService {
    pub auth_repository: Arc<AuthRepository>,
}

impl AuthService {
    pub async fn get_user_by_session_token(&self, token: Uuid) -> Result<Option<Session>> {
        self.auth_repository.get_by_session_token(token).await
    }
}
