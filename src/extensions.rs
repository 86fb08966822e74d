use std::str::FromStr;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Extension;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use log::{debug, error};
use tap::TapFallible;
use uuid::Uuid;

use crate::routes::Api;

/// The guest a booking request is made for, resolved from the session behind
/// its bearer token. Requests without a live session are rejected with 401.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedGuest {
    pub user_id: i32,
    pub session_id: i32,
}

async fn session_token<S>(parts: &mut Parts, state: &S) -> Result<Uuid, StatusCode>
where
    S: Send + Sync,
{
    let TypedHeader(Authorization(bearer)) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .tap_err(|e| debug!("Booking request without bearer token: {}", e))
            .map_err(|_| StatusCode::UNAUTHORIZED)?;
    Uuid::from_str(bearer.token())
        .tap_err(|e| debug!("Bearer token is not a session token: {}", e))
        .map_err(|_| StatusCode::UNAUTHORIZED)
}

impl<S> FromRequestParts<S> for AuthenticatedGuest
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = session_token(parts, state).await?;
        let Extension(api) = Extension::<Api>::from_request_parts(parts, state)
            .await
            .tap_err(|e| error!("Booking API is not installed on the router: {}", e))
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        match api.get_user_by_session_token(token).await {
            Ok(Some(session)) => {
                debug!(
                    "Session {} authenticates guest {}",
                    session.id, session.user_id
                );
                Ok(AuthenticatedGuest {
                    user_id: session.user_id,
                    session_id: session.id,
                })
            }
            Ok(None) => {
                debug!("Token {} has no session", token);
                Err(StatusCode::UNAUTHORIZED)
            }
            Err(e) => {
                error!("Failed to look up session: {:?}", e);
                Err(StatusCode::UNAUTHORIZED)
            }
        }
    }
}
