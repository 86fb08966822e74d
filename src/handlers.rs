use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Extension, Json, Router};
use log::debug;

use crate::domain::booking::BookingRequest;
use crate::error::{report_into_response, Error};
use crate::extensions::AuthenticatedGuest;
use crate::routes::Api;

pub fn router(api: Api) -> Router {
    Router::new()
        .route("/bookings", get(get_booking).post(insert_booking))
        .route("/bookings/{booking_id}", put(change_booking))
        .layer(Extension(api))
}

async fn get_booking(
    AuthenticatedGuest { user_id, .. }: AuthenticatedGuest,
    Extension(api): Extension<Api>,
) -> impl IntoResponse {
    match api.get_booking(user_id).await {
        Ok(booking) => (StatusCode::OK, Json(booking)).into_response(),
        Err(e) => report_into_response(e, StatusCode::BAD_REQUEST).into_response(),
    }
}

async fn insert_booking(
    AuthenticatedGuest {
        user_id,
        session_id,
    }: AuthenticatedGuest,
    Extension(api): Extension<Api>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_request(rejection.body_text()),
    };
    debug!(
        "User {} requests room {} (session {})",
        user_id, request.room_id, session_id
    );
    match api.insert_booking(user_id, request).await {
        Ok(created) => (StatusCode::OK, Json(created)).into_response(),
        Err(e) => report_into_response(e, StatusCode::FORBIDDEN).into_response(),
    }
}

async fn change_booking(
    AuthenticatedGuest { user_id, .. }: AuthenticatedGuest,
    Extension(api): Extension<Api>,
    booking_id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Path(booking_id) = match booking_id {
        Ok(booking_id) => booking_id,
        Err(rejection) => return invalid_request(rejection.body_text()),
    };
    let request = payload
        .map(|Json(request)| request)
        .map_err(|rejection| Error::InvalidRequest(rejection.body_text()));
    match api.change_booking(user_id, booking_id, request).await {
        Ok(changed) => (StatusCode::OK, Json(changed)).into_response(),
        Err(e) => report_into_response(e, StatusCode::FORBIDDEN).into_response(),
    }
}

fn invalid_request(reason: String) -> Response {
    Error::InvalidRequest(reason)
        .into_response_tuple()
        .into_response()
}
