use axum::Json;
use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use shared::connections::{peer_statuses, send_to_peer as acknowledge_peer_message};
use shared::models::{ConnectionsResponse, SendToPeerRequest};

use super::decode_json_body;
use super::errors::CONNECTION_FAILED;

pub(super) async fn list_connections() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ConnectionsResponse {
            success: true,
            connections: peer_statuses(Utc::now()),
        }),
    )
}

pub(super) async fn send_to_peer(body: Bytes) -> Response {
    let request = match decode_json_body::<SendToPeerRequest>(&body, CONNECTION_FAILED) {
        Ok(request) => request,
        Err(response) => return response,
    };

    (
        StatusCode::OK,
        Json(acknowledge_peer_message(&request, Utc::now())),
    )
        .into_response()
}
