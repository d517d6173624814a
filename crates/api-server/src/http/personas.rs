use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use shared::personas::{self, Persona};

#[derive(Serialize)]
struct PersonaListResponse {
    success: bool,
    personas: Vec<&'static Persona>,
}

pub(super) async fn list_personas() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(PersonaListResponse {
            success: true,
            personas: personas::all().collect(),
        }),
    )
}
