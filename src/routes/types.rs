use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    error::AppResult,
    petfinder::RemoteResponse,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Answers with the found payload, or with the problem under its own status.
fn remote_json<T: Serialize>(response: RemoteResponse<T>, message: &str) -> Response {
    match response {
        RemoteResponse::Found(found) => {
            Json(ApiResponse::success(message, found, Some(Meta::empty()))).into_response()
        }
        RemoteResponse::Problem(problem) => {
            let status = StatusCode::from_u16(problem.status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            let title = problem.title.clone();
            (status, Json(ApiResponse::success(title, problem, Some(Meta::empty())))).into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/types/{animal_type}",
    params(
        ("animal_type" = String, Path, description = "Species name, e.g. Dog")
    ),
    responses(
        (status = 200, description = "Coats, colors and genders for the species", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Unknown species")
    ),
    tag = "Types"
)]
pub async fn animal_type(
    State(state): State<AppState>,
    Path(animal_type): Path<String>,
) -> AppResult<Response> {
    let response = state.listings.fetch_animal_type(&animal_type).await?;
    Ok(remote_json(response, "Animal type"))
}

#[utoipa::path(
    get,
    path = "/types/{animal_type}/breeds",
    params(
        ("animal_type" = String, Path, description = "Species name, e.g. Dog")
    ),
    responses(
        (status = 200, description = "Breeds of the species", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Unknown species")
    ),
    tag = "Types"
)]
pub async fn animal_breeds(
    State(state): State<AppState>,
    Path(animal_type): Path<String>,
) -> AppResult<Response> {
    let response = state.listings.fetch_animal_breeds(&animal_type).await?;
    Ok(remote_json(response, "Breeds"))
}
