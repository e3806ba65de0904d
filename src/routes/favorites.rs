use axum::{Json, extract::State};

use crate::{
    dto::favorites::FavoritesPage,
    error::AppResult,
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    services::catalog_service,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/favorites/",
    responses(
        (status = 200, description = "The user's favorites that are still adoptable", body = ApiResponse<FavoritesPage>),
        (status = 303, description = "Not signed in, redirect to the login page")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn favorites(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<FavoritesPage>>> {
    let page = catalog_service::favorites_page(&state, &user).await?;
    let total = page.users_pets.len() as i64;
    Ok(Json(ApiResponse::success(
        "Favorites",
        page,
        Some(Meta::new(1, total, total)),
    )))
}
