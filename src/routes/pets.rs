use axum::{
    Form, Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use urlencoding::encode;

use crate::{
    dto::{favorites::FavoriteForm, pages::PetDetailPage},
    error::AppResult,
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    routes::{FAVORITES_PATH, HOME_PATH},
    services::{catalog_service, favorite_service},
    state::AppState,
};

fn pet_path(api_pet_id: &str) -> String {
    format!("/pets/{}", encode(api_pet_id))
}

#[utoipa::path(
    get,
    path = "/pets/{api_pet_id}",
    params(
        ("api_pet_id" = String, Path, description = "Listing-service animal id")
    ),
    responses(
        (status = 200, description = "Animal detail with the viewer's comment", body = ApiResponse<PetDetailPage>),
        (status = 303, description = "Animal not found, redirect to favorites")
    ),
    tag = "Pets"
)]
pub async fn pets_show(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
    Path(api_pet_id): Path<String>,
) -> AppResult<Response> {
    let page = catalog_service::pet_detail(&state, viewer.as_ref(), &api_pet_id).await?;
    match page {
        Some(page) => Ok(Json(ApiResponse::success("Pet", page, Some(Meta::empty()))).into_response()),
        None => Ok(Redirect::to(FAVORITES_PATH).into_response()),
    }
}

#[utoipa::path(
    post,
    path = "/pets/create",
    request_body(content = FavoriteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Saved, redirect to the animal; blank id redirects home")
    ),
    security(("bearer_auth" = [])),
    tag = "Pets"
)]
pub async fn pets_create(
    State(state): State<AppState>,
    user: AuthUser,
    Form(form): Form<FavoriteForm>,
) -> AppResult<Redirect> {
    let Some(api_pet_id) = form.pet_id() else {
        return Ok(Redirect::to(HOME_PATH));
    };

    favorite_service::create(&state.orm, &user, api_pet_id).await?;
    Ok(Redirect::to(&pet_path(api_pet_id)))
}

#[utoipa::path(
    post,
    path = "/pets/update",
    request_body(content = FavoriteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Comment saved, redirect to the animal; blank id redirects home"),
        (status = 404, description = "The animal is not a favorite of this user")
    ),
    security(("bearer_auth" = [])),
    tag = "Pets"
)]
pub async fn pets_update(
    State(state): State<AppState>,
    user: AuthUser,
    Form(form): Form<FavoriteForm>,
) -> AppResult<Redirect> {
    let Some(api_pet_id) = form.pet_id() else {
        return Ok(Redirect::to(HOME_PATH));
    };

    let comment = form.comment.clone().unwrap_or_default();
    favorite_service::update_comment(&state.orm, &user, api_pet_id, comment).await?;
    Ok(Redirect::to(&pet_path(api_pet_id)))
}

#[utoipa::path(
    post,
    path = "/pets/delete",
    request_body(content = FavoriteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Removed, redirect to the animal; blank id redirects home")
    ),
    security(("bearer_auth" = [])),
    tag = "Pets"
)]
pub async fn pets_delete(
    State(state): State<AppState>,
    user: AuthUser,
    Form(form): Form<FavoriteForm>,
) -> AppResult<Redirect> {
    let Some(api_pet_id) = form.pet_id() else {
        return Ok(Redirect::to(HOME_PATH));
    };

    favorite_service::delete(&state.orm, &user, api_pet_id).await?;
    Ok(Redirect::to(&pet_path(api_pet_id)))
}
