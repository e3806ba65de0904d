use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod auth;
pub mod doc;
pub mod favorites;
pub mod health;
pub mod pages;
pub mod params;
pub mod pets;
pub mod types;

pub const HOME_PATH: &str = "/";
pub const SEARCH_PATH: &str = "/search/";
pub const FAVORITES_PATH: &str = "/favorites/";

// Build the page router without binding state; it will be provided at the top level.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route(HOME_PATH, get(pages::index))
        .route(SEARCH_PATH, get(pages::search).post(pages::submit_search))
        .route(FAVORITES_PATH, get(favorites::favorites))
        .route("/pets/{api_pet_id}", get(pets::pets_show))
        .route("/pets/create", post(pets::pets_create))
        .route("/pets/update", post(pets::pets_update))
        .route("/pets/delete", post(pets::pets_delete))
        .route("/types/{animal_type}", get(types::animal_type))
        .route("/types/{animal_type}/breeds", get(types::animal_breeds))
        .merge(auth::router())
}
