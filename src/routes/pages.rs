use axum::{
    Form, Json,
    extract::{RawQuery, State},
    response::Redirect,
};

use crate::{
    dto::pages::{HomePage, SearchPage},
    error::AppResult,
    response::{ApiResponse, Meta},
    routes::{SEARCH_PATH, params::SearchForm},
    services::catalog_service,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Animal types and featured pets, photos first", body = ApiResponse<HomePage>)
    ),
    tag = "Pages"
)]
pub async fn index(State(state): State<AppState>) -> AppResult<Json<ApiResponse<HomePage>>> {
    let page = catalog_service::home_page(&state).await?;
    Ok(Json(ApiResponse::success("Home", page, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/search/",
    params(
        ("type" = Option<String>, Query, description = "Species, e.g. dog"),
        ("location" = Option<String>, Query, description = "ZIP code or city, state"),
        ("size" = Option<String>, Query, description = "small, medium, large, xlarge"),
        ("gender" = Option<String>, Query, description = "male, female, unknown"),
        ("age" = Option<String>, Query, description = "baby, young, adult, senior"),
        ("limit" = Option<u32>, Query, description = "Results per page"),
        ("page" = Option<u32>, Query, description = "Result page")
    ),
    responses(
        (status = 200, description = "Search form and, when a query is given, its results", body = ApiResponse<SearchPage>)
    ),
    tag = "Pages"
)]
pub async fn search(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<ApiResponse<SearchPage>>> {
    let (page, meta) = catalog_service::search_page(&state, query.as_deref()).await?;
    Ok(Json(ApiResponse::success("Search", page, Some(meta))))
}

#[utoipa::path(
    post,
    path = "/search/",
    request_body(content = SearchForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the bookmarkable search URL")
    ),
    tag = "Pages"
)]
pub async fn submit_search(Form(form): Form<SearchForm>) -> Redirect {
    Redirect::to(&format!("{SEARCH_PATH}?{}", form.to_query_string()))
}
