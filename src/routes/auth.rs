use axum::{
    Form, Json, Router,
    extract::State,
    http::header,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};

use crate::{
    dto::auth::{AccountPage, LOGIN_ERROR, LoginForm, SIGNUP_ERROR, SignupForm},
    error::{AppError, AppResult},
    middleware::auth::{clear_session_cookie, session_cookie},
    models::User,
    response::{ApiResponse, Meta},
    routes::HOME_PATH,
    services::auth_service::{SESSION_HOURS, issue_token, login_user, register_user},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup/", get(signup_form).post(signup))
        .route("/login/", get(login_form).post(login))
        .route("/logout/", post(logout))
}

fn account_page(message: &str, error_message: &str) -> Response {
    let page = AccountPage {
        error_message: error_message.to_string(),
    };
    Json(ApiResponse::success(message, page, Some(Meta::empty()))).into_response()
}

fn sign_in(state: &AppState, user: &User) -> AppResult<Response> {
    let token = issue_token(user, &state.config.jwt_secret)?;
    let cookie = session_cookie(&token, SESSION_HOURS * 3600);
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to(HOME_PATH)).into_response())
}

#[utoipa::path(
    get,
    path = "/signup/",
    responses(
        (status = 200, description = "Empty signup form", body = ApiResponse<AccountPage>)
    ),
    tag = "Auth"
)]
pub async fn signup_form() -> Response {
    account_page("Sign up", "")
}

#[utoipa::path(
    post,
    path = "/signup/",
    request_body(content = SignupForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Account created and signed in, redirect home"),
        (status = 200, description = "Invalid signup, form shown again", body = ApiResponse<AccountPage>)
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> AppResult<Response> {
    match register_user(&state.orm, form).await {
        Ok(user) => sign_in(&state, &user),
        Err(AppError::BadRequest(reason)) => {
            tracing::debug!(%reason, "signup rejected");
            Ok(account_page("Sign up", SIGNUP_ERROR))
        }
        Err(err) => Err(err),
    }
}

#[utoipa::path(
    get,
    path = "/login/",
    responses(
        (status = 200, description = "Empty login form", body = ApiResponse<AccountPage>)
    ),
    tag = "Auth"
)]
pub async fn login_form() -> Response {
    account_page("Log in", "")
}

#[utoipa::path(
    post,
    path = "/login/",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in, redirect home"),
        (status = 200, description = "Wrong credentials, form shown again", body = ApiResponse<AccountPage>)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    match login_user(&state.orm, form).await {
        Ok(user) => sign_in(&state, &user),
        Err(AppError::BadRequest(_)) => Ok(account_page("Log in", LOGIN_ERROR)),
        Err(err) => Err(err),
    }
}

#[utoipa::path(
    post,
    path = "/logout/",
    responses(
        (status = 303, description = "Session cleared, redirect home")
    ),
    tag = "Auth"
)]
pub async fn logout() -> Response {
    ([(header::SET_COOKIE, clear_session_cookie())], Redirect::to(HOME_PATH)).into_response()
}
