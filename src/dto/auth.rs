use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const SIGNUP_ERROR: &str = "Invalid sign up - try again";
pub const LOGIN_ERROR: &str = "Please enter a correct username and password.";

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Context for the signup and login forms.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountPage {
    pub error_message: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub exp: usize,
}
