use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, sea_query::OnConflict,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    dto::auth::{Claims, LoginForm, SignupForm},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    error::{AppError, AppResult},
    models::User,
};

pub const SESSION_HOURS: i64 = 24;
const USERNAME_MAX_LEN: usize = 150;
const PASSWORD_MIN_LEN: usize = 8;

/// Checks a signup form the way a standard user-creation form does.
pub fn validate_signup(form: &SignupForm) -> AppResult<()> {
    let username = form.username.trim();
    if username.is_empty() || username.chars().count() > USERNAME_MAX_LEN {
        return Err(AppError::BadRequest("invalid username length".into()));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
    {
        return Err(AppError::BadRequest("invalid username characters".into()));
    }
    if form.password1 != form.password2 {
        return Err(AppError::BadRequest("passwords do not match".into()));
    }
    if form.password1.chars().count() < PASSWORD_MIN_LEN {
        return Err(AppError::BadRequest("password too short".into()));
    }
    if form.password1.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest("password entirely numeric".into()));
    }
    if form.password1.eq_ignore_ascii_case(username) {
        return Err(AppError::BadRequest("password too similar to username".into()));
    }
    Ok(())
}

pub async fn register_user(db: &DatabaseConnection, form: SignupForm) -> AppResult<User> {
    validate_signup(&form)?;
    let username = form.username.trim().to_string();

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(form.password1.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();

    let id = Uuid::new_v4();
    let user = UserActive {
        id: Set(id),
        username: Set(username),
        password_hash: Set(password_hash),
        created_at: NotSet,
    };

    // a taken username inserts nothing
    let inserted = Users::insert(user)
        .on_conflict(OnConflict::column(UserCol::Username).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;
    if inserted == 0 {
        return Err(AppError::BadRequest("username is already taken".to_string()));
    }

    let user = Users::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("registered user {id} not found")))?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok(user.into())
}

pub async fn login_user(db: &DatabaseConnection, form: LoginForm) -> AppResult<User> {
    let user = Users::find()
        .filter(UserCol::Username.eq(form.username.trim()))
        .one(db)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid username or password".into()))?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    if Argon2::default()
        .verify_password(form.password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::BadRequest("Invalid username or password".into()));
    }

    Ok(user.into())
}

/// Signs a session token for `user`, valid for [`SESSION_HOURS`].
pub fn issue_token(user: &User, secret: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(SESSION_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::authenticate;
    use axum::http::{HeaderMap, HeaderValue, header};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn form(username: &str, password1: &str, password2: &str) -> SignupForm {
        SignupForm {
            username: username.into(),
            password1: password1.into(),
            password2: password2.into(),
        }
    }

    #[test]
    fn accepts_a_reasonable_signup() {
        assert!(validate_signup(&form("jane.doe+pets", "kittens-4-ever", "kittens-4-ever")).is_ok());
    }

    #[test]
    fn rejects_bad_signups() {
        assert!(validate_signup(&form("", "kittens-4-ever", "kittens-4-ever")).is_err());
        assert!(validate_signup(&form("jane doe", "kittens-4-ever", "kittens-4-ever")).is_err());
        assert!(validate_signup(&form("jane", "kittens-4-ever", "kittens-4-evr")).is_err());
        assert!(validate_signup(&form("jane", "short1", "short1")).is_err());
        assert!(validate_signup(&form("jane", "1234567890", "1234567890")).is_err());
        assert!(validate_signup(&form("janedoe123", "JaneDoe123", "JaneDoe123")).is_err());
        assert!(validate_signup(&form(&"a".repeat(151), "kittens-4-ever", "kittens-4-ever")).is_err());
    }

    #[test]
    fn issued_tokens_authenticate() {
        let user = User {
            id: Uuid::new_v4(),
            username: "jane".into(),
            created_at: Utc::now(),
        };
        let token = issue_token(&user, "test-secret").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("session={token}")).unwrap(),
        );
        let auth = authenticate(&headers, "test-secret").unwrap();
        assert_eq!(auth.user_id, user.id);
        assert_eq!(auth.username, "jane");

        assert!(authenticate(&headers, "another-secret").is_err());
    }

    #[tokio::test]
    async fn taken_username_is_a_bad_request() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let err = register_user(&db, form("jane", "kittens-4-ever", "kittens-4-ever"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        // only the insert ran
        assert_eq!(db.into_transaction_log().len(), 1);
    }
}
