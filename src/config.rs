use std::{env, time::Duration};

use anyhow::{Context, bail};

pub const DEFAULT_PETFINDER_BASE_URL: &str = "https://api.petfinder.com/v2/";

#[derive(Debug, Clone)]
pub struct PetfinderConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub static_url: String,
    pub static_dir: String,
    pub petfinder: PetfinderConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = database_url()?;
        let jwt_secret = required("JWT_SECRET")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let static_url = env::var("STATIC_URL").unwrap_or_else(|_| "/static/".to_string());
        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());

        let timeout_secs = env::var("PETFINDER_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse::<u64>().ok())
            .unwrap_or(10);
        let petfinder = PetfinderConfig {
            base_url: env::var("PETFINDER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PETFINDER_BASE_URL.to_string()),
            client_id: required("PETFINDER_CLIENT_ID")?,
            client_secret: required("PETFINDER_CLIENT_SECRET")?,
            timeout: Duration::from_secs(timeout_secs),
        };

        Ok(Self {
            port,
            database_url,
            host,
            jwt_secret,
            static_url,
            static_dir,
            petfinder,
        })
    }

    /// Placeholder shown for animals without photos.
    pub fn default_img(&self) -> String {
        format!("{}images/dog-icon.png", self.static_url)
    }
}

/// The only setting the migration runner needs.
pub fn database_url() -> anyhow::Result<String> {
    required("DATABASE_URL")
}

fn required(key: &str) -> anyhow::Result<String> {
    let value = env::var(key).with_context(|| format!("{key} must be set"))?;
    if value.trim().is_empty() {
        bail!("{key} must not be empty");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_url_stands_alone() {
        // SAFETY: no other unit test reads or writes the process environment.
        unsafe {
            env::set_var("DATABASE_URL", "postgres://localhost/pets");
            env::remove_var("JWT_SECRET");
        }
        assert_eq!(database_url().unwrap(), "postgres://localhost/pets");

        let err = AppConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"), "{err}");

        unsafe { env::set_var("DATABASE_URL", "  ") };
        assert!(database_url().is_err());
    }
}
