use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use urlencoding::encode;

use crate::{config::PetfinderConfig, error::AppResult};

use super::{
    ListingService,
    dto::{
        AnimalResponse, AnimalTypeResponse, AnimalTypesResponse, AnimalsResponse, ApiProblem,
        BreedsResponse, RemoteResponse, TokenResponse,
    },
};

const USER_AGENT: &str = concat!("pet-adoption/", env!("CARGO_PKG_VERSION"));

/// Tokens are refreshed this long before the service says they expire.
const TOKEN_EXPIRY_SKEW: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

pub struct PetfinderClient {
    http: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<AccessToken>>,
}

impl PetfinderClient {
    pub fn new(config: &PetfinderConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let mut base_url = config.base_url.trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            http,
            base_url,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            token: Mutex::new(None),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Returns a cached bearer token, exchanging the client credentials for a
    /// new one when none is cached or the cached one is about to expire.
    async fn access_token(&self) -> AppResult<RemoteResponse<String>> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.expires_at > Instant::now()) {
            return Ok(RemoteResponse::Found(token.value.clone()));
        }

        let url = self.endpoint("oauth2/token");
        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await?;
        tracing::debug!(endpoint = %url, status = %response.status(), "petfinder token exchange");

        let token = match decode::<TokenResponse>(response).await? {
            RemoteResponse::Found(token) => token,
            RemoteResponse::Problem(problem) => {
                tracing::warn!(status = problem.status, title = %problem.title, "petfinder rejected client credentials");
                return Ok(RemoteResponse::Problem(problem));
            }
        };

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_SKEW);
        *cached = Some(AccessToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        Ok(RemoteResponse::Found(token.access_token))
    }

    /// Drops the cached token if it is still the one the service refused.
    async fn invalidate_token(&self, rejected: &str) {
        let mut cached = self.token.lock().await;
        if cached.as_ref().is_some_and(|t| t.value == rejected) {
            *cached = None;
        }
    }

    async fn send_get(&self, url: &str, token: &str) -> AppResult<Response> {
        let response = self
            .http
            .get(url)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await?;
        tracing::debug!(endpoint = %url, status = %response.status(), "petfinder request");
        Ok(response)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<RemoteResponse<T>> {
        let url = self.endpoint(path);

        let token = match self.access_token().await? {
            RemoteResponse::Found(token) => token,
            RemoteResponse::Problem(problem) => return Ok(RemoteResponse::Problem(problem)),
        };
        let mut response = self.send_get(&url, &token).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::debug!(endpoint = %url, "bearer token refused, refreshing");
            self.invalidate_token(&token).await;
            let token = match self.access_token().await? {
                RemoteResponse::Found(token) => token,
                RemoteResponse::Problem(problem) => return Ok(RemoteResponse::Problem(problem)),
            };
            response = self.send_get(&url, &token).await?;
        }

        decode(response).await
    }
}

#[async_trait]
impl ListingService for PetfinderClient {
    async fn fetch_animals(&self) -> AppResult<RemoteResponse<AnimalsResponse>> {
        self.get("animals").await
    }

    async fn fetch_animal(&self, id: &str) -> AppResult<RemoteResponse<AnimalResponse>> {
        self.get(&format!("animals/{}", encode(id))).await
    }

    async fn fetch_animal_types(&self) -> AppResult<RemoteResponse<AnimalTypesResponse>> {
        self.get("types").await
    }

    async fn fetch_animal_type(
        &self,
        animal_type: &str,
    ) -> AppResult<RemoteResponse<AnimalTypeResponse>> {
        self.get(&format!("types/{}", encode(animal_type))).await
    }

    async fn fetch_animal_breeds(
        &self,
        animal_type: &str,
    ) -> AppResult<RemoteResponse<BreedsResponse>> {
        self.get(&format!("types/{}/breeds", encode(animal_type)))
            .await
    }

    async fn fetch_filtered_animals(
        &self,
        query: &str,
    ) -> AppResult<RemoteResponse<AnimalsResponse>> {
        let query = query.trim_start_matches('?');
        if query.is_empty() {
            return self.get("animals").await;
        }
        self.get(&format!("animals?{query}")).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<RemoteResponse<T>> {
    let status = response.status();
    let body = response.bytes().await?;
    Ok(decode_body(status, &body))
}

pub(crate) fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> RemoteResponse<T> {
    if status.is_success() {
        return match serde_json::from_slice::<T>(body) {
            Ok(value) => RemoteResponse::Found(value),
            Err(err) => {
                tracing::warn!(status = %status, error = %err, "malformed petfinder response");
                RemoteResponse::Problem(ApiProblem::new(
                    status.as_u16(),
                    "Malformed response",
                    Some(err.to_string()),
                ))
            }
        };
    }

    match serde_json::from_slice::<ApiProblem>(body) {
        Ok(problem) => RemoteResponse::Problem(problem),
        Err(_) => RemoteResponse::Problem(ApiProblem::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown status"),
            None,
        )),
    }
}
