//! In-memory listing service for handler tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, Transaction};

use crate::{
    config::{AppConfig, PetfinderConfig},
    error::AppResult,
    state::AppState,
};

use super::{
    ListingService,
    dto::{
        Animal, AnimalResponse, AnimalTypeResponse, AnimalTypesResponse, AnimalsResponse,
        ApiProblem, BreedsResponse, RemoteResponse,
    },
};

#[derive(Default)]
pub struct FakeListings {
    pub animals: HashMap<String, Animal>,
    pub collection: AnimalsResponse,
    pub filtered: Option<RemoteResponse<AnimalsResponse>>,
    pub queries: Mutex<Vec<String>>,
}

impl FakeListings {
    pub fn with_animal(mut self, id: &str, status: &str, photos: usize) -> Self {
        self.animals.insert(id.to_string(), animal(id, status, photos));
        self
    }
}

pub fn animal(id: &str, status: &str, photos: usize) -> Animal {
    Animal {
        id: id.to_string(),
        status: Some(status.to_string()),
        photos: vec![Default::default(); photos],
        ..Default::default()
    }
}

fn not_found() -> ApiProblem {
    ApiProblem::new(404, "Not Found", Some("Not Found".into()))
}

#[async_trait]
impl ListingService for FakeListings {
    async fn fetch_animals(&self) -> AppResult<RemoteResponse<AnimalsResponse>> {
        Ok(RemoteResponse::Found(self.collection.clone()))
    }

    async fn fetch_animal(&self, id: &str) -> AppResult<RemoteResponse<AnimalResponse>> {
        Ok(match self.animals.get(id) {
            Some(animal) => RemoteResponse::Found(AnimalResponse {
                animal: animal.clone(),
            }),
            None => RemoteResponse::Problem(not_found()),
        })
    }

    async fn fetch_animal_types(&self) -> AppResult<RemoteResponse<AnimalTypesResponse>> {
        Ok(RemoteResponse::Found(AnimalTypesResponse::default()))
    }

    async fn fetch_animal_type(
        &self,
        _animal_type: &str,
    ) -> AppResult<RemoteResponse<AnimalTypeResponse>> {
        Ok(RemoteResponse::Problem(not_found()))
    }

    async fn fetch_animal_breeds(
        &self,
        _animal_type: &str,
    ) -> AppResult<RemoteResponse<BreedsResponse>> {
        Ok(RemoteResponse::Found(BreedsResponse::default()))
    }

    async fn fetch_filtered_animals(
        &self,
        query: &str,
    ) -> AppResult<RemoteResponse<AnimalsResponse>> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_string());
        }
        Ok(self
            .filtered
            .clone()
            .unwrap_or_else(|| RemoteResponse::Found(AnimalsResponse::default())))
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://unused".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "test-secret".into(),
        static_url: "/static/".into(),
        static_dir: "static".into(),
        petfinder: PetfinderConfig {
            base_url: "http://127.0.0.1:1/v2/".into(),
            client_id: "id".into(),
            client_secret: "secret".into(),
            timeout: Duration::from_secs(1),
        },
    }
}

pub fn test_state(orm: Arc<DatabaseConnection>, listings: FakeListings) -> AppState {
    AppState {
        orm,
        listings: Arc::new(listings),
        config: Arc::new(test_config()),
    }
}

/// Statements the mock connection saw. `state` must be the last other holder
/// of `orm`.
pub fn transaction_log(state: AppState, orm: Arc<DatabaseConnection>) -> Vec<Transaction> {
    drop(state);
    Arc::try_unwrap(orm)
        .ok()
        .expect("mock connection still shared")
        .into_transaction_log()
}
