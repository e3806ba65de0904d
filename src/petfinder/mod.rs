//! Read-only access to the Petfinder v2 listing service.

use async_trait::async_trait;

use crate::error::AppResult;

pub mod client;
pub mod dto;
#[cfg(test)]
pub(crate) mod fake;

pub use client::PetfinderClient;
pub use dto::{
    AnimalResponse, AnimalTypeResponse, AnimalTypesResponse, AnimalsResponse, ApiProblem,
    BreedsResponse, RemoteResponse,
};

/// Lookups the page handlers need from the listing service.
///
/// Answers from the service, including its error payloads, come back as
/// [`RemoteResponse`] values; only transport failures are errors.
#[async_trait]
pub trait ListingService: Send + Sync {
    async fn fetch_animals(&self) -> AppResult<RemoteResponse<AnimalsResponse>>;

    async fn fetch_animal(&self, id: &str) -> AppResult<RemoteResponse<AnimalResponse>>;

    async fn fetch_animal_types(&self) -> AppResult<RemoteResponse<AnimalTypesResponse>>;

    async fn fetch_animal_type(
        &self,
        animal_type: &str,
    ) -> AppResult<RemoteResponse<AnimalTypeResponse>>;

    async fn fetch_animal_breeds(
        &self,
        animal_type: &str,
    ) -> AppResult<RemoteResponse<BreedsResponse>>;

    /// `query` is a raw, already encoded query string without the leading `?`.
    async fn fetch_filtered_animals(
        &self,
        query: &str,
    ) -> AppResult<RemoteResponse<AnimalsResponse>>;
}
