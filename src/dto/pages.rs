use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    models::Favorite,
    petfinder::dto::{Animal, AnimalType, ApiProblem},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct HomePage {
    #[schema(value_type = Vec<Object>)]
    pub animal_types: Vec<AnimalType>,
    #[schema(value_type = Vec<Object>)]
    pub featured_pets: Vec<Animal>,
    pub default_img: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchPage {
    #[serde(flatten)]
    pub home: HomePage,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub search_results: Option<Vec<Animal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub search_error: Option<ApiProblem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PetDetailPage {
    #[schema(value_type = Object)]
    pub animal: Animal,
    /// The viewer's saved favorite for this animal, with its comment.
    pub pet: Option<Favorite>,
    pub default_img: String,
}
