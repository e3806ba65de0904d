use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::petfinder::dto::Animal;

/// Body of the create, update and delete favorite forms.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct FavoriteForm {
    #[serde(default)]
    pub api_pet_id: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl FavoriteForm {
    /// The submitted animal id, if it is present and not blank.
    pub fn pet_id(&self) -> Option<&str> {
        self.api_pet_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FavoritePet {
    #[schema(value_type = Object)]
    pub animal: Animal,
    pub comment: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FavoritesPage {
    pub users_pets: Vec<FavoritePet>,
}
