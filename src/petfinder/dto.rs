use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Path prefix the service puts in front of its pagination links.
pub const ANIMALS_LINK_PREFIX: &str = "/v2/animals";

pub const ADOPTABLE: &str = "adoptable";

/// Either the decoded success body or the service's error payload.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RemoteResponse<T> {
    Found(T),
    Problem(ApiProblem),
}

impl<T> RemoteResponse<T> {
    pub fn found(self) -> Option<T> {
        match self {
            RemoteResponse::Found(value) => Some(value),
            RemoteResponse::Problem(_) => None,
        }
    }

    pub fn problem(&self) -> Option<&ApiProblem> {
        match self {
            RemoteResponse::Found(_) => None,
            RemoteResponse::Problem(problem) => Some(problem),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiProblem {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub status: u16,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiProblem {
    pub fn new(status: u16, title: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            kind: None,
            status,
            title: title.into(),
            detail,
            extra: Map::new(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub expires_in: u64,
    pub access_token: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Photo {
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
    pub full: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimalBreeds {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    #[serde(default)]
    pub mixed: bool,
    #[serde(default)]
    pub unknown: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Animal {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub animal_type: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub breeds: Option<AnimalBreeds>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub photos: Vec<Photo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Animal {
    pub fn has_photos(&self) -> bool {
        !self.photos.is_empty()
    }

    pub fn is_adoptable(&self) -> bool {
        self.status.as_deref() == Some(ADOPTABLE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalResponse {
    pub animal: Animal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationLinks {
    pub previous: Option<Link>,
    pub next: Option<Link>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    pub count_per_page: Option<i64>,
    pub total_count: Option<i64>,
    pub current_page: Option<i64>,
    pub total_pages: Option<i64>,
    #[serde(rename = "_links", default)]
    pub links: Option<PaginationLinks>,
}

impl Pagination {
    pub fn previous_fragment(&self) -> Option<String> {
        let link = self.links.as_ref()?.previous.as_ref()?;
        page_fragment(&link.href)
    }

    pub fn next_fragment(&self) -> Option<String> {
        let link = self.links.as_ref()?.next.as_ref()?;
        page_fragment(&link.href)
    }
}

/// Turns `/v2/animals?page=2` into `?page=2`, usable on the local search route.
pub fn page_fragment(href: &str) -> Option<String> {
    if let Some(rest) = href.strip_prefix(ANIMALS_LINK_PREFIX) {
        return Some(rest.to_string());
    }
    href.find('?').map(|idx| href[idx..].to_string())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimalsResponse {
    #[serde(default)]
    pub animals: Vec<Animal>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalType {
    pub name: String,
    #[serde(default)]
    pub coats: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub genders: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimalTypesResponse {
    #[serde(default)]
    pub types: Vec<AnimalType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalTypeResponse {
    #[serde(rename = "type")]
    pub animal_type: AnimalType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Breed {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreedsResponse {
    #[serde(default)]
    pub breeds: Vec<Breed>,
}

// The service sends numeric ids; favorites store them as text.
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "unexpected animal id: {other}"
        ))),
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
