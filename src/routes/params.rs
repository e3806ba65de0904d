use serde::Deserialize;
use urlencoding::encode;
use utoipa::ToSchema;

/// Results per page requested from the listing service on every search.
pub const SEARCH_PAGE_SIZE: u32 = 20;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SearchForm {
    #[serde(default)]
    pub pet_type: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
}

impl SearchForm {
    /// Encoded query for the listing service: non-empty fields in the order
    /// type, location, size, gender, age, then the page size.
    pub fn to_query_string(&self) -> String {
        let fields = [
            ("type", &self.pet_type),
            ("location", &self.zip_code),
            ("size", &self.size),
            ("gender", &self.gender),
            ("age", &self.age),
        ];

        let mut pairs: Vec<String> = fields
            .iter()
            .filter_map(|(key, value)| {
                let value = value.as_deref()?.trim();
                (!value.is_empty()).then(|| format!("{key}={}", encode(value)))
            })
            .collect();
        pairs.push(format!("limit={SEARCH_PAGE_SIZE}"));
        pairs.join("&")
    }
}
