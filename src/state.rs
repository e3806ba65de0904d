use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::AppConfig, petfinder::ListingService};

#[derive(Clone)]
pub struct AppState {
    pub orm: Arc<DatabaseConnection>,
    pub listings: Arc<dyn ListingService>,
    pub config: Arc<AppConfig>,
}
