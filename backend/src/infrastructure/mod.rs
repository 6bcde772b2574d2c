// Infrastructure layer - external concerns (database, filesystem, HTTP)
// Implements the ports defined in the application layer

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::application::auth::TokenSigner;
use crate::application::listings::Catalog;
use crate::application::ports::{
    BuildingRepository, CallAssignmentRepository, CategoryRepository, DistrictRepository, PhotoStorage,
    PropertyRepository, StatisticsRepository, UserRepository,
};
use crate::config::Settings;

pub mod driven;    // Output adapters (repositories, photo storage)
pub mod driving;   // Input adapters (HTTP)

use driven::{
    LocalPhotoStorage, SqliteBuildingRepository, SqliteCallAssignmentRepository, SqliteCategoryRepository,
    SqliteDistrictRepository, SqlitePropertyRepository, SqliteStatisticsRepository, SqliteUserRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub districts: Arc<dyn DistrictRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub buildings: Arc<dyn BuildingRepository>,
    pub properties: Arc<dyn PropertyRepository>,
    pub call_assignments: Arc<dyn CallAssignmentRepository>,
    pub statistics: Arc<dyn StatisticsRepository>,
    pub photos: Arc<dyn PhotoStorage>,
    pub tokens: Arc<TokenSigner>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wires the SQLite adapters and local photo storage.
    pub fn new(pool: SqlitePool, settings: Settings) -> Self {
        Self {
            users: Arc::new(SqliteUserRepository::new(pool.clone())),
            districts: Arc::new(SqliteDistrictRepository::new(pool.clone())),
            categories: Arc::new(SqliteCategoryRepository::new(pool.clone())),
            buildings: Arc::new(SqliteBuildingRepository::new(pool.clone())),
            properties: Arc::new(SqlitePropertyRepository::new(pool.clone())),
            call_assignments: Arc::new(SqliteCallAssignmentRepository::new(pool.clone())),
            statistics: Arc::new(SqliteStatisticsRepository::new(pool)),
            photos: Arc::new(LocalPhotoStorage::new(
                &settings.storage.upload_dir,
                &settings.storage.public_base_url,
            )),
            tokens: Arc::new(TokenSigner::new(&settings.auth.jwt_secret, settings.auth.token_ttl_hours)),
            settings: Arc::new(settings),
        }
    }

    pub fn catalog(&self) -> Catalog<'_, dyn CategoryRepository, dyn DistrictRepository, dyn BuildingRepository> {
        Catalog {
            categories: self.categories.as_ref(),
            districts: self.districts.as_ref(),
            buildings: self.buildings.as_ref(),
        }
    }
}
