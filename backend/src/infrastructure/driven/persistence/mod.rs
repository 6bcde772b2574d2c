mod db_types;
mod query;
pub mod user_repository;
pub mod reference_repository;
pub mod building_repository;
pub mod property_repository;
pub mod call_assignment_repository;
pub mod statistics_repository;

pub use user_repository::SqliteUserRepository;
pub use reference_repository::{SqliteCategoryRepository, SqliteDistrictRepository};
pub use building_repository::SqliteBuildingRepository;
pub use property_repository::SqlitePropertyRepository;
pub use call_assignment_repository::SqliteCallAssignmentRepository;
pub use statistics_repository::SqliteStatisticsRepository;
