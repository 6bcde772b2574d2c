// Driven ports: persistence and storage implemented by infrastructure.

pub mod user_repository;
pub mod district_repository;
pub mod category_repository;
pub mod building_repository;
pub mod property_repository;
pub mod call_assignment_repository;
pub mod statistics_repository;
pub mod photo_storage;

pub use user_repository::UserRepository;
pub use district_repository::DistrictRepository;
pub use category_repository::CategoryRepository;
pub use building_repository::{BuildingFilter, BuildingRepository, BuildingSearch};
pub use property_repository::{NumberRange, PropertyChangeSet, PropertyFilter, PropertyRepository};
pub use call_assignment_repository::CallAssignmentRepository;
pub use statistics_repository::StatisticsRepository;
pub use photo_storage::PhotoStorage;
