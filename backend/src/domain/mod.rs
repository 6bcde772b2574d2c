// Domain layer - business logic, entities, value objects
// No dependencies on other layers

pub mod entities;
pub mod value_objects;
pub mod address;
pub mod pricing;
pub mod change_log;
pub mod reference_data;

pub use entities::*;
pub use value_objects::*;
