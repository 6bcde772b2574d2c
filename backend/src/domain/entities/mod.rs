pub mod user;
pub mod district;
pub mod category;
pub mod building;
pub mod property;
pub mod history;
pub mod call_assignment;

pub use user::User;
pub use district::District;
pub use category::{Category, REALTOR_CATEGORY};
pub use building::Building;
pub use property::{Property, PropertyPhoto};
pub use history::PropertyHistory;
pub use call_assignment::CallAssignment;
