pub mod user_id;
pub mod email;
pub mod display_name;
pub mod user_role;
pub mod property_status;
pub mod confidence_level;
pub mod history_action;

pub use user_id::UserId;
pub use email::Email;
pub use display_name::DisplayName;
pub use user_role::UserRole;
pub use property_status::PropertyStatus;
pub use confidence_level::ConfidenceLevel;
pub use history_action::HistoryAction;
