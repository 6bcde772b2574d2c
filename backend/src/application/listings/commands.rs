// Listing commands

pub mod list_properties;
pub mod create_property;
pub mod get_property;
pub mod update_property;
pub mod archive_property;
pub mod property_history;
pub mod call_assignments;
pub mod upload_photo;
