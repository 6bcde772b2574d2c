// Administrator commands

pub mod list_users;
pub mod create_user;
pub mod update_user;
pub mod deactivate_user;
pub mod statistics;
