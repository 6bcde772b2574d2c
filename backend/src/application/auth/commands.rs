// Auth commands

pub mod login;
pub mod me;
pub mod setup_status;
pub mod bootstrap_admin;
