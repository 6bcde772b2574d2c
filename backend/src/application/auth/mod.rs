// Sign-in, token handling and first-run setup

pub mod commands;
pub mod password;
pub mod token;

pub use token::{Claims, TokenSigner};
