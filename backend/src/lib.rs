//! Back-office API of a real-estate brokerage: listings with their audit
//! trail, the building directory used for address autocomplete, reference
//! data and user administration.

pub mod config;
pub mod error;
pub mod domain;
pub mod application;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod test_support;
