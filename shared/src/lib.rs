//! Wire types of the brokerage JSON API.
//!
//! Everything here is plain serde data: request bodies, query strings and
//! response envelopes. Field names are camelCase on the wire.

pub mod patch;
pub mod protocol;

pub use patch::double_option;
pub use protocol::*;
