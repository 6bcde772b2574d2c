pub mod persistence;
pub mod storage;

pub use persistence::*;
pub use storage::LocalPhotoStorage;
