//! Repository implementations module.
//!
//! Currently a single backend: `local`, an in-memory implementation used for
//! unit testing, local development, and as the default runtime store.
pub mod local;

pub use local::LocalRepository;
