//! Repository implementations module.
//!
//! - `local`: In-memory implementation, optionally seeded from a JSON dataset
pub mod local;

pub use local::LocalRepository;
