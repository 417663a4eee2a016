//! Repository trait definitions.
//!
//! - [`error`]: Error types for repository operations
//! - [`interventions`]: Intervention storage operations

pub mod error;
pub mod interventions;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use interventions::InterventionRepository;
