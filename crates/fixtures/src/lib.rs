//! Demo data generation for academy.
//!
//! Seeds a learning platform with an admin, mentors and students, the
//! specialization and technology catalogs, and courses with ordered modules and
//! lessons. A run is a single transaction: it either commits everything or nothing.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fixtures::prelude::*;
//!
//! let config = GenerationConfig {
//!     clear_first: true,
//!     course_count: 3,
//!     ..Default::default()
//! };
//! let report = FixtureGenerator::new(config)
//!     .generate(&PgBackend::new(pool), &mut rng)
//!     .await?;
//! ```

pub mod builders;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod generators;

pub use error::GenerationError;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{FixtureGenerator, GenerationReport};
    pub use crate::catalog::FixtureCatalog;
    pub use crate::config::{EmailCollision, GenerationConfig};
    pub use crate::db::{EntityKind, FixtureBackend, FixtureStore, MemoryBackend, PgBackend};
    pub use crate::error::GenerationError;
}
