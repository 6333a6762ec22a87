//! Persistence for generated data.
//!
//! The generator talks to a [`FixtureBackend`], which opens one [`FixtureStore`]
//! transaction per run. [`PgBackend`] writes to PostgreSQL; [`MemoryBackend`]
//! keeps everything in process for tests and dry runs.

mod memory;
mod postgres;
mod store;

pub use memory::{MemoryBackend, MemoryState, MemoryTransaction};
pub use postgres::{PgBackend, PgFixtureStore};
pub use store::{
    EntityKind, FixtureBackend, FixtureStore, NewCourse, NewLesson, NewMentor, NewModule,
    StoreError, TechnologyOwner, Upserted,
};
