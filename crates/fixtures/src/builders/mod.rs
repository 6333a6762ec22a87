//! Run orchestration.
//!
//! [`FixtureGenerator`] drives the pure generators and the persistence
//! collaborator through one transaction and returns a [`GenerationReport`].

mod generator;

pub use generator::{FixtureGenerator, GenerationReport};
