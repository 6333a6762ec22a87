//! Configuration types for demo data generation.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// What to do when a generated account's email already belongs to another account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailCollision {
    /// Skip the account entirely; the run creates fewer accounts than requested.
    #[default]
    Skip,
    /// Drop the email and keep the account reachable by phone only.
    PhoneOnly,
}

/// Configuration for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Delete every seeded entity before generating.
    pub clear_first: bool,

    /// Requested number of courses (clamped to the course title pool).
    pub course_count: usize,

    /// Modules created for every course.
    pub modules_per_course: usize,

    /// Lessons created for every module.
    pub lessons_per_module: usize,

    /// Mentor accounts to create.
    pub mentor_count: usize,

    /// Student accounts to create.
    pub student_count: usize,

    /// Probability (0.0-1.0) that a mentor gets a specialization.
    pub mentor_specialization_rate: f64,

    pub email_collision: EmailCollision,

    /// Plain-text password shared by every seeded account.
    pub password: String,

    /// Upper bound on phone regeneration attempts per account.
    pub max_phone_attempts: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            clear_first: false,
            course_count: 10,
            modules_per_course: 3,
            lessons_per_module: 5,
            mentor_count: 5,
            student_count: 10,
            mentor_specialization_rate: 1.0,
            email_collision: EmailCollision::default(),
            password: "password".to_string(),
            max_phone_attempts: 100,
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if !(0.0..=1.0).contains(&self.mentor_specialization_rate) {
            return Err(GenerationError::InvalidConfig(format!(
                "mentor_specialization_rate must be within 0.0..=1.0, got {}",
                self.mentor_specialization_rate
            )));
        }
        if self.max_phone_attempts == 0 {
            return Err(GenerationError::InvalidConfig(
                "max_phone_attempts must be at least 1".to_string(),
            ));
        }
        if self.password.is_empty() {
            return Err(GenerationError::InvalidConfig(
                "password must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
