//! Pure entity generators.
//!
//! Nothing here touches the store; generators turn catalog content and a random
//! source into drafts that the [`FixtureGenerator`](crate::builders::FixtureGenerator)
//! persists.
//! - [`account`]: contact channels, phone numbers, seeded emails
//! - [`mentor`]: specialization, experience and technology stack
//! - [`course`]: course trees with ordered modules and lessons
//! - [`sampling`]: biased booleans and distinct sampling

pub mod account;
pub mod course;
pub mod mentor;
pub mod sampling;

pub use account::{ContactChannels, account_draft, generate_phone, seeded_email};
pub use course::{CourseGenerator, GeneratedCourse, GeneratedLesson, GeneratedModule};
pub use mentor::{experience_years, mentor_technologies, pick_specialization};
pub use sampling::{active_flag, biased_boolean, sample_distinct};
