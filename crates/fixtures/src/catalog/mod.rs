//! Static content tables the generator draws from.
//!
//! Every pool is an explicit table with a documented overflow rule:
//! - person names: requesting more accounts than names fails with
//!   [`GenerationError::InsufficientFixtureData`]
//! - course titles: the course count is clamped to the pool size
//! - module titles: positions past the pool get a synthesized "Модуль N" title
//! - lesson titles: positions cycle through the pool
//!
//! Parallel pools (titles next to descriptions) must have equal lengths, otherwise
//! [`GenerationError::FixtureDataInconsistency`] is raised before anything is written.

mod content;

use crate::config::GenerationConfig;
use crate::error::GenerationError;

/// Specialization catalog entry, upserted by `code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecializationSeed {
    pub code: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonName {
    pub first: &'static str,
    pub last: &'static str,
}

impl PersonName {
    pub const fn new(first: &'static str, last: &'static str) -> Self {
        Self { first, last }
    }
}

/// The full set of content tables used by one generation run.
#[derive(Debug, Clone)]
pub struct FixtureCatalog {
    pub specializations: &'static [SpecializationSeed],
    pub technologies: &'static [&'static str],
    /// Specialization code → technologies a mentor of that specialization should know.
    pub specialization_technologies: &'static [(&'static str, &'static [&'static str])],
    pub mentor_names: &'static [PersonName],
    pub student_names: &'static [PersonName],
    pub course_titles: &'static [&'static str],
    pub course_descriptions: &'static [&'static str],
    pub module_titles: &'static [&'static str],
    pub module_descriptions: &'static [&'static str],
    pub lesson_titles: &'static [&'static str],
    pub lesson_contents: &'static [&'static str],
}

impl Default for FixtureCatalog {
    fn default() -> Self {
        Self {
            specializations: content::SPECIALIZATIONS,
            technologies: content::TECHNOLOGIES,
            specialization_technologies: content::SPECIALIZATION_TECHNOLOGIES,
            mentor_names: content::MENTOR_NAMES,
            student_names: content::STUDENT_NAMES,
            course_titles: content::COURSE_TITLES,
            course_descriptions: content::COURSE_DESCRIPTIONS,
            module_titles: content::MODULE_TITLES,
            module_descriptions: content::MODULE_DESCRIPTIONS,
            lesson_titles: content::LESSON_TITLES,
            lesson_contents: content::LESSON_CONTENTS,
        }
    }
}

impl FixtureCatalog {
    /// Checks that the catalog can satisfy `config` without running out of data.
    pub fn validate(&self, config: &GenerationConfig) -> Result<(), GenerationError> {
        check_parallel(
            "course_titles",
            self.course_titles,
            "course_descriptions",
            self.course_descriptions,
        )?;
        check_parallel(
            "module_titles",
            self.module_titles,
            "module_descriptions",
            self.module_descriptions,
        )?;
        check_parallel(
            "lesson_titles",
            self.lesson_titles,
            "lesson_contents",
            self.lesson_contents,
        )?;

        check_sufficient("mentor_names", self.mentor_names.len(), config.mentor_count)?;
        check_sufficient("student_names", self.student_names.len(), config.student_count)?;

        let lessons_needed = self.course_count(config.course_count) > 0
            && config.modules_per_course > 0
            && config.lessons_per_module > 0;
        if lessons_needed && self.lesson_titles.is_empty() {
            return Err(GenerationError::InsufficientFixtureData {
                pool: "lesson_titles",
                available: 0,
                requested: config.lessons_per_module,
            });
        }

        Ok(())
    }

    /// Number of courses a run produces: the request clamped to the title pool.
    pub fn course_count(&self, requested: usize) -> usize {
        requested.min(self.course_titles.len())
    }

    /// Technologies relevant to a specialization code; empty for unknown codes.
    pub fn relevant_technologies(&self, code: &str) -> &'static [&'static str] {
        self.specialization_technologies
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, names)| *names)
            .unwrap_or(&[])
    }

    /// Title and description for the module at zero-based `index`.
    pub fn module_content(&self, index: usize) -> (String, String) {
        match (
            self.module_titles.get(index),
            self.module_descriptions.get(index),
        ) {
            (Some(title), Some(description)) => (title.to_string(), description.to_string()),
            _ => (
                format!("Модуль {}", index + 1),
                format!("Описание модуля {}", index + 1),
            ),
        }
    }

    /// Title and content for the lesson at zero-based `index`, cycling through the pool.
    ///
    /// Callers must have validated that the pool is non-empty.
    pub fn lesson_content(&self, index: usize) -> (&'static str, &'static str) {
        let i = index % self.lesson_titles.len();
        (self.lesson_titles[i], self.lesson_contents[i])
    }
}

fn check_parallel(
    left: &'static str,
    left_pool: &[&str],
    right: &'static str,
    right_pool: &[&str],
) -> Result<(), GenerationError> {
    if left_pool.len() != right_pool.len() {
        return Err(GenerationError::FixtureDataInconsistency {
            left,
            left_len: left_pool.len(),
            right,
            right_len: right_pool.len(),
        });
    }
    Ok(())
}

fn check_sufficient(
    pool: &'static str,
    available: usize,
    requested: usize,
) -> Result<(), GenerationError> {
    if requested > available {
        return Err(GenerationError::InsufficientFixtureData {
            pool,
            available,
            requested,
        });
    }
    Ok(())
}
