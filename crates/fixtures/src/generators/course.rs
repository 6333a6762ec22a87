//! Course tree generation: courses, their modules and lessons.

use std::ops::RangeInclusive;

use rand::Rng;
use uuid::Uuid;

use academy::models::Technology;

use super::sampling::{active_flag, sample_distinct};
use crate::catalog::FixtureCatalog;

/// Number of technologies attached to each course.
pub const COURSE_TECHNOLOGIES: RangeInclusive<usize> = 2..=5;

/// Generated lesson ready for insertion under its module.
#[derive(Debug, Clone)]
pub struct GeneratedLesson {
    pub title: String,
    pub content: String,
    pub order_index: i32,
    pub is_active: bool,
}

/// Generated module ready for insertion under its course.
#[derive(Debug, Clone)]
pub struct GeneratedModule {
    pub title: String,
    pub description: String,
    pub order_index: i32,
    pub is_active: bool,
    pub lessons: Vec<GeneratedLesson>,
}

/// Generated course with its whole subtree.
#[derive(Debug, Clone)]
pub struct GeneratedCourse {
    pub title: String,
    pub description: String,
    pub is_active: bool,
    pub technology_ids: Vec<Uuid>,
    pub modules: Vec<GeneratedModule>,
}

/// Generates course trees from the catalog content.
pub struct CourseGenerator<'a> {
    catalog: &'a FixtureCatalog,
}

impl<'a> CourseGenerator<'a> {
    pub fn new(catalog: &'a FixtureCatalog) -> Self {
        Self { catalog }
    }

    /// Generates `min(count, course title pool)` courses.
    pub fn generate_batch(
        &self,
        count: usize,
        modules_per_course: usize,
        lessons_per_module: usize,
        technologies: &[Technology],
        rng: &mut impl Rng,
    ) -> Vec<GeneratedCourse> {
        (0..self.catalog.course_count(count))
            .map(|i| GeneratedCourse {
                title: self.catalog.course_titles[i].to_string(),
                description: self.catalog.course_descriptions[i].to_string(),
                is_active: active_flag(rng),
                technology_ids: sample_distinct(technologies, COURSE_TECHNOLOGIES, rng)
                    .into_iter()
                    .map(|t| t.id)
                    .collect(),
                modules: self.generate_modules(modules_per_course, lessons_per_module, rng),
            })
            .collect()
    }

    fn generate_modules(
        &self,
        count: usize,
        lessons_per_module: usize,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedModule> {
        (0..count)
            .map(|i| {
                let (title, description) = self.catalog.module_content(i);
                GeneratedModule {
                    title,
                    description,
                    order_index: order_index(i),
                    is_active: active_flag(rng),
                    lessons: self.generate_lessons(lessons_per_module, rng),
                }
            })
            .collect()
    }

    fn generate_lessons(&self, count: usize, rng: &mut impl Rng) -> Vec<GeneratedLesson> {
        (0..count)
            .map(|i| {
                let (title, content) = self.catalog.lesson_content(i);
                GeneratedLesson {
                    title: title.to_string(),
                    content: content.to_string(),
                    order_index: order_index(i),
                    is_active: active_flag(rng),
                }
            })
            .collect()
    }
}

/// 1-based position stored in `order_index` columns.
fn order_index(position: usize) -> i32 {
    i32::try_from(position + 1).unwrap_or(i32::MAX)
}
