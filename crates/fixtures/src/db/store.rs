//! The persistence capability the generator drives.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use academy::models::{
    Account, Course, Lesson, Mentor, Module, NewAccount, Specialization, Student, Technology,
};

use crate::catalog::SpecializationSeed;

/// Every table the generator writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Account,
    Specialization,
    Technology,
    Mentor,
    MentorTechnology,
    Student,
    Course,
    CourseTechnology,
    Module,
    Lesson,
}

impl EntityKind {
    /// Deletion order for the clear phase: children before parents.
    pub const CLEAR_ORDER: [EntityKind; 10] = [
        EntityKind::Lesson,
        EntityKind::Module,
        EntityKind::CourseTechnology,
        EntityKind::Course,
        EntityKind::MentorTechnology,
        EntityKind::Mentor,
        EntityKind::Student,
        EntityKind::Account,
        EntityKind::Specialization,
        EntityKind::Technology,
    ];

    /// Returns the table name.
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Account => "accounts",
            EntityKind::Specialization => "specializations",
            EntityKind::Technology => "technologies",
            EntityKind::Mentor => "mentors",
            EntityKind::MentorTechnology => "mentor_technologies",
            EntityKind::Student => "students",
            EntityKind::Course => "courses",
            EntityKind::CourseTechnology => "course_technologies",
            EntityKind::Module => "modules",
            EntityKind::Lesson => "lessons",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Unique constraint {constraint} violated on {entity}")]
    UniqueViolation {
        entity: EntityKind,
        constraint: String,
    },

    #[error("Foreign key constraint {constraint} violated on {entity}")]
    ForeignKeyViolation {
        entity: EntityKind,
        constraint: String,
    },

    #[error("Check constraint {constraint} violated on {entity}")]
    CheckViolation {
        entity: EntityKind,
        constraint: String,
    },

    #[error("{entity} row {id} not found")]
    NotFound { entity: EntityKind, id: Uuid },

    #[error("Injected failure on {0}")]
    Injected(EntityKind),
}

/// Result of a get-or-create by natural key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upserted<T> {
    Created(T),
    Existing(T),
}

impl<T> Upserted<T> {
    pub fn was_created(&self) -> bool {
        matches!(self, Upserted::Created(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Upserted::Created(value) | Upserted::Existing(value) => value,
        }
    }
}

/// Owner side of a technology many-to-many association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechnologyOwner {
    Mentor(Uuid),
    Course(Uuid),
}

impl TechnologyOwner {
    pub fn kind(&self) -> EntityKind {
        match self {
            TechnologyOwner::Mentor(_) => EntityKind::MentorTechnology,
            TechnologyOwner::Course(_) => EntityKind::CourseTechnology,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            TechnologyOwner::Mentor(id) | TechnologyOwner::Course(id) => *id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewMentor {
    pub account_id: Uuid,
    pub specialization_id: Option<Uuid>,
    pub experience_years: i32,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewModule {
    pub course_id: Uuid,
    pub title: String,
    pub description: String,
    pub order_index: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewLesson {
    pub module_id: Uuid,
    pub title: String,
    pub content: String,
    pub order_index: i32,
    pub is_active: bool,
}

/// Opens atomic units of work.
#[async_trait]
pub trait FixtureBackend: Send + Sync {
    type Tx: FixtureStore;

    async fn begin(&self) -> Result<Self::Tx, StoreError>;
}

/// One open transaction. Nothing written through it is visible outside until
/// [`FixtureStore::commit`]; dropping it or calling [`FixtureStore::rollback`]
/// discards every write.
#[async_trait]
pub trait FixtureStore: Send + Sized {
    /// Deletes every row of `kind`, returning the number removed.
    async fn delete_all(&mut self, kind: EntityKind) -> Result<u64, StoreError>;

    async fn email_taken(&mut self, email: &str) -> Result<bool, StoreError>;

    async fn phone_taken(&mut self, phone: &str) -> Result<bool, StoreError>;

    async fn create_account(&mut self, account: NewAccount) -> Result<Account, StoreError>;

    /// Looks up a specialization by code, inserting it (active) if absent.
    /// Existing rows are returned untouched.
    async fn get_or_create_specialization(
        &mut self,
        seed: &SpecializationSeed,
    ) -> Result<Upserted<Specialization>, StoreError>;

    async fn find_technology(&mut self, name: &str) -> Result<Option<Technology>, StoreError>;

    async fn create_technology(&mut self, name: &str) -> Result<Technology, StoreError>;

    async fn get_or_create_technology(
        &mut self,
        name: &str,
    ) -> Result<Upserted<Technology>, StoreError>;

    async fn create_mentor(&mut self, mentor: NewMentor) -> Result<Mentor, StoreError>;

    async fn create_student(&mut self, account_id: Uuid) -> Result<Student, StoreError>;

    async fn create_course(&mut self, course: NewCourse) -> Result<Course, StoreError>;

    async fn create_module(&mut self, module: NewModule) -> Result<Module, StoreError>;

    async fn create_lesson(&mut self, lesson: NewLesson) -> Result<Lesson, StoreError>;

    /// Replaces the technology set of `owner` with `technology_ids`.
    async fn set_technologies(
        &mut self,
        owner: TechnologyOwner,
        technology_ids: &[Uuid],
    ) -> Result<(), StoreError>;

    async fn commit(self) -> Result<(), StoreError>;

    async fn rollback(self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_order_covers_every_table_once() {
        let tables: std::collections::HashSet<_> =
            EntityKind::CLEAR_ORDER.iter().map(|k| k.table()).collect();
        assert_eq!(tables.len(), EntityKind::CLEAR_ORDER.len());
    }

    #[test]
    fn test_clear_order_children_first() {
        let pos = |kind: EntityKind| {
            EntityKind::CLEAR_ORDER
                .iter()
                .position(|k| *k == kind)
                .unwrap()
        };
        assert!(pos(EntityKind::Lesson) < pos(EntityKind::Module));
        assert!(pos(EntityKind::Module) < pos(EntityKind::Course));
        assert!(pos(EntityKind::CourseTechnology) < pos(EntityKind::Technology));
        assert!(pos(EntityKind::MentorTechnology) < pos(EntityKind::Mentor));
        assert!(pos(EntityKind::Mentor) < pos(EntityKind::Account));
        assert!(pos(EntityKind::Mentor) < pos(EntityKind::Specialization));
        assert!(pos(EntityKind::Student) < pos(EntityKind::Account));
    }

    #[test]
    fn test_upserted_accessors() {
        let created = Upserted::Created(1);
        let existing = Upserted::Existing(2);
        assert!(created.was_created());
        assert!(!existing.was_created());
        assert_eq!(existing.into_inner(), 2);
    }
}
