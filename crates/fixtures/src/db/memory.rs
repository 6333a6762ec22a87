//! In-memory persistence with the same constraints as the relational schema.
//!
//! Foreign keys are enforced as `RESTRICT`: deleting a parent that still has
//! children fails, so callers must clear tables children-first.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use academy::models::{
    Account, Course, Lesson, Mentor, Module, NewAccount, Specialization, Student, Technology,
};

use super::store::{
    EntityKind, FixtureBackend, FixtureStore, NewCourse, NewLesson, NewMentor, NewModule,
    StoreError, TechnologyOwner, Upserted,
};
use crate::catalog::SpecializationSeed;

/// Committed contents of a [`MemoryBackend`].
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    pub accounts: Vec<Account>,
    pub specializations: Vec<Specialization>,
    pub technologies: Vec<Technology>,
    pub mentors: Vec<Mentor>,
    /// (mentor_id, technology_id)
    pub mentor_technologies: Vec<(Uuid, Uuid)>,
    pub students: Vec<Student>,
    pub courses: Vec<Course>,
    /// (course_id, technology_id)
    pub course_technologies: Vec<(Uuid, Uuid)>,
    pub modules: Vec<Module>,
    pub lessons: Vec<Lesson>,
}

impl MemoryState {
    /// Row count of one table.
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Account => self.accounts.len(),
            EntityKind::Specialization => self.specializations.len(),
            EntityKind::Technology => self.technologies.len(),
            EntityKind::Mentor => self.mentors.len(),
            EntityKind::MentorTechnology => self.mentor_technologies.len(),
            EntityKind::Student => self.students.len(),
            EntityKind::Course => self.courses.len(),
            EntityKind::CourseTechnology => self.course_technologies.len(),
            EntityKind::Module => self.modules.len(),
            EntityKind::Lesson => self.lessons.len(),
        }
    }

    /// Technology ids associated with `owner`.
    pub fn technologies_of(&self, owner: TechnologyOwner) -> Vec<Uuid> {
        let links = match owner {
            TechnologyOwner::Mentor(_) => &self.mentor_technologies,
            TechnologyOwner::Course(_) => &self.course_technologies,
        };
        links
            .iter()
            .filter(|(owner_id, _)| *owner_id == owner.id())
            .map(|(_, technology_id)| *technology_id)
            .collect()
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    fn has_technology(&self, id: Uuid) -> bool {
        self.technologies.iter().any(|t| t.id == id)
    }
}

/// Shared in-memory database. Clones share the same committed state.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
    fail_on: Option<EntityKind>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every write to `kind` fail with [`StoreError::Injected`].
    pub fn failing_on(mut self, kind: EntityKind) -> Self {
        self.fail_on = Some(kind);
        self
    }

    /// Returns a copy of the committed state.
    pub fn snapshot(&self) -> MemoryState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl FixtureBackend for MemoryBackend {
    type Tx = MemoryTransaction;

    async fn begin(&self) -> Result<Self::Tx, StoreError> {
        Ok(MemoryTransaction {
            shared: Arc::clone(&self.state),
            working: self.snapshot(),
            fail_on: self.fail_on,
        })
    }
}

/// Works on a private copy of the state; [`FixtureStore::commit`] publishes it.
pub struct MemoryTransaction {
    shared: Arc<Mutex<MemoryState>>,
    working: MemoryState,
    fail_on: Option<EntityKind>,
}

impl MemoryTransaction {
    fn check_injected(&self, kind: EntityKind) -> Result<(), StoreError> {
        if self.fail_on == Some(kind) {
            return Err(StoreError::Injected(kind));
        }
        Ok(())
    }

    /// Fails if any row still references a row of `kind`.
    fn check_unreferenced(&self, kind: EntityKind) -> Result<(), StoreError> {
        let s = &self.working;
        let blocker = match kind {
            EntityKind::Account if !s.mentors.is_empty() => Some("mentors_account_id_fkey"),
            EntityKind::Account if !s.students.is_empty() => Some("students_account_id_fkey"),
            EntityKind::Specialization if s.mentors.iter().any(|m| m.specialization_id.is_some()) => {
                Some("mentors_specialization_id_fkey")
            }
            EntityKind::Technology if !s.mentor_technologies.is_empty() => {
                Some("mentor_technologies_technology_id_fkey")
            }
            EntityKind::Technology if !s.course_technologies.is_empty() => {
                Some("course_technologies_technology_id_fkey")
            }
            EntityKind::Mentor if !s.mentor_technologies.is_empty() => {
                Some("mentor_technologies_mentor_id_fkey")
            }
            EntityKind::Course if !s.modules.is_empty() => Some("modules_course_id_fkey"),
            EntityKind::Course if !s.course_technologies.is_empty() => {
                Some("course_technologies_course_id_fkey")
            }
            EntityKind::Module if !s.lessons.is_empty() => Some("lessons_module_id_fkey"),
            _ => None,
        };

        match blocker {
            Some(constraint) => Err(StoreError::ForeignKeyViolation {
                entity: kind,
                constraint: constraint.to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn unique_violation(entity: EntityKind, constraint: &str) -> StoreError {
    StoreError::UniqueViolation {
        entity,
        constraint: constraint.to_string(),
    }
}

#[async_trait]
impl FixtureStore for MemoryTransaction {
    async fn delete_all(&mut self, kind: EntityKind) -> Result<u64, StoreError> {
        self.check_injected(kind)?;
        self.check_unreferenced(kind)?;

        let removed = self.working.count(kind) as u64;
        let s = &mut self.working;
        match kind {
            EntityKind::Account => s.accounts.clear(),
            EntityKind::Specialization => s.specializations.clear(),
            EntityKind::Technology => s.technologies.clear(),
            EntityKind::Mentor => s.mentors.clear(),
            EntityKind::MentorTechnology => s.mentor_technologies.clear(),
            EntityKind::Student => s.students.clear(),
            EntityKind::Course => s.courses.clear(),
            EntityKind::CourseTechnology => s.course_technologies.clear(),
            EntityKind::Module => s.modules.clear(),
            EntityKind::Lesson => s.lessons.clear(),
        }
        Ok(removed)
    }

    async fn email_taken(&mut self, email: &str) -> Result<bool, StoreError> {
        Ok(self
            .working
            .accounts
            .iter()
            .any(|a| a.email.as_deref() == Some(email)))
    }

    async fn phone_taken(&mut self, phone: &str) -> Result<bool, StoreError> {
        Ok(self
            .working
            .accounts
            .iter()
            .any(|a| a.phone.as_deref() == Some(phone)))
    }

    async fn create_account(&mut self, account: NewAccount) -> Result<Account, StoreError> {
        self.check_injected(EntityKind::Account)?;

        if !account.has_contact() {
            return Err(StoreError::CheckViolation {
                entity: EntityKind::Account,
                constraint: "accounts_contact_present".to_string(),
            });
        }
        if let Some(email) = &account.email {
            if self.email_taken(email).await? {
                return Err(unique_violation(EntityKind::Account, "accounts_email_key"));
            }
        }
        if let Some(phone) = &account.phone {
            if self.phone_taken(phone).await? {
                return Err(unique_violation(EntityKind::Account, "accounts_phone_key"));
            }
        }

        let account = account.into_account();
        self.working.accounts.push(account.clone());
        Ok(account)
    }

    async fn get_or_create_specialization(
        &mut self,
        seed: &SpecializationSeed,
    ) -> Result<Upserted<Specialization>, StoreError> {
        if let Some(existing) = self
            .working
            .specializations
            .iter()
            .find(|s| s.code == seed.code)
        {
            return Ok(Upserted::Existing(existing.clone()));
        }
        self.check_injected(EntityKind::Specialization)?;

        let specialization = Specialization {
            id: Uuid::new_v4(),
            code: seed.code.to_string(),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            is_active: true,
        };
        self.working.specializations.push(specialization.clone());
        Ok(Upserted::Created(specialization))
    }

    async fn find_technology(&mut self, name: &str) -> Result<Option<Technology>, StoreError> {
        Ok(self
            .working
            .technologies
            .iter()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn create_technology(&mut self, name: &str) -> Result<Technology, StoreError> {
        self.check_injected(EntityKind::Technology)?;
        if self.find_technology(name).await?.is_some() {
            return Err(unique_violation(
                EntityKind::Technology,
                "technologies_name_key",
            ));
        }

        let technology = Technology {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        self.working.technologies.push(technology.clone());
        Ok(technology)
    }

    async fn get_or_create_technology(
        &mut self,
        name: &str,
    ) -> Result<Upserted<Technology>, StoreError> {
        match self.find_technology(name).await? {
            Some(existing) => Ok(Upserted::Existing(existing)),
            None => Ok(Upserted::Created(self.create_technology(name).await?)),
        }
    }

    async fn create_mentor(&mut self, mentor: NewMentor) -> Result<Mentor, StoreError> {
        self.check_injected(EntityKind::Mentor)?;

        if self.working.account(mentor.account_id).is_none() {
            return Err(StoreError::NotFound {
                entity: EntityKind::Account,
                id: mentor.account_id,
            });
        }
        if let Some(specialization_id) = mentor.specialization_id {
            if !self
                .working
                .specializations
                .iter()
                .any(|s| s.id == specialization_id)
            {
                return Err(StoreError::NotFound {
                    entity: EntityKind::Specialization,
                    id: specialization_id,
                });
            }
        }
        if self
            .working
            .mentors
            .iter()
            .any(|m| m.account_id == mentor.account_id)
        {
            return Err(unique_violation(EntityKind::Mentor, "mentors_account_id_key"));
        }

        let mentor = Mentor {
            id: Uuid::new_v4(),
            account_id: mentor.account_id,
            specialization_id: mentor.specialization_id,
            experience_years: mentor.experience_years,
        };
        self.working.mentors.push(mentor.clone());
        Ok(mentor)
    }

    async fn create_student(&mut self, account_id: Uuid) -> Result<Student, StoreError> {
        self.check_injected(EntityKind::Student)?;

        if self.working.account(account_id).is_none() {
            return Err(StoreError::NotFound {
                entity: EntityKind::Account,
                id: account_id,
            });
        }
        if self
            .working
            .students
            .iter()
            .any(|s| s.account_id == account_id)
        {
            return Err(unique_violation(EntityKind::Student, "students_account_id_key"));
        }

        let student = Student {
            id: Uuid::new_v4(),
            account_id,
        };
        self.working.students.push(student.clone());
        Ok(student)
    }

    async fn create_course(&mut self, course: NewCourse) -> Result<Course, StoreError> {
        self.check_injected(EntityKind::Course)?;

        let course = Course {
            id: Uuid::new_v4(),
            title: course.title,
            description: course.description,
            is_active: course.is_active,
            created_at: OffsetDateTime::now_utc(),
        };
        self.working.courses.push(course.clone());
        Ok(course)
    }

    async fn create_module(&mut self, module: NewModule) -> Result<Module, StoreError> {
        self.check_injected(EntityKind::Module)?;

        if !self.working.courses.iter().any(|c| c.id == module.course_id) {
            return Err(StoreError::NotFound {
                entity: EntityKind::Course,
                id: module.course_id,
            });
        }
        if self
            .working
            .modules
            .iter()
            .any(|m| m.course_id == module.course_id && m.order_index == module.order_index)
        {
            return Err(unique_violation(
                EntityKind::Module,
                "modules_course_id_order_index_key",
            ));
        }

        let module = Module {
            id: Uuid::new_v4(),
            course_id: module.course_id,
            title: module.title,
            description: module.description,
            order_index: module.order_index,
            is_active: module.is_active,
        };
        self.working.modules.push(module.clone());
        Ok(module)
    }

    async fn create_lesson(&mut self, lesson: NewLesson) -> Result<Lesson, StoreError> {
        self.check_injected(EntityKind::Lesson)?;

        if !self.working.modules.iter().any(|m| m.id == lesson.module_id) {
            return Err(StoreError::NotFound {
                entity: EntityKind::Module,
                id: lesson.module_id,
            });
        }
        if self
            .working
            .lessons
            .iter()
            .any(|l| l.module_id == lesson.module_id && l.order_index == lesson.order_index)
        {
            return Err(unique_violation(
                EntityKind::Lesson,
                "lessons_module_id_order_index_key",
            ));
        }

        let lesson = Lesson {
            id: Uuid::new_v4(),
            module_id: lesson.module_id,
            title: lesson.title,
            content: lesson.content,
            order_index: lesson.order_index,
            is_active: lesson.is_active,
        };
        self.working.lessons.push(lesson.clone());
        Ok(lesson)
    }

    async fn set_technologies(
        &mut self,
        owner: TechnologyOwner,
        technology_ids: &[Uuid],
    ) -> Result<(), StoreError> {
        self.check_injected(owner.kind())?;

        let owner_exists = match owner {
            TechnologyOwner::Mentor(id) => self.working.mentors.iter().any(|m| m.id == id),
            TechnologyOwner::Course(id) => self.working.courses.iter().any(|c| c.id == id),
        };
        if !owner_exists {
            let entity = match owner {
                TechnologyOwner::Mentor(_) => EntityKind::Mentor,
                TechnologyOwner::Course(_) => EntityKind::Course,
            };
            return Err(StoreError::NotFound {
                entity,
                id: owner.id(),
            });
        }
        if let Some(missing) = technology_ids
            .iter()
            .find(|id| !self.working.has_technology(**id))
        {
            return Err(StoreError::NotFound {
                entity: EntityKind::Technology,
                id: *missing,
            });
        }

        let links = match owner {
            TechnologyOwner::Mentor(_) => &mut self.working.mentor_technologies,
            TechnologyOwner::Course(_) => &mut self.working.course_technologies,
        };
        links.retain(|(owner_id, _)| *owner_id != owner.id());
        for technology_id in technology_ids {
            if !links.contains(&(owner.id(), *technology_id)) {
                links.push((owner.id(), *technology_id));
            }
        }
        Ok(())
    }

    async fn commit(self) -> Result<(), StoreError> {
        *self.shared.lock().unwrap_or_else(PoisonError::into_inner) = self.working;
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy::models::Role;

    fn new_account(email: Option<&str>, phone: Option<&str>) -> NewAccount {
        NewAccount {
            email: email.map(str::to_string),
            phone: phone.map(str::to_string),
            first_name: "Иван".to_string(),
            last_name: "Иванов".to_string(),
            password_hash: "hash".to_string(),
            role: Role::Student,
            is_superuser: false,
        }
    }

    const WEB: SpecializationSeed = SpecializationSeed {
        code: "web",
        title: "Веб-разработка",
        description: "",
    };

    #[tokio::test]
    async fn test_commit_publishes_and_rollback_discards() {
        let backend = MemoryBackend::new();

        let mut tx = backend.begin().await.unwrap();
        tx.create_technology("Rust").await.unwrap();
        tx.rollback().await.unwrap();
        assert_eq!(backend.snapshot().technologies.len(), 0);

        let mut tx = backend.begin().await.unwrap();
        tx.create_technology("Rust").await.unwrap();
        assert_eq!(backend.snapshot().technologies.len(), 0);
        tx.commit().await.unwrap();
        assert_eq!(backend.snapshot().technologies.len(), 1);
    }

    #[tokio::test]
    async fn test_account_uniqueness() {
        let backend = MemoryBackend::new();
        let mut tx = backend.begin().await.unwrap();

        tx.create_account(new_account(Some("a@academy.com"), None))
            .await
            .unwrap();
        tx.create_account(new_account(None, Some("+7 (999) 000-00-01")))
            .await
            .unwrap();

        let err = tx
            .create_account(new_account(Some("a@academy.com"), None))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { ref constraint, .. } if constraint == "accounts_email_key"));

        let err = tx
            .create_account(new_account(None, Some("+7 (999) 000-00-01")))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { ref constraint, .. } if constraint == "accounts_phone_key"));

        assert!(tx.create_account(new_account(None, None)).await.is_err());
        assert!(tx.email_taken("a@academy.com").await.unwrap());
        assert!(!tx.email_taken("b@academy.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_specialization_upsert_keeps_existing_row() {
        let backend = MemoryBackend::new();
        let mut tx = backend.begin().await.unwrap();

        let first = tx.get_or_create_specialization(&WEB).await.unwrap();
        assert!(first.was_created());

        let renamed = SpecializationSeed {
            title: "Другое название",
            ..WEB
        };
        let second = tx.get_or_create_specialization(&renamed).await.unwrap();
        assert!(!second.was_created());
        assert_eq!(second.into_inner(), first.into_inner());
    }

    #[tokio::test]
    async fn test_delete_parent_with_children_fails() {
        let backend = MemoryBackend::new();
        let mut tx = backend.begin().await.unwrap();

        let course = tx
            .create_course(NewCourse {
                title: "Курс".to_string(),
                description: String::new(),
                is_active: true,
            })
            .await
            .unwrap();
        tx.create_module(NewModule {
            course_id: course.id,
            title: "Модуль".to_string(),
            description: String::new(),
            order_index: 1,
            is_active: true,
        })
        .await
        .unwrap();

        assert!(matches!(
            tx.delete_all(EntityKind::Course).await,
            Err(StoreError::ForeignKeyViolation { .. })
        ));
        assert_eq!(tx.delete_all(EntityKind::Module).await.unwrap(), 1);
        assert_eq!(tx.delete_all(EntityKind::Course).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_order_index_rejected() {
        let backend = MemoryBackend::new();
        let mut tx = backend.begin().await.unwrap();
        let course = tx
            .create_course(NewCourse {
                title: "Курс".to_string(),
                description: String::new(),
                is_active: true,
            })
            .await
            .unwrap();

        let module = |order_index| NewModule {
            course_id: course.id,
            title: "Модуль".to_string(),
            description: String::new(),
            order_index,
            is_active: true,
        };
        tx.create_module(module(1)).await.unwrap();
        assert!(tx.create_module(module(1)).await.is_err());
        tx.create_module(module(2)).await.unwrap();
    }

    #[tokio::test]
    async fn test_set_technologies_replaces_links() {
        let backend = MemoryBackend::new();
        let mut tx = backend.begin().await.unwrap();
        let rust = tx.create_technology("Rust").await.unwrap();
        let go = tx.create_technology("Go").await.unwrap();
        let course = tx
            .create_course(NewCourse {
                title: "Курс".to_string(),
                description: String::new(),
                is_active: true,
            })
            .await
            .unwrap();
        let owner = TechnologyOwner::Course(course.id);

        tx.set_technologies(owner, &[rust.id, go.id, rust.id])
            .await
            .unwrap();
        assert_eq!(tx.working.technologies_of(owner).len(), 2);

        tx.set_technologies(owner, &[go.id]).await.unwrap();
        assert_eq!(tx.working.technologies_of(owner), vec![go.id]);

        let missing = Uuid::new_v4();
        assert!(matches!(
            tx.set_technologies(owner, &[missing]).await,
            Err(StoreError::NotFound { entity: EntityKind::Technology, .. })
        ));
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let backend = MemoryBackend::new().failing_on(EntityKind::Lesson);
        let mut tx = backend.begin().await.unwrap();
        assert!(tx.create_technology("Rust").await.is_ok());
        assert!(matches!(
            tx.delete_all(EntityKind::Lesson).await,
            Err(StoreError::Injected(EntityKind::Lesson))
        ));
    }
}
