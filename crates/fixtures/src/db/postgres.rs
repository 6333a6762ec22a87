//! PostgreSQL persistence over a single transaction.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use academy::models::{
    Account, Course, Lesson, Mentor, Module, NewAccount, Specialization, Student, Technology,
};

use super::store::{
    EntityKind, FixtureBackend, FixtureStore, NewCourse, NewLesson, NewMentor, NewModule,
    StoreError, TechnologyOwner, Upserted,
};
use crate::catalog::SpecializationSeed;

/// Maps constraint violations onto [`StoreError`]; everything else passes through.
fn map_write_error(entity: EntityKind, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        let constraint = db.constraint().unwrap_or("unknown").to_string();
        if db.is_unique_violation() {
            return StoreError::UniqueViolation { entity, constraint };
        }
        if db.is_foreign_key_violation() {
            return StoreError::ForeignKeyViolation { entity, constraint };
        }
        if db.is_check_violation() {
            return StoreError::CheckViolation { entity, constraint };
        }
    }
    StoreError::Database(err)
}

/// Backend handing out transactions on a connection pool.
#[derive(Clone)]
pub struct PgBackend {
    pool: PgPool,
}

impl PgBackend {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the pool for advanced usage.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl FixtureBackend for PgBackend {
    type Tx = PgFixtureStore;

    async fn begin(&self) -> Result<Self::Tx, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(PgFixtureStore { tx })
    }
}

pub struct PgFixtureStore {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl FixtureStore for PgFixtureStore {
    async fn delete_all(&mut self, kind: EntityKind) -> Result<u64, StoreError> {
        let result = sqlx::query(&format!("DELETE FROM {}", kind.table()))
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_write_error(kind, e))?;

        debug!("Deleted {} rows from {}", result.rows_affected(), kind);
        Ok(result.rows_affected())
    }

    async fn email_taken(&mut self, email: &str) -> Result<bool, StoreError> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(taken)
    }

    async fn phone_taken(&mut self, phone: &str) -> Result<bool, StoreError> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE phone = $1)",
        )
        .bind(phone)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(taken)
    }

    async fn create_account(&mut self, account: NewAccount) -> Result<Account, StoreError> {
        let account = account.into_account();

        sqlx::query(
            r#"
            INSERT INTO accounts (
                id, email, phone, first_name, last_name,
                password_hash, role, is_superuser, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.phone)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.password_hash)
        .bind(account.role)
        .bind(account.is_superuser)
        .bind(account.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_write_error(EntityKind::Account, e))?;

        Ok(account)
    }

    async fn get_or_create_specialization(
        &mut self,
        seed: &SpecializationSeed,
    ) -> Result<Upserted<Specialization>, StoreError> {
        let inserted: Option<Specialization> = sqlx::query_as(
            r#"
            INSERT INTO specializations (id, code, title, description, is_active)
            VALUES ($1, $2, $3, $4, TRUE)
            ON CONFLICT (code) DO NOTHING
            RETURNING id, code, title, description, is_active
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(seed.code)
        .bind(seed.title)
        .bind(seed.description)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_write_error(EntityKind::Specialization, e))?;

        if let Some(specialization) = inserted {
            return Ok(Upserted::Created(specialization));
        }

        let existing: Specialization = sqlx::query_as(
            "SELECT id, code, title, description, is_active FROM specializations WHERE code = $1",
        )
        .bind(seed.code)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(Upserted::Existing(existing))
    }

    async fn find_technology(&mut self, name: &str) -> Result<Option<Technology>, StoreError> {
        let technology = sqlx::query_as("SELECT id, name FROM technologies WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *self.tx)
            .await?;

        Ok(technology)
    }

    async fn create_technology(&mut self, name: &str) -> Result<Technology, StoreError> {
        let technology = sqlx::query_as(
            "INSERT INTO technologies (id, name) VALUES ($1, $2) RETURNING id, name",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| map_write_error(EntityKind::Technology, e))?;

        Ok(technology)
    }

    async fn get_or_create_technology(
        &mut self,
        name: &str,
    ) -> Result<Upserted<Technology>, StoreError> {
        let inserted: Option<Technology> = sqlx::query_as(
            r#"
            INSERT INTO technologies (id, name)
            VALUES ($1, $2)
            ON CONFLICT (name) DO NOTHING
            RETURNING id, name
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_write_error(EntityKind::Technology, e))?;

        match inserted {
            Some(technology) => Ok(Upserted::Created(technology)),
            None => {
                let existing = self
                    .find_technology(name)
                    .await?
                    .ok_or(StoreError::NotFound {
                        entity: EntityKind::Technology,
                        id: Uuid::nil(),
                    })?;
                Ok(Upserted::Existing(existing))
            }
        }
    }

    async fn create_mentor(&mut self, mentor: NewMentor) -> Result<Mentor, StoreError> {
        let mentor = sqlx::query_as(
            r#"
            INSERT INTO mentors (id, account_id, specialization_id, experience_years)
            VALUES ($1, $2, $3, $4)
            RETURNING id, account_id, specialization_id, experience_years
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(mentor.account_id)
        .bind(mentor.specialization_id)
        .bind(mentor.experience_years)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| map_write_error(EntityKind::Mentor, e))?;

        Ok(mentor)
    }

    async fn create_student(&mut self, account_id: Uuid) -> Result<Student, StoreError> {
        let student = sqlx::query_as(
            "INSERT INTO students (id, account_id) VALUES ($1, $2) RETURNING id, account_id",
        )
        .bind(Uuid::new_v4())
        .bind(account_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| map_write_error(EntityKind::Student, e))?;

        Ok(student)
    }

    async fn create_course(&mut self, course: NewCourse) -> Result<Course, StoreError> {
        let course = sqlx::query_as(
            r#"
            INSERT INTO courses (id, title, description, is_active, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id, title, description, is_active, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.is_active)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| map_write_error(EntityKind::Course, e))?;

        Ok(course)
    }

    async fn create_module(&mut self, module: NewModule) -> Result<Module, StoreError> {
        let module = sqlx::query_as(
            r#"
            INSERT INTO modules (id, course_id, title, description, order_index, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, course_id, title, description, order_index, is_active
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(module.course_id)
        .bind(&module.title)
        .bind(&module.description)
        .bind(module.order_index)
        .bind(module.is_active)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| map_write_error(EntityKind::Module, e))?;

        Ok(module)
    }

    async fn create_lesson(&mut self, lesson: NewLesson) -> Result<Lesson, StoreError> {
        let lesson = sqlx::query_as(
            r#"
            INSERT INTO lessons (id, module_id, title, content, order_index, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, module_id, title, content, order_index, is_active
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(lesson.module_id)
        .bind(&lesson.title)
        .bind(&lesson.content)
        .bind(lesson.order_index)
        .bind(lesson.is_active)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| map_write_error(EntityKind::Lesson, e))?;

        Ok(lesson)
    }

    async fn set_technologies(
        &mut self,
        owner: TechnologyOwner,
        technology_ids: &[Uuid],
    ) -> Result<(), StoreError> {
        let kind = owner.kind();
        let owner_column = match owner {
            TechnologyOwner::Mentor(_) => "mentor_id",
            TechnologyOwner::Course(_) => "course_id",
        };

        sqlx::query(&format!(
            "DELETE FROM {} WHERE {} = $1",
            kind.table(),
            owner_column
        ))
        .bind(owner.id())
        .execute(&mut *self.tx)
        .await?;

        let insert = format!(
            "INSERT INTO {} ({}, technology_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            kind.table(),
            owner_column
        );
        for technology_id in technology_ids {
            sqlx::query(&insert)
                .bind(owner.id())
                .bind(*technology_id)
                .execute(&mut *self.tx)
                .await
                .map_err(|e| map_write_error(kind, e))?;
        }

        Ok(())
    }

    async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
