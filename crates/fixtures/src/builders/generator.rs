//! Orchestrates one generation run over a [`FixtureBackend`].

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use academy::auth::hash_password;
use academy::models::{Account, Role, Specialization, Technology};

use crate::catalog::{FixtureCatalog, PersonName};
use crate::config::{EmailCollision, GenerationConfig};
use crate::db::{
    EntityKind, FixtureBackend, FixtureStore, NewCourse, NewLesson, NewMentor, NewModule,
    TechnologyOwner,
};
use crate::error::GenerationError;
use crate::generators::account::{ADMIN_EMAIL, ADMIN_NAME, ADMIN_PHONE};
use crate::generators::{
    ContactChannels, CourseGenerator, GeneratedCourse, account_draft, experience_years,
    generate_phone, mentor_technologies, pick_specialization, seeded_email,
};

/// Counts of what a committed run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Rows removed by the clear phase, `None` when it did not run.
    pub cleared_rows: Option<u64>,
    pub admins: usize,
    pub specializations_created: usize,
    pub specializations_existing: usize,
    pub technologies_created: usize,
    pub technologies_existing: usize,
    /// Relevant technologies created while assigning mentor stacks.
    pub technologies_backfilled: usize,
    pub mentors: usize,
    pub students: usize,
    /// Accounts skipped because their email was already taken.
    pub skipped_accounts: usize,
    pub courses: usize,
    pub modules: usize,
    pub lessons: usize,
}

impl GenerationReport {
    pub fn specializations(&self) -> usize {
        self.specializations_created + self.specializations_existing
    }

    pub fn technologies(&self) -> usize {
        self.technologies_created + self.technologies_existing + self.technologies_backfilled
    }
}

/// Seeds the whole platform inside a single transaction.
///
/// # Example
///
/// ```rust,ignore
/// let generator = FixtureGenerator::new(GenerationConfig {
///     course_count: 3,
///     modules_per_course: 2,
///     lessons_per_module: 2,
///     ..Default::default()
/// });
/// let report = generator.generate(&PgBackend::new(pool), &mut rng).await?;
/// ```
#[derive(Debug, Clone)]
pub struct FixtureGenerator {
    config: GenerationConfig,
    catalog: FixtureCatalog,
}

impl FixtureGenerator {
    /// Creates a generator over the built-in catalog.
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            catalog: FixtureCatalog::default(),
        }
    }

    pub fn with_catalog(mut self, catalog: FixtureCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Runs every phase in one transaction and commits it.
    ///
    /// Configuration and catalog problems are reported before the transaction opens.
    /// Any later failure rolls back every write of the run.
    pub async fn generate<B: FixtureBackend>(
        &self,
        backend: &B,
        rng: &mut (impl Rng + Send),
    ) -> Result<GenerationReport, GenerationError> {
        self.config.validate()?;
        self.catalog.validate(&self.config)?;

        let mut tx = backend.begin().await?;
        let mut report = GenerationReport::default();

        match self.populate(&mut tx, rng, &mut report).await {
            Ok(()) => {
                tx.commit().await?;
                info!(
                    mentors = report.mentors,
                    students = report.students,
                    courses = report.courses,
                    "Generation committed"
                );
                Ok(report)
            }
            Err(err) => {
                warn!(error = %err, "Generation failed, rolling back");
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }

    async fn populate<S: FixtureStore>(
        &self,
        tx: &mut S,
        rng: &mut (impl Rng + Send),
        report: &mut GenerationReport,
    ) -> Result<(), GenerationError> {
        if self.config.clear_first {
            report.cleared_rows = Some(clear(tx).await?);
        }

        let password_hash = hash_password(&self.config.password)?;

        let admin = self.bootstrap_admin(tx, &password_hash).await?;
        report.admins = 1;
        info!("Created admin {}", admin.display_name());

        let specializations = self.upsert_specializations(tx, report).await?;
        let mut pool = self.upsert_technologies(tx, report).await?;

        self.seed_mentors(tx, &specializations, &mut pool, &password_hash, rng, report)
            .await?;
        self.seed_students(tx, &password_hash, rng, report).await?;

        let requested = self.config.course_count;
        let count = self.catalog.course_count(requested);
        if count < requested {
            warn!(
                "Requested {} courses, catalog has {} titles; creating {}",
                requested,
                self.catalog.course_titles.len(),
                count
            );
        }
        let courses = CourseGenerator::new(&self.catalog).generate_batch(
            requested,
            self.config.modules_per_course,
            self.config.lessons_per_module,
            &pool,
            rng,
        );
        self.seed_courses(tx, &courses, report).await?;

        Ok(())
    }

    async fn bootstrap_admin<S: FixtureStore>(
        &self,
        tx: &mut S,
        password_hash: &str,
    ) -> Result<Account, GenerationError> {
        if tx.email_taken(ADMIN_EMAIL).await? {
            return Err(GenerationError::DuplicateIdentity {
                field: "email",
                value: ADMIN_EMAIL.to_string(),
            });
        }
        if tx.phone_taken(ADMIN_PHONE).await? {
            return Err(GenerationError::DuplicateIdentity {
                field: "phone",
                value: ADMIN_PHONE.to_string(),
            });
        }

        let draft = account_draft(
            ADMIN_NAME,
            Role::Admin,
            Some(ADMIN_EMAIL.to_string()),
            Some(ADMIN_PHONE.to_string()),
            password_hash,
        );
        Ok(tx.create_account(draft).await?)
    }

    async fn upsert_specializations<S: FixtureStore>(
        &self,
        tx: &mut S,
        report: &mut GenerationReport,
    ) -> Result<Vec<Specialization>, GenerationError> {
        info!("Upserting {} specializations...", self.catalog.specializations.len());

        let mut specializations = Vec::with_capacity(self.catalog.specializations.len());
        for seed in self.catalog.specializations {
            let upserted = tx.get_or_create_specialization(seed).await?;
            if upserted.was_created() {
                report.specializations_created += 1;
            } else {
                report.specializations_existing += 1;
            }
            specializations.push(upserted.into_inner());
        }

        info!(
            "Specializations: {} created, {} existing",
            report.specializations_created, report.specializations_existing
        );
        Ok(specializations)
    }

    async fn upsert_technologies<S: FixtureStore>(
        &self,
        tx: &mut S,
        report: &mut GenerationReport,
    ) -> Result<Vec<Technology>, GenerationError> {
        info!("Upserting {} technologies...", self.catalog.technologies.len());

        let mut pool = Vec::with_capacity(self.catalog.technologies.len());
        for name in self.catalog.technologies {
            let upserted = tx.get_or_create_technology(name).await?;
            if upserted.was_created() {
                report.technologies_created += 1;
            } else {
                report.technologies_existing += 1;
            }
            pool.push(upserted.into_inner());
        }

        info!(
            "Technologies: {} created, {} existing",
            report.technologies_created, report.technologies_existing
        );
        Ok(pool)
    }

    /// Resolves the technologies relevant to a specialization, creating any that
    /// are missing and adding them to `pool`.
    async fn relevant_technologies<S: FixtureStore>(
        &self,
        tx: &mut S,
        code: &str,
        pool: &mut Vec<Technology>,
        report: &mut GenerationReport,
    ) -> Result<Vec<Technology>, GenerationError> {
        let names = self.catalog.relevant_technologies(code);
        let mut relevant = Vec::with_capacity(names.len());

        for name in names {
            if let Some(technology) = pool.iter().find(|t| t.name == *name) {
                relevant.push(technology.clone());
                continue;
            }

            let technology = match tx.find_technology(name).await? {
                Some(existing) => existing,
                None => {
                    report.technologies_backfilled += 1;
                    debug!(technology = name, specialization = code, "Backfilled technology");
                    tx.create_technology(name).await?
                }
            };
            pool.push(technology.clone());
            relevant.push(technology);
        }

        Ok(relevant)
    }

    async fn seed_mentors<S: FixtureStore>(
        &self,
        tx: &mut S,
        specializations: &[Specialization],
        pool: &mut Vec<Technology>,
        password_hash: &str,
        rng: &mut (impl Rng + Send),
        report: &mut GenerationReport,
    ) -> Result<(), GenerationError> {
        info!("Seeding {} mentors...", self.config.mentor_count);

        for number in 1..=self.config.mentor_count {
            let Some(account) = self
                .seed_account(tx, Role::Mentor, number, password_hash, rng, report)
                .await?
            else {
                continue;
            };

            let specialization =
                pick_specialization(specializations, self.config.mentor_specialization_rate, rng);
            let relevant = match specialization {
                Some(spec) => {
                    self.relevant_technologies(tx, &spec.code, pool, report)
                        .await?
                }
                None => Vec::new(),
            };
            let technologies = mentor_technologies(&relevant, pool.as_slice(), rng);

            let mentor = tx
                .create_mentor(NewMentor {
                    account_id: account.id,
                    specialization_id: specialization.map(|s| s.id),
                    experience_years: experience_years(rng),
                })
                .await?;

            let technology_ids: Vec<Uuid> = technologies.iter().map(|t| t.id).collect();
            tx.set_technologies(TechnologyOwner::Mentor(mentor.id), &technology_ids)
                .await?;

            debug!(
                mentor = %account.display_name(),
                specialization = specialization.map(|s| s.code.as_str()).unwrap_or("-"),
                technologies = technology_ids.len(),
                "Created mentor"
            );
            report.mentors += 1;
        }

        info!("Seeded {} mentors", report.mentors);
        Ok(())
    }

    async fn seed_students<S: FixtureStore>(
        &self,
        tx: &mut S,
        password_hash: &str,
        rng: &mut (impl Rng + Send),
        report: &mut GenerationReport,
    ) -> Result<(), GenerationError> {
        info!("Seeding {} students...", self.config.student_count);

        for number in 1..=self.config.student_count {
            let Some(account) = self
                .seed_account(tx, Role::Student, number, password_hash, rng, report)
                .await?
            else {
                continue;
            };

            tx.create_student(account.id).await?;
            debug!(student = %account.display_name(), "Created student");
            report.students += 1;
        }

        info!("Seeded {} students", report.students);
        Ok(())
    }

    /// Creates the account of the `number`-th (1-based) mentor or student.
    ///
    /// Returns `None` when the seeded email is taken and the collision policy is
    /// [`EmailCollision::Skip`].
    async fn seed_account<S: FixtureStore>(
        &self,
        tx: &mut S,
        role: Role,
        number: usize,
        password_hash: &str,
        rng: &mut (impl Rng + Send),
        report: &mut GenerationReport,
    ) -> Result<Option<Account>, GenerationError> {
        let name = self.person_name(role, number)?;
        let channels = ContactChannels::pick(rng);
        let mut email = channels.has_email().then(|| seeded_email(role, number));
        let mut wants_phone = channels.has_phone();

        if let Some(address) = email.clone() {
            if tx.email_taken(&address).await? {
                match self.config.email_collision {
                    EmailCollision::Skip => {
                        warn!("Skipping {} {}: email {} already taken", role.as_str(), number, address);
                        report.skipped_accounts += 1;
                        return Ok(None);
                    }
                    EmailCollision::PhoneOnly => {
                        warn!(
                            "Email {} already taken, creating {} {} with phone only",
                            address,
                            role.as_str(),
                            number
                        );
                        email = None;
                        wants_phone = true;
                    }
                }
            }
        }

        let phone = if wants_phone {
            Some(self.unique_phone(tx, rng).await?)
        } else {
            None
        };

        let draft = account_draft(name, role, email, phone, password_hash);
        Ok(Some(tx.create_account(draft).await?))
    }

    /// Name of the `number`-th (1-based) account of `role`.
    fn person_name(&self, role: Role, number: usize) -> Result<PersonName, GenerationError> {
        let (pool, names) = match role {
            Role::Mentor => ("mentor_names", self.catalog.mentor_names),
            Role::Student => ("student_names", self.catalog.student_names),
            Role::Admin => return Ok(ADMIN_NAME),
        };
        names
            .get(number - 1)
            .copied()
            .ok_or(GenerationError::InsufficientFixtureData {
                pool,
                available: names.len(),
                requested: number,
            })
    }

    /// Draws phone numbers until one is unused, up to `max_phone_attempts` draws.
    async fn unique_phone<S: FixtureStore>(
        &self,
        tx: &mut S,
        rng: &mut (impl Rng + Send),
    ) -> Result<String, GenerationError> {
        for _ in 0..self.config.max_phone_attempts {
            let phone = generate_phone(rng);
            if !tx.phone_taken(&phone).await? {
                return Ok(phone);
            }
            debug!(phone = %phone, "Phone already taken, regenerating");
        }

        Err(GenerationError::GenerationExhausted {
            what: "phone",
            attempts: self.config.max_phone_attempts,
        })
    }

    async fn seed_courses<S: FixtureStore>(
        &self,
        tx: &mut S,
        courses: &[GeneratedCourse],
        report: &mut GenerationReport,
    ) -> Result<(), GenerationError> {
        info!("Seeding {} courses...", courses.len());

        for generated in courses {
            let course = tx
                .create_course(NewCourse {
                    title: generated.title.clone(),
                    description: generated.description.clone(),
                    is_active: generated.is_active,
                })
                .await?;
            tx.set_technologies(TechnologyOwner::Course(course.id), &generated.technology_ids)
                .await?;
            report.courses += 1;

            for generated_module in &generated.modules {
                let module = tx
                    .create_module(NewModule {
                        course_id: course.id,
                        title: generated_module.title.clone(),
                        description: generated_module.description.clone(),
                        order_index: generated_module.order_index,
                        is_active: generated_module.is_active,
                    })
                    .await?;
                report.modules += 1;

                for lesson in &generated_module.lessons {
                    tx.create_lesson(NewLesson {
                        module_id: module.id,
                        title: lesson.title.clone(),
                        content: lesson.content.clone(),
                        order_index: lesson.order_index,
                        is_active: lesson.is_active,
                    })
                    .await?;
                    report.lessons += 1;
                }
            }

            debug!(
                course = %course.title,
                modules = generated.modules.len(),
                "Created course"
            );
        }

        info!(
            "Seeded {} courses, {} modules, {} lessons",
            report.courses, report.modules, report.lessons
        );
        Ok(())
    }
}

/// Empties every seeded table, children first. Returns the total rows removed.
async fn clear<S: FixtureStore>(tx: &mut S) -> Result<u64, GenerationError> {
    info!("Clearing existing data...");

    let mut removed = 0;
    for kind in EntityKind::CLEAR_ORDER {
        let rows = tx.delete_all(kind).await?;
        debug!(table = %kind, rows, "Cleared table");
        removed += rows;
    }

    info!("Cleared {} rows", removed);
    Ok(removed)
}
