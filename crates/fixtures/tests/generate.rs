//! End-to-end generation runs against the in-memory backend.
//!
//! Run with: `cargo test -p fixtures --test generate`

use std::collections::{HashMap, HashSet};

use academy::models::{NewAccount, Role};
use fixtures::catalog::FixtureCatalog;
use fixtures::db::{FixtureBackend, FixtureStore, MemoryState, StoreError, TechnologyOwner};
use fixtures::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn scenario_config() -> GenerationConfig {
    GenerationConfig {
        course_count: 3,
        modules_per_course: 2,
        lessons_per_module: 2,
        ..Default::default()
    }
}

async fn run(
    backend: &MemoryBackend,
    config: GenerationConfig,
    seed: u64,
) -> Result<GenerationReport, GenerationError> {
    let mut rng = StdRng::seed_from_u64(seed);
    FixtureGenerator::new(config).generate(backend, &mut rng).await
}

fn role_count(state: &MemoryState, role: Role) -> usize {
    state.accounts.iter().filter(|a| a.role == role).count()
}

async fn insert_account(backend: &MemoryBackend, email: Option<&str>, phone: Option<&str>) {
    let mut tx = backend.begin().await.unwrap();
    tx.create_account(NewAccount {
        email: email.map(str::to_string),
        phone: phone.map(str::to_string),
        first_name: "Existing".to_string(),
        last_name: "Account".to_string(),
        password_hash: "hash".to_string(),
        role: Role::Student,
        is_superuser: false,
    })
    .await
    .unwrap();
    tx.commit().await.unwrap();
}

#[tokio::test]
async fn test_small_scenario_counts() {
    let backend = MemoryBackend::new();
    let report = run(&backend, scenario_config(), 42).await.unwrap();

    let state = backend.snapshot();
    assert_eq!(state.courses.len(), 3);
    assert_eq!(state.modules.len(), 6);
    assert_eq!(state.lessons.len(), 12);
    assert_eq!(state.mentors.len(), 5);
    assert_eq!(state.students.len(), 10);
    assert_eq!(role_count(&state, Role::Admin), 1);
    assert_eq!(state.specializations.len(), 6);
    assert_eq!(state.technologies.len(), 51 + report.technologies_backfilled);
    assert_eq!(state.accounts.len(), 16);

    assert_eq!(report.courses, 3);
    assert_eq!(report.modules, 6);
    assert_eq!(report.lessons, 12);
}

#[tokio::test]
async fn test_every_account_reachable_and_unique() {
    let backend = MemoryBackend::new();
    run(&backend, GenerationConfig::default(), 7).await.unwrap();

    let state = backend.snapshot();
    let mut emails = HashSet::new();
    let mut phones = HashSet::new();
    for account in &state.accounts {
        assert!(account.email.is_some() || account.phone.is_some());
        if let Some(email) = &account.email {
            assert!(emails.insert(email.clone()), "duplicate email {email}");
        }
        if let Some(phone) = &account.phone {
            assert!(phones.insert(phone.clone()), "duplicate phone {phone}");
        }
    }
}

#[tokio::test]
async fn test_seeded_emails_follow_role_and_position() {
    let backend = MemoryBackend::new();
    run(&backend, scenario_config(), 3).await.unwrap();

    let state = backend.snapshot();
    for mentor in &state.mentors {
        let account = state.account(mentor.account_id).unwrap();
        assert_eq!(account.role, Role::Mentor);
        if let Some(email) = &account.email {
            assert!(email.starts_with("mentor") && email.ends_with("@academy.com"));
        }
    }
    for student in &state.students {
        let account = state.account(student.account_id).unwrap();
        assert_eq!(account.role, Role::Student);
        assert!(!account.is_superuser);
    }
}

#[tokio::test]
async fn test_order_indices_are_contiguous() {
    let backend = MemoryBackend::new();
    let config = GenerationConfig {
        course_count: 4,
        modules_per_course: 10,
        lessons_per_module: 22,
        ..Default::default()
    };
    run(&backend, config, 11).await.unwrap();

    let state = backend.snapshot();
    for course in &state.courses {
        let mut modules: Vec<_> = state
            .modules
            .iter()
            .filter(|m| m.course_id == course.id)
            .collect();
        modules.sort_by_key(|m| m.order_index);
        let indices: Vec<i32> = modules.iter().map(|m| m.order_index).collect();
        assert_eq!(indices, (1..=10).collect::<Vec<_>>());

        for module in modules {
            let mut indices: Vec<i32> = state
                .lessons
                .iter()
                .filter(|l| l.module_id == module.id)
                .map(|l| l.order_index)
                .collect();
            indices.sort_unstable();
            assert_eq!(indices, (1..=22).collect::<Vec<_>>());
        }
    }
}

#[tokio::test]
async fn test_course_technologies_sampled_from_pool() {
    let backend = MemoryBackend::new();
    run(&backend, scenario_config(), 5).await.unwrap();

    let state = backend.snapshot();
    let known: HashSet<_> = state.technologies.iter().map(|t| t.id).collect();
    for course in &state.courses {
        let ids = state.technologies_of(TechnologyOwner::Course(course.id));
        assert!((2..=5).contains(&ids.len()), "course has {} technologies", ids.len());
        assert!(ids.iter().all(|id| known.contains(id)));
    }
}

#[tokio::test]
async fn test_second_run_without_clear_aborts_on_admin() {
    let backend = MemoryBackend::new();
    run(&backend, scenario_config(), 1).await.unwrap();
    let before = backend.snapshot();

    let err = run(&backend, scenario_config(), 2).await.unwrap_err();
    assert!(matches!(
        err,
        GenerationError::DuplicateIdentity { field: "email", .. }
    ));

    let after = backend.snapshot();
    assert_eq!(after.accounts, before.accounts);
    assert_eq!(after.courses.len(), before.courses.len());
    assert_eq!(after.specializations, before.specializations);
    assert_eq!(after.technologies, before.technologies);
}

#[tokio::test]
async fn test_admin_phone_collision_aborts() {
    let backend = MemoryBackend::new();
    insert_account(&backend, None, Some("+7 (999) 111-22-33")).await;

    let err = run(&backend, scenario_config(), 2).await.unwrap_err();
    assert!(matches!(
        err,
        GenerationError::DuplicateIdentity { field: "phone", .. }
    ));
    assert_eq!(backend.snapshot().accounts.len(), 1);
}

#[tokio::test]
async fn test_clear_first_rerun_yields_exact_counts() {
    let backend = MemoryBackend::new();
    run(&backend, scenario_config(), 1).await.unwrap();

    let config = GenerationConfig {
        clear_first: true,
        ..scenario_config()
    };
    let report = run(&backend, config, 2).await.unwrap();
    assert!(report.cleared_rows.unwrap() > 0);
    assert_eq!(report.specializations_created, 6);
    assert_eq!(report.specializations_existing, 0);

    let state = backend.snapshot();
    assert_eq!(state.mentors.len(), 5);
    assert_eq!(state.students.len(), 10);
    assert_eq!(state.courses.len(), 3);
    assert_eq!(role_count(&state, Role::Admin), 1);

    let codes: HashSet<_> = state.specializations.iter().map(|s| &s.code).collect();
    assert_eq!(codes.len(), state.specializations.len());
    let names: HashSet<_> = state.technologies.iter().map(|t| &t.name).collect();
    assert_eq!(names.len(), state.technologies.len());
}

#[tokio::test]
async fn test_catalog_upsert_is_idempotent() {
    let backend = MemoryBackend::new();
    let catalog = FixtureCatalog::default();

    for _ in 0..2 {
        let mut tx = backend.begin().await.unwrap();
        for seed in catalog.specializations {
            tx.get_or_create_specialization(seed).await.unwrap();
        }
        for name in catalog.technologies {
            tx.get_or_create_technology(name).await.unwrap();
        }
        tx.commit().await.unwrap();
    }
    let once_then_twice = backend.snapshot();

    assert_eq!(once_then_twice.specializations.len(), 6);
    assert_eq!(once_then_twice.technologies.len(), 51);

    // The generator reports the existing rows and leaves them untouched.
    let config = GenerationConfig {
        mentor_count: 0,
        student_count: 0,
        course_count: 0,
        ..Default::default()
    };
    let report = run(&backend, config, 9).await.unwrap();
    assert_eq!(report.specializations_created, 0);
    assert_eq!(report.specializations_existing, 6);
    assert_eq!(report.technologies_created, 0);
    assert_eq!(report.technologies_existing, 51);

    let state = backend.snapshot();
    assert_eq!(state.specializations, once_then_twice.specializations);
    assert_eq!(state.technologies, once_then_twice.technologies);
}

#[tokio::test]
async fn test_zero_modules_and_lessons() {
    let backend = MemoryBackend::new();
    let config = GenerationConfig {
        course_count: 3,
        modules_per_course: 0,
        ..Default::default()
    };
    let report = run(&backend, config, 4).await.unwrap();
    assert_eq!(report.courses, 3);
    assert_eq!(report.modules, 0);
    assert_eq!(report.lessons, 0);

    let backend = MemoryBackend::new();
    let config = GenerationConfig {
        course_count: 3,
        modules_per_course: 2,
        lessons_per_module: 0,
        ..Default::default()
    };
    run(&backend, config, 4).await.unwrap();
    let state = backend.snapshot();
    assert_eq!(state.modules.len(), 6);
    assert!(state.lessons.is_empty());
}

#[tokio::test]
async fn test_course_count_capped_by_titles() {
    let backend = MemoryBackend::new();
    let config = GenerationConfig {
        course_count: 40,
        modules_per_course: 1,
        lessons_per_module: 1,
        ..Default::default()
    };
    let report = run(&backend, config, 6).await.unwrap();
    assert_eq!(report.courses, 15);

    let titles: HashSet<_> = backend
        .snapshot()
        .courses
        .iter()
        .map(|c| c.title.clone())
        .collect();
    assert_eq!(titles.len(), 15);
}

#[tokio::test]
async fn test_failure_rolls_back_everything() {
    let backend = MemoryBackend::new();
    let failing = backend.clone().failing_on(EntityKind::Lesson);

    let err = run(&failing, scenario_config(), 8).await.unwrap_err();
    assert!(matches!(
        err,
        GenerationError::Store(StoreError::Injected(EntityKind::Lesson))
    ));

    let state = backend.snapshot();
    for kind in EntityKind::CLEAR_ORDER {
        assert_eq!(state.count(kind), 0, "{kind} was not rolled back");
    }
}

#[tokio::test]
async fn test_failed_clear_keeps_previous_data() {
    let backend = MemoryBackend::new();
    run(&backend, scenario_config(), 1).await.unwrap();
    let before = backend.snapshot();

    let failing = backend.clone().failing_on(EntityKind::Course);
    let config = GenerationConfig {
        clear_first: true,
        ..scenario_config()
    };
    assert!(run(&failing, config, 2).await.is_err());

    let after = backend.snapshot();
    assert_eq!(after.accounts, before.accounts);
    assert_eq!(after.lessons.len(), before.lessons.len());
}

#[tokio::test]
async fn test_too_many_mentors_fails_before_writing() {
    let backend = MemoryBackend::new();
    let config = GenerationConfig {
        mentor_count: 11,
        ..scenario_config()
    };

    let err = run(&backend, config, 1).await.unwrap_err();
    assert!(matches!(
        err,
        GenerationError::InsufficientFixtureData {
            pool: "mentor_names",
            available: 10,
            requested: 11,
        }
    ));
    assert!(backend.snapshot().accounts.is_empty());
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let backend = MemoryBackend::new();
    let config = GenerationConfig {
        mentor_specialization_rate: -0.5,
        ..scenario_config()
    };
    assert!(matches!(
        run(&backend, config, 1).await,
        Err(GenerationError::InvalidConfig(_))
    ));
}

/// Pre-populates every seeded mentor and student email so each account that draws
/// an email hits a collision.
async fn occupy_seeded_emails(backend: &MemoryBackend) {
    for role in ["mentor", "student"] {
        for n in 1..=10 {
            let email = format!("{role}{n}@academy.com");
            insert_account(backend, Some(&email), None).await;
        }
    }
}

#[tokio::test]
async fn test_email_collision_skips_account() {
    let backend = MemoryBackend::new();
    occupy_seeded_emails(&backend).await;

    let report = run(&backend, scenario_config(), 21).await.unwrap();
    assert!(report.skipped_accounts > 0);
    assert_eq!(report.mentors + report.students + report.skipped_accounts, 15);

    let state = backend.snapshot();
    assert_eq!(state.mentors.len(), report.mentors);
    assert_eq!(state.students.len(), report.students);
    // Accounts created despite the occupied emails only drew a phone.
    for mentor in &state.mentors {
        assert!(state.account(mentor.account_id).unwrap().email.is_none());
    }
}

#[tokio::test]
async fn test_email_collision_phone_only_policy() {
    let backend = MemoryBackend::new();
    occupy_seeded_emails(&backend).await;

    let config = GenerationConfig {
        email_collision: EmailCollision::PhoneOnly,
        ..scenario_config()
    };
    let report = run(&backend, config, 21).await.unwrap();
    assert_eq!(report.skipped_accounts, 0);
    assert_eq!(report.mentors, 5);
    assert_eq!(report.students, 10);

    let state = backend.snapshot();
    let mut by_role: HashMap<Role, usize> = HashMap::new();
    for account in state.accounts.iter().filter(|a| a.first_name != "Existing") {
        *by_role.entry(account.role).or_default() += 1;
        if account.role != Role::Admin {
            assert!(account.email.is_none());
            assert!(account.phone.is_some());
        }
    }
    assert_eq!(by_role[&Role::Mentor], 5);
    assert_eq!(by_role[&Role::Student], 10);
}

#[tokio::test]
async fn test_same_seed_same_content() {
    let first = MemoryBackend::new();
    let second = MemoryBackend::new();
    run(&first, scenario_config(), 99).await.unwrap();
    run(&second, scenario_config(), 99).await.unwrap();

    let phones = |state: MemoryState| -> Vec<Option<String>> {
        state.accounts.into_iter().map(|a| a.phone).collect()
    };
    assert_eq!(phones(first.snapshot()), phones(second.snapshot()));

    let flags = |state: MemoryState| -> Vec<bool> {
        state.lessons.into_iter().map(|l| l.is_active).collect()
    };
    assert_eq!(flags(first.snapshot()), flags(second.snapshot()));
}
