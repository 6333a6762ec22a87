//! Core types for the academy learning platform.
//!
//! Accounts (admins, mentors, students), the specialization and technology
//! catalogs, and the course → module → lesson content tree.

pub mod auth;
pub mod database;
pub mod errors;
pub mod models;

pub use errors::AppError;
pub use models::{
    Account, Course, Lesson, Mentor, Module, NewAccount, Role, Specialization, Student,
    Technology,
};
