//! School Directory - Registration and Browsing Service
//!
//! A Rust library for registering schools and browsing the directory,
//! backed by a single SQLite table.
//!
//! # Features
//!
//! - Field validation for candidate records
//! - Append-only persistence with a generated id per record
//! - Listing projection with case-insensitive search
//! - Image upload with a local file store
//! - HTTP API and CLI front ends

/// Configuration management
pub mod config;
/// Database operations and connection pooling
pub mod db;
/// Error types
pub mod error;
/// HTTP API
pub mod http;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Repository pattern for data access
pub mod repository;
/// Database schema definitions
pub mod schema;
/// Search over the listing projection
pub mod search;
/// Submission orchestration and state machine
pub mod service;
/// Image upload storage
pub mod upload;
/// Input validation
pub mod validation;

// Re-export key components for easier access
pub use db::Database;
pub use error::{DirectoryError, Result};
pub use models::{NewSchool, School, SchoolSummary};
pub use repository::{SchoolRepository, SqliteSchoolRepo};
pub use service::{SchoolService, SubmissionFlow, SubmissionState};
pub use validation::SchoolValidator;
