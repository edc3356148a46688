//! Integration tests for the persistence gateway against a temporary
//! SQLite database.

use std::sync::Arc;

use school_directory::db::Database;
use school_directory::models::NewSchool;
use school_directory::repository::{SchoolRepository, SqliteSchoolRepo};
use tempfile::TempDir;

fn temp_repo() -> (TempDir, Arc<SqliteSchoolRepo>) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("schools.db");
    let database = Database::new(path.to_str().expect("utf-8 path")).expect("open database");
    (dir, Arc::new(SqliteSchoolRepo::new(database)))
}

fn school(name: &str, city: &str) -> NewSchool {
    NewSchool {
        name: name.to_string(),
        address: "1 Main Street".to_string(),
        city: city.to_string(),
        state: "Test State".to_string(),
        contact: "9876543210".to_string(),
        email_id: "office@example.com".to_string(),
        image: None,
    }
}

#[tokio::test]
async fn test_create_returns_generated_id() {
    let (_dir, repo) = temp_repo();
    let id = repo.create(school("First", "Pune")).await.expect("create");
    assert!(id > 0);
}

#[tokio::test]
async fn test_ids_are_unique_and_increasing() {
    let (_dir, repo) = temp_repo();
    let first = repo.create(school("First", "Pune")).await.expect("create");
    let second = repo.create(school("Second", "Pune")).await.expect("create");
    assert_ne!(first, second);
    assert!(second > first);
}

#[tokio::test]
async fn test_list_empty_database() {
    let (_dir, repo) = temp_repo();
    let schools = repo.list().await.expect("list");
    assert!(schools.is_empty());
}

#[tokio::test]
async fn test_created_record_appears_first_in_listing() {
    let (_dir, repo) = temp_repo();
    repo.create(school("Older", "Delhi")).await.expect("create");
    let newest = repo.create(school("Newest", "Mumbai")).await.expect("create");

    let schools = repo.list().await.expect("list");
    assert_eq!(schools.len(), 2);
    assert_eq!(schools[0].id, newest);
    assert_eq!(schools[0].name, "Newest");
    assert_eq!(schools[1].name, "Older");
}

#[tokio::test]
async fn test_list_is_idempotent() {
    let (_dir, repo) = temp_repo();
    repo.create(school("A", "Delhi")).await.expect("create");
    repo.create(school("B", "Mumbai")).await.expect("create");
    repo.create(school("C", "Chennai")).await.expect("create");

    let first = repo.list().await.expect("list");
    let second = repo.list().await.expect("list");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_listing_carries_the_summary_projection() {
    let (_dir, repo) = temp_repo();
    let mut record = school("Projected", "Kolkata");
    record.image = Some("/uploads/abc.png".to_string());
    let id = repo.create(record).await.expect("create");

    let schools = repo.list().await.expect("list");
    let summary = &schools[0];
    assert_eq!(summary.id, id);
    assert_eq!(summary.name, "Projected");
    assert_eq!(summary.address, "1 Main Street");
    assert_eq!(summary.city, "Kolkata");
    assert_eq!(summary.image, "/uploads/abc.png");
}

#[tokio::test]
async fn test_missing_image_persists_as_empty_string() {
    let (_dir, repo) = temp_repo();
    repo.create(school("No Image", "Jaipur")).await.expect("create");

    let schools = repo.list().await.expect("list");
    assert_eq!(schools[0].image, "");
}

#[tokio::test]
async fn test_get_returns_the_full_record() {
    let (_dir, repo) = temp_repo();
    let id = repo.create(school("Full Record", "Surat")).await.expect("create");

    let fetched = repo.get(id).expect("get").expect("record exists");
    assert_eq!(fetched.id, id);
    assert_eq!(fetched.name, "Full Record");
    assert_eq!(fetched.state, "Test State");
    assert_eq!(fetched.contact, "9876543210");
    assert_eq!(fetched.email_id, "office@example.com");
}

#[tokio::test]
async fn test_get_missing_record_is_none() {
    let (_dir, repo) = temp_repo();
    assert!(repo.get(4242).expect("get").is_none());
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("schools.db");

    {
        let database = Database::new(path.to_str().expect("utf-8 path")).expect("open");
        let repo = SqliteSchoolRepo::new(database);
        repo.create(school("Persistent", "Nagpur")).await.expect("create");
    }

    let database = Database::new(path.to_str().expect("utf-8 path")).expect("reopen");
    let repo = SqliteSchoolRepo::new(database);
    let schools = repo.list().await.expect("list");
    assert_eq!(schools.len(), 1);
    assert_eq!(schools[0].name, "Persistent");
}
