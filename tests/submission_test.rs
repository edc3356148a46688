//! Tests for the submission flow state machine, using a mocked persistence
//! gateway and a temporary image store.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use tempfile::TempDir;

use school_directory::error::{DirectoryError, Result};
use school_directory::models::{NewSchool, SchoolSummary};
use school_directory::repository::SchoolRepository;
use school_directory::service::{
    ImageUpload, SchoolService, SubmissionFailure, SubmissionFlow, SubmissionState,
};
use school_directory::upload::ImageStore;

mock! {
    Repo {}

    #[async_trait]
    impl SchoolRepository for Repo {
        async fn create(&self, school: NewSchool) -> Result<i64>;
        async fn list(&self) -> Result<Vec<SchoolSummary>>;
    }
}

fn temp_store() -> (TempDir, Arc<ImageStore>) {
    let dir = TempDir::new().expect("create temp dir");
    let store = ImageStore::new(
        dir.path().join("uploads"),
        1,
        vec!["image/jpeg".to_string(), "image/png".to_string()],
    )
    .expect("create image store");
    (dir, Arc::new(store))
}

fn valid_form() -> NewSchool {
    NewSchool {
        name: "Greenwood International School".to_string(),
        address: "12 Hill Road".to_string(),
        city: "Mumbai".to_string(),
        state: "Maharashtra".to_string(),
        contact: "9876543210".to_string(),
        email_id: "office@greenwood.edu".to_string(),
        image: None,
    }
}

fn flow_with(repo: MockRepo) -> (TempDir, SubmissionFlow) {
    let (dir, store) = temp_store();
    let service = SchoolService::new(Arc::new(repo), store);
    (dir, SubmissionFlow::new(service))
}

#[test]
fn test_flow_starts_idle() {
    let (_dir, flow) = flow_with(MockRepo::new());
    assert_eq!(*flow.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn test_successful_submission_reaches_success() {
    let mut repo = MockRepo::new();
    repo.expect_create().times(1).returning(|_| Ok(7));

    let (_dir, mut flow) = flow_with(repo);
    let state = flow.submit(valid_form(), None).await;
    assert_eq!(*state, SubmissionState::Success { id: 7 });
}

#[tokio::test]
async fn test_validation_failure_skips_persistence() {
    let mut repo = MockRepo::new();
    repo.expect_create().times(0);

    let mut form = valid_form();
    form.contact = "98765".to_string();

    let (_dir, mut flow) = flow_with(repo);
    let state = flow.submit(form, None).await;
    match state {
        SubmissionState::Failed(SubmissionFailure::Validation(errors)) => {
            assert!(errors.contains_key("contact"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_image_reference_attached_before_persistence() {
    let mut repo = MockRepo::new();
    repo.expect_create()
        .withf(|school: &NewSchool| {
            school
                .image
                .as_deref()
                .is_some_and(|path| path.starts_with("/uploads/") && path.ends_with(".png"))
        })
        .times(1)
        .returning(|_| Ok(1));

    let (_dir, mut flow) = flow_with(repo);
    let image = ImageUpload {
        content_type: "image/png".to_string(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    };
    let state = flow.submit(valid_form(), Some(image)).await;
    assert!(matches!(state, SubmissionState::Success { .. }));
}

#[tokio::test]
async fn test_upload_failure_skips_persistence() {
    let mut repo = MockRepo::new();
    repo.expect_create().times(0);

    let (_dir, mut flow) = flow_with(repo);
    let image = ImageUpload {
        content_type: "text/plain".to_string(),
        bytes: b"not an image".to_vec(),
    };
    let state = flow.submit(valid_form(), Some(image)).await;
    assert!(matches!(
        state,
        SubmissionState::Failed(SubmissionFailure::Upload(_))
    ));
}

#[tokio::test]
async fn test_oversized_upload_rejected() {
    let mut repo = MockRepo::new();
    repo.expect_create().times(0);

    let (_dir, mut flow) = flow_with(repo);
    // Store cap is 1 MB.
    let image = ImageUpload {
        content_type: "image/png".to_string(),
        bytes: vec![0; 2 * 1024 * 1024],
    };
    let state = flow.submit(valid_form(), Some(image)).await;
    assert!(matches!(
        state,
        SubmissionState::Failed(SubmissionFailure::Upload(_))
    ));
}

#[tokio::test]
async fn test_persistence_error_surfaces_generic_notice() {
    let mut repo = MockRepo::new();
    repo.expect_create().times(1).returning(|_| {
        Err(DirectoryError::Database(
            rusqlite::Error::InvalidQuery,
        ))
    });

    let (_dir, mut flow) = flow_with(repo);
    let state = flow.submit(valid_form(), None).await;
    match state {
        SubmissionState::Failed(SubmissionFailure::Persistence(notice)) => {
            assert_eq!(notice, "Failed to add school. Please try again.");
        }
        other => panic!("expected persistence failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_reset_returns_to_idle() {
    let mut repo = MockRepo::new();
    repo.expect_create().times(1).returning(|_| Ok(3));

    let (_dir, mut flow) = flow_with(repo);
    flow.submit(valid_form(), None).await;
    assert!(matches!(flow.state(), SubmissionState::Success { .. }));

    flow.reset();
    assert_eq!(*flow.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn test_one_attempt_per_submission() {
    // One explicit submission drives exactly one create call, even after a
    // failure: no retry logic anywhere in the flow.
    let mut repo = MockRepo::new();
    repo.expect_create()
        .times(1)
        .returning(|_| Err(DirectoryError::Database(rusqlite::Error::InvalidQuery)));

    let (_dir, mut flow) = flow_with(repo);
    let state = flow.submit(valid_form(), None).await;
    assert!(matches!(state, SubmissionState::Failed(_)));
}

#[tokio::test]
async fn test_service_list_applies_search() {
    let mut repo = MockRepo::new();
    repo.expect_list().returning(|| {
        Ok(vec![
            SchoolSummary {
                id: 2,
                name: "Sunrise Academy".to_string(),
                address: "8 Lake View".to_string(),
                city: "Delhi".to_string(),
                image: String::new(),
            },
            SchoolSummary {
                id: 1,
                name: "Greenwood International School".to_string(),
                address: "12 Hill Road".to_string(),
                city: "Mumbai".to_string(),
                image: String::new(),
            },
        ])
    });

    let (_dir, store) = temp_store();
    let service = SchoolService::new(Arc::new(repo), store);

    let all = service.list(None).await.expect("list");
    assert_eq!(all.len(), 2);

    let filtered = service.list(Some("mumbai")).await.expect("list");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Greenwood International School");
}
