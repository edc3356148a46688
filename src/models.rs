//! Data models for school records and their listing projection.
//!
//! This module contains all data structures used throughout the application:
//! the persisted record, the candidate record as submitted, and the reduced
//! projection returned for the directory listing.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A persisted school record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct School {
    /// Database primary key, assigned exactly once at creation
    pub id: i64,
    /// School name
    pub name: String,
    /// Street address
    pub address: String,
    /// City
    pub city: String,
    /// State
    pub state: String,
    /// 10-digit contact number
    pub contact: String,
    /// Contact email address
    pub email_id: String,
    /// Path to the stored image, empty when none was uploaded
    pub image: String,
    /// Timestamp assigned by the server at creation; drives listing order
    pub created_at: NaiveDateTime,
}

/// A candidate school record as submitted, before validation
///
/// All fields arrive as strings from the form; `image` is an optional
/// reference resolved by the upload step, never raw file bytes. Missing
/// fields deserialize to empty strings so the validator reports them
/// field by field instead of the decoder rejecting the payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewSchool {
    /// School name
    pub name: String,
    /// Street address
    pub address: String,
    /// City
    pub city: String,
    /// State
    pub state: String,
    /// 10-digit contact number
    pub contact: String,
    /// Contact email address
    pub email_id: String,
    /// Path to an already-uploaded image, if any
    #[serde(default)]
    pub image: Option<String>,
}

impl NewSchool {
    /// The image reference to persist; absent means empty string.
    #[must_use]
    pub fn image_or_empty(&self) -> &str {
        self.image.as_deref().unwrap_or("")
    }
}

/// The reduced field set returned by the listing for display purposes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolSummary {
    /// Database primary key
    pub id: i64,
    /// School name
    pub name: String,
    /// Street address
    pub address: String,
    /// City
    pub city: String,
    /// Path to the stored image, empty when none was uploaded
    pub image: String,
}

impl From<&School> for SchoolSummary {
    fn from(school: &School) -> Self {
        Self {
            id: school.id,
            name: school.name.clone(),
            address: school.address.clone(),
            city: school.city.clone(),
            image: school.image.clone(),
        }
    }
}
