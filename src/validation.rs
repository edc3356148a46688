//! Field validation for candidate school records.
//!
//! Pure rule checking: no I/O, deterministic, and side-effect free. The
//! validator reports every failing field at once so the caller can surface
//! per-field messages.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use anyhow::{anyhow, Result};
use regex::Regex;

use crate::models::NewSchool;

/// Mapping from field name to error message; empty means the record is valid.
pub type ValidationErrors = BTreeMap<String, String>;

// Patterns match the registration form exactly: a 10-digit contact number
// and a local@domain.tld email, case-insensitive. Both literals are known
// good, so the panic paths are unreachable.
#[allow(clippy::unwrap_used)]
static CONTACT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());
#[allow(clippy::unwrap_used)]
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").unwrap());

/// Validation rules for candidate school records
#[derive(Debug, Copy, Clone)]
pub struct SchoolValidator;

impl SchoolValidator {
    /// Check a candidate record against all field rules.
    ///
    /// Returns an entry for every field that fails; an empty map means the
    /// record may be persisted.
    #[must_use]
    pub fn validate(candidate: &NewSchool) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        let required = [
            ("name", &candidate.name, "School name is required"),
            ("address", &candidate.address, "Address is required"),
            ("city", &candidate.city, "City is required"),
            ("state", &candidate.state, "State is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.insert(field.to_string(), message.to_string());
            }
        }

        if let Err(e) = Self::validate_contact(&candidate.contact) {
            errors.insert("contact".to_string(), e.to_string());
        }

        if let Err(e) = Self::validate_email(&candidate.email_id) {
            errors.insert("email_id".to_string(), e.to_string());
        }

        errors
    }

    /// Validate the contact number: required, exactly 10 digits.
    pub fn validate_contact(contact: &str) -> Result<()> {
        if contact.trim().is_empty() {
            return Err(anyhow!("Contact number is required"));
        }

        if !CONTACT_RE.is_match(contact) {
            return Err(anyhow!("Contact must be 10 digits"));
        }

        Ok(())
    }

    /// Validate the email address: required, `local@domain.tld` shape.
    pub fn validate_email(email: &str) -> Result<()> {
        if email.trim().is_empty() {
            return Err(anyhow!("Email is required"));
        }

        if email.len() > 254 {
            return Err(anyhow!("Email too long (max 254 characters)"));
        }

        if !EMAIL_RE.is_match(email) {
            return Err(anyhow!("Invalid email format"));
        }

        Ok(())
    }
}
