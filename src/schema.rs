//! Database schema definitions
//!
//! This module provides constants for table and column names used with rusqlite.

/// Schools table schema
pub mod schools {
    /// Table name
    pub const TABLE: &str = "schools";
    /// Primary key column
    pub const ID: &str = "id";
    /// School name column
    pub const NAME: &str = "name";
    /// Street address column
    pub const ADDRESS: &str = "address";
    /// City column
    pub const CITY: &str = "city";
    /// State column
    pub const STATE: &str = "state";
    /// Contact number column
    pub const CONTACT: &str = "contact";
    /// Email address column
    pub const EMAIL_ID: &str = "email_id";
    /// Stored image path column
    pub const IMAGE: &str = "image";
    /// Creation timestamp column
    pub const CREATED_AT: &str = "created_at";
}
