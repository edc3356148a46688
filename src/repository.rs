//! Repository pattern for data access.
//!
//! The persistence gateway: `create` inserts one validated record and returns
//! the generated id, `list` fetches the ordered summary projection. Any
//! non-success result means the write must be treated as failed; no retries
//! happen at this layer.

use async_trait::async_trait;
use tracing::debug;

use crate::db::Database;
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::{NewSchool, School, SchoolSummary};

/// Persistence gateway for school records
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    /// Insert a validated record; returns the new id.
    async fn create(&self, school: NewSchool) -> Result<i64>;

    /// Fetch the summary projection of all records, most recent first.
    async fn list(&self) -> Result<Vec<SchoolSummary>>;
}

/// SQLite-backed repository
pub struct SqliteSchoolRepo {
    database: Database,
    metrics: MetricsCollector,
}

impl SqliteSchoolRepo {
    /// Wrap an initialized database.
    #[must_use]
    pub fn new(database: Database) -> Self {
        Self {
            database,
            metrics: MetricsCollector::default(),
        }
    }

    /// Fetch a full record by id (used by the CLI and tests).
    pub fn get(&self, id: i64) -> Result<Option<School>> {
        self.database.get_school(id)
    }
}

#[async_trait]
impl SchoolRepository for SqliteSchoolRepo {
    async fn create(&self, school: NewSchool) -> Result<i64> {
        let start = std::time::Instant::now();
        let result = self.database.insert_school(&school);
        self.metrics
            .record_db_operation("insert_school", start.elapsed(), result.is_ok());

        let id = result?;
        debug!(id, name = %school.name, "inserted school record");
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<SchoolSummary>> {
        let start = std::time::Instant::now();
        let result = self.database.list_schools();
        self.metrics
            .record_db_operation("list_schools", start.elapsed(), result.is_ok());

        let schools = result?;
        debug!(count = schools.len(), "listed school records");
        Ok(schools)
    }
}
