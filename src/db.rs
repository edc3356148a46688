//! Database operations and connection pooling.
//!
//! One table of append-only school records. `insert_school` performs exactly
//! one row insertion and returns the generated id; `list_schools` returns the
//! summary projection ordered newest first.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use r2d2::Pool;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::Result;
use crate::models::{NewSchool, School, SchoolSummary};
use crate::schema::schools;

/// r2d2 connection manager for a file-backed SQLite database
#[derive(Debug, Clone)]
pub struct SqliteConnectionManager {
    path: PathBuf,
}

impl SqliteConnectionManager {
    /// Manage connections to the database file at `path`.
    #[must_use]
    pub fn file<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl r2d2::ManageConnection for SqliteConnectionManager {
    type Connection = Connection;
    type Error = rusqlite::Error;

    fn connect(&self) -> std::result::Result<Connection, rusqlite::Error> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    fn is_valid(&self, conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
        conn.query_row("SELECT 1", [], |_| Ok(()))
    }

    fn has_broken(&self, _conn: &mut Connection) -> bool {
        false
    }
}

/// Type alias for the database connection pool
pub type DbPool = Pool<SqliteConnectionManager>;
/// Type alias for a pooled connection
pub type DbConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Database manager for handling connections and operations
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Create a new database connection pool and bootstrap the schema.
    pub fn new(database_path: &str) -> Result<Self> {
        Self::with_max_connections(database_path, 10)
    }

    /// Like [`new`](Self::new) with an explicit pool size.
    pub fn with_max_connections(database_path: &str, max_connections: u32) -> Result<Self> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(database_path);
        let pool = Pool::builder().max_size(max_connections).build(manager)?;

        let conn = pool.get()?;
        Self::run_migrations(&conn)?;

        Ok(Self { pool })
    }

    /// Run database migrations
    fn run_migrations(conn: &Connection) -> Result<()> {
        conn.execute_batch(include_str!(
            "../migrations/2026-01-10-000000_create_schools/up.sql"
        ))?;
        Ok(())
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> Result<DbConnection> {
        Ok(self.pool.get()?)
    }

    /// Insert a validated school record and return the generated id.
    ///
    /// The caller is responsible for validation; the `created_at` timestamp
    /// is assigned here, never by the client.
    pub fn insert_school(&self, new_school: &NewSchool) -> Result<i64> {
        let conn = self.get_connection()?;
        let created_at = Utc::now().naive_utc();

        conn.execute(
            &format!(
                "INSERT INTO {} ({}, {}, {}, {}, {}, {}, {}, {}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                schools::TABLE,
                schools::NAME,
                schools::ADDRESS,
                schools::CITY,
                schools::STATE,
                schools::CONTACT,
                schools::EMAIL_ID,
                schools::IMAGE,
                schools::CREATED_AT,
            ),
            params![
                new_school.name,
                new_school.address,
                new_school.city,
                new_school.state,
                new_school.contact,
                new_school.email_id,
                new_school.image_or_empty(),
                created_at,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List the summary projection of all schools, most recent first.
    ///
    /// Ties on `created_at` fall back to `id` so the order is total and
    /// repeated calls without intervening inserts return identical results.
    pub fn list_schools(&self) -> Result<Vec<SchoolSummary>> {
        let conn = self.get_connection()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {}, {}, {}, {}, {} FROM {} ORDER BY {} DESC, {} DESC",
            schools::ID,
            schools::NAME,
            schools::ADDRESS,
            schools::CITY,
            schools::IMAGE,
            schools::TABLE,
            schools::CREATED_AT,
            schools::ID,
        ))?;

        let summary_iter = stmt.query_map([], |row| {
            Ok(SchoolSummary {
                id: row.get(schools::ID)?,
                name: row.get(schools::NAME)?,
                address: row.get(schools::ADDRESS)?,
                city: row.get(schools::CITY)?,
                image: row.get(schools::IMAGE)?,
            })
        })?;

        let mut results = Vec::new();
        for summary in summary_iter {
            results.push(summary?);
        }

        Ok(results)
    }

    /// Get a full school record by id
    pub fn get_school(&self, id: i64) -> Result<Option<School>> {
        let conn = self.get_connection()?;

        let school = conn
            .query_row(
                &format!(
                    "SELECT * FROM {} WHERE {} = ?",
                    schools::TABLE,
                    schools::ID
                ),
                params![id],
                Self::map_school,
            )
            .optional()?;

        Ok(school)
    }

    /// Map a database row to a School
    fn map_school(row: &Row) -> rusqlite::Result<School> {
        Ok(School {
            id: row.get(schools::ID)?,
            name: row.get(schools::NAME)?,
            address: row.get(schools::ADDRESS)?,
            city: row.get(schools::CITY)?,
            state: row.get(schools::STATE)?,
            contact: row.get(schools::CONTACT)?,
            email_id: row.get(schools::EMAIL_ID)?,
            image: row.get(schools::IMAGE)?,
            created_at: row.get(schools::CREATED_AT)?,
        })
    }
}
