//! Metrics collection.
//!
//! Thin wrapper over the `metrics` facade with the metric names used across
//! the service. Recording is a no-op until a recorder is installed.

use std::time::Duration;

use metrics::{counter, histogram};

/// Metric names and record helpers
#[derive(Debug, Clone, Copy)]
pub struct MetricsCollector {
    db_operations_total: &'static str,
    db_operation_duration: &'static str,
    submissions_total: &'static str,
    validation_failures_total: &'static str,
    uploads_total: &'static str,
    upload_size_bytes: &'static str,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self {
            db_operations_total: "school_directory_db_operations_total",
            db_operation_duration: "school_directory_db_operation_duration_seconds",
            submissions_total: "school_directory_submissions_total",
            validation_failures_total: "school_directory_validation_failures_total",
            uploads_total: "school_directory_uploads_total",
            upload_size_bytes: "school_directory_upload_size_bytes",
        }
    }
}

impl MetricsCollector {
    /// Record one database operation with its outcome and duration.
    pub fn record_db_operation(&self, operation: &str, duration: Duration, success: bool) {
        let status = if success { "success" } else { "error" };
        counter!(
            self.db_operations_total,
            "operation" => operation.to_string(),
            "status" => status
        )
        .increment(1);
        histogram!(
            self.db_operation_duration,
            "operation" => operation.to_string()
        )
        .record(duration.as_secs_f64());
    }

    /// Record a completed submission attempt.
    pub fn record_submission(&self, success: bool) {
        let status = if success { "success" } else { "error" };
        counter!(self.submissions_total, "status" => status).increment(1);
    }

    /// Record a submission rejected by the validator.
    pub fn record_validation_failure(&self, field_count: usize) {
        counter!(self.validation_failures_total).increment(field_count as u64);
    }

    /// Record a stored upload.
    pub fn record_upload(&self, size_bytes: usize) {
        counter!(self.uploads_total).increment(1);
        histogram!(self.upload_size_bytes).record(size_bytes as f64);
    }
}
