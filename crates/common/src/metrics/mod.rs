//! Metrics and observability utilities
//!
//! Prometheus-style counters and histograms with a shared naming prefix.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all Admission Guide metrics
pub const METRICS_PREFIX: &str = "admission";

/// Histogram buckets for request latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001,  // 1ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.500,  // 2.5s
    5.000,  // 5s
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Record lifecycle metrics
    describe_counter!(
        format!("{}_users_created_total", METRICS_PREFIX),
        Unit::Count,
        "Total user accounts created"
    );

    describe_counter!(
        format!("{}_users_updated_total", METRICS_PREFIX),
        Unit::Count,
        "Total user accounts updated"
    );

    describe_counter!(
        format!("{}_users_deleted_total", METRICS_PREFIX),
        Unit::Count,
        "Total user accounts deleted"
    );

    describe_counter!(
        format!("{}_notes_created_total", METRICS_PREFIX),
        Unit::Count,
        "Total notes uploaded"
    );

    // Database metrics
    describe_counter!(
        format!("{}_db_errors_total", METRICS_PREFIX),
        Unit::Count,
        "Total failed database operations"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Record a change to the users collection (`created`, `updated`, `deleted`)
pub fn record_user_change(change: &str) {
    counter!(format!("{}_users_{}_total", METRICS_PREFIX, change)).increment(1);
}

pub fn record_note_created() {
    counter!(format!("{}_notes_created_total", METRICS_PREFIX)).increment(1);
}

/// Record a failed database operation
pub fn record_db_error(operation: &'static str) {
    counter!(
        format!("{}_db_errors_total", METRICS_PREFIX),
        "operation" => operation
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_buckets_sorted() {
        let mut prev = 0.0;
        for &bucket in LATENCY_BUCKETS {
            assert!(bucket > prev);
            prev = bucket;
        }
    }

    #[test]
    fn test_recorders_without_exporter() {
        // No recorder installed: every call is a no-op
        let metrics = RequestMetrics::start("GET", "/api/users");
        metrics.finish(200);
        record_user_change("created");
        record_note_created();
        record_db_error("list_users");
    }
}
