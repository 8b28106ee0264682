//! Metrics and observability utilities
//!
//! Provides Prometheus metrics with SLO-aligned histograms
//! and standardized naming conventions.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};

/// Metrics prefix for all PaperLens metrics
pub const METRICS_PREFIX: &str = "paperlens";

/// SLO-aligned histogram buckets for query latency (in seconds)
/// Targets: P50 < 5ms, P99 < 50ms (the corpus is small and in memory)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001,  // 1ms
    0.005,  // 5ms - P50 target
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms - P99 target
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
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

    // Query metrics
    describe_counter!(
        format!("{}_queries_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of corpus queries"
    );

    describe_histogram!(
        format!("{}_query_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Corpus query latency in seconds"
    );

    describe_gauge!(
        format!("{}_query_results_count", METRICS_PREFIX),
        Unit::Count,
        "Number of records matched by the last query"
    );

    // Corpus metrics
    describe_gauge!(
        format!("{}_corpus_records", METRICS_PREFIX),
        Unit::Count,
        "Number of records in the loaded corpus"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record query metrics
pub fn record_query(duration_secs: f64, sort: &str, result_count: usize) {
    counter!(
        format!("{}_queries_total", METRICS_PREFIX),
        "sort" => sort.to_string()
    )
    .increment(1);

    histogram!(
        format!("{}_query_duration_seconds", METRICS_PREFIX),
        "sort" => sort.to_string()
    )
    .record(duration_secs);

    gauge!(
        format!("{}_query_results_count", METRICS_PREFIX),
        "sort" => sort.to_string()
    )
    .set(result_count as f64);
}

/// Record the corpus size once after load
pub fn record_corpus_size(records: usize) {
    gauge!(format!("{}_corpus_records", METRICS_PREFIX)).set(records as f64);
}
