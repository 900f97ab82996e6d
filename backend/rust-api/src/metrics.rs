use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_histogram_vec, register_int_counter, register_int_counter_vec,
    register_int_gauge, Encoder, Histogram, HistogramVec, IntCounter, IntCounterVec, IntGauge,
    TextEncoder,
};

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();

    // Upstream LLM Metrics
    pub static ref UPSTREAM_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "upstream_requests_total",
        "Total number of chat-completion calls by outcome",
        &["outcome"]
    )
    .unwrap();

    pub static ref UPSTREAM_REQUEST_DURATION_SECONDS: Histogram = register_histogram!(
        "upstream_request_duration_seconds",
        "Chat-completion round trip in seconds",
        vec![0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 60.0]
    )
    .unwrap();

    // Business Metrics
    pub static ref RIDDLE_FETCHES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "riddle_fetches_total",
        "Total number of riddle fetches by result",
        &["result"]
    )
    .unwrap();

    // Cache Metrics
    pub static ref RIDDLE_CACHE_ENTRIES: IntGauge = register_int_gauge!(
        "riddle_cache_entries",
        "Number of entries currently held in the riddle cache"
    )
    .unwrap();

    pub static ref RIDDLE_CACHE_EVICTIONS_TOTAL: IntCounter = register_int_counter!(
        "riddle_cache_evictions_total",
        "Total number of stale riddle cache entries evicted"
    )
    .unwrap();

    pub static ref CACHE_SWEEPER_TICKS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "cache_sweeper_ticks_total",
        "Total number of cache sweeper ticks",
        &["status"]
    )
    .unwrap();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}

/// Helper: time an upstream call and count its outcome label
pub async fn track_upstream_call<F, T, E>(
    future: F,
    outcome: impl Fn(&Result<T, E>) -> &'static str,
) -> Result<T, E>
where
    F: std::future::Future<Output = Result<T, E>>,
{
    let timer = UPSTREAM_REQUEST_DURATION_SECONDS.start_timer();
    let result = future.await;
    timer.observe_duration();

    UPSTREAM_REQUESTS_TOTAL
        .with_label_values(&[outcome(&result)])
        .inc();

    result
}
