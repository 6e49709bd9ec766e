//! Prometheus metrics for the social-graph service.
//!
//! All metrics follow the naming convention: `sg_<area>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., relations_created_total)
//! - **Histogram**: Distribution of values (e.g., request_duration_seconds)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, Histogram, HistogramOpts, HistogramVec, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // GRAPH METRICS
    // =========================================================================

    /// Relations created, by kind
    pub static ref RELATIONS_CREATED: CounterVec = CounterVec::new(
        Opts::new("sg_graph_relations_created_total", "Relations created"),
        &["relation"]  // relation: user/friendship/subscription/block
    ).expect("metric creation failed");

    /// Recipients resolved per message
    pub static ref RECIPIENT_FANOUT: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "sg_graph_recipient_fanout",
            "Number of recipients resolved for one message"
        )
        .buckets(exponential_buckets(1.0, 2.0, 12).expect("valid buckets"))
    ).expect("metric creation failed");

    // =========================================================================
    // API METRICS
    // =========================================================================

    /// Request outcomes: `ok` or an error kind code
    pub static ref REQUEST_OUTCOMES: CounterVec = CounterVec::new(
        Opts::new("sg_api_requests_total", "API requests by operation and outcome"),
        &["operation", "outcome"]
    ).expect("metric creation failed");

    /// Request latency per operation
    pub static ref REQUEST_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "sg_api_request_duration_seconds",
            "Time spent handling an API request"
        )
        .buckets(exponential_buckets(0.0005, 2.0, 14).expect("valid buckets")),
        &["operation"]
    ).expect("metric creation failed");
}

/// Handle to the registered metrics
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register every collector with the global registry.
///
/// Safe to call more than once; collectors already present are left alone.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Graph
        Box::new(RELATIONS_CREATED.clone()),
        Box::new(RECIPIENT_FANOUT.clone()),
        // API
        Box::new(REQUEST_OUTCOMES.clone()),
        Box::new(REQUEST_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Count one finished request.
pub fn record_outcome(operation: &str, outcome: &str) {
    REQUEST_OUTCOMES
        .with_label_values(&[operation, outcome])
        .inc();
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }

    /// Start a timer for one operation's latency series.
    pub fn for_operation(operation: &str) -> Self {
        Self::new(&REQUEST_DURATION.with_label_values(&[operation]))
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}
