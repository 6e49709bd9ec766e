//! # Social-Graph Telemetry
//!
//! Structured logging and Prometheus metrics shared by every crate in the
//! workspace.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sg_telemetry::{TelemetryConfig, init_telemetry};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(&config).expect("Failed to init telemetry");
//!
//!     // Logs and metrics are now being collected
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SG_SERVICE_NAME` | `social-graph` | Service name in logs |
//! | `SG_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `SG_JSON_LOGS` | `false` | JSON log lines |
//! | `SG_ENABLE_METRICS` | `true` | Register Prometheus collectors |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, record_outcome, register_metrics, HistogramTimer, MetricsHandle,
    RECIPIENT_FANOUT, RELATIONS_CREATED, REQUEST_DURATION, REQUEST_OUTCOMES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and, if enabled, metrics.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Initialize metrics first
    let metrics = if config.enable_metrics {
        Some(register_metrics()?)
    } else {
        None
    };

    init_logging(config)?;

    Ok(TelemetryGuard { _metrics: metrics })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _metrics: Option<MetricsHandle>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

/// Time a block of work against an operation's latency histogram.
///
/// The observation happens when the returned guard drops.
#[macro_export]
macro_rules! time_operation {
    ($operation:expr) => {
        $crate::metrics::HistogramTimer::for_operation($operation)
    };
}
