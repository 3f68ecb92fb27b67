//! Metrics for the record pipeline
//!
//! Pipeline activity is reported through the `metrics` facade. The binary
//! installs a Prometheus recorder with [`init_metrics`] and renders it
//! in-process; without a recorder the calls are no-ops. The in-process
//! [`RequestMetrics`] collector is independent of the facade.

pub mod collector;
pub mod timing;

pub use collector::RequestMetrics;
pub use timing::StageTimer;

use std::sync::{Once, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{debug, info, warn};

static INIT: Once = Once::new();
static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder and describe every pipeline metric.
///
/// Idempotent. No HTTP listener is started; read the metrics back with
/// [`render_metrics`] or the returned handle. Returns `None` when another
/// recorder was already installed.
pub fn init_metrics() -> Option<&'static PrometheusHandle> {
    INIT.call_once(|| match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if HANDLE.set(handle).is_err() {
                warn!("Prometheus handle was already stored");
            }
            PipelineMetrics::describe();
            info!("Prometheus recorder installed for in-process rendering");
        }
        Err(e) => warn!("Failed to install Prometheus recorder: {}", e),
    });
    HANDLE.get()
}

/// Prometheus text exposition of everything recorded so far
pub fn render_metrics() -> Option<String> {
    HANDLE.get().map(PrometheusHandle::render)
}

/// Builds metric names following `rp_{stage}_{metric_name}[_total]`
macro_rules! stage_metric {
    (counter, $stage:literal, $name:literal) => {
        concat!("rp_", $stage, "_", $name, "_total")
    };
    (histogram, $stage:literal, $name:literal) => {
        concat!("rp_", $stage, "_", $name)
    };
}

/// Documentation for a single metric
#[derive(Debug, Clone)]
pub struct MetricDoc {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub help: &'static str,
    pub labels: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetricType {
    Counter,
    Histogram,
}

/// Metrics emitted by [`crate::pipeline::Pipeline`]
pub struct PipelineMetrics;

impl PipelineMetrics {
    pub const BATCH_DURATION: &'static str =
        stage_metric!(histogram, "pipeline", "batch_duration_seconds");

    /// Record the outcome of one batch run
    pub fn record_batch(accepted: usize, rejected: usize) {
        ::metrics::counter!(stage_metric!(counter, "pipeline", "batches_processed")).increment(1);
        ::metrics::counter!(stage_metric!(counter, "pipeline", "records_accepted"))
            .increment(accepted as u64);
        ::metrics::counter!(stage_metric!(counter, "pipeline", "records_rejected"))
            .increment(rejected as u64);
        ::metrics::histogram!(stage_metric!(histogram, "pipeline", "batch_size"))
            .record((accepted + rejected) as f64);
    }

    /// Record a single rejection, labelled with the rule that fired
    pub fn record_rejection(rule: &str) {
        ::metrics::counter!(
            stage_metric!(counter, "pipeline", "rule_rejections"),
            "rule" => rule.to_string()
        )
        .increment(1);
    }

    /// Record a completed load
    pub fn record_load(source: &'static str, records: usize) {
        ::metrics::counter!(
            stage_metric!(counter, "loader", "records_loaded"),
            "source" => source
        )
        .increment(records as u64);
    }

    /// Record a load that was aborted
    pub fn record_load_error(source: &'static str) {
        ::metrics::counter!(stage_metric!(counter, "loader", "errors"), "source" => source)
            .increment(1);
    }

    /// Attach help text to every metric with the installed recorder
    pub fn describe() {
        for doc in Self::metrics_documentation() {
            match doc.metric_type {
                MetricType::Counter => ::metrics::describe_counter!(doc.name, doc.help),
                MetricType::Histogram => ::metrics::describe_histogram!(doc.name, doc.help),
            }
        }
        debug!("Described {} pipeline metrics", Self::metrics_documentation().len());
    }

    pub fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: stage_metric!(counter, "pipeline", "batches_processed"),
                metric_type: MetricType::Counter,
                help: "Total number of batches run through the pipeline",
                labels: vec![],
            },
            MetricDoc {
                name: stage_metric!(counter, "pipeline", "records_accepted"),
                metric_type: MetricType::Counter,
                help: "Records that passed validation and were transformed",
                labels: vec![],
            },
            MetricDoc {
                name: stage_metric!(counter, "pipeline", "records_rejected"),
                metric_type: MetricType::Counter,
                help: "Records rejected by a validation rule",
                labels: vec![],
            },
            MetricDoc {
                name: stage_metric!(counter, "pipeline", "rule_rejections"),
                metric_type: MetricType::Counter,
                help: "Rejections broken down by the rule that fired",
                labels: vec!["rule"],
            },
            MetricDoc {
                name: stage_metric!(histogram, "pipeline", "batch_size"),
                metric_type: MetricType::Histogram,
                help: "Number of records per batch",
                labels: vec![],
            },
            MetricDoc {
                name: Self::BATCH_DURATION,
                metric_type: MetricType::Histogram,
                help: "Wall time spent processing a batch in seconds",
                labels: vec!["mode"],
            },
            MetricDoc {
                name: stage_metric!(counter, "loader", "records_loaded"),
                metric_type: MetricType::Counter,
                help: "Records produced by the loaders",
                labels: vec!["source"],
            },
            MetricDoc {
                name: stage_metric!(counter, "loader", "errors"),
                metric_type: MetricType::Counter,
                help: "Loads aborted by malformed input",
                labels: vec!["source"],
            },
        ]
    }
}
