//! Metrics setup and update for the gateway.

use prometheus::{Histogram, HistogramOpts, IntCounter, Opts, Registry};

#[derive(Debug, Clone)]
pub struct Metrics {
    pub query_total: IntCounter,
    pub query_error_total: IntCounter,
    pub session_total: IntCounter,
    pub query_duration_seconds: Histogram,
}

impl Metrics {
    /// Set up counters and histograms and register them with the provided registry.
    pub fn initialize(metrics_registry: &mut Registry) -> Result<Self, prometheus::Error> {
        let query_total = add_int_counter_metric(
            metrics_registry,
            "snowflake_gateway_query_total",
            "Total successful queries.",
        )?;

        let query_error_total = add_int_counter_metric(
            metrics_registry,
            "snowflake_gateway_query_error_total",
            "Total queries that failed to connect, execute or fetch.",
        )?;

        let session_total = add_int_counter_metric(
            metrics_registry,
            "snowflake_gateway_session_total",
            "Total warehouse sessions opened.",
        )?;

        let query_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "snowflake_gateway_query_duration_seconds",
            "Time from opening a session to closing it.",
        ))?;
        metrics_registry.register(Box::new(query_duration_seconds.clone()))?;

        Ok(Self {
            query_total,
            query_error_total,
            session_total,
            query_duration_seconds,
        })
    }
}

/// Create a new int counter metric and register it with the provided Prometheus Registry
fn add_int_counter_metric(
    metrics_registry: &mut Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<IntCounter, prometheus::Error> {
    let int_counter = IntCounter::with_opts(Opts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(int_counter.clone()))?;
    Ok(int_counter)
}
