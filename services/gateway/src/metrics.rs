//! Prometheus metrics exposition
//!
//! - `gateway_requests_total` (counter): labels `route`, `status`
//! - `gateway_request_duration_seconds` (histogram): label `route`
//! - `session_pool_selections_total` (counter): recorded by the session pool

use anyhow::{Context, Result};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

const DURATION_METRIC: &str = "gateway_request_duration_seconds";

const DURATION_BUCKETS: &[f64] = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0];

fn builder() -> Result<PrometheusBuilder> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Full(DURATION_METRIC.to_string()), DURATION_BUCKETS)
        .context("invalid histogram buckets")
}

/// Install the global recorder and return the handle `/metrics` renders from.
pub fn install_recorder() -> Result<PrometheusHandle> {
    builder()?
        .install_recorder()
        .context("failed to install Prometheus recorder")
}

/// Build a handle without touching the global recorder, for tests.
#[cfg(test)]
pub fn isolated_recorder() -> (metrics_exporter_prometheus::PrometheusRecorder, PrometheusHandle) {
    let recorder = builder()
        .expect("static buckets are valid")
        .build_recorder();
    let handle = recorder.handle();
    (recorder, handle)
}

/// Record a completed request against a matched route.
pub fn record_request(route: &str, status: u16, duration_secs: f64) {
    metrics::counter!(
        "gateway_requests_total",
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(DURATION_METRIC, "route" => route.to_string()).record(duration_secs);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_request_without_recorder_is_noop() {
        record_request("/health", 200, 0.001);
    }

    #[test]
    fn record_request_renders_counter_and_buckets() {
        let (recorder, handle) = isolated_recorder();
        let _guard = metrics::set_default_local_recorder(&recorder);

        record_request("/v1/models", 200, 0.002);
        record_request("/v1/models", 401, 0.0005);

        let output = handle.render();
        assert!(output.contains("gateway_requests_total"), "got: {output}");
        assert!(output.contains("route=\"/v1/models\""));
        assert!(output.contains("status=\"401\""));
        assert!(
            output.contains("gateway_request_duration_seconds_bucket"),
            "histogram must render buckets, got: {output}"
        );
        assert!(output.contains("le=\"0.005\""));
    }
}
