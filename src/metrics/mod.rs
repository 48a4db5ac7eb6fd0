use std::sync::OnceLock;

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Process-wide Prometheus recorder plus the counters this service emits.
///
/// The recorder is installed on first construction; later instances share it.
#[derive(Clone)]
pub struct AppMetrics {
    prometheus_handle: PrometheusHandle,
}

impl AppMetrics {
    pub fn new() -> Self {
        let handle = PROMETHEUS_HANDLE.get_or_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();

            if metrics::set_global_recorder(recorder).is_err() {
                ::tracing::warn!("A global metrics recorder is already installed");
            }

            Self::describe_metrics();

            handle
        });

        Self {
            prometheus_handle: handle.clone(),
        }
    }

    fn describe_metrics() {
        describe_counter!(
            "users_registered_total",
            "Total number of users created through registration"
        );
        describe_counter!(
            "auth_tokens_issued_total",
            "Total number of successful token requests"
        );
        describe_counter!(
            "auth_failures_total",
            "Total number of rejected token requests"
        );
        describe_counter!(
            "profile_updates_total",
            "Total number of applied profile updates"
        );
    }

    pub fn record_registration(&self) {
        counter!("users_registered_total").increment(1);
    }

    /// `created` tells a freshly minted token apart from a reused one.
    pub fn record_token_issued(&self, created: bool) {
        let created = if created { "true" } else { "false" };
        counter!("auth_tokens_issued_total", "created" => created).increment(1);
    }

    pub fn record_auth_failure(&self, reason: &'static str) {
        counter!("auth_failures_total", "reason" => reason).increment(1);
    }

    pub fn record_profile_update(&self) {
        counter!("profile_updates_total").increment(1);
    }

    // Prometheus export
    pub fn render(&self) -> String {
        self.prometheus_handle.render()
    }
}

impl Default for AppMetrics {
    fn default() -> Self {
        Self::new()
    }
}
