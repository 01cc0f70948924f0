use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    requests_total: AtomicU64,
    translated_total: AtomicU64,
    fallback_total: AtomicU64,
    fallback_by_kind: Mutex<BTreeMap<&'static str, u64>>,
    empty_input_total: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub translated_total: u64,
    pub fallback_total: u64,
    /// Fallbacks keyed by provider error kind (`timeout`, `rate_limited`, ...).
    pub fallback_by_kind: BTreeMap<String, u64>,
    pub empty_input_total: u64,
    pub avg_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_translated(&self) {
        self.translated_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_fallback(&self, kind: &'static str) {
        self.fallback_total.fetch_add(1, Ordering::Relaxed);
        *self.fallback_by_kind.lock().entry(kind).or_default() += 1;
    }

    pub fn inc_empty_input(&self) {
        self.empty_input_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.requests_total.load(Ordering::Relaxed);
        let latency = self.total_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            requests_total: requests,
            translated_total: self.translated_total.load(Ordering::Relaxed),
            fallback_total: self.fallback_total.load(Ordering::Relaxed),
            fallback_by_kind: self
                .fallback_by_kind
                .lock()
                .iter()
                .map(|(kind, count)| (kind.to_string(), *count))
                .collect(),
            empty_input_total: self.empty_input_total.load(Ordering::Relaxed),
            avg_latency_millis: if requests == 0 {
                0.0
            } else {
                latency as f64 / requests as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,translateai_api=info,translateai_agents=info,translateai_ml=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
