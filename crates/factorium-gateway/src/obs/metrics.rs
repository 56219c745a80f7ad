//! Metrics registry for the factorial service.
//!
//! Counter and histogram types with dynamic labels backed by `DashMap`. Labels
//! are flattened into sorted key vectors to keep deterministic ordering.
//! Histogram observations are accumulated in integer microseconds and rendered
//! in seconds.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub const REQUESTS_TOTAL: &str = "factorial_requests_total";
pub const EXCEPTIONS_TOTAL: &str = "factorial_exceptions_total";
pub const REQUEST_LATENCY: &str = "factorial_request_latency_seconds";

/// Finite latency bucket bounds in seconds; `+Inf` is implicit.
pub const LATENCY_BUCKETS_SECS: [f64; 7] = [0.1, 0.5, 1.0, 2.0, 3.0, 4.0, 5.0];

type LabelKey = Vec<(String, String)>;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

fn micros_to_secs(micros: u64) -> f64 {
    micros as f64 / 1_000_000.0
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Current value for a label set (0 if never incremented).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", name, help);
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str(r.key()), val);
        }
    }
}

struct AtomicHistogram {
    count: AtomicU64,
    sum_micros: AtomicU64,
    buckets: Vec<AtomicU64>,
}

impl AtomicHistogram {
    fn new(len: usize) -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_micros: AtomicU64::new(0),
            buckets: (0..len).map(|_| AtomicU64::new(0)).collect(),
        }
    }
}

pub struct HistogramVec {
    bounds_micros: Vec<u64>,
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Build with finite upper bounds in seconds (ascending).
    pub fn new(bounds_secs: &[f64]) -> Self {
        Self {
            bounds_micros: bounds_secs
                .iter()
                .map(|s| (s * 1_000_000.0).round() as u64)
                .collect(),
            map: DashMap::new(),
        }
    }

    /// Observe a duration and increment cumulative buckets.
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicHistogram::new(self.bounds_micros.len()));
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum_micros.fetch_add(micros, Ordering::Relaxed);

        // Cumulative: every bucket whose bound is >= the value.
        for (i, &b) in self.bounds_micros.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Total observations for a label set.
    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|h| h.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Cumulative bucket counts, finite bounds first, then `+Inf`.
    pub fn bucket_counts(&self, labels: &[(&str, &str)]) -> Vec<u64> {
        match self.map.get(&label_key(labels)) {
            Some(h) => h
                .buckets
                .iter()
                .map(|b| b.load(Ordering::Relaxed))
                .chain(std::iter::once(h.count.load(Ordering::Relaxed)))
                .collect(),
            None => vec![0; self.bounds_micros.len() + 1],
        }
    }

    /// Render in Prometheus text exposition format (unit: seconds).
    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", name, help);
        let _ = writeln!(out, "# TYPE {} histogram", name);
        for r in self.map.iter() {
            let labels = label_str(r.key());
            let hist = r.value();
            let prefix = if labels.is_empty() {
                String::new()
            } else {
                format!("{},", labels)
            };

            for (i, &le) in self.bounds_micros.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(
                    out,
                    "{}_bucket{{{}le=\"{:?}\"}} {}",
                    name,
                    prefix,
                    micros_to_secs(le),
                    count
                );
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);

            let sum = micros_to_secs(hist.sum_micros.load(Ordering::Relaxed));
            let _ = writeln!(out, "{}_sum{{{}}} {}", name, labels, sum);
            let _ = writeln!(out, "{}_count{{{}}} {}", name, labels, count);
        }
    }
}

/// The three series exported by the service.
///
/// Created once at startup and shared by the handler and the `/metrics`
/// route. Nothing is ever decremented or reset.
pub struct FactorialMetrics {
    requests: CounterVec,
    exceptions: CounterVec,
    latency: HistogramVec,
}

impl Default for FactorialMetrics {
    fn default() -> Self {
        Self {
            requests: CounterVec::default(),
            exceptions: CounterVec::default(),
            latency: HistogramVec::new(&LATENCY_BUCKETS_SECS),
        }
    }
}

impl FactorialMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_request(&self, endpoint: &str, http_status: u16) {
        let status = http_status.to_string();
        self.requests
            .inc(&[("endpoint", endpoint), ("http_status", status.as_str())]);
    }

    pub fn inc_exception(&self, exception_type: &str) {
        self.exceptions.inc(&[("exception_type", exception_type)]);
    }

    pub fn observe_latency(&self, endpoint: &str, elapsed: Duration) {
        self.latency.observe(&[("endpoint", endpoint)], elapsed);
    }

    pub fn request_count(&self, endpoint: &str, http_status: u16) -> u64 {
        let status = http_status.to_string();
        self.requests
            .get(&[("endpoint", endpoint), ("http_status", status.as_str())])
    }

    pub fn exception_count(&self, exception_type: &str) -> u64 {
        self.exceptions.get(&[("exception_type", exception_type)])
    }

    pub fn latency_count(&self, endpoint: &str) -> u64 {
        self.latency.count(&[("endpoint", endpoint)])
    }

    pub fn latency_bucket_counts(&self, endpoint: &str) -> Vec<u64> {
        self.latency.bucket_counts(&[("endpoint", endpoint)])
    }

    /// Render all series.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.requests.render(
            REQUESTS_TOTAL,
            "Total number of factorial requests",
            &mut out,
        );
        self.exceptions.render(
            EXCEPTIONS_TOTAL,
            "Total number of exceptions during factorial computation",
            &mut out,
        );
        self.latency.render(
            REQUEST_LATENCY,
            "Time spent processing factorial request",
            &mut out,
        );
        out
    }
}
