// Metrics and observability module
// This file handles collection and reporting of upstream call latency
// and error counts for the gateway's backends
//
// Numan Thabit 2025 Nov

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};

pub static REQ_LATENCY: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "gateway_upstream_latency_seconds",
        "latency for upstream calls",
        &["service", "method"]
    )
    .unwrap()
});

pub static REQ_ERRORS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "gateway_upstream_errors_total",
        "errors by upstream",
        &["service", "method"]
    )
    .unwrap()
});

/// Render every registered metric in the Prometheus text format.
pub fn render() -> Result<String, prometheus::Error> {
    let families = prometheus::gather();
    let mut buf = Vec::new();
    TextEncoder::new().encode(&families, &mut buf)?;
    String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_recorded_series() {
        REQ_ERRORS
            .with_label_values(&["bitcoind", "getblockcount"])
            .inc();
        let text = render().unwrap();
        assert!(text.contains("gateway_upstream_errors_total"));
        assert!(text.contains("method=\"getblockcount\""));
    }
}
