use std::time::Instant;

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

const REQUESTS_TOTAL: &str = "poliventas_http_requests_total";
const REQUEST_DURATION: &str = "poliventas_http_request_duration_seconds";

/// Label used for requests that did not hit any route.
const UNMATCHED: &str = "unmatched";

/// Records one counter increment and one latency sample per request, labelled
/// by method, route template and status.
pub async fn metrics_middleware(
    matched_path: Option<MatchedPath>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    // Route template, never the concrete path, so ids stay out of labels
    let route = matched_path.map_or_else(|| UNMATCHED.to_owned(), |p| p.as_str().to_owned());

    let response = next.run(req).await;

    let labels = [
        ("method", method),
        ("route", route),
        ("status", response.status().as_u16().to_string()),
    ];
    counter!(REQUESTS_TOTAL, &labels).increment(1);
    histogram!(REQUEST_DURATION, &labels).record(start.elapsed().as_secs_f64());

    response
}

/// Installs the global Prometheus recorder and describes the HTTP metrics.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(REQUESTS_TOTAL, Unit::Count, "HTTP requests served");
    describe_histogram!(REQUEST_DURATION, Unit::Seconds, "HTTP request latency");

    Ok(handle)
}
