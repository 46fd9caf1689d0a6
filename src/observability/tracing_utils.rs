//! Tracing utilities for request spans.

use tracing::{span, Level, Span};

/// Create a request span with common attributes
pub fn create_request_span(operation: &str, url: &str) -> Span {
    span!(
        Level::INFO,
        "graph_request",
        operation = %operation,
        url = %url,
        otel.kind = "client",
        otel.status_code = tracing::field::Empty,
        http.status_code = tracing::field::Empty,
        error.message = tracing::field::Empty,
    )
}

/// Record success on a span
pub fn record_success(span: &Span, status: u16) {
    span.record("otel.status_code", "OK");
    span.record("http.status_code", status);
}

/// Record error on a span
pub fn record_error(span: &Span, error: &str) {
    span.record("otel.status_code", "ERROR");
    span.record("error.message", error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_recording_without_subscriber() {
        let span = create_request_span("request", "https://graph.facebook.com/me");
        record_success(&span, 200);
        record_error(&span, "boom");
    }
}
