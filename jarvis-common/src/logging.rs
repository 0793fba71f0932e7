//! Structured logging and request correlation.
//!
//! Every service installs one global `tracing` subscriber from its
//! [`ObservabilityConfig`]. Requests carry a trace ID in `x-trace-id` and
//! the caller's span in `x-span-id`; handlers open a span from a
//! [`RequestContext`] so engine logs inherit both.

use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;

pub const TRACE_ID_HEADER: &str = "x-trace-id";
pub const SPAN_ID_HEADER: &str = "x-span-id";

/// Dependency targets held at `warn` regardless of the configured level.
pub const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "h2", "tower", "tower_http"];

/// `EnvFilter` directives: the base level, then `target=warn` for every
/// quiet target and every configured exclusion.
pub fn filter_directives(observability: &ObservabilityConfig) -> String {
    let quiet = QUIET_TARGETS
        .iter()
        .copied()
        .chain(observability.excluded_targets.iter().map(String::as_str))
        .map(|target| format!("{target}=warn"));

    std::iter::once(observability.log_level.to_lowercase())
        .chain(quiet)
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber for `service`.
///
/// `RUST_LOG`, when set, replaces the configured directives. Calling this
/// again after a subscriber exists does nothing.
pub fn init_logging(observability: &ObservabilityConfig, service: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(observability)));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if observability.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };

    if installed.is_ok() {
        tracing::info!(
            service,
            level = %observability.log_level,
            format = %observability.log_format,
            "Logging ready"
        );
    }
}

fn new_trace_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// First eight hex digits of a fresh v4 UUID.
fn new_span_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

// ============================================================================
// Request Context
// ============================================================================

/// Correlation identifiers for one inbound request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub trace_id: String,
    pub span_id: String,
    /// Span of the caller, when it sent one
    pub parent_span_id: Option<String>,
    pub service: &'static str,
}

impl RequestContext {
    pub fn new(service: &'static str) -> Self {
        Self {
            trace_id: new_trace_id(),
            span_id: new_span_id(),
            parent_span_id: None,
            service,
        }
    }

    /// Continue the caller's trace when it sent a non-empty trace ID.
    pub fn from_headers(headers: &http::HeaderMap, service: &'static str) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Self {
            trace_id: header(TRACE_ID_HEADER).unwrap_or_else(new_trace_id),
            span_id: new_span_id(),
            parent_span_id: header(SPAN_ID_HEADER),
            service,
        }
    }

    /// Echo the trace and this request's span on a response.
    pub fn to_headers(&self, headers: &mut http::HeaderMap) {
        for (name, value) in [(TRACE_ID_HEADER, &self.trace_id), (SPAN_ID_HEADER, &self.span_id)] {
            if let Ok(value) = http::HeaderValue::from_str(value) {
                headers.insert(name, value);
            }
        }
    }

    pub fn span(&self, endpoint: &'static str) -> tracing::Span {
        tracing::info_span!(
            "request",
            endpoint,
            service = self.service,
            trace_id = %self.trace_id,
            span_id = %self.span_id,
            parent_span_id = self.parent_span_id.as_deref(),
        )
    }
}
