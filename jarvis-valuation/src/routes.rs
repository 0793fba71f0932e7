//! HTTP API routes.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use jarvis_common::logging::RequestContext;
use jarvis_common::Config;
use serde::{Deserialize, Serialize};

use crate::calculator::{analyze_roi, CostEstimate, TaskLine};
use crate::error::ValuationError;
use crate::valuation::{ValuationConfig, ValuationEngine, ValuationInput, ValuationResult};

/// Service name used in logs and the health check.
pub const SERVICE_NAME: &str = "jarvis-valuation";

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ValuationEngine>,
    /// Fee applied to estimates that do not specify one (%)
    pub default_fee_percent: f64,
}

impl AppState {
    pub fn new(engine: ValuationEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            default_fee_percent: 0.0,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            engine: Arc::new(ValuationEngine::with_config(ValuationConfig::from(
                &config.valuation,
            ))),
            default_fee_percent: config.calculator.default_fee_percent,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ValuationEngine::new())
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Valuation
        .route("/api/v1/valuations/compute", post(compute_valuation))
        .route("/api/v1/valuations/validate", post(validate_valuation))
        .route(
            "/api/v1/products/:id/valuation/compute",
            post(compute_product_valuation),
        )
        // Cost calculator
        .route("/api/v1/calculator/estimate", post(estimate_costs))
        .route("/api/v1/calculator/roi", post(calculate_roi))
        .with_state(state)
}

// ============ Envelope ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    success: bool,
    data: serde_json::Value,
    trace_id: String,
    timestamp: String,
}

/// Wrap a handler outcome in the response envelope and echo the trace
/// headers on success and failure alike.
fn respond<T: Serialize>(ctx: &RequestContext, outcome: Result<T, ValuationError>) -> Response {
    let outcome = outcome.and_then(|data| {
        serde_json::to_value(data)
            .map_err(|e| jarvis_common::Error::Internal(format!("response serialization: {e}")))
            .map_err(ValuationError::from)
    });
    let mut response = match outcome {
        Ok(data) => Json(Envelope {
            success: true,
            data,
            trace_id: ctx.trace_id.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
        .into_response(),
        Err(err) => {
            tracing::warn!(trace_id = %ctx.trace_id, code = err.code(), "{}", err);
            err.into_response()
        }
    };
    ctx.to_headers(response.headers_mut());
    response
}

fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ValuationError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        ValuationError::from(jarvis_common::Error::InvalidInput(rejection.body_text()))
    })
}

// ============ Health Check ============

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// ============ Valuation ============

async fn compute_valuation(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ValuationInput>, JsonRejection>,
) -> Response {
    let ctx = RequestContext::from_headers(&headers, SERVICE_NAME);
    ctx.span("valuations.compute").in_scope(|| {
        let outcome = parse_body(body)
            .and_then(|input| state.engine.compute(&input).map_err(ValuationError::from));
        respond(&ctx, outcome)
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductValuation {
    product_id: String,
    #[serde(flatten)]
    result: ValuationResult,
}

async fn compute_product_valuation(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<ValuationInput>, JsonRejection>,
) -> Response {
    let ctx = RequestContext::from_headers(&headers, SERVICE_NAME);
    ctx.span("products.valuation.compute").in_scope(|| {
        tracing::debug!(product_id = %product_id, "Computing product valuation");

        let outcome = parse_body(body).and_then(|input| {
            state
                .engine
                .compute(&input)
                .map(|result| ProductValuation { product_id, result })
                .map_err(ValuationError::from)
        });
        respond(&ctx, outcome)
    })
}

async fn validate_valuation(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ValuationInput>, JsonRejection>,
) -> Response {
    let ctx = RequestContext::from_headers(&headers, SERVICE_NAME);
    ctx.span("valuations.validate").in_scope(|| {
        let outcome = parse_body(body).map(|input| state.engine.validate(&input));
        respond(&ctx, outcome)
    })
}

// ============ Cost Calculator ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EstimateRequest {
    #[serde(default)]
    tasks: Vec<TaskLine>,
    #[serde(default)]
    software_cost: f64,
    fee_percent: Option<f64>,
}

async fn estimate_costs(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<EstimateRequest>, JsonRejection>,
) -> Response {
    let ctx = RequestContext::from_headers(&headers, SERVICE_NAME);
    ctx.span("calculator.estimate").in_scope(|| {
        let outcome = parse_body(body).and_then(|request| {
            let fee_percent = request.fee_percent.unwrap_or(state.default_fee_percent);
            CostEstimate::from_tasks(&request.tasks, request.software_cost, fee_percent)
                .map_err(ValuationError::from)
        });
        respond(&ctx, outcome)
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoiRequest {
    estimated_value: f64,
    cost_min: f64,
    cost_max: f64,
}

async fn calculate_roi(
    headers: HeaderMap,
    body: Result<Json<RoiRequest>, JsonRejection>,
) -> Response {
    let ctx = RequestContext::from_headers(&headers, SERVICE_NAME);
    ctx.span("calculator.roi").in_scope(|| {
        let outcome = parse_body(body).and_then(|request| {
            analyze_roi(request.estimated_value, request.cost_min, request.cost_max)
                .map_err(ValuationError::from)
        });
        respond(&ctx, outcome)
    })
}
