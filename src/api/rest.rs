// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/`. Public endpoints (health) require no
// authentication. All other endpoints require a valid Bearer token checked via
// the `AdminAuth` extractor.
//
// Handlers take a calibration snapshot up front, so a concurrent calibration
// update never affects an in-flight request.
//
// CORS is configured permissively for development; tighten `allowed_origins`
// in production.
// =============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::answers::AnswerSet;
use crate::api::auth::AdminAuth;
use crate::app_state::AppState;
use crate::bounds::{self, PlanProjection};
use crate::calibration::Calibration;
use crate::engine::{self, AllocationResult};
use crate::refine::{self, RefinedPlan};
use crate::types::AssetClass;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ── Public ──────────────────────────────────────────────────
        .route("/api/v1/health", get(health))
        // ── Authenticated ───────────────────────────────────────────
        .route("/api/v1/recommendation", post(recommendation))
        .route("/api/v1/plan/refine", post(plan_refine))
        .route("/api/v1/calibration", get(get_calibration))
        .route("/api/v1/calibration", post(set_calibration))
        // ── Middleware & State ───────────────────────────────────────
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Health (public)
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
    recommendations_served: u64,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let resp = HealthResponse {
        status: "ok",
        uptime_secs: state.uptime_secs(),
        recommendations_served: state
            .recommendations_served
            .load(std::sync::atomic::Ordering::Relaxed),
        server_time: chrono::Utc::now().timestamp_millis(),
    };
    Json(resp)
}

// =============================================================================
// Recommendation (authenticated)
// =============================================================================

/// Engine output plus the trimmed projection callers persist.
#[derive(Serialize)]
struct RecommendationResponse {
    result: AllocationResult,
    plan: PlanProjection,
}

async fn recommendation(
    _auth: AdminAuth,
    State(state): State<Arc<AppState>>,
    Json(answers): Json<AnswerSet>,
) -> impl IntoResponse {
    let calibration = state.calibration_snapshot();
    let result = engine::generate_recommendation(&answers, &calibration);
    let plan = bounds::project_plan(&result.allocation, &answers, result.risk_score);

    let served = state.count_recommendation();
    info!(
        served,
        risk_score = result.risk_score,
        level = %result.risk_profile.level,
        warnings = result.consistency_warnings.len(),
        "recommendation generated"
    );

    Json(RecommendationResponse { result, plan })
}

// =============================================================================
// Plan refinement (authenticated)
// =============================================================================

#[derive(Deserialize)]
struct RefineRequest {
    /// The persisted plan's integer buckets.
    baseline: BTreeMap<AssetClass, u32>,
    /// The externally proposed alternative, fractional percentages.
    alternative: BTreeMap<AssetClass, f64>,
    /// Original answers, for the avoid set and guardrail exemptions.
    #[serde(default)]
    answers: AnswerSet,
}

#[derive(Serialize)]
struct RefineResponse {
    plan: RefinedPlan,
}

async fn plan_refine(
    _auth: AdminAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefineRequest>,
) -> impl IntoResponse {
    let calibration = state.calibration_snapshot();
    let plan = refine::reconcile(&req.baseline, &req.alternative, &req.answers, &calibration);

    let served = state.count_refinement();
    info!(served, clamped = plan.clamped, "plan refined");

    Json(RefineResponse { plan })
}

// =============================================================================
// Calibration (authenticated)
// =============================================================================

async fn get_calibration(
    _auth: AdminAuth,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    Json(state.calibration_snapshot())
}

async fn set_calibration(
    _auth: AdminAuth,
    State(state): State<Arc<AppState>>,
    Json(next): Json<Calibration>,
) -> impl IntoResponse {
    if let Some(path) = &state.calibration_path {
        if let Err(e) = next.save(path) {
            warn!(error = %e, "failed to persist calibration");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "failed to persist calibration" })),
            )
                .into_response();
        }
    }

    state.replace_calibration(next);
    info!("calibration updated");
    Json(serde_json::json!({ "status": "ok" })).into_response()
}
