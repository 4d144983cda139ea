//! # nfe-api: Axum Gateway for NF-e Issuance
//!
//! HTTP gateway in front of the WebmaniaBR NF-e API. Requests are
//! validated locally before anything leaves the process, provider
//! responses are echoed back verbatim, and successful issuances are
//! persisted to Postgres by a detached task.
//!
//! ## API Surface
//!
//! | Route                    | Method | Module            | Behavior            |
//! |--------------------------|--------|-------------------|---------------------|
//! | `/nfe/emissao`           | POST   | [`routes::nfe`]   | Validate and issue  |
//! | `/nfe/consulta/:chave`   | GET    | [`routes::nfe`]   | Consult by key      |
//! | `/nfe/cancelar/:chave`   | PUT    | [`routes::nfe`]   | Cancel with reason  |
//! | `/nfe/certificado`       | GET    | [`routes::nfe`]   | Certificate check   |
//! | `/nfe/status`            | GET    | [`routes::nfe`]   | SEFAZ availability  |
//! | `/nfe/callback`          | POST   | [`routes::nfe`]   | Notification log    |
//! | `/openapi.json`          | GET    | [`openapi`]       | Generated spec      |
//! | `/health/*`              | GET    | here              | Probes              |
//!
//! ## Failure Classes
//!
//! Validation failures return 400 with the full violation list; provider
//! failures return 500 with a normalized envelope (see [`error`]). The
//! persistence sink is fire-and-forget and never affects a response.

pub mod db;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
///
/// Health probes (`/health/*`) are mounted outside the traced API router
/// so probe traffic stays out of the request logs.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::nfe::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe. Always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. Returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
