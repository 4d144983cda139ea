//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "NFe Gateway API",
        version = "0.1.0",
        description = "Validated HTTP gateway for issuing, consulting, and cancelling \
                       Brazilian electronic invoices (NF-e) through the WebmaniaBR provider.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::nfe::issue,
        crate::routes::nfe::lookup,
        crate::routes::nfe::cancel,
        crate::routes::nfe::certificate,
        crate::routes::nfe::sefaz_status,
        crate::routes::nfe::callback,
    ),
    components(schemas(
        crate::error::ErrorEnvelope,
        crate::error::ValidationErrorBody,
    )),
    tags(
        (name = "nfe", description = "Invoice issuance, consultation, and cancellation")
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
///
/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
