//! Route definitions for the `/utils` static catalogs.

use axum::routing::get;
use axum::Router;

use crate::handlers::utils;
use crate::state::AppState;

/// Routes mounted at `/utils` (public).
///
/// ```text
/// GET /cities     -> filterable cities
/// GET /law-types  -> practice areas
/// GET /languages  -> consultation languages
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cities", get(utils::cities))
        .route("/law-types", get(utils::law_types))
        .route("/languages", get(utils::languages))
}
