//! Handlers for the `/utils` static catalogs.
//!
//! Unauthenticated enumerations backing the search filters and the
//! registration form.

use axum::Json;
use formulaw_core::catalog::{cities_sorted, languages_sorted, LAW_TYPES};
use serde::Serialize;

/// Response for `GET /utils/cities`.
#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    pub cities: Vec<&'static str>,
}

/// Response for `GET /utils/law-types`.
#[derive(Debug, Serialize)]
pub struct LawTypesResponse {
    pub law_types: Vec<&'static str>,
}

/// Response for `GET /utils/languages`.
#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<&'static str>,
}

/// GET /api/utils/cities
///
/// Alphabetical.
pub async fn cities() -> Json<CitiesResponse> {
    Json(CitiesResponse {
        cities: cities_sorted(),
    })
}

/// GET /api/utils/law-types
///
/// Curated order.
pub async fn law_types() -> Json<LawTypesResponse> {
    Json(LawTypesResponse {
        law_types: LAW_TYPES.to_vec(),
    })
}

/// GET /api/utils/languages
///
/// Alphabetical.
pub async fn languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: languages_sorted(),
    })
}
