//! Advocate entity model and DTOs.

use formulaw_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full advocate row from the `advocates` table.
///
/// Keyed by the owning user's id. `fid_number` is the raw sequence value
/// the public FID string is rendered from.
#[derive(Debug, Clone, FromRow)]
pub struct Advocate {
    pub user_id: DbId,
    pub fid: String,
    pub fid_number: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub bar_council_id: String,
    pub bar_council_issue_years: i32,
    pub bar_council_issue_months: i32,
    pub languages: Vec<String>,
    pub law_types: Vec<String>,
    pub working_hours: String,
    pub area: String,
    pub city: String,
    pub state: String,
    pub per_minute_charge: Decimal,
    pub verification_status: String,
    pub duty_status: bool,
    pub average_rating: f64,
    pub rated_call_count: i32,
    pub total_cases: i32,
    pub total_earnings: Decimal,
    pub created_at: Timestamp,
}

/// Advocate representation for API responses.
///
/// `id` is the owning user's id -- it is what clients pass to
/// `initiate-call`. Bookkeeping fields (`fid_number`, `rated_call_count`,
/// `total_earnings`) stay internal.
#[derive(Debug, Clone, Serialize)]
pub struct AdvocateResponse {
    pub id: DbId,
    pub fid: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub bar_council_id: String,
    pub bar_council_issue_years: i32,
    pub bar_council_issue_months: i32,
    pub languages: Vec<String>,
    pub law_types: Vec<String>,
    pub working_hours: String,
    pub area: String,
    pub city: String,
    pub state: String,
    pub per_minute_charge: Decimal,
    pub verification_status: String,
    pub duty_status: bool,
    pub average_rating: f64,
    pub total_cases: i32,
    pub created_at: Timestamp,
}

impl From<Advocate> for AdvocateResponse {
    fn from(advocate: Advocate) -> Self {
        Self {
            id: advocate.user_id,
            fid: advocate.fid,
            email: advocate.email,
            first_name: advocate.first_name,
            last_name: advocate.last_name,
            phone_number: advocate.phone_number,
            bar_council_id: advocate.bar_council_id,
            bar_council_issue_years: advocate.bar_council_issue_years,
            bar_council_issue_months: advocate.bar_council_issue_months,
            languages: advocate.languages,
            law_types: advocate.law_types,
            working_hours: advocate.working_hours,
            area: advocate.area,
            city: advocate.city,
            state: advocate.state,
            per_minute_charge: advocate.per_minute_charge,
            verification_status: advocate.verification_status,
            duty_status: advocate.duty_status,
            average_rating: advocate.average_rating,
            total_cases: advocate.total_cases,
            created_at: advocate.created_at,
        }
    }
}

/// DTO for advocate registration.
#[derive(Debug, Deserialize)]
pub struct RegisterAdvocate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub bar_council_id: String,
    pub bar_council_issue_years: i32,
    pub bar_council_issue_months: i32,
    pub languages: Vec<String>,
    pub law_types: Vec<String>,
    pub working_hours: String,
    pub area: String,
    pub city: String,
    pub state: String,
    pub per_minute_charge: Decimal,
}

/// Query parameters for the public advocate directory search.
#[derive(Debug, Default, Deserialize)]
pub struct AdvocateSearchFilter {
    pub law_type: Option<String>,
    pub city: Option<String>,
    pub language: Option<String>,
    pub sort_by: Option<String>,
}

/// DTO for an advocate updating their profile. All fields are optional.
///
/// Rate changes apply to future calls only; in-flight calls keep the
/// rate snapshotted at initiation.
#[derive(Debug, Deserialize)]
pub struct UpdateAdvocateProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub languages: Option<Vec<String>>,
    pub law_types: Option<Vec<String>>,
    pub working_hours: Option<String>,
    pub area: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub per_minute_charge: Option<Decimal>,
}
