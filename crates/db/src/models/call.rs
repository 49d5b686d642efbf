//! Call session model and response shape.

use formulaw_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Full call row from the `calls` table.
///
/// `cost_per_minute` is snapshotted at initiation. `duration_minutes`,
/// `total_cost` and `ended_at` are populated when the call completes.
#[derive(Debug, Clone, FromRow)]
pub struct Call {
    pub id: DbId,
    pub client_id: DbId,
    pub advocate_id: DbId,
    pub status: String,
    pub cost_per_minute: Decimal,
    pub duration_minutes: Option<Decimal>,
    pub total_cost: Option<Decimal>,
    pub rating: Option<i32>,
    pub failure_reason: Option<String>,
    pub created_at: Timestamp,
    pub ended_at: Option<Timestamp>,
}

/// Call representation for API responses.
///
/// `start_time` mirrors `created_at` (telephony legs are dialed at
/// initiation) and `end_time` mirrors `ended_at`.
#[derive(Debug, Clone, Serialize)]
pub struct CallResponse {
    pub id: DbId,
    pub client_id: DbId,
    pub advocate_id: DbId,
    pub status: String,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub duration_minutes: Option<Decimal>,
    pub cost_per_minute: Decimal,
    pub total_cost: Option<Decimal>,
    pub rating: Option<i32>,
    pub created_at: Timestamp,
}

impl From<Call> for CallResponse {
    fn from(call: Call) -> Self {
        Self {
            id: call.id,
            client_id: call.client_id,
            advocate_id: call.advocate_id,
            status: call.status,
            start_time: call.created_at,
            end_time: call.ended_at,
            duration_minutes: call.duration_minutes,
            cost_per_minute: call.cost_per_minute,
            total_cost: call.total_cost,
            rating: call.rating,
            created_at: call.created_at,
        }
    }
}

/// Outcome of attempting to complete a call and settle its cost.
#[derive(Debug)]
pub enum CompleteOutcome {
    /// The call transitioned to `completed` and money moved.
    Completed(Call),
    /// The call was not in `initiated` state.
    WrongState,
    /// The client wallet could not cover the computed total.
    Underfunded,
}
