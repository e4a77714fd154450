/// Database seeding endpoint
///
/// # Endpoint
///
/// ```text
/// GET /seed
/// ```
///
/// # Responses
///
/// ```json
/// 200 { "message": "Database seeded successfully" }
/// 500 { "error": "<underlying error message>" }
/// ```
///
/// Each request runs one full seeding transaction. Repeating the request is
/// harmless: rows whose keys already exist are left untouched.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

pub const SEED_SUCCESS_MESSAGE: &str = "Database seeded successfully";

#[derive(Debug, Serialize, Deserialize)]
pub struct SeedResponse {
    pub message: String,
}

pub async fn seed(State(state): State<AppState>) -> ApiResult<Json<SeedResponse>> {
    let report = state.seeder.seed().await?;

    tracing::debug!(inserted = report.total(), "Seed request completed");

    Ok(Json(SeedResponse {
        message: SEED_SUCCESS_MESSAGE.to_string(),
    }))
}
