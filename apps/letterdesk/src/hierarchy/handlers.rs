use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::hierarchy::{EmployeeMapping, HierarchySnapshot};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SaveHierarchyRequest {
    pub hierarchy: Value,
    #[serde(default)]
    pub employees: EmployeeMapping,
}

#[derive(Serialize)]
pub struct SaveHierarchyResponse {
    pub updated_at: DateTime<Utc>,
}

/// Token from `Authorization: Bearer <token>`, if present. The scheme name
/// is case-insensitive.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim_start();
    let (scheme, token) = value.split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim()).filter(|t| !t.is_empty())
}

/// GET /api/v1/hierarchy
pub async fn handle_get_hierarchy(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Option<HierarchySnapshot>>, AppError> {
    let snapshot = state.hierarchy.load(bearer_token(&headers)).await?;
    Ok(Json(snapshot))
}

/// PUT /api/v1/hierarchy
pub async fn handle_save_hierarchy(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SaveHierarchyRequest>,
) -> Result<Json<SaveHierarchyResponse>, AppError> {
    let updated_at = state
        .hierarchy
        .save(bearer_token(&headers), req.hierarchy, &req.employees)
        .await?;
    Ok(Json(SaveHierarchyResponse { updated_at }))
}

/// DELETE /api/v1/hierarchy
pub async fn handle_delete_hierarchy(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    state.hierarchy.delete(bearer_token(&headers)).await?;
    Ok(StatusCode::NO_CONTENT)
}
