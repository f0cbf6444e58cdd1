use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::companies::repository::CompanyRepository;
use crate::errors::AppError;
use crate::models::company::CompanyProfile;
use crate::models::letter::LetterType;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SaveCompanyRequest {
    pub profile: CompanyProfile,
    /// Position to overwrite; absent or stale means append.
    #[serde(default)]
    pub index: Option<usize>,
}

#[derive(Serialize)]
pub struct SaveCompanyResponse {
    pub index: usize,
}

pub(crate) fn parse_letter_type(raw: &str) -> Result<LetterType, AppError> {
    raw.parse::<LetterType>().map_err(AppError::NotFound)
}

fn repository(state: &AppState, letter_type: &str) -> Result<CompanyRepository, AppError> {
    let letter_type = parse_letter_type(letter_type)?;
    Ok(CompanyRepository::for_letter(state.kv.clone(), letter_type))
}

/// GET /api/v1/companies/:letter_type
pub async fn handle_list_companies(
    State(state): State<AppState>,
    Path(letter_type): Path<String>,
) -> Result<Json<Vec<CompanyProfile>>, AppError> {
    let companies = repository(&state, &letter_type)?.list().await?;
    Ok(Json(companies))
}

/// POST /api/v1/companies/:letter_type
pub async fn handle_save_company(
    State(state): State<AppState>,
    Path(letter_type): Path<String>,
    Json(req): Json<SaveCompanyRequest>,
) -> Result<Json<SaveCompanyResponse>, AppError> {
    let repo = repository(&state, &letter_type)?;
    if req.profile.name.trim().is_empty() {
        return Err(AppError::Validation("Company name is required".to_string()));
    }
    let index = repo.save(req.profile, req.index).await?;
    info!(key = repo.key(), index, "Company saved");
    Ok(Json(SaveCompanyResponse { index }))
}

/// DELETE /api/v1/companies/:letter_type/:index
pub async fn handle_delete_company(
    State(state): State<AppState>,
    Path((letter_type, index)): Path<(String, usize)>,
) -> Result<StatusCode, AppError> {
    let repo = repository(&state, &letter_type)?;
    if repo.delete(index).await? {
        info!(key = repo.key(), index, "Company deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("No saved company at index {index}")))
    }
}
