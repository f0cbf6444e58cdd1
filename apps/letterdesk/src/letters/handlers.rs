use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderValue,
    },
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::companies::handlers::parse_letter_type;
use crate::companies::{CompanyRepository, CompanySession};
use crate::errors::AppError;
use crate::layout::{paginate, pdf_filename, write_pdf, PdfInfo};
use crate::letters::collector::{collect_form, FieldSource, COMPANY_INDEX};
use crate::letters::document::build_document;
use crate::letters::html::render_html;
use crate::letters::validation::validate_required;
use crate::models::letter::{FormData, LetterType};
use crate::state::AppState;

/// Request body: the form's named fields. Numbers and booleans are accepted
/// and read as their text; nulls count as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "HashMap<String, Value>")]
pub struct FormFields(pub HashMap<String, String>);

impl From<HashMap<String, Value>> for FormFields {
    fn from(raw: HashMap<String, Value>) -> Self {
        let fields = raw
            .into_iter()
            .filter_map(|(name, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                Some((name, text))
            })
            .collect();
        FormFields(fields)
    }
}

/// Overlays a selected saved company, collects the typed record and runs the
/// required-field gate.
async fn prepare_form(
    state: &AppState,
    letter_type: LetterType,
    FormFields(mut fields): FormFields,
    today: NaiveDate,
) -> Result<FormData, AppError> {
    if fields.has(COMPANY_INDEX) {
        let index: usize = fields.text(COMPANY_INDEX).parse().map_err(|_| {
            AppError::Validation(format!("{COMPANY_INDEX} must be a non-negative integer"))
        })?;
        let repo = CompanyRepository::for_letter(state.kv.clone(), letter_type);
        let mut session = CompanySession::load(&repo).await?;
        if session.select(index).is_none() {
            return Err(AppError::NotFound(format!(
                "No saved company at index {index}"
            )));
        }
        session.apply_to(&mut fields);
    }

    let form = collect_form(letter_type, &fields, today);
    validate_required(&form).map_err(|e| {
        warn!(%letter_type, missing = ?e.missing, "Letter refused");
        e
    })?;
    Ok(form)
}

/// POST /api/v1/letters/:letter_type/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(letter_type): Path<String>,
    Json(fields): Json<FormFields>,
) -> Result<Response, AppError> {
    let letter_type = parse_letter_type(&letter_type)?;
    let form = prepare_form(&state, letter_type, fields, Utc::now().date_naive()).await?;

    let html = render_html(&build_document(&form));
    info!(%letter_type, "Preview rendered");
    Ok(([(CONTENT_TYPE, "text/html; charset=utf-8")], html).into_response())
}

/// POST /api/v1/letters/:letter_type/pdf
pub async fn handle_pdf(
    State(state): State<AppState>,
    Path(letter_type): Path<String>,
    Json(fields): Json<FormFields>,
) -> Result<Response, AppError> {
    let letter_type = parse_letter_type(&letter_type)?;
    let today = Utc::now().date_naive();
    let form = prepare_form(&state, letter_type, fields, today).await?;

    let filename = pdf_filename(letter_type, &form.company.name, &form.employee.name, today);
    let document = build_document(&form);
    let title = document
        .heading()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} Letter", letter_type.label()));
    let author = form.company.name.clone();
    let text_layout = state.text_layout.clone();
    let page = state.page;

    // Layout and serialization are CPU-bound.
    let (bytes, pages) = tokio::task::spawn_blocking(move || {
        let paginated = paginate(&document, text_layout.as_ref(), &page);
        let info = PdfInfo {
            title: &title,
            author: &author,
            created: Utc::now(),
        };
        write_pdf(&paginated, text_layout.as_ref(), &info).map(|b| (b, paginated.pages.len()))
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    info!(%letter_type, pages, bytes = bytes.len(), %filename, "PDF generated");

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        header_safe(&filename)
    ))
    .map_err(|e| AppError::Internal(e.into()))?;

    Ok((
        [
            (CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// Filename as it can appear inside a quoted header parameter.
fn header_safe(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
