pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::companies::handlers as companies;
use crate::hierarchy::handlers as hierarchy;
use crate::letters::handlers as letters;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Saved companies
        .route(
            "/api/v1/companies/:letter_type",
            get(companies::handle_list_companies).post(companies::handle_save_company),
        )
        .route(
            "/api/v1/companies/:letter_type/:index",
            delete(companies::handle_delete_company),
        )
        // Letters
        .route(
            "/api/v1/letters/:letter_type/preview",
            post(letters::handle_preview),
        )
        .route("/api/v1/letters/:letter_type/pdf", post(letters::handle_pdf))
        // Hierarchy
        .route(
            "/api/v1/hierarchy",
            get(hierarchy::handle_get_hierarchy)
                .put(hierarchy::handle_save_hierarchy)
                .delete(hierarchy::handle_delete_hierarchy),
        )
        .with_state(state)
}
