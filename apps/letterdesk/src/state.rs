use std::sync::Arc;

use crate::companies::KeyValueStore;
use crate::hierarchy::HierarchyService;
use crate::layout::{a4_page, HelveticaLayout, PageGeometry, TextLayout};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Backs the saved-company lists. Redis in production, in-memory otherwise.
    pub kv: Arc<dyn KeyValueStore>,
    pub hierarchy: HierarchyService,
    /// Text measurement used by the paginator and the PDF writer.
    pub text_layout: Arc<dyn TextLayout>,
    pub page: PageGeometry,
}

impl AppState {
    /// State with Helvetica metrics on an A4 page.
    pub fn new(kv: Arc<dyn KeyValueStore>, hierarchy: HierarchyService) -> Self {
        Self {
            kv,
            hierarchy,
            text_layout: Arc::new(HelveticaLayout),
            page: a4_page(),
        }
    }
}
