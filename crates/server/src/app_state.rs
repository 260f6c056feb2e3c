use std::sync::Arc;

use dashboard::DashboardContext;

use crate::page::render_page;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) dashboard: DashboardContext,
    pub(crate) page: Arc<str>,
}

impl AppState {
    pub(crate) fn new(dashboard: DashboardContext) -> Self {
        let page = render_page(&dashboard.layout).into();
        Self { dashboard, page }
    }
}
