use std::sync::Arc;

use dataset::Dataset;
use shared::{
    domain::{PayloadRange, SiteSelection},
    error::ApiError,
    figure::Figure,
    protocol::{CallbackRequest, CallbackResponse, ControlState},
};

pub mod callbacks;
pub mod layout;
pub mod resolvers;
pub mod session;

use callbacks::{dispatch, render_all, CallbackRegistry, RegistryError};
use layout::{build_layout, PageLayout};

/// Read-only state shared by every request and session.
#[derive(Clone)]
pub struct DashboardContext {
    pub dataset: Arc<Dataset>,
    pub registry: Arc<CallbackRegistry>,
    pub layout: Arc<PageLayout>,
}

impl DashboardContext {
    pub fn new(dataset: Arc<Dataset>) -> Result<Self, RegistryError> {
        let registry = CallbackRegistry::standard()?;
        let layout = build_layout(&dataset.summary());
        Ok(Self {
            dataset,
            registry: Arc::new(registry),
            layout: Arc::new(layout),
        })
    }

    pub fn initial_state(&self) -> ControlState {
        self.layout.initial_state.clone()
    }
}

pub fn pie_figure(ctx: &DashboardContext, site: &SiteSelection) -> Figure {
    resolvers::resolve_pie(site, &ctx.dataset)
}

/// Scatter figure for an explicit or partial payload range; a missing bound
/// falls back to the dataset's payload extreme.
pub fn scatter_figure(
    ctx: &DashboardContext,
    site: &SiteSelection,
    low: Option<f64>,
    high: Option<f64>,
) -> Result<Figure, ApiError> {
    let range = PayloadRange::new(
        low.unwrap_or(ctx.dataset.min_payload()),
        high.unwrap_or(ctx.dataset.max_payload()),
    )?;
    Ok(resolvers::resolve_scatter(site, range, &ctx.dataset))
}

/// Stateless callback round: the caller supplies the whole control state.
/// An empty `changed` list renders every chart.
pub fn run_callbacks(ctx: &DashboardContext, request: &CallbackRequest) -> CallbackResponse {
    let updates = if request.changed.is_empty() {
        render_all(&ctx.registry, &ctx.dataset, &request.state)
    } else {
        dispatch(&ctx.registry, &ctx.dataset, &request.state, &request.changed)
    };
    CallbackResponse { updates }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
