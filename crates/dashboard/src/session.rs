use shared::protocol::{ClientEvent, ControlState, FigureUpdate};
use tracing::debug;

use crate::{
    callbacks::{dispatch, render_all},
    DashboardContext,
};

/// Control state of one connected page.
///
/// Events are applied one at a time through `&mut self`, so a session never
/// has two renders of the same chart in flight.
pub struct Session {
    ctx: DashboardContext,
    state: ControlState,
}

impl Session {
    pub fn new(ctx: DashboardContext) -> Self {
        let state = ctx.initial_state();
        Self { ctx, state }
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn initial_render(&self) -> Vec<FigureUpdate> {
        render_all(&self.ctx.registry, &self.ctx.dataset, &self.state)
    }

    /// Applies a control change and returns the charts it invalidated. A
    /// change that leaves the value as it was re-renders nothing.
    pub fn apply(&mut self, event: ClientEvent) -> Vec<FigureUpdate> {
        let ClientEvent::ControlChanged(change) = event;
        let previous = self.state.clone();
        let control = self.state.apply(change);
        if self.state == previous {
            debug!(control = control.as_str(), "control value unchanged");
            return Vec::new();
        }
        dispatch(
            &self.ctx.registry,
            &self.ctx.dataset,
            &self.state,
            &[control],
        )
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
