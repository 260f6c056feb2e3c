//! Subscription table wiring input controls to the charts that depend on
//! them.

use std::collections::BTreeMap;

use dataset::Dataset;
use shared::{
    domain::{ControlId, TargetId},
    figure::Figure,
    protocol::{ControlState, FigureUpdate},
};
use thiserror::Error;
use tracing::debug;

use crate::resolvers::{resolve_pie, resolve_scatter};

pub type Resolver = fn(&ControlState, &Dataset) -> Figure;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("output '{}' already has a callback", .0.as_str())]
    DuplicateOutput(TargetId),
    #[error("callback for '{}' declares no inputs", .0.as_str())]
    NoInputs(TargetId),
}

#[derive(Debug, Clone)]
pub struct Callback {
    output: TargetId,
    inputs: Vec<ControlId>,
    resolver: Resolver,
}

impl Callback {
    pub fn output(&self) -> TargetId {
        self.output
    }

    pub fn inputs(&self) -> &[ControlId] {
        &self.inputs
    }

    pub fn run(&self, state: &ControlState, dataset: &Dataset) -> FigureUpdate {
        FigureUpdate {
            target: self.output,
            figure: (self.resolver)(state, dataset),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CallbackRegistry {
    callbacks: Vec<Callback>,
    subscriptions: BTreeMap<ControlId, Vec<usize>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pie chart driven by the site dropdown; scatter chart driven by the
    /// dropdown and the payload slider.
    pub fn standard() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.register(
            TargetId::SuccessPieChart,
            &[ControlId::SiteDropdown],
            pie_callback,
        )?;
        registry.register(
            TargetId::SuccessPayloadScatterChart,
            &[ControlId::SiteDropdown, ControlId::PayloadSlider],
            scatter_callback,
        )?;
        Ok(registry)
    }

    /// Adds a callback re-run whenever any of `inputs` changes. Repeated
    /// inputs are subscribed once.
    pub fn register(
        &mut self,
        output: TargetId,
        inputs: &[ControlId],
        resolver: Resolver,
    ) -> Result<(), RegistryError> {
        if inputs.is_empty() {
            return Err(RegistryError::NoInputs(output));
        }
        if self.callbacks.iter().any(|callback| callback.output == output) {
            return Err(RegistryError::DuplicateOutput(output));
        }

        let index = self.callbacks.len();
        let mut unique = Vec::with_capacity(inputs.len());
        for input in inputs {
            if !unique.contains(input) {
                unique.push(*input);
                self.subscriptions.entry(*input).or_default().push(index);
            }
        }
        self.callbacks.push(Callback {
            output,
            inputs: unique,
            resolver,
        });
        Ok(())
    }

    pub fn callbacks(&self) -> &[Callback] {
        &self.callbacks
    }

    pub fn subscribers(&self, control: ControlId) -> impl Iterator<Item = &Callback> {
        self.subscriptions
            .get(&control)
            .into_iter()
            .flatten()
            .map(|index| &self.callbacks[*index])
    }

    /// Callbacks depending on any of `changed`, each listed once, in
    /// registration order.
    pub fn affected(&self, changed: &[ControlId]) -> Vec<&Callback> {
        let mut indices: Vec<usize> = changed
            .iter()
            .filter_map(|control| self.subscriptions.get(control))
            .flatten()
            .copied()
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices
            .into_iter()
            .map(|index| &self.callbacks[index])
            .collect()
    }
}

/// Re-runs every callback subscribed to a changed control.
pub fn dispatch(
    registry: &CallbackRegistry,
    dataset: &Dataset,
    state: &ControlState,
    changed: &[ControlId],
) -> Vec<FigureUpdate> {
    registry
        .affected(changed)
        .into_iter()
        .map(|callback| {
            let update = callback.run(state, dataset);
            debug!(
                output = callback.output.as_str(),
                site = %state.site,
                slices = update.figure.pie_trace().map_or(0, |pie| pie.values.len()),
                points = update.figure.point_count(),
                "ran dashboard callback"
            );
            update
        })
        .collect()
}

/// Runs every registered callback, as on first page load.
pub fn render_all(
    registry: &CallbackRegistry,
    dataset: &Dataset,
    state: &ControlState,
) -> Vec<FigureUpdate> {
    registry
        .callbacks()
        .iter()
        .map(|callback| callback.run(state, dataset))
        .collect()
}

fn pie_callback(state: &ControlState, dataset: &Dataset) -> Figure {
    resolve_pie(&state.site, dataset)
}

fn scatter_callback(state: &ControlState, dataset: &Dataset) -> Figure {
    resolve_scatter(&state.site, state.payload_range, dataset)
}

#[cfg(test)]
#[path = "tests/callbacks_tests.rs"]
mod tests;
