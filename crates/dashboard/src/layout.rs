//! Declarative description of the dashboard page.
//!
//! The layout is data: the server renders it to HTML and also serves it as
//! JSON, so any front end can rebuild the same controls.

use std::collections::BTreeMap;

use dataset::DatasetSummary;
use serde::{Deserialize, Serialize};
use shared::{
    domain::{
        ControlId, PayloadRange, SiteSelection, TargetId, LAUNCH_SITES, PAYLOAD_SLIDER_MAX,
        PAYLOAD_SLIDER_MIN, PAYLOAD_SLIDER_STEP,
    },
    protocol::ControlState,
};

pub const PAGE_TITLE: &str = "SpaceX Launch Records Dashboard";

pub type Style = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub title: String,
    pub root: Component,
    pub initial_state: ControlState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "component", rename_all = "snake_case")]
pub enum Component {
    Div {
        children: Vec<Component>,
    },
    H1 {
        text: String,
        style: Style,
    },
    Label {
        text: String,
        style: Style,
    },
    P {
        text: String,
    },
    Br,
    Dropdown(Dropdown),
    RangeSlider(RangeSlider),
    Graph {
        id: TargetId,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: SiteSelection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dropdown {
    pub id: ControlId,
    pub options: Vec<DropdownOption>,
    pub value: SiteSelection,
    pub placeholder: String,
    pub searchable: bool,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderMark {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSlider {
    pub id: ControlId,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<SliderMark>,
    pub value: PayloadRange,
}

impl PageLayout {
    /// Depth-first walk over every component, root included.
    pub fn components(&self) -> Vec<&Component> {
        let mut out = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(component) = stack.pop() {
            out.push(component);
            if let Component::Div { children } = component {
                stack.extend(children.iter().rev());
            }
        }
        out
    }

    pub fn graph_ids(&self) -> Vec<TargetId> {
        self.components()
            .into_iter()
            .filter_map(|component| match component {
                Component::Graph { id } => Some(*id),
                _ => None,
            })
            .collect()
    }
}

pub fn build_layout(summary: &DatasetSummary) -> PageLayout {
    let default_range = PayloadRange::new(summary.min_payload, summary.max_payload)
        .unwrap_or(PayloadRange::SLIDER_BOUNDS);

    let mut options = vec![DropdownOption {
        label: "All Sites".to_string(),
        value: SiteSelection::All,
    }];
    options.extend(LAUNCH_SITES.iter().map(|site| DropdownOption {
        label: site.to_string(),
        value: SiteSelection::from(*site),
    }));

    let root = Component::Div {
        children: vec![
            Component::H1 {
                text: PAGE_TITLE.to_string(),
                style: style(&[
                    ("textAlign", "center"),
                    ("color", "#503D36"),
                    ("font-size", "40px"),
                ]),
            },
            Component::Div {
                children: vec![
                    Component::Label {
                        text: "Select Site:".to_string(),
                        style: style(&[
                            ("width", "80%"),
                            ("height", "30px"),
                            ("font-size", "20px"),
                            ("padding", "3px"),
                        ]),
                    },
                    Component::Dropdown(Dropdown {
                        id: ControlId::SiteDropdown,
                        options,
                        value: SiteSelection::All,
                        placeholder: "Select a Launch Site here".to_string(),
                        searchable: true,
                        style: style(&[("height", "30px"), ("font-size", "20px")]),
                    }),
                ],
            },
            Component::Br,
            Component::Div {
                children: vec![Component::Graph {
                    id: TargetId::SuccessPieChart,
                }],
            },
            Component::Br,
            Component::P {
                text: "Payload range (Kg):".to_string(),
            },
            Component::RangeSlider(RangeSlider {
                id: ControlId::PayloadSlider,
                min: PAYLOAD_SLIDER_MIN,
                max: PAYLOAD_SLIDER_MAX,
                step: PAYLOAD_SLIDER_STEP,
                marks: vec![
                    SliderMark {
                        value: PAYLOAD_SLIDER_MIN,
                        label: "0".to_string(),
                    },
                    SliderMark {
                        value: PAYLOAD_SLIDER_MAX,
                        label: "10000".to_string(),
                    },
                ],
                value: default_range,
            }),
            Component::Div {
                children: vec![Component::Graph {
                    id: TargetId::SuccessPayloadScatterChart,
                }],
            },
        ],
    };

    PageLayout {
        title: PAGE_TITLE.to_string(),
        root,
        initial_state: ControlState {
            site: SiteSelection::All,
            payload_range: default_range,
        },
    }
}

fn style(pairs: &[(&str, &str)]) -> Style {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
