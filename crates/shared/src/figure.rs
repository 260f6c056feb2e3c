//! Chart descriptions in the JSON shape plotly.js consumes directly
//! (`Plotly.react(element, figure.data, figure.layout)`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: FigureLayout,
}

impl Figure {
    pub fn pie_trace(&self) -> Option<&PieTrace> {
        self.data.iter().find_map(|trace| match trace {
            Trace::Pie(pie) => Some(pie),
            Trace::Scatter(_) => None,
        })
    }

    pub fn scatter_traces(&self) -> impl Iterator<Item = &ScatterTrace> {
        self.data.iter().filter_map(|trace| match trace {
            Trace::Scatter(scatter) => Some(scatter),
            Trace::Pie(_) => None,
        })
    }

    /// Number of plotted scatter points across every trace.
    pub fn point_count(&self) -> usize {
        self.scatter_traces().map(|trace| trace.x.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie(PieTrace),
    Scatter(ScatterTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieTrace {
    pub values: Vec<u64>,
    pub labels: Vec<String>,
}

impl PieTrace {
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScatterMode {
    Markers,
}

/// One colour group of a scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterTrace {
    pub name: String,
    pub legendgroup: String,
    pub mode: ScatterMode,
    pub x: Vec<f64>,
    pub y: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FigureLayout {
    pub title: Title,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Auto,
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<Anchor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<Anchor>,
}

impl Title {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Title centred horizontally and pinned near the top edge.
    pub fn centered(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x: Some(0.5),
            y: Some(0.95),
            xanchor: Some(Anchor::Center),
            yanchor: Some(Anchor::Top),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: Title,
}

impl Axis {
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Title::plain(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub title: Title,
}
