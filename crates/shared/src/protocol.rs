use serde::{Deserialize, Serialize};

use crate::{
    domain::{ControlId, PayloadRange, SiteSelection, TargetId},
    error::ApiError,
    figure::Figure,
};

/// Current value of every input control in one browser session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    pub site: SiteSelection,
    pub payload_range: PayloadRange,
}

impl ControlState {
    pub fn apply(&mut self, change: ControlChange) -> ControlId {
        let control = change.control();
        match change {
            ControlChange::SiteDropdown(site) => self.site = site,
            ControlChange::PayloadSlider(range) => self.payload_range = range,
        }
        control
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "control", content = "value", rename_all = "kebab-case")]
pub enum ControlChange {
    SiteDropdown(SiteSelection),
    PayloadSlider(PayloadRange),
}

impl ControlChange {
    pub fn control(&self) -> ControlId {
        match self {
            Self::SiteDropdown(_) => ControlId::SiteDropdown,
            Self::PayloadSlider(_) => ControlId::PayloadSlider,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ClientEvent {
    ControlChanged(ControlChange),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureUpdate {
    pub target: TargetId,
    pub figure: Figure,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerEvent {
    FigureUpdated {
        target: TargetId,
        figure: Figure,
    },
    Error(ApiError),
}

impl From<FigureUpdate> for ServerEvent {
    fn from(value: FigureUpdate) -> Self {
        Self::FigureUpdated {
            target: value.target,
            figure: value.figure,
        }
    }
}

/// Body of the stateless callback endpoint: the full control state plus the
/// controls whose values changed since the last render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackRequest {
    pub state: ControlState,
    #[serde(default)]
    pub changed: Vec<ControlId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackResponse {
    pub updates: Vec<FigureUpdate>,
}
