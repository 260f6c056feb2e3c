use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sentinel dropdown value selecting every launch site.
pub const ALL_SITES: &str = "ALL";

/// Launch sites offered by the site dropdown, in display order.
pub const LAUNCH_SITES: [&str; 4] = ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"];

pub const PAYLOAD_SLIDER_MIN: f64 = 0.0;
pub const PAYLOAD_SLIDER_MAX: f64 = 10000.0;
pub const PAYLOAD_SLIDER_STEP: f64 = 1000.0;

/// One historical launch attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    pub launch_site: String,
    pub payload_mass_kg: f64,
    /// 1 for a successful launch, 0 for a failure.
    pub class: u8,
    pub booster_version_category: String,
}

impl LaunchRecord {
    pub fn is_success(&self) -> bool {
        self.class == 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_SITES,
            Self::Site(name) => name,
        }
    }
}

impl From<String> for SiteSelection {
    fn from(value: String) -> Self {
        if value == ALL_SITES {
            Self::All
        } else {
            Self::Site(value)
        }
    }
}

impl From<&str> for SiteSelection {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<SiteSelection> for String {
    fn from(value: SiteSelection) -> Self {
        match value {
            SiteSelection::All => ALL_SITES.to_string(),
            SiteSelection::Site(name) => name,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadRangeError {
    #[error("payload range bounds must be finite, got [{low}, {high}]")]
    NotFinite { low: f64, high: f64 },
    #[error("payload range low bound {low} exceeds high bound {high}")]
    Inverted { low: f64, high: f64 },
}

/// Inclusive payload mass interval chosen on the range slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    /// Full travel of the payload range slider.
    pub const SLIDER_BOUNDS: Self = Self {
        low: PAYLOAD_SLIDER_MIN,
        high: PAYLOAD_SLIDER_MAX,
    };

    pub fn new(low: f64, high: f64) -> Result<Self, PayloadRangeError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(PayloadRangeError::NotFinite { low, high });
        }
        if low > high {
            return Err(PayloadRangeError::Inverted { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

impl TryFrom<[f64; 2]> for PayloadRange {
    type Error = PayloadRangeError;

    fn try_from([low, high]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(low, high)
    }
}

impl From<PayloadRange> for [f64; 2] {
    fn from(value: PayloadRange) -> Self {
        [value.low, value.high]
    }
}

/// Input controls on the dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlId {
    SiteDropdown,
    PayloadSlider,
}

impl ControlId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SiteDropdown => "site-dropdown",
            Self::PayloadSlider => "payload-slider",
        }
    }
}

/// Chart placeholders that receive resolved figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetId {
    SuccessPieChart,
    SuccessPayloadScatterChart,
}

impl TargetId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuccessPieChart => "success-pie-chart",
            Self::SuccessPayloadScatterChart => "success-payload-scatter-chart",
        }
    }
}
