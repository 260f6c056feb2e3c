use std::{
    collections::BTreeSet,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::domain::LaunchRecord;
use thiserror::Error;
use tracing::{debug, info};

pub const LAUNCH_SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_MASS_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";
pub const BOOSTER_CATEGORY_COLUMN: &str = "Booster Version Category";

const REQUIRED_COLUMNS: [&str; 4] = [
    LAUNCH_SITE_COLUMN,
    PAYLOAD_MASS_COLUMN,
    CLASS_COLUMN,
    BOOSTER_CATEGORY_COLUMN,
];

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open dataset '{}'", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read dataset header")]
    Header(#[source] csv::Error),
    #[error("dataset is missing required column '{column}'")]
    MissingColumn { column: &'static str },
    #[error("malformed dataset row {row}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("row {row}: class must be 0 or 1, got {value}")]
    InvalidClass { row: usize, value: f64 },
    #[error("row {row}: payload mass must be a non-negative number, got {value}")]
    InvalidPayload { row: usize, value: f64 },
    #[error("dataset contains no launch records")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct LaunchRow {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    // Accepts both `1` and `1.0` spellings.
    class: f64,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

/// Immutable launch table loaded once at startup.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: String,
    records: Vec<LaunchRecord>,
    min_payload: f64,
    max_payload: f64,
    loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub source: String,
    pub record_count: usize,
    pub site_count: usize,
    pub success_count: u64,
    pub min_payload: f64,
    pub max_payload: f64,
    pub loaded_at: DateTime<Utc>,
}

impl Dataset {
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(path.display().to_string(), file)?;
        info!(
            source = %dataset.source,
            records = dataset.record_count(),
            min_payload = dataset.min_payload,
            max_payload = dataset.max_payload,
            "launch dataset loaded"
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(source: impl Into<String>, reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(DatasetError::Header)?;
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                return Err(DatasetError::MissingColumn { column });
            }
        }

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<LaunchRow>().enumerate() {
            let row_number = index + 1;
            let row = row.map_err(|source| DatasetError::Row {
                row: row_number,
                source,
            })?;
            records.push(convert_row(row_number, row)?);
        }
        debug!(rows = records.len(), "parsed launch rows");

        Self::from_records(source, records)
    }

    pub fn from_records(
        source: impl Into<String>,
        records: Vec<LaunchRecord>,
    ) -> Result<Self, DatasetError> {
        for (index, record) in records.iter().enumerate() {
            validate_record(index + 1, record)?;
        }

        let mut payloads = records.iter().map(|record| record.payload_mass_kg);
        let first = payloads.next().ok_or(DatasetError::Empty)?;
        let (min_payload, max_payload) =
            payloads.fold((first, first), |(min, max), payload| {
                (min.min(payload), max.max(payload))
            });

        Ok(Self {
            source: source.into(),
            records,
            min_payload,
            max_payload,
            loaded_at: Utc::now(),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Distinct launch sites, sorted by name.
    pub fn sites(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|record| record.launch_site.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Records launched from `site`. The iterator borrows `site` only while it
    /// runs; the yielded records live as long as the dataset.
    pub fn for_site<'a, 's>(
        &'a self,
        site: &'s str,
    ) -> impl Iterator<Item = &'a LaunchRecord> + 's
    where
        'a: 's,
    {
        self.records
            .iter()
            .filter(move |record| record.launch_site == site)
    }

    pub fn success_count(&self) -> u64 {
        self.records
            .iter()
            .map(|record| u64::from(record.is_success()))
            .sum()
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            source: self.source.clone(),
            record_count: self.record_count(),
            site_count: self.sites().len(),
            success_count: self.success_count(),
            min_payload: self.min_payload,
            max_payload: self.max_payload,
            loaded_at: self.loaded_at,
        }
    }
}

fn convert_row(row: usize, raw: LaunchRow) -> Result<LaunchRecord, DatasetError> {
    let class = if raw.class == 0.0 {
        0
    } else if raw.class == 1.0 {
        1
    } else {
        return Err(DatasetError::InvalidClass {
            row,
            value: raw.class,
        });
    };

    Ok(LaunchRecord {
        launch_site: raw.launch_site,
        payload_mass_kg: raw.payload_mass_kg,
        class,
        booster_version_category: raw.booster_version_category,
    })
}

fn validate_record(row: usize, record: &LaunchRecord) -> Result<(), DatasetError> {
    if record.class > 1 {
        return Err(DatasetError::InvalidClass {
            row,
            value: f64::from(record.class),
        });
    }
    if !record.payload_mass_kg.is_finite() || record.payload_mass_kg < 0.0 {
        return Err(DatasetError::InvalidPayload {
            row,
            value: record.payload_mass_kg,
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
