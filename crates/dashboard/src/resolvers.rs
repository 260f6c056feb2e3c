use std::collections::{BTreeMap, HashMap};

use dataset::{Dataset, BOOSTER_CATEGORY_COLUMN, CLASS_COLUMN, PAYLOAD_MASS_COLUMN};
use shared::{
    domain::{LaunchRecord, PayloadRange, SiteSelection},
    figure::{Axis, Figure, FigureLayout, Legend, PieTrace, ScatterMode, ScatterTrace, Title, Trace},
};

pub const PIE_WIDTH: u32 = 600;
pub const PIE_HEIGHT: u32 = 400;

pub const SUCCESS_LABEL: &str = "Successful Launches";
pub const FAILURE_LABEL: &str = "Failed Launches";

/// Success counts for the pie chart.
///
/// With every site selected, one slice per launch site holds that site's
/// successful launches, sites ordered by name. With a single site selected,
/// two slices hold its successes and failures. A site absent from the dataset
/// yields two zero slices.
pub fn resolve_pie(site: &SiteSelection, dataset: &Dataset) -> Figure {
    let (trace, title) = match site {
        SiteSelection::All => {
            let mut per_site: BTreeMap<&str, u64> = BTreeMap::new();
            for record in dataset.records() {
                *per_site.entry(record.launch_site.as_str()).or_default() +=
                    u64::from(record.is_success());
            }
            let (labels, values) = per_site
                .into_iter()
                .map(|(site, successes)| (site.to_string(), successes))
                .unzip();
            (
                PieTrace { values, labels },
                "Total Launch Success By Site".to_string(),
            )
        }
        SiteSelection::Site(name) => {
            let (launches, successes) = dataset
                .for_site(name)
                .fold((0u64, 0u64), |(launches, successes), record| {
                    (launches + 1, successes + u64::from(record.is_success()))
                });
            (
                PieTrace {
                    values: vec![successes, launches - successes],
                    labels: vec![SUCCESS_LABEL.to_string(), FAILURE_LABEL.to_string()],
                },
                format!("Launch Success for {name}"),
            )
        }
    };

    Figure {
        data: vec![Trace::Pie(trace)],
        layout: FigureLayout {
            title: Title::centered(title),
            width: Some(PIE_WIDTH),
            height: Some(PIE_HEIGHT),
            ..FigureLayout::default()
        },
    }
}

/// Records plotted by the scatter chart.
///
/// The payload range only narrows a single-site selection; with every site
/// selected the whole dataset is plotted regardless of `range`.
pub fn scatter_points<'a>(
    site: &SiteSelection,
    range: PayloadRange,
    dataset: &'a Dataset,
) -> Vec<&'a LaunchRecord> {
    match site {
        SiteSelection::All => dataset.records().iter().collect(),
        SiteSelection::Site(name) => dataset
            .for_site(name)
            .filter(|record| range.contains(record.payload_mass_kg))
            .collect(),
    }
}

/// Payload mass against launch outcome, one trace per booster category.
pub fn resolve_scatter(site: &SiteSelection, range: PayloadRange, dataset: &Dataset) -> Figure {
    let points = scatter_points(site, range, dataset);
    let title = match site {
        SiteSelection::All => "Correlation Between Payload Mass & ALL Sites".to_string(),
        SiteSelection::Site(name) => format!("Correlation Between Payload Mass & {name}"),
    };

    Figure {
        data: group_by_category(&points)
            .into_iter()
            .map(Trace::Scatter)
            .collect(),
        layout: FigureLayout {
            title: Title::plain(title),
            xaxis: Some(Axis::titled(PAYLOAD_MASS_COLUMN)),
            yaxis: Some(Axis::titled(CLASS_COLUMN)),
            legend: Some(Legend {
                title: Title::plain(BOOSTER_CATEGORY_COLUMN),
            }),
            ..FigureLayout::default()
        },
    }
}

// Traces keep the order in which categories first appear in the records.
fn group_by_category(points: &[&LaunchRecord]) -> Vec<ScatterTrace> {
    let mut traces: Vec<ScatterTrace> = Vec::new();
    let mut index_by_category: HashMap<&str, usize> = HashMap::new();

    for record in points {
        let category = record.booster_version_category.as_str();
        let index = *index_by_category.entry(category).or_insert_with(|| {
            traces.push(ScatterTrace {
                name: category.to_string(),
                legendgroup: category.to_string(),
                mode: ScatterMode::Markers,
                x: Vec::new(),
                y: Vec::new(),
            });
            traces.len() - 1
        });
        traces[index].x.push(record.payload_mass_kg);
        traces[index].y.push(record.class);
    }

    traces
}

#[cfg(test)]
#[path = "tests/resolvers_tests.rs"]
mod tests;
