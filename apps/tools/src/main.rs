use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dashboard::{
    layout::build_layout,
    resolvers::{resolve_pie, resolve_scatter},
};
use dataset::Dataset;
use shared::domain::{PayloadRange, SiteSelection};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Offline helpers for the launch records dashboard")]
struct Cli {
    #[arg(long, default_value = "spacex_launch_dash.csv")]
    data_path: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print record counts and payload bounds.
    Summary,
    /// Print the pie chart figure as JSON.
    Pie {
        #[arg(long, default_value = "ALL")]
        site: String,
    },
    /// Print the scatter chart figure as JSON.
    Scatter {
        #[arg(long, default_value = "ALL")]
        site: String,
        #[arg(long)]
        low: Option<f64>,
        #[arg(long)]
        high: Option<f64>,
    },
    /// Print the page layout as JSON.
    Layout,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let dataset = Dataset::from_csv_path(&cli.data_path)
        .with_context(|| format!("failed to load launch dataset '{}'", cli.data_path))?;

    let json = match cli.command {
        Command::Summary => serde_json::to_string_pretty(&dataset.summary())?,
        Command::Pie { site } => {
            serde_json::to_string_pretty(&resolve_pie(&SiteSelection::from(site), &dataset))?
        }
        Command::Scatter { site, low, high } => {
            let range = PayloadRange::new(
                low.unwrap_or(dataset.min_payload()),
                high.unwrap_or(dataset.max_payload()),
            )?;
            let figure = resolve_scatter(&SiteSelection::from(site), range, &dataset);
            serde_json::to_string_pretty(&figure)?
        }
        Command::Layout => serde_json::to_string_pretty(&build_layout(&dataset.summary()))?,
    };
    println!("{json}");

    Ok(())
}
