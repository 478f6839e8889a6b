use anyhow::{Context, Result};
use co2dash::data::load_dataset;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr) // keep stdout for the table
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("co2gasdata.csv"));
    tracing::info!(path = %path.display(), "Starting dataset statistics.");

    let dataset =
        load_dataset(&path).with_context(|| format!("loading {}", path.display()))?;
    let summary = dataset.summary();

    if summary.indicators.is_empty() {
        println!("No indicator rows in {}.", path.display());
        return Ok(());
    }

    let width = summary
        .indicators
        .iter()
        .map(|c| c.indicator.chars().count())
        .max()
        .unwrap_or(0)
        .max("Indicator".len());

    println!("\n--- Dataset Statistics: {} ---", path.display());
    println!("rows: {}   countries: {}", summary.total_rows, summary.countries.len());
    println!("{:<width$}  {:>6}  {:>5}  {:>5}", "Indicator", "Rows", "From", "To");
    println!("{}", "-".repeat(width + 22));
    for cov in &summary.indicators {
        let (from, to) = match cov.years {
            Some((lo, hi)) => (lo.to_string(), hi.to_string()),
            None => ("-".into(), "-".into()),
        };
        println!("{:<width$}  {:>6}  {:>5}  {:>5}", cov.indicator, cov.rows, from, to);
    }
    println!("\ncountries: {}", summary.countries.join(", "));

    tracing::info!("Dataset statistics finished.");
    Ok(())
}
