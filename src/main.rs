use anyhow::{Context, Result};
use co2dash::{config::CONFIG_ENV, pipeline, DashboardConfig};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) configuration ────────────────────────────────────────────
    let cfg = DashboardConfig::from_env()
        .with_context(|| format!("loading configuration (from ${} if set)", CONFIG_ENV))?;
    info!(
        input = %cfg.input_path.display(),
        output = %cfg.output_path.display(),
        countries = cfg.countries.len(),
        years = cfg.years.len(),
        "configured"
    );

    // ─── 3) load, aggregate, render ──────────────────────────────────
    let report = pipeline::run(&cfg).context("building dashboard")?;

    info!(
        rows = report.rows,
        dashboard = %report.dashboard.display(),
        standalone = report.standalone.len(),
        summary = ?report.summary,
        "all done"
    );
    Ok(())
}
