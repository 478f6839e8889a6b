// src/pipeline.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::info;

use crate::{
    aggregate::{aggregate_pie, aggregate_scatter, aggregate_stacked, aggregate_time_series},
    config::DashboardConfig,
    dashboard::{write_dashboard, DashboardCharts},
    data::{load_dataset, Dataset},
    error::{DashError, Result},
    render::{ensure_parent, render_chart_to_file},
};

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub rows: usize,
    pub dashboard: PathBuf,
    pub standalone: Vec<PathBuf>,
    pub summary: Option<PathBuf>,
}

#[derive(Serialize)]
struct Summary<'a> {
    generated_at: DateTime<Utc>,
    input_path: &'a Path,
    rows: usize,
    charts: &'a DashboardCharts,
}

/// Build all four charts from one dataset. Each aggregation scans it once more.
pub fn aggregate_all(dataset: &Dataset, cfg: &DashboardConfig) -> Result<DashboardCharts> {
    let ind = &cfg.indicators;
    Ok(DashboardCharts {
        stacked_bar: aggregate_stacked(dataset, &ind.stacked_bar, &cfg.years, &cfg.countries)?,
        line: aggregate_time_series(
            dataset,
            &ind.line,
            cfg.line_range.start,
            cfg.line_range.end,
            &cfg.countries,
            cfg.point_order(),
        )?,
        pie: aggregate_pie(dataset, &ind.pie, cfg.pie_year)?,
        scatter: aggregate_scatter(
            dataset,
            &ind.scatter_x,
            &ind.scatter_y,
            &cfg.years,
            &cfg.countries,
        )?,
    })
}

/// The charts written alone. Same as the dashboard's, except the scatter
/// when `indicators.standalone_scatter` names other axes.
pub fn standalone_charts(
    dataset: &Dataset,
    cfg: &DashboardConfig,
    dashboard: &DashboardCharts,
) -> Result<DashboardCharts> {
    let mut charts = dashboard.clone();
    if let Some(pair) = &cfg.indicators.standalone_scatter {
        charts.scatter = aggregate_scatter(dataset, &pair.x, &pair.y, &cfg.years, &cfg.countries)?;
    }
    Ok(charts)
}

/// Write each chart alone into `dir`, one PNG per chart.
pub fn write_standalone(dir: &Path, charts: &DashboardCharts) -> Result<Vec<PathBuf>> {
    charts
        .in_grid_order()
        .into_iter()
        .map(|chart| render_chart_to_file(&dir.join(format!("{}.png", chart.file_stem())), chart))
        .collect()
}

pub fn write_summary(
    path: &Path,
    input_path: &Path,
    rows: usize,
    charts: &DashboardCharts,
) -> Result<PathBuf> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| DashError::file_access(path, e))?;
    let summary = Summary {
        generated_at: Utc::now(),
        input_path,
        rows,
        charts,
    };
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &summary)?;
    writer.flush().map_err(|e| DashError::file_access(path, e))?;
    info!(path = %path.display(), "wrote summary");
    Ok(path.to_path_buf())
}

/// Load, aggregate and write everything `cfg` asks for. Stops at the first error.
#[tracing::instrument(level = "info", skip(cfg), fields(input = %cfg.input_path.display()))]
pub fn run(cfg: &DashboardConfig) -> Result<RunReport> {
    cfg.validate()?;

    let dataset = load_dataset(&cfg.input_path)?;
    let charts = aggregate_all(&dataset, cfg)?;
    info!("aggregated all charts");

    let standalone = match &cfg.standalone_dir {
        Some(dir) => write_standalone(dir, &standalone_charts(&dataset, cfg, &charts)?)?,
        None => Vec::new(),
    };
    let dashboard = write_dashboard(&cfg.output_path, cfg, &charts)?;
    let summary = cfg
        .summary_path
        .as_deref()
        .map(|p| write_summary(p, &cfg.input_path, dataset.len(), &charts))
        .transpose()?;

    Ok(RunReport {
        rows: dataset.len(),
        dashboard,
        standalone,
        summary,
    })
}
