// src/dashboard.rs

use plotters::{coord::Shift, prelude::*};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::{
    aggregate::{PieChart, Scatter, StackedBars, TimeSeries},
    config::DashboardConfig,
    error::Result,
    render::{ensure_parent, text::draw_paragraph, Chart, OutputKind, Scale},
};

pub const BACKGROUND: RGBColor = RGBColor(0x24, 0x71, 0xA3);

/// Share of the figure height given to the title band and the description band.
const HEADER_SHARE: f64 = 0.06;
const FOOTER_SHARE: f64 = 0.07;
/// Share of each panel used by the chart; the rest holds its caption.
const CHART_SHARE: f64 = 0.74;

/// The four aggregated charts of one dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCharts {
    pub stacked_bar: StackedBars,
    pub line: TimeSeries,
    pub pie: PieChart,
    pub scatter: Scatter,
}

impl DashboardCharts {
    /// Charts in grid order: top-left, top-right, bottom-left, bottom-right.
    pub fn in_grid_order(&self) -> [Chart<'_>; 4] {
        [
            Chart::StackedBar(&self.stacked_bar),
            Chart::Line(&self.line),
            Chart::Pie(&self.pie),
            Chart::Scatter(&self.scatter),
        ]
    }
}

/// Pixel heights of `(header, body, footer)` for a figure `height` pixels tall.
fn bands(height: u32) -> (u32, u32, u32) {
    let header = (f64::from(height) * HEADER_SHARE).round() as u32;
    let footer = (f64::from(height) * FOOTER_SHARE).round() as u32;
    (header, height.saturating_sub(header + footer), footer)
}

pub fn draw_dashboard<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    cfg: &DashboardConfig,
    charts: &DashboardCharts,
) -> Result<()> {
    root.fill(&BACKGROUND)?;
    let s = Scale::of(root);
    let (_, height) = root.dim_in_pixel();
    let (header_h, body_h, _) = bands(height);

    let (header, rest) = root.split_vertically(header_h);
    let (body, footer) = rest.split_vertically(body_h);

    let header = header.margin(s.px(8.0), 0, 0, 0);
    draw_paragraph(&header, &cfg.title, s.font(11.0), &BLACK, true)?;
    if let Some(sub) = &cfg.subtitle {
        let (_, hh) = header.dim_in_pixel();
        let (_, lower) = header.split_vertically(hh / 2);
        draw_paragraph(&lower, sub, s.font(8.0), &BLACK, true)?;
    }

    let captions = [
        &cfg.captions.stacked_bar,
        &cfg.captions.line,
        &cfg.captions.pie,
        &cfg.captions.scatter,
    ];
    let panels = body.split_evenly((2, 2));
    for ((panel, chart), caption) in panels.iter().zip(charts.in_grid_order()).zip(captions) {
        let gap = s.px(20.0);
        let panel = panel.margin(gap, gap, gap, gap);
        let (_, ph) = panel.dim_in_pixel();
        let (plot, text) = panel.split_vertically((f64::from(ph) * CHART_SHARE).round() as u32);
        plot.fill(&WHITE)?;
        chart.draw(&plot)?;
        let text = text.margin(s.px(6.0), 0, 0, 0);
        draw_paragraph(&text, caption, s.font(6.0), &BLACK, false)?;
    }

    let footer = footer.margin(s.px(4.0), 0, s.px(30.0), s.px(30.0));
    draw_paragraph(&footer, &cfg.captions.description, s.font(7.0), &BLACK, false)?;
    Ok(())
}

/// Compose the dashboard and write it to `path` at the configured size.
pub fn write_dashboard(path: &Path, cfg: &DashboardConfig, charts: &DashboardCharts) -> Result<PathBuf> {
    let size = cfg.figure.pixels()?;
    ensure_parent(path)?;
    match OutputKind::of(path) {
        OutputKind::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_dashboard(&root, cfg, charts)?;
            root.present()?;
        }
        OutputKind::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_dashboard(&root, cfg, charts)?;
            root.present()?;
        }
    }
    info!(path = %path.display(), width = size.0, height = size.1, "wrote dashboard");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_fill_the_height() {
        let (h, b, f) = bands(6000);
        assert_eq!((h, f), (360, 420));
        assert_eq!(h + b + f, 6000);
        let (_, b, _) = bands(1);
        assert_eq!(b, 1);
    }
}
