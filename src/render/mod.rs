// src/render/mod.rs

//! Drawing of aggregated series with `plotters`. Every chart draws onto any
//! backend's [`DrawingArea`]; file output picks the backend from the extension.

pub mod bar;
pub mod line3d;
pub mod pie;
pub mod scatter;
pub mod text;

use plotters::{coord::Shift, prelude::*};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::{
    aggregate::{PieChart, Scatter, StackedBars, TimeSeries},
    error::{DashError, Result},
};

pub const FONT: &str = "sans-serif";

/// Colours for series that need to be told apart (years, countries).
pub const SERIES_COLORS: [RGBColor; 8] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(23, 190, 207),
];

pub fn series_color(i: usize) -> RGBColor {
    SERIES_COLORS[i % SERIES_COLORS.len()]
}

/// Sizes are written for a 600px drawing and scaled to the real area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(f64);

impl Scale {
    pub const REFERENCE_PX: f64 = 600.0;

    pub fn for_dims((w, h): (u32, u32)) -> Self {
        Scale((f64::from(w.min(h)) / Self::REFERENCE_PX).max(0.5))
    }

    pub fn of<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>) -> Self {
        Self::for_dims(area.dim_in_pixel())
    }

    pub fn px(&self, base: f64) -> u32 {
        (base * self.0).round().max(1.0) as u32
    }

    pub fn font(&self, base: f64) -> f64 {
        base * self.0
    }
}

/// Widen a degenerate or tight range so axes always have some extent.
pub fn padded(lo: f64, hi: f64) -> (f64, f64) {
    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, 1.0);
    }
    if hi - lo < f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Png,
    Svg,
}

impl OutputKind {
    /// `.svg` (any case) draws vectors; everything else is a bitmap.
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => OutputKind::Svg,
            _ => OutputKind::Png,
        }
    }
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| DashError::file_access(dir, e))
        }
        _ => Ok(()),
    }
}

/// One chart, ready to draw on its own.
#[derive(Debug, Clone, Copy)]
pub enum Chart<'a> {
    StackedBar(&'a StackedBars),
    Line(&'a TimeSeries),
    Pie(&'a PieChart),
    Scatter(&'a Scatter),
}

impl Chart<'_> {
    pub fn title(&self) -> String {
        match self {
            Chart::StackedBar(b) => bar::title(b),
            Chart::Line(t) => line3d::title(t),
            Chart::Pie(p) => pie::title(p),
            Chart::Scatter(s) => scatter::title(s),
        }
    }

    /// File stem used when the chart is written alone.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Chart::StackedBar(_) => "stacked_bar",
            Chart::Line(_) => "line3d",
            Chart::Pie(_) => "pie",
            Chart::Scatter(_) => "scatter",
        }
    }

    /// Pixel size when written alone.
    pub fn standalone_size(&self) -> (u32, u32) {
        match self {
            Chart::StackedBar(_) => (1200, 800),
            Chart::Line(_) => (1000, 600),
            Chart::Pie(_) => (800, 600),
            Chart::Scatter(_) => (1000, 800),
        }
    }

    pub fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        let title = self.title();
        match self {
            Chart::StackedBar(b) => bar::draw_stacked_bars(area, b, &title),
            Chart::Line(t) => line3d::draw_time_series(area, t, &title),
            Chart::Pie(p) => pie::draw_pie(area, p, &title),
            Chart::Scatter(s) => scatter::draw_scatter(area, s, &title),
        }
    }
}

/// Write `chart` alone to `path` on a white background.
pub fn render_chart_to_file(path: &Path, chart: Chart<'_>) -> Result<PathBuf> {
    ensure_parent(path)?;
    let size = chart.standalone_size();
    match OutputKind::of(path) {
        OutputKind::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            root.fill(&WHITE)?;
            chart.draw(&root)?;
            root.present()?;
        }
        OutputKind::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            root.fill(&WHITE)?;
            chart.draw(&root)?;
            root.present()?;
        }
    }
    info!(chart = chart.file_stem(), path = %path.display(), "wrote chart");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_kind_follows_extension() {
        assert_eq!(OutputKind::of(Path::new("a/b.svg")), OutputKind::Svg);
        assert_eq!(OutputKind::of(Path::new("a/b.SVG")), OutputKind::Svg);
        assert_eq!(OutputKind::of(Path::new("a/b.png")), OutputKind::Png);
        assert_eq!(OutputKind::of(Path::new("dashboard")), OutputKind::Png);
    }

    #[test]
    fn scale_tracks_shorter_side() {
        let s = Scale::for_dims((6000, 3000));
        assert_eq!(s.px(10.0), 50);
        assert_eq!(s.font(12.0), 60.0);
        // never shrinks below half size, never rounds to zero
        assert_eq!(Scale::for_dims((10, 10)).px(1.0), 1);
    }

    #[test]
    fn padding_handles_flat_and_broken_ranges() {
        assert_eq!(padded(5.0, 5.0), (4.0, 6.0));
        assert_eq!(padded(f64::NAN, 1.0), (0.0, 1.0));
        let (lo, hi) = padded(0.0, 100.0);
        assert_eq!((lo, hi), (-5.0, 105.0));
    }

    #[test]
    fn ensure_parent_creates_missing_dirs() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/deeper/chart.png");
        ensure_parent(&target)?;
        assert!(target.parent().unwrap().is_dir());
        ensure_parent(Path::new("bare.png"))?;
        Ok(())
    }
}
