// src/config.rs

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    aggregate::PointOrder,
    error::{DashError, Result},
};

/// Environment variable naming a YAML file to load instead of the defaults.
pub const CONFIG_ENV: &str = "CO2DASH_CONFIG";

pub const SOLID_FUEL: &str = "CO2 emissions from solid fuel consumption (% of total)";
pub const LIQUID_FUEL: &str = "CO2 emissions from liquid fuel consumption (% of total)";
pub const GASEOUS_FUEL: &str = "CO2 emissions from gaseous fuel consumption (% of total)";

/// Everything one run needs. Fields missing from a YAML file keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub countries: Vec<String>,
    /// Years for the stacked bar and scatter charts.
    pub years: Vec<i32>,
    pub indicators: Indicators,
    pub line_range: YearRange,
    pub pie_year: i32,
    pub sort_line_by_year: bool,
    /// Where to write each chart on its own. Skipped when unset.
    pub standalone_dir: Option<PathBuf>,
    /// Where to write a JSON dump of the aggregated series. Skipped when unset.
    pub summary_path: Option<PathBuf>,
    pub figure: Figure,
    pub title: String,
    pub subtitle: Option<String>,
    pub captions: Captions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Indicators {
    pub stacked_bar: String,
    pub line: String,
    pub pie: String,
    pub scatter_x: String,
    pub scatter_y: String,
    /// Axes of the scatter written to `standalone_dir`. `None` reuses the
    /// dashboard's scatter.
    pub standalone_scatter: Option<IndicatorPair>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPair {
    pub x: String,
    pub y: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

/// Output size in inches at a given resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Figure {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

/// Static text placed under each chart. Not derived from the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Captions {
    pub stacked_bar: String,
    pub line: String,
    pub pie: String,
    pub scatter: String,
    pub description: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("co2gasdata.csv"),
            output_path: PathBuf::from("co2_dashboard.png"),
            countries: ["India", "Canada", "Germany", "United Kingdom", "Switzerland"]
                .into_iter()
                .map(String::from)
                .collect(),
            years: vec![1991, 1993, 1995, 1997, 1999, 2003],
            indicators: Indicators::default(),
            line_range: YearRange::default(),
            pie_year: 2002,
            sort_line_by_year: false,
            standalone_dir: None,
            summary_path: None,
            figure: Figure::default(),
            title: "CO2 Emissions Dashboard: Solid Fuel, Liquid Fuel, and Gaseous Fuel Consumption"
                .into(),
            subtitle: None,
            captions: Captions::default(),
        }
    }
}

impl Default for Indicators {
    fn default() -> Self {
        Self {
            stacked_bar: SOLID_FUEL.into(),
            line: LIQUID_FUEL.into(),
            pie: GASEOUS_FUEL.into(),
            scatter_x: SOLID_FUEL.into(),
            scatter_y: LIQUID_FUEL.into(),
            standalone_scatter: Some(IndicatorPair {
                x: LIQUID_FUEL.into(),
                y: GASEOUS_FUEL.into(),
            }),
        }
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            start: 1991,
            end: 2003,
        }
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self {
            width_in: 20.0,
            height_in: 20.0,
            dpi: 300,
        }
    }
}

impl Default for Captions {
    fn default() -> Self {
        Self {
            stacked_bar: "India's solid fuel share fluctuated between 1991 and 2003, peaking at \
                73.43% in 1993. Canada stayed between 21.06% and 23.74%. Germany declined from \
                47.81% to 39.25%, the United Kingdom fell to 24.93% by 1999, and Switzerland \
                remained between 0.81% and 2.52%."
                .into(),
            line: "India's liquid fuel share rose from 27.4% in 1991 to 31.6% in 1999. Canada \
                dipped from 46.6% to 45.7% by 1995 before recovering. Germany climbed from 35.8% \
                to 38.9%, the United Kingdom peaked at 39.3% in 1994, and Switzerland eased from \
                76.7% to 71.1%."
                .into(),
            pie: "In 2002 the United Kingdom had the highest gaseous fuel share (37.08%) and India \
                the lowest (4.78%). Canada, Germany and Switzerland stood at 31.97%, 20.77% and \
                13.07%."
                .into(),
            scatter: "India relied heavily on solid fuels (68.2-71.6%) alongside 28.9-31.6% from \
                liquid fuels, while Switzerland showed minimal solid fuel use (0.8-2.5%) and a \
                predominant reliance on liquid fuels (71.1-76.7%)."
                .into(),
            description: "This dashboard summarises CO2 emission shares by fuel type for the \
                selected countries between 1991 and 2003."
                .into(),
        }
    }
}

impl DashboardConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(text)
            .map_err(|e| DashError::Config(format!("parsing YAML: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| DashError::file_access(path, e))?;
        Self::from_yaml_str(&text)
    }

    /// Load the file named by [`CONFIG_ENV`], or fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_yaml_file(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.countries.is_empty() {
            return Err(DashError::Config("countries must not be empty".into()));
        }
        if self.years.is_empty() {
            return Err(DashError::Config("years must not be empty".into()));
        }
        self.figure.pixels().map(|_| ())
    }

    pub fn point_order(&self) -> PointOrder {
        if self.sort_line_by_year {
            PointOrder::ByYear
        } else {
            PointOrder::FileOrder
        }
    }
}

impl Figure {
    /// Pixel dimensions of the figure; fails when either side rounds to zero.
    pub fn pixels(&self) -> Result<(u32, u32)> {
        let px = |inches: f64| (inches * f64::from(self.dpi)).round();
        let (w, h) = (px(self.width_in), px(self.height_in));
        if !(w >= 1.0 && h >= 1.0 && w <= f64::from(u32::MAX) && h <= f64::from(u32::MAX)) {
            return Err(DashError::Config(format!(
                "figure {}x{} in at {} dpi has no usable pixel size",
                self.width_in, self.height_in, self.dpi
            )));
        }
        Ok((w as u32, h as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_report_constants() -> Result<()> {
        let cfg = DashboardConfig::default();
        cfg.validate()?;
        assert_eq!(cfg.countries.len(), 5);
        assert_eq!(cfg.countries[3], "United Kingdom");
        assert_eq!(cfg.years, vec![1991, 1993, 1995, 1997, 1999, 2003]);
        assert_eq!(cfg.line_range, YearRange { start: 1991, end: 2003 });
        assert_eq!(cfg.pie_year, 2002);
        assert_eq!(cfg.indicators.pie, GASEOUS_FUEL);
        assert_eq!(cfg.figure.pixels()?, (6000, 6000));
        assert_eq!(cfg.point_order(), PointOrder::FileOrder);
        Ok(())
    }

    #[test]
    fn partial_yaml_overrides_defaults() -> Result<()> {
        let cfg = DashboardConfig::from_yaml_str(
            r#"
input_path: data/co2.csv
countries: [India, Canada]
sort_line_by_year: true
indicators:
  pie: "CO2 emissions from solid fuel consumption (% of total)"
figure:
  width_in: 10
  dpi: 100
"#,
        )?;
        assert_eq!(cfg.input_path, PathBuf::from("data/co2.csv"));
        assert_eq!(cfg.countries, vec!["India", "Canada"]);
        assert_eq!(cfg.indicators.pie, SOLID_FUEL);
        assert_eq!(cfg.indicators.line, LIQUID_FUEL);
        assert_eq!(cfg.figure.pixels()?, (1000, 2000));
        assert_eq!(cfg.point_order(), PointOrder::ByYear);
        assert_eq!(cfg.pie_year, 2002);
        Ok(())
    }

    #[test]
    fn partial_nested_blocks_keep_their_defaults() -> Result<()> {
        let cfg = DashboardConfig::from_yaml_str("line_range: {start: 1990}")?;
        assert_eq!(cfg.line_range, YearRange { start: 1990, end: 2003 });

        let cfg = DashboardConfig::from_yaml_str("line_range: {end: 1999}")?;
        assert_eq!(cfg.line_range, YearRange { start: 1991, end: 1999 });
        Ok(())
    }

    #[test]
    fn standalone_scatter_defaults_to_liquid_vs_gaseous() -> Result<()> {
        let cfg = DashboardConfig::default();
        let pair = cfg.indicators.standalone_scatter.as_ref().unwrap();
        assert_eq!(pair.x, LIQUID_FUEL);
        assert_eq!(pair.y, GASEOUS_FUEL);

        let cfg = DashboardConfig::from_yaml_str("indicators: {standalone_scatter: null}")?;
        assert_eq!(cfg.indicators.standalone_scatter, None);
        assert_eq!(cfg.indicators.scatter_x, SOLID_FUEL);
        Ok(())
    }

    #[test]
    fn rejects_empty_lists_and_zero_size() {
        assert!(matches!(
            DashboardConfig::from_yaml_str("countries: []"),
            Err(DashError::Config(_))
        ));
        assert!(matches!(
            DashboardConfig::from_yaml_str("years: []"),
            Err(DashError::Config(_))
        ));
        assert!(matches!(
            DashboardConfig::from_yaml_str("figure: {dpi: 0}"),
            Err(DashError::Config(_))
        ));
        assert!(matches!(
            DashboardConfig::from_yaml_str("pie_year: [1, 2]"),
            Err(DashError::Config(_))
        ));
    }

    #[test]
    fn yaml_file_round_trip() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dash.yaml");
        let mut cfg = DashboardConfig::default();
        cfg.summary_path = Some(dir.path().join("summary.json"));
        fs::write(&path, serde_yaml::to_string(&cfg).unwrap()).unwrap();
        assert_eq!(DashboardConfig::from_yaml_file(&path)?, cfg);
        Ok(())
    }
}
