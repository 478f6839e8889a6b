// src/render/bar.rs

use plotters::{coord::Shift, prelude::*};

use super::{padded, series_color, Scale, FONT};
use crate::{aggregate::StackedBars, error::Result};

/// Fraction of each country slot covered by its bar.
const BAR_WIDTH: f64 = 0.8;

pub fn title(bars: &StackedBars) -> String {
    match (bars.years.iter().min(), bars.years.iter().max()) {
        (Some(lo), Some(hi)) => format!("Stacked Bar Plot for {} ({}-{})", bars.indicator, lo, hi),
        _ => format!("Stacked Bar Plot for {}", bars.indicator),
    }
}

/// Pixels trimmed from each side of a slot so the bar covers [`BAR_WIDTH`] of it.
fn side_margin(plot_width_px: u32, slots: usize) -> u32 {
    let slot = f64::from(plot_width_px) / slots.max(1) as f64;
    (slot * (1.0 - BAR_WIDTH) / 2.0).round() as u32
}

pub fn draw_stacked_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    bars: &StackedBars,
    title: &str,
) -> Result<()> {
    let s = Scale::of(area);
    let n = bars.countries.len();
    let (lo, hi) = bars.value_range();
    let (_, top) = padded(lo, hi);
    let bottom = if lo < 0.0 { padded(lo, hi).0 } else { 0.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, s.font(16.0)))
        .margin(s.px(10.0))
        .x_label_area_size(s.px(40.0))
        .y_label_area_size(s.px(55.0))
        .build_cartesian_2d((0..n).into_segmented(), bottom..top)?;

    let countries = &bars.countries;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                countries.get(*i).cloned().unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        })
        .x_desc("Country")
        .y_desc("Value")
        .label_style((FONT, s.font(11.0)))
        .axis_desc_style((FONT, s.font(13.0)))
        .draw()?;

    let margin = side_margin(chart.plotting_area().dim_in_pixel().0, n);
    let outline = ShapeStyle {
        color: WHITE.to_rgba(),
        filled: false,
        stroke_width: 1,
    };
    let stacks = bars.stacks();

    for (yi, year) in bars.years.iter().enumerate() {
        let color = series_color(yi);
        chart
            .draw_series(stacks.iter().enumerate().flat_map(|(ci, (_, segs))| {
                let seg = segs[yi];
                let corners = [
                    (SegmentValue::Exact(ci), seg.bottom),
                    (SegmentValue::Exact(ci + 1), seg.top),
                ];
                let mut fill = Rectangle::new(corners.clone(), color.mix(0.8).filled());
                fill.set_margin(0, 0, margin, margin);
                let mut edge = Rectangle::new(corners, outline);
                edge.set_margin(0, 0, margin, margin);
                [fill, edge]
            }))?
            .label(year.to_string())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT, s.font(11.0)))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn bars_cover_most_of_their_slot() {
        // 1000px over 5 countries: 200px slots, 20px trimmed per side
        assert_eq!(side_margin(1000, 5), 20);
        assert_eq!(side_margin(0, 0), 0);
    }

    #[test]
    fn title_names_year_span() {
        let bars = StackedBars {
            indicator: "X".into(),
            years: vec![1995, 1991, 2003],
            countries: vec![],
            values: BTreeMap::new(),
        };
        assert_eq!(title(&bars), "Stacked Bar Plot for X (1991-2003)");
    }
}
