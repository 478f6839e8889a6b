// src/render/scatter.rs

use plotters::{coord::Shift, prelude::*};

use super::{padded, series_color, Scale, FONT};
use crate::{aggregate::Scatter, error::Result};

pub fn title(sc: &Scatter) -> String {
    match (sc.years.iter().min(), sc.years.iter().max()) {
        (Some(lo), Some(hi)) => format!(
            "Scatter Plot for {} vs {} from {} to {}",
            sc.x_indicator, sc.y_indicator, lo, hi
        ),
        _ => format!("Scatter Plot for {} vs {}", sc.x_indicator, sc.y_indicator),
    }
}

/// Years where either coordinate is missing produce no point.
pub fn draw_scatter<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    sc: &Scatter,
    title: &str,
) -> Result<()> {
    let s = Scale::of(area);
    let ((x_lo, x_hi), (y_lo, y_hi)) = match sc.bounds() {
        Some(((xl, xh), (yl, yh))) => (padded(xl, xh), padded(yl, yh)),
        None => ((0.0, 1.0), (0.0, 1.0)),
    };

    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, s.font(14.0)))
        .margin(s.px(10.0))
        .x_label_area_size(s.px(40.0))
        .y_label_area_size(s.px(55.0))
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc(sc.x_indicator.as_str())
        .y_desc(sc.y_indicator.as_str())
        .light_line_style(&BLACK.mix(0.05))
        .bold_line_style(&BLACK.mix(0.2))
        .label_style((FONT, s.font(10.0)))
        .axis_desc_style((FONT, s.font(11.0)))
        .draw()?;

    let radius = s.px(7.0);
    let edge = ShapeStyle {
        color: WHITE.to_rgba(),
        filled: false,
        stroke_width: 1,
    };
    for (i, series) in sc.series.iter().enumerate() {
        let color = series_color(i);
        chart
            .draw_series(series.points().flat_map(|p| {
                [
                    Circle::new(p, radius, color.mix(0.7).filled()),
                    Circle::new(p, radius, edge),
                ]
            }))?
            .label(series.country.as_str())
            .legend(move |(x, y)| Circle::new((x, y), 5, color.mix(0.7).filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT, s.font(10.0)))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_spans_requested_years() {
        let sc = Scatter {
            x_indicator: "solid".into(),
            y_indicator: "liquid".into(),
            years: vec![1999, 1991, 2003],
            series: vec![],
        };
        assert_eq!(title(&sc), "Scatter Plot for solid vs liquid from 1991 to 2003");
    }
}
