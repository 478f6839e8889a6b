// src/render/line3d.rs

use plotters::{coord::Shift, prelude::*};

use super::{padded, series_color, Scale, FONT};
use crate::{aggregate::TimeSeries, error::Result};

pub fn title(ts: &TimeSeries) -> String {
    format!("3D Line Plot for {} ({}-{})", ts.indicator, ts.start, ts.end)
}

/// x axis extent in years; never empty.
fn year_axis(ts: &TimeSeries) -> (f64, f64) {
    let (lo, hi) = (f64::from(ts.start), f64::from(ts.end));
    if hi > lo {
        (lo, hi)
    } else {
        (lo, lo + 1.0)
    }
}

/// Depth axis: one unit per country, centred on its index.
fn country_axis(ts: &TimeSeries) -> (f64, f64) {
    (-0.5, ts.series.len().max(1) as f64 - 0.5)
}

/// Lines are drawn through points in the order the series holds them.
pub fn draw_time_series<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    ts: &TimeSeries,
    title: &str,
) -> Result<()> {
    let s = Scale::of(area);
    let (x_lo, x_hi) = year_axis(ts);
    let (y_lo, y_hi) = ts
        .value_range()
        .map_or((0.0, 1.0), |(lo, hi)| padded(lo, hi));
    let (z_lo, z_hi) = country_axis(ts);

    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, s.font(16.0)))
        .margin(s.px(20.0))
        .build_cartesian_3d(x_lo..x_hi, y_lo..y_hi, z_lo..z_hi)?;

    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.25;
        pb.scale = 0.8;
        pb.into_matrix()
    });

    let names: Vec<&str> = ts.series.iter().map(|l| l.country.as_str()).collect();
    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .label_style((FONT, s.font(10.0)))
        .x_formatter(&|x| format!("{:.0}", x))
        .z_formatter(&|z| {
            let rounded = z.round();
            if (z - rounded).abs() > 1e-6 || rounded < 0.0 {
                return String::new();
            }
            names.get(rounded as usize).map(|n| n.to_string()).unwrap_or_default()
        })
        .draw()?;

    let marker = s.px(4.0);
    for line in &ts.series {
        let color = series_color(line.index);
        let depth = line.index as f64;
        let coords: Vec<(f64, f64, f64)> = line
            .points
            .iter()
            .map(|&(year, value)| (f64::from(year), value, depth))
            .collect();

        chart
            .draw_series(LineSeries::new(coords.iter().copied(), color.stroke_width(2)))?
            .label(line.country.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart.draw_series(
            coords
                .iter()
                .map(|&c| Circle::new(c, marker, color.filled())),
        )?;
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
    use crate::aggregate::LineSeries;

    fn series(start: i32, end: i32, countries: usize) -> TimeSeries {
        TimeSeries {
            indicator: "X".into(),
            start,
            end,
            series: (0..countries)
                .map(|index| LineSeries {
                    country: format!("C{index}"),
                    index,
                    points: vec![],
                })
                .collect(),
        }
    }

    #[test]
    fn axes_never_collapse() {
        assert_eq!(year_axis(&series(1991, 2003, 2)), (1991.0, 2003.0));
        assert_eq!(year_axis(&series(2000, 2000, 2)), (2000.0, 2001.0));
        assert_eq!(year_axis(&series(2003, 1991, 2)), (2003.0, 2004.0));
        assert_eq!(country_axis(&series(1991, 2003, 5)), (-0.5, 4.5));
        assert_eq!(country_axis(&series(1991, 2003, 0)), (-0.5, 0.5));
    }

    #[test]
    fn title_carries_range() {
        assert_eq!(title(&series(1991, 2003, 1)), "3D Line Plot for X (1991-2003)");
    }
}
