// src/render/pie.rs

use plotters::{
    coord::Shift,
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};
use std::f64::consts::PI;

use super::{Scale, FONT};
use crate::{aggregate::PieChart, error::Result};

/// Slice fills, cycled.
pub const PIE_COLORS: [RGBColor; 5] = [
    RGBColor(0xad, 0xd8, 0xe6),
    RGBColor(0xff, 0xb3, 0x66),
    RGBColor(0xb3, 0xff, 0xb3),
    RGBColor(0xff, 0xb3, 0xb3),
    RGBColor(0xc2, 0xc2, 0xf0),
];
const EDGE: RGBColor = RGBColor(128, 128, 128);

/// First slice starts at twelve o'clock; slices run counter-clockwise.
const START_ANGLE_DEG: f64 = 90.0;
/// Arc resolution of the slice outlines.
const STEPS_PER_TURN: f64 = 360.0;
const LABEL_DISTANCE: f64 = 1.1;
const PCT_DISTANCE: f64 = 0.6;

pub fn title(pie: &PieChart) -> String {
    format!("Pie Chart for {} in {}", pie.indicator, pie.year)
}

/// Pixel geometry of one slice.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceShape {
    pub index: usize,
    /// Closed outline: apex, arc points, back to the apex.
    pub outline: Vec<(i32, i32)>,
    pub label_at: (i32, i32),
    pub pct_at: (i32, i32),
    /// Bisector angle in degrees, counter-clockwise from three o'clock.
    pub mid_deg: f64,
}

fn polar(center: (f64, f64), radius: f64, deg: f64) -> (f64, f64) {
    let rad = deg * PI / 180.0;
    // screen y grows downwards
    (center.0 + radius * rad.cos(), center.1 - radius * rad.sin())
}

fn px((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

/// Lay out the slices of `pie` around `center`. Slices with no share are omitted.
pub fn slice_shapes(pie: &PieChart, center: (i32, i32), radius: f64) -> Vec<SliceShape> {
    let center = (f64::from(center.0), f64::from(center.1));
    let mut start = START_ANGLE_DEG;
    let mut shapes = Vec::with_capacity(pie.slices.len());

    for i in 0..pie.slices.len() {
        let sweep = pie.share(i) / 100.0 * 360.0;
        if !(sweep.is_finite() && sweep > 0.0) {
            continue;
        }
        let end = start + sweep;
        let mid = start + sweep / 2.0;
        let apex = polar(center, pie.explode(i) * radius, mid);

        let steps = ((sweep / 360.0) * STEPS_PER_TURN).ceil().max(1.0) as usize;
        let mut outline = Vec::with_capacity(steps + 3);
        outline.push(px(apex));
        for k in 0..=steps {
            let deg = start + sweep * k as f64 / steps as f64;
            outline.push(px(polar(apex, radius, deg)));
        }
        outline.push(px(apex));

        shapes.push(SliceShape {
            index: i,
            outline,
            label_at: px(polar(apex, radius * LABEL_DISTANCE, mid)),
            pct_at: px(polar(apex, radius * PCT_DISTANCE, mid)),
            mid_deg: mid,
        });
        start = end;
    }
    shapes
}

pub fn draw_pie<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    pie: &PieChart,
    title: &str,
) -> Result<()> {
    let s = Scale::of(area);
    let area = area.titled(title, (FONT, s.font(16.0)))?;
    let (w, h) = area.dim_in_pixel();
    let center = ((w / 2) as i32, (h / 2) as i32);
    let radius = f64::from(w.min(h)) * 0.33;

    let label_style = TextStyle::from((FONT, s.font(10.0)).into_font().style(FontStyle::Bold))
        .pos(Pos::new(HPos::Center, VPos::Center));

    for shape in slice_shapes(pie, center, radius) {
        let i = shape.index;
        let fill = PIE_COLORS[i % PIE_COLORS.len()];
        area.draw(&Polygon::new(shape.outline.clone(), fill.filled()))?;
        area.draw(&PathElement::new(
            shape.outline.clone(),
            EDGE.stroke_width(s.px(f64::from(pie.border_width(i)))),
        ))?;
        area.draw(&Text::new(
            pie.slices[i].label.clone(),
            shape.label_at,
            label_style.clone(),
        ))?;
        area.draw(&Text::new(
            format!("{:.1}%", pie.share(i)),
            shape.pct_at,
            label_style.clone(),
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{PieSlice, EXPLODE_OFFSET};

    fn chart(values: &[f64], emphasized: usize) -> PieChart {
        PieChart {
            indicator: "X".into(),
            year: 2002,
            slices: values
                .iter()
                .enumerate()
                .map(|(i, &value)| PieSlice {
                    label: format!("C{i}"),
                    value,
                })
                .collect(),
            emphasized,
        }
    }

    fn dist(a: (i32, i32), b: (i32, i32)) -> f64 {
        f64::from(a.0 - b.0).hypot(f64::from(a.1 - b.1))
    }

    #[test]
    fn first_slice_starts_at_twelve_oclock() {
        let shapes = slice_shapes(&chart(&[1.0, 1.0], 0), (100, 100), 50.0);
        assert_eq!(shapes.len(), 2);
        // non-emphasised slice keeps its apex on the centre
        assert_eq!(shapes[1].outline[0], (100, 100));
        // half-and-half: first slice spans 90..270, second 270..450
        assert_eq!(shapes[0].mid_deg, 180.0);
        assert_eq!(shapes[1].mid_deg, 360.0);
        // second slice begins straight down, first arc point of first slice straight up
        let first_arc = shapes[0].outline[1];
        assert_eq!(first_arc.0, shapes[0].outline[0].0);
        assert!(first_arc.1 < shapes[0].outline[0].1);
    }

    #[test]
    fn emphasised_slice_is_pushed_out_along_its_bisector() {
        let shapes = slice_shapes(&chart(&[1.0, 3.0], 1), (200, 200), 100.0);
        let apex = shapes[1].outline[0];
        assert!((dist(apex, (200, 200)) - EXPLODE_OFFSET * 100.0).abs() <= 1.0);
        // bisector of 180..450 is 315 degrees: right and down on screen
        assert!(apex.0 > 200 && apex.1 > 200);
        assert_eq!(shapes[0].outline[0], (200, 200));
    }

    #[test]
    fn arc_points_sit_on_the_radius() {
        let shapes = slice_shapes(&chart(&[2.0, 1.0, 1.0], 0), (300, 300), 120.0);
        for shape in &shapes {
            let apex = shape.outline[0];
            for &p in &shape.outline[1..shape.outline.len() - 1] {
                assert!((dist(p, apex) - 120.0).abs() <= 1.5);
            }
            assert_eq!(shape.outline.last(), Some(&apex));
        }
    }

    #[test]
    fn empty_slices_are_skipped() {
        let shapes = slice_shapes(&chart(&[0.0, 5.0], 1), (10, 10), 5.0);
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].index, 1);
        assert!(slice_shapes(&chart(&[0.0], 0), (10, 10), 5.0).is_empty());
    }
}
