// src/render/text.rs

use plotters::{
    coord::Shift,
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};

use super::FONT;
use crate::error::Result;

/// Rough advance of one glyph relative to the font size.
const GLYPH_WIDTH: f64 = 0.5;
const LINE_HEIGHT: f64 = 1.3;

/// Greedy word wrap. Explicit newlines start a new paragraph line; words longer
/// than `max_chars` get a line of their own.
pub fn wrap_lines(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    for para in text.lines() {
        let mut current = String::new();
        for word in para.split_whitespace() {
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > max_chars && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Characters per line that fit `width_px` at `font_px`.
pub fn chars_per_line(width_px: u32, font_px: f64) -> usize {
    (f64::from(width_px) / (font_px * GLYPH_WIDTH).max(1.0)).floor() as usize
}

/// Draw `text` wrapped and centred in `area`, starting at the top.
pub fn draw_paragraph<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    text: &str,
    font_px: f64,
    color: &RGBColor,
    bold: bool,
) -> Result<()> {
    let (w, _) = area.dim_in_pixel();
    let font = (FONT, font_px).into_font();
    let font = if bold { font.style(FontStyle::Bold) } else { font };
    let style = TextStyle::from(font)
        .color(color)
        .pos(Pos::new(HPos::Center, VPos::Top));

    let step = (font_px * LINE_HEIGHT).round() as i32;
    for (i, line) in wrap_lines(text, chars_per_line(w, font_px)).iter().enumerate() {
        area.draw_text(line, &style, ((w / 2) as i32, i as i32 * step))?;
    }
    Ok(())
}
