//! Layout computation — derives the neck geometry from the options and maps
//! between logical fretboard positions and surface pixels.

use kurbo::Point;

use super::constants::*;
use crate::error::{FretboardError, Result};
use crate::model::{FretCoord, FretboardOptions};

// ═══════════════════════════════════════════════════════════════════════
// Layout structure
// ═══════════════════════════════════════════════════════════════════════

/// Geometry of one fretboard diagram. Computed once from validated
/// options and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FretboardLayout {
    pub width: f64,
    pub height: f64,
    pub start_fret: u32,
    pub end_fret: u32,
    pub num_strings: u32,
    pub num_frets: u32,
    pub x_margin: f64,
    pub y_margin: f64,
    pub neck_width: f64,
    pub neck_height: f64,
    pub fret_height: f64,
    pub string_margin: f64,
    pub dot_radius: f64,
}

/// Number of fret cells drawn for a range. A range starting at the nut
/// draws fret 0 as the top edge rather than as a cell of its own.
pub fn fret_count(start_fret: u32, end_fret: u32) -> u32 {
    let offset = if start_fret == 0 { 0 } else { 1 };
    end_fret.saturating_sub(start_fret) + offset
}

impl FretboardLayout {
    pub fn compute(opts: &FretboardOptions) -> Result<Self> {
        validate(opts)?;

        let num_strings = opts.string_names.len() as u32;
        let num_frets = fret_count(opts.start_fret, opts.end_fret);

        let width = opts.width;
        let height = opts.height;
        let x_margin = width / num_strings as f64;
        let y_margin = height / Y_MARGIN_DIVISOR;
        let neck_width = width - x_margin * 2.0;
        let neck_height = height - y_margin * 2.0;
        let fret_height = neck_height / num_frets as f64;
        let string_margin = neck_width / (num_strings - 1) as f64;
        let dot_radius = fret_height / DOT_RADIUS_DIVISOR;

        Ok(Self {
            width,
            height,
            start_fret: opts.start_fret,
            end_fret: opts.end_fret,
            num_strings,
            num_frets,
            x_margin,
            y_margin,
            neck_width,
            neck_height,
            fret_height,
            string_margin,
            dot_radius,
        })
    }

    /// Pixel center of a dot at `(string, fret)`.
    pub fn fret_coord(&self, string: u32, fret: u32) -> Point {
        let string_offset = (string as f64 - self.num_strings as f64).abs();

        let x = string_offset * self.string_margin + self.x_margin;
        let mut y = (fret as f64 * self.fret_height - self.fret_height / 2.0) + self.y_margin;

        // open-string dots sit closer to the nut
        if fret == 0 {
            y += self.fret_height / OPEN_DOT_NUDGE_DIVISOR;
        }

        Point::new(x, y)
    }

    /// Radius of a dot drawn on `fret`.
    pub fn dot_radius_for(&self, fret: u32) -> f64 {
        if fret == 0 {
            self.dot_radius - self.dot_radius * OPEN_DOT_SHRINK
        } else {
            self.dot_radius
        }
    }

    /// Nearest fretboard position to a point in surface space.
    ///
    /// The result is always inside `[1, num_strings]` × `[start_fret, end_fret]`,
    /// however far off the canvas the point lies.
    pub fn closest_fret_coord_at(&self, point: Point) -> FretCoord {
        let x = point.x - self.x_margin;
        let y = point.y - self.y_margin + self.fret_height / 2.0;

        // clamp before leaving f64 so infinite or huge inputs cannot overflow
        let n = self.num_strings as f64;
        let string = (round_half_up(x / self.string_margin) - n)
            .abs()
            .clamp(1.0, n);

        let fret = round_half_up(y / self.fret_height)
            .clamp(self.start_fret as f64, self.end_fret as f64);

        FretCoord::new(string as u32, fret as u32)
    }

    /// x of the `i`-th drawn string line, counted from the left.
    pub(super) fn string_x(&self, i: u32) -> f64 {
        i as f64 * self.string_margin + self.x_margin
    }

    /// y of the `i`-th fret boundary, counted from the top.
    pub(super) fn fret_y(&self, i: u32) -> f64 {
        i as f64 * self.fret_height + self.y_margin
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Helper functions
// ═══════════════════════════════════════════════════════════════════════

fn validate(opts: &FretboardOptions) -> Result<()> {
    if !(opts.width.is_finite() && opts.width > 0.0) {
        return Err(FretboardError::InvalidConfiguration(format!(
            "width must be a positive number, got {}",
            opts.width
        )));
    }
    if !(opts.height.is_finite() && opts.height > 0.0) {
        return Err(FretboardError::InvalidConfiguration(format!(
            "height must be a positive number, got {}",
            opts.height
        )));
    }
    if opts.string_names.len() < 2 {
        return Err(FretboardError::InvalidConfiguration(format!(
            "at least 2 strings are required, got {}",
            opts.string_names.len()
        )));
    }
    if opts.end_fret < opts.start_fret {
        return Err(FretboardError::InvalidConfiguration(format!(
            "end fret {} is before start fret {}",
            opts.end_fret, opts.start_fret
        )));
    }
    if fret_count(opts.start_fret, opts.end_fret) == 0 {
        return Err(FretboardError::InvalidConfiguration(
            "fret range 0..0 has no frets to draw".into(),
        ));
    }

    let colors = [("dotColor", &opts.dot_color), ("hoverDotColor", &opts.hover_dot_color)];
    for (field, color) in colors {
        check_color(field, color)?;
    }
    for dot in &opts.dots {
        if let Some(ref color) = dot.color {
            check_color("dots[].color", color)?;
        }
    }
    Ok(())
}

/// Colors end up in SVG attributes; control characters would make the
/// document invalid XML.
fn check_color(field: &str, color: &str) -> Result<()> {
    if color.chars().any(char::is_control) {
        return Err(FretboardError::InvalidConfiguration(format!(
            "{field} contains control characters: {color:?}"
        )));
    }
    Ok(())
}

/// Round with `.5` going toward +∞, so -2.5 → -2 and 2.5 → 3.
/// NaN rounds to 0; infinities stay infinite.
fn round_half_up(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        (v + 0.5).floor()
    }
}
