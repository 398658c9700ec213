//! Shared constants for the fretboard renderer (all in SVG user units).

// ── Layout ratios ───────────────────────────────────────────────────
pub(super) const Y_MARGIN_DIVISOR: f64 = 8.0; // height / 8 above and below the neck
pub(super) const DOT_RADIUS_DIVISOR: f64 = 6.0; // fret height / 6
pub(super) const OPEN_DOT_SHRINK: f64 = 0.25; // open-string dots lose a quarter of their radius
pub(super) const OPEN_DOT_NUDGE_DIVISOR: f64 = 5.0; // open dots sit fret_height / 5 closer to the nut

// ── Colors ──────────────────────────────────────────────────────────
pub(super) const LINE_COLOR: &str = "black";
pub(super) const DOT_OUTLINE_COLOR: &str = "black";
pub(super) const DEFAULT_DOT_FILL: &str = "white";

pub(super) const SVG_NS: &str = "http://www.w3.org/2000/svg";
