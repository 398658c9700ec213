//! Data model for fretboard diagrams.
//!
//! Options describe what to draw, `FretCoord` names a logical position on
//! the neck, and `PointerEvent` is what the host feeds back in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Configuration for a fretboard diagram.
///
/// Every field has a default, so JSON input only needs the keys it wants to
/// override. Keys use the camelCase spelling (`startFret`, `stringNames`, ...).
#[derive(Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FretboardOptions {
    /// Canvas width in SVG user units
    pub width: f64,
    /// Canvas height in SVG user units
    pub height: f64,
    /// First visible fret (0 = the nut is the top edge)
    pub start_fret: u32,
    /// Last visible fret, inclusive
    pub end_fret: u32,
    /// One label per string; its length is the string count.
    /// Listed from string 1 (highest pitch) downward.
    pub string_names: Vec<String>,
    /// Static markers drawn at construction
    pub dots: Vec<Dot>,
    /// Fill for static dots that carry no color of their own
    pub dot_color: String,
    /// Fill for the pointer-tracking dot
    pub hover_dot_color: String,
    /// Accepted for compatibility; labels are not rendered.
    pub show_fret_nums: bool,
    /// Accepted for compatibility; labels are not rendered.
    pub show_string_names: bool,
    /// Track the pointer with a live dot
    pub draw_dot_on_hover: bool,
    /// Called with the resolved coordinate on every click
    #[serde(skip)]
    pub on_click: Option<ClickHandler>,
}

impl Default for FretboardOptions {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 300.0,
            start_fret: 0,
            end_fret: 4,
            string_names: "EBGDAE".chars().map(String::from).collect(),
            dots: Vec::new(),
            dot_color: "white".into(),
            hover_dot_color: "white".into(),
            show_fret_nums: true,
            show_string_names: false,
            draw_dot_on_hover: false,
            on_click: None,
        }
    }
}

impl FretboardOptions {
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_frets(mut self, start_fret: u32, end_fret: u32) -> Self {
        self.start_fret = start_fret;
        self.end_fret = end_fret;
        self
    }

    pub fn with_string_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.string_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dot(mut self, dot: Dot) -> Self {
        self.dots.push(dot);
        self
    }

    /// Enable the hover dot, filled with `color`.
    pub fn with_hover_dot(mut self, color: &str) -> Self {
        self.draw_dot_on_hover = true;
        self.hover_dot_color = color.to_string();
        self
    }

    pub fn on_click<F>(mut self, f: F) -> Self
    where
        F: FnMut(FretCoord) + 'static,
    {
        self.on_click = Some(ClickHandler::new(f));
        self
    }
}

/// A static marker at a fretboard position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    pub string: u32,
    pub fret: u32,
    /// Falls back to `FretboardOptions::dot_color` when absent
    #[serde(default)]
    pub color: Option<String>,
}

impl Dot {
    pub fn new(string: u32, fret: u32) -> Self {
        Self { string, fret, color: None }
    }

    pub fn colored(string: u32, fret: u32, color: &str) -> Self {
        Self { string, fret, color: Some(color.to_string()) }
    }
}

/// A logical position on the neck.
///
/// String 1 is the rightmost drawn string; fret 0 is the open string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FretCoord {
    pub string: u32,
    pub fret: u32,
}

impl FretCoord {
    pub fn new(string: u32, fret: u32) -> Self {
        Self { string, fret }
    }
}

/// Caller-supplied click callback.
pub struct ClickHandler(Box<dyn FnMut(FretCoord)>);

impl ClickHandler {
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut(FretCoord) + 'static,
    {
        Self(Box::new(f))
    }

    pub(crate) fn call(&mut self, coord: FretCoord) {
        (self.0)(coord)
    }
}

impl fmt::Debug for ClickHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClickHandler(..)")
    }
}

/// Event kinds a surface can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    Click,
}

/// A pointer event in viewport coordinates, as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: EventKind,
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerEvent {
    pub fn pointer_move(client_x: f64, client_y: f64) -> Self {
        Self { kind: EventKind::PointerMove, client_x, client_y }
    }

    pub fn click(client_x: f64, client_y: f64) -> Self {
        Self { kind: EventKind::Click, client_x, client_y }
    }
}
