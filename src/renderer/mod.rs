//! Fretboard renderer — builds the SVG surface for a fretboard diagram and
//! keeps it in sync with pointer input.
//!
//! Layout is computed once from the options. Static strings, frets and dots
//! are drawn at construction; afterwards only the hover dot changes.

mod constants;
mod layout;
mod svg_builder;
mod transform;

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use log::{debug, trace};

use crate::error::Result;
use crate::host::{Container, Document};
use crate::model::*;

pub use layout::{fret_count, FretboardLayout};
pub use svg_builder::{circle, line, surface, Primitive, PrimitiveId, Surface, SurfaceRef};
pub use transform::cursor_point;

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Render a fretboard with no interactivity straight to an SVG string.
pub fn render_fretboard_to_svg(opts: FretboardOptions) -> Result<String> {
    let mut doc = Document::new();
    let view = FretboardView::new(&mut doc, opts)?;
    Ok(view.to_svg())
}

/// An interactive fretboard diagram mounted in a host container.
#[derive(Debug)]
pub struct FretboardView {
    opts: FretboardOptions,
    layout: FretboardLayout,
    surface: SurfaceRef,
    /// The live hover dot and the coordinate it was drawn for
    hover: Option<(PrimitiveId, FretCoord)>,
}

impl FretboardView {
    /// Validate `opts`, draw the diagram and append it to `container`.
    ///
    /// Nothing is drawn or mounted if the options are invalid.
    pub fn new<C: Container + ?Sized>(container: &mut C, opts: FretboardOptions) -> Result<Self> {
        let layout = FretboardLayout::compute(&opts)?;
        debug!(
            "fretboard {}x{}: {} strings, frets {}..={} ({} cells), fret height {:.2}",
            layout.width,
            layout.height,
            layout.num_strings,
            layout.start_fret,
            layout.end_fret,
            layout.num_frets,
            layout.fret_height
        );

        let mut svg = surface(layout.width, layout.height);
        add_strings(&mut svg, &layout);
        add_frets(&mut svg, &layout);
        for dot in &opts.dots {
            let color = dot.color.as_deref().unwrap_or(&opts.dot_color);
            svg.append(make_dot(&layout, dot.string, dot.fret, color));
        }

        if opts.draw_dot_on_hover {
            svg.listen(EventKind::PointerMove);
        }
        if opts.on_click.is_some() {
            svg.listen(EventKind::Click);
        }

        let surface = Rc::new(RefCell::new(svg));
        container.append_surface(Rc::clone(&surface));

        Ok(Self { opts, layout, surface, hover: None })
    }

    pub fn num_strings(&self) -> u32 {
        self.layout.num_strings
    }

    pub fn num_frets(&self) -> u32 {
        self.layout.num_frets
    }

    pub fn layout(&self) -> &FretboardLayout {
        &self.layout
    }

    pub fn options(&self) -> &FretboardOptions {
        &self.opts
    }

    pub fn surface(&self) -> &SurfaceRef {
        &self.surface
    }

    /// Coordinate currently marked by the hover dot, if any.
    pub fn hover_coord(&self) -> Option<FretCoord> {
        self.hover.map(|(_, coord)| coord)
    }

    pub fn to_svg(&self) -> String {
        self.surface.borrow().to_svg()
    }

    /// Pixel center of a dot at `(string, fret)`.
    pub fn fret_coord(&self, string: u32, fret: u32) -> Point {
        self.layout.fret_coord(string, fret)
    }

    /// A dot primitive for `(string, fret)`; not appended to the surface.
    pub fn make_dot(&self, string: u32, fret: u32, color: &str) -> Primitive {
        make_dot(&self.layout, string, fret, color)
    }

    /// Fretboard position under a pointer event.
    pub fn closest_fret_coord(&self, event: &PointerEvent) -> Result<FretCoord> {
        let point = cursor_point(&self.surface.borrow(), event)?;
        Ok(self.layout.closest_fret_coord_at(point))
    }

    /// Host entry point. Events of a kind the view did not register for are
    /// ignored and yield `Ok(None)`.
    pub fn dispatch(&mut self, event: &PointerEvent) -> Result<Option<FretCoord>> {
        if !self.surface.borrow().is_listening(event.kind) {
            return Ok(None);
        }
        let coord = match event.kind {
            EventKind::PointerMove => self.handle_pointer_move(event)?,
            EventKind::Click => self.handle_click(event)?,
        };
        Ok(Some(coord))
    }

    /// Move the hover dot to the position under the pointer. Redraws only
    /// when that position changes.
    pub fn handle_pointer_move(&mut self, event: &PointerEvent) -> Result<FretCoord> {
        let coord = self.closest_fret_coord(event)?;
        if self.hover_coord() == Some(coord) {
            return Ok(coord);
        }

        let dot = make_dot(&self.layout, coord.string, coord.fret, &self.opts.hover_dot_color);
        let mut surface = self.surface.borrow_mut();
        if let Some((prev, _)) = self.hover.take() {
            surface.remove(prev);
        }
        let id = surface.append(dot);
        trace!("hover dot moved to string {} fret {}", coord.string, coord.fret);

        self.hover = Some((id, coord));
        Ok(coord)
    }

    /// Resolve the clicked position and hand it to `on_click`.
    pub fn handle_click(&mut self, event: &PointerEvent) -> Result<FretCoord> {
        let coord = self.closest_fret_coord(event)?;
        if let Some(handler) = self.opts.on_click.as_mut() {
            handler.call(coord);
        }
        Ok(coord)
    }

    /// Detach the diagram from its document. Safe to call more than once.
    pub fn remove(&self) {
        let mut surface = self.surface.borrow_mut();
        if surface.is_attached() {
            debug!("removing fretboard surface ({} primitives)", surface.len());
        }
        surface.detach();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Drawing helpers
// ═══════════════════════════════════════════════════════════════════════

fn add_strings(svg: &mut Surface, layout: &FretboardLayout) {
    let y1 = layout.y_margin;
    let y2 = layout.y_margin + layout.neck_height;
    for i in 0..layout.num_strings {
        let x = layout.string_x(i);
        svg.append(line(x, y1, x, y2, None));
    }
}

fn add_frets(svg: &mut Surface, layout: &FretboardLayout) {
    let x1 = layout.x_margin;
    let x2 = layout.width - layout.x_margin;
    for i in 0..=layout.num_frets {
        let y = layout.fret_y(i);
        svg.append(line(x1, y, x2, y, None));
    }
}

fn make_dot(layout: &FretboardLayout, string: u32, fret: u32, color: &str) -> Primitive {
    let center = layout.fret_coord(string, fret);
    circle(center.x, center.y, layout.dot_radius_for(fret), Some(color))
}
