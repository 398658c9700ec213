//! SVG builder — the drawing surface, its primitives, and the stateless
//! factory functions that create them.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Affine;

use super::constants::*;
use crate::model::EventKind;

// ═══════════════════════════════════════════════════════════════════════
// Primitives
// ═══════════════════════════════════════════════════════════════════════

/// Stable handle to a primitive appended to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimitiveId(u64);

/// One drawable element.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: String,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: String,
        stroke: String,
    },
}

impl Primitive {
    pub fn is_line(&self) -> bool {
        matches!(self, Primitive::Line { .. })
    }

    pub fn is_circle(&self) -> bool {
        matches!(self, Primitive::Circle { .. })
    }

    fn to_svg_element(&self) -> String {
        match self {
            Primitive::Line { x1, y1, x2, y2, stroke } => format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"/>"#,
                fmt_num(*x1),
                fmt_num(*y1),
                fmt_num(*x2),
                fmt_num(*y2),
                escape_attr(stroke)
            ),
            Primitive::Circle { cx, cy, r, fill, stroke } => format!(
                r#"<circle cx="{}" cy="{}" r="{}" stroke="{}" fill="{}"/>"#,
                fmt_num(*cx),
                fmt_num(*cy),
                fmt_num(*r),
                escape_attr(stroke),
                escape_attr(fill)
            ),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Factory
// ═══════════════════════════════════════════════════════════════════════

/// A blank surface of the given size, not yet attached to any document.
pub fn surface(width: f64, height: f64) -> Surface {
    Surface {
        width,
        height,
        elements: Vec::new(),
        next_id: 0,
        listeners: Vec::new(),
        attached: false,
        screen_ctm: None,
    }
}

/// A straight line; stroke defaults to black.
pub fn line(x1: f64, y1: f64, x2: f64, y2: f64, stroke: Option<&str>) -> Primitive {
    Primitive::Line {
        x1,
        y1,
        x2,
        y2,
        stroke: stroke.unwrap_or(LINE_COLOR).to_string(),
    }
}

/// A filled circle with a black outline; fill defaults to white.
pub fn circle(cx: f64, cy: f64, r: f64, fill: Option<&str>) -> Primitive {
    Primitive::Circle {
        cx,
        cy,
        r,
        fill: fill.unwrap_or(DEFAULT_DOT_FILL).to_string(),
        stroke: DOT_OUTLINE_COLOR.to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Surface
// ═══════════════════════════════════════════════════════════════════════

/// Surface shared between a view and the container it is mounted in.
pub type SurfaceRef = Rc<RefCell<Surface>>;

/// An SVG drawing surface: an ordered list of primitives plus the state the
/// host needs to route pointer events to it.
#[derive(Debug)]
pub struct Surface {
    width: f64,
    height: f64,
    elements: Vec<(PrimitiveId, Primitive)>,
    next_id: u64,
    listeners: Vec<EventKind>,
    attached: bool,
    screen_ctm: Option<Affine>,
}

impl Surface {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn append(&mut self, primitive: Primitive) -> PrimitiveId {
        let id = PrimitiveId(self.next_id);
        self.next_id += 1;
        self.elements.push((id, primitive));
        id
    }

    /// Remove a primitive; returns false if it was not on this surface.
    pub fn remove(&mut self, id: PrimitiveId) -> bool {
        match self.elements.iter().position(|(eid, _)| *eid == id) {
            Some(idx) => {
                self.elements.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.elements.iter().find(|(eid, _)| *eid == id).map(|(_, p)| p)
    }

    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.elements.iter().map(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn listen(&mut self, kind: EventKind) {
        if !self.listeners.contains(&kind) {
            self.listeners.push(kind);
        }
    }

    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.listeners.contains(&kind)
    }

    /// Mark the surface as part of a document, placed at `ctm`.
    pub fn attach(&mut self, ctm: Affine) {
        self.attached = true;
        self.screen_ctm = Some(ctm);
    }

    /// Take the surface out of its document. A detached surface has no
    /// screen transform. Calling this twice is harmless.
    pub fn detach(&mut self) {
        self.attached = false;
        self.screen_ctm = None;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Surface-local → viewport transform, if the surface is laid out.
    pub fn screen_ctm(&self) -> Option<Affine> {
        self.screen_ctm
    }

    /// Hosts call this when the surface is moved or rescaled (e.g. by CSS).
    pub fn set_screen_ctm(&mut self, ctm: Option<Affine>) {
        self.screen_ctm = ctm;
    }

    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="{}" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            SVG_NS,
            fmt_num(self.width),
            fmt_num(self.height),
            fmt_num(self.width),
            fmt_num(self.height)
        );
        svg.push('\n');
        for (_, el) in &self.elements {
            svg.push_str("  ");
            svg.push_str(&el.to_svg_element());
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Formatting helpers
// ═══════════════════════════════════════════════════════════════════════

/// Up to three decimals, trailing zeros dropped.
fn fmt_num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_defaults() {
        assert_eq!(
            line(0.0, 1.0, 2.0, 3.0, None),
            Primitive::Line { x1: 0.0, y1: 1.0, x2: 2.0, y2: 3.0, stroke: "black".into() }
        );
        match circle(5.0, 5.0, 2.0, None) {
            Primitive::Circle { fill, stroke, .. } => {
                assert_eq!(fill, "white");
                assert_eq!(stroke, "black");
            }
            other => panic!("expected circle, got {:?}", other),
        }
    }

    #[test]
    fn remove_is_by_id_and_reports_misses() {
        let mut s = surface(10.0, 10.0);
        let a = s.append(line(0.0, 0.0, 1.0, 1.0, None));
        let b = s.append(circle(1.0, 1.0, 1.0, Some("red")));
        assert!(s.remove(a));
        assert!(!s.remove(a));
        assert_eq!(s.len(), 1);
        assert!(s.get(b).is_some_and(Primitive::is_circle));
    }

    #[test]
    fn detach_drops_the_transform() {
        let mut s = surface(10.0, 10.0);
        assert!(s.screen_ctm().is_none());
        s.attach(Affine::IDENTITY);
        assert!(s.is_attached());
        assert_eq!(s.screen_ctm(), Some(Affine::IDENTITY));
        s.detach();
        s.detach();
        assert!(!s.is_attached());
        assert!(s.screen_ctm().is_none());
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(200.0), "200");
        assert_eq!(fmt_num(33.333333), "33.333");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(37.5), "37.5");
    }

    #[test]
    fn attribute_values_are_escaped() {
        let mut s = surface(10.0, 10.0);
        s.append(circle(1.0, 1.0, 1.0, Some("\"><script>")));
        let svg = s.to_svg();
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&quot;&gt;&lt;script&gt;"));
    }
}
