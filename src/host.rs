//! Host document abstraction.
//!
//! A `Container` is anything a fretboard can be mounted into. `Document` is
//! the in-memory host used for headless rendering, the FFI, and tests: it
//! lays every surface out at the viewport origin with no scaling.

use kurbo::Affine;

use crate::renderer::SurfaceRef;

/// Something that can accept an appended drawing surface.
pub trait Container {
    fn append_surface(&mut self, surface: SurfaceRef);
}

/// A minimal document holding mounted surfaces in mount order.
#[derive(Debug, Default)]
pub struct Document {
    surfaces: Vec<SurfaceRef>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surfaces still attached, in mount order.
    pub fn surfaces(&self) -> impl Iterator<Item = &SurfaceRef> {
        self.surfaces.iter().filter(|s| s.borrow().is_attached())
    }

    /// Serialize every attached surface, one `<svg>` after another.
    pub fn render(&self) -> String {
        self.surfaces().map(|s| s.borrow().to_svg()).collect()
    }
}

impl Container for Document {
    fn append_surface(&mut self, surface: SurfaceRef) {
        surface.borrow_mut().attach(Affine::IDENTITY);
        // detached surfaces are pruned lazily on the next mount
        self.surfaces.retain(|s| s.borrow().is_attached());
        self.surfaces.push(surface);
    }
}
