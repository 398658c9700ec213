//! Pointer → surface-local coordinate transform.

use kurbo::Point;

use super::svg_builder::Surface;
use crate::error::{FretboardError, Result};
use crate::model::PointerEvent;

/// Map a pointer's viewport position into `surface`'s own coordinate space,
/// undoing whatever translation/scaling the host applied to it.
///
/// Fails with `TransformUnavailable` when the surface has no screen
/// transform (not attached) or the transform cannot be inverted.
pub fn cursor_point(surface: &Surface, event: &PointerEvent) -> Result<Point> {
    let ctm = surface.screen_ctm().ok_or_else(|| {
        FretboardError::TransformUnavailable(
            "surface has no screen transform (is it attached to a document?)".into(),
        )
    })?;

    let det = ctm.determinant();
    if det == 0.0 || !det.is_finite() {
        return Err(FretboardError::TransformUnavailable(format!(
            "screen transform {:?} is not invertible",
            ctm.as_coeffs()
        )));
    }

    Ok(ctm.inverse() * Point::new(event.client_x, event.client_y))
}
