//! Rotation inference for reported quads.
//!
//! Detectors label corners relative to the content, so a code held sideways
//! reports its "top-left" somewhere on the left or bottom edge of the screen.
//! Only the four right-angle rotations are distinguished. Quads tilted close
//! to 45 degrees may be classified into either neighbouring rotation; that is
//! an accepted limitation of the heuristic.

use crate::models::{QuadBounds, Rotation};

/// Infer which right-angle rotation the reporting frame used.
///
/// The top edge (top-left to top-right) decides: mostly horizontal means
/// upright or upside down depending on its direction, mostly vertical means a
/// quarter turn, clockwise when the edge points down the screen.
///
/// A zero-area quad has a zero top edge and always lands on
/// [`Rotation::Rotated270`].
pub fn rotation_of(quad: &QuadBounds) -> Rotation {
    let width = quad.top_right - quad.top_left;

    if width.x.abs() > width.y.abs() {
        if width.x > 0.0 {
            Rotation::Upright
        } else {
            Rotation::Rotated180
        }
    } else if width.y > 0.0 {
        Rotation::Rotated90
    } else {
        Rotation::Rotated270
    }
}

/// Re-label the corners of `quad` so they match the viewport's upright axes.
pub fn normalize(quad: &QuadBounds) -> QuadBounds {
    reorient(quad, rotation_of(quad))
}

/// Permute corners for a known rotation
pub fn reorient(quad: &QuadBounds, rotation: Rotation) -> QuadBounds {
    let QuadBounds {
        top_left: tl,
        top_right: tr,
        bottom_left: bl,
        bottom_right: br,
    } = *quad;

    match rotation {
        Rotation::Upright => *quad,
        Rotation::Rotated90 => QuadBounds::new(bl, tl, br, tr),
        Rotation::Rotated180 => QuadBounds::new(br, bl, tr, tl),
        Rotation::Rotated270 => QuadBounds::new(tr, br, tl, bl),
    }
}

impl QuadBounds {
    /// Upright copy of this quad; see [`normalize`]
    pub fn normalized(&self) -> QuadBounds {
        normalize(self)
    }

    /// Inferred rotation; see [`rotation_of`]
    pub fn rotation(&self) -> Rotation {
        rotation_of(self)
    }
}
