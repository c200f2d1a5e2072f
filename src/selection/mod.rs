//! Geometry and selection over detected items
//!
//! Everything here is pure and synchronous, so it can run directly on the
//! thread that receives detection events:
//! - Rotation inference and corner re-labelling
//! - Focus region and center target overlap tests
//! - Closest-to-center selection
//! - Tap hit-testing

/// Closest-to-center selection and crosshair test
pub mod center;
/// Focus region, crosshair and visibility
pub mod focus;
/// Point-in-quad hit-testing
pub mod hit;
/// Rotation inference and corner re-labelling
pub mod normalize;

pub use center::{is_within_crosshair, select_closest};
pub use focus::{FocusRegion, crosshair_box, is_visible, visible_items};
pub use hit::{hit_test, quad_contains};
pub use normalize::{normalize, rotation_of};
