//! Restricted scanning area and center target.

use crate::models::{AxisAlignedBox, DetectedItem, Point, QuadBounds, Size};
use serde::{Deserialize, Serialize};

/// Total horizontal/vertical margin kept between the focus region and the
/// viewport edges (half on each side).
pub const FOCUS_PADDING: f32 = 40.0;

/// Side length of the square center target, in viewport points
pub const CROSSHAIR_SIZE: f32 = 30.0;

/// Default requested focus region size
pub const DEFAULT_FOCUS_SIZE: Size = Size {
    width: 200.0,
    height: 200.0,
};

/// Sub-rectangle of the viewport inside which detections count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusRegion {
    bounds: AxisAlignedBox,
}

impl FocusRegion {
    /// Center a region of `requested` size in `viewport`, shrinking each side
    /// to fit within `viewport - FOCUS_PADDING`.
    pub fn for_viewport(viewport: Size, requested: Size) -> Self {
        let max_width = (viewport.width - FOCUS_PADDING).max(0.0);
        let max_height = (viewport.height - FOCUS_PADDING).max(0.0);
        let size = Size::new(
            requested.width.clamp(0.0, max_width),
            requested.height.clamp(0.0, max_height),
        );
        Self {
            bounds: AxisAlignedBox::from_center(viewport.center(), size),
        }
    }

    /// The region's four corners
    pub fn corners(&self) -> QuadBounds {
        self.bounds.to_quad()
    }

    /// The region's box, derived from its corners like any detection box
    pub fn to_box(&self) -> AxisAlignedBox {
        self.corners().to_box()
    }

    /// Size after clamping
    pub fn size(&self) -> Size {
        Size::new(self.bounds.width, self.bounds.height)
    }
}

/// Box of the upright form of an item's corners
pub fn item_box(item: &DetectedItem) -> AxisAlignedBox {
    item.bounds.normalized().to_box()
}

/// Whether `item` lies (partly) inside the focus region.
///
/// With no region configured everything is visible. Otherwise the item's
/// upright box must share interior area with the region's box.
pub fn is_visible(item: &DetectedItem, focus: Option<&FocusRegion>) -> bool {
    match focus {
        None => true,
        Some(region) => item_box(item).intersects(&region.to_box()),
    }
}

/// Keep only the items visible through `focus`, preserving order
pub fn visible_items<'a>(
    items: &'a [DetectedItem],
    focus: Option<&FocusRegion>,
) -> Vec<&'a DetectedItem> {
    items.iter().filter(|item| is_visible(item, focus)).collect()
}

/// The fixed center target around `center`
pub fn crosshair_box(center: Point) -> AxisAlignedBox {
    AxisAlignedBox::from_center(center, Size::new(CROSSHAIR_SIZE, CROSSHAIR_SIZE))
}
