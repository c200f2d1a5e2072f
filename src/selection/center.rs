use super::focus::{crosshair_box, item_box};
use crate::models::{DetectedItem, Point};

/// Pick the item whose raw center is closest to `viewport_center`.
///
/// The center is the midpoint of the reported top-left and bottom-right
/// corners, which is rotation independent. On ties the earliest item wins.
pub fn select_closest<'a, I>(items: I, viewport_center: Point) -> Option<&'a DetectedItem>
where
    I: IntoIterator<Item = &'a DetectedItem>,
{
    items.into_iter().min_by(|a, b| {
        let da = a.bounds.raw_center().distance_squared(&viewport_center);
        let db = b.bounds.raw_center().distance_squared(&viewport_center);
        da.total_cmp(&db)
    })
}

/// Whether the item's upright box overlaps the center target
pub fn is_within_crosshair(item: &DetectedItem, viewport_center: Point) -> bool {
    item_box(item).intersects(&crosshair_box(viewport_center))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemId, QuadBounds};

    fn item_centered(id: u64, cx: f32, cy: f32) -> DetectedItem {
        DetectedItem::text(
            ItemId(id),
            QuadBounds::from_rect(cx - 10.0, cy - 10.0, 20.0, 20.0),
            format!("item {id}"),
        )
    }

    #[test]
    fn test_empty_selects_nothing() {
        let items: Vec<DetectedItem> = Vec::new();
        assert!(select_closest(&items, Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_picks_minimum_distance() {
        let center = Point::new(100.0, 100.0);
        let items = vec![
            item_centered(1, 105.0, 100.0),
            item_centered(2, 100.0, 102.0),
            item_centered(3, 100.0, 92.0),
        ];
        assert_eq!(select_closest(&items, center).map(|i| i.id), Some(ItemId(2)));
    }

    #[test]
    fn test_tie_goes_to_first() {
        let center = Point::new(0.0, 0.0);
        let items = vec![
            item_centered(7, 3.0, 4.0),
            item_centered(8, -4.0, 3.0),
            item_centered(9, 50.0, 50.0),
        ];
        assert_eq!(select_closest(&items, center).map(|i| i.id), Some(ItemId(7)));
    }

    #[test]
    fn test_uses_raw_corners() {
        // Reported upside down: raw top-left/bottom-right are swapped but the
        // midpoint is unchanged.
        let upside_down = DetectedItem::text(
            ItemId(1),
            QuadBounds::from_rect(60.0, 60.0, -20.0, -20.0),
            "flipped",
        );
        let far = item_centered(2, 80.0, 80.0);
        let items = [far, upside_down];
        let picked = select_closest(&items, Point::new(50.0, 50.0));
        assert_eq!(picked.map(|i| i.id), Some(ItemId(1)));
    }

    #[test]
    fn test_center_scenario() {
        let center = Point::new(100.0, 100.0);
        let a = item_centered(1, 100.0, 100.0);
        let b = item_centered(2, 200.0, 200.0);
        let items = [a.clone(), b.clone()];
        assert_eq!(select_closest(&items, center), Some(&a));
        assert!(is_within_crosshair(&a, center));
        assert!(!is_within_crosshair(&b, center));
    }

    #[test]
    fn test_crosshair_edge_touch_is_not_centered() {
        // Box spans 115..135, crosshair spans 85..115.
        let touching = item_centered(1, 125.0, 100.0);
        assert!(!is_within_crosshair(&touching, Point::new(100.0, 100.0)));
    }
}
