use crate::models::{DetectedItem, Point, QuadBounds};

/// Even-odd test of `p` against the quad's outline (TL, TR, BR, BL).
///
/// Works for any simple quad, convex or not. Points exactly on an edge may
/// land on either side.
pub fn quad_contains(quad: &QuadBounds, p: Point) -> bool {
    let corners = quad.corners_clockwise();
    let mut inside = false;
    let mut j = corners.len() - 1;
    for i in 0..corners.len() {
        let a = corners[i];
        let b = corners[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Index of the item under `p`, hit-testing each item's upright quad.
///
/// Later items are drawn on top, so they win when quads overlap.
pub fn hit_test(items: &[DetectedItem], p: Point) -> Option<usize> {
    items
        .iter()
        .rposition(|item| quad_contains(&item.bounds.normalized(), p))
}
