//! Canonical corner ordering for picked quads.

use crate::Quad;
use nalgebra::Point2;

/// Reorder four picked points into `[TL, TR, BR, BL]`, independent of click order.
///
/// Points are sorted by angle around their centroid, then rotated so the
/// sequence starts at the point with the smallest `x + y`. In y-down screen
/// coordinates that is the top-left-most point and the traversal runs
/// clockwise on screen, matching [`crate::SourceRect::corners`].
///
/// The start corner is chosen by position, not by identity. Once a quad is
/// rotated by more than about 45° the point with the smallest `x + y` is a
/// different corner, so a fit reports the rotation shifted by a quarter turn
/// and its x and y scales swapped. Self-intersecting or reflex quads are
/// outside what the heuristic handles; the result is still a permutation of
/// the input.
pub fn order_quad(points: &Quad) -> Quad {
    let c = points.centroid();
    let angle = |p: &Point2<f64>| (p.y - c.y).atan2(p.x - c.x);

    let mut sorted = points.0;
    sorted.sort_by(|p, q| angle(p).total_cmp(&angle(q)));

    // first minimum wins on ties
    let start = sorted
        .iter()
        .enumerate()
        .min_by(|(_, p), (_, q)| (p.x + p.y).total_cmp(&(q.x + q.y)))
        .map_or(0, |(i, _)| i);
    sorted.rotate_left(start);

    Quad(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(pts: [(f64, f64); 4]) -> Quad {
        Quad(pts.map(|(x, y)| Point2::new(x, y)))
    }

    #[test]
    fn axis_aligned_rect_in_any_order() {
        let expected = quad([(10.0, 20.0), (50.0, 20.0), (50.0, 40.0), (10.0, 40.0)]);
        let shuffles = [
            [2, 0, 3, 1],
            [3, 2, 1, 0],
            [1, 2, 3, 0],
            [0, 3, 2, 1],
        ];
        for idx in shuffles {
            let picked = Quad(idx.map(|i| expected.0[i]));
            assert_eq!(order_quad(&picked), expected, "order {idx:?}");
        }
    }

    #[test]
    fn perspective_quad_starts_top_left() {
        // storefront seen from the left: right edge shorter than left
        let picked = quad([(400.0, 260.0), (90.0, 100.0), (410.0, 150.0), (80.0, 330.0)]);
        let ordered = order_quad(&picked);
        assert_eq!(ordered.0[0], Point2::new(90.0, 100.0));
        assert_eq!(ordered.0[1], Point2::new(410.0, 150.0));
        assert_eq!(ordered.0[2], Point2::new(400.0, 260.0));
        assert_eq!(ordered.0[3], Point2::new(80.0, 330.0));
    }

    #[test]
    fn coincident_points_keep_all_four() {
        let p = Point2::new(3.0, 3.0);
        let ordered = order_quad(&Quad([p; 4]));
        assert_eq!(ordered, Quad([p; 4]));
    }
}
