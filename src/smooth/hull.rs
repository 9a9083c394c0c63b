//! Convex hulls (Andrew's monotone chain).

use crate::geometry::Point;

/// Convex hull of the finite points, counter-clockwise, without repeating
/// the first vertex. Collinear points on the boundary are dropped.
///
/// Fewer than three distinct points come back as they are (deduplicated).
#[must_use]
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut pts: Vec<Point> = points.iter().copied().filter(|p| p.is_finite()).collect();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<Point> = Vec::with_capacity(2 * pts.len());
    for &p in &pts {
        while hull.len() >= 2 && hull[hull.len() - 2].cross(hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower && hull[hull.len() - 2].cross(hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

/// Mean of the vertices.
#[must_use]
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_with_interior_points() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(0.5, 0.5),
            Point::new(1.0, 0.0),
            Point::new(0.2, 0.8),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(0.5, 0.0),
        ];
        let hull = convex_hull(&pts);
        assert_eq!(
            hull,
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0), Point::new(0.0, 1.0)]
        );
    }

    #[test]
    fn test_counter_clockwise() {
        let pts = [Point::new(2.0, 0.0), Point::new(0.0, 0.0), Point::new(1.0, 3.0)];
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 3);
        assert!(hull[0].cross(hull[1], hull[2]) > 0.0);
    }

    #[test]
    fn test_degenerate() {
        assert!(convex_hull(&[]).is_empty());
        let same = [Point::new(1.0, 1.0); 3];
        assert_eq!(convex_hull(&same), vec![Point::new(1.0, 1.0)]);
        let nan = [Point::new(f64::NAN, 0.0), Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        assert_eq!(convex_hull(&nan).len(), 2);
    }

    #[test]
    fn test_collinear_collapses_to_ends() {
        let pts = [Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        assert_eq!(convex_hull(&pts), vec![Point::new(0.0, 0.0), Point::new(2.0, 2.0)]);
    }

    #[test]
    fn test_centroid() {
        let c = centroid(&[Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(2.0, 2.0), Point::new(0.0, 2.0)]);
        assert_eq!(c, Some(Point::new(1.0, 1.0)));
        assert!(centroid(&[]).is_none());
    }
}
