//! Even-odd point-in-polygon test against the vessel wall contour.
//!
//! Counterpart of `matplotlib.path.Path.contains_points` as used by
//! `plotHeatLoads` to clip strike-line extrapolations to the vessel.

/// Ray-casting even-odd containment test.
///
/// `poly` is an ordered vertex ring; the closing edge from the last back
/// to the first vertex is implied, so both open and pre-closed rings work.
pub fn point_in_polygon(r: f64, z: f64, poly: &[(f64, f64)]) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (ri, zi) = poly[i];
        let (rj, zj) = poly[j];
        if (zi > z) != (zj > z) {
            let r_cross = (rj - ri) * (z - zi) / (zj - zi) + ri;
            if r < r_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Retain only the points inside the polygon, preserving order.
pub fn clip_to_polygon(points: &[(f64, f64)], poly: &[(f64, f64)]) -> Vec<(f64, f64)> {
    points
        .iter()
        .copied()
        .filter(|&(r, z)| point_in_polygon(r, z, poly))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<(f64, f64)> {
        vec![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]
    }

    #[test]
    fn test_square_inside_outside() {
        let poly = square();
        assert!(point_in_polygon(1.0, 1.0, &poly));
        assert!(!point_in_polygon(3.0, 1.0, &poly));
        assert!(!point_in_polygon(-0.5, 1.0, &poly));
        assert!(!point_in_polygon(1.0, 2.5, &poly));
    }

    #[test]
    fn test_closed_ring_equivalent() {
        let mut poly = square();
        poly.push(poly[0]);
        assert!(point_in_polygon(0.5, 0.5, &poly));
        assert!(!point_in_polygon(2.5, 0.5, &poly));
    }

    #[test]
    fn test_concave_polygon() {
        // U-shape: the notch between the prongs is outside.
        let poly = vec![
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 3.0),
            (2.0, 3.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ];
        assert!(point_in_polygon(0.5, 2.0, &poly));
        assert!(point_in_polygon(2.5, 2.0, &poly));
        assert!(!point_in_polygon(1.5, 2.0, &poly));
        assert!(point_in_polygon(1.5, 0.5, &poly));
    }

    #[test]
    fn test_degenerate_polygon_rejects_all() {
        assert!(!point_in_polygon(0.0, 0.0, &[]));
        assert!(!point_in_polygon(0.0, 0.0, &[(0.0, 0.0), (1.0, 1.0)]));
    }

    #[test]
    fn test_clip_preserves_order() {
        let poly = square();
        let pts = vec![(0.5, 0.5), (5.0, 5.0), (1.5, 1.5), (-1.0, 0.0)];
        let kept = clip_to_polygon(&pts, &poly);
        assert_eq!(kept, vec![(0.5, 0.5), (1.5, 1.5)]);
    }
}
