// ─────────────────────────────────────────────────────────────────────
// KSTAR Surrogate Sim — Device Wall
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! KSTAR first-wall contour, static device data.
//!
//! Counterpart of the `Rwalls`/`Zwalls` arrays imported from
//! `common/wall.py`. Ordered (R, Z) ring, up-down symmetric, starting at
//! the inboard midplane and running over the top of the machine.

/// First-wall vertex ring [m].
pub const WALL: [(f64, f64); 30] = [
    (1.265, 0.000),
    (1.265, 0.600),
    (1.265, 0.900),
    (1.290, 1.050),
    (1.350, 1.180),
    (1.450, 1.270),
    (1.580, 1.330),
    (1.730, 1.350),
    (1.890, 1.320),
    (2.030, 1.230),
    (2.150, 1.090),
    (2.240, 0.900),
    (2.295, 0.680),
    (2.320, 0.420),
    (2.330, 0.140),
    (2.330, -0.140),
    (2.320, -0.420),
    (2.295, -0.680),
    (2.240, -0.900),
    (2.150, -1.090),
    (2.030, -1.230),
    (1.890, -1.320),
    (1.730, -1.350),
    (1.580, -1.330),
    (1.450, -1.270),
    (1.350, -1.180),
    (1.290, -1.050),
    (1.265, -0.900),
    (1.265, -0.600),
    (1.265, 0.000),
];

pub fn wall_outline() -> &'static [(f64, f64)] {
    &WALL
}

/// Innermost wall radius [m]. Python: `np.min(Rwalls)`.
pub fn wall_min_r() -> f64 {
    WALL.iter().map(|p| p.0).fold(f64::INFINITY, f64::min)
}

/// Lowest wall elevation [m]. Python: `np.min(Zwalls)`.
pub fn wall_min_z() -> f64 {
    WALL.iter().map(|p| p.1).fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kstar_math::polygon::point_in_polygon;

    #[test]
    fn test_extents() {
        assert!((wall_min_r() - 1.265).abs() < 1e-12);
        assert!((wall_min_z() + 1.350).abs() < 1e-12);
    }

    #[test]
    fn test_up_down_symmetric() {
        for &(r, z) in WALL.iter() {
            let mirrored = WALL
                .iter()
                .any(|&(rm, zm)| (rm - r).abs() < 1e-12 && (zm + z).abs() < 1e-12);
            assert!(mirrored, "no mirror vertex for ({r}, {z})");
        }
    }

    #[test]
    fn test_plasma_axis_inside() {
        assert!(point_in_polygon(1.8, 0.0, &WALL));
        assert!(point_in_polygon(1.45, -1.0, &WALL));
        assert!(!point_in_polygon(2.5, 0.0, &WALL));
        assert!(!point_in_polygon(1.0, 0.0, &WALL));
    }
}
