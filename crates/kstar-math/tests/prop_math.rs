// ─────────────────────────────────────────────────────────────────────
// KSTAR Surrogate Sim — Property-Based Tests (proptest) for kstar-math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for kstar-math using proptest.
//!
//! Covers: interpolant exactness on polynomials of matching degree,
//! support-point reproduction, linspace structure, and point-in-polygon
//! consistency on convex rings.

use kstar_math::interp::{linspace, Extrapolant1d, FitOrder};
use kstar_math::polygon::point_in_polygon;
use proptest::prelude::*;

// ── Interpolant Properties ───────────────────────────────────────────

proptest! {
    /// A linear interpolant reproduces any affine function everywhere,
    /// including far outside the data.
    #[test]
    fn linear_exact_on_affine(
        slope in -5.0f64..5.0,
        intercept in -5.0f64..5.0,
        query in -20.0f64..20.0,
    ) {
        let xs = [0.0, 0.7, 1.1, 2.3, 3.0];
        let ys: Vec<f64> = xs.iter().map(|x| slope * x + intercept).collect();
        let f = Extrapolant1d::fit(&xs, &ys, FitOrder::Linear).unwrap();
        let expected = slope * query + intercept;
        prop_assert!((f.eval(query) - expected).abs() < 1e-9,
            "f({query}) = {}, expected {expected}", f.eval(query));
    }

    /// A quadratic interpolant reproduces any quadratic everywhere.
    #[test]
    fn quadratic_exact_on_quadratic(
        a in -2.0f64..2.0,
        b in -3.0f64..3.0,
        c in -3.0f64..3.0,
        query in -10.0f64..10.0,
    ) {
        let xs = [0.0, 0.5, 1.0, 1.5, 2.0, 2.5];
        let ys: Vec<f64> = xs.iter().map(|x| a * x * x + b * x + c).collect();
        let f = Extrapolant1d::fit(&xs, &ys, FitOrder::Quadratic).unwrap();
        let expected = a * query * query + b * query + c;
        prop_assert!((f.eval(query) - expected).abs() < 1e-8);
    }

    /// Both kinds pass through every support point.
    #[test]
    fn interpolant_reproduces_support(
        ys in proptest::collection::vec(-4.0f64..4.0, 6),
    ) {
        let xs: Vec<f64> = (0..6).map(|i| i as f64 * 0.4).collect();
        for order in [FitOrder::Linear, FitOrder::Quadratic] {
            let f = Extrapolant1d::fit(&xs, &ys, order).unwrap();
            for (x, y) in xs.iter().zip(ys.iter()) {
                prop_assert!((f.eval(*x) - y).abs() < 1e-10);
            }
        }
    }

    /// linspace has the requested endpoints and uniform spacing.
    #[test]
    fn linspace_structure(
        start in -10.0f64..10.0,
        span in 0.1f64..10.0,
        n in 2usize..100,
    ) {
        let stop = start + span;
        let v = linspace(start, stop, n);
        prop_assert_eq!(v.len(), n);
        prop_assert!((v[0] - start).abs() < 1e-12);
        prop_assert!((v[n - 1] - stop).abs() < 1e-12);
        let step = (stop - start) / (n - 1) as f64;
        for w in v.windows(2) {
            prop_assert!((w[1] - w[0] - step).abs() < 1e-9);
        }
    }
}

// ── Polygon Properties ───────────────────────────────────────────────

proptest! {
    /// Points strictly inside a rectangle are inside; points strictly
    /// outside are outside.
    #[test]
    fn rectangle_containment(
        w in 0.5f64..5.0,
        h in 0.5f64..5.0,
        fx in 0.05f64..0.95,
        fy in 0.05f64..0.95,
    ) {
        let poly = [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)];
        prop_assert!(point_in_polygon(fx * w, fy * h, &poly));
        prop_assert!(!point_in_polygon(w + 0.1, fy * h, &poly));
        prop_assert!(!point_in_polygon(fx * w, -0.1, &poly));
    }

    /// Mirroring the polygon and the query across Z = 0 preserves
    /// containment (the symmetry the strike-line mirroring relies on).
    #[test]
    fn containment_mirror_symmetric(
        r in 0.0f64..3.0,
        z in -2.0f64..2.0,
    ) {
        let poly = [(0.5, -1.0), (2.5, -1.5), (2.8, 0.0), (2.5, 1.5), (0.5, 1.0)];
        let mirrored: Vec<(f64, f64)> =
            poly.iter().map(|&(pr, pz)| (pr, -pz)).collect();
        prop_assert_eq!(
            point_in_polygon(r, z, &poly),
            point_in_polygon(r, -z, &mirrored)
        );
    }
}
