// ─────────────────────────────────────────────────────────────────────
// KSTAR Surrogate Sim — Boundary Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! X-point detection and strike-line tracing.
//!
//! Port of `plotXpoints`/`plotHeatLoads` in `kstar_simulator_v1.py`
//! (lines 346-391), minus the drawing. The lower X-point is the minimum-Z
//! vertex; the upper one is its Z-mirror (device-model symmetry
//! assumption, kept as-is; it is never re-derived from the predicted
//! boundary, which is not up-down symmetric). Strike legs are low-order
//! extrapolations from the X-point neighborhood to the wall extents,
//! clipped to the vessel interior.
//!
//! This runs on every tick: degenerate geometry (short curve, X-point at
//! the curve ends, empty in-vessel retention) produces an empty strike
//! set, never an error.

use kstar_math::interp::{linspace, Extrapolant1d, FitOrder};
use kstar_math::polygon::{clip_to_polygon, point_in_polygon};
use kstar_types::error::{SimError, SimResult};
use kstar_types::state::{BoundaryCurve, XPoints};

/// Half-width of the X-point neighborhood used for the fits. Python: 5.
const FIT_SPAN: usize = 5;

/// Offset keeping the outermost sample just inside the wall extent.
/// Python: 1.e-4.
const WALL_MARGIN: f64 = 1.0e-4;

/// Which divertor leg a strike branch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeLeg {
    /// Extrapolated in R toward the inboard wall, z = f(r).
    RadialInboard,
    /// Extrapolated in Z toward the floor, r = f(z).
    VerticalDown,
}

/// Whether the fit neighborhood includes the X-point vertex itself.
/// The original traces both variants per leg and kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitWindow {
    ExcludeXPoint,
    IncludeXPoint,
}

/// One retained strike-line branch.
#[derive(Debug, Clone)]
pub struct StrikeBranch {
    pub leg: StrikeLeg,
    pub window: FitWindow,
    pub order: FitOrder,
    /// True for the top-bottom mirror copy of a retained branch.
    pub mirrored: bool,
    /// In-vessel samples, ordered from the X-point outward.
    pub points: Vec<(f64, f64)>,
}

/// Full geometry result for one boundary.
#[derive(Debug, Clone)]
pub struct BoundaryAnalysis {
    pub x_points: XPoints,
    pub strikes: Vec<StrikeBranch>,
}

/// Strike-line analyzer bound to a fixed wall contour.
pub struct BoundaryAnalyzer {
    wall: Vec<(f64, f64)>,
    wall_min_r: f64,
    wall_min_z: f64,
    n_samples: usize,
}

impl BoundaryAnalyzer {
    pub fn new(wall: Vec<(f64, f64)>, n_samples: usize) -> SimResult<Self> {
        if wall.len() < 3 {
            return Err(SimError::ConfigError(format!(
                "wall contour needs at least 3 vertices, got {}",
                wall.len()
            )));
        }
        if n_samples < 2 {
            return Err(SimError::ConfigError(format!(
                "strike sampling needs at least 2 points, got {n_samples}"
            )));
        }
        let wall_min_r = wall.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let wall_min_z = wall.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        Ok(BoundaryAnalyzer {
            wall,
            wall_min_r,
            wall_min_z,
            n_samples,
        })
    }

    /// Analyze one boundary. Returns None only when the curve itself is
    /// unusable (empty or non-finite); in-vessel degeneracies yield an
    /// empty strike set instead.
    pub fn analyze(&self, curve: &BoundaryCurve) -> Option<BoundaryAnalysis> {
        if curve.r.len() != curve.z.len() || curve.r.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let idx = curve.min_z_index()?;

        let x_points = XPoints::from_lower(curve.r[idx], curve.z[idx]);

        let mut strikes = Vec::new();
        for window in [FitWindow::ExcludeXPoint, FitWindow::IncludeXPoint] {
            for order in [FitOrder::Linear, FitOrder::Quadratic] {
                if let Some(branch) = self.radial_leg(curve, idx, window, order) {
                    strikes.push(mirror(&branch));
                    strikes.push(branch);
                }
                if let Some(branch) = self.vertical_leg(curve, idx, window, order) {
                    strikes.push(mirror(&branch));
                    strikes.push(branch);
                }
            }
        }

        Some(BoundaryAnalysis { x_points, strikes })
    }

    /// Inboard-directed leg: fit z(r) over the vertices preceding the
    /// X-point, sample toward the innermost wall radius.
    fn radial_leg(
        &self,
        curve: &BoundaryCurve,
        idx: usize,
        window: FitWindow,
        order: FitOrder,
    ) -> Option<StrikeBranch> {
        if idx < FIT_SPAN || idx + 1 >= curve.len() {
            return None;
        }
        let end = match window {
            FitWindow::ExcludeXPoint => idx,
            FitWindow::IncludeXPoint => idx + 1,
        };
        let xs = &curve.r[idx - FIT_SPAN..end];
        let ys = &curve.z[idx - FIT_SPAN..end];
        let fit = Extrapolant1d::fit(xs, ys, order).ok()?;

        let rs = linspace(curve.r[idx], self.wall_min_r + WALL_MARGIN, self.n_samples);
        let samples: Vec<(f64, f64)> = rs.iter().map(|&r| (r, fit.eval(r))).collect();
        let kept = clip_to_polygon(&samples, &self.wall);

        // Degenerate-extrapolation guard: a leg that never descends below
        // the neighboring vertex is a self-intersecting artifact.
        let z_ref = curve.z[idx + 1];
        if kept.is_empty() || kept.iter().all(|&(_, z)| z > z_ref) {
            return None;
        }

        Some(StrikeBranch {
            leg: StrikeLeg::RadialInboard,
            window,
            order,
            mirrored: false,
            points: kept,
        })
    }

    /// Floor-directed leg: fit r(z) over the vertices following the
    /// X-point, sample toward the lowest wall elevation.
    fn vertical_leg(
        &self,
        curve: &BoundaryCurve,
        idx: usize,
        window: FitWindow,
        order: FitOrder,
    ) -> Option<StrikeBranch> {
        if idx + FIT_SPAN >= curve.len() {
            return None;
        }
        let start = match window {
            FitWindow::ExcludeXPoint => idx + 1,
            FitWindow::IncludeXPoint => idx,
        };
        let xs = &curve.z[start..idx + FIT_SPAN + 1];
        let ys = &curve.r[start..idx + FIT_SPAN + 1];
        let fit = Extrapolant1d::fit(xs, ys, order).ok()?;

        let zs = linspace(curve.z[idx], self.wall_min_z + WALL_MARGIN, self.n_samples);
        let samples: Vec<(f64, f64)> = zs.iter().map(|&z| (fit.eval(z), z)).collect();
        let kept = clip_to_polygon(&samples, &self.wall);

        if kept.is_empty() {
            return None;
        }

        Some(StrikeBranch {
            leg: StrikeLeg::VerticalDown,
            window,
            order,
            mirrored: false,
            points: kept,
        })
    }

    pub fn wall(&self) -> &[(f64, f64)] {
        &self.wall
    }

    /// Containment check against the analyzer's wall.
    pub fn contains(&self, r: f64, z: f64) -> bool {
        point_in_polygon(r, z, &self.wall)
    }
}

/// Top-bottom mirror of a retained branch (same symmetry assumption as
/// the upper X-point).
fn mirror(branch: &StrikeBranch) -> StrikeBranch {
    StrikeBranch {
        leg: branch.leg,
        window: branch.window,
        order: branch.order,
        mirrored: true,
        points: branch.points.iter().map(|&(r, z)| (r, -z)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wall::wall_outline;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, StandardNormal};
    use std::f64::consts::PI;

    /// Diverted-shape test boundary: Miller parameterization shifted down
    /// so the lowest point sits in the divertor region.
    fn d_boundary(n: usize) -> BoundaryCurve {
        let (r0, a, kappa, delta, z_off) = (1.78, 0.44, 1.7, 0.5, -0.3);
        let mut r = Vec::with_capacity(n + 1);
        let mut z = Vec::with_capacity(n + 1);
        for i in 0..n {
            let t = 2.0 * PI * i as f64 / n as f64;
            r.push(r0 + a * (t + delta * t.sin()).cos());
            z.push(kappa * a * t.sin() + z_off);
        }
        r.push(r[0]);
        z.push(z[0]);
        BoundaryCurve { r, z }
    }

    fn analyzer() -> BoundaryAnalyzer {
        BoundaryAnalyzer::new(wall_outline().to_vec(), 10).unwrap()
    }

    #[test]
    fn test_x_point_is_min_z_and_mirrored() {
        let curve = d_boundary(64);
        let analysis = analyzer().analyze(&curve).unwrap();
        let idx = curve.min_z_index().unwrap();
        assert!((analysis.x_points.r_lower - curve.r[idx]).abs() < 1e-15);
        assert!((analysis.x_points.z_lower - curve.z[idx]).abs() < 1e-15);
        assert!((analysis.x_points.z_upper + analysis.x_points.z_lower).abs() < 1e-15);
        assert!((analysis.x_points.r_upper - analysis.x_points.r_lower).abs() < 1e-15);
    }

    #[test]
    fn test_all_branches_retained_for_healthy_shape() {
        let analysis = analyzer().analyze(&d_boundary(64)).unwrap();
        // 2 windows x 2 orders x 2 legs, each with a mirror copy.
        assert_eq!(analysis.strikes.len(), 16);
        assert_eq!(analysis.strikes.iter().filter(|s| s.mirrored).count(), 8);
    }

    #[test]
    fn test_strike_points_stay_inside_wall() {
        let an = analyzer();
        let analysis = an.analyze(&d_boundary(64)).unwrap();
        assert!(!analysis.strikes.is_empty());
        for branch in &analysis.strikes {
            assert!(!branch.points.is_empty());
            for &(r, z) in &branch.points {
                assert!(an.contains(r, z), "({r}, {z}) escaped the wall");
            }
        }
    }

    #[test]
    fn test_short_curve_yields_empty_strikes() {
        let curve = BoundaryCurve {
            r: vec![1.6, 1.7, 1.8],
            z: vec![0.1, -0.4, 0.2],
        };
        let analysis = analyzer().analyze(&curve).unwrap();
        assert!(analysis.strikes.is_empty());
        // The X-point pair is still reported.
        assert!((analysis.x_points.z_lower + 0.4).abs() < 1e-15);
    }

    #[test]
    fn test_empty_curve_yields_none() {
        let curve = BoundaryCurve {
            r: vec![],
            z: vec![],
        };
        assert!(analyzer().analyze(&curve).is_none());
    }

    #[test]
    fn test_boundary_outside_vessel_keeps_running() {
        // A boundary far below the vessel: everything clips away.
        let mut curve = d_boundary(64);
        for z in curve.z.iter_mut() {
            *z -= 5.0;
        }
        let analysis = analyzer().analyze(&curve).unwrap();
        assert!(analysis.strikes.is_empty());
    }

    #[test]
    fn test_stability_under_small_perturbation() {
        let base = d_boundary(64);
        let an = analyzer();
        let ref_analysis = an.analyze(&base).unwrap();

        let mut rng = StdRng::seed_from_u64(11);
        let mut perturbed = base.clone();
        for v in perturbed.r.iter_mut().chain(perturbed.z.iter_mut()) {
            let noise: f64 = StandardNormal.sample(&mut rng);
            *v += 1e-5 * noise;
        }
        let new_analysis = an.analyze(&perturbed).unwrap();

        // Same branch census, X-point moved by no more than the noise scale.
        assert_eq!(ref_analysis.strikes.len(), new_analysis.strikes.len());
        assert!((ref_analysis.x_points.r_lower - new_analysis.x_points.r_lower).abs() < 1e-3);
        assert!((ref_analysis.x_points.z_lower - new_analysis.x_points.z_lower).abs() < 1e-3);
    }
}
