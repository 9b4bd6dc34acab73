// ─────────────────────────────────────────────────────────────────────
// KSTAR Surrogate Sim — Surrogate Suite
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The four loaded model families and their coupling rules.
//!
//! Port of the model-construction block of `kstar_simulator_v1.py`
//! (lines 92-100) plus `resetModelNumber` and `shuffleModels`. The
//! steady family runs a single member; the recurrent and betap/wmhd
//! families are resized together; shuffling touches the shape, recurrent
//! and betap/wmhd families but never the steady one.

use kstar_math::interp::linspace;
use kstar_ml::{Ensemble, LstmRegressor, MlpRegressor, OutputDenorm};
use kstar_types::constants::{MAX_MODELS, MAX_SHAPE_MODELS};
use kstar_types::error::{SimError, SimResult};
use kstar_types::state::BoundaryCurve;
use ndarray::Array1;
use rand::Rng;
use std::path::Path;

/// betap/wmhd output de-normalization mean. Python: ymean of `bpw_nn`.
pub const BPW_YMEAN: [f64; 2] = [1.3630552066021155, 251779.19861710534];

/// betap/wmhd output de-normalization std. Python: ystd of `bpw_nn`.
pub const BPW_YSTD: [f64; 2] = [0.6252123013157276, 123097.77805034176];

pub struct SurrogateSuite {
    /// Steady 0D model (betan, q95, q0, li). Python: `kstar_nn`, 1 member.
    pub steady: Ensemble<MlpRegressor>,
    /// Recurrent 0D model over the rolling window. Python: `kstar_lstm`.
    pub recurrent: Ensemble<LstmRegressor>,
    /// betap/wmhd model with de-normalized outputs. Python: `bpw_nn`.
    pub bpw: Ensemble<MlpRegressor>,
    /// Boundary shape model. Python: `k2rz`.
    pub shape: Ensemble<MlpRegressor>,
}

impl SurrogateSuite {
    pub fn new(
        steady: Ensemble<MlpRegressor>,
        recurrent: Ensemble<LstmRegressor>,
        bpw: Ensemble<MlpRegressor>,
        shape: Ensemble<MlpRegressor>,
    ) -> SimResult<Self> {
        Ok(SurrogateSuite {
            steady,
            recurrent,
            bpw,
            shape,
        })
    }

    /// Load all families from a weights tree:
    /// `<root>/nn`, `<root>/lstm`, `<root>/bpw`, `<root>/k2rz`.
    pub fn load(root: &Path, n_models: usize) -> SimResult<Self> {
        if n_models < 1 || n_models > MAX_MODELS {
            return Err(SimError::ConfigError(format!(
                "model count {n_models} outside [1, {MAX_MODELS}]"
            )));
        }
        let steady = Ensemble::<MlpRegressor>::from_dir(&root.join("nn"), 1)?;
        let recurrent = Ensemble::<LstmRegressor>::from_dir(&root.join("lstm"), n_models)?;
        let bpw = Ensemble::<MlpRegressor>::from_dir(&root.join("bpw"), n_models)?
            .with_denorm(OutputDenorm::new(BPW_YMEAN.to_vec(), BPW_YSTD.to_vec())?)?;
        let shape = Ensemble::<MlpRegressor>::from_dir(&root.join("k2rz"), MAX_SHAPE_MODELS)?;
        SurrogateSuite::new(steady, recurrent, bpw, shape)
    }

    /// Resize the recurrent and betap/wmhd families together.
    /// Python: `resetModelNumber`. Validated up front so a rejected count
    /// never leaves the two families out of sync.
    pub fn set_active_count(&mut self, n: usize) -> SimResult<()> {
        let limit = self.recurrent.len().min(self.bpw.len());
        if n < 1 || n > limit {
            return Err(SimError::ConfigError(format!(
                "active count {n} outside [1, {limit}]"
            )));
        }
        self.recurrent.set_active_count(n)?;
        self.bpw.set_active_count(n)
    }

    /// Shuffle the shape, recurrent and betap/wmhd member orders.
    /// Python: `shuffleModels`.
    pub fn shuffle_all<R: Rng>(&mut self, rng: &mut R) {
        self.shape.shuffle(rng);
        self.recurrent.shuffle(rng);
        self.bpw.shuffle(rng);
    }
}

/// Decode a flat shape-model output `[r0..rn, z0..zn]` into a closed
/// boundary polyline.
pub fn decode_boundary(y: &Array1<f64>) -> SimResult<BoundaryCurve> {
    if y.len() < 6 || y.len() % 2 != 0 {
        return Err(SimError::ModelError(format!(
            "shape output length {} cannot form a closed (R, Z) polyline",
            y.len()
        )));
    }
    let n = y.len() / 2;
    let mut r: Vec<f64> = y.iter().take(n).copied().collect();
    let mut z: Vec<f64> = y.iter().skip(n).copied().collect();

    let closed = (r[0] - r[n - 1]).abs() < 1e-12 && (z[0] - z[n - 1]).abs() < 1e-12;
    if !closed {
        r.push(r[0]);
        z.push(z[0]);
    }
    Ok(BoundaryCurve { r, z })
}

/// A reference diverted boundary in the shape-model output layout; used
/// by tests and benches to build synthetic shape members.
pub fn reference_boundary_flat(n: usize) -> Vec<f64> {
    let (r0, a, kappa, delta, z_off) = (1.78, 0.44, 1.7, 0.5, -0.3);
    let thetas = linspace(0.0, 2.0 * std::f64::consts::PI * (n as f64 - 1.0) / n as f64, n);
    let mut flat = Vec::with_capacity(2 * n);
    for t in &thetas {
        flat.push(r0 + a * (t + delta * t.sin()).cos());
    }
    for t in &thetas {
        flat.push(kappa * a * t.sin() + z_off);
    }
    flat
}
