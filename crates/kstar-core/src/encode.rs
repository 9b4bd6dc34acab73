// ─────────────────────────────────────────────────────────────────────
// KSTAR Surrogate Sim — Feature Encoders
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The four model-specific feature encodings.
//!
//! Port of the `idx_convert` blocks of `predict0d` and the
//! `predictBoundary` input assembly in `kstar_simulator_v1.py`
//! (lines 329-339 and 427-475). Each encoding is a pure function of the
//! control vector; the index maps are fixed tables rather than the
//! original's runtime slider-name lookups.

use kstar_types::config::{EcWaveFeature, SimConfig};
use kstar_types::constants::{
    BPW_FEATURES, IN_MID_THRESHOLD, STEADY_FEATURES, THRESHOLD_EPS, WINDOW_COLS,
};
use kstar_types::state::{ControlParam, ControlVector};
use ndarray::Array1;

use ControlParam as P;

/// Slider order feeding the steady 0D model, before the derived-feature
/// rewrites. Python: `idx_convert = [0,1,3,4,5,6,7,8,9,10,11,12,13,14,10,2]`.
const STEADY_ORDER: [ControlParam; STEADY_FEATURES - 1] = [
    P::Ip,
    P::Bt,
    P::Pnb1a,
    P::Pnb1b,
    P::Pnb1c,
    P::Pec2,
    P::Pec3,
    P::Zec2,
    P::Zec3,
    P::InMid,
    P::OutMid,
    P::Elon,
    P::UpTri,
    P::LoTri,
    P::InMid,
    P::GwFrac,
];

/// Slider order of the static columns (4..16) of a window row.
/// Python: `idx_convert = [0, 1, 2, 12, 13, 14, 10, 11, 3, 4, 5, 6, 10]`.
const ROW_ORDER: [ControlParam; 13] = [
    P::Ip,
    P::Bt,
    P::GwFrac,
    P::Elon,
    P::UpTri,
    P::LoTri,
    P::InMid,
    P::OutMid,
    P::Pnb1a,
    P::Pnb1b,
    P::Pnb1c,
    P::Pec2,
    P::InMid,
];

/// Slider order of the betap/wmhd inputs 1..8 (index 0 is the latest
/// betan). Python: `idx_convert = [0,0,1,10,11,12,13,14]`.
const BPW_ORDER: [ControlParam; BPW_FEATURES - 1] = [
    P::Ip,
    P::Bt,
    P::InMid,
    P::OutMid,
    P::Elon,
    P::UpTri,
    P::LoTri,
];

/// Inboard-midplane regime flag: the device switches limiter
/// configuration once the inner gap opens past the threshold.
fn in_mid_flag(in_mid: f64) -> f64 {
    if in_mid > IN_MID_THRESHOLD + THRESHOLD_EPS {
        1.0
    } else {
        0.0
    }
}

/// Steady 0D encoding, 17 features.
///
/// The midplane pair is rewritten to (geometric center, minor radius);
/// the repeated inboard-midplane slot becomes the regime flag; the last
/// slot is the campaign-year epoch.
pub fn steady_features(c: &ControlVector, cfg: &SimConfig) -> Array1<f64> {
    let mut x = Array1::zeros(STEADY_FEATURES);
    for (i, p) in STEADY_ORDER.iter().enumerate() {
        x[i] = c.get(*p);
    }
    let (rin, rout) = (x[9], x[10]);
    x[9] = 0.5 * (rin + rout);
    x[10] = 0.5 * (rout - rin);
    x[14] = in_mid_flag(x[14]);
    x[16] = cfg.year_in;
    x
}

/// Static feature columns (4..18) of one rolling-window row, 14 values.
///
/// The EC wave-power column is governed by the configured policy: the
/// original overwrites the column with Pec2 and immediately adds Pec3,
/// which combines both launchers within the tick.
pub fn recurrent_features(c: &ControlVector, cfg: &SimConfig) -> Array1<f64> {
    let mut x = Array1::zeros(WINDOW_COLS - 4);
    for (i, p) in ROW_ORDER.iter().enumerate() {
        x[i] = c.get(*p);
    }
    x[11] = match cfg.ec_wave_feature {
        EcWaveFeature::Summed => c.get(P::Pec2) + c.get(P::Pec3),
        EcWaveFeature::SecondLauncherOnly => c.get(P::Pec3),
    };
    x[12] = in_mid_flag(x[12]);
    x[13] = cfg.year_in;
    x
}

/// betap/wmhd encoding, 8 features; index 0 is the most recent betan.
pub fn bpw_features(betan: f64, c: &ControlVector) -> Array1<f64> {
    let mut x = Array1::zeros(BPW_FEATURES);
    x[0] = betan;
    for (i, p) in BPW_ORDER.iter().enumerate() {
        x[i + 1] = c.get(*p);
    }
    let (rin, rout) = (x[3], x[4]);
    x[3] = 0.5 * (rin + rout);
    x[4] = 0.5 * (rout - rin);
    x
}

/// Shape-model encoding, 8 features; raw midplane radii, latest betap.
/// Python: `self.k2rz.set_inputs(ip, bt, bp, rin, rout, k, du, dl)`.
pub fn shape_features(betap: f64, c: &ControlVector) -> Array1<f64> {
    Array1::from_vec(vec![
        c.get(P::Ip),
        c.get(P::Bt),
        betap,
        c.get(P::InMid),
        c.get(P::OutMid),
        c.get(P::Elon),
        c.get(P::UpTri),
        c.get(P::LoTri),
    ])
}
