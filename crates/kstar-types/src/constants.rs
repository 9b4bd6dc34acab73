// ─────────────────────────────────────────────────────────────────────
// KSTAR Surrogate Sim — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Fixed simulator constants and control-parameter range tables.
//!
//! Port of the module-level settings block of `kstar_simulator_v1.py`
//! (lines 46-64), lifted out of ambient state into named constants.

/// Number of control parameters on the input surface.
pub const N_CONTROLS: usize = 15;

/// Number of scalar output metrics.
pub const N_METRICS: usize = 8;

/// Output-history capacity. Python: plot_length = 40.
pub const PLOT_LENGTH: usize = 40;

/// Simulation time step [s]. One tick of the 0D evolution.
pub const TIME_STEP_S: f64 = 0.1;

/// Rolling-window depth for the recurrent model. Python: self.x rows = 10.
pub const WINDOW_ROWS: usize = 10;

/// Rolling-window width. First 4 columns are model outputs. Python: 18.
pub const WINDOW_COLS: usize = 18;

/// Recurrent/steady 0D output width (betan, q95, q0, li).
pub const N_OUTPUTS_0D: usize = 4;

/// Steady 0D feature width. Python: 17.
pub const STEADY_FEATURES: usize = 17;

/// betap/wmhd feature width. Python: 8.
pub const BPW_FEATURES: usize = 8;

/// Campaign-year epoch feature. Python: year_in = 2021.
pub const YEAR_IN: f64 = 2021.0;

/// Inboard-midplane regime threshold [m]. Python: 1.265.
pub const IN_MID_THRESHOLD: f64 = 1.265;

/// Threshold guard band. Python: 1.e-4.
pub const THRESHOLD_EPS: f64 = 1.0e-4;

/// Total-heating floor [MW], keeps the H-factor denominator away from
/// zero. Python: 1.e-1.
pub const PTOT_FLOOR_MW: f64 = 0.1;

/// Stored-energy unit scaling [J] -> [MJ] in the H-factor estimate.
pub const WMHD_TO_MJ: f64 = 1.0e-6;

/// Effective fuel mass number (deuterium). Python: m = 2.0.
pub const MASS_NUMBER: f64 = 2.0;

/// Upper bound on ensemble size per 0D family. Python: max_models = 10.
pub const MAX_MODELS: usize = 10;

/// Upper bound on shape-model ensemble size. Python: max_shape_models = 1.
pub const MAX_SHAPE_MODELS: usize = 1;

/// Vertex count of a predicted boundary before closing.
pub const N_BOUNDARY: usize = 64;

/// Control-parameter lower bounds, in `ControlParam` order.
pub const INPUT_MINS: [f64; N_CONTROLS] = [
    0.3, 1.5, 0.2, 0.0, 0.0, 0.0, 0.0, 0.0, -10.0, -10.0, 1.265, 2.18, 1.6, 0.1, 0.5,
];

/// Control-parameter upper bounds, in `ControlParam` order.
pub const INPUT_MAXS: [f64; N_CONTROLS] = [
    0.8, 2.7, 0.6, 1.75, 1.75, 1.5, 0.8, 0.8, 10.0, 10.0, 1.36, 2.29, 2.0, 0.5, 0.9,
];

/// Control-parameter initial values, in `ControlParam` order.
pub const INPUT_INIT: [f64; N_CONTROLS] = [
    0.5, 1.8, 0.4, 1.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.34, 2.22, 1.7, 0.3, 0.75,
];
