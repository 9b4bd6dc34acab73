// ─────────────────────────────────────────────────────────────────────
// KSTAR Surrogate Sim — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Core state types: control surface, bounded metric histories, boundary.
//!
//! The original simulator threads string-keyed slider lookups
//! (`self.inputSliderDict[input_params[i]]`) through every formula; here
//! the name->index table is a typed enum checked at compile time.

use crate::constants::{
    INPUT_INIT, INPUT_MAXS, INPUT_MINS, N_CONTROLS, N_METRICS, PLOT_LENGTH,
};
use std::collections::VecDeque;

/// A user-adjustable control parameter. Order matches the original
/// `input_params` list; `index()` is the slider index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlParam {
    /// Plasma current [MA].
    Ip,
    /// Toroidal field [T].
    Bt,
    /// Greenwald density fraction [-].
    GwFrac,
    /// Neutral beam 1A power [MW].
    Pnb1a,
    /// Neutral beam 1B power [MW].
    Pnb1b,
    /// Neutral beam 1C power [MW].
    Pnb1c,
    /// EC launcher 2 power [MW].
    Pec2,
    /// EC launcher 3 power [MW].
    Pec3,
    /// EC launcher 2 deposition height [cm].
    Zec2,
    /// EC launcher 3 deposition height [cm].
    Zec3,
    /// Inboard midplane radius [m].
    InMid,
    /// Outboard midplane radius [m].
    OutMid,
    /// Elongation [-].
    Elon,
    /// Upper triangularity [-].
    UpTri,
    /// Lower triangularity [-].
    LoTri,
}

impl ControlParam {
    pub const ALL: [ControlParam; N_CONTROLS] = [
        ControlParam::Ip,
        ControlParam::Bt,
        ControlParam::GwFrac,
        ControlParam::Pnb1a,
        ControlParam::Pnb1b,
        ControlParam::Pnb1c,
        ControlParam::Pec2,
        ControlParam::Pec3,
        ControlParam::Zec2,
        ControlParam::Zec3,
        ControlParam::InMid,
        ControlParam::OutMid,
        ControlParam::Elon,
        ControlParam::UpTri,
        ControlParam::LoTri,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display label, matching the original slider captions.
    pub const fn label(self) -> &'static str {
        match self {
            ControlParam::Ip => "Ip [MA]",
            ControlParam::Bt => "Bt [T]",
            ControlParam::GwFrac => "GW.frac. [-]",
            ControlParam::Pnb1a => "Pnb1a [MW]",
            ControlParam::Pnb1b => "Pnb1b [MW]",
            ControlParam::Pnb1c => "Pnb1c [MW]",
            ControlParam::Pec2 => "Pec2 [MW]",
            ControlParam::Pec3 => "Pec3 [MW]",
            ControlParam::Zec2 => "Zec2 [cm]",
            ControlParam::Zec3 => "Zec3 [cm]",
            ControlParam::InMid => "In.Mid. [m]",
            ControlParam::OutMid => "Out.Mid. [m]",
            ControlParam::Elon => "Elon. [-]",
            ControlParam::UpTri => "Up.Tri. [-]",
            ControlParam::LoTri => "Lo.Tri [-]",
        }
    }

    pub const fn min(self) -> f64 {
        INPUT_MINS[self as usize]
    }

    pub const fn max(self) -> f64 {
        INPUT_MAXS[self as usize]
    }

    pub const fn init(self) -> f64 {
        INPUT_INIT[self as usize]
    }
}

/// The 15 control-parameter values. Owned by the UI collaborator and
/// read-only inside the engine; `set` clamps into the device range.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlVector {
    values: [f64; N_CONTROLS],
}

impl ControlVector {
    pub fn get(&self, p: ControlParam) -> f64 {
        self.values[p.index()]
    }

    pub fn set(&mut self, p: ControlParam, value: f64) {
        self.values[p.index()] = value.clamp(p.min(), p.max());
    }

    /// Total auxiliary heating power [MW]: three NBI + two EC channels.
    pub fn total_heating_mw(&self) -> f64 {
        self.get(ControlParam::Pnb1a)
            + self.get(ControlParam::Pnb1b)
            + self.get(ControlParam::Pnb1c)
            + self.get(ControlParam::Pec2)
            + self.get(ControlParam::Pec3)
    }
}

impl Default for ControlVector {
    fn default() -> Self {
        ControlVector { values: INPUT_INIT }
    }
}

/// A scalar output metric. Order matches the original `output_params2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Betan,
    Betap,
    H89,
    H98,
    Q95,
    Q0,
    Li,
    Wmhd,
}

impl Metric {
    pub const ALL: [Metric; N_METRICS] = [
        Metric::Betan,
        Metric::Betap,
        Metric::H89,
        Metric::H98,
        Metric::Q95,
        Metric::Q0,
        Metric::Li,
        Metric::Wmhd,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Metric::Betan => "betan",
            Metric::Betap => "betap",
            Metric::H89 => "h89",
            Metric::H98 => "h98",
            Metric::Q95 => "q95",
            Metric::Q0 => "q0",
            Metric::Li => "li",
            Metric::Wmhd => "wmhd",
        }
    }
}

/// Bounded FIFO history of one metric.
///
/// Reproduces the original append rule exactly: at capacity the oldest
/// sample is dropped; a length-1 series still holds the construction
/// placeholder, which is overwritten (not shifted out) by the first real
/// sample before the append.
#[derive(Debug, Clone)]
pub struct MetricSeries {
    values: VecDeque<f64>,
    capacity: usize,
}

impl MetricSeries {
    /// New series with the initial placeholder sample. Python: `[0.]`.
    pub fn new(capacity: usize) -> Self {
        let mut values = VecDeque::with_capacity(capacity + 1);
        values.push_back(0.0);
        MetricSeries { values, capacity }
    }

    pub fn push(&mut self, value: f64) {
        if self.values.len() >= self.capacity {
            self.values.pop_front();
        } else if self.values.len() == 1 {
            self.values[0] = value;
        }
        self.values.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Most recent sample.
    pub fn latest(&self) -> f64 {
        *self.values.back().unwrap_or(&0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.values.iter()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }
}

/// Histories of all eight metrics, equal length at all times (except the
/// length-1 placeholder state right after construction).
#[derive(Debug, Clone)]
pub struct OutputSeries {
    series: [MetricSeries; N_METRICS],
}

impl OutputSeries {
    pub fn new(capacity: usize) -> Self {
        OutputSeries {
            series: std::array::from_fn(|_| MetricSeries::new(capacity)),
        }
    }

    pub fn get(&self, m: Metric) -> &MetricSeries {
        &self.series[m.index()]
    }

    pub fn push(&mut self, m: Metric, value: f64) {
        self.series[m.index()].push(value);
    }

    pub fn latest(&self, m: Metric) -> f64 {
        self.series[m.index()].latest()
    }

    /// Common length of the series (the betan series by convention).
    pub fn len(&self) -> usize {
        self.series[Metric::Betan.index()].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for OutputSeries {
    fn default() -> Self {
        OutputSeries::new(PLOT_LENGTH)
    }
}

/// Closed plasma boundary polyline in the poloidal plane.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryCurve {
    pub r: Vec<f64>,
    pub z: Vec<f64>,
}

impl BoundaryCurve {
    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    /// Index of the minimum-Z vertex (the lower X-point), or None for an
    /// empty/degenerate curve.
    pub fn min_z_index(&self) -> Option<usize> {
        if self.z.is_empty() || self.z.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let mut best = 0;
        for (i, &z) in self.z.iter().enumerate() {
            if z < self.z[best] {
                best = i;
            }
        }
        Some(best)
    }
}

/// Lower X-point and its top-bottom mirror.
///
/// The mirror is a device-model symmetry assumption carried over from the
/// original simulator; it is never re-derived from the predicted boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XPoints {
    pub r_lower: f64,
    pub z_lower: f64,
    pub r_upper: f64,
    pub z_upper: f64,
}

impl XPoints {
    pub fn from_lower(r: f64, z: f64) -> Self {
        XPoints {
            r_lower: r,
            z_lower: z,
            r_upper: r,
            z_upper: -z,
        }
    }
}
