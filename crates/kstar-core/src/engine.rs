// ─────────────────────────────────────────────────────────────────────
// KSTAR Surrogate Sim — Plasma State Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The simulation orchestrator.
//!
//! Port of the prediction path of `kstar_simulator_v1.py`
//! (`predict0d`, `predictBoundary`, `relaxRun`, `dumpOutput`), with the
//! GUI stripped away. The engine owns every piece of mutable state: the
//! rolling window, the metric histories and the boundary snapshot. The
//! control vector is read per call and never mutated.
//!
//! A tick either fully succeeds or leaves the window and histories
//! untouched: every ensemble call completes before the commit phase.
//!
//! The engine has no notion of wall-clock time, only the fixed 0.1 s
//! simulation step. Rate limiting of interactive refreshes (the
//! original's 50 ms guard against drag gestures) belongs to the caller.

use crate::boundary::{BoundaryAnalyzer, StrikeBranch};
use crate::encode;
use crate::models::{decode_boundary, SurrogateSuite};
use crate::scaling;
use crate::wall::wall_outline;
use crate::window::HistoryWindow;
use kstar_math::interp::linspace;
use kstar_types::config::SimConfig;
use kstar_types::constants::N_OUTPUTS_0D;
use kstar_types::error::{SimError, SimResult};
use kstar_types::state::{BoundaryCurve, ControlVector, Metric, OutputSeries, XPoints};
use rand::Rng;

/// Inference mode. Steady: single-shot 0D, no temporal memory.
/// Transient: recurrent over the rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Steady,
    Transient,
}

/// Boundary snapshot published after each refresh.
#[derive(Debug, Clone)]
pub struct PlasmaBoundary {
    pub curve: BoundaryCurve,
    pub x_points: XPoints,
    pub strikes: Vec<StrikeBranch>,
}

pub struct PlasmaStateEngine {
    cfg: SimConfig,
    suite: SurrogateSuite,
    analyzer: BoundaryAnalyzer,
    mode: Mode,
    window: HistoryWindow,
    outputs: OutputSeries,
    boundary: Option<PlasmaBoundary>,
    time_axis: Vec<f64>,
}

impl PlasmaStateEngine {
    /// Relax preset: the original's "1 s" button (10 ticks of 0.1 s).
    pub const RELAX_1S: usize = 10;
    /// Relax preset: the original's "2 s" button.
    pub const RELAX_2S: usize = 20;

    pub fn new(cfg: SimConfig, suite: SurrogateSuite) -> SimResult<Self> {
        cfg.validate()?;
        let analyzer = BoundaryAnalyzer::new(wall_outline().to_vec(), cfg.strike_samples)?;
        let time_axis = linspace(
            -cfg.time_step_s * (cfg.plot_length - 1) as f64,
            0.0,
            cfg.plot_length,
        );
        Ok(PlasmaStateEngine {
            outputs: OutputSeries::new(cfg.plot_length),
            cfg,
            suite,
            analyzer,
            mode: Mode::Steady,
            window: HistoryWindow::new(),
            boundary: None,
            time_axis,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn outputs(&self) -> &OutputSeries {
        &self.outputs
    }

    pub fn boundary(&self) -> Option<&PlasmaBoundary> {
        self.boundary.as_ref()
    }

    /// Post-commit view of the rolling window, oldest row first.
    pub fn window_snapshot(&self) -> ndarray::Array2<f64> {
        self.window.snapshot()
    }

    /// Relative time axis of the full history window.
    pub fn time_axis(&self) -> &[f64] {
        &self.time_axis
    }

    /// Drop all history and re-enter steady state, as if re-instantiated.
    pub fn reset(&mut self) {
        self.mode = Mode::Steady;
        self.window = HistoryWindow::new();
        self.outputs = OutputSeries::new(self.cfg.plot_length);
        self.boundary = None;
    }

    /// One externally visible tick: refresh the boundary from the latest
    /// stored betap, then advance the 0D state by 0.1 s.
    pub fn step(&mut self, controls: &ControlVector) -> SimResult<()> {
        self.refresh_boundary(controls)?;
        self.advance_0d(controls)
    }

    /// Batched stepping: `k` ticks with a single externally visible
    /// refresh after the last one. Python: `relaxRun`.
    pub fn relax(&mut self, k: usize, controls: &ControlVector) -> SimResult<()> {
        if k == 0 {
            return Err(SimError::ConfigError(
                "relax needs at least one step".to_string(),
            ));
        }
        for _ in 0..k - 1 {
            self.advance_0d(controls)?;
        }
        self.step(controls)
    }

    /// Shuffle the shape, recurrent and betap/wmhd families.
    pub fn shuffle_models<R: Rng>(&mut self, rng: &mut R) {
        self.suite.shuffle_all(rng);
    }

    /// Resize the recurrent and betap/wmhd families together.
    pub fn set_active_model_count(&mut self, n: usize) -> SimResult<()> {
        self.suite.set_active_count(n)
    }

    /// Textual snapshot of the time axis and all eight metric series.
    /// Python: `dumpOutput`.
    pub fn dump(&self) -> String {
        let len = self.outputs.len().min(self.time_axis.len());
        let ts = &self.time_axis[self.time_axis.len() - len..];
        let mut out = String::new();
        out.push_str(&format!("Time [s]: {ts:?}\n"));
        for m in Metric::ALL {
            out.push_str(&format!("{}: {:?}\n", m.name(), self.outputs.get(m).to_vec()));
        }
        out
    }

    /// Advance the 0D state by one tick. All predictions run before any
    /// state is committed.
    fn advance_0d(&mut self, controls: &ControlVector) -> SimResult<()> {
        let feats = encode::recurrent_features(controls, &self.cfg);

        let y0d = match self.mode {
            Mode::Steady => {
                let x = encode::steady_features(controls, &self.cfg);
                self.suite.steady.predict(&x)?
            }
            Mode::Transient => {
                let input = self.window.compose_input(feats.view());
                self.suite.recurrent.predict(&input)?
            }
        };
        if y0d.len() != N_OUTPUTS_0D {
            return Err(SimError::ShapeMismatch {
                got: y0d.len(),
                expected: N_OUTPUTS_0D,
            });
        }

        let xb = encode::bpw_features(y0d[0], controls);
        let ybpw = self.suite.bpw.predict(&xb)?;
        if ybpw.len() != 2 {
            return Err(SimError::ShapeMismatch {
                got: ybpw.len(),
                expected: 2,
            });
        }

        let hf = scaling::h_factors(
            controls,
            ybpw[1],
            &self.cfg.scaling,
            self.cfg.ptot_floor_mw,
        );

        // Commit phase: infallible from here on.
        match self.mode {
            Mode::Steady => {
                self.window.seed(y0d.view(), feats.view());
                self.mode = Mode::Transient;
            }
            Mode::Transient => {
                self.window.commit(feats.view(), y0d.view());
            }
        }

        self.outputs.push(Metric::Betan, y0d[0]);
        self.outputs.push(Metric::Q95, y0d[1]);
        self.outputs.push(Metric::Q0, y0d[2]);
        self.outputs.push(Metric::Li, y0d[3]);
        self.outputs.push(Metric::Betap, ybpw[0]);
        self.outputs.push(Metric::Wmhd, ybpw[1]);
        self.outputs.push(Metric::H89, hf.h89);
        self.outputs.push(Metric::H98, hf.h98);
        Ok(())
    }

    /// Re-derive the boundary snapshot from the shape model, using the
    /// previous tick's betap. Python: `predictBoundary`.
    fn refresh_boundary(&mut self, controls: &ControlVector) -> SimResult<()> {
        let betap = self.outputs.latest(Metric::Betap);
        let x = encode::shape_features(betap, controls);
        let y = self.suite.shape.predict(&x)?;
        let curve = decode_boundary(&y)?;

        let analysis = self.analyzer.analyze(&curve).ok_or_else(|| {
            SimError::ModelError("shape model produced a degenerate boundary".to_string())
        })?;

        self.boundary = Some(PlasmaBoundary {
            curve,
            x_points: analysis.x_points,
            strikes: analysis.strikes,
        });
        Ok(())
    }
}
