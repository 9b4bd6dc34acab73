// ─────────────────────────────────────────────────────────────────────
// KSTAR Surrogate Sim — Recurrent Surrogate Member
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Recurrent ensemble member: single LSTM layer plus a linear head.
//!
//! The `kstar_lstm` family of `kstar_simulator_v1.py`: consumes the full
//! 10x18 rolling window and emits the next 0D output row. Gates are packed
//! `[i | f | g | o]` along the last axis, Keras ordering.

use crate::ensemble::{NpzLoadable, Regressor};
use crate::mlp::{read_array1, read_array2};
use kstar_types::error::{SimError, SimResult};
use ndarray::{s, Array1, Array2, ArrayView2};
use ndarray_npy::NpzReader;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LstmRegressor {
    /// Input projection, shape (n_features, 4*hidden).
    w_x: Array2<f64>,
    /// Recurrent projection, shape (hidden, 4*hidden).
    w_h: Array2<f64>,
    /// Gate bias, length 4*hidden.
    b: Array1<f64>,
    /// Output head weight, shape (hidden, n_outputs).
    w_out: Array2<f64>,
    /// Output head bias, length n_outputs.
    b_out: Array1<f64>,
    hidden: usize,
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl LstmRegressor {
    pub fn new(
        w_x: Array2<f64>,
        w_h: Array2<f64>,
        b: Array1<f64>,
        w_out: Array2<f64>,
        b_out: Array1<f64>,
    ) -> SimResult<Self> {
        let hidden = w_h.nrows();
        if w_h.ncols() != 4 * hidden {
            return Err(SimError::ConfigError(format!(
                "recurrent weight must be (H, 4H), got ({}, {})",
                w_h.nrows(),
                w_h.ncols()
            )));
        }
        if w_x.ncols() != 4 * hidden {
            return Err(SimError::ConfigError(format!(
                "input weight fan-out {} does not match 4H = {}",
                w_x.ncols(),
                4 * hidden
            )));
        }
        if b.len() != 4 * hidden {
            return Err(SimError::ConfigError(format!(
                "gate bias length {} does not match 4H = {}",
                b.len(),
                4 * hidden
            )));
        }
        if w_out.nrows() != hidden {
            return Err(SimError::ConfigError(format!(
                "head fan-in {} does not match hidden size {}",
                w_out.nrows(),
                hidden
            )));
        }
        if w_out.ncols() != b_out.len() {
            return Err(SimError::ConfigError(format!(
                "head bias length {} does not match fan-out {}",
                b_out.len(),
                w_out.ncols()
            )));
        }
        Ok(LstmRegressor {
            w_x,
            w_h,
            b,
            w_out,
            b_out,
            hidden,
        })
    }

    pub fn input_dim(&self) -> usize {
        self.w_x.nrows()
    }

    /// Run the sequence through the cell; the final hidden state feeds the
    /// linear head.
    pub fn forward(&self, seq: ArrayView2<f64>) -> Array1<f64> {
        let h_size = self.hidden;
        let mut h = Array1::<f64>::zeros(h_size);
        let mut c = Array1::<f64>::zeros(h_size);

        for row in seq.outer_iter() {
            let gates = row.dot(&self.w_x) + h.dot(&self.w_h) + &self.b;
            let i = gates.slice(s![0..h_size]).mapv(sigmoid);
            let f = gates.slice(s![h_size..2 * h_size]).mapv(sigmoid);
            let g = gates.slice(s![2 * h_size..3 * h_size]).mapv(f64::tanh);
            let o = gates.slice(s![3 * h_size..4 * h_size]).mapv(sigmoid);
            c = &f * &c + &i * &g;
            h = &o * &c.mapv(f64::tanh);
        }

        h.dot(&self.w_out) + &self.b_out
    }
}

impl Regressor for LstmRegressor {
    type Input = Array2<f64>;

    fn predict(&self, x: &Array2<f64>) -> SimResult<Array1<f64>> {
        if x.ncols() != self.input_dim() {
            return Err(SimError::ShapeMismatch {
                got: x.ncols(),
                expected: self.input_dim(),
            });
        }
        if x.nrows() == 0 {
            return Err(SimError::ModelError(
                "recurrent model needs a non-empty window".to_string(),
            ));
        }
        Ok(self.forward(x.view()))
    }

    fn output_dim(&self) -> usize {
        self.b_out.len()
    }
}

impl NpzLoadable for LstmRegressor {
    /// Load `w_x, w_h, b, w_out, b_out` from a `.npz` weight archive.
    fn from_npz(path: &Path) -> SimResult<Self> {
        let file = File::open(path)?;
        let mut npz = NpzReader::new(file).map_err(|e| {
            SimError::ConfigError(format!("Failed to open npz '{}': {e}", path.display()))
        })?;

        LstmRegressor::new(
            read_array2(&mut npz, "w_x", path)?,
            read_array2(&mut npz, "w_h", path)?,
            read_array1(&mut npz, "b", path)?,
            read_array2(&mut npz, "w_out", path)?,
            read_array1(&mut npz, "b_out", path)?,
        )
    }
}
