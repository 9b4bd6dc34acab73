// ─────────────────────────────────────────────────────────────────────
// KSTAR Surrogate Sim — Rolling History Window
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Rolling feature window for the recurrent model.
//!
//! Port of the `self.x` bookkeeping in `predict0d`. The original shifts
//! the full 10x18 matrix twice per transient tick; here each column group
//! is a ring (arena + head index) because the groups shift at different
//! moments: features advance *before* the recurrent predict, outputs
//! *after*. `compose_input` reproduces the exact intermediate matrix the
//! original hands to the LSTM, without mutating anything.

use kstar_types::constants::{N_OUTPUTS_0D, WINDOW_COLS, WINDOW_ROWS};
use ndarray::{s, Array2, ArrayView1};

/// Fixed-size ring of rows over a preallocated arena.
#[derive(Debug, Clone)]
struct RingRows {
    data: Array2<f64>,
    head: usize,
}

impl RingRows {
    fn new(rows: usize, cols: usize) -> Self {
        RingRows {
            data: Array2::zeros((rows, cols)),
            head: 0,
        }
    }

    fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Broadcast one row across the whole ring.
    fn fill(&mut self, row: ArrayView1<f64>) {
        for mut r in self.data.outer_iter_mut() {
            r.assign(&row);
        }
        self.head = 0;
    }

    /// Drop the oldest row and append `row` as the newest.
    fn push(&mut self, row: ArrayView1<f64>) {
        self.data.row_mut(self.head).assign(&row);
        self.head = (self.head + 1) % self.rows();
    }

    /// Logical row `i` (0 = oldest).
    fn row(&self, i: usize) -> ndarray::ArrayView1<f64> {
        self.data.row((self.head + i) % self.rows())
    }
}

/// The 10x18 recurrent-model history: output columns 0..4, feature
/// columns 4..18.
#[derive(Debug, Clone)]
pub struct HistoryWindow {
    outputs: RingRows,
    features: RingRows,
}

impl HistoryWindow {
    pub fn new() -> Self {
        HistoryWindow {
            outputs: RingRows::new(WINDOW_ROWS, N_OUTPUTS_0D),
            features: RingRows::new(WINDOW_ROWS, WINDOW_COLS - N_OUTPUTS_0D),
        }
    }

    /// Steady-state seeding: broadcast the 0D result and the current
    /// feature row across all rows. Python: `self.x[:, :4] = y` plus the
    /// column-wise feature assignment.
    pub fn seed(&mut self, outputs: ArrayView1<f64>, features: ArrayView1<f64>) {
        self.outputs.fill(outputs);
        self.features.fill(features);
    }

    /// The matrix handed to the recurrent model in a transient tick:
    /// feature columns already shifted (rows 1.. plus the pending row),
    /// output columns still in pre-shift alignment.
    pub fn compose_input<'a>(&'a self, pending_features: ArrayView1<'a, f64>) -> Array2<f64> {
        let rows = self.outputs.rows();
        let mut x = Array2::zeros((rows, WINDOW_COLS));
        for i in 0..rows {
            x.slice_mut(s![i, ..N_OUTPUTS_0D])
                .assign(&self.outputs.row(i));
            let feat = if i + 1 < rows {
                self.features.row(i + 1)
            } else {
                pending_features
            };
            x.slice_mut(s![i, N_OUTPUTS_0D..]).assign(&feat);
        }
        x
    }

    /// Commit a transient tick: the pending feature row and the fresh
    /// prediction become the newest rows of their rings.
    pub fn commit(&mut self, features: ArrayView1<f64>, outputs: ArrayView1<f64>) {
        self.features.push(features);
        self.outputs.push(outputs);
    }

    /// Aligned post-commit view of the window (oldest row first); used by
    /// tests and diagnostics, not by the model path.
    pub fn snapshot(&self) -> Array2<f64> {
        let rows = self.outputs.rows();
        let mut x = Array2::zeros((rows, WINDOW_COLS));
        for i in 0..rows {
            x.slice_mut(s![i, ..N_OUTPUTS_0D])
                .assign(&self.outputs.row(i));
            x.slice_mut(s![i, N_OUTPUTS_0D..])
                .assign(&self.features.row(i));
        }
        x
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        HistoryWindow::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn constant_row(len: usize, v: f64) -> Array1<f64> {
        Array1::from_elem(len, v)
    }

    #[test]
    fn test_seed_broadcasts_all_rows() {
        let mut w = HistoryWindow::new();
        let y = constant_row(4, 2.0);
        let f = constant_row(14, 7.0);
        w.seed(y.view(), f.view());
        let snap = w.snapshot();
        assert_eq!(snap.dim(), (10, 18));
        for i in 0..10 {
            for j in 0..4 {
                assert!((snap[[i, j]] - 2.0).abs() < 1e-15);
            }
            for j in 4..18 {
                assert!((snap[[i, j]] - 7.0).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn test_compose_input_misaligned_groups() {
        let mut w = HistoryWindow::new();
        w.seed(constant_row(4, 1.0).view(), constant_row(14, 1.0).view());
        // One committed tick so rows are distinguishable.
        w.commit(constant_row(14, 2.0).view(), constant_row(4, 2.0).view());

        let pending = constant_row(14, 3.0);
        let x = w.compose_input(pending.view());

        // Output columns: pre-shift alignment -> rows 0..8 seeded, row 9
        // holds the committed 2.0.
        for i in 0..9 {
            assert!((x[[i, 0]] - 1.0).abs() < 1e-15, "row {i}");
        }
        assert!((x[[9, 0]] - 2.0).abs() < 1e-15);

        // Feature columns: shifted -> rows 0..7 seeded, row 8 = 2.0,
        // row 9 = pending 3.0.
        for i in 0..8 {
            assert!((x[[i, 4]] - 1.0).abs() < 1e-15, "row {i}");
        }
        assert!((x[[8, 4]] - 2.0).abs() < 1e-15);
        assert!((x[[9, 4]] - 3.0).abs() < 1e-15);
    }

    #[test]
    fn test_commit_drops_oldest() {
        let mut w = HistoryWindow::new();
        w.seed(constant_row(4, 0.0).view(), constant_row(14, 0.0).view());
        for k in 1..=10 {
            w.commit(
                constant_row(14, k as f64).view(),
                constant_row(4, k as f64).view(),
            );
        }
        let snap = w.snapshot();
        // All seeded rows displaced; oldest is now 1.0, newest 10.0.
        assert!((snap[[0, 0]] - 1.0).abs() < 1e-15);
        assert!((snap[[9, 0]] - 10.0).abs() < 1e-15);
        assert!((snap[[9, 4]] - 10.0).abs() < 1e-15);
    }

    #[test]
    fn test_compose_does_not_mutate() {
        let mut w = HistoryWindow::new();
        w.seed(constant_row(4, 1.0).view(), constant_row(14, 1.0).view());
        let before = w.snapshot();
        let _ = w.compose_input(constant_row(14, 9.0).view());
        let after = w.snapshot();
        assert_eq!(before, after);
    }
}
