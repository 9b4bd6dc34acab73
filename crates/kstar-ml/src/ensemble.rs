// ─────────────────────────────────────────────────────────────────────
// KSTAR Surrogate Sim — Ensemble
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Size-selectable, shuffleable model ensembles.
//!
//! Mirrors the `n_models` / `np.random.shuffle(self.models)` semantics of
//! `kstar_simulator_v1.py`: prediction is the elementwise mean over the
//! first `n_active` members in current order, shuffling permutes order
//! only (never membership), and the betap/wmhd family de-normalizes its
//! averaged output with a fixed mean/std pair.

use kstar_types::error::{SimError, SimResult};
use ndarray::Array1;
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::Path;

/// One trained member of a model family.
pub trait Regressor {
    type Input;

    fn predict(&self, x: &Self::Input) -> SimResult<Array1<f64>>;

    fn output_dim(&self) -> usize;
}

/// A member type that can be restored from a `.npz` weight archive.
pub trait NpzLoadable: Sized {
    fn from_npz(path: &Path) -> SimResult<Self>;
}

/// Per-dimension affine de-normalization applied after averaging.
#[derive(Debug, Clone)]
pub struct OutputDenorm {
    pub mean: Array1<f64>,
    pub std: Array1<f64>,
}

impl OutputDenorm {
    pub fn new(mean: Vec<f64>, std: Vec<f64>) -> SimResult<Self> {
        if mean.len() != std.len() {
            return Err(SimError::ConfigError(format!(
                "denorm mean length {} does not match std length {}",
                mean.len(),
                std.len()
            )));
        }
        Ok(OutputDenorm {
            mean: Array1::from_vec(mean),
            std: Array1::from_vec(std),
        })
    }
}

/// An ordered collection of independently trained members.
pub struct Ensemble<M: Regressor> {
    members: Vec<M>,
    n_active: usize,
    denorm: Option<OutputDenorm>,
}

impl<M: Regressor> Ensemble<M> {
    pub fn new(members: Vec<M>, n_active: usize) -> SimResult<Self> {
        if members.is_empty() {
            return Err(SimError::ConfigError(
                "ensemble needs at least one member".to_string(),
            ));
        }
        let out = members[0].output_dim();
        if members.iter().any(|m| m.output_dim() != out) {
            return Err(SimError::ConfigError(
                "ensemble members disagree on output width".to_string(),
            ));
        }
        let mut ensemble = Ensemble {
            members,
            n_active: 1,
            denorm: None,
        };
        ensemble.set_active_count(n_active)?;
        Ok(ensemble)
    }

    /// Attach output de-normalization constants (mean/std per dimension).
    pub fn with_denorm(mut self, denorm: OutputDenorm) -> SimResult<Self> {
        let out = self.members[0].output_dim();
        if denorm.mean.len() != out {
            return Err(SimError::ConfigError(format!(
                "denorm width {} does not match model output width {out}",
                denorm.mean.len()
            )));
        }
        self.denorm = Some(denorm);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.n_active
    }

    /// Set the evaluation count for subsequent predictions.
    pub fn set_active_count(&mut self, n: usize) -> SimResult<()> {
        if n < 1 || n > self.members.len() {
            return Err(SimError::ConfigError(format!(
                "active count {} outside [1, {}]",
                n,
                self.members.len()
            )));
        }
        self.n_active = n;
        Ok(())
    }

    /// Elementwise mean over the first `n_active` members, then optional
    /// de-normalization.
    pub fn predict(&self, x: &M::Input) -> SimResult<Array1<f64>> {
        self.predict_with(x, self.n_active)
    }

    /// Same as `predict`, with an explicit evaluation count. The count is
    /// validated, never clamped silently.
    pub fn predict_with(&self, x: &M::Input, count: usize) -> SimResult<Array1<f64>> {
        if count < 1 || count > self.members.len() {
            return Err(SimError::ConfigError(format!(
                "evaluation count {} outside [1, {}]",
                count,
                self.members.len()
            )));
        }
        let mut acc = Array1::<f64>::zeros(self.members[0].output_dim());
        for member in &self.members[..count] {
            let y = member.predict(x)?;
            if y.len() != acc.len() {
                return Err(SimError::ShapeMismatch {
                    got: y.len(),
                    expected: acc.len(),
                });
            }
            acc += &y;
        }
        acc /= count as f64;

        if let Some(denorm) = &self.denorm {
            acc = acc * &denorm.std + &denorm.mean;
        }
        Ok(acc)
    }

    /// Uniform-random permutation of member order. Membership and size
    /// are untouched; with `n_active < len` the selected subset changes.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.members.shuffle(rng);
    }
}

impl<M: Regressor + NpzLoadable> Ensemble<M> {
    /// Load the first `n_models` members from a weights directory.
    ///
    /// Members are the `.npz` files in lexicographic order, as the
    /// original loads `model_path` archives. Missing or malformed weights
    /// are fatal configuration errors.
    pub fn from_dir(dir: &Path, n_models: usize) -> SimResult<Self> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().map(|e| e == "npz").unwrap_or(false))
            .collect();
        paths.sort();

        if paths.len() < n_models {
            return Err(SimError::ConfigError(format!(
                "weights directory '{}' holds {} members, {} requested",
                dir.display(),
                paths.len(),
                n_models
            )));
        }

        let mut members = Vec::with_capacity(n_models);
        for path in paths.iter().take(n_models) {
            members.push(M::from_npz(path)?);
        }
        Ensemble::new(members, n_models)
    }
}
