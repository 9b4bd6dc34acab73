// ─────────────────────────────────────────────────────────────────────
// KSTAR Surrogate Sim — Dense Surrogate Member
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Dense feedforward ensemble member (tanh hidden layers, linear output).
//!
//! The Rust side of the `kstar_nn` / `tf_dense_model` / `k2rz` families of
//! `kstar_simulator_v1.py`: the trained weights are external artifacts
//! loaded from NumPy `.npz` archives (`w1, b1, ..., wK, bK`), the forward
//! pass is fixed.

use crate::ensemble::{NpzLoadable, Regressor};
use kstar_types::error::{SimError, SimResult};
use ndarray::{Array1, Array2, ArrayView1};
use ndarray_npy::NpzReader;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct MlpRegressor {
    /// (weight, bias) per layer; weight shape (fan_in, fan_out).
    layers: Vec<(Array2<f64>, Array1<f64>)>,
}

impl MlpRegressor {
    /// Build from explicit layers, validating the dimension chain.
    pub fn from_layers(layers: Vec<(Array2<f64>, Array1<f64>)>) -> SimResult<Self> {
        if layers.is_empty() {
            return Err(SimError::ConfigError(
                "dense model needs at least one layer".to_string(),
            ));
        }
        for (k, (w, b)) in layers.iter().enumerate() {
            if w.ncols() != b.len() {
                return Err(SimError::ConfigError(format!(
                    "layer {} bias length {} does not match weight fan-out {}",
                    k + 1,
                    b.len(),
                    w.ncols()
                )));
            }
            if k > 0 && layers[k - 1].0.ncols() != w.nrows() {
                return Err(SimError::ConfigError(format!(
                    "layer {} fan-in {} does not match previous fan-out {}",
                    k + 1,
                    w.nrows(),
                    layers[k - 1].0.ncols()
                )));
            }
        }
        Ok(MlpRegressor { layers })
    }

    pub fn input_dim(&self) -> usize {
        self.layers[0].0.nrows()
    }

    pub fn forward(&self, x: ArrayView1<f64>) -> Array1<f64> {
        let last = self.layers.len() - 1;
        let mut h = x.to_owned();
        for (k, (w, b)) in self.layers.iter().enumerate() {
            h = h.dot(w) + b;
            if k < last {
                h.mapv_inplace(f64::tanh);
            }
        }
        h
    }
}

impl Regressor for MlpRegressor {
    type Input = Array1<f64>;

    fn predict(&self, x: &Array1<f64>) -> SimResult<Array1<f64>> {
        if x.len() != self.input_dim() {
            return Err(SimError::ShapeMismatch {
                got: x.len(),
                expected: self.input_dim(),
            });
        }
        Ok(self.forward(x.view()))
    }

    fn output_dim(&self) -> usize {
        self.layers[self.layers.len() - 1].0.ncols()
    }
}

impl NpzLoadable for MlpRegressor {
    /// Load `w1, b1, ..., wK, bK` from a `.npz` weight archive.
    fn from_npz(path: &Path) -> SimResult<Self> {
        let file = File::open(path)?;
        let mut npz = NpzReader::new(file).map_err(|e| {
            SimError::ConfigError(format!("Failed to open npz '{}': {e}", path.display()))
        })?;

        let names = npz.names().map_err(|e| {
            SimError::ConfigError(format!("Failed to list npz '{}': {e}", path.display()))
        })?;
        let n_layers = names
            .iter()
            .filter(|n| n.trim_end_matches(".npy").starts_with('w'))
            .count();
        if n_layers == 0 {
            return Err(SimError::ConfigError(format!(
                "No weight arrays in npz '{}'",
                path.display()
            )));
        }

        let mut layers = Vec::with_capacity(n_layers);
        for k in 1..=n_layers {
            let w = read_array2(&mut npz, &format!("w{k}"), path)?;
            let b = read_array1(&mut npz, &format!("b{k}"), path)?;
            layers.push((w, b));
        }
        MlpRegressor::from_layers(layers)
    }
}

pub(crate) fn read_array1(
    npz: &mut NpzReader<File>,
    key: &str,
    path: &Path,
) -> SimResult<Array1<f64>> {
    npz.by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix1>(&format!("{key}.npy"))
        .or_else(|_| npz.by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix1>(key))
        .map_err(|e| {
            SimError::ConfigError(format!(
                "Failed to read {key} from '{}': {e}",
                path.display()
            ))
        })
}

pub(crate) fn read_array2(
    npz: &mut NpzReader<File>,
    key: &str,
    path: &Path,
) -> SimResult<Array2<f64>> {
    npz.by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix2>(&format!("{key}.npy"))
        .or_else(|_| npz.by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix2>(key))
        .map_err(|e| {
            SimError::ConfigError(format!(
                "Failed to read {key} from '{}': {e}",
                path.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use ndarray_npy::NpzWriter;

    /// 2 -> 2 -> 1 net with a sparse deterministic pathway.
    fn tiny_net() -> MlpRegressor {
        let w1 = array![[1.0, 0.0], [0.0, 1.0]];
        let b1 = array![0.0, 0.0];
        let w2 = array![[1.0], [-1.0]];
        let b2 = array![0.5];
        MlpRegressor::from_layers(vec![(w1, b1), (w2, b2)]).unwrap()
    }

    #[test]
    fn test_forward_tanh_hidden_linear_output() {
        let net = tiny_net();
        let y = net.predict(&array![0.25, -0.5]).unwrap();
        let expected = 0.25f64.tanh() - (-0.5f64).tanh() + 0.5;
        assert_eq!(y.len(), 1);
        assert!((y[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_dims() {
        let net = tiny_net();
        assert_eq!(net.input_dim(), 2);
        assert_eq!(net.output_dim(), 1);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let net = tiny_net();
        let err = net.predict(&array![1.0, 2.0, 3.0]);
        assert!(matches!(
            err,
            Err(SimError::ShapeMismatch {
                got: 3,
                expected: 2
            })
        ));
    }

    #[test]
    fn test_bad_layer_chain_rejected() {
        let w1 = Array2::zeros((2, 3));
        let b1 = Array1::zeros(3);
        let w2 = Array2::zeros((4, 1)); // fan-in should be 3
        let b2 = Array1::zeros(1);
        assert!(MlpRegressor::from_layers(vec![(w1, b1), (w2, b2)]).is_err());
    }

    #[test]
    fn test_npz_roundtrip() {
        let net = tiny_net();
        let path = std::env::temp_dir().join(format!("kstar_mlp_{}.npz", std::process::id()));

        let file = File::create(&path).unwrap();
        let mut writer = NpzWriter::new(file);
        writer.add_array("w1", &net.layers[0].0).unwrap();
        writer.add_array("b1", &net.layers[0].1).unwrap();
        writer.add_array("w2", &net.layers[1].0).unwrap();
        writer.add_array("b2", &net.layers[1].1).unwrap();
        writer.finish().unwrap();

        let loaded = MlpRegressor::from_npz(&path).unwrap();
        let x = array![0.1, 0.9];
        let y0 = net.predict(&x).unwrap();
        let y1 = loaded.predict(&x).unwrap();
        assert!((y0[0] - y1[0]).abs() < 1e-15);

        std::fs::remove_file(path).ok();
    }
}
