// ─────────────────────────────────────────────────────────────────────
// KSTAR Surrogate Sim — Kstar Ml
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Surrogate regression models.
//!
//! Dense and recurrent member networks plus the size-selectable,
//! shuffleable ensemble combinator that drives them.

pub mod ensemble;
pub mod lstm;
pub mod mlp;

pub use ensemble::{Ensemble, NpzLoadable, OutputDenorm, Regressor};
pub use lstm::LstmRegressor;
pub use mlp::MlpRegressor;
