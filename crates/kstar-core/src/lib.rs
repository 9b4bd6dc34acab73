// ─────────────────────────────────────────────────────────────────────
// KSTAR Surrogate Sim — Kstar Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Simulation core: feature encoders, rolling history, scaling laws,
//! boundary geometry, and the plasma state engine.
//!
//! Port of the non-GUI logic of `kstar_simulator_v1.py`.

pub mod boundary;
pub mod encode;
pub mod engine;
pub mod models;
pub mod scaling;
pub mod wall;
pub mod window;

pub use engine::{Mode, PlasmaBoundary, PlasmaStateEngine};
pub use models::SurrogateSuite;
