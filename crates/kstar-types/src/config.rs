// ─────────────────────────────────────────────────────────────────────
// KSTAR Surrogate Sim — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Simulator configuration.
//!
//! The original keeps these as module-level globals (`plot_length`,
//! `year_in`, the confinement-law constants inline in `predict0d`); here
//! they form one immutable structure handed to the engine at construction
//! so the exponent sets can be validated independently of the code.

use crate::constants;
use serde::{Deserialize, Serialize};

/// How the transient encoding fills the EC wave-power feature column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EcWaveFeature {
    /// Both launcher powers combined into the column (Pec2 + Pec3).
    /// Matches the original's overwrite-then-add within a single tick.
    #[default]
    Summed,
    /// Only the second launcher (Pec3) lands in the column.
    SecondLauncherOnly,
}

/// One empirical confinement-time power law:
/// `tau = coeff * Ip^a_ip * Bt^a_bt * ne^a_ne * P^a_ptot * R^a_rgeo
///        * kappa^a_kappa * (a/R)^a_eps * M^a_mass`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConfinementLaw {
    pub coeff: f64,
    pub a_ip: f64,
    pub a_bt: f64,
    pub a_ne: f64,
    pub a_ptot: f64,
    pub a_rgeo: f64,
    pub a_kappa: f64,
    pub a_eps: f64,
    pub a_mass: f64,
}

impl ConfinementLaw {
    /// ITER-89P L-mode scaling. Python: tau89 line of `predict0d`.
    pub const fn iter89p() -> Self {
        ConfinementLaw {
            coeff: 0.038,
            a_ip: 0.85,
            a_bt: 0.2,
            a_ne: 0.1,
            a_ptot: -0.5,
            a_rgeo: 1.5,
            a_kappa: 0.5,
            a_eps: 0.3,
            a_mass: 0.5,
        }
    }

    /// IPB98(y,2) H-mode scaling. Python: tau98 line of `predict0d`.
    pub const fn ipb98y2() -> Self {
        ConfinementLaw {
            coeff: 0.0562,
            a_ip: 0.93,
            a_bt: 0.15,
            a_ne: 0.41,
            a_ptot: -0.69,
            a_rgeo: 1.97,
            a_kappa: 0.78,
            a_eps: 0.58,
            a_mass: 0.19,
        }
    }
}

/// The two confinement laws driving the H-factor estimates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScalingLaws {
    #[serde(default = "default_tau89")]
    pub tau89: ConfinementLaw,
    #[serde(default = "default_tau98")]
    pub tau98: ConfinementLaw,
}

fn default_tau89() -> ConfinementLaw {
    ConfinementLaw::iter89p()
}

fn default_tau98() -> ConfinementLaw {
    ConfinementLaw::ipb98y2()
}

impl Default for ScalingLaws {
    fn default() -> Self {
        ScalingLaws {
            tau89: ConfinementLaw::iter89p(),
            tau98: ConfinementLaw::ipb98y2(),
        }
    }
}

/// Top-level simulator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Output-history capacity. Python: plot_length = 40.
    #[serde(default = "default_plot_length")]
    pub plot_length: usize,
    /// Simulation time step [s].
    #[serde(default = "default_time_step")]
    pub time_step_s: f64,
    /// Campaign-year epoch feature. Python: year_in = 2021.
    #[serde(default = "default_year_in")]
    pub year_in: f64,
    /// Heating-power floor in the H-factor denominator [MW].
    #[serde(default = "default_ptot_floor")]
    pub ptot_floor_mw: f64,
    /// EC wave-power feature policy for the transient encoding.
    #[serde(default)]
    pub ec_wave_feature: EcWaveFeature,
    /// Confinement-law coefficient sets.
    #[serde(default)]
    pub scaling: ScalingLaws,
    /// Strike-line samples per extrapolation branch. Python: n = 10.
    #[serde(default = "default_strike_samples")]
    pub strike_samples: usize,
}

fn default_plot_length() -> usize {
    constants::PLOT_LENGTH
}

fn default_time_step() -> f64 {
    constants::TIME_STEP_S
}

fn default_year_in() -> f64 {
    constants::YEAR_IN
}

fn default_ptot_floor() -> f64 {
    constants::PTOT_FLOOR_MW
}

fn default_strike_samples() -> usize {
    10
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            plot_length: constants::PLOT_LENGTH,
            time_step_s: constants::TIME_STEP_S,
            year_in: constants::YEAR_IN,
            ptot_floor_mw: constants::PTOT_FLOOR_MW,
            ec_wave_feature: EcWaveFeature::Summed,
            scaling: ScalingLaws::default(),
            strike_samples: 10,
        }
    }
}

impl SimConfig {
    /// Load from a JSON file; absent fields fall back to the defaults.
    pub fn from_file(path: &str) -> crate::error::SimResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::error::SimResult<()> {
        if self.plot_length < 2 {
            return Err(crate::error::SimError::ConfigError(format!(
                "plot_length must be >= 2, got {}",
                self.plot_length
            )));
        }
        if !(self.time_step_s.is_finite() && self.time_step_s > 0.0) {
            return Err(crate::error::SimError::ConfigError(format!(
                "time_step_s must be finite and > 0, got {}",
                self.time_step_s
            )));
        }
        if !(self.ptot_floor_mw.is_finite() && self.ptot_floor_mw > 0.0) {
            return Err(crate::error::SimError::ConfigError(format!(
                "ptot_floor_mw must be finite and > 0, got {}",
                self.ptot_floor_mw
            )));
        }
        if self.strike_samples < 2 {
            return Err(crate::error::SimError::ConfigError(format!(
                "strike_samples must be >= 2, got {}",
                self.strike_samples
            )));
        }
        Ok(())
    }
}
