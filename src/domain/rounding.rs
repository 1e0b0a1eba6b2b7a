//! Decimal rounding applied to redistributed shares.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// Upper bound on decimals; beyond this `10^decimals` scaling loses precision.
pub const MAX_DECIMALS: u32 = 10;

/// How ties (x.5) are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// 0.125 -> 0.13, -0.125 -> -0.13
    #[default]
    HalfAwayFromZero,
    /// Banker's rounding: 0.125 -> 0.12, 0.375 -> 0.38
    HalfEven,
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingMode::HalfAwayFromZero => f.write_str("half_away_from_zero"),
            RoundingMode::HalfEven => f.write_str("half_even"),
        }
    }
}

impl FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "half_away_from_zero" | "half_up" => Ok(RoundingMode::HalfAwayFromZero),
            "half_even" | "bankers" => Ok(RoundingMode::HalfEven),
            other => Err(format!("unknown rounding mode: {other}")),
        }
    }
}

/// Number of decimals and tie-breaking rule used for every written share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundingPolicy {
    pub decimals: u32,
    pub mode: RoundingMode,
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self {
            decimals: 2,
            mode: RoundingMode::HalfAwayFromZero,
        }
    }
}

impl RoundingPolicy {
    pub fn new(decimals: u32, mode: RoundingMode) -> Result<Self, DomainError> {
        if decimals > MAX_DECIMALS {
            return Err(DomainError::InvalidPrecision(decimals));
        }
        Ok(Self { decimals, mode })
    }

    /// Round to `decimals` places. Magnitudes too large to scale are already
    /// integral and come back unchanged.
    pub fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.decimals as i32);
        let scaled = value * factor;
        if !scaled.is_finite() {
            return value;
        }
        let rounded = match self.mode {
            RoundingMode::HalfAwayFromZero => scaled.round(),
            RoundingMode::HalfEven => scaled.round_ties_even(),
        };
        rounded / factor
    }

    /// Smallest representable step, e.g. 0.01 for two decimals.
    pub fn unit(&self) -> f64 {
        10f64.powi(-(self.decimals as i32))
    }

    /// Format for display with the configured number of decimals.
    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.decimals as usize, self.round(value))
    }
}
