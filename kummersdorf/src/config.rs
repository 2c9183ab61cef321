use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Trading days per year.
pub const DEFAULT_FREQ: u32 = 252;
pub const DEFAULT_RISK_FREE: f64 = 0.0;
/// Added to every volatility denominator so a flat series still yields a
/// finite ratio.
pub const DEFAULT_EPSILON: f64 = 1e-7;

/// Parameters shared by every ratio formula.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RatioConfig {
    /// Periods per year, used to annualize per-period statistics.
    pub freq: u32,
    /// Per-period risk-free rate subtracted before computing excess returns.
    pub rfr: f64,
    /// Additive guard on volatility denominators.
    pub eps: f64,
}

impl Default for RatioConfig {
    fn default() -> Self {
        Self {
            freq: DEFAULT_FREQ,
            rfr: DEFAULT_RISK_FREE,
            eps: DEFAULT_EPSILON,
        }
    }
}

impl RatioConfig {
    #[must_use]
    pub fn new(freq: u32, rfr: f64) -> Self {
        Self {
            freq,
            rfr,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_freq(mut self, freq: u32) -> Self {
        self.freq = freq;
        self
    }

    #[must_use]
    pub const fn with_rfr(mut self, rfr: f64) -> Self {
        self.rfr = rfr;
        self
    }

    #[must_use]
    pub const fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.freq == 0 {
            return Err(Error::InvalidConfig("freq must be positive".to_owned()));
        }
        if !self.rfr.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "rfr must be finite, got {}",
                self.rfr
            )));
        }
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "eps must be positive and finite, got {}",
                self.eps
            )));
        }
        Ok(())
    }

    pub(crate) fn sqrt_freq(&self) -> f64 {
        f64::from(self.freq).sqrt()
    }
}

#[cfg(test)]
mod test {
    use super::{RatioConfig, DEFAULT_EPSILON};

    #[test]
    fn defaults() {
        let cfg = RatioConfig::default();
        assert_eq!(cfg.freq, 252);
        assert_eq!(cfg.rfr, 0.0);
        assert_eq!(cfg.eps, DEFAULT_EPSILON);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(RatioConfig::default().with_freq(0).validate().is_err());
        assert!(RatioConfig::default()
            .with_rfr(f64::NAN)
            .validate()
            .is_err());
        assert!(RatioConfig::default().with_eps(0.0).validate().is_err());
        assert!(RatioConfig::default().with_eps(-1e-9).validate().is_err());
    }
}
