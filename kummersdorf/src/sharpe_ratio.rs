use statrs::statistics::Statistics;
use tracing::{debug, warn};

use crate::{error::finite, RatioConfig, Result, ReturnSeries, Returns};

/// `sqrt(freq) * mean(r - rfr) / (std(r - rfr) + eps)`.
///
/// Volatility is the population standard deviation. The `eps` guard keeps
/// the ratio finite for a flat series. Inputs so large that the moments
/// leave the `f64` range fail with [`crate::Error::NonFiniteResult`].
pub fn sharpe_ratio(returns: &ReturnSeries, cfg: &RatioConfig) -> Result<f64> {
    cfg.validate()?;
    let excess: Vec<f64> = returns.iter().map(|x| x - cfg.rfr).collect();
    let mean = excess.iter().mean();
    let std = excess.iter().population_std_dev();
    if std <= f64::EPSILON {
        warn!(std, eps = cfg.eps, "volatility is zero, sharpe ratio bounded by eps");
    }
    let value = cfg.sqrt_freq() * mean / (std + cfg.eps);
    debug!(n = returns.len(), mean, std, value, "sharpe ratio");
    finite("sharpe ratio", value)
}

pub trait SharpeRatioExt: Returns {
    fn sharpe_ratio(&self, cfg: &RatioConfig) -> Result<f64> {
        sharpe_ratio(self.returns(), cfg)
    }
}

impl<T: Returns + ?Sized> SharpeRatioExt for T {}
