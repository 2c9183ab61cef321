use statrs::statistics::Statistics;
use tracing::debug;

use crate::{
    drawdown::MaximumDrawdownExt, error::finite, Error, RatioConfig, Result, ReturnSeries,
    Returns,
};

/// `freq * mean(r - rfr) / mdd`, where `mdd` is the maximum drawdown of the
/// value path `exp(cumsum(r))`.
///
/// A path that never declines has no drawdown to divide by; that case is
/// reported as [`Error::UndefinedRatio`] instead of an infinity.
pub fn calmar_ratio(returns: &ReturnSeries, cfg: &RatioConfig) -> Result<f64> {
    cfg.validate()?;
    let mdd = returns.maximum_drawdown()?;
    if mdd <= 0.0 {
        return Err(Error::UndefinedRatio {
            ratio: "calmar",
            reason: "maximum drawdown is zero",
        });
    }
    let mean = returns.iter().map(|x| x - cfg.rfr).mean();
    let value = f64::from(cfg.freq) * mean / mdd;
    debug!(n = returns.len(), mean, mdd, value, "calmar ratio");
    finite("calmar ratio", value)
}

pub trait CalmarRatioExt: Returns {
    fn calmar_ratio(&self, cfg: &RatioConfig) -> Result<f64> {
        calmar_ratio(self.returns(), cfg)
    }
}

impl<T: Returns + ?Sized> CalmarRatioExt for T {}
