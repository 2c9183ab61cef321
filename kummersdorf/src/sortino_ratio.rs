use statrs::statistics::Statistics;
use tracing::{debug, warn};

use crate::{error::finite, RatioConfig, Result, ReturnSeries, Returns};

/// `(mean(r) - rfr) * sqrt(freq) / (downside_std + eps)`.
///
/// The downside set holds returns strictly below `rfr`; its deviation is the
/// sample standard deviation of `(r - rfr)` over that set. With fewer than
/// two downside returns the deviation is taken as zero, so the result is
/// bounded only by `eps` instead of being undefined.
pub fn sortino_ratio(returns: &ReturnSeries, cfg: &RatioConfig) -> Result<f64> {
    cfg.validate()?;
    let expected = returns.iter().mean();
    let downside: Vec<f64> = returns
        .iter()
        .filter(|x| **x < cfg.rfr)
        .map(|x| x - cfg.rfr)
        .collect();
    let downside_std = if downside.len() < 2 {
        warn!(
            n = downside.len(),
            "too few returns below the risk-free rate, downside deviation taken as zero"
        );
        0.0
    } else {
        downside.iter().std_dev()
    };
    let value = (expected - cfg.rfr) * cfg.sqrt_freq() / (downside_std + cfg.eps);
    debug!(n = returns.len(), downside = downside.len(), downside_std, value, "sortino ratio");
    finite("sortino ratio", value)
}

pub trait SortinoRatioExt: Returns {
    fn sortino_ratio(&self, cfg: &RatioConfig) -> Result<f64> {
        sortino_ratio(self.returns(), cfg)
    }
}

impl<T: Returns + ?Sized> SortinoRatioExt for T {}
