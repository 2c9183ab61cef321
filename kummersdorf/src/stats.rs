use statrs::statistics::Statistics;
use tracing::debug;

use crate::{
    calmar_ratio::calmar_ratio, drawdown::MaximumDrawdownExt, sharpe_ratio::sharpe_ratio,
    error::finite, sortino_ratio::sortino_ratio, Error, RatioConfig, Result, ReturnSeries,
};

/// Arithmetic mean return scaled by `freq`.
pub fn annualized_return(returns: &ReturnSeries, cfg: &RatioConfig) -> Result<f64> {
    cfg.validate()?;
    finite("annualized return", returns.iter().mean() * f64::from(cfg.freq))
}

/// Population standard deviation scaled by `sqrt(freq)`.
pub fn annualized_volatility(returns: &ReturnSeries, cfg: &RatioConfig) -> Result<f64> {
    cfg.validate()?;
    finite(
        "annualized volatility",
        returns.iter().population_std_dev() * cfg.sqrt_freq(),
    )
}

/// Share of strictly positive returns.
#[must_use]
pub fn win_rate(returns: &ReturnSeries) -> f64 {
    let wins = returns.iter().filter(|x| **x > 0.0).count();
    wins as f64 / returns.len() as f64
}

/// Mean positive return over the absolute mean negative return.
pub fn win_loss_ratio(returns: &ReturnSeries) -> Result<f64> {
    let wins: Vec<f64> = returns.iter().copied().filter(|x| *x > 0.0).collect();
    let losses: Vec<f64> = returns.iter().copied().filter(|x| *x < 0.0).collect();
    if wins.is_empty() || losses.is_empty() {
        return Err(Error::InsufficientData {
            statistic: "win/loss ratio",
            reason: "needs at least one positive and one negative return",
        });
    }
    finite(
        "win/loss ratio",
        wins.iter().mean() / losses.iter().mean().abs(),
    )
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DescriptiveStats {
    pub annualized_return: f64,
    pub annualized_volatility: f64,
    pub win_rate: f64,
    pub win_loss_ratio: f64,
}

pub fn descriptive_stats(returns: &ReturnSeries, cfg: &RatioConfig) -> Result<DescriptiveStats> {
    Ok(DescriptiveStats {
        annualized_return: annualized_return(returns, cfg)?,
        annualized_volatility: annualized_volatility(returns, cfg)?,
        win_rate: win_rate(returns),
        win_loss_ratio: win_loss_ratio(returns)?,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    Sharpe,
    Sortino,
    Calmar,
    MaxDrawdown,
    AnnualizedReturn,
    AnnualizedVolatility,
    WinRate,
    WinLossRatio,
}

impl Metric {
    pub const ALL: [Self; 8] = [
        Self::Sharpe,
        Self::Sortino,
        Self::Calmar,
        Self::MaxDrawdown,
        Self::AnnualizedReturn,
        Self::AnnualizedVolatility,
        Self::WinRate,
        Self::WinLossRatio,
    ];

    /// Stable machine-readable name.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Sharpe => "sharpe",
            Self::Sortino => "sortino",
            Self::Calmar => "calmar",
            Self::MaxDrawdown => "max_drawdown",
            Self::AnnualizedReturn => "annualized_return",
            Self::AnnualizedVolatility => "annualized_volatility",
            Self::WinRate => "win_rate",
            Self::WinLossRatio => "win_loss_ratio",
        }
    }
}

/// Every metric for one series. A metric that is undefined for this series
/// keeps its error; the others are still computed.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub observations: usize,
    pub sharpe: Result<f64>,
    pub sortino: Result<f64>,
    pub calmar: Result<f64>,
    pub max_drawdown: Result<f64>,
    pub annualized_return: Result<f64>,
    pub annualized_volatility: Result<f64>,
    pub win_rate: Result<f64>,
    pub win_loss_ratio: Result<f64>,
}

impl Summary {
    /// Fails only when `cfg` itself is invalid.
    pub fn compute(returns: &ReturnSeries, cfg: &RatioConfig) -> Result<Self> {
        cfg.validate()?;
        let summary = Self {
            observations: returns.len(),
            sharpe: sharpe_ratio(returns, cfg),
            sortino: sortino_ratio(returns, cfg),
            calmar: calmar_ratio(returns, cfg),
            max_drawdown: returns.maximum_drawdown(),
            annualized_return: annualized_return(returns, cfg),
            annualized_volatility: annualized_volatility(returns, cfg),
            win_rate: Ok(win_rate(returns)),
            win_loss_ratio: win_loss_ratio(returns),
        };
        debug!(observations = summary.observations, "summary computed");
        Ok(summary)
    }

    #[must_use]
    pub const fn get(&self, metric: Metric) -> &Result<f64> {
        match metric {
            Metric::Sharpe => &self.sharpe,
            Metric::Sortino => &self.sortino,
            Metric::Calmar => &self.calmar,
            Metric::MaxDrawdown => &self.max_drawdown,
            Metric::AnnualizedReturn => &self.annualized_return,
            Metric::AnnualizedVolatility => &self.annualized_volatility,
            Metric::WinRate => &self.win_rate,
            Metric::WinLossRatio => &self.win_loss_ratio,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, &Result<f64>)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;

    use super::{
        annualized_return, annualized_volatility, descriptive_stats, win_loss_ratio, win_rate,
        Metric, Summary,
    };
    use crate::{Error, RatioConfig, ReturnSeries};

    static XS: [f64; 10] = [
        0.003, 0.026, 0.015, -0.009, 0.014, 0.024, 0.015, 0.066, -0.014, 0.039,
    ];

    #[test]
    fn descriptive() {
        let ret = ReturnSeries::new(XS.to_vec()).unwrap();
        let stats = descriptive_stats(&ret, &RatioConfig::default()).unwrap();
        assert_approx_eq!(f64, 4.5108, stats.annualized_return, epsilon = 0.0000001);
        assert_approx_eq!(
            f64,
            0.349848367,
            stats.annualized_volatility,
            epsilon = 0.0000001
        );
        assert_approx_eq!(f64, 0.8, stats.win_rate, epsilon = 0.0000001);
        assert_approx_eq!(f64, 2.195652173, stats.win_loss_ratio, epsilon = 0.0000001);
    }

    #[test]
    fn zero_is_neither_win_nor_loss() {
        let ret = ReturnSeries::new(vec![0.0, 0.01, -0.01, 0.0]).unwrap();
        assert_approx_eq!(f64, 0.25, win_rate(&ret), epsilon = 0.0000001);
        assert_approx_eq!(f64, 1.0, win_loss_ratio(&ret).unwrap(), epsilon = 0.0000001);
    }

    #[test]
    fn win_loss_needs_both_sides() {
        let ret = ReturnSeries::new(vec![0.01, 0.02]).unwrap();
        assert!(matches!(
            win_loss_ratio(&ret),
            Err(Error::InsufficientData { .. })
        ));
        let ret = ReturnSeries::new(vec![-0.01, 0.0]).unwrap();
        assert!(matches!(
            descriptive_stats(&ret, &RatioConfig::default()),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn extreme_returns_are_not_finite() {
        let cfg = RatioConfig::default();
        let ret = ReturnSeries::new(vec![1e307, 1e307]).unwrap();
        assert_eq!(
            annualized_return(&ret, &cfg),
            Err(Error::NonFiniteResult {
                statistic: "annualized return"
            })
        );
        let ret = ReturnSeries::new(vec![1e308, -1e308]).unwrap();
        assert_eq!(
            annualized_volatility(&ret, &cfg),
            Err(Error::NonFiniteResult {
                statistic: "annualized volatility"
            })
        );
        let ret = ReturnSeries::new(vec![1e300, -1e-300]).unwrap();
        assert_eq!(
            win_loss_ratio(&ret),
            Err(Error::NonFiniteResult {
                statistic: "win/loss ratio"
            })
        );
    }

    #[test]
    fn summary_never_holds_non_finite_values() {
        let ret = ReturnSeries::new(vec![1e308, -1e308]).unwrap();
        let summary = Summary::compute(&ret, &RatioConfig::default()).unwrap();
        for (metric, value) in summary.iter() {
            if let Ok(x) = value {
                assert!(x.is_finite(), "{metric:?} = {x}");
            }
        }
        assert!(summary.sharpe.is_err());
        assert!(summary.annualized_return.is_err());
    }

    #[test]
    fn summary_keeps_partial_results() {
        let ret = ReturnSeries::new(vec![0.01, 0.02, 0.03]).unwrap();
        let summary = Summary::compute(&ret, &RatioConfig::default()).unwrap();
        assert_eq!(summary.observations, 3);
        assert!(summary.sharpe.is_ok());
        assert!(matches!(summary.calmar, Err(Error::UndefinedRatio { .. })));
        assert!(matches!(
            summary.win_loss_ratio,
            Err(Error::InsufficientData { .. })
        ));
        assert_eq!(summary.max_drawdown, Ok(0.0));
        assert_eq!(summary.iter().count(), Metric::ALL.len());
    }

    #[test]
    fn summary_rejects_invalid_config() {
        let ret = ReturnSeries::new(XS.to_vec()).unwrap();
        let cfg = RatioConfig::default().with_eps(0.0);
        assert!(matches!(
            Summary::compute(&ret, &cfg),
            Err(Error::InvalidConfig(_))
        ));
    }
}
