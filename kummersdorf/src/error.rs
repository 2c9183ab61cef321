use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("series is empty")]
    EmptySeries,
    #[error("non-finite value {value} at index {index}")]
    NonFinite { index: usize, value: f64 },
    #[error("negative price {value} at index {index}")]
    NegativePrice { index: usize, value: f64 },
    #[error("zero price at index {index}, log return is undefined")]
    ZeroPrice { index: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("peak is zero at index {index}, drawdown is undefined")]
    DivisionByZero { index: usize },
    #[error("{ratio} ratio is undefined: {reason}")]
    UndefinedRatio {
        ratio: &'static str,
        reason: &'static str,
    },
    #[error("not enough data for {statistic}: {reason}")]
    InsufficientData {
        statistic: &'static str,
        reason: &'static str,
    },
    #[error("cumulative value at index {index} leaves the f64 range")]
    Overflow { index: usize },
    #[error("{statistic} leaves the f64 range")]
    NonFiniteResult { statistic: &'static str },
}

impl Error {
    /// True for errors caused by malformed input or configuration rather
    /// than by the numbers themselves.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::EmptySeries
                | Self::NonFinite { .. }
                | Self::NegativePrice { .. }
                | Self::ZeroPrice { .. }
                | Self::InvalidConfig(_)
        )
    }
}

/// Passes `value` through unless it is `NaN` or infinite.
pub(crate) fn finite(statistic: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFiniteResult { statistic })
    }
}

#[cfg(test)]
mod test {
    use super::{finite, Error};

    #[test]
    fn invalid_input_class() {
        assert!(Error::EmptySeries.is_invalid_input());
        assert!(Error::NonFinite {
            index: 3,
            value: f64::NAN
        }
        .is_invalid_input());
        assert!(!Error::DivisionByZero { index: 0 }.is_invalid_input());
        assert!(!Error::Overflow { index: 1 }.is_invalid_input());
        assert!(Error::ZeroPrice { index: 0 }.is_invalid_input());
        assert!(!Error::NonFiniteResult { statistic: "sharpe ratio" }.is_invalid_input());
    }

    #[test]
    fn messages() {
        let err = Error::UndefinedRatio {
            ratio: "calmar",
            reason: "maximum drawdown is zero",
        };
        assert_eq!(
            err.to_string(),
            "calmar ratio is undefined: maximum drawdown is zero"
        );
        assert_eq!(
            Error::DivisionByZero { index: 4 }.to_string(),
            "peak is zero at index 4, drawdown is undefined"
        );
    }

    #[test]
    fn finite_results_only() {
        assert_eq!(finite("sharpe ratio", 1.5), Ok(1.5));
        assert_eq!(
            finite("sharpe ratio", f64::NAN),
            Err(Error::NonFiniteResult {
                statistic: "sharpe ratio"
            })
        );
        assert_eq!(
            finite("sortino ratio", f64::NEG_INFINITY)
                .unwrap_err()
                .to_string(),
            "sortino ratio leaves the f64 range"
        );
    }
}
