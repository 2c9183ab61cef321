use tracing::trace;

use crate::{Error, Indicator, Result, Returns, Value};

/// Running-peak drawdown scan over a cumulative value path.
///
/// Elements are consumed strictly in order; the peak is the maximum seen up
/// to and including the current element, and the drawdown at each step is
/// `(peak - x) / peak`.
#[derive(Clone, Debug, Default)]
pub struct MaximumDrawdown {
    index: usize,
    peak: Option<f64>,
    peak_index: usize,
    /// Drawdown at the most recently fed element.
    pub current: Option<f64>,
    /// Largest drawdown seen so far.
    pub value: Option<f64>,
    /// `(peak_index, trough_index)` of the largest drawdown, if any decline
    /// has been seen.
    pub episode: Option<(usize, usize)>,
}

impl MaximumDrawdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn peak(&self) -> Option<f64> {
        self.peak
    }

    /// Number of elements consumed.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.index == 0
    }
}

impl<'a> Value<'a> for MaximumDrawdown {
    type Output = Option<&'a f64>;

    fn value(&'a self) -> Self::Output {
        self.value.as_ref()
    }
}

impl Indicator for MaximumDrawdown {
    type Input = f64;

    /// On error the scan state is left untouched.
    fn feed(&mut self, x: Self::Input) -> Result<()> {
        let index = self.index;
        if !x.is_finite() {
            return Err(Error::NonFinite { index, value: x });
        }
        if x < 0.0 {
            return Err(Error::NegativePrice { index, value: x });
        }
        let (peak, peak_index) = match self.peak {
            Some(peak) if x <= peak => (peak, self.peak_index),
            _ => {
                trace!(index, peak = x, "new peak");
                (x, index)
            }
        };
        if peak <= 0.0 {
            return Err(Error::DivisionByZero { index });
        }
        let dd = (peak - x) / peak;
        let mdd = self.value.unwrap_or(0.0);
        if dd > mdd {
            self.value = Some(dd);
            self.episode = Some((peak_index, index));
        } else {
            self.value = Some(mdd);
        }
        self.peak = Some(peak);
        self.peak_index = peak_index;
        self.current = Some(dd);
        self.index += 1;
        Ok(())
    }
}

/// Largest fractional decline from any running peak of `path`.
pub fn max_drawdown(path: &[f64]) -> Result<f64> {
    if path.is_empty() {
        return Err(Error::EmptySeries);
    }
    let mut indicator = MaximumDrawdown::new();
    for x in path {
        indicator.feed(*x)?;
    }
    Ok(indicator.value.unwrap_or(0.0))
}

/// Drawdown at every element of `path`.
pub fn drawdown_series(path: &[f64]) -> Result<Vec<f64>> {
    if path.is_empty() {
        return Err(Error::EmptySeries);
    }
    let mut indicator = MaximumDrawdown::new();
    path.iter()
        .map(|x| -> Result<f64> {
            indicator.feed(*x)?;
            Ok(indicator.current.unwrap_or(0.0))
        })
        .collect()
}

pub trait MaximumDrawdownExt: Returns {
    /// Maximum drawdown of the value path implied by the returns.
    fn maximum_drawdown(&self) -> Result<f64> {
        let path = self.returns().price_path()?;
        max_drawdown(path.as_slice())
    }
}

impl<T: Returns + ?Sized> MaximumDrawdownExt for T {}
