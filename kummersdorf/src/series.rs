use itertools::Itertools;

use crate::{Error, Result};

/// Ordered per-period returns. Never empty, every element finite.
#[derive(Clone, Debug, PartialEq)]
pub struct ReturnSeries(Vec<f64>);

/// Ordered cumulative values. Never empty, every element finite and
/// non-negative.
#[derive(Clone, Debug, PartialEq)]
pub struct PricePath(Vec<f64>);

fn check_finite(xs: &[f64]) -> Result<()> {
    if xs.is_empty() {
        return Err(Error::EmptySeries);
    }
    match xs.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(Error::NonFinite {
            index,
            value: xs[index],
        }),
        None => Ok(()),
    }
}

impl ReturnSeries {
    pub fn new(xs: Vec<f64>) -> Result<Self> {
        check_finite(&xs)?;
        Ok(Self(xs))
    }

    /// Log returns `ln(p[i] / p[i - 1])` of a price history.
    ///
    /// Every price must be strictly positive; the first zero is reported
    /// with its own index.
    pub fn from_prices(prices: &[f64]) -> Result<Self> {
        let path = PricePath::new(prices.to_vec())?;
        if path.len() < 2 {
            return Err(Error::InsufficientData {
                statistic: "returns",
                reason: "at least two prices are required",
            });
        }
        if let Some(index) = path.iter().position(|x| *x <= 0.0) {
            return Err(Error::ZeroPrice { index });
        }
        // Difference of logs, so `y / x` can't overflow for far apart prices.
        let xs = path
            .iter()
            .tuple_windows()
            .map(|(x, y)| y.ln() - x.ln())
            .collect_vec();
        Ok(Self(xs))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Cumulative value path `path[i] = exp(r[0] + .. + r[i])`.
    ///
    /// The prefix sum runs strictly left to right. Fails with
    /// [`Error::Overflow`] as soon as a value is no longer a positive finite
    /// `f64`, so the path never silently contains `inf` or `0`.
    pub fn price_path(&self) -> Result<PricePath> {
        let mut acc = 0.0;
        let mut xs = Vec::with_capacity(self.len());
        for (index, r) in self.iter().enumerate() {
            acc += r;
            let v = acc.exp();
            if !v.is_finite() || v <= 0.0 {
                return Err(Error::Overflow { index });
            }
            xs.push(v);
        }
        Ok(PricePath(xs))
    }
}

impl TryFrom<Vec<f64>> for ReturnSeries {
    type Error = Error;

    fn try_from(xs: Vec<f64>) -> Result<Self> {
        Self::new(xs)
    }
}

impl AsRef<[f64]> for ReturnSeries {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl PricePath {
    pub fn new(xs: Vec<f64>) -> Result<Self> {
        check_finite(&xs)?;
        match xs.iter().position(|x| *x < 0.0) {
            Some(index) => Err(Error::NegativePrice {
                index,
                value: xs[index],
            }),
            None => Ok(Self(xs)),
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }
}

impl TryFrom<Vec<f64>> for PricePath {
    type Error = Error;

    fn try_from(xs: Vec<f64>) -> Result<Self> {
        Self::new(xs)
    }
}

impl AsRef<[f64]> for PricePath {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}
