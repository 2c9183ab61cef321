pub mod calmar_ratio;
pub mod config;
pub mod drawdown;
pub mod error;
pub mod series;
pub mod sharpe_ratio;
pub mod sortino_ratio;
pub mod stats;

pub use config::RatioConfig;
pub use error::{Error, Result};
pub use series::{PricePath, ReturnSeries};

/// Streaming computation fed one observation at a time, in order.
pub trait Indicator {
    type Input;
    fn feed(&mut self, input: Self::Input) -> Result<()>;
}

pub trait Value<'a> {
    type Output;
    fn value(&'a self) -> Self::Output;
}

/// Anything that can be viewed as a validated periodic return series.
pub trait Returns {
    fn returns(&self) -> &ReturnSeries;
}

impl Returns for ReturnSeries {
    fn returns(&self) -> &ReturnSeries {
        self
    }
}
