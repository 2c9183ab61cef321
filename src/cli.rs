use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use kummersdorf::{
    calmar_ratio::CalmarRatioExt,
    drawdown::{max_drawdown, MaximumDrawdownExt},
    sharpe_ratio::SharpeRatioExt,
    sortino_ratio::SortinoRatioExt,
    stats::{descriptive_stats, Summary},
    PricePath, RatioConfig, ReturnSeries,
};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::{
    input,
    report::{self, Language},
    settings::Settings,
};

#[derive(Debug, Parser)]
#[clap(name = "lauscha", version, about = "Risk-adjusted return metrics")]
pub struct Cli {
    /// -v info, -vv debug, -vvv trace
    #[clap(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[clap(short, long, global = true)]
    pub config: Option<PathBuf>,
    #[clap(flatten)]
    pub ratio: RatioArgs,
    #[clap(subcommand)]
    pub command: Commands,
}

/// Per-call overrides of the configured ratio parameters.
#[derive(Debug, Default, Args)]
pub struct RatioArgs {
    /// Periods per year
    #[clap(long, global = true)]
    pub freq: Option<u32>,
    /// Per-period risk-free rate
    #[clap(long, global = true, allow_hyphen_values = true)]
    pub rfr: Option<f64>,
    /// Volatility guard added to denominators
    #[clap(long, global = true)]
    pub eps: Option<f64>,
}

impl RatioArgs {
    #[must_use]
    pub fn apply(&self, mut cfg: RatioConfig) -> RatioConfig {
        if let Some(freq) = self.freq {
            cfg = cfg.with_freq(freq);
        }
        if let Some(rfr) = self.rfr {
            cfg = cfg.with_rfr(rfr);
        }
        if let Some(eps) = self.eps {
            cfg = cfg.with_eps(eps);
        }
        cfg
    }
}

#[derive(Debug, Default, Args)]
pub struct Series {
    /// Read values from a file instead of the command line
    #[clap(short, long)]
    pub file: Option<PathBuf>,
    /// Values are prices rather than log returns
    #[clap(long)]
    pub prices: bool,
    #[clap(allow_negative_numbers = true)]
    pub values: Vec<f64>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Annualized Sharpe ratio of a return series
    Sharpe(Series),
    /// Annualized Sortino ratio of a return series
    Sortino(Series),
    /// Calmar ratio of a log-return series
    Calmar(Series),
    /// Maximum drawdown of a log-return series or, with --prices, of a value path
    MaxDrawdown(Series),
    /// Annualized mean and volatility, win rate and average win/loss ratio
    Stats {
        #[clap(flatten)]
        series: Series,
        #[clap(long, value_enum)]
        language: Option<Language>,
    },
    /// Every metric for each file, side by side
    Report {
        #[clap(required = true)]
        files: Vec<PathBuf>,
        /// Files hold prices rather than log returns
        #[clap(long)]
        prices: bool,
        #[clap(long)]
        json: bool,
        #[clap(long, value_enum)]
        language: Option<Language>,
    },
    /// Print the effective settings
    Config,
}

#[derive(Debug, Clone)]
pub struct App {
    pub settings: Settings,
    pub ratio: RatioConfig,
}

impl App {
    pub fn new(settings: Settings, args: &RatioArgs) -> Result<Self> {
        let ratio = args.apply(settings.ratio_config());
        ratio.validate()?;
        Ok(Self { settings, ratio })
    }

    fn returns(series: Series) -> Result<ReturnSeries> {
        let xs = input::values(series.file.as_deref(), series.values)?;
        if series.prices {
            Ok(ReturnSeries::from_prices(&xs)?)
        } else {
            Ok(ReturnSeries::new(xs)?)
        }
    }

    fn number(&self, x: f64) -> String {
        let precision = self.settings.precision;
        format!("{x:.precision$}")
    }

    /// Runs `command` and returns what should be printed.
    pub fn run(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Sharpe(series) => {
                let value = Self::returns(series)?.sharpe_ratio(&self.ratio)?;
                Ok(self.number(value))
            }
            Commands::Sortino(series) => {
                let value = Self::returns(series)?.sortino_ratio(&self.ratio)?;
                Ok(self.number(value))
            }
            Commands::Calmar(series) => {
                let value = Self::returns(series)?.calmar_ratio(&self.ratio)?;
                Ok(self.number(value))
            }
            Commands::MaxDrawdown(series) => {
                let value = if series.prices {
                    let xs = input::values(series.file.as_deref(), series.values)?;
                    max_drawdown(PricePath::new(xs)?.as_slice())?
                } else {
                    Self::returns(series)?.maximum_drawdown()?
                };
                Ok(self.number(value))
            }
            Commands::Stats { series, language } => {
                let stats = descriptive_stats(&Self::returns(series)?, &self.ratio)?;
                let language = language.unwrap_or(self.settings.language);
                Ok(report::describe(&stats, language, self.settings.precision))
            }
            Commands::Report {
                files,
                prices,
                json,
                language,
            } => {
                info!(files = files.len(), "building report");
                let rows = files
                    .par_iter()
                    .map(|path| (series_name(path), self.summary(path, prices)))
                    .collect::<Vec<_>>();
                if json {
                    Ok(serde_json::to_string_pretty(&report::json(&rows))?)
                } else {
                    let language = language.unwrap_or(self.settings.language);
                    Ok(report::table(&rows, language, self.settings.precision))
                }
            }
            Commands::Config => self.settings.to_toml(),
        }
    }

    /// A file that can't be read or holds an invalid series fails on its
    /// own; the rest of the report is still built.
    fn summary(&self, path: &Path, prices: bool) -> Result<Summary> {
        let summary = input::read_values(path).and_then(|xs| {
            let ret = if prices {
                ReturnSeries::from_prices(&xs)
            } else {
                ReturnSeries::new(xs)
            }
            .with_context(|| format!("in {}", path.display()))?;
            Ok(Summary::compute(&ret, &self.ratio)?)
        });
        if let Err(err) = &summary {
            warn!(path = %path.display(), "skipping series: {err:#}");
        }
        summary
    }
}

fn series_name(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned())
}
