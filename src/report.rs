use clap::ValueEnum;
use comfy_table::{presets::UTF8_BORDERS_ONLY, CellAlignment, Table};
use itertools::Itertools;
use kummersdorf::stats::{DescriptiveStats, Metric, Summary};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use strum::{Display, EnumString};

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    Display,
    EnumString,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

#[must_use]
pub const fn label(metric: Metric, language: Language) -> &'static str {
    match (language, metric) {
        (Language::En, Metric::Sharpe) => "Sharpe ratio",
        (Language::En, Metric::Sortino) => "Sortino ratio",
        (Language::En, Metric::Calmar) => "Calmar ratio",
        (Language::En, Metric::MaxDrawdown) => "Maximum drawdown",
        (Language::En, Metric::AnnualizedReturn) => "Annual average return",
        (Language::En, Metric::AnnualizedVolatility) => "Annual volatility",
        (Language::En, Metric::WinRate) => "Percentage of positive returns",
        (Language::En, Metric::WinLossRatio) => "Average win/loss ratio",
        (Language::Zh, Metric::Sharpe) => "夏普比率",
        (Language::Zh, Metric::Sortino) => "索提诺比率",
        (Language::Zh, Metric::Calmar) => "卡玛比率",
        (Language::Zh, Metric::MaxDrawdown) => "最大回撤",
        (Language::Zh, Metric::AnnualizedReturn) => "平均年化收益率",
        (Language::Zh, Metric::AnnualizedVolatility) => "年化波动率",
        (Language::Zh, Metric::WinRate) => "投资胜率",
        (Language::Zh, Metric::WinLossRatio) => "平均益损比",
    }
}

/// One report column: the series name and its metrics, or why the series
/// could not be read.
pub type Row = (String, anyhow::Result<Summary>);

const fn series_header(language: Language) -> &'static str {
    match language {
        Language::En => "series",
        Language::Zh => "序列",
    }
}

fn cell(value: &kummersdorf::Result<f64>, precision: usize) -> String {
    match value {
        Ok(x) => format!("{x:.precision$}"),
        Err(_) => "n/a".to_owned(),
    }
}

/// One labelled line per descriptive statistic.
#[must_use]
pub fn describe(stats: &DescriptiveStats, language: Language, precision: usize) -> String {
    let sep = match language {
        Language::En => ": ",
        Language::Zh => "：",
    };
    [
        (Metric::AnnualizedReturn, stats.annualized_return),
        (Metric::AnnualizedVolatility, stats.annualized_volatility),
        (Metric::WinRate, stats.win_rate),
        (Metric::WinLossRatio, stats.win_loss_ratio),
    ]
    .into_iter()
    .map(|(metric, value)| format!("{}{sep}{value:.precision$}", label(metric, language)))
    .join("\n")
}

/// Metrics as rows, one column per series. Undefined values, and every value
/// of a series that failed to load, print as `n/a`; the reasons are listed
/// under the table.
#[must_use]
pub fn table(rows: &[Row], language: Language, precision: usize) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    let header = std::iter::once(series_header(language).to_owned())
        .chain(rows.iter().map(|(name, _)| name.clone()))
        .collect_vec();
    table.set_header(header);
    for metric in Metric::ALL {
        let row = std::iter::once(label(metric, language).to_owned())
            .chain(rows.iter().map(|(_, summary)| match summary {
                Ok(s) => cell(s.get(metric), precision),
                Err(_) => "n/a".to_owned(),
            }))
            .collect_vec();
        table.add_row(row);
    }
    for column in table.column_iter_mut() {
        if column.index > 0 {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    let notes = rows
        .iter()
        .flat_map(|(name, summary)| match summary {
            Ok(summary) => summary
                .iter()
                .filter_map(|(metric, value)| {
                    value
                        .as_ref()
                        .err()
                        .map(|err| format!("{name}: {}: {err}", label(metric, language)))
                })
                .collect_vec(),
            Err(err) => vec![format!("{name}: {err:#}")],
        })
        .collect_vec();
    if notes.is_empty() {
        table.to_string()
    } else {
        format!("{table}\n{}", notes.join("\n"))
    }
}

/// `{ series: { metric: value | { "error": reason } } }`, or
/// `{ series: { "error": reason } }` for a series that failed to load.
#[must_use]
pub fn json(rows: &[Row]) -> Value {
    let mut out = Map::new();
    for (name, summary) in rows {
        let summary = match summary {
            Ok(summary) => summary,
            Err(err) => {
                out.insert(name.clone(), json!({ "error": format!("{err:#}") }));
                continue;
            }
        };
        let mut metrics = Map::new();
        metrics.insert("observations".to_owned(), json!(summary.observations));
        for (metric, value) in summary.iter() {
            let value = match value {
                Ok(x) => json!(x),
                Err(err) => json!({ "error": err.to_string() }),
            };
            metrics.insert(metric.key().to_owned(), value);
        }
        out.insert(name.clone(), Value::Object(metrics));
    }
    Value::Object(out)
}
