//! Metrics snapshot returned to presentation and API adapters.
//!
//! The four sections serialize as a nested mapping. "Not applicable" ratios
//! are `Option::None` and serialize as `null`; an infinite profit factor
//! serializes as the string `"Infinity"` because JSON has no such number.

use serde::{Deserialize, Serialize};

use super::format::{format_money, format_pct, format_profit_factor, format_ratio};

/// Aggregate profit and count statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralMetrics {
    /// Gross profit plus gross loss.
    pub net_profit: f64,
    /// Sum of winning trades (`> 0`).
    pub gross_profit: f64,
    /// Sum of non-winning trades (`<= 0`), never positive.
    pub gross_loss: f64,
    /// Sum of commissions.
    pub total_commission: f64,
    /// Sum of swaps.
    pub total_swap: f64,
    /// Commissions plus swaps.
    pub total_costs: f64,
    /// Gross profit over absolute gross loss; may be `+inf`.
    #[serde(with = "extended_float")]
    pub profit_factor: f64,
    /// Winning trades as a percentage of all trades.
    pub win_rate: f64,
    /// Number of trades.
    pub total_trades: usize,
    /// Trades with net profit `> 0`.
    pub total_wins: usize,
    /// Trades with net profit `< 0`.
    pub total_losses: usize,
    /// Trades with net profit `== 0`.
    pub total_breakevens: usize,
    /// Mean winning trade, 0 without wins.
    pub avg_win: f64,
    /// Mean non-winning trade (negative or zero), 0 without any.
    pub avg_loss: f64,
}

/// Risk-adjusted and statistical measures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvancedMetrics {
    /// Expected net profit per trade.
    pub expectancy: f64,
    /// Annualized Sharpe ratio of daily returns, `None` if not applicable.
    pub sharpe_ratio: Option<f64>,
    /// Net profit over maximum drawdown.
    pub recovery_factor: f64,
    /// Runs-test z-score of the win/loss ordering, `None` if not applicable.
    pub z_score: Option<f64>,
    /// Sample standard deviation of per-trade net profit.
    pub std_dev: f64,
    /// Distinct calendar days with at least one trade.
    pub trading_days: usize,
}

/// Streak statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceMetrics {
    /// Longest run of winning trades.
    pub max_consecutive_wins: usize,
    /// Longest run of non-winning trades.
    pub max_consecutive_losses: usize,
}

/// Extreme outcomes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtremeMetrics {
    /// Best single trade among wins, 0 without wins.
    pub max_profit: f64,
    /// Worst single trade among non-wins, 0 without any.
    pub max_loss: f64,
    /// Largest peak-to-trough decline of cumulative net profit.
    pub max_drawdown: f64,
}

/// Complete metrics snapshot. `Default` is the zero-valued result used for
/// empty input and for fail-closed fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    /// Aggregate profit and counts.
    pub general: GeneralMetrics,
    /// Ratios and statistics.
    pub advanced: AdvancedMetrics,
    /// Streaks.
    pub sequences: SequenceMetrics,
    /// Extremes and drawdown.
    pub extremes: ExtremeMetrics,
}

impl MetricsResult {
    /// The zero-valued result.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Whether this is the zero-valued result.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Plain-text report.
    #[must_use]
    pub fn summary(&self) -> String {
        let g = &self.general;
        let a = &self.advanced;
        let s = &self.sequences;
        let e = &self.extremes;
        format!(
            "Performance Summary\n\
             ===================\n\
             \n\
             Net Result:      {}\n\
             Gross Profit:    {}\n\
             Gross Loss:      {}\n\
             Costs:           {}\n\
             Profit Factor:   {}\n\
             Win Rate:        {}\n\
             Trades:          {} (W: {}, L: {}, BE: {})\n\
             \n\
             Expectancy:      {}\n\
             Sharpe Ratio:    {}\n\
             Recovery Factor: {:.2}\n\
             Z-Score:         {}\n\
             Std Dev:         {}\n\
             Trading Days:    {}\n\
             \n\
             Max Consecutive Wins:   {}\n\
             Max Consecutive Losses: {}\n\
             \n\
             Largest Win:     {}\n\
             Largest Loss:    {}\n\
             Max Drawdown:    {}",
            format_money(g.net_profit),
            format_money(g.gross_profit),
            format_money(g.gross_loss),
            format_money(g.total_costs),
            format_profit_factor(g.profit_factor),
            format_pct(g.win_rate),
            g.total_trades,
            g.total_wins,
            g.total_losses,
            g.total_breakevens,
            format_money(a.expectancy),
            format_ratio(a.sharpe_ratio),
            a.recovery_factor,
            format_ratio(a.z_score),
            format_money(a.std_dev),
            a.trading_days,
            s.max_consecutive_wins,
            s.max_consecutive_losses,
            format_money(e.max_profit),
            format_money(e.max_loss),
            format_money(e.max_drawdown),
        )
    }
}

/// Serde adapter for floats that may be infinite.
mod extended_float {
    use serde::{Deserialize, Deserializer, Serializer};

    const POS_INF: &str = "Infinity";
    const NEG_INF: &str = "-Infinity";

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_infinite() {
            serializer.serialize_str(if *value > 0.0 { POS_INF } else { NEG_INF })
        } else {
            serializer.serialize_f64(*value)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(v),
            Repr::Text(s) if s == POS_INF => Ok(f64::INFINITY),
            Repr::Text(s) if s == NEG_INF => Ok(f64::NEG_INFINITY),
            Repr::Text(s) => Err(serde::de::Error::custom(format!(
                "expected a number or \"{POS_INF}\", got \"{s}\""
            ))),
        }
    }
}
