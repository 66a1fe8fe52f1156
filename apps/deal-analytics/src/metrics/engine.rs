//! Metrics engine: one implementation shared by every adapter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::{EPSILON, HUNDRED, MIN_DAYS_FOR_SHARPE, TRADING_DAYS_PER_YEAR};
use super::daily::{annualized_sharpe, daily_returns};
use super::drawdown::max_drawdown;
use super::math::{max, mean, min, sample_std_dev};
use super::runs::runs_z_score;
use super::streaks::max_consecutive;
use super::types::{
    AdvancedMetrics, ExtremeMetrics, GeneralMetrics, MetricsResult, SequenceMetrics,
};
use crate::deals::TradeRecord;

/// What the engine does when computation hits non-finite data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log a warning and return the zero-valued result.
    #[default]
    FailClosed,
    /// Return the error to the caller.
    FailOpen,
}

/// Errors raised while computing metrics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    /// A trade carried a NaN or infinite amount.
    #[error("trade {ticket} has a non-finite {field}")]
    NonFiniteInput {
        /// Ticket of the offending trade.
        ticket: i64,
        /// Name of the offending field.
        field: &'static str,
    },

    /// An aggregate overflowed or became NaN.
    #[error("computed {metric} is not finite")]
    NonFiniteResult {
        /// Name of the offending metric.
        metric: &'static str,
    },
}

/// Tunables for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Distinct trading days required before Sharpe is reported.
    pub min_days_for_sharpe: usize,
    /// Annualization factor for the Sharpe ratio.
    pub annualization_days: u32,
    /// Behaviour on computation failure.
    pub failure_policy: FailurePolicy,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            min_days_for_sharpe: MIN_DAYS_FOR_SHARPE,
            annualization_days: TRADING_DAYS_PER_YEAR,
            failure_policy: FailurePolicy::FailClosed,
        }
    }
}

/// Computes a [`MetricsResult`] from an ordered trade sequence.
///
/// Pure and synchronous. Empty input yields the zero-valued result.
#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
    settings: EngineSettings,
}

impl MetricsEngine {
    /// Create an engine with the given settings.
    #[must_use]
    pub const fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    /// Engine settings.
    #[must_use]
    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Compute metrics, applying the configured failure policy.
    pub fn compute(&self, trades: &[TradeRecord]) -> Result<MetricsResult, MetricsError> {
        self.try_compute(trades)
            .or_else(|e| self.recover(e, trades.len()))
    }

    /// Apply the failure policy to an error from [`Self::try_compute`].
    pub fn recover(&self, error: MetricsError, trades: usize) -> Result<MetricsResult, MetricsError> {
        match self.settings.failure_policy {
            FailurePolicy::FailClosed => {
                tracing::warn!(error = %error, trades, "Metrics computation failed, returning zero result");
                Ok(MetricsResult::zero())
            }
            FailurePolicy::FailOpen => Err(error),
        }
    }

    /// Compute metrics, surfacing any failure regardless of policy.
    pub fn try_compute(&self, trades: &[TradeRecord]) -> Result<MetricsResult, MetricsError> {
        if trades.is_empty() {
            return Ok(MetricsResult::zero());
        }
        validate_inputs(trades)?;

        let returns: Vec<f64> = trades.iter().map(TradeRecord::net_profit).collect();
        let (winners, others): (Vec<&TradeRecord>, Vec<&TradeRecord>) =
            trades.iter().partition(|t| t.is_winner());
        let wins: Vec<f64> = winners.iter().map(|t| t.net_profit()).collect();
        let losses: Vec<f64> = others.iter().map(|t| t.net_profit()).collect();

        let total_trades = returns.len();
        let gross_profit: f64 = wins.iter().sum();
        let gross_loss: f64 = losses.iter().sum();
        let net_profit = gross_profit + gross_loss;
        let total_commission: f64 = trades.iter().map(TradeRecord::commission).sum();
        let total_swap: f64 = trades.iter().map(TradeRecord::swap).sum();

        let profit_factor = if gross_loss.abs() < EPSILON {
            if gross_profit > 0.0 { f64::INFINITY } else { 1.0 }
        } else {
            gross_profit / gross_loss.abs()
        };

        let win_fraction = wins.len() as f64 / total_trades as f64;
        let loss_fraction = losses.len() as f64 / total_trades as f64;
        let avg_win = mean(&wins).unwrap_or(0.0);
        let avg_loss = mean(&losses).unwrap_or(0.0);
        let expectancy = win_fraction * avg_win + loss_fraction * avg_loss;

        let daily: Vec<f64> = daily_returns(trades).into_values().collect();
        let sharpe_ratio = annualized_sharpe(
            &daily,
            self.settings.min_days_for_sharpe,
            self.settings.annualization_days,
        );

        let max_dd = max_drawdown(&returns);
        let recovery_factor = if max_dd > EPSILON { net_profit / max_dd } else { 0.0 };

        let result = MetricsResult {
            general: GeneralMetrics {
                net_profit,
                gross_profit,
                gross_loss,
                total_commission,
                total_swap,
                total_costs: total_commission + total_swap,
                profit_factor,
                win_rate: HUNDRED * win_fraction,
                total_trades,
                total_wins: wins.len(),
                total_losses: returns.iter().filter(|&&r| r < 0.0).count(),
                total_breakevens: returns.iter().filter(|&&r| r == 0.0).count(),
                avg_win,
                avg_loss,
            },
            advanced: AdvancedMetrics {
                expectancy,
                sharpe_ratio,
                recovery_factor,
                z_score: runs_z_score(&returns),
                std_dev: sample_std_dev(&returns).unwrap_or(0.0),
                trading_days: daily.len(),
            },
            sequences: SequenceMetrics {
                max_consecutive_wins: max_consecutive(&returns, true),
                max_consecutive_losses: max_consecutive(&returns, false),
            },
            extremes: ExtremeMetrics {
                max_profit: max(&wins).unwrap_or(0.0),
                max_loss: min(&losses).unwrap_or(0.0),
                max_drawdown: max_dd,
            },
        };

        validate_result(&result)?;
        Ok(result)
    }
}

fn validate_inputs(trades: &[TradeRecord]) -> Result<(), MetricsError> {
    for trade in trades {
        let fields = [
            ("profit", trade.profit()),
            ("commission", trade.commission()),
            ("swap", trade.swap()),
            ("net_profit", trade.net_profit()),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(MetricsError::NonFiniteInput {
                ticket: trade.ticket(),
                field: *field,
            });
        }
    }
    Ok(())
}

fn validate_result(result: &MetricsResult) -> Result<(), MetricsError> {
    let g = &result.general;
    let a = &result.advanced;
    let e = &result.extremes;
    let finite = [
        ("net_profit", g.net_profit),
        ("gross_profit", g.gross_profit),
        ("gross_loss", g.gross_loss),
        ("total_costs", g.total_costs),
        ("avg_win", g.avg_win),
        ("avg_loss", g.avg_loss),
        ("expectancy", a.expectancy),
        ("recovery_factor", a.recovery_factor),
        ("std_dev", a.std_dev),
        ("sharpe_ratio", a.sharpe_ratio.unwrap_or(0.0)),
        ("z_score", a.z_score.unwrap_or(0.0)),
        ("max_drawdown", e.max_drawdown),
    ];
    if let Some((metric, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
        return Err(MetricsError::NonFiniteResult { metric: *metric });
    }
    // +inf is the documented no-loss value; NaN never is.
    if g.profit_factor.is_nan() || g.profit_factor == f64::NEG_INFINITY {
        return Err(MetricsError::NonFiniteResult {
            metric: "profit_factor",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deals::DealEntry;
    use chrono::{Duration, TimeZone, Utc};

    fn trades_from(profits: &[f64]) -> Vec<TradeRecord> {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        profits
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let time = start + Duration::hours(i as i64);
                TradeRecord::new(i as i64 + 1, time, "EURUSD", 7, DealEntry::Out, p, 0.0, 0.0)
            })
            .collect()
    }

    #[test]
    fn test_empty_is_zero_result() {
        let engine = MetricsEngine::default();
        let result = engine.compute(&[]).unwrap();
        assert!(result.is_zero());
        assert_eq!(result.general.win_rate, 0.0);
        assert_eq!(result.advanced.sharpe_ratio, None);
        assert_eq!(result.advanced.z_score, None);
    }

    #[test]
    fn test_mixed_scenario() {
        let engine = MetricsEngine::default();
        let result = engine
            .compute(&trades_from(&[100.0, -50.0, 100.0, 100.0, -50.0]))
            .unwrap();

        let g = &result.general;
        assert_eq!(g.gross_profit, 300.0);
        assert_eq!(g.gross_loss, -100.0);
        assert_eq!(g.net_profit, 200.0);
        assert_eq!(g.profit_factor, 3.0);
        assert_eq!(g.win_rate, 60.0);
        assert_eq!(g.total_wins, 3);
        assert_eq!(g.total_losses, 2);
        assert_eq!(g.avg_win, 100.0);
        assert_eq!(g.avg_loss, -50.0);
        assert_eq!(result.sequences.max_consecutive_wins, 2);
        assert_eq!(result.sequences.max_consecutive_losses, 1);

        // 0.6 * 100 + 0.4 * -50
        assert!((result.advanced.expectancy - 40.0).abs() < 1e-9);
        assert_eq!(result.extremes.max_drawdown, 50.0);
        assert_eq!(result.advanced.recovery_factor, 4.0);
        assert_eq!(result.advanced.trading_days, 1);
        assert_eq!(result.advanced.sharpe_ratio, None);
        assert!(result.advanced.z_score.is_some());
        assert_eq!(result.extremes.max_profit, 100.0);
        assert_eq!(result.extremes.max_loss, -50.0);
    }

    #[test]
    fn test_all_losses() {
        let engine = MetricsEngine::default();
        let result = engine.compute(&trades_from(&[-10.0, -20.0, -30.0])).unwrap();
        assert_eq!(result.general.profit_factor, 0.0);
        assert_eq!(result.general.win_rate, 0.0);
        assert_eq!(result.advanced.z_score, None);
        assert_eq!(result.sequences.max_consecutive_losses, 3);
        assert_eq!(result.extremes.max_profit, 0.0);
    }

    #[test]
    fn test_all_wins_profit_factor_is_infinite() {
        let engine = MetricsEngine::default();
        let result = engine.compute(&trades_from(&[10.0, 20.0])).unwrap();
        assert_eq!(result.general.profit_factor, f64::INFINITY);
        assert_eq!(result.advanced.recovery_factor, 0.0);
    }

    #[test]
    fn test_all_breakeven_profit_factor_is_one() {
        let engine = MetricsEngine::default();
        let result = engine.compute(&trades_from(&[0.0, 0.0])).unwrap();
        assert_eq!(result.general.profit_factor, 1.0);
        assert_eq!(result.general.total_breakevens, 2);
        assert_eq!(result.general.total_losses, 0);
    }

    #[test]
    fn test_single_trade_std_dev_is_zero() {
        let engine = MetricsEngine::default();
        let result = engine.compute(&trades_from(&[42.0])).unwrap();
        assert_eq!(result.advanced.std_dev, 0.0);
    }

    #[test]
    fn test_costs_are_summed() {
        let time = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let trades = vec![
            TradeRecord::new(1, time, "XAUUSD", 0, DealEntry::Out, 50.0, -2.0, -0.5),
            TradeRecord::new(2, time, "XAUUSD", 0, DealEntry::Out, -20.0, -2.0, 1.0),
        ];
        let result = MetricsEngine::default().compute(&trades).unwrap();
        assert_eq!(result.general.total_commission, -4.0);
        assert_eq!(result.general.total_swap, 0.5);
        assert_eq!(result.general.total_costs, -3.5);
        assert_eq!(result.general.net_profit, 26.5);
    }

    #[test]
    fn test_costs_move_trade_into_loss_bucket() {
        let time = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let trades = vec![
            TradeRecord::new(1, time, "XAUUSD", 0, DealEntry::Out, 40.0, 0.0, 0.0),
            TradeRecord::new(2, time, "XAUUSD", 0, DealEntry::Out, 1.0, -1.0, 0.0),
            TradeRecord::new(3, time, "XAUUSD", 0, DealEntry::Out, 2.0, -3.0, 0.0),
        ];
        let result = MetricsEngine::default().compute(&trades).unwrap();
        assert_eq!(result.general.total_wins, 1);
        assert_eq!(result.general.total_losses, 1);
        assert_eq!(result.general.total_breakevens, 1);
        assert_eq!(result.general.gross_profit, 40.0);
        assert_eq!(result.general.gross_loss, -1.0);
        assert_eq!(result.general.avg_loss, -0.5);
    }

    #[test]
    fn test_sharpe_over_enough_days() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let trades: Vec<TradeRecord> = (0..40)
            .map(|i| {
                let p = if i % 3 == 0 { -5.0 } else { 10.0 };
                TradeRecord::new(i, start + Duration::days(i), "EURUSD", 1, DealEntry::Out, p, 0.0, 0.0)
            })
            .collect();
        let result = MetricsEngine::default().compute(&trades).unwrap();
        assert_eq!(result.advanced.trading_days, 40);
        let Some(sharpe) = result.advanced.sharpe_ratio else {
            panic!("sharpe should apply over 40 days");
        };
        assert!(sharpe > 0.0);
    }

    #[test]
    fn test_custom_sharpe_threshold() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let trades: Vec<TradeRecord> = (0..5)
            .map(|i| {
                let p = if i % 2 == 0 { 3.0 } else { -1.0 };
                TradeRecord::new(i, start + Duration::days(i), "EURUSD", 1, DealEntry::Out, p, 0.0, 0.0)
            })
            .collect();
        let engine = MetricsEngine::new(EngineSettings {
            min_days_for_sharpe: 5,
            ..EngineSettings::default()
        });
        assert!(engine.compute(&trades).unwrap().advanced.sharpe_ratio.is_some());
    }

    #[test]
    fn test_non_finite_input_fail_closed() {
        let engine = MetricsEngine::default();
        let trades = trades_from(&[10.0, f64::NAN]);
        let result = engine.compute(&trades).unwrap();
        assert!(result.is_zero());
    }

    #[test]
    fn test_non_finite_input_fail_open() {
        let engine = MetricsEngine::new(EngineSettings {
            failure_policy: FailurePolicy::FailOpen,
            ..EngineSettings::default()
        });
        let trades = trades_from(&[10.0, f64::INFINITY]);
        let Err(MetricsError::NonFiniteInput { ticket, field }) = engine.compute(&trades) else {
            panic!("expected NonFiniteInput");
        };
        assert_eq!(ticket, 2);
        assert_eq!(field, "profit");
    }

    #[test]
    fn test_overflow_is_non_finite_result() {
        let engine = MetricsEngine::new(EngineSettings {
            failure_policy: FailurePolicy::FailOpen,
            ..EngineSettings::default()
        });
        let trades = trades_from(&[f64::MAX, f64::MAX]);
        assert!(matches!(
            engine.compute(&trades),
            Err(MetricsError::NonFiniteResult { .. })
        ));
    }

    #[test]
    fn test_failure_policy_serde() {
        let policy: FailurePolicy = serde_json::from_str("\"fail_open\"").unwrap();
        assert_eq!(policy, FailurePolicy::FailOpen);
        assert_eq!(serde_json::to_string(&FailurePolicy::FailClosed).unwrap(), "\"fail_closed\"");
    }
}
