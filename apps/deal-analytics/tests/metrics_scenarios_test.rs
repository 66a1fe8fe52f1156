//! Metrics scenarios through the public API, from raw deal rows to the
//! serialized result consumers see.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use deal_analytics::deals::{RawDeal, normalize};
use deal_analytics::metrics::{EngineSettings, FailurePolicy, MetricsEngine, MetricsError};
use deal_analytics::{MetricsCache, MetricsResult};
use serde_json::Value;

// 2024-03-04T00:00:00Z (Monday)
const START: i64 = 1_709_510_400;
const DAY: i64 = 86_400;

fn closing(ticket: i64, time: i64, profit: f64) -> RawDeal {
    RawDeal {
        ticket,
        order: ticket,
        time,
        entry: 1,
        magic: 1001,
        position_id: ticket,
        volume: 1.0,
        price: 1.1,
        profit,
        commission: 0.0,
        swap: 0.0,
        symbol: "EURUSD".to_string(),
        comment: String::new(),
    }
}

fn compute(profits: &[f64]) -> MetricsResult {
    let rows: Vec<RawDeal> = profits
        .iter()
        .enumerate()
        .map(|(i, &p)| closing(i as i64 + 1, START + i as i64 * 60, p))
        .collect();
    MetricsEngine::default().compute(&normalize(&rows)).unwrap()
}

#[test]
fn test_mixed_sequence_scenario() {
    let result = compute(&[100.0, -50.0, 100.0, 100.0, -50.0]);

    assert_eq!(result.general.gross_profit, 300.0);
    assert_eq!(result.general.gross_loss, -100.0);
    assert_eq!(result.general.net_profit, 200.0);
    assert_eq!(result.general.profit_factor, 3.0);
    assert_eq!(result.general.win_rate, 60.0);
    assert_eq!(result.sequences.max_consecutive_wins, 2);
    assert_eq!(result.sequences.max_consecutive_losses, 1);

    let Some(z) = result.advanced.z_score else {
        panic!("z-score should apply to a mixed sequence");
    };
    assert!((z - 0.6 / 0.84_f64.sqrt()).abs() < 1e-12);
}

#[test]
fn test_all_losses_scenario() {
    let result = compute(&[-10.0, -20.0, -30.0]);

    assert_eq!(result.general.gross_profit, 0.0);
    assert_eq!(result.general.gross_loss, -60.0);
    assert_eq!(result.general.profit_factor, 0.0);
    assert_eq!(result.general.win_rate, 0.0);
    assert_eq!(result.advanced.z_score, None);
}

#[test]
fn test_empty_scenario() {
    let result = compute(&[]);

    assert_eq!(result.general.total_trades, 0);
    assert_eq!(result.general.total_wins, 0);
    assert_eq!(result.general.total_losses, 0);
    assert_eq!(result.general.profit_factor, 0.0);
    assert_eq!(result.general.win_rate, 0.0);
    assert_eq!(result.advanced.recovery_factor, 0.0);
    assert_eq!(result.advanced.sharpe_ratio, None);
    assert_eq!(result.advanced.z_score, None);
}

#[test]
fn test_opening_deals_do_not_count() {
    let mut rows = vec![closing(1, START, 40.0), closing(2, START + 60, -10.0)];
    rows.push(RawDeal {
        entry: 0,
        ..closing(3, START + 120, 999.0)
    });
    let result = MetricsEngine::default().compute(&normalize(&rows)).unwrap();
    assert_eq!(result.general.total_trades, 2);
    assert_eq!(result.general.net_profit, 30.0);
}

#[test]
fn test_net_profit_includes_costs() {
    let rows = vec![RawDeal {
        commission: -3.5,
        swap: -1.5,
        ..closing(1, START, 10.0)
    }];
    let result = MetricsEngine::default().compute(&normalize(&rows)).unwrap();
    assert_eq!(result.general.net_profit, 5.0);
    assert_eq!(result.general.total_costs, -5.0);
}

#[test]
fn test_sharpe_needs_thirty_trading_days() {
    let rows = |days: i64| -> Vec<RawDeal> {
        (0..days)
            .map(|d| {
                let profit = if d % 4 == 0 { -20.0 } else { 15.0 };
                closing(d + 1, START + d * DAY + 3_600, profit)
            })
            .collect()
    };

    let short = MetricsEngine::default().compute(&normalize(&rows(29))).unwrap();
    assert_eq!(short.advanced.trading_days, 29);
    assert_eq!(short.advanced.sharpe_ratio, None);

    let long = MetricsEngine::default().compute(&normalize(&rows(30))).unwrap();
    assert_eq!(long.advanced.trading_days, 30);
    assert!(long.advanced.sharpe_ratio.is_some());
}

#[test]
fn test_serialized_shape() {
    let json: Value = serde_json::to_value(compute(&[5.0, 7.0])).unwrap();

    assert_eq!(json["general"]["profit_factor"], "Infinity");
    assert!(json["advanced"]["sharpe_ratio"].is_null());
    assert!(json["advanced"]["z_score"].is_null());
    assert_eq!(json["general"]["total_trades"], 2);
    assert_eq!(json["sequences"]["max_consecutive_wins"], 2);
    assert_eq!(json["extremes"]["max_drawdown"], 0.0);
}

#[test]
fn test_failure_policy_is_observable() {
    let time = chrono::DateTime::from_timestamp(START, 0).unwrap();
    let bad = vec![deal_analytics::TradeRecord::new(
        9,
        time,
        "EURUSD",
        0,
        deal_analytics::deals::DealEntry::Out,
        f64::NAN,
        0.0,
        0.0,
    )];

    let closed = MetricsCache::new(MetricsEngine::default());
    assert!(closed.get_or_compute(&bad).unwrap().is_zero());

    let open = MetricsCache::new(MetricsEngine::new(EngineSettings {
        failure_policy: FailurePolicy::FailOpen,
        ..EngineSettings::default()
    }));
    let Err(MetricsError::NonFiniteInput { ticket, .. }) = open.get_or_compute(&bad) else {
        panic!("fail-open should surface the error");
    };
    assert_eq!(ticket, 9);
    assert!(open.is_empty());
}
