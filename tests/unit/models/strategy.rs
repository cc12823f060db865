//! Unit tests for strategy and interval parsing

use chartpulse::models::strategy::StrategyKind;
use chartpulse::services::market_data::Interval;

#[test]
fn strategy_names_round_trip() {
    let kinds = [
        StrategyKind::EmaCrossover,
        StrategyKind::RsiThresholdCross,
        StrategyKind::MacdCrossover,
        StrategyKind::RsiMacdCombined,
        StrategyKind::MultiFactorConfluence,
    ];
    for kind in kinds {
        assert_eq!(kind.as_str().parse::<StrategyKind>().unwrap(), kind);
    }
}

#[test]
fn unknown_strategy_is_rejected() {
    let err = "golden_cross".parse::<StrategyKind>().unwrap_err();
    assert!(err.to_string().contains("golden_cross"));
}

#[test]
fn strategy_serializes_as_snake_case() {
    let json = serde_json::to_string(&StrategyKind::RsiMacdCombined).unwrap();
    assert_eq!(json, "\"rsi_macd_combined\"");
}

#[test]
fn interval_codes_round_trip() {
    for interval in [Interval::Daily, Interval::Weekly, Interval::Monthly] {
        assert_eq!(interval.code().parse::<Interval>().unwrap(), interval);
    }
}

#[test]
fn interval_ranges_match_the_dashboard_defaults() {
    assert_eq!(Interval::Daily.range(), "3mo");
    assert_eq!(Interval::Weekly.range(), "6mo");
    assert_eq!(Interval::Monthly.range(), "1y");
}

#[test]
fn unknown_interval_is_rejected() {
    assert!("5m".parse::<Interval>().is_err());
}
