//! # 打分阶段
//!
//! 把 (最新收盘价, ATR, 动量) 转化为一条完整的 `TradingSetup`。
//! 纯函数，无副作用；合法输入不产生任何错误。

use chrono::NaiveDate;
use rust_decimal::Decimal;
use takane_core::setup::entity::TradingSetup;

use crate::indicator::commercial_round;

/// 本打分方法的固定标签，写入每条信号以便未来多策略共存。
pub const STRATEGY_MOMENTUM_ATR: &str = "MOMENTUM_ATR";

/// 得分输出精度 (小数位)。
pub const SCORE_SCALE: u32 = 6;

/// 止损距离的 ATR 倍数。
const STOP_ATR_MULTIPLE: i64 = 2;

/// 风险回报比：止盈距离 = 风险回报比 × 止损距离。
fn risk_reward_multiple() -> Decimal {
    // 1.5
    Decimal::new(15, 1)
}

/// # Summary
/// 由指标构造一条交易信号。
///
/// # Logic
/// 1. `entry = latest_close`。
/// 2. `stop_loss = latest_close - 2 × ATR`。
/// 3. `take_profit = latest_close + (1.5 × 2) × ATR`。
/// 4. `volatility_ratio = ATR / latest_close` (8 位小数)。
/// 5. `score = (momentum - volatility_ratio) × 100`，按 6 位小数商业舍入。
///
/// # Arguments
/// * `symbol`: 股票代码。
/// * `signal_date`: 最新一根日线的交易日。
/// * `latest_close`: 最新收盘价。
/// * `atr`: 平均真实波幅（调用方保证 > 0）。
/// * `momentum`: 动量值。
///
/// # Returns
/// 未持久化的 `TradingSetup`（`id` 为 None）。
pub fn build_setup(
    symbol: &str,
    signal_date: NaiveDate,
    latest_close: Decimal,
    atr: Decimal,
    momentum: Decimal,
) -> TradingSetup {
    let stop_multiple = Decimal::from(STOP_ATR_MULTIPLE);
    let stop_loss = latest_close - atr * stop_multiple;
    let take_profit = latest_close + atr * (risk_reward_multiple() * stop_multiple);

    let volatility_ratio = commercial_round(
        atr.checked_div(latest_close).unwrap_or(Decimal::ZERO),
        crate::indicator::INDICATOR_SCALE,
    );
    let score = commercial_round(
        (momentum - volatility_ratio) * Decimal::ONE_HUNDRED,
        SCORE_SCALE,
    );

    TradingSetup {
        id: None,
        symbol: symbol.to_string(),
        signal_date,
        entry_price: latest_close,
        stop_loss,
        take_profit,
        score,
        strategy: STRATEGY_MOMENTUM_ATR.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn signal_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
    }

    #[test]
    fn test_risk_levels() {
        let setup = build_setup("AAPL", signal_date(), dec!(100), dec!(1), dec!(0.05));
        assert_eq!(setup.entry_price, dec!(100));
        assert_eq!(setup.stop_loss, dec!(98));
        assert_eq!(setup.take_profit, dec!(103));
    }

    #[test]
    fn test_stop_entry_target_ordering() {
        // ATR > 0 时恒有 止损 < 入场 < 止盈
        let setup = build_setup("MSFT", signal_date(), dec!(321.55), dec!(4.37), dec!(-0.02));
        assert!(setup.stop_loss < setup.entry_price);
        assert!(setup.entry_price < setup.take_profit);
    }

    #[test]
    fn test_score_arithmetic() {
        // volatility = 1 / 100 = 0.01, score = (0.05 - 0.01) × 100 = 4
        let setup = build_setup("AAPL", signal_date(), dec!(100), dec!(1), dec!(0.05));
        assert_eq!(setup.score, dec!(4.000000));
        assert_eq!(setup.strategy, STRATEGY_MOMENTUM_ATR);
        assert!(setup.id.is_none());
    }

    #[test]
    fn test_score_rounding_half_away_from_zero() {
        // momentum - volatility = 0.0000000050 → ×100 = 0.00000050
        // 6 位商业舍入后应为 0.000001 (中点远离零)
        let setup = build_setup(
            "TSLA",
            signal_date(),
            dec!(100000000),
            dec!(1),
            dec!(0.00000001),
        );
        // volatility = 1 / 100000000 = 0.00000001 → 恰好抵消
        assert_eq!(setup.score, dec!(0.000000));

        let setup = build_setup("TSLA", signal_date(), dec!(200), dec!(1), dec!(0.0500095));
        // volatility = 0.005, score = (0.0500095 - 0.005) × 100 = 4.50095 → 4.500950
        assert_eq!(setup.score, dec!(4.500950));
    }

    #[test]
    fn test_negative_score() {
        // 动量为负且波动率为正，得分必为负
        let setup = build_setup("NFLX", signal_date(), dec!(50), dec!(2), dec!(-0.1));
        // volatility = 0.04, score = (-0.1 - 0.04) × 100 = -14
        assert_eq!(setup.score, dec!(-14.000000));
    }
}
