//! # 指标阶段
//!
//! 把一段按交易日**升序**排列的日线窗口转化为两个数值信号：
//! ATR (平均真实波幅) 与动量。所有除法立即按 8 位小数商业舍入
//! (四舍五入远离零)，以约束累计舍入误差。

use rust_decimal::{Decimal, RoundingStrategy};
use takane_core::market::entity::PriceBar;

/// ATR 默认回看周期。
pub const ATR_PERIOD: usize = 14;

/// 指标阶段的中间精度 (小数位)。
pub const INDICATOR_SCALE: u32 = 8;

/// # Summary
/// 商业舍入：四舍五入且中点远离零，整条流水线的每个舍入点统一使用。
pub(crate) fn commercial_round(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// # Summary
/// 计算最近 `period` 根日线的平均真实波幅 (ATR)。
///
/// # Logic
/// 1. 从 `len - period` 开始遍历到序列末尾，索引 0（全序列首根，无前收盘）整根跳过。
/// 2. 单根真实波幅 TR = max(高-低, |高-前收盘|, |低-前收盘|)；
///    窗口内第一根被访问的日线没有已访问的前收盘，两个相对前收盘的项按零处理，
///    TR 退化为 高-低。
/// 3. ATR = TR 算术平均，商按 8 位小数商业舍入。
///
/// # Arguments
/// * `bars`: 按交易日升序排列的日线窗口。
/// * `period`: 回看周期（有效根数不足时取实际可用数量）。
///
/// # Returns
/// ATR 值；窗口内没有可用日线时返回零。
pub fn average_true_range(bars: &[PriceBar], period: usize) -> Decimal {
    let len = bars.len();
    let start = len.saturating_sub(period);

    let mut sum = Decimal::ZERO;
    let mut count = 0u64;
    let mut prev_close: Option<Decimal> = None;

    for (i, bar) in bars.iter().enumerate().skip(start) {
        if i == 0 {
            continue;
        }
        let high_low = (bar.high - bar.low).abs();
        let high_prev = prev_close
            .map(|pc| (bar.high - pc).abs())
            .unwrap_or(Decimal::ZERO);
        let low_prev = prev_close
            .map(|pc| (bar.low - pc).abs())
            .unwrap_or(Decimal::ZERO);

        sum += high_low.max(high_prev).max(low_prev);
        prev_close = Some(bar.close);
        count += 1;
    }

    if count == 0 {
        return Decimal::ZERO;
    }
    commercial_round(
        sum.checked_div(Decimal::from(count))
            .unwrap_or(Decimal::ZERO),
        INDICATOR_SCALE,
    )
}

/// # Summary
/// 计算动量：最新收盘价相对 `lookback` 根之前收盘价的涨跌幅。
///
/// # Logic
/// 1. 历史不足 (`len <= lookback`) 时返回零。
/// 2. 基准收盘价为零时返回零（避免除零）。
/// 3. `(latest - prior) / prior`，商按 8 位小数商业舍入。
///
/// # Arguments
/// * `bars`: 按交易日升序排列的日线窗口。
/// * `lookback`: 回看根数（调用方负责事先钳制到 `len - 1`）。
///
/// # Returns
/// 动量值（分数涨跌幅），历史不足或基准为零时为零。
pub fn momentum(bars: &[PriceBar], lookback: usize) -> Decimal {
    let len = bars.len();
    if len <= lookback {
        return Decimal::ZERO;
    }
    let Some(latest) = bars.last() else {
        return Decimal::ZERO;
    };
    let prior = bars[len - 1 - lookback].close;
    if prior.is_zero() {
        return Decimal::ZERO;
    }
    commercial_round(
        (latest.close - prior)
            .checked_div(prior)
            .unwrap_or(Decimal::ZERO),
        INDICATOR_SCALE,
    )
}
