//! # 测试替身 (feature = "test-utils")
//!
//! 为下游 crate 的集成测试提供内存版端口实现与日线序列构造器，
//! 避免在单测里依赖真实 SQLite 文件。

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{Days, NaiveDate};
use dashmap::DashMap;
use rust_decimal::Decimal;

use crate::market::entity::PriceBar;
use crate::setup::entity::TradingSetup;
use crate::store::error::StoreError;
use crate::store::port::{PriceHistory, SetupStore};
use async_trait::async_trait;

/// 测试序列统一使用的起始交易日。
pub fn series_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 2).unwrap_or_default()
}

/// # Summary
/// 构造一段完全无波动的日线序列 (open = high = low = close)。
///
/// # Arguments
/// * `symbol`: 股票代码。
/// * `days`: 序列长度。
/// * `price`: 每日四价。
///
/// # Returns
/// 按交易日**升序**排列的日线列表。
pub fn flat_series(symbol: &str, days: usize, price: Decimal) -> Vec<PriceBar> {
    (0..days)
        .map(|i| PriceBar {
            symbol: symbol.to_string(),
            trade_date: nth_date(i),
            open: price,
            high: price,
            low: price,
            close: price,
        })
        .collect()
}

/// # Summary
/// 构造一段温和上行的日线序列。
///
/// # Logic
/// 1. 收盘价从 `start_close` 起每日增加 `daily_step`。
/// 2. 最高/最低价在收盘价上下各偏移 `half_range`。
/// 3. 开盘价取前一日收盘价（首日取自身收盘价）。
///
/// # Returns
/// 按交易日**升序**排列的日线列表。
pub fn trending_series(
    symbol: &str,
    days: usize,
    start_close: Decimal,
    daily_step: Decimal,
    half_range: Decimal,
) -> Vec<PriceBar> {
    (0..days)
        .map(|i| {
            let close = start_close + daily_step * Decimal::from(i);
            let open = if i == 0 { close } else { close - daily_step };
            PriceBar {
                symbol: symbol.to_string(),
                trade_date: nth_date(i),
                open,
                high: close + half_range,
                low: close - half_range,
                close,
            }
        })
        .collect()
}

fn nth_date(i: usize) -> NaiveDate {
    let start = series_start();
    start
        .checked_add_days(Days::new(u64::try_from(i).unwrap_or(u64::MAX)))
        .unwrap_or(start)
}

/// # Summary
/// `PriceHistory` 的内存实现，每个标的持有一段升序日线序列。
///
/// # Invariants
/// - `recent_bars` 的输出与真实存储一致：最新在前。
#[derive(Default)]
pub struct MemPriceHistory {
    series: DashMap<String, Vec<PriceBar>>,
}

impl MemPriceHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入一段升序日线序列，覆盖同名标的的旧数据。
    pub fn insert_series(&self, symbol: &str, bars_ascending: Vec<PriceBar>) {
        self.series.insert(symbol.to_string(), bars_ascending);
    }
}

#[async_trait]
impl PriceHistory for MemPriceHistory {
    async fn recent_bars(&self, symbol: &str, limit: usize) -> Result<Vec<PriceBar>, StoreError> {
        let bars = self
            .series
            .get(symbol)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        Ok(bars.into_iter().rev().take(limit).collect())
    }
}

/// # Summary
/// `SetupStore` 的内存实现，用自增计数器模拟数据库主键分配。
#[derive(Default)]
pub struct MemSetupStore {
    next_id: AtomicI64,
    saved: DashMap<i64, TradingSetup>,
}

impl MemSetupStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            saved: DashMap::new(),
        }
    }

    /// 已落库的信号总数。
    pub fn saved_count(&self) -> usize {
        self.saved.len()
    }
}

#[async_trait]
impl SetupStore for MemSetupStore {
    async fn save_batch(
        &self,
        setups: Vec<TradingSetup>,
    ) -> Result<Vec<TradingSetup>, StoreError> {
        let mut annotated = Vec::with_capacity(setups.len());
        for mut setup in setups {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            setup.id = Some(id);
            self.saved.insert(id, setup.clone());
            annotated.push(setup);
        }
        Ok(annotated)
    }
}

/// # Summary
/// 永远失败的 `PriceHistory` 实现，用于验证逐标的隔离策略。
pub struct FailingPriceHistory;

#[async_trait]
impl PriceHistory for FailingPriceHistory {
    async fn recent_bars(&self, symbol: &str, _limit: usize) -> Result<Vec<PriceBar>, StoreError> {
        Err(StoreError::Database(format!(
            "simulated read failure for {symbol}"
        )))
    }
}
