//! # 排名阶段与流程编排
//!
//! `ScanService` 驱动 历史行情 → 指标 → 打分 → 排名 的单次同步遍历。
//! 每个标的独立处理：数据质量问题（历史不足、波动退化）与单标的
//! 读取失败都只跳过该标的，绝不让整批扫描失败。

use std::sync::Arc;

use rust_decimal::Decimal;
use takane_core::common::default_universe;
use takane_core::setup::entity::TradingSetup;
use takane_core::store::error::StoreError;
use takane_core::store::port::{PriceHistory, SetupStore};

use crate::indicator::{ATR_PERIOD, average_true_range, momentum};
use crate::score::build_setup;

/// 产生信号所需的最少日线根数（恰好 15 根即满足）。
pub const MIN_BARS_REQUIRED: usize = 15;

/// 单标的历史请求的最小根数，保证 ATR 窗口始终有足够数据。
pub const MIN_HISTORY_REQUEST: usize = 30;

/// # Summary
/// 一次扫描的全部入参。
///
/// # Invariants
/// - 参数形状不在核心校验：空标的列表或零 `limit` 自然得到空结果。
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// 待扫描的标的列表
    pub symbols: Vec<String>,
    /// 动量回看窗口 (交易日)
    pub lookback_days: usize,
    /// 排名截断数量
    pub limit: usize,
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self {
            symbols: default_universe(),
            lookback_days: 20,
            limit: 10,
        }
    }
}

/// # Summary
/// 扫描服务：持有历史行情与信号持久化两个端口的编排者。
///
/// # Invariants
/// - 不持有锁，不修改任何共享状态；每次调用产出全新的结果列表。
/// - 同样的历史数据与入参必然得到逐字节一致的结果（纯函数性）。
pub struct ScanService {
    history: Arc<dyn PriceHistory>,
    store: Arc<dyn SetupStore>,
}

impl ScanService {
    pub fn new(history: Arc<dyn PriceHistory>, store: Arc<dyn SetupStore>) -> Self {
        Self { history, store }
    }

    /// # Summary
    /// 执行一次完整扫描：逐标的计算指标并打分，最后降序排名截断。
    ///
    /// # Logic
    /// 1. 每个标的请求 `max(lookback_days + 1, 30)` 根最新日线（存储层最新在前）。
    /// 2. 读取失败只告警并跳过该标的（逐标的隔离，不中断整批）。
    /// 3. 少于 15 根或 ATR ≤ 0 的标的静默跳过。
    /// 4. 反转为升序后计算 ATR(14) 与动量（回看钳制到 `len - 1`）。
    /// 5. 按得分降序**稳定**排序（平分保持标的遍历顺序），截断到 `limit`。
    ///
    /// # Arguments
    /// * `req`: 扫描入参。
    ///
    /// # Returns
    /// 排名结果列表；没有任何标的合格时为合法的空列表，不是错误。
    pub async fn scan(&self, req: &ScanRequest) -> Vec<TradingSetup> {
        let fetch_limit = req.lookback_days.saturating_add(1).max(MIN_HISTORY_REQUEST);
        let mut setups = Vec::new();

        for symbol in &req.symbols {
            let mut bars = match self.history.recent_bars(symbol, fetch_limit).await {
                Ok(bars) => bars,
                Err(e) => {
                    tracing::warn!("读取 {} 历史行情失败，跳过该标的: {}", symbol, e);
                    continue;
                }
            };
            if bars.len() < MIN_BARS_REQUIRED {
                tracing::debug!("{} 历史不足 ({} 根)，跳过", symbol, bars.len());
                continue;
            }

            // 存储层约定最新在前；指标计算要求最旧在前，这里的反转是正确性契约
            bars.reverse();

            let atr = average_true_range(&bars, ATR_PERIOD);
            if atr <= Decimal::ZERO {
                tracing::debug!("{} 波动退化 (ATR = {})，跳过", symbol, atr);
                continue;
            }

            let Some(latest) = bars.last() else {
                continue;
            };
            let lookback = req.lookback_days.min(bars.len() - 1);
            let momentum = momentum(&bars, lookback);

            setups.push(build_setup(
                symbol,
                latest.trade_date,
                latest.close,
                atr,
                momentum,
            ));
        }

        // 稳定排序：得分相同的标的保持入参遍历顺序
        setups.sort_by(|a, b| b.score.cmp(&a.score));
        setups.truncate(req.limit);

        tracing::info!(
            "扫描完成: {} 个标的中 {} 个入榜 (limit = {})",
            req.symbols.len(),
            setups.len(),
            req.limit
        );
        setups
    }

    /// # Summary
    /// 将一批信号写入 SetupStore 并返回携带主键的批次。
    ///
    /// # Logic
    /// 1. 整批透传给持久化端口。
    /// 2. 写入失败作为本次调用的硬失败向上传播（与逐标的跳过策略相反）。
    ///
    /// # Arguments
    /// * `setups`: 扫描产出的信号批次。
    ///
    /// # Returns
    /// 成功返回回填 `id` 的批次，失败返回 `StoreError`。
    pub async fn persist(
        &self,
        setups: Vec<TradingSetup>,
    ) -> Result<Vec<TradingSetup>, StoreError> {
        self.store.save_batch(setups).await
    }
}
