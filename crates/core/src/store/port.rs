use super::error::StoreError;
use crate::market::entity::PriceBar;
use crate::setup::entity::TradingSetup;
use async_trait::async_trait;

/// # Summary
/// 历史行情读取接口，为扫描流程提供单个标的最近 N 根日线。
///
/// # Invariants
/// - 返回结果必须按交易日**降序**排列（最新在前）。
/// - 历史不足时返回实际存在的数量，不视为错误。
#[async_trait]
pub trait PriceHistory: Send + Sync {
    /// # Summary
    /// 读取指定标的最近的日线数据。
    ///
    /// # Logic
    /// 1. 按交易日降序定位该标的的行情记录。
    /// 2. 截取最多 `limit` 根返回。
    ///
    /// # Arguments
    /// * `symbol`: 股票代码。
    /// * `limit`: 请求的数量上限。
    ///
    /// # Returns
    /// 成功返回最新在前的日线列表（可能少于 `limit`），失败返回 `StoreError`。
    async fn recent_bars(&self, symbol: &str, limit: usize) -> Result<Vec<PriceBar>, StoreError>;
}

/// # Summary
/// 交易信号持久化接口，负责批量落库并回填存储分配的主键。
///
/// # Invariants
/// - 返回批次与入参批次一一对应且顺序不变，仅 `id` 字段被回填。
/// - 本核心不涉及信号的更新与删除操作。
#[async_trait]
pub trait SetupStore: Send + Sync {
    /// # Summary
    /// 批量保存交易信号。
    ///
    /// # Logic
    /// 1. 逐条插入 `trading_setups` 表。
    /// 2. 将数据库分配的主键回填到实体后原样返回。
    ///
    /// # Arguments
    /// * `setups`: 待保存的信号批次。
    ///
    /// # Returns
    /// 成功返回携带 `id` 的同一批次，失败返回 `StoreError`。
    async fn save_batch(&self, setups: Vec<TradingSetup>)
    -> Result<Vec<TradingSetup>, StoreError>;
}
