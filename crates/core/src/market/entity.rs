use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// # Summary
/// 单个交易日的 OHLC 行情实体，价格使用定点十进制避免二进制浮点漂移。
///
/// # Invariants
/// - `high` 必须大于或等于 `low`, `open`, `close`（由上游数据保证，核心不校验）。
/// - 实体只读：核心流程从不创建、修改或删除行情记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    /// 股票代码 (例如: AAPL)
    pub symbol: String,
    /// 交易日 (日线粒度)
    pub trade_date: NaiveDate,
    /// 开盘价
    pub open: Decimal,
    /// 最高价
    pub high: Decimal,
    /// 最低价
    pub low: Decimal,
    /// 收盘价
    pub close: Decimal,
}
