use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// # Summary
/// 单个标的在单个信号日上的一条排名推荐（交易信号）。
///
/// # Invariants
/// - 当 ATR > 0 时恒有 `stop_loss < entry_price < take_profit`（由打分阶段推导保证）。
/// - 每轮扫描全新创建，创建后不再修改。
/// - `id` 仅在写入 SetupStore 后由存储层回填，未持久化时为 None。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingSetup {
    /// 存储层分配的主键 (未持久化时为 None)
    pub id: Option<i64>,
    /// 股票代码
    pub symbol: String,
    /// 信号日 (= 参与计算的最新一根日线的交易日)
    pub signal_date: NaiveDate,
    /// 入场价 (= 最新收盘价)
    pub entry_price: Decimal,
    /// 止损价
    pub stop_loss: Decimal,
    /// 止盈价
    pub take_profit: Decimal,
    /// 综合排名得分 (6 位小数)
    pub score: Decimal,
    /// 打分方法标签 (便于未来多策略共存)
    pub strategy: String,
}
