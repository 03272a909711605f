//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向前端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use takane_core::setup::entity::TradingSetup;

// ============================================================
//  信号相关 DTO
// ============================================================

/// 交易信号 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetupResponse {
    /// 存储层分配的主键 (persist=false 时为 null)
    #[schema(example = 42)]
    pub id: Option<i64>,
    /// 股票代码
    #[schema(example = "AAPL")]
    pub symbol: String,
    /// 信号日 (ISO 8601 日期)
    #[schema(example = "2026-08-28")]
    pub signal_date: String,
    /// 入场价
    #[schema(example = "182.00")]
    pub entry_price: String,
    /// 止损价
    #[schema(example = "178.50")]
    pub stop_loss: String,
    /// 止盈价
    #[schema(example = "187.25")]
    pub take_profit: String,
    /// 综合排名得分 (6 位小数)
    #[schema(example = "4.500950")]
    pub score: String,
    /// 打分方法标签
    #[schema(example = "MOMENTUM_ATR")]
    pub strategy: String,
}

// ============================================================
//  通用响应 DTO
// ============================================================

/// 统一 API 响应包装器
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T: Serialize + ToSchema> {
    /// 是否成功
    pub success: bool,
    /// 数据载荷 (成功时)
    pub data: Option<T>,
    /// 错误信息 (失败时)
    pub error: Option<String>,
}

impl<T: Serialize + ToSchema> ApiResponse<T> {
    /// 构建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// 构建失败响应 (不含泛型载荷)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}

// ============================================================
//  领域模型 → DTO 惯用转换 (impl From<T>)
// ============================================================

impl From<TradingSetup> for SetupResponse {
    fn from(s: TradingSetup) -> Self {
        Self {
            id: s.id,
            symbol: s.symbol,
            signal_date: s.signal_date.to_string(),
            entry_price: s.entry_price.to_string(),
            stop_loss: s.stop_loss.to_string(),
            take_profit: s.take_profit.to_string(),
            score: s.score.to_string(),
            strategy: s.strategy,
        }
    }
}
