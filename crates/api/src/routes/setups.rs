//! # 信号路由控制器
//!
//! 实现 `/api/v1/setups/top` 的按需查询接口：解析参数、触发一次扫描、
//! 按需持久化并返回 DTO 列表。

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use utoipa::ToSchema;

use takane_core::common::{default_universe, parse_symbols};
use takane_scanner::ScanRequest;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, SetupResponse};

#[derive(Deserialize, ToSchema)]
pub struct TopSetupsQuery {
    /// 逗号分隔的标的列表，缺省为默认标的池
    pub symbols: Option<String>,
    /// 动量回看窗口 (交易日)，缺省 20
    #[serde(rename = "lookbackDays")]
    pub lookback_days: Option<usize>,
    /// 排名截断数量，缺省 10
    pub limit: Option<usize>,
    /// 是否落库并返回携带主键的结果，缺省 false
    pub persist: Option<bool>,
}

/// 查询当前排名最高的交易信号
///
/// 对指定标的执行一次完整的 指标 → 打分 → 排名 流水线，
/// 返回得分降序的信号列表；`persist=true` 时先写入存储，
/// 返回的记录携带存储层分配的主键。
#[utoipa::path(
    get,
    path = "/api/v1/setups/top",
    tag = "信号 (Setups)",
    params(
        ("symbols" = Option<String>, Query, description = "逗号分隔的标的列表，缺省为八只大盘股"),
        ("lookbackDays" = Option<usize>, Query, description = "动量回看窗口 (交易日)，缺省 20"),
        ("limit" = Option<usize>, Query, description = "返回数量上限，缺省 10"),
        ("persist" = Option<bool>, Query, description = "是否持久化结果，缺省 false")
    ),
    responses(
        (status = 200, description = "排名结果获取成功", body = ApiResponse<Vec<SetupResponse>>),
        (status = 500, description = "持久化失败")
    )
)]
pub async fn top_setups(
    State(state): State<AppState>,
    Query(query): Query<TopSetupsQuery>,
) -> Result<Json<ApiResponse<Vec<SetupResponse>>>, ApiError> {
    let defaults = ScanRequest::default();
    // 参数形状不做校验：空列表自然得到合法的空结果
    let symbols = query
        .symbols
        .as_deref()
        .map(parse_symbols)
        .unwrap_or_else(default_universe);

    let request = ScanRequest {
        symbols,
        lookback_days: query.lookback_days.unwrap_or(defaults.lookback_days),
        limit: query.limit.unwrap_or(defaults.limit),
    };

    let mut setups = state.scanner.scan(&request).await;
    if query.persist.unwrap_or(false) {
        setups = state.scanner.persist(setups).await?;
    }

    let responses: Vec<SetupResponse> = setups.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::ok(responses)))
}
