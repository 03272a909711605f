use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::setup::entity::TradingSetup;

/// 定时推送使用的主题名称。
pub const TOPIC_TOP_SETUPS: &str = "top-setups";

/// # Summary
/// 一次定时广播的完整载荷：主题、发布时间与当期排名结果。
///
/// # Invariants
/// - `setups` 已按得分降序排列并完成截断，订阅端无需再排序。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupBroadcast {
    /// 广播主题
    pub topic: String,
    /// 发布时间
    pub published_at: DateTime<Utc>,
    /// 当期排名结果 (得分降序)
    pub setups: Vec<TradingSetup>,
}

impl SetupBroadcast {
    /// 以当前时间构造一期 `top-setups` 主题的广播载荷。
    pub fn top_setups(setups: Vec<TradingSetup>) -> Self {
        Self {
            topic: TOPIC_TOP_SETUPS.to_string(),
            published_at: Utc::now(),
            setups,
        }
    }
}
