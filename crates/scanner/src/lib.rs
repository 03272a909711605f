//! # `takane-scanner` - 打分与排名核心
//!
//! 本 crate 承载整个仓库唯一的非平凡数值逻辑：把每个标的的日线历史
//! 依次经过三个阶段转化为排名结果。
//!
//! 1. **指标阶段** (`indicator`): 日线窗口 → ATR (波动率) + 动量
//! 2. **打分阶段** (`score`): 指标 → 入场/止损/止盈价与综合得分
//! 3. **排名阶段** (`service`): 得分降序稳定排序并截断
//!
//! 每个标的独立计算，阶段之间不共享内部状态；HTTP 路由、持久化与
//! 推送传输都只是围绕这里的薄层管道。

pub mod indicator;
pub mod score;
pub mod service;

pub use service::{ScanRequest, ScanService};
