//! # `takane-broadcast` - 定时推送传输层
//!
//! 围绕扫描核心的薄层管道：`SetupTopic` 提供主题化的广播通道扇出，
//! `BroadcastScheduler` 按固定周期触发一次全新的扫描并把结果推给
//! 所有当前订阅者。推送为尽力而为，不持久化、不确认送达。

pub mod scheduler;
pub mod topic;

pub use scheduler::BroadcastScheduler;
pub use topic::SetupTopic;
