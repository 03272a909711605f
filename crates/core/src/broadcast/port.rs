use crate::broadcast::entity::SetupBroadcast;

/// # Summary
/// 排名结果发布接口，面向所有当前订阅者做尽力而为的扇出。
///
/// # Invariants
/// - 发布为 fire-and-forget：没有背压，也不提供送达确认。
/// - 没有任何订阅者时发布不是错误，载荷直接丢弃。
pub trait SetupPublisher: Send + Sync {
    /// # Summary
    /// 向主题发布一期广播载荷。
    ///
    /// # Logic
    /// 1. 将载荷投递到底层广播通道。
    /// 2. 统计当前能收到本期载荷的订阅者数量。
    ///
    /// # Arguments
    /// * `broadcast`: 本期广播载荷。
    ///
    /// # Returns
    /// 收到本期载荷的订阅者数量（无订阅者时为 0）。
    fn publish(&self, broadcast: SetupBroadcast) -> usize;
}
