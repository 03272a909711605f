use std::sync::Arc;
use std::time::Duration;

use takane_core::broadcast::entity::SetupBroadcast;
use takane_core::broadcast::port::SetupPublisher;
use takane_scanner::{ScanRequest, ScanService};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// 默认广播周期。
pub const DEFAULT_BROADCAST_INTERVAL: Duration = Duration::from_secs(60);

/// # Summary
/// 定时广播调度器：每个周期发起一次全新扫描并推送结果。
///
/// # Invariants
/// - 扫描在调度任务内被 await，单个任务串行执行，两次触发绝不重叠；
///   一次扫描超过周期时顺延下一次触发而不是并发补发。
/// - 本路径从不持久化扫描结果。
pub struct BroadcastScheduler {
    scanner: Arc<ScanService>,
    publisher: Arc<dyn SetupPublisher>,
    request: ScanRequest,
    interval: Duration,
}

impl BroadcastScheduler {
    pub fn new(
        scanner: Arc<ScanService>,
        publisher: Arc<dyn SetupPublisher>,
        request: ScanRequest,
        interval: Duration,
    ) -> Self {
        Self {
            scanner,
            publisher,
            request,
            interval,
        }
    }

    /// # Summary
    /// 启动调度协程。
    ///
    /// # Logic
    /// 1. 建立固定周期的 interval，首个 tick 立即完成（启动即广播一期），
    ///    错过的 tick 顺延 (Delay) 而非突发补发。
    /// 2. 每个 tick 执行一次全新扫描（fresh invocation，无跨期共享状态）。
    /// 3. 把结果包装为 `SetupBroadcast` 发布到主题，仅记录订阅者数量。
    ///
    /// # Returns
    /// 调度任务句柄，随运行时退出或被显式 abort 而结束。
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let setups = self.scanner.scan(&self.request).await;
                let count = setups.len();
                let receivers = self.publisher.publish(SetupBroadcast::top_setups(setups));
                tracing::debug!("广播 {} 条信号给 {} 个订阅者", count, receivers);
            }
        })
    }
}
