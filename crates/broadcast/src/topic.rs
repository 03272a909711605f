use takane_core::broadcast::entity::SetupBroadcast;
use takane_core::broadcast::port::SetupPublisher;
use tokio::sync::broadcast;

/// 单个订阅者积压的最大期数，超出后最旧的期次被丢弃 (Lagged)。
const TOPIC_CAPACITY: usize = 16;

/// # Summary
/// `top-setups` 主题的广播通道封装，实现 `SetupPublisher` 端口。
///
/// # Invariants
/// - 发布端不持有任何可变共享状态，`publish` 可从任意任务并发调用。
/// - 无订阅者时发布直接丢弃载荷，不视为错误。
pub struct SetupTopic {
    tx: broadcast::Sender<SetupBroadcast>,
}

impl SetupTopic {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(TOPIC_CAPACITY);
        Self { tx }
    }

    /// # Summary
    /// 挂载一个新的订阅者。
    ///
    /// # Logic
    /// 1. 从底层通道派生接收端。
    /// 2. 订阅者只会收到订阅之后发布的期次。
    ///
    /// # Returns
    /// 广播接收端；落后超过通道容量时收到 `Lagged` 并继续。
    pub fn subscribe(&self) -> broadcast::Receiver<SetupBroadcast> {
        self.tx.subscribe()
    }
}

impl Default for SetupTopic {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupPublisher for SetupTopic {
    fn publish(&self, broadcast: SetupBroadcast) -> usize {
        // send 仅在没有任何接收端时返回 Err，对尽力而为语义而言等价于 0 个订阅者
        self.tx.send(broadcast).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use takane_core::broadcast::entity::TOPIC_TOP_SETUPS;

    #[tokio::test]
    async fn test_publish_without_subscribers_is_noop() {
        let topic = SetupTopic::new();
        assert_eq!(topic.publish(SetupBroadcast::top_setups(vec![])), 0);
    }

    #[tokio::test]
    async fn test_lagged_subscriber_skips_and_continues() {
        let topic = SetupTopic::new();
        let mut rx = topic.subscribe();

        // 订阅者不读取期间发布超过通道容量的期次
        for _ in 0..(TOPIC_CAPACITY + 2) {
            topic.publish(SetupBroadcast::top_setups(vec![]));
        }

        // 先收到 Lagged（错过的期次被丢弃），随后仍能继续收到保留的期次
        match rx.recv().await {
            Err(broadcast::error::RecvError::Lagged(skipped)) => assert_eq!(skipped, 2),
            other => panic!("expected Lagged, got {other:?}"),
        }
        let event = rx.recv().await.unwrap();
        assert_eq!(event.topic, TOPIC_TOP_SETUPS);
    }

    #[tokio::test]
    async fn test_subscriber_receives_published_batch() {
        let topic = SetupTopic::new();
        let mut rx = topic.subscribe();

        let delivered = topic.publish(SetupBroadcast::top_setups(vec![]));
        assert_eq!(delivered, 1);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.topic, TOPIC_TOP_SETUPS);
        assert!(event.setups.is_empty());
    }
}
