//! # WebSocket 推送路由
//!
//! 把 `SetupTopic` 的定时广播桥接到 WebSocket 连接：每期排名结果
//! 序列化为一帧 JSON 文本下发。纯推送通道，不处理入站消息。

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use tokio::sync::broadcast;

use takane_core::broadcast::entity::SetupBroadcast;

use crate::server::AppState;

/// # Summary
/// `GET /api/v1/setups/stream` - 升级为 WebSocket 并订阅定时广播。
pub async fn stream_setups(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let rx = state.topic.subscribe();
    ws.on_upgrade(move |socket| forward_broadcasts(socket, rx))
}

/// # Summary
/// 把广播期次逐帧转发到单个 WebSocket 连接。
///
/// # Logic
/// 1. 每收到一期广播，序列化为 JSON 文本帧下发。
/// 2. 订阅端落后 (Lagged) 时丢弃错过的期次继续，不断开连接。
/// 3. 对端断开或主题关闭时结束任务。
async fn forward_broadcasts(mut socket: WebSocket, mut rx: broadcast::Receiver<SetupBroadcast>) {
    loop {
        match rx.recv().await {
            Ok(event) => {
                let payload = match serde_json::to_string(&event) {
                    Ok(payload) => payload,
                    Err(e) => {
                        tracing::error!("广播载荷序列化失败: {}", e);
                        continue;
                    }
                };
                if socket.send(Message::Text(payload.into())).await.is_err() {
                    // 对端断开
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::debug!("WebSocket 订阅者落后，跳过 {} 期广播", skipped);
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
