//! # `takane-api` - HTTP/WS API 网关
//!
//! 本 crate 是 Takane 选股引擎的对外服务入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 解析查询参数并调用下层 `ScanService` 完成一次按需扫描
//! - 可选地经由 `SetupStore` 持久化并返回携带主键的结果
//! - 通过 WebSocket 把 `SetupTopic` 的定时广播桥接给订阅客户端
//! - 将领域模型转换为 DTO 返回给前端

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
