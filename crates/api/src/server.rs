//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use takane_broadcast::SetupTopic;
use takane_scanner::ScanService;

use crate::routes::{setups, stream};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - `scanner` 与 `topic` 在服务启动前由 DI 容器注入，生命周期与进程等同。
#[derive(Clone)]
pub struct AppState {
    /// 扫描服务 (指标 → 打分 → 排名 流水线入口)
    pub scanner: Arc<ScanService>,
    /// 定时广播主题 (WebSocket 推送的数据源)
    pub topic: Arc<SetupTopic>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Takane 选股引擎 API",
        version = "0.1.0",
        description = "Takane 选股引擎的 RESTful API 网关。按 ATR 波动率与动量为标的打分排名，\
            提供按需查询与 WebSocket 定时推送。",
        contact(name = "Takane Team"),
        license(name = "MIT")
    ),
    tags(
        (name = "信号 (Setups)", description = "交易信号的扫描、排名与持久化查询 API")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// 构建完整的 axum 应用路由树。
///
/// # Logic
/// 1. 注册 REST 路由并自动收集 OpenAPI Doc。
/// 2. 追加不进入 Swagger 文档的 WebSocket 推送路由。
/// 3. 挂载 Swagger UI 并应用 CORS (开发阶段允许所有来源)。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
pub fn build_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(setups::top_setups))
        .with_state(state.clone())
        .split_for_parts();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .route(
            "/api/v1/setups/stream",
            get(stream::stream_setups).with_state(state),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors)
}

/// 构建路由树并启动 HTTP 监听。
///
/// # Arguments
/// * `state` - 共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:8080"`
pub async fn start_server(
    state: AppState,
    bind_addr: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    tracing::info!("🚀 Takane API Server listening on {}", bind_addr);
    tracing::info!("📖 Swagger UI: http://{}/swagger-ui/", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
