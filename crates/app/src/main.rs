use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use takane_api::server::{AppState, start_server};
use takane_broadcast::{BroadcastScheduler, SetupTopic};
use takane_core::config::AppConfig;
use takane_scanner::{ScanRequest, ScanService};
use takane_store::history::SqlitePriceHistory;
use takane_store::setup::SqliteSetupStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// # Summary
/// 加载应用配置：可选的 `config/takane.toml` 文件 + `TAKANE__*` 环境变量覆盖，
/// 两者都缺省时落到内置默认值。
fn load_config() -> Result<AppConfig, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::with_name("config/takane").required(false))
        .add_source(config::Environment::with_prefix("TAKANE").separator("__"))
        .build()?
        .try_deserialize()
}

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到 ScanService。
///
/// # Logic
/// 1. 初始化全局日志与配置。
/// 2. 实例化基础设施层（SQLite 存储）。
/// 3. 构造扫描服务与广播主题。
/// 4. 启动定时广播调度器。
/// 5. 启动 API 服务并等待外部信号退出。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 初始化日志 (RUST_LOG 可覆盖，缺省 info)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!("Takane Engine starting...");

    let app_config = load_config()?;

    // 2. 实例化基础设施层
    takane_store::config::set_root_dir(PathBuf::from(&app_config.database.data_dir));
    let history = Arc::new(SqlitePriceHistory::new().await?);
    let setup_store = Arc::new(SqliteSetupStore::new().await?);

    // 3. 构造扫描服务与广播主题
    let scanner = Arc::new(ScanService::new(history, setup_store));
    let topic = Arc::new(SetupTopic::new());

    // 4. 启动定时广播调度器 (fire-and-forget，从不持久化)
    let broadcast_request = ScanRequest {
        symbols: app_config.scan.universe.clone(),
        lookback_days: app_config.scan.lookback_days,
        limit: app_config.scan.limit,
    };
    let scheduler_handle = BroadcastScheduler::new(
        scanner.clone(),
        topic.clone(),
        broadcast_request,
        Duration::from_secs(app_config.scan.broadcast_interval_secs),
    )
    .spawn();

    // 5. 启动 API 服务并挂起等待退出信号
    let state = AppState { scanner, topic };
    let bind_addr = format!("{}:{}", app_config.server.host, app_config.server.port);

    tokio::select! {
        result = start_server(state, &bind_addr) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting...");
        }
    }

    scheduler_handle.abort();
    Ok(())
}
