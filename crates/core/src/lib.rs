//! # `takane-core` - 领域核心
//!
//! 本 crate 定义 Takane 选股引擎的领域实体、端口 (Port) 契约与各域错误类型。
//! 外层 crate (scanner / store / broadcast / api / app) 只依赖这里的抽象，
//! 彼此之间不共享任何内部状态。
//!
//! ## 架构职责
//! - `market`: 日线行情实体 (`PriceBar`)
//! - `setup`: 交易信号实体 (`TradingSetup`)
//! - `store`: 历史行情读取与信号持久化端口
//! - `broadcast`: 定时推送事件实体与发布端口
//! - `common`: 默认标的池等共享常量
//! - `config`: 应用全局配置结构

pub mod broadcast;
pub mod common;
pub mod config;
pub mod market;
pub mod setup;
pub mod store;

#[cfg(feature = "test-utils")]
pub mod test_utils;
