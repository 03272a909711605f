//! # `takane-store` - SQLite 持久化层
//!
//! 用 `sqlx` + SQLite 实现核心定义的两个存储端口：
//! - `history`: 日线历史读取 (`PriceHistory`)，附带种子数据写入
//! - `setup`: 交易信号批量落库 (`SetupStore`)，回填自增主键
//!
//! 价格列一律以 TEXT 存储十进制字符串，避免 REAL 列引入二进制
//! 浮点舍入漂移。

pub mod config;
pub mod history;
pub mod setup;
