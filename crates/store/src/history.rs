use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use takane_core::market::entity::PriceBar;
use takane_core::store::error::StoreError;
use takane_core::store::port::PriceHistory;

/// # Summary
/// `PriceHistory` 的 SQLite 实现，所有标的共享一张 `price_bars` 表。
///
/// # Invariants
/// - 价格列以 TEXT 存储十进制字符串，读取时无损还原为 `Decimal`。
/// - `recent_bars` 按交易日降序返回（最新在前），与端口契约一致。
pub struct SqlitePriceHistory {
    pool: SqlitePool,
}

impl SqlitePriceHistory {
    /// 创建并初始化历史行情存储。
    ///
    /// # Logic
    /// 1. 在配置的数据根目录下定位 `history.db`，目录不存在时创建。
    /// 2. 以 `create_if_missing` 打开连接池并执行建表 SQL。
    ///
    /// # Returns
    /// * `Result<Self, StoreError>` - 存储实例或错误。
    pub async fn new() -> Result<Self, StoreError> {
        let base_path = crate::config::get_root_dir();
        if !base_path.exists() {
            std::fs::create_dir_all(&base_path)
                .map_err(|e| StoreError::InitError(e.to_string()))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(base_path.join("history.db"))
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS price_bars (
                symbol     TEXT NOT NULL,
                trade_date TEXT NOT NULL,
                open       TEXT NOT NULL,
                high       TEXT NOT NULL,
                low        TEXT NOT NULL,
                close      TEXT NOT NULL,
                PRIMARY KEY (symbol, trade_date)
            );
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self { pool })
    }

    /// # Summary
    /// 批量写入日线数据（种子导入与测试使用，端口本身保持只读）。
    ///
    /// # Logic
    /// 1. 逐条执行 `INSERT OR REPLACE`，同一 (symbol, trade_date) 幂等覆盖。
    ///
    /// # Arguments
    /// * `bars` - 待写入的日线列表。
    ///
    /// # Returns
    /// * `Result<(), StoreError>`
    pub async fn save_bars(&self, bars: &[PriceBar]) -> Result<(), StoreError> {
        for bar in bars {
            sqlx::query(
                r#"
                INSERT OR REPLACE INTO price_bars (symbol, trade_date, open, high, low, close)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&bar.symbol)
            .bind(bar.trade_date)
            .bind(bar.open.to_string())
            .bind(bar.high.to_string())
            .bind(bar.low.to_string())
            .bind(bar.close.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        }
        Ok(())
    }
}

/// TEXT 列 → Decimal，解析失败映射为解码错误
fn parse_price(raw: &str) -> Result<Decimal, StoreError> {
    Decimal::from_str(raw).map_err(|e| StoreError::Decode(format!("{raw}: {e}")))
}

#[async_trait]
impl PriceHistory for SqlitePriceHistory {
    /// # Summary
    /// 读取指定标的最近的日线数据，最新在前。
    ///
    /// # Logic
    /// 1. 按交易日降序查询 `price_bars` 表并截取 `limit` 根。
    /// 2. 将 TEXT 价格列无损还原为 `Decimal`。
    ///
    /// # Arguments
    /// * `symbol` - 股票代码。
    /// * `limit` - 请求的数量上限。
    ///
    /// # Returns
    /// * `Result<Vec<PriceBar>, StoreError>` - 最新在前的日线列表。
    async fn recent_bars(&self, symbol: &str, limit: usize) -> Result<Vec<PriceBar>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let records = sqlx::query_as::<_, (NaiveDate, String, String, String, String)>(
            r#"
            SELECT trade_date, open, high, low, close
            FROM price_bars
            WHERE symbol = ?
            ORDER BY trade_date DESC
            LIMIT ?
            "#,
        )
        .bind(symbol)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut bars = Vec::with_capacity(records.len());
        for r in records {
            bars.push(PriceBar {
                symbol: symbol.to_string(),
                trade_date: r.0,
                open: parse_price(&r.1)?,
                high: parse_price(&r.2)?,
                low: parse_price(&r.3)?,
                close: parse_price(&r.4)?,
            });
        }
        Ok(bars)
    }
}
