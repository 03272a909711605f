use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use takane_core::setup::entity::TradingSetup;
use takane_core::store::error::StoreError;
use takane_core::store::port::SetupStore;

/// # Summary
/// `SetupStore` 的 SQLite 实现，批量落库并回填自增主键。
///
/// # Invariants
/// - 返回批次与入参批次顺序一致，仅 `id` 字段被回填。
/// - 价格与得分以 TEXT 存储十进制字符串。
pub struct SqliteSetupStore {
    pool: SqlitePool,
}

impl SqliteSetupStore {
    /// 创建并初始化信号存储。
    ///
    /// # Logic
    /// 1. 在配置的数据根目录下定位 `setups.db`，目录不存在时创建。
    /// 2. 建表并为 (symbol, signal_date) 建立索引。
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
            .filename(base_path.join("setups.db"))
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS trading_setups (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                symbol      TEXT NOT NULL,
                signal_date TEXT NOT NULL,
                entry_price TEXT NOT NULL,
                stop_loss   TEXT NOT NULL,
                take_profit TEXT NOT NULL,
                score       TEXT NOT NULL,
                strategy    TEXT NOT NULL
            );
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_trading_setups_symbol_date
                ON trading_setups (symbol, signal_date);
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self { pool })
    }

    /// # Summary
    /// 按主键读回一条信号（验证与排查用，核心流程只走 `save_batch`）。
    pub async fn find_by_id(&self, id: i64) -> Result<Option<TradingSetup>, StoreError> {
        let record = sqlx::query_as::<_, (i64, String, NaiveDate, String, String, String, String, String)>(
            r#"
            SELECT id, symbol, signal_date, entry_price, stop_loss, take_profit, score, strategy
            FROM trading_setups
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        record.map(row_to_setup).transpose()
    }
}

fn row_to_setup(
    r: (i64, String, NaiveDate, String, String, String, String, String),
) -> Result<TradingSetup, StoreError> {
    Ok(TradingSetup {
        id: Some(r.0),
        symbol: r.1,
        signal_date: r.2,
        entry_price: parse_decimal(&r.3)?,
        stop_loss: parse_decimal(&r.4)?,
        take_profit: parse_decimal(&r.5)?,
        score: parse_decimal(&r.6)?,
        strategy: r.7,
    })
}

fn parse_decimal(raw: &str) -> Result<Decimal, StoreError> {
    Decimal::from_str(raw).map_err(|e| StoreError::Decode(format!("{raw}: {e}")))
}

#[async_trait]
impl SetupStore for SqliteSetupStore {
    /// # Summary
    /// 批量保存交易信号并回填主键。
    ///
    /// # Logic
    /// 1. 逐条 INSERT 到 `trading_setups` 表。
    /// 2. 用 `last_insert_rowid` 回填实体的 `id` 后原样返回。
    ///
    /// # Arguments
    /// * `setups` - 待保存的信号批次。
    ///
    /// # Returns
    /// * `Result<Vec<TradingSetup>, StoreError>` - 携带主键的同一批次。
    async fn save_batch(
        &self,
        setups: Vec<TradingSetup>,
    ) -> Result<Vec<TradingSetup>, StoreError> {
        let mut annotated = Vec::with_capacity(setups.len());
        for mut setup in setups {
            let result = sqlx::query(
                r#"
                INSERT INTO trading_setups
                    (symbol, signal_date, entry_price, stop_loss, take_profit, score, strategy)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&setup.symbol)
            .bind(setup.signal_date)
            .bind(setup.entry_price.to_string())
            .bind(setup.stop_loss.to_string())
            .bind(setup.take_profit.to_string())
            .bind(setup.score.to_string())
            .bind(&setup.strategy)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

            setup.id = Some(result.last_insert_rowid());
            annotated.push(setup);
        }
        Ok(annotated)
    }
}
