use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use takane_core::market::entity::PriceBar;
use takane_core::store::error::StoreError;
use takane_core::store::port::PriceHistory;
use takane_core::test_utils::{MemPriceHistory, MemSetupStore, flat_series, trending_series};
use takane_scanner::{ScanRequest, ScanService};

// 帮助函数：用内存替身组装扫描服务
fn service_with(history: MemPriceHistory) -> (ScanService, Arc<MemSetupStore>) {
    let store = Arc::new(MemSetupStore::new());
    let service = ScanService::new(Arc::new(history), store.clone());
    (service, store)
}

fn request(symbols: &[&str], lookback_days: usize, limit: usize) -> ScanRequest {
    ScanRequest {
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        lookback_days,
        limit,
    }
}

#[tokio::test]
async fn test_min_bars_boundary() {
    let history = MemPriceHistory::new();
    // 恰好 15 根必须合格，14 根必须被跳过
    history.insert_series(
        "QUAL",
        trending_series("QUAL", 15, dec!(100), dec!(0.5), dec!(0.5)),
    );
    history.insert_series(
        "SHORT",
        trending_series("SHORT", 14, dec!(100), dec!(0.5), dec!(0.5)),
    );
    let (service, _) = service_with(history);

    let setups = service.scan(&request(&["QUAL", "SHORT"], 20, 10)).await;
    assert_eq!(setups.len(), 1);
    assert_eq!(setups[0].symbol, "QUAL");
}

#[tokio::test]
async fn test_flat_series_excluded() {
    let history = MemPriceHistory::new();
    history.insert_series("FLAT", flat_series("FLAT", 30, dec!(100)));
    let (service, _) = service_with(history);

    let setups = service.scan(&request(&["FLAT"], 20, 10)).await;
    assert!(setups.is_empty(), "ATR 为零的标的必须被排除");
}

#[tokio::test]
async fn test_uptrend_beats_flat_example() {
    // 30 根温和上行、日内波幅约 $1、收盘价 $100 量级的序列：
    // 动量 > 0，ATR ≈ 1，得分 > 0，且领先于被整体排除的无波动标的
    let history = MemPriceHistory::new();
    history.insert_series(
        "TREND",
        trending_series("TREND", 30, dec!(100), dec!(0.5), dec!(0.5)),
    );
    history.insert_series("FLAT", flat_series("FLAT", 30, dec!(100)));
    let (service, _) = service_with(history);

    let setups = service.scan(&request(&["FLAT", "TREND"], 20, 10)).await;
    assert_eq!(setups.len(), 1);

    let top = &setups[0];
    assert_eq!(top.symbol, "TREND");
    assert!(top.score > Decimal::ZERO);
    assert!(top.stop_loss < top.entry_price);
    assert!(top.entry_price < top.take_profit);
    // 止损距离 = 2 × ATR ≈ 2
    assert_eq!(top.entry_price - top.stop_loss, dec!(2.00000000));
}

#[tokio::test]
async fn test_ranking_order_and_limit() {
    let history = MemPriceHistory::new();
    // 三个标的，日涨幅递增 → 得分严格递增
    history.insert_series(
        "SLOW",
        trending_series("SLOW", 30, dec!(100), dec!(0.2), dec!(0.5)),
    );
    history.insert_series(
        "MID",
        trending_series("MID", 30, dec!(100), dec!(0.5), dec!(0.5)),
    );
    history.insert_series(
        "FAST",
        trending_series("FAST", 30, dec!(100), dec!(1.0), dec!(0.5)),
    );
    let (service, _) = service_with(history);

    let all = service.scan(&request(&["SLOW", "FAST", "MID"], 20, 10)).await;
    assert_eq!(all.len(), 3);
    assert!(all[0].score >= all[1].score && all[1].score >= all[2].score);
    assert_eq!(all[0].symbol, "FAST");
    assert_eq!(all[2].symbol, "SLOW");

    // limit = 1 时只保留得分最高者
    let top1 = service.scan(&request(&["SLOW", "FAST", "MID"], 20, 1)).await;
    assert_eq!(top1.len(), 1);
    assert_eq!(top1[0].symbol, "FAST");

    // limit 超过合格数时全量返回，不报错
    let over = service.scan(&request(&["SLOW", "FAST", "MID"], 20, 99)).await;
    assert_eq!(over.len(), 3);
}

#[tokio::test]
async fn test_equal_scores_keep_request_order() {
    let history = MemPriceHistory::new();
    // 两个标的使用完全相同的历史 → 得分逐位一致
    history.insert_series(
        "ZZZ",
        trending_series("ZZZ", 30, dec!(100), dec!(0.5), dec!(0.5)),
    );
    history.insert_series(
        "AAA",
        trending_series("AAA", 30, dec!(100), dec!(0.5), dec!(0.5)),
    );
    let (service, _) = service_with(history);

    // 平分时保持入参遍历顺序（稳定排序），而不是字典序等其他顺序
    let setups = service.scan(&request(&["ZZZ", "AAA"], 20, 10)).await;
    assert_eq!(setups.len(), 2);
    assert_eq!(setups[0].score, setups[1].score);
    assert_eq!(setups[0].symbol, "ZZZ");
    assert_eq!(setups[1].symbol, "AAA");

    // 反转入参顺序，输出顺序随之反转
    let flipped = service.scan(&request(&["AAA", "ZZZ"], 20, 10)).await;
    assert_eq!(flipped[0].symbol, "AAA");
    assert_eq!(flipped[1].symbol, "ZZZ");
}

#[tokio::test]
async fn test_empty_inputs_produce_empty_results() {
    let history = MemPriceHistory::new();
    history.insert_series(
        "AAA",
        trending_series("AAA", 30, dec!(100), dec!(0.5), dec!(0.5)),
    );
    let (service, _) = service_with(history);

    // 空标的列表与零 limit 都得到合法空结果
    assert!(service.scan(&request(&[], 20, 10)).await.is_empty());
    assert!(service.scan(&request(&["AAA"], 20, 0)).await.is_empty());
    // 完全未知的标的同样只是缺席
    assert!(service.scan(&request(&["NOPE"], 20, 10)).await.is_empty());
}

#[tokio::test]
async fn test_idempotent_scan() {
    let history = MemPriceHistory::new();
    history.insert_series(
        "AAPL",
        trending_series("AAPL", 30, dec!(180), dec!(0.8), dec!(1.2)),
    );
    history.insert_series(
        "MSFT",
        trending_series("MSFT", 30, dec!(320), dec!(0.4), dec!(2.0)),
    );
    let (service, _) = service_with(history);

    let req = request(&["AAPL", "MSFT"], 20, 10);
    let first = service.scan(&req).await;
    let second = service.scan(&req).await;

    // 历史未变时两次扫描结果逐字节一致
    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[tokio::test]
async fn test_persist_assigns_ids() {
    let history = MemPriceHistory::new();
    history.insert_series(
        "NVDA",
        trending_series("NVDA", 30, dec!(500), dec!(2), dec!(5)),
    );
    let (service, store) = service_with(history);

    let setups = service.scan(&request(&["NVDA"], 20, 10)).await;
    assert_eq!(setups.len(), 1);
    assert!(setups[0].id.is_none(), "未持久化的信号不携带主键");

    let persisted = service.persist(setups).await.unwrap();
    assert_eq!(persisted.len(), 1);
    assert!(persisted[0].id.is_some(), "持久化后必须回填主键");
    assert_eq!(store.saved_count(), 1);
}

/// 只对特定标的失败的历史读取替身
struct FlakyHistory {
    inner: MemPriceHistory,
    failing_symbol: String,
}

#[async_trait]
impl PriceHistory for FlakyHistory {
    async fn recent_bars(&self, symbol: &str, limit: usize) -> Result<Vec<PriceBar>, StoreError> {
        if symbol == self.failing_symbol {
            return Err(StoreError::Database("connection reset".to_string()));
        }
        self.inner.recent_bars(symbol, limit).await
    }
}

#[tokio::test]
async fn test_store_failure_skips_symbol_only() {
    let inner = MemPriceHistory::new();
    inner.insert_series(
        "GOOD",
        trending_series("GOOD", 30, dec!(100), dec!(0.5), dec!(0.5)),
    );
    let history = FlakyHistory {
        inner,
        failing_symbol: "BAD".to_string(),
    };
    let store = Arc::new(MemSetupStore::new());
    let service = ScanService::new(Arc::new(history), store);

    // BAD 读取失败只缺席，GOOD 正常入榜
    let setups = service.scan(&request(&["BAD", "GOOD"], 20, 10)).await;
    assert_eq!(setups.len(), 1);
    assert_eq!(setups[0].symbol, "GOOD");
}
