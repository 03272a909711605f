/// # Summary
/// 默认标的池：未显式指定扫描范围时使用的八只大盘股。
///
/// # Invariants
/// - 作为命名常量显式传入扫描流程，而不是可变的进程级共享状态。
pub const DEFAULT_UNIVERSE: [&str; 8] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "TSLA", "META", "NVDA", "NFLX",
];

/// # Summary
/// 将逗号分隔的标的字符串解析为代码列表。
///
/// # Logic
/// 1. 按逗号拆分。
/// 2. 去除两端空白。
/// 3. 丢弃空片段。
///
/// # Arguments
/// * `raw`: 形如 `"AAPL, MSFT,,TSLA"` 的原始字符串。
///
/// # Returns
/// 清洗后的代码列表，可能为空。
pub fn parse_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// # Summary
/// 返回默认标的池的拥有所有权副本，便于直接构造扫描请求。
pub fn default_universe() -> Vec<String> {
    DEFAULT_UNIVERSE.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbols_trims_and_drops_empty() {
        let parsed = parse_symbols(" AAPL, MSFT ,,NVDA ,");
        assert_eq!(parsed, vec!["AAPL", "MSFT", "NVDA"]);
    }

    #[test]
    fn test_parse_symbols_empty_input() {
        assert!(parse_symbols("").is_empty());
        assert!(parse_symbols(" , ,").is_empty());
    }

    #[test]
    fn test_default_universe_size() {
        assert_eq!(default_universe().len(), 8);
    }
}
