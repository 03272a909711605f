use std::path::PathBuf;
use std::sync::OnceLock;

static ROOT_DIR: OnceLock<PathBuf> = OnceLock::new();

/// # Summary
/// 指定 `history.db` 与 `setups.db` 所在的数据根目录，进程内仅首次调用生效。
///
/// # Logic
/// 1. 把路径写入进程级 `OnceLock`。
/// 2. 重复调用静默忽略，已建立的连接池不受影响。
///
/// # Arguments
/// * `path` - 数据根目录（应用启动时来自配置，测试里指向临时目录）。
pub fn set_root_dir(path: PathBuf) {
    drop(ROOT_DIR.set(path));
}

/// # Summary
/// 读取数据根目录，未显式设置时落到默认的 `data`。
///
/// # Returns
/// 根目录路径的克隆，供各存储在初始化时拼接数据库文件名。
pub(crate) fn get_root_dir() -> PathBuf {
    ROOT_DIR
        .get()
        .cloned()
        .unwrap_or_else(|| PathBuf::from("data"))
}
