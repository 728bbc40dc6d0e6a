//! 日志工具模块
//!
//! 提供启动、加载和操作完成时的汇总输出

use std::time::Duration;

use tracing::info;

use crate::config::Config;
use crate::models::CatalogAction;

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 当前配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 奖学金目录启动 - 操作: {}", config.action);
    info!("📂 目录文件: {}", config.catalog_path);
    info!(
        "📊 规模上限: {} 条 | 排序超时: {} 毫秒",
        config.max_catalog_size, config.sort_timeout_ms
    );
    info!("{}", "=".repeat(60));
}

/// 记录目录加载信息
///
/// # 参数
/// - `total`: 记录总数
/// - `levels`: 学历层次数量
pub fn log_catalog_loaded(total: usize, levels: usize) {
    info!("✓ 已加载 {} 条奖学金记录，涵盖 {} 个学历层次", total, levels);
}

/// 记录操作完成信息
///
/// # 参数
/// - `action`: 执行的操作
/// - `count`: 结果条数
/// - `elapsed`: 耗时
/// - `first_title`: 第一条结果的标题（用于预览）
pub fn log_action_complete(
    action: CatalogAction,
    count: usize,
    elapsed: Duration,
    first_title: Option<&str>,
) {
    info!("{}", "─".repeat(60));
    info!("✅ {} 完成: {} 条结果, 耗时 {:?}", action, count, elapsed);
    if let Some(title) = first_title {
        info!("🔝 首条: {}", truncate_text(title, 40));
    }
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
