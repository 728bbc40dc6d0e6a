//! 日志初始化
//!
//! `RUST_LOG` 优先；未设置时默认 `info`，开启详细日志时为 `debug`。

use tracing_subscriber::EnvFilter;

/// 初始化全局日志订阅者，重复调用时忽略
pub fn init(verbose_logging: bool) {
    let default_level = if verbose_logging { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
