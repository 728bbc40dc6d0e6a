//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! catalog_app (加载目录、分发操作、输出结果)
//!     ↓
//! services (目录快照发布 / 排序任务 / 搜索)
//!     ↓
//! ranking + index (纯内存算法)
//!     ↓
//! models (记录、截止日期、目录文件)
//! ```
//!
//! 只有编排层打印到标准输出；下层只返回数据和错误。

pub mod catalog_app;

pub use catalog_app::App;
