//! # Scholarship Catalog
//!
//! 奖学金目录的排序与分类索引
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 奖学金记录、截止日期解析、排序键与操作名、目录文件加载
//!
//! ### ② 算法层（Ranking / Index）
//! - `ranking` - 快速排序（截止日期升序 / 金额降序），原地、不稳定
//! - `index` - 学历层次 → 专业 → 类型 的三级分类索引，只插入不删除
//!
//! ### ③ 业务能力层（Services）
//! - `CatalogService` - 发布只读快照、带超时的后台排序、筛选项与浏览
//! - `SearchCriteria` - 内存中的条件搜索
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator::App` - 加载目录、执行配置中的操作、输出 JSON
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod index;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod ranking;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, CatalogError, ConfigError, SortError, TaskError};
pub use index::CategoryIndex;
pub use models::{CatalogAction, ScholarshipRecord, SortKey};
pub use orchestrator::App;
pub use ranking::{sort_by_amount, sort_by_deadline, Ranker};
pub use services::{CatalogService, CatalogSnapshot, SearchCriteria};
