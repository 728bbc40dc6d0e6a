//! 目录应用 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：加载目录文件、发布快照
//! 2. **操作分发**：按配置执行排序 / 分类统计 / 筛选项 / 浏览 / 搜索
//! 3. **结果输出**：以 JSON 打印到标准输出，统计信息写日志

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::{load_catalog, CatalogAction, ScholarshipRecord};
use crate::services::{CatalogService, SearchCriteria, SharedRecord};
use crate::utils::logging::{log_action_complete, log_catalog_loaded, log_startup};

/// 应用主结构
pub struct App {
    config: Config,
    service: CatalogService,
}

impl App {
    /// 初始化应用：加载并发布目录
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let records = load_catalog(Path::new(&config.catalog_path))
            .await
            .with_context(|| format!("无法加载目录: {}", config.catalog_path))?;

        Self::with_records(config, records).await
    }

    /// 使用已经取得的记录初始化
    pub async fn with_records(config: Config, records: Vec<ScholarshipRecord>) -> Result<Self> {
        let service = CatalogService::new(&config);
        let snapshot = service.publish(records).await?;
        log_catalog_loaded(snapshot.len(), snapshot.index().levels().len());

        Ok(Self { config, service })
    }

    /// 运行配置中的操作，结果打印到标准输出
    pub async fn run(&self) -> Result<()> {
        let output = self.execute(self.config.action).await?;
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// 执行单个操作并返回 JSON 结果
    pub async fn execute(&self, action: CatalogAction) -> Result<JsonValue> {
        let started = Instant::now();
        let today = chrono::Local::now().date_naive();
        let criteria = self.config.search_criteria(today);

        let (output, count, first_title) = match action {
            CatalogAction::SortDeadline | CatalogAction::SortAmount => {
                let key = action
                    .sort_key()
                    .with_context(|| format!("操作 {} 没有对应的排序键", action))?;
                let sorted = self
                    .service
                    .sorted(key, &criteria)
                    .await
                    .with_context(|| format!("按 {} 排序失败", key))?;
                records_output(sorted)?
            }
            CatalogAction::Summary => {
                let summary = self.service.summary().await;
                let count = summary.len();
                (serde_json::to_value(summary)?, count, None)
            }
            CatalogAction::Filters => {
                let options = self.service.filter_options().await;
                let count = options.levels.len();
                (serde_json::to_value(options)?, count, None)
            }
            CatalogAction::Browse => {
                let Some(level) = self.config.filter_level.as_deref() else {
                    anyhow::bail!("browse 操作需要设置 FILTER_LEVEL");
                };
                let field = self.config.filter_field.as_deref().filter(|f| !f.is_empty());
                let found = self.service.browse(level, field).await;
                if found.is_empty() {
                    warn!("⚠️ 层次 '{}' / 专业 {:?} 下没有奖学金", level, field);
                }
                records_output(found)?
            }
            CatalogAction::Search => {
                if criteria.is_empty() {
                    info!("未设置任何搜索条件，返回全部记录");
                }
                records_output(self.service.search(&criteria).await)?
            }
            CatalogAction::GetAll => {
                let open = SearchCriteria::new().open_on(today);
                records_output(self.service.search(&open).await)?
            }
        };

        log_action_complete(action, count, started.elapsed(), first_title.as_deref());
        Ok(output)
    }
}

fn records_output(records: Vec<SharedRecord>) -> Result<(JsonValue, usize, Option<String>)> {
    let count = records.len();
    let first_title = records.first().map(|r| r.title.clone());
    Ok((serde_json::to_value(records)?, count, first_title))
}
