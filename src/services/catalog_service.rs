//! 目录服务 - 业务能力层
//!
//! 持有当前发布的目录快照（记录 + 分类索引）。
//!
//! - 发布：新快照在锁外完整构建，然后一次性替换，读者看不到构建到一半的索引
//! - 读取：读者拿到 `Arc<CatalogSnapshot>` 后不再持有锁，快照此后只读
//! - 排序：复制快照中的记录引用，在阻塞线程池上排序，并受超时约束

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppResult, CatalogError, TaskError};
use crate::index::CategoryIndex;
use crate::models::{validate_records, ScholarshipRecord, SortKey};
use crate::ranking::Ranker;
use crate::services::search::SearchCriteria;

/// 共享记录类型
pub type SharedRecord = Arc<ScholarshipRecord>;

/// 一次发布的目录快照
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    epoch: u64,
    records: Vec<SharedRecord>,
    index: CategoryIndex<SharedRecord>,
}

impl CatalogSnapshot {
    /// 从记录构建快照（记录顺序即数据源返回的顺序）
    pub fn build(epoch: u64, records: Vec<ScholarshipRecord>) -> Self {
        let records: Vec<SharedRecord> = records.into_iter().map(Arc::new).collect();
        let index = CategoryIndex::build(records.iter().cloned());
        Self {
            epoch,
            records,
            index,
        }
    }

    /// 发布序号，每次发布递增；0 表示尚未发布
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn records(&self) -> &[SharedRecord] {
        &self.records
    }

    pub fn index(&self) -> &CategoryIndex<SharedRecord> {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// 筛选项：所有层次及每个层次下的专业
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub levels: Vec<String>,
    pub fields: BTreeMap<String, Vec<String>>,
}

/// 分类树的一个叶子统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub education_level: String,
    pub field: String,
    pub scholarship_type: String,
    pub count: usize,
    pub total_amount: f64,
}

/// 目录服务
pub struct CatalogService {
    current: RwLock<Arc<CatalogSnapshot>>,
    next_epoch: AtomicU64,
    max_catalog_size: usize,
    sort_timeout: Duration,
}

impl CatalogService {
    /// 创建新的目录服务
    pub fn new(config: &Config) -> Self {
        Self::with_limits(
            config.max_catalog_size,
            Duration::from_millis(config.sort_timeout_ms),
        )
    }

    /// 使用自定义上限创建
    pub fn with_limits(max_catalog_size: usize, sort_timeout: Duration) -> Self {
        Self {
            current: RwLock::new(Arc::new(CatalogSnapshot::default())),
            next_epoch: AtomicU64::new(1),
            max_catalog_size,
            sort_timeout,
        }
    }

    /// 发布新的目录快照
    ///
    /// 超过规模上限或金额无效时拒绝发布，当前快照保持不变。
    pub async fn publish(&self, records: Vec<ScholarshipRecord>) -> AppResult<Arc<CatalogSnapshot>> {
        if records.len() > self.max_catalog_size {
            warn!(
                "⚠️ 目录规模 {} 超过上限 {}，拒绝发布",
                records.len(),
                self.max_catalog_size
            );
            return Err(CatalogError::TooLarge {
                len: records.len(),
                max: self.max_catalog_size,
            }
            .into());
        }
        validate_records(&records)?;

        let epoch = self.next_epoch.fetch_add(1, Ordering::SeqCst);
        let snapshot = Arc::new(CatalogSnapshot::build(epoch, records));

        *self.current.write().await = Arc::clone(&snapshot);
        info!(
            "✓ 已发布目录快照 #{}: {} 条记录, {} 个学历层次",
            epoch,
            snapshot.len(),
            snapshot.index().levels().len()
        );

        Ok(snapshot)
    }

    /// 当前快照
    pub async fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&*self.current.read().await)
    }

    /// 先按条件过滤快照，再对结果排序
    ///
    /// 被条件排除的记录不参与排序，其截止日期格式不影响结果。
    /// 排序在阻塞线程池上执行。超时后直接返回错误；
    /// 后台线程无法被打断，会在跑完后丢弃结果。
    pub async fn sorted(
        &self,
        key: SortKey,
        criteria: &SearchCriteria,
    ) -> AppResult<Vec<SharedRecord>> {
        let snapshot = self.snapshot().await;
        let mut records = criteria.apply(snapshot.records());
        debug!(
            "快照 #{} 过滤后 {} 条，开始按 {} 排序",
            snapshot.epoch(),
            records.len(),
            key
        );

        let ranker = Ranker::new(key);
        let task = tokio::task::spawn_blocking(move || {
            ranker.rank(records.as_mut_slice())?;
            Ok::<_, crate::error::SortError>(records)
        });

        match tokio::time::timeout(self.sort_timeout, task).await {
            Ok(joined) => Ok(joined.map_err(TaskError::from)??),
            Err(_) => {
                let timeout_ms = self.sort_timeout.as_millis() as u64;
                warn!("⚠️ 排序超过 {} 毫秒，结果已丢弃", timeout_ms);
                Err(TaskError::TimedOut { timeout_ms }.into())
            }
        }
    }

    /// 所有学历层次及其专业
    pub async fn filter_options(&self) -> FilterOptions {
        let snapshot = self.snapshot().await;
        let index = snapshot.index();

        let levels = index.levels();
        let fields = levels
            .iter()
            .map(|level| {
                let fields = index
                    .fields_for_level(level)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                (level.to_string(), fields)
            })
            .collect();

        FilterOptions {
            levels: levels.into_iter().map(str::to_string).collect(),
            fields,
        }
    }

    /// 按层次（及专业）浏览
    pub async fn browse(&self, level: &str, field: Option<&str>) -> Vec<SharedRecord> {
        self.snapshot().await.index().records_for(level, field)
    }

    /// 条件搜索，保持数据源顺序
    pub async fn search(&self, criteria: &SearchCriteria) -> Vec<SharedRecord> {
        criteria.apply(self.snapshot().await.records())
    }

    /// 分类树的叶子统计
    pub async fn summary(&self) -> Vec<CategorySummary> {
        let snapshot = self.snapshot().await;
        let index = snapshot.index();
        let mut rows = Vec::new();

        for level in index.levels() {
            let Some(level_node) = index.level(level) else {
                continue;
            };
            for (_, field_node) in level_node.fields() {
                for (_, leaf) in field_node.types() {
                    let Some(first) = leaf.records().first() else {
                        continue;
                    };
                    let (education_level, field, scholarship_type) = first.category_path();
                    rows.push(CategorySummary {
                        education_level: education_level.to_string(),
                        field: field.to_string(),
                        scholarship_type: scholarship_type.to_string(),
                        count: leaf.len(),
                        total_amount: leaf.records().iter().map(|r| r.amount).sum(),
                    });
                }
            }
        }

        rows
    }
}
