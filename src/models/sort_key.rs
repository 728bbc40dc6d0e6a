use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 排序键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// 截止日期升序（最早的在前）
    Deadline,
    /// 金额降序（最高的在前）
    Amount,
}

impl SortKey {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            SortKey::Deadline => "deadline",
            SortKey::Amount => "amount",
        }
    }
}

impl FromStr for SortKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "deadline" | "sort_deadline" => Ok(SortKey::Deadline),
            "amount" | "sort_amount" => Ok(SortKey::Amount),
            other => Err(ConfigError::UnknownSortKey(other.to_string())),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 命令行可执行的目录操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogAction {
    /// 按截止日期排序
    SortDeadline,
    /// 按金额排序
    SortAmount,
    /// 分类树叶子统计（层次 / 专业 / 类型下的数量与总金额）
    Summary,
    /// 列出筛选项（层次及其下的专业）
    Filters,
    /// 按层次/专业浏览
    Browse,
    /// 条件搜索
    Search,
    /// 所有截止日期未过的奖学金，忽略其他条件
    GetAll,
}

impl CatalogAction {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            CatalogAction::SortDeadline => "sort_deadline",
            CatalogAction::SortAmount => "sort_amount",
            CatalogAction::Summary => "summary",
            CatalogAction::Filters => "get_filters",
            CatalogAction::Browse => "browse",
            CatalogAction::Search => "search",
            CatalogAction::GetAll => "get_all",
        }
    }

    /// 排序类操作对应的排序键
    pub fn sort_key(self) -> Option<SortKey> {
        match self {
            CatalogAction::SortDeadline => Some(SortKey::Deadline),
            CatalogAction::SortAmount => Some(SortKey::Amount),
            _ => None,
        }
    }
}

impl FromStr for CatalogAction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "sort_deadline" => Ok(CatalogAction::SortDeadline),
            "sort_amount" => Ok(CatalogAction::SortAmount),
            "summary" => Ok(CatalogAction::Summary),
            "get_filters" | "filters" => Ok(CatalogAction::Filters),
            "browse" => Ok(CatalogAction::Browse),
            "search" => Ok(CatalogAction::Search),
            "get_all" | "all" => Ok(CatalogAction::GetAll),
            other => Err(ConfigError::UnknownAction(other.to_string())),
        }
    }
}

impl std::fmt::Display for CatalogAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
