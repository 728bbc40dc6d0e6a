use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::ConfigError;
use crate::models::{parse_deadline, CatalogAction};
use crate::services::SearchCriteria;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 目录文件路径（.toml 或 .json）
    pub catalog_path: String,
    /// 要执行的操作
    pub action: CatalogAction,
    /// 目录记录数上限，超过时拒绝发布
    pub max_catalog_size: usize,
    /// 单次排序的超时时间（毫秒）
    pub sort_timeout_ms: u64,
    /// 只保留截止日期未过的奖学金
    pub open_only: bool,
    // --- 浏览 / 搜索条件 ---
    pub filter_level: Option<String>,
    pub filter_field: Option<String>,
    pub filter_deadline: Option<NaiveDate>,
    pub search_term: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: "data/catalog.toml".to_string(),
            action: CatalogAction::SortDeadline,
            max_catalog_size: 10_000,
            sort_timeout_ms: 2_000,
            open_only: false,
            filter_level: None,
            filter_field: None,
            filter_deadline: None,
            search_term: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量读取配置，无法解析的值回退到默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            catalog_path: std::env::var("CATALOG_PATH").unwrap_or(default.catalog_path),
            action: std::env::var("CATALOG_ACTION").ok().and_then(|v| v.parse().ok()).unwrap_or(default.action),
            max_catalog_size: std::env::var("MAX_CATALOG_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_catalog_size),
            sort_timeout_ms: std::env::var("SORT_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.sort_timeout_ms),
            open_only: std::env::var("OPEN_ONLY").ok().and_then(|v| v.parse().ok()).unwrap_or(default.open_only),
            filter_level: std::env::var("FILTER_LEVEL").ok(),
            filter_field: std::env::var("FILTER_FIELD").ok(),
            filter_deadline: std::env::var("FILTER_DEADLINE").ok().and_then(|v| parse_deadline(&v)),
            search_term: std::env::var("SEARCH_TERM").ok(),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 严格模式：变量存在但无法解析时返回错误
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::try_from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意键值来源读取配置，便于测试
    pub fn try_from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        let filter_deadline = match lookup("FILTER_DEADLINE") {
            Some(raw) => Some(parse_deadline(&raw).ok_or_else(|| ConfigError::EnvVarParseFailed {
                var_name: "FILTER_DEADLINE".to_string(),
                value: raw.clone(),
                expected_type: "date".to_string(),
            })?),
            None => None,
        };

        let action = match lookup("CATALOG_ACTION") {
            Some(raw) => raw.parse()?,
            None => default.action,
        };

        Ok(Self {
            catalog_path: lookup("CATALOG_PATH").unwrap_or(default.catalog_path),
            action,
            max_catalog_size: parse_var(&lookup, "MAX_CATALOG_SIZE", "usize")?.unwrap_or(default.max_catalog_size),
            sort_timeout_ms: parse_var(&lookup, "SORT_TIMEOUT_MS", "u64")?.unwrap_or(default.sort_timeout_ms),
            open_only: parse_var(&lookup, "OPEN_ONLY", "bool")?.unwrap_or(default.open_only),
            filter_level: lookup("FILTER_LEVEL"),
            filter_field: lookup("FILTER_FIELD"),
            filter_deadline,
            search_term: lookup("SEARCH_TERM"),
            verbose_logging: parse_var(&lookup, "VERBOSE_LOGGING", "bool")?.unwrap_or(default.verbose_logging),
        })
    }

    /// 根据配置生成搜索条件；`open_only` 时以 `today` 过滤已截止的奖学金
    pub fn search_criteria(&self, today: NaiveDate) -> SearchCriteria {
        SearchCriteria {
            level: self.filter_level.clone(),
            field: self.filter_field.clone(),
            deadline_before: self.filter_deadline,
            search_term: self.search_term.clone(),
            open_on: self.open_only.then_some(today),
        }
    }
}

fn parse_var<T, F>(lookup: &F, name: &str, expected_type: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: name.to_string(),
                value: raw.clone(),
                expected_type: expected_type.to_string(),
            }),
        None => Ok(None),
    }
}
