use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::CatalogError;
use crate::models::scholarship::ScholarshipRecord;

/// 目录文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    Json,
}

impl CatalogFormat {
    /// 根据扩展名判断格式
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Some(CatalogFormat::Toml),
            Some("json") => Some(CatalogFormat::Json),
            _ => None,
        }
    }
}

/// 目录文件结构：`[[scholarships]]` 表数组，或 JSON 中的 `{"scholarships": [...]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub scholarships: Vec<ScholarshipRecord>,
}

// JSON 目录也可以直接是记录数组
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    Wrapped(CatalogFile),
    Bare(Vec<ScholarshipRecord>),
}

/// 从 TOML / JSON 文件加载目录快照
pub async fn load_catalog(path: &Path) -> Result<Vec<ScholarshipRecord>, CatalogError> {
    let origin = path.display().to_string();

    let format = CatalogFormat::from_path(path).ok_or_else(|| CatalogError::UnsupportedFormat {
        path: origin.clone(),
    })?;

    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            return Err(CatalogError::NotFound { path: origin });
        }
        Err(source) => {
            return Err(CatalogError::ReadFailed {
                path: origin,
                source,
            });
        }
    };

    let records = parse_catalog(&content, format, &origin)?;
    tracing::info!("成功加载 {} 条奖学金记录: {}", records.len(), origin);

    Ok(records)
}

/// 解析目录内容并校验金额
pub fn parse_catalog(
    content: &str,
    format: CatalogFormat,
    origin: &str,
) -> Result<Vec<ScholarshipRecord>, CatalogError> {
    let records = match format {
        CatalogFormat::Toml => {
            toml::from_str::<CatalogFile>(content)
                .map_err(|source| CatalogError::TomlParseFailed {
                    path: origin.to_string(),
                    source,
                })?
                .scholarships
        }
        CatalogFormat::Json => match serde_json::from_str::<JsonCatalog>(content).map_err(
            |source| CatalogError::JsonParseFailed {
                path: origin.to_string(),
                source,
            },
        )? {
            JsonCatalog::Wrapped(file) => file.scholarships,
            JsonCatalog::Bare(records) => records,
        },
    };

    validate_records(&records)?;
    Ok(records)
}

/// 金额必须是非负的有限数
pub fn validate_records(records: &[ScholarshipRecord]) -> Result<(), CatalogError> {
    match records
        .iter()
        .find(|r| !r.amount.is_finite() || r.amount < 0.0)
    {
        Some(bad) => Err(CatalogError::InvalidAmount {
            id: bad.id,
            amount: bad.amount,
        }),
        None => Ok(()),
    }
}
