use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SortError;
use crate::models::deadline::parse_deadline;

/// 奖学金记录
///
/// 排序和分类索引只读取 `deadline`、`amount` 以及三个分类字段，
/// 其余字段（标题、提供方、申请条件、链接）原样透传。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScholarshipRecord {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub provider: String,
    pub education_level: String,
    pub field: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    /// 原始截止日期字符串，排序时才解析
    pub deadline: String,
    #[serde(default)]
    pub eligibility: String,
    #[serde(default)]
    pub application_link: String,
    pub scholarship_type: String,
}

impl ScholarshipRecord {
    /// 解析截止日期
    pub fn deadline_date(&self) -> Result<NaiveDate, SortError> {
        parse_deadline(&self.deadline).ok_or_else(|| SortError::MalformedDeadline {
            id: self.id,
            value: self.deadline.clone(),
        })
    }

    /// 分类路径 (level, field, type)
    pub fn category_path(&self) -> (&str, &str, &str) {
        (&self.education_level, &self.field, &self.scholarship_type)
    }

    /// 关键词匹配（不区分大小写），检索标题、提供方、申请条件和专业
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        [&self.title, &self.provider, &self.eligibility, &self.field]
            .iter()
            .any(|text| text.to_lowercase().contains(&term))
    }
}

impl std::fmt::Display for ScholarshipRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} [{} / {} / {}] {:.2} 截止 {}",
            self.id,
            self.title,
            self.education_level,
            self.field,
            self.scholarship_type,
            self.amount,
            self.deadline
        )
    }
}

// 金额可能是数字，也可能是数据库导出的 DECIMAL 字符串（如 "250000.00"）
fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = f64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number or numeric string representing an amount")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid amount: '{}'", value)))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value as f64)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value as f64)
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}
