//! 条件搜索 - 业务能力层
//!
//! 在内存快照上做过滤，对应目录的 `search` 操作。

use std::borrow::Borrow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{parse_deadline, ScholarshipRecord};

/// 搜索条件
///
/// 空字符串和 `None` 都表示不限制。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// 学历层次（精确匹配，区分大小写）
    #[serde(default)]
    pub level: Option<String>,
    /// 专业（精确匹配，区分大小写）
    #[serde(default)]
    pub field: Option<String>,
    /// 截止日期不晚于该日期
    #[serde(default)]
    pub deadline_before: Option<NaiveDate>,
    /// 关键词（不区分大小写）
    #[serde(default)]
    pub search_term: Option<String>,
    /// 截止日期不早于该日期，用于过滤已过期的奖学金
    #[serde(default)]
    pub open_on: Option<NaiveDate>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn deadline_before(mut self, date: NaiveDate) -> Self {
        self.deadline_before = Some(date);
        self
    }

    pub fn search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn open_on(mut self, date: NaiveDate) -> Self {
        self.open_on = Some(date);
        self
    }

    /// 是否没有任何限制
    pub fn is_empty(&self) -> bool {
        non_empty(&self.level).is_none()
            && non_empty(&self.field).is_none()
            && non_empty(&self.search_term).is_none()
            && self.deadline_before.is_none()
            && self.open_on.is_none()
    }

    /// 判断单条记录是否满足条件
    ///
    /// 截止日期无法解析的记录不满足任何日期条件；搜索本身不会报错。
    pub fn matches(&self, record: &ScholarshipRecord) -> bool {
        if let Some(level) = non_empty(&self.level) {
            if record.education_level != level {
                return false;
            }
        }

        if let Some(field) = non_empty(&self.field) {
            if record.field != field {
                return false;
            }
        }

        if self.deadline_before.is_some() || self.open_on.is_some() {
            let Some(deadline) = parse_deadline(&record.deadline) else {
                return false;
            };
            if self.deadline_before.is_some_and(|limit| deadline > limit) {
                return false;
            }
            if self.open_on.is_some_and(|today| deadline < today) {
                return false;
            }
        }

        match non_empty(&self.search_term) {
            Some(term) => record.matches_term(term),
            None => true,
        }
    }

    /// 过滤快照，保持原有顺序
    pub fn apply<R>(&self, records: &[R]) -> Vec<R>
    where
        R: Borrow<ScholarshipRecord> + Clone,
    {
        records
            .iter()
            .filter(|r| {
                let record: &ScholarshipRecord = (*r).borrow();
                self.matches(record)
            })
            .cloned()
            .collect()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scholarship::fixtures::record;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn catalog() -> Vec<ScholarshipRecord> {
        let mut eng = record(1, "Bachelor", "Engineering", "Merit-based", 250000.0, "2025-12-31");
        eng.eligibility = "GPA 3.5+, Engineering major".to_string();
        let mut art = record(2, "Bachelor", "Arts", "Need-based", 125000.0, "2025-11-20");
        art.eligibility = "Portfolio required".to_string();
        vec![
            eng,
            art,
            record(3, "Master", "Engineering", "Merit-based", 400000.0, "2026-02-28"),
            record(4, "Master", "Science", "Merit-based", 375000.0, "TBD"),
        ]
    }

    fn ids(records: &[ScholarshipRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_empty_criteria_keeps_everything() {
        let criteria = SearchCriteria::new().level("");
        assert!(criteria.is_empty());
        assert_eq!(ids(&criteria.apply(&catalog())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_level_and_field_filters() {
        let criteria = SearchCriteria::new().level("Master").field("Engineering");
        assert_eq!(ids(&criteria.apply(&catalog())), vec![3]);
    }

    #[test]
    fn test_deadline_window_excludes_unparseable() {
        let criteria = SearchCriteria::new()
            .open_on(ymd(2025, 12, 1))
            .deadline_before(ymd(2026, 12, 31));
        assert_eq!(ids(&criteria.apply(&catalog())), vec![1, 3]);
    }

    #[test]
    fn test_search_term_matches_eligibility_text() {
        let criteria = SearchCriteria::new().search_term("portfolio");
        assert_eq!(ids(&criteria.apply(&catalog())), vec![2]);
    }
}
