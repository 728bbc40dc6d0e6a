//! 截止日期解析
//!
//! 只接受完整的日历日期；解析失败返回 `None`，由调用方决定报错还是跳过。

use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d %B %Y", "%B %d, %Y"];

/// 解析截止日期字符串
///
/// 支持 `2025-12-31`、`2025/12/31`、`31 December 2025`、`December 31, 2025`，
/// 以及数据库导出的 `2025-12-31 00:00:00`（时间部分被丢弃）。
pub fn parse_deadline(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}
