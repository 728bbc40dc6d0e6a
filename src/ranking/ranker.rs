//! 目录排序器
//!
//! 快速排序（Lomuto 划分），主元取当前区间的最后一个元素：
//! - 截止日期升序：严格早于主元的记录移到边界左侧
//! - 金额降序：严格高于主元的记录移到边界左侧
//!
//! 排序不稳定：键相等的记录保证相邻，但相对顺序不作承诺。
//! 已经逆序的输入是 O(n²) 的最坏情况；递归只进入较短的一侧，
//! 较长的一侧在循环中继续处理，因此栈深度不超过 O(log n)，结果与朴素递归完全一致。

use std::borrow::Borrow;

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::error::SortError;
use crate::models::{ScholarshipRecord, SortKey};

/// 按截止日期升序原地排序
///
/// 先解析全部截止日期；任何一条无法解析时直接返回错误，切片不会被改动。
pub fn sort_by_deadline<R>(records: &mut [R]) -> Result<&mut [R], SortError>
where
    R: Borrow<ScholarshipRecord>,
{
    if records.len() < 2 {
        return Ok(records);
    }

    let mut keys: Vec<NaiveDate> = records
        .iter()
        .map(|r| {
            let record: &ScholarshipRecord = r.borrow();
            record.deadline_date()
        })
        .collect::<Result<_, _>>()?;

    debug!("按截止日期排序 {} 条记录", records.len());
    quick_sort(&mut keys, records, &|a: &NaiveDate, b: &NaiveDate| a < b);

    Ok(records)
}

/// 按金额降序原地排序
pub fn sort_by_amount<R>(records: &mut [R]) -> &mut [R]
where
    R: Borrow<ScholarshipRecord>,
{
    if records.len() < 2 {
        return records;
    }

    let mut keys: Vec<f64> = records
        .iter()
        .map(|r| {
            let record: &ScholarshipRecord = r.borrow();
            record.amount
        })
        .collect();

    debug!("按金额排序 {} 条记录", records.len());
    quick_sort(&mut keys, records, &|a: &f64, b: &f64| a > b);

    records
}

/// 按指定排序键原地排序
pub fn sort_by<R>(key: SortKey, records: &mut [R]) -> Result<&mut [R], SortError>
where
    R: Borrow<ScholarshipRecord>,
{
    match key {
        SortKey::Deadline => sort_by_deadline(records),
        SortKey::Amount => Ok(sort_by_amount(records)),
    }
}

/// 复制一份后排序，原切片保持不变
pub fn sorted<R>(key: SortKey, records: &[R]) -> Result<Vec<R>, SortError>
where
    R: Borrow<ScholarshipRecord> + Clone,
{
    let mut copy = records.to_vec();
    sort_by(key, &mut copy)?;
    Ok(copy)
}

/// 排序器
///
/// 无状态；持有排序键，方便服务层按配置复用。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranker {
    key: SortKey,
}

impl Ranker {
    pub fn new(key: SortKey) -> Self {
        Self { key }
    }

    /// 原地排序并返回同一个切片
    pub fn rank<'a, R>(&self, records: &'a mut [R]) -> Result<&'a mut [R], SortError>
    where
        R: Borrow<ScholarshipRecord>,
    {
        sort_by(self.key, records)
    }
}

fn quick_sort<K, R, F>(mut keys: &mut [K], mut records: &mut [R], precedes: &F)
where
    F: Fn(&K, &K) -> bool,
{
    while keys.len() > 1 {
        let pivot = partition(keys, records, precedes);
        trace!("划分完成: 长度 {} 主元位置 {}", keys.len(), pivot);

        let (left_keys, right_keys) = std::mem::take(&mut keys).split_at_mut(pivot);
        let (left_records, right_records) = std::mem::take(&mut records).split_at_mut(pivot);
        let right_keys = &mut right_keys[1..];
        let right_records = &mut right_records[1..];

        if left_keys.len() < right_keys.len() {
            quick_sort(left_keys, left_records, precedes);
            keys = right_keys;
            records = right_records;
        } else {
            quick_sort(right_keys, right_records, precedes);
            keys = left_keys;
            records = left_records;
        }
    }
}

// Lomuto 划分，返回主元最终位置；keys 与 records 同步交换
fn partition<K, R, F>(keys: &mut [K], records: &mut [R], precedes: &F) -> usize
where
    F: Fn(&K, &K) -> bool,
{
    let high = keys.len() - 1;
    let mut boundary = 0;

    for j in 0..high {
        if precedes(&keys[j], &keys[high]) {
            keys.swap(boundary, j);
            records.swap(boundary, j);
            boundary += 1;
        }
    }

    keys.swap(boundary, high);
    records.swap(boundary, high);
    boundary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scholarship::fixtures::record;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn ids(records: &[ScholarshipRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    // ── 场景 ────────────────────────────────────────────────────────────

    #[test]
    fn test_two_record_catalog_by_amount_and_deadline() {
        let catalog = vec![
            record(1, "Bachelor", "Engineering", "Merit-based", 250000.0, "2025-12-31"),
            record(2, "Bachelor", "Business", "Merit-based", 150000.0, "2025-11-30"),
        ];

        let mut by_amount = catalog.clone();
        sort_by_amount(&mut by_amount);
        let amounts: Vec<f64> = by_amount.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![250000.0, 150000.0]);

        let mut by_deadline = catalog.clone();
        sort_by_deadline(&mut by_deadline).unwrap();
        let deadlines: Vec<&str> = by_deadline.iter().map(|r| r.deadline.as_str()).collect();
        assert_eq!(deadlines, vec!["2025-11-30", "2025-12-31"]);
    }

    #[test]
    fn test_single_and_empty_are_noops() {
        let only = record(5, "PhD", "Math", "Grant", 10.0, "2026-03-01");

        let mut one = vec![only.clone()];
        assert_eq!(sort_by_deadline(&mut one).unwrap(), &[only.clone()]);
        assert_eq!(sort_by_amount(&mut one), &[only.clone()]);

        let mut empty: Vec<ScholarshipRecord> = Vec::new();
        assert!(sort_by_deadline(&mut empty).unwrap().is_empty());
        assert!(sort_by_amount(&mut empty).is_empty());
    }

    #[test]
    fn test_single_record_with_bad_deadline_is_still_noop() {
        let mut one = vec![record(1, "PhD", "Math", "Grant", 1.0, "whenever")];
        assert!(sort_by_deadline(&mut one).is_ok());
    }

    #[test]
    fn test_malformed_deadline_fails_whole_call_without_reordering() {
        let mut catalog = vec![
            record(1, "Bachelor", "Arts", "Need-based", 1.0, "2026-01-01"),
            record(2, "Bachelor", "Arts", "Need-based", 2.0, "not-a-date"),
            record(3, "Bachelor", "Arts", "Need-based", 3.0, "2025-01-01"),
        ];

        let err = sort_by_deadline(&mut catalog).unwrap_err();
        assert_eq!(
            err,
            SortError::MalformedDeadline {
                id: 2,
                value: "not-a-date".to_string()
            }
        );
        assert_eq!(ids(&catalog), vec![1, 2, 3]);
    }

    #[test]
    fn test_amount_sort_ignores_deadline_validity() {
        let mut catalog = vec![
            record(1, "Bachelor", "Arts", "Need-based", 1.0, "not-a-date"),
            record(2, "Bachelor", "Arts", "Need-based", 2.0, "???"),
        ];
        sort_by_amount(&mut catalog);
        assert_eq!(ids(&catalog), vec![2, 1]);
    }

    #[test]
    fn test_equal_amounts_end_up_adjacent() {
        let mut catalog = vec![
            record(1, "B", "F", "T", 100.0, "2025-01-01"),
            record(2, "B", "F", "T", 300.0, "2025-01-01"),
            record(3, "B", "F", "T", 100.0, "2025-01-01"),
            record(4, "B", "F", "T", 200.0, "2025-01-01"),
        ];
        sort_by_amount(&mut catalog);

        let amounts: Vec<f64> = catalog.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![300.0, 200.0, 100.0, 100.0]);
        let mut tail = ids(&catalog[2..]);
        tail.sort_unstable();
        assert_eq!(tail, vec![1, 3]);
    }

    #[test]
    fn test_descending_input_does_not_overflow_stack() {
        let n = 20_000;
        let mut catalog: Vec<ScholarshipRecord> = (0..n)
            .map(|i| {
                let day = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
                    + chrono::Duration::days((n - i) as i64);
                record(i as i64, "B", "F", "T", i as f64, &day.format("%Y-%m-%d").to_string())
            })
            .collect();

        sort_by_deadline(&mut catalog).unwrap();
        assert_eq!(catalog.first().map(|r| r.id), Some(n as i64 - 1));
        assert_eq!(catalog.last().map(|r| r.id), Some(0));
    }

    #[test]
    fn test_sorts_shared_references() {
        let a = Arc::new(record(1, "B", "F", "T", 5.0, "2025-05-05"));
        let b = Arc::new(record(2, "B", "F", "T", 9.0, "2025-01-01"));
        let mut shared = vec![a.clone(), b.clone()];

        Ranker::new(SortKey::Deadline).rank(&mut shared).unwrap();
        assert!(Arc::ptr_eq(&shared[0], &b));
        assert!(Arc::ptr_eq(&shared[1], &a));
    }

    #[test]
    fn test_sorted_leaves_input_untouched() {
        let catalog = vec![
            record(1, "B", "F", "T", 1.0, "2025-01-01"),
            record(2, "B", "F", "T", 2.0, "2025-01-02"),
        ];
        let out = sorted(SortKey::Amount, &catalog).unwrap();
        assert_eq!(ids(&out), vec![2, 1]);
        assert_eq!(ids(&catalog), vec![1, 2]);
    }

    // ── 性质 ────────────────────────────────────────────────────────────

    fn arb_catalog() -> impl Strategy<Value = Vec<ScholarshipRecord>> {
        prop::collection::vec((0u32..40, 0u32..60), 0..64).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (day, amount))| {
                    let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
                        + chrono::Duration::days(day as i64);
                    record(
                        i as i64,
                        "B",
                        "F",
                        "T",
                        amount as f64 * 500.0,
                        &date.format("%Y-%m-%d").to_string(),
                    )
                })
                .collect()
        })
    }

    fn sorted_ids(records: &[ScholarshipRecord]) -> Vec<i64> {
        let mut v = ids(records);
        v.sort_unstable();
        v
    }

    fn ties_are_contiguous<K: PartialEq>(keys: &[K]) -> bool {
        keys.iter().enumerate().all(|(i, k)| {
            match keys[..i].iter().rposition(|prev| prev == k) {
                Some(last) => keys[last..i].iter().all(|between| between == k),
                None => true,
            }
        })
    }

    proptest! {
        #[test]
        fn deadline_output_is_non_decreasing_permutation(catalog in arb_catalog()) {
            let mut out = catalog.clone();
            sort_by_deadline(&mut out).unwrap();

            let dates: Vec<NaiveDate> = out.iter().map(|r| r.deadline_date().unwrap()).collect();
            prop_assert!(dates.windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(sorted_ids(&out), sorted_ids(&catalog));
            prop_assert!(ties_are_contiguous(&dates));
        }

        #[test]
        fn amount_output_is_non_increasing_permutation(catalog in arb_catalog()) {
            let mut out = catalog.clone();
            sort_by_amount(&mut out);

            let amounts: Vec<f64> = out.iter().map(|r| r.amount).collect();
            prop_assert!(amounts.windows(2).all(|w| w[0] >= w[1]));
            prop_assert_eq!(sorted_ids(&out), sorted_ids(&catalog));
            prop_assert!(ties_are_contiguous(&amounts));
        }

        #[test]
        fn resorting_preserves_key_order(catalog in arb_catalog()) {
            let mut once = catalog.clone();
            sort_by_deadline(&mut once).unwrap();
            let mut twice = once.clone();
            sort_by_deadline(&mut twice).unwrap();

            let first: Vec<String> = once.iter().map(|r| r.deadline.clone()).collect();
            let second: Vec<String> = twice.iter().map(|r| r.deadline.clone()).collect();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn resorting_by_amount_preserves_key_order(catalog in arb_catalog()) {
            let mut once = catalog.clone();
            sort_by_amount(&mut once);
            let mut twice = once.clone();
            sort_by_amount(&mut twice);

            let first: Vec<f64> = once.iter().map(|r| r.amount).collect();
            let second: Vec<f64> = twice.iter().map(|r| r.amount).collect();
            prop_assert_eq!(first, second);
        }
    }
}
