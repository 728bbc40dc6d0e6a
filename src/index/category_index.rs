//! 三级分类索引：学历层次 → 专业 → 奖学金类型 → 记录列表
//!
//! 只支持插入，没有删除或更新；目录变化时重新构建一个新的索引。
//! 查询未知的层次或专业返回空结果，不是错误。
//! 同一层级内的键按字典序遍历，调用方不应依赖这个顺序。

use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::models::ScholarshipRecord;

/// 叶子：同一 (层次, 专业, 类型) 下的记录，按插入顺序保存
#[derive(Debug, Clone)]
pub struct TypeLeaf<R> {
    records: Vec<R>,
}

impl<R> TypeLeaf<R> {
    fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// 专业节点，子节点按奖学金类型分组
#[derive(Debug, Clone)]
pub struct FieldNode<R> {
    types: BTreeMap<String, TypeLeaf<R>>,
}

impl<R> FieldNode<R> {
    fn new() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    pub fn types(&self) -> impl Iterator<Item = (&str, &TypeLeaf<R>)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn leaf(&self, scholarship_type: &str) -> Option<&TypeLeaf<R>> {
        self.types.get(scholarship_type)
    }

    fn records(&self) -> impl Iterator<Item = &R> {
        self.types.values().flat_map(|leaf| leaf.records.iter())
    }
}

/// 学历层次节点，子节点按专业分组
#[derive(Debug, Clone)]
pub struct LevelNode<R> {
    fields: BTreeMap<String, FieldNode<R>>,
}

impl<R> LevelNode<R> {
    fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldNode<R>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn field(&self, field: &str) -> Option<&FieldNode<R>> {
        self.fields.get(field)
    }

    fn records(&self) -> impl Iterator<Item = &R> {
        self.fields.values().flat_map(|node| node.records())
    }
}

/// 分类索引
///
/// `R` 可以是记录本身、`&ScholarshipRecord` 或 `Arc<ScholarshipRecord>`；
/// 查询返回 `R` 的克隆，对引用类型来说就是指回同一份快照。
#[derive(Debug, Clone)]
pub struct CategoryIndex<R> {
    levels: BTreeMap<String, LevelNode<R>>,
    len: usize,
}

impl<R> Default for CategoryIndex<R> {
    fn default() -> Self {
        Self {
            levels: BTreeMap::new(),
            len: 0,
        }
    }
}

impl<R> CategoryIndex<R>
where
    R: Borrow<ScholarshipRecord>,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// 从一批记录构建索引
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
    {
        let mut index = Self::new();
        index.extend(records);
        index
    }

    /// 插入记录：缺失的中间节点按需创建，然后追加到叶子
    ///
    /// 不按 id 去重，同一条记录插入两次就会出现两次。
    pub fn insert(&mut self, record: R) {
        let (level, field, kind) = {
            let r: &ScholarshipRecord = record.borrow();
            (
                r.education_level.clone(),
                r.field.clone(),
                r.scholarship_type.clone(),
            )
        };
        trace!("索引插入: {} / {} / {}", level, field, kind);

        self.levels
            .entry(level)
            .or_insert_with(LevelNode::new)
            .fields
            .entry(field)
            .or_insert_with(FieldNode::new)
            .types
            .entry(kind)
            .or_insert_with(TypeLeaf::new)
            .records
            .push(record);
        self.len += 1;
    }
}

impl<R> CategoryIndex<R> {
    /// 所有学历层次
    pub fn levels(&self) -> BTreeSet<&str> {
        self.levels.keys().map(String::as_str).collect()
    }

    /// 指定层次下的所有专业；未知层次返回空集合
    pub fn fields_for_level(&self, level: &str) -> BTreeSet<&str> {
        self.levels
            .get(level)
            .map(|node| node.fields.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// 指定层次、专业下的所有奖学金类型
    pub fn types_for(&self, level: &str, field: &str) -> BTreeSet<&str> {
        self.levels
            .get(level)
            .and_then(|node| node.fields.get(field))
            .map(|node| node.types.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn level(&self, level: &str) -> Option<&LevelNode<R>> {
        self.levels.get(level)
    }

    /// 已插入的记录总数（含重复插入）
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<R: Clone> CategoryIndex<R> {
    /// 查询记录
    ///
    /// - `field` 为 `None`：返回该层次下所有专业、所有类型的记录
    /// - `field` 为 `Some`：只返回该专业下的记录
    ///
    /// 层次或专业不存在时返回空列表。
    pub fn records_for(&self, level: &str, field: Option<&str>) -> Vec<R> {
        let Some(level_node) = self.levels.get(level) else {
            return Vec::new();
        };

        match field {
            None => level_node.records().cloned().collect(),
            Some(field) => level_node
                .fields
                .get(field)
                .map(|node| node.records().cloned().collect())
                .unwrap_or_default(),
        }
    }

    /// 精确到奖学金类型的叶子记录
    pub fn records_for_type(&self, level: &str, field: &str, scholarship_type: &str) -> Vec<R> {
        self.levels
            .get(level)
            .and_then(|node| node.fields.get(field))
            .and_then(|node| node.leaf(scholarship_type))
            .map(|leaf| leaf.records.clone())
            .unwrap_or_default()
    }
}

impl<R> Extend<R> for CategoryIndex<R>
where
    R: Borrow<ScholarshipRecord>,
{
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl<R> FromIterator<R> for CategoryIndex<R>
where
    R: Borrow<ScholarshipRecord>,
{
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::build(iter)
    }
}
