// ==========================================
// 采购需求分析系统 - 分组累加器
// ==========================================
// 职责: 按字符串键分组累加，保持键的首次插入顺序
// 口径: 取值即零初始化（get-or-zero-initialize）；
//       图表消费时按值降序或按键比较器排序
// ==========================================

use crate::domain::types::NamedValue;
use std::cmp::Ordering;
use std::collections::HashMap;

/// 插入有序的分组累加映射
///
/// 键唯一；迭代顺序 = 键首次出现顺序
#[derive(Debug, Clone)]
pub struct GroupTally<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V: Default> GroupTally<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// 取键对应的累加槽；不存在则零初始化后返回
    pub fn slot(&mut self, key: &str) -> &mut V {
        let idx = match self.index.get(key) {
            Some(idx) => *idx,
            None => {
                let idx = self.entries.len();
                self.entries.push((key.to_string(), V::default()));
                self.index.insert(key.to_string(), idx);
                idx
            }
        };
        &mut self.entries[idx].1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按插入顺序导出
    pub fn into_vec(self) -> Vec<(String, V)> {
        self.entries
    }

    /// 按键比较器排序导出
    pub fn into_sorted_by_key(
        self,
        compare: impl Fn(&str, &str) -> Ordering,
    ) -> Vec<(String, V)> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| compare(&a.0, &b.0));
        entries
    }
}

impl<V: Default> Default for GroupTally<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupTally<f64> {
    /// 数值累加
    pub fn add(&mut self, key: &str, delta: f64) {
        *self.slot(key) += delta;
    }

    /// 导出为图表点并按值降序排列
    pub fn into_sorted_desc(self) -> Vec<NamedValue> {
        let mut points: Vec<NamedValue> = self
            .entries
            .into_iter()
            .map(|(name, value)| NamedValue { name, value })
            .collect();
        points.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
        points
    }
}
