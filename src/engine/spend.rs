// ==========================================
// 采购需求分析系统 - 支出引擎
// ==========================================
// 职责: 发票金额汇总（按工地/按采购员）+ ABC/帕累托曲线
// 口径: 仅发票金额 > 0 的行入样；汇总结果按金额降序
// ==========================================

use crate::domain::demand::DemandRecord;
use crate::domain::types::{NamedValue, ParetoPoint};
use crate::engine::tally::GroupTally;
use serde::{Deserialize, Serialize};

// ==========================================
// SpendStats - 支出统计结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendStats {
    /// 开票总额
    pub total_invoiced: f64,
    /// 有发票金额的行数
    pub items_with_value: u64,
    /// 单行均值（无样本 → 0，不走 N/A 哨兵）
    pub average_item_value: f64,
    /// 按工地支出（降序）
    pub by_project: Vec<NamedValue>,
    /// 按采购员支出（降序）
    pub by_buyer: Vec<NamedValue>,
    /// ABC/帕累托曲线: 按物料支出降序 + 累计占比，截取 top-N
    pub pareto_by_item: Vec<ParetoPoint>,
}

// ==========================================
// SpendEngine - 支出引擎
// ==========================================
// 无状态引擎，纯函数
pub struct SpendEngine;

impl SpendEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, records: &[DemandRecord], pareto_top_n: usize) -> SpendStats {
        let mut total = 0.0;
        let mut count = 0u64;
        let mut by_project: GroupTally<f64> = GroupTally::new();
        let mut by_buyer: GroupTally<f64> = GroupTally::new();
        let mut by_item: GroupTally<f64> = GroupTally::new();

        for record in records {
            if record.invoice_value <= 0.0 {
                continue;
            }
            total += record.invoice_value;
            count += 1;

            if !record.project.is_empty() {
                by_project.add(&record.project, record.invoice_value);
            }
            if !record.buyer.is_empty() {
                by_buyer.add(&record.buyer, record.invoice_value);
            }
            if !record.item_description.is_empty() {
                by_item.add(&record.item_description, record.invoice_value);
            }
        }

        SpendStats {
            total_invoiced: total,
            items_with_value: count,
            average_item_value: if count > 0 { total / count as f64 } else { 0.0 },
            by_project: by_project.into_sorted_desc(),
            by_buyer: by_buyer.into_sorted_desc(),
            pareto_by_item: pareto_curve(by_item.into_sorted_desc(), pareto_top_n),
        }
    }
}

impl Default for SpendEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// 帕累托曲线: 降序序列 → 累计占比（占总额的百分比）→ 截断 top-N
///
/// 累计占比基于截断前的总额计算
fn pareto_curve(sorted_desc: Vec<NamedValue>, top_n: usize) -> Vec<ParetoPoint> {
    let grand_total: f64 = sorted_desc.iter().map(|p| p.value).sum();
    if grand_total <= 0.0 {
        return Vec::new();
    }

    let mut cumulative = 0.0;
    sorted_desc
        .into_iter()
        .take(top_n)
        .map(|point| {
            cumulative += point.value;
            ParetoPoint {
                name: point.name,
                value: point.value,
                cumulative_pct: cumulative / grand_total * 100.0,
            }
        })
        .collect()
}
