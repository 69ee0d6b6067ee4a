// ==========================================
// 采购需求分析系统 - 交期引擎
// ==========================================
// 职责: 总/内部/外部交期均值 + 月度交期演化序列
// 口径: 三类交期相互独立计数；仅两端日期都可解析的记录入样
// ==========================================

use crate::domain::demand::DemandRecord;
use crate::domain::types::MonthlyLeadTimePoint;
use crate::engine::tally::GroupTally;
use crate::locale;
use serde::{Deserialize, Serialize};

// ==========================================
// LeadTimeStats - 交期统计结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadTimeStats {
    /// 总交期均值（申购 → 实际交付），天；无样本 → None
    pub average_total: Option<f64>,
    /// 内部交期均值（申购 → 下单），天
    pub average_internal: Option<f64>,
    /// 外部交期均值（下单 → 实际交付），天
    pub average_external: Option<f64>,
    /// 月度总交期演化（按申购月分组，时间顺序）
    pub monthly_evolution: Vec<MonthlyLeadTimePoint>,
}

/// 月度累加槽
#[derive(Debug, Clone, Copy, Default)]
struct MonthAcc {
    total_days: f64,
    count: u64,
}

// ==========================================
// LeadTimeEngine - 交期引擎
// ==========================================
// 无状态引擎，纯函数
pub struct LeadTimeEngine;

impl LeadTimeEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, records: &[DemandRecord]) -> LeadTimeStats {
        let mut total_days = 0.0;
        let mut total_count = 0u64;
        let mut internal_days = 0.0;
        let mut internal_count = 0u64;
        let mut external_days = 0.0;
        let mut external_count = 0u64;
        let mut by_month: GroupTally<MonthAcc> = GroupTally::new();

        for record in records {
            // 总交期: 申购 → 实际交付
            if let Some(days) =
                locale::lead_time_days(&record.request_date, &record.actual_delivery_date)
            {
                total_days += days as f64;
                total_count += 1;

                if let Some(request_date) = locale::parse_date(&record.request_date) {
                    let slot = by_month.slot(&locale::month_label(request_date));
                    slot.total_days += days as f64;
                    slot.count += 1;
                }
            }

            // 内部交期: 申购 → 下单
            if let Some(days) = locale::lead_time_days(&record.request_date, &record.order_date) {
                internal_days += days as f64;
                internal_count += 1;
            }

            // 外部交期: 下单 → 实际交付
            if let Some(days) =
                locale::lead_time_days(&record.order_date, &record.actual_delivery_date)
            {
                external_days += days as f64;
                external_count += 1;
            }
        }

        let monthly_evolution = by_month
            .into_sorted_by_key(|a, b| locale::compare_month_labels(a, b))
            .into_iter()
            .map(|(month, acc)| MonthlyLeadTimePoint {
                month,
                average_lead_time: if acc.count > 0 {
                    acc.total_days / acc.count as f64
                } else {
                    0.0
                },
            })
            .collect();

        LeadTimeStats {
            average_total: average(total_days, total_count),
            average_internal: average(internal_days, internal_count),
            average_external: average(external_days, external_count),
            monthly_evolution,
        }
    }
}

impl Default for LeadTimeEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn average(sum: f64, count: u64) -> Option<f64> {
    if count > 0 {
        Some(sum / count as f64)
    } else {
        None
    }
}
