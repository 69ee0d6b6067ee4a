// ==========================================
// 采购需求分析系统 - 交付引擎
// ==========================================
// 职责: 按时交付率（OTD）/ 履约率 / 供应商维度统计
// 口径: OTD 样本 = 预计与实际交付日期都可解析的记录；
//       实际 ≤ 预计为按时，否则计入该供应商的延迟计数
// ==========================================

use crate::domain::demand::DemandRecord;
use crate::domain::types::NamedValue;
use crate::engine::tally::GroupTally;
use crate::locale;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// DeliveryStats - 交付统计结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryStats {
    /// 按时交付率（%）；无样本 → None
    pub otd_rate: Option<f64>,
    /// 延迟交付率（%）
    pub late_rate: Option<f64>,
    /// OTD 样本量
    pub considered_deliveries: u64,
    /// 数量履约率（%）: Σ已交付 / Σ申购，仅申购数量 > 0 的行
    pub quantity_fill_rate: Option<f64>,
    /// 订单履约率（%）: 状态含 "totalmente entregue" 的去重订单占比
    pub order_fill_rate: Option<f64>,
    /// 去重订单总数
    pub distinct_orders: usize,
    /// 各供应商延迟计数（降序；消费方取 top-N）
    pub delays_by_supplier: Vec<NamedValue>,
    /// 活跃供应商数（有记录的去重供应商）
    pub supplier_count: usize,
    /// 各供应商采购金额（降序，仅 > 0）
    pub value_by_supplier: Vec<NamedValue>,
    /// 各供应商去重订单数（降序，仅 > 0）
    pub orders_by_supplier: Vec<NamedValue>,
    /// 各供应商 OTD（%，降序，仅 > 0）
    pub otd_by_supplier: Vec<NamedValue>,
    /// 各供应商平均外部交期（天，降序）
    pub avg_external_lead_by_supplier: Vec<NamedValue>,
}

/// 供应商累加槽
#[derive(Debug, Clone, Default)]
struct SupplierAcc {
    total_value: f64,
    orders: HashSet<String>,
    deliveries_considered: u64,
    deliveries_on_time: u64,
    external_lead_days: f64,
    external_lead_count: u64,
}

// ==========================================
// DeliveryEngine - 交付引擎
// ==========================================
// 无状态引擎，纯函数
pub struct DeliveryEngine;

impl DeliveryEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, records: &[DemandRecord]) -> DeliveryStats {
        let mut considered = 0u64;
        let mut on_time = 0u64;
        let mut late = 0u64;
        let mut requested_total = 0.0;
        let mut delivered_total = 0.0;
        let mut delays: GroupTally<f64> = GroupTally::new();
        let mut suppliers: GroupTally<SupplierAcc> = GroupTally::new();
        let mut all_orders: HashSet<&str> = HashSet::new();
        let mut fully_delivered_orders: HashSet<&str> = HashSet::new();

        for record in records {
            let actual = locale::parse_date(&record.actual_delivery_date);
            let forecast = locale::parse_date(&record.delivery_forecast);

            // OTD 口径
            if let (Some(actual), Some(forecast)) = (actual, forecast) {
                considered += 1;
                if actual <= forecast {
                    on_time += 1;
                } else {
                    late += 1;
                    if let Some(supplier) = non_empty(&record.supplier) {
                        delays.add(supplier, 1.0);
                    }
                }
            }

            // 数量履约口径
            if record.requested_quantity > 0.0 {
                requested_total += record.requested_quantity;
                delivered_total += record.delivered_quantity;
            }

            // 订单履约口径（按去重订单号）
            if let Some(order) = non_empty(&record.order_number) {
                all_orders.insert(order);
                if record.order_status_contains("totalmente entregue") {
                    fully_delivered_orders.insert(order);
                }
            }

            // 供应商维度
            if let Some(supplier) = non_empty(&record.supplier) {
                let acc = suppliers.slot(supplier);
                acc.total_value += record.invoice_value;
                if let Some(order) = non_empty(&record.order_number) {
                    acc.orders.insert(order.to_string());
                }
                if let (Some(actual), Some(forecast)) = (actual, forecast) {
                    acc.deliveries_considered += 1;
                    if actual <= forecast {
                        acc.deliveries_on_time += 1;
                    }
                }
                if let Some(days) =
                    locale::lead_time_days(&record.order_date, &record.actual_delivery_date)
                {
                    acc.external_lead_days += days as f64;
                    acc.external_lead_count += 1;
                }
            }
        }

        let supplier_count = suppliers.len();
        let supplier_entries = suppliers.into_vec();

        let mut value_by_supplier: GroupTally<f64> = GroupTally::new();
        let mut orders_by_supplier: GroupTally<f64> = GroupTally::new();
        let mut otd_by_supplier: GroupTally<f64> = GroupTally::new();
        let mut external_by_supplier: GroupTally<f64> = GroupTally::new();
        for (name, acc) in &supplier_entries {
            value_by_supplier.add(name, acc.total_value);
            orders_by_supplier.add(name, acc.orders.len() as f64);
            if acc.deliveries_considered > 0 {
                otd_by_supplier.add(
                    name,
                    acc.deliveries_on_time as f64 / acc.deliveries_considered as f64 * 100.0,
                );
            }
            if acc.external_lead_count > 0 {
                external_by_supplier
                    .add(name, acc.external_lead_days / acc.external_lead_count as f64);
            }
        }

        let positive = |points: Vec<NamedValue>| -> Vec<NamedValue> {
            points.into_iter().filter(|p| p.value > 0.0).collect()
        };

        DeliveryStats {
            otd_rate: ratio(on_time, considered),
            late_rate: ratio(late, considered),
            considered_deliveries: considered,
            quantity_fill_rate: if requested_total > 0.0 {
                Some(delivered_total / requested_total * 100.0)
            } else {
                None
            },
            order_fill_rate: if all_orders.is_empty() {
                None
            } else {
                Some(fully_delivered_orders.len() as f64 / all_orders.len() as f64 * 100.0)
            },
            distinct_orders: all_orders.len(),
            delays_by_supplier: delays.into_sorted_desc(),
            supplier_count,
            value_by_supplier: positive(value_by_supplier.into_sorted_desc()),
            orders_by_supplier: positive(orders_by_supplier.into_sorted_desc()),
            otd_by_supplier: positive(otd_by_supplier.into_sorted_desc()),
            avg_external_lead_by_supplier: external_by_supplier.into_sorted_desc(),
        }
    }
}

impl Default for DeliveryEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    if denominator > 0 {
        Some(numerator as f64 / denominator as f64 * 100.0)
    } else {
        None
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
