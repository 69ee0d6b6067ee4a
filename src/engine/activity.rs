// ==========================================
// 采购需求分析系统 - 活动引擎
// ==========================================
// 职责: 月度/星期交易量、内部瓶颈、转化漏斗、申购与订单面板口径
// 口径: 申购侧面板仅统计已授权条目（authorization ≠ "não"）；
//       状态判定一律大小写不敏感子串匹配
// ==========================================

use crate::domain::demand::DemandRecord;
use crate::domain::types::{FunnelStage, MonthlyVolumePoint, NamedValue};
use crate::engine::tally::GroupTally;
use crate::locale;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// 面板统计结果
// ==========================================

/// 申购面板计数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestPanelStats {
    /// 已授权申购总数
    pub total_authorized: u64,
    /// 未决（既未被满足也未被拒绝）
    pub open: u64,
    /// 已满足（状态含 "totalmente atendida" 或 "parcialmente atendida"）
    pub fulfilled: u64,
    /// 已拒绝/取消
    pub rejected: u64,
    /// 已转化为订单
    pub converted: u64,
    /// 平均满足时长（申购 → 预计交付），天
    pub average_fulfilment_days: Option<f64>,
    /// 停滞申购（开放状态且账龄超过阈值）
    pub stalled: Vec<DemandRecord>,
    /// 已关联订单的申购
    pub linked: Vec<DemandRecord>,
}

/// 订单面板计数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPanelStats {
    /// 去重订单总数
    pub distinct_orders: usize,
    /// 已交付行数（delivery_status 含 "entregue"）
    pub delivered: u64,
    /// 已取消行数
    pub cancelled: u64,
    /// 逾期行数（预计交付已过且未交付未取消）
    pub overdue: u64,
    /// 逾期订单明细
    pub overdue_list: Vec<DemandRecord>,
    /// 等待交付明细（状态含 "aguardando entrega" / "em transporte"）
    pub awaiting_list: Vec<DemandRecord>,
}

// ==========================================
// ActivityStats - 活动统计结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityStats {
    /// 月度交易量（申购数 + 下单数，时间顺序）
    pub monthly_volume: Vec<MonthlyVolumePoint>,
    /// 星期交易量（固定周日→周六顺序）
    pub weekday_volume: Vec<NamedValue>,
    /// 内部瓶颈: 无订单且未取消的申购按采购员计数（降序）
    pub bottlenecks_by_buyer: Vec<NamedValue>,
    /// 转化漏斗（交付图表层前按计数降序）
    pub funnel: Vec<FunnelStage>,
    /// 转化率（已转化 / 已授权申购，%；空输入 → 0.0，不走 N/A 哨兵）
    pub conversion_rate: f64,
    /// 待采购申购（已授权且无订单）
    pub pending_requests: Vec<DemandRecord>,
    /// 直接下单（有订单无申购来源）
    pub direct_orders: Vec<DemandRecord>,
    /// 申购面板
    pub request_panel: RequestPanelStats,
    /// 订单面板
    pub order_panel: OrderPanelStats,
}

/// 月度交易量累加槽
#[derive(Debug, Clone, Copy, Default)]
struct VolumeAcc {
    requests: u64,
    orders: u64,
}

// ==========================================
// ActivityEngine - 活动引擎
// ==========================================
// 无状态引擎，纯函数；today 由调用方注入
pub struct ActivityEngine;

impl ActivityEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(
        &self,
        records: &[DemandRecord],
        today: NaiveDate,
        stalled_request_days: i64,
    ) -> ActivityStats {
        let mut by_month: GroupTally<VolumeAcc> = GroupTally::new();
        // 周日 = 0 … 周六 = 6，固定 7 槽
        let mut by_weekday = [0u64; 7];
        let mut bottlenecks: GroupTally<f64> = GroupTally::new();

        for record in records {
            if let Some(request_date) = locale::parse_date(&record.request_date) {
                let slot = by_month.slot(&locale::month_label(request_date));
                slot.requests += 1;
                if record.has_order() {
                    slot.orders += 1;
                }

                by_weekday[request_date.weekday().num_days_from_sunday() as usize] += 1;
            }

            // 内部瓶颈: 未转化为订单、未取消、有负责人的申购
            if !record.has_order()
                && !record.request_status_contains("cancelada")
                && !record.buyer.is_empty()
            {
                bottlenecks.add(&record.buyer, 1.0);
            }
        }

        let monthly_volume = by_month
            .into_sorted_by_key(|a, b| locale::compare_month_labels(a, b))
            .into_iter()
            .map(|(month, acc)| MonthlyVolumePoint {
                month,
                requests: acc.requests,
                orders: acc.orders,
            })
            .collect();

        let weekday_volume = by_weekday
            .iter()
            .enumerate()
            .map(|(day, count)| NamedValue::new(locale::WEEKDAY_NAMES[day], *count as f64))
            .collect();

        let request_panel = self.request_panel(records, today, stalled_request_days);
        let order_panel = self.order_panel(records, today);
        let (funnel, conversion_rate, pending_requests, direct_orders) =
            self.funnel(records);

        ActivityStats {
            monthly_volume,
            weekday_volume,
            bottlenecks_by_buyer: bottlenecks.into_sorted_desc(),
            funnel,
            conversion_rate,
            pending_requests,
            direct_orders,
            request_panel,
            order_panel,
        }
    }

    // ==========================================
    // 申购面板口径
    // ==========================================
    fn request_panel(
        &self,
        records: &[DemandRecord],
        today: NaiveDate,
        stalled_request_days: i64,
    ) -> RequestPanelStats {
        let mut open = 0u64;
        let mut fulfilled = 0u64;
        let mut rejected = 0u64;
        let mut converted = 0u64;
        let mut fulfilment_days = 0.0;
        let mut fulfilment_count = 0u64;
        let mut stalled = Vec::new();
        let mut linked = Vec::new();
        let mut total = 0u64;

        for record in records {
            if !record.has_request() || !record.is_authorized() {
                continue;
            }
            total += 1;

            let status = record.request_status.to_lowercase();
            if status.contains("totalmente atendida") || status.contains("parcialmente atendida") {
                fulfilled += 1;
                // 满足时长: 申购 → 预计交付（作为满足日期的代理口径）
                if let Some(days) =
                    locale::lead_time_days(&record.request_date, &record.delivery_forecast)
                {
                    fulfilment_days += days as f64;
                    fulfilment_count += 1;
                }
            } else if status.contains("rejeitada") || status.contains("cancelada") {
                rejected += 1;
            } else {
                open += 1;
            }

            if record.has_order() {
                converted += 1;
                linked.push(record.clone());
            }

            // 停滞: 开放状态且申购日超过阈值天数
            let is_open_state = status == "solicitado"
                || status == "em análise"
                || status.contains("pendente");
            if is_open_state {
                if let Some(request_date) = locale::parse_date(&record.request_date) {
                    if (today - request_date).num_days() > stalled_request_days {
                        stalled.push(record.clone());
                    }
                }
            }
        }

        RequestPanelStats {
            total_authorized: total,
            open,
            fulfilled,
            rejected,
            converted,
            average_fulfilment_days: if fulfilment_count > 0 {
                Some(fulfilment_days / fulfilment_count as f64)
            } else {
                None
            },
            stalled,
            linked,
        }
    }

    // ==========================================
    // 订单面板口径
    // ==========================================
    fn order_panel(&self, records: &[DemandRecord], today: NaiveDate) -> OrderPanelStats {
        let mut distinct: HashSet<&str> = HashSet::new();
        let mut delivered = 0u64;
        let mut cancelled = 0u64;
        let mut overdue = 0u64;
        let mut overdue_list = Vec::new();
        let mut awaiting_list = Vec::new();

        for record in records {
            if !record.has_order() {
                continue;
            }
            if let Some(order) = record.order_number.as_deref() {
                distinct.insert(order);
            }

            let is_delivered = record.delivery_status_contains("entregue");
            let is_cancelled = record.delivery_status_contains("cancelado");
            if is_delivered {
                delivered += 1;
            } else if is_cancelled {
                cancelled += 1;
            }

            // 逾期: 预计交付已过（严格早于今天）且既未交付也未取消
            if locale::is_before_day(&record.delivery_forecast, today)
                && !is_delivered
                && !is_cancelled
            {
                overdue += 1;
                overdue_list.push(record.clone());
            }

            if record.delivery_status_contains("aguardando entrega")
                || record.delivery_status_contains("em transporte")
            {
                awaiting_list.push(record.clone());
            }
        }

        OrderPanelStats {
            distinct_orders: distinct.len(),
            delivered,
            cancelled,
            overdue,
            overdue_list,
            awaiting_list,
        }
    }

    // ==========================================
    // 转化漏斗口径
    // ==========================================
    fn funnel(
        &self,
        records: &[DemandRecord],
    ) -> (Vec<FunnelStage>, f64, Vec<DemandRecord>, Vec<DemandRecord>) {
        let authorized: Vec<&DemandRecord> = records
            .iter()
            .filter(|r| r.has_request() && r.is_authorized())
            .collect();

        let total = authorized.len() as u64;
        let approved = authorized
            .iter()
            .filter(|r| {
                r.request_status_contains("aprovada") || r.request_status_contains("atendida")
            })
            .count() as u64;
        let converted = authorized.iter().filter(|r| r.has_order()).count() as u64;
        let delivered = records
            .iter()
            .filter(|r| r.has_order() && r.delivery_status_contains("entregue"))
            .count() as u64;

        let mut funnel = vec![
            FunnelStage {
                name: "1. Solicitado".to_string(),
                value: total,
            },
            FunnelStage {
                name: "2. Aprovado".to_string(),
                value: approved,
            },
            FunnelStage {
                name: "3. Pedido Emitido".to_string(),
                value: converted,
            },
            FunnelStage {
                name: "4. Entregue".to_string(),
                value: delivered,
            },
        ];
        // 图表层期望按计数降序（阶段逻辑顺序保留在标签前缀中）
        funnel.sort_by(|a, b| b.value.cmp(&a.value));

        let conversion_rate = if total > 0 {
            converted as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        let pending_requests: Vec<DemandRecord> = authorized
            .iter()
            .filter(|r| !r.has_order())
            .map(|r| (*r).clone())
            .collect();
        let direct_orders: Vec<DemandRecord> = records
            .iter()
            .filter(|r| r.has_order() && !r.has_request())
            .cloned()
            .collect();

        (funnel, conversion_rate, pending_requests, direct_orders)
    }
}

impl Default for ActivityEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn request(number: &str, status: &str, date: &str) -> DemandRecord {
        DemandRecord {
            request_number: Some(number.to_string()),
            request_status: status.to_string(),
            request_date: date.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_funnel_sorted_descending() {
        let mut r1 = request("SOL-1", "Totalmente atendida", "01/06/2024");
        r1.order_number = Some("PED-1".to_string());
        r1.delivery_status = "Entregue".to_string();
        let r2 = request("SOL-2", "Solicitado", "02/06/2024");
        let r3 = request("SOL-3", "Aprovada", "03/06/2024");

        let stats = ActivityEngine::new().analyze(&[r1, r2, r3], today(), 5);

        // 计数: Solicitado=3, Aprovado=2, Pedido Emitido=1, Entregue=1
        // 展示顺序按计数降序，不是阶段逻辑顺序
        assert_eq!(stats.funnel[0].name, "1. Solicitado");
        assert_eq!(stats.funnel[0].value, 3);
        assert_eq!(stats.funnel[1].name, "2. Aprovado");
        assert_eq!(stats.funnel[1].value, 2);
        let values: Vec<u64> = stats.funnel.iter().map(|s| s.value).collect();
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(values, sorted);
    }

    #[test]
    fn test_unauthorized_requests_excluded_from_funnel() {
        let mut r1 = request("SOL-1", "Solicitado", "01/06/2024");
        r1.authorization = "Não".to_string();
        let r2 = request("SOL-2", "Solicitado", "02/06/2024");

        let stats = ActivityEngine::new().analyze(&[r1, r2], today(), 5);
        let total = stats
            .funnel
            .iter()
            .find(|s| s.name == "1. Solicitado")
            .unwrap();
        assert_eq!(total.value, 1);
        assert_eq!(stats.request_panel.total_authorized, 1);
    }

    #[test]
    fn test_conversion_rate_zero_on_empty() {
        let stats = ActivityEngine::new().analyze(&[], today(), 5);
        assert_eq!(stats.conversion_rate, 0.0);
    }

    #[test]
    fn test_stalled_requests() {
        // 开放状态且 40 天账龄 → 停滞；已满足的不算
        let r1 = request("SOL-1", "Solicitado", "21/05/2024");
        let r2 = request("SOL-2", "Solicitado", "28/06/2024");
        let r3 = request("SOL-3", "Totalmente atendida", "01/01/2024");

        let stats = ActivityEngine::new().analyze(&[r1, r2, r3], today(), 5);
        assert_eq!(stats.request_panel.stalled.len(), 1);
        assert_eq!(
            stats.request_panel.stalled[0].request_number,
            Some("SOL-1".to_string())
        );
    }

    #[test]
    fn test_order_panel_overdue() {
        let mut r1 = DemandRecord::default();
        r1.order_number = Some("PED-1".to_string());
        r1.delivery_forecast = "01/06/2024".to_string(); // 已过期
        r1.delivery_status = "Aguardando entrega".to_string();
        let mut r2 = DemandRecord::default();
        r2.order_number = Some("PED-2".to_string());
        r2.delivery_forecast = "01/06/2024".to_string();
        r2.delivery_status = "Entregue".to_string(); // 已交付不算逾期

        let stats = ActivityEngine::new().analyze(&[r1, r2], today(), 5);
        assert_eq!(stats.order_panel.overdue, 1);
        assert_eq!(stats.order_panel.delivered, 1);
        assert_eq!(stats.order_panel.awaiting_list.len(), 1);
        assert_eq!(stats.order_panel.distinct_orders, 2);
    }

    #[test]
    fn test_monthly_and_weekday_volume() {
        let mut r1 = request("SOL-1", "Solicitado", "03/06/2024"); // 六月，周一
        r1.order_number = Some("PED-1".to_string());
        let r2 = request("SOL-2", "Solicitado", "09/06/2024"); // 六月，周日
        let r3 = request("SOL-3", "Solicitado", "01/05/2024"); // 五月

        let stats = ActivityEngine::new().analyze(&[r1, r2, r3], today(), 5);

        assert_eq!(stats.monthly_volume.len(), 2);
        assert_eq!(stats.monthly_volume[0].month, "mai/24");
        assert_eq!(stats.monthly_volume[1].month, "jun/24");
        assert_eq!(stats.monthly_volume[1].requests, 2);
        assert_eq!(stats.monthly_volume[1].orders, 1);

        // 星期序列固定周日→周六
        assert_eq!(stats.weekday_volume.len(), 7);
        assert_eq!(stats.weekday_volume[0].name, "Domingo");
        assert_eq!(stats.weekday_volume[0].value, 1.0); // 09/06 周日
        assert_eq!(stats.weekday_volume[1].name, "Segunda");
        assert_eq!(stats.weekday_volume[1].value, 1.0); // 03/06 周一
    }

    #[test]
    fn test_bottlenecks_by_buyer() {
        let mut r1 = request("SOL-1", "Solicitado", "01/06/2024");
        r1.buyer = "Carlos".to_string();
        let mut r2 = request("SOL-2", "Cancelada", "01/06/2024");
        r2.buyer = "Carlos".to_string(); // 已取消不算瓶颈
        let mut r3 = request("SOL-3", "Cotação", "01/06/2024");
        r3.buyer = "Carlos".to_string();

        let stats = ActivityEngine::new().analyze(&[r1, r2, r3], today(), 5);
        assert_eq!(stats.bottlenecks_by_buyer.len(), 1);
        assert_eq!(stats.bottlenecks_by_buyer[0].value, 2.0);
    }

    #[test]
    fn test_direct_orders_and_pending_requests() {
        let mut direct = DemandRecord::default();
        direct.order_number = Some("PED-9".to_string());
        let pending = request("SOL-1", "Solicitado", "01/06/2024");

        let stats = ActivityEngine::new().analyze(&[direct, pending], today(), 5);
        assert_eq!(stats.direct_orders.len(), 1);
        assert_eq!(stats.pending_requests.len(), 1);
    }
}
