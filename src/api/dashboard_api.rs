// ==========================================
// 采购需求分析系统 - 看板 API
// ==========================================
// 职责: 顶层看板控制器，持有会话内记录集与当前过滤条件；
//       向展示层提供各看板的视图模型（serde 契约）
// 架构: API 层 → 过滤引擎 → 指标聚合引擎
// 约束: 状态仅存在于本对象；页面刷新/重置即丢弃，无持久化
// ==========================================

use crate::api::error::ApiResult;
use crate::config::AnalysisConfig;
use crate::domain::demand::{DemandRecord, ImportReport};
use crate::domain::types::{FunnelStage, MonthlyLeadTimePoint, MonthlyVolumePoint, NamedValue, ParetoPoint};
use crate::engine::activity::{OrderPanelStats, RequestPanelStats};
use crate::engine::filter::{FilterEngine, FilterOptions, FilterSpec};
use crate::engine::metrics::{DashboardMetrics, MetricsEngine};
use crate::importer::{DemandImporter, DemandImporterImpl};
use crate::locale;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{error, info};

// ==========================================
// 视图模型（Presentation Layer 契约）
// ==========================================
// KPI 值为已格式化字符串（1 位小数 / "N/A" 哨兵 / 货币格式）；
// 图表序列保留原始数值

/// 总览看板
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewView {
    pub average_total_lead_time: String,
    pub average_internal_lead_time: String,
    pub average_external_lead_time: String,
    pub otd_rate: String,
    pub order_fill_rate: String,
    pub spend_by_project: Vec<NamedValue>,
    pub top_delayed_suppliers: Vec<NamedValue>,
    pub lead_time_evolution: Vec<MonthlyLeadTimePoint>,
}

/// 运营绩效看板
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationalView {
    pub average_total_lead_time: String,
    pub average_internal_lead_time: String,
    pub average_external_lead_time: String,
    pub monthly_volume: Vec<MonthlyVolumePoint>,
    pub lead_time_evolution: Vec<MonthlyLeadTimePoint>,
    pub bottlenecks_by_buyer: Vec<NamedValue>,
}

/// 采购效率看板
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchasingEfficiencyView {
    pub otd_rate: String,
    pub late_rate: String,
    pub quantity_fill_rate: String,
    pub avg_delivery_by_supplier: Vec<NamedValue>,
    pub weekday_volume: Vec<NamedValue>,
}

/// 财务看板
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialView {
    pub total_invoiced: String,
    pub average_item_value: String,
    pub spend_by_project: Vec<NamedValue>,
    pub spend_by_buyer: Vec<NamedValue>,
    pub pareto_by_item: Vec<ParetoPoint>,
}

/// 供应商看板
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuppliersView {
    pub supplier_count: usize,
    pub value_by_supplier: Vec<NamedValue>,
    pub orders_by_supplier: Vec<NamedValue>,
    pub otd_by_supplier: Vec<NamedValue>,
}

/// 待办与衔接看板
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendenciesView {
    pub conversion_rate: String,
    pub pending_request_count: usize,
    pub direct_order_count: usize,
    pub funnel: Vec<FunnelStage>,
    pub pending_requests: Vec<DemandRecord>,
    pub direct_orders: Vec<DemandRecord>,
    pub request_panel: RequestPanelStats,
    pub order_panel: OrderPanelStats,
}

// ==========================================
// DashboardApi - 看板 API
// ==========================================

/// 看板 API
///
/// 职责：
/// 1. 持有上传后的记录集与当前过滤条件（显式所有权，无全局单例）
/// 2. 过滤条件变更后全量重算（同步、无增量）
/// 3. 各看板视图模型查询
pub struct DashboardApi {
    records: Vec<DemandRecord>,
    filters: FilterSpec,
    file_name: Option<String>,
    importer: DemandImporterImpl,
    filter_engine: FilterEngine,
    metrics_engine: MetricsEngine,
}

impl DashboardApi {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            records: Vec::new(),
            filters: FilterSpec::default(),
            file_name: None,
            importer: DemandImporterImpl::default(),
            filter_engine: FilterEngine::new(),
            metrics_engine: MetricsEngine::new(config),
        }
    }

    // ==========================================
    // 上传与状态管理
    // ==========================================

    /// 从 reader 加载 CSV（浏览器上传字节流）
    ///
    /// 成功: 替换会话记录集并返回批次报告
    /// 零有效行: 重置输入状态后报错（用户可重试）
    /// 结构性损坏: 保持原状态，单条通知
    pub fn load_csv_reader(
        &mut self,
        input: &mut dyn Read,
        file_name: &str,
    ) -> ApiResult<ImportReport> {
        match self.importer.import_reader(input, file_name) {
            Ok(outcome) => {
                self.records = outcome.records;
                self.file_name = Some(outcome.report.file_name.clone());
                self.filters = FilterSpec::default();
                info!(
                    file = %file_name,
                    records = self.records.len(),
                    "看板数据已加载"
                );
                Ok(outcome.report)
            }
            Err(err) => {
                error!(file = %file_name, error = %err, "看板数据加载失败");
                if matches!(err, crate::importer::ImportError::NoValidRows { .. }) {
                    self.reset();
                }
                Err(err.into())
            }
        }
    }

    /// 从文件路径加载 CSV（开发外壳与测试）
    pub fn load_csv_file(&mut self, path: &Path) -> ApiResult<ImportReport> {
        match self.importer.import_file(path) {
            Ok(outcome) => {
                self.records = outcome.records;
                self.file_name = Some(outcome.report.file_name.clone());
                self.filters = FilterSpec::default();
                Ok(outcome.report)
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "看板数据加载失败");
                if matches!(err, crate::importer::ImportError::NoValidRows { .. }) {
                    self.reset();
                }
                Err(err.into())
            }
        }
    }

    /// 清空会话状态（显式重置动作）
    pub fn reset(&mut self) {
        self.records.clear();
        self.file_name = None;
        self.filters = FilterSpec::default();
    }

    pub fn has_data(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    // ==========================================
    // 过滤条件
    // ==========================================

    pub fn set_filters(&mut self, filters: FilterSpec) {
        self.filters = filters;
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    /// 选择器可选值（基于全量记录，不受当前过滤影响）
    pub fn filter_options(&self) -> FilterOptions {
        self.filter_engine.options(&self.records)
    }

    // ==========================================
    // 指标查询
    // ==========================================

    /// 当前过滤条件下的完整指标包
    pub fn metrics(&self) -> DashboardMetrics {
        self.metrics_at(chrono::Local::now().date_naive())
    }

    /// 指定"今天"的指标包（周期过滤与账龄口径以该日为准）
    pub fn metrics_at(&self, today: NaiveDate) -> DashboardMetrics {
        let filtered = self.filter_engine.apply(&self.records, &self.filters, today);
        self.metrics_engine.compute(&filtered, today)
    }

    // ==========================================
    // 看板视图模型
    // ==========================================

    /// 总览看板
    pub fn overview(&self) -> OverviewView {
        let m = self.metrics();
        let top_n = self.metrics_engine.config().chart_top_n;
        OverviewView {
            average_total_lead_time: locale::format_ratio(m.lead_time.average_total),
            average_internal_lead_time: locale::format_ratio(m.lead_time.average_internal),
            average_external_lead_time: locale::format_ratio(m.lead_time.average_external),
            otd_rate: locale::format_ratio(m.delivery.otd_rate),
            order_fill_rate: locale::format_ratio(m.delivery.order_fill_rate),
            spend_by_project: m.spend.by_project,
            top_delayed_suppliers: take(m.delivery.delays_by_supplier, top_n),
            lead_time_evolution: m.lead_time.monthly_evolution,
        }
    }

    /// 运营绩效看板
    pub fn operational(&self) -> OperationalView {
        let m = self.metrics();
        OperationalView {
            average_total_lead_time: locale::format_ratio(m.lead_time.average_total),
            average_internal_lead_time: locale::format_ratio(m.lead_time.average_internal),
            average_external_lead_time: locale::format_ratio(m.lead_time.average_external),
            monthly_volume: m.activity.monthly_volume,
            lead_time_evolution: m.lead_time.monthly_evolution,
            bottlenecks_by_buyer: m.activity.bottlenecks_by_buyer,
        }
    }

    /// 采购效率看板
    pub fn purchasing_efficiency(&self) -> PurchasingEfficiencyView {
        let m = self.metrics();
        let top_n = self.metrics_engine.config().chart_top_n;
        PurchasingEfficiencyView {
            otd_rate: locale::format_ratio(m.delivery.otd_rate),
            late_rate: locale::format_ratio(m.delivery.late_rate),
            quantity_fill_rate: locale::format_ratio(m.delivery.quantity_fill_rate),
            avg_delivery_by_supplier: take(m.delivery.avg_external_lead_by_supplier, top_n),
            weekday_volume: m.activity.weekday_volume,
        }
    }

    /// 财务看板
    pub fn financial(&self) -> FinancialView {
        let m = self.metrics();
        let top_n = self.metrics_engine.config().chart_top_n;
        FinancialView {
            total_invoiced: locale::format_currency(m.spend.total_invoiced),
            average_item_value: locale::format_currency(m.spend.average_item_value),
            spend_by_project: take(m.spend.by_project, top_n),
            spend_by_buyer: take(m.spend.by_buyer, top_n),
            pareto_by_item: m.spend.pareto_by_item,
        }
    }

    /// 供应商看板
    pub fn suppliers(&self) -> SuppliersView {
        let m = self.metrics();
        let top_n = self.metrics_engine.config().chart_top_n;
        SuppliersView {
            supplier_count: m.delivery.supplier_count,
            value_by_supplier: take(m.delivery.value_by_supplier, top_n),
            orders_by_supplier: take(m.delivery.orders_by_supplier, top_n),
            otd_by_supplier: take(m.delivery.otd_by_supplier, top_n),
        }
    }

    /// 待办与衔接看板
    pub fn pendencies(&self) -> PendenciesView {
        let m = self.metrics();
        PendenciesView {
            // 转化率空输入渲染 "0.0"，不用 N/A 哨兵
            conversion_rate: format!("{:.1}", m.activity.conversion_rate),
            pending_request_count: m.activity.pending_requests.len(),
            direct_order_count: m.activity.direct_orders.len(),
            funnel: m.activity.funnel,
            pending_requests: m.activity.pending_requests,
            direct_orders: m.activity.direct_orders,
            request_panel: m.activity.request_panel,
            order_panel: m.activity.order_panel,
        }
    }
}

impl Default for DashboardApi {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

/// top-N 截取
fn take(points: Vec<NamedValue>, n: usize) -> Vec<NamedValue> {
    points.into_iter().take(n).collect()
}
