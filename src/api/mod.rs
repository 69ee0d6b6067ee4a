// ==========================================
// 采购需求分析系统 - API 层
// ==========================================
// 职责: 看板查询与导出接口，供展示层（外部协作方）调用
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod export_api;

// 重导出核心类型
pub use dashboard_api::{
    DashboardApi, FinancialView, OperationalView, OverviewView, PendenciesView,
    PurchasingEfficiencyView, SuppliersView,
};
pub use error::{ApiError, ApiResult};
pub use export_api::{ExportApi, ExportField, ExportOptions, TabularReport};
