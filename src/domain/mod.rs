// ==========================================
// 采购需求分析系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 约束: 不含导入逻辑,不含聚合逻辑
// ==========================================

pub mod demand;
pub mod types;

// 重导出核心类型
pub use demand::{DemandRecord, ImportReport};
pub use types::{
    FunnelStage, MonthlyLeadTimePoint, MonthlyVolumePoint, NamedValue, ParetoPoint, Period,
};
