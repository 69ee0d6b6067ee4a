// ==========================================
// 采购需求分析系统 - 核心库
// ==========================================
// 技术栈: Rust + CSV 导入管道 + 纯函数聚合引擎
// 系统定位: 采购 KPI 决策看板（图表/页面渲染为外部协作方）
// ==========================================

// 初始化国际化系统（客户端语言 pt-BR 为默认）
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 外部数据
pub mod importer;

// 引擎层 - 过滤与指标聚合
pub mod engine;

// 配置层 - 分析参数
pub mod config;

// 本地化工具 - pt-BR 日期/数字解析与格式化
pub mod locale;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 看板接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    FunnelStage, MonthlyLeadTimePoint, MonthlyVolumePoint, NamedValue, ParetoPoint, Period,
};

// 领域实体
pub use domain::{DemandRecord, ImportReport};

// 导入层
pub use importer::{DemandImporter, ImportError, ImportResult};

// 引擎
pub use engine::{FilterEngine, FilterOptions, FilterSpec, MetricsEngine};

// 配置
pub use config::AnalysisConfig;

// API
pub use api::{ApiError, ApiResult, DashboardApi, ExportField, TabularReport};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "采购需求分析系统";
