// ==========================================
// 采购需求分析系统 - 引擎层
// ==========================================
// 职责: 过滤与指标聚合的业务规则
// 约束: 引擎无状态、纯函数；today 由调用方注入
// ==========================================

pub mod activity;
pub mod delivery;
pub mod filter;
pub mod lead_time;
pub mod metrics;
pub mod spend;
pub mod tally;

// 重导出核心引擎
pub use activity::{ActivityEngine, ActivityStats, OrderPanelStats, RequestPanelStats};
pub use delivery::{DeliveryEngine, DeliveryStats};
pub use filter::{FilterEngine, FilterOptions, FilterSpec, FILTER_ALL};
pub use lead_time::{LeadTimeEngine, LeadTimeStats};
pub use metrics::{DashboardMetrics, MetricsEngine};
pub use spend::{SpendEngine, SpendStats};
pub use tally::GroupTally;
