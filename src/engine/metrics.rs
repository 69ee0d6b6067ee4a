// ==========================================
// 采购需求分析系统 - 指标聚合引擎
// ==========================================
// 职责: 把过滤后的记录集一次性聚合为完整指标包
// 口径: (records, config, today) 的纯函数；同输入必同输出
// ==========================================

use crate::config::AnalysisConfig;
use crate::domain::demand::DemandRecord;
use crate::engine::activity::{ActivityEngine, ActivityStats};
use crate::engine::delivery::{DeliveryEngine, DeliveryStats};
use crate::engine::lead_time::{LeadTimeEngine, LeadTimeStats};
use crate::engine::spend::{SpendEngine, SpendStats};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// DashboardMetrics - 完整指标包
// ==========================================
// 展示层消费的聚合数据契约
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub lead_time: LeadTimeStats,
    pub delivery: DeliveryStats,
    pub spend: SpendStats,
    pub activity: ActivityStats,
}

// ==========================================
// MetricsEngine - 指标聚合引擎
// ==========================================
pub struct MetricsEngine {
    config: AnalysisConfig,
    lead_time: LeadTimeEngine,
    delivery: DeliveryEngine,
    spend: SpendEngine,
    activity: ActivityEngine,
}

impl MetricsEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            lead_time: LeadTimeEngine::new(),
            delivery: DeliveryEngine::new(),
            spend: SpendEngine::new(),
            activity: ActivityEngine::new(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// 聚合完整指标包
    pub fn compute(&self, records: &[DemandRecord], today: NaiveDate) -> DashboardMetrics {
        DashboardMetrics {
            lead_time: self.lead_time.analyze(records),
            delivery: self.delivery.analyze(records),
            spend: self.spend.analyze(records, self.config.pareto_top_n),
            activity: self
                .activity
                .analyze(records, today, self.config.stalled_request_days),
        }
    }
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
