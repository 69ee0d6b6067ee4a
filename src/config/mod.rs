// ==========================================
// 采购需求分析系统 - 配置层
// ==========================================
// 职责: 分析参数；无持久化存储，默认值内置
// ==========================================

use serde::{Deserialize, Serialize};

/// 分析参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// 图表 top-N 截取长度（供应商/工地/采购员排行）
    pub chart_top_n: usize,
    /// ABC/帕累托曲线截取长度
    pub pareto_top_n: usize,
    /// 申购停滞阈值（开放状态超过该天数视为停滞）
    pub stalled_request_days: i64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            chart_top_n: 10,
            pareto_top_n: 20,
            stalled_request_days: 5,
        }
    }
}
