// ==========================================
// 采购需求分析系统 - 领域类型定义
// ==========================================
// 职责: 过滤周期枚举 + 图表数据契约值对象
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 分析周期 (Period)
// ==========================================
// 序列化格式: 前端选择器的值 ("all" / "30d" / "90d" / "1y")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Period {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "90d")]
    Last90Days,
    #[serde(rename = "1y")]
    LastYear,
}

impl Period {
    /// 计算周期起点（今天减去周期长度）；"全部" → None
    pub fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::All => None,
            Period::Last30Days => Some(today - chrono::Duration::days(30)),
            Period::Last90Days => Some(today - chrono::Duration::days(90)),
            Period::LastYear => Some(today - chrono::Months::new(12)),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::All => write!(f, "all"),
            Period::Last30Days => write!(f, "30d"),
            Period::Last90Days => write!(f, "90d"),
            Period::LastYear => write!(f, "1y"),
        }
    }
}

// ==========================================
// 图表数据契约 (Presentation Layer 消费)
// ==========================================

/// 名称-数值点（条形图 / 饼图）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub value: f64,
}

impl NamedValue {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// 月度交期演化点（折线图）
///
/// month 为 "MMM/yy" 标签；时间顺序由 locale::compare_month_labels 保证
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyLeadTimePoint {
    pub month: String,
    /// 月均总交期（天）
    pub average_lead_time: f64,
}

/// 月度交易量点（成对柱状图: 申购 vs 下单）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyVolumePoint {
    pub month: String,
    pub requests: u64,
    pub orders: u64,
}

/// 漏斗阶段计数
///
/// 交付给图表层前按 value 降序排列，图表层按该约定渲染
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub name: String,
    pub value: u64,
}

/// ABC/帕累托曲线点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoPoint {
    pub name: String,
    pub value: f64,
    /// 累计占比（占总额的百分比，0..=100）
    pub cumulative_pct: f64,
}
