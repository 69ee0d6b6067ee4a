// ==========================================
// 采购需求分析系统 - 过滤引擎
// ==========================================
// 职责: 按用户选择的谓词（负责人/状态/供应商/周期）过滤记录集
// 口径: 各谓词逻辑与（AND）；"all" 表示不约束；
//       周期谓词对无法解析的申购日期放行（fail-open，刻意的宽松策略）
// ==========================================

use crate::domain::demand::DemandRecord;
use crate::domain::types::Period;
use crate::locale;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 不约束哨兵（前端选择器的 "all" 项）
pub const FILTER_ALL: &str = "all";

// ==========================================
// FilterSpec - 过滤条件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// 负责人（采购员），精确匹配
    pub responsible: String,
    /// 申购状态，精确匹配
    pub status: String,
    /// 供应商，精确匹配
    pub supplier: String,
    /// 分析周期
    pub period: Period,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            responsible: FILTER_ALL.to_string(),
            status: FILTER_ALL.to_string(),
            supplier: FILTER_ALL.to_string(),
            period: Period::All,
        }
    }
}

// ==========================================
// FilterOptions - 选择器可选值
// ==========================================
// 供前端下拉框填充；"all" 项由展示层自行添加
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    pub responsibles: Vec<String>,
    pub statuses: Vec<String>,
    pub suppliers: Vec<String>,
}

// ==========================================
// FilterEngine - 过滤引擎
// ==========================================
// 无状态引擎，纯函数
pub struct FilterEngine;

impl FilterEngine {
    pub fn new() -> Self {
        Self
    }

    /// 应用过滤条件，返回新的记录数组
    ///
    /// 周期截点 = today - 周期长度；申购日期解析失败的记录保留
    pub fn apply(
        &self,
        records: &[DemandRecord],
        spec: &FilterSpec,
        today: NaiveDate,
    ) -> Vec<DemandRecord> {
        let cutoff = spec.period.cutoff(today);
        records
            .iter()
            .filter(|r| Self::matches(r, spec, cutoff))
            .cloned()
            .collect()
    }

    fn matches(record: &DemandRecord, spec: &FilterSpec, cutoff: Option<NaiveDate>) -> bool {
        if spec.responsible != FILTER_ALL && record.buyer != spec.responsible {
            return false;
        }
        if spec.status != FILTER_ALL && record.request_status != spec.status {
            return false;
        }
        if spec.supplier != FILTER_ALL
            && record.supplier.as_deref().unwrap_or("") != spec.supplier
        {
            return false;
        }
        if let Some(cutoff) = cutoff {
            match locale::parse_date(&record.request_date) {
                Some(date) => {
                    if date < cutoff {
                        return false;
                    }
                }
                // fail-open: 无法解析的参考日期不排除记录
                None => {}
            }
        }
        true
    }

    /// 收集选择器可选值（非空去重，字母序）
    pub fn options(&self, records: &[DemandRecord]) -> FilterOptions {
        let mut responsibles: Vec<String> = Vec::new();
        let mut statuses: Vec<String> = Vec::new();
        let mut suppliers: Vec<String> = Vec::new();

        for record in records {
            if !record.buyer.is_empty() && !responsibles.contains(&record.buyer) {
                responsibles.push(record.buyer.clone());
            }
            if !record.request_status.is_empty() && !statuses.contains(&record.request_status) {
                statuses.push(record.request_status.clone());
            }
            if let Some(supplier) = &record.supplier {
                if !supplier.is_empty() && !suppliers.contains(supplier) {
                    suppliers.push(supplier.clone());
                }
            }
        }

        responsibles.sort();
        statuses.sort();
        suppliers.sort();

        FilterOptions {
            responsibles,
            statuses,
            suppliers,
        }
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(buyer: &str, status: &str, supplier: &str, request_date: &str) -> DemandRecord {
        DemandRecord {
            request_number: Some("SOL-1".to_string()),
            buyer: buyer.to_string(),
            request_status: status.to_string(),
            supplier: if supplier.is_empty() {
                None
            } else {
                Some(supplier.to_string())
            },
            request_date: request_date.to_string(),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn test_default_spec_keeps_everything() {
        let records = vec![
            record("Carlos", "Solicitado", "ACME", "01/01/2020"),
            record("", "", "", ""),
        ];
        let engine = FilterEngine::new();
        let filtered = engine.apply(&records, &FilterSpec::default(), today());
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_exact_match_predicates() {
        let records = vec![
            record("Carlos", "Solicitado", "ACME", "01/06/2024"),
            record("Maria", "Solicitado", "ACME", "01/06/2024"),
            record("Carlos", "Cancelada", "Sul", "01/06/2024"),
        ];
        let engine = FilterEngine::new();

        let spec = FilterSpec {
            responsible: "Carlos".to_string(),
            ..Default::default()
        };
        assert_eq!(engine.apply(&records, &spec, today()).len(), 2);

        let spec = FilterSpec {
            responsible: "Carlos".to_string(),
            status: "Solicitado".to_string(),
            supplier: "ACME".to_string(),
            period: Period::All,
        };
        assert_eq!(engine.apply(&records, &spec, today()).len(), 1);
    }

    #[test]
    fn test_period_excludes_old_records() {
        // 40 天前的记录在 30d 周期下被排除
        let records = vec![
            record("Carlos", "Solicitado", "ACME", "21/05/2024"), // 40 天前
            record("Carlos", "Solicitado", "ACME", "15/06/2024"), // 15 天前
        ];
        let engine = FilterEngine::new();
        let spec = FilterSpec {
            period: Period::Last30Days,
            ..Default::default()
        };
        let filtered = engine.apply(&records, &spec, today());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].request_date, "15/06/2024");
    }

    #[test]
    fn test_period_fail_open_on_unparseable_date() {
        // 参考日期无法解析 → 保留（fail-open）
        let records = vec![record("Carlos", "Solicitado", "ACME", "data inválida")];
        let engine = FilterEngine::new();
        let spec = FilterSpec {
            period: Period::Last30Days,
            ..Default::default()
        };
        assert_eq!(engine.apply(&records, &spec, today()).len(), 1);
    }

    #[test]
    fn test_options_sorted_unique_non_empty() {
        let records = vec![
            record("Maria", "Cotação", "Sul", ""),
            record("Carlos", "Solicitado", "ACME", ""),
            record("Carlos", "Solicitado", "", ""),
            record("", "Solicitado", "ACME", ""),
        ];
        let engine = FilterEngine::new();
        let options = engine.options(&records);

        assert_eq!(options.responsibles, vec!["Carlos", "Maria"]);
        assert_eq!(options.statuses, vec!["Cotação", "Solicitado"]);
        assert_eq!(options.suppliers, vec!["ACME", "Sul"]);
    }
}
