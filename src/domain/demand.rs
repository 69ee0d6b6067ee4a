// ==========================================
// 采购需求分析系统 - 需求领域模型
// ==========================================
// 职责: 统一需求记录（申购 + 采购订单合并行）与导入批次报告
// 口径: 日期字段保持源字符串，消费方按需解析；数值解析失败为 0
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// DemandRecord - 统一需求记录
// ==========================================
// 一条 CSV 行规范化后的结果；导入后不可变，派生视图均为新数组
// 有效性: request_number 或 order_number 至少一个非空
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DemandRecord {
    // ===== 标识 =====
    pub request_number: Option<String>,  // 申购单号（Nº da Solicitação）
    pub order_number: Option<String>,    // 采购订单号（N° do Pedido）

    // ===== 基础信息 =====
    pub item_description: String,        // 物料描述（Descrição do insumo）
    pub buyer: String,                   // 负责采购员（"Nenhum" 哨兵 → 空串）
    pub project: String,                 // 工地/成本中心（Obra）
    pub supplier: Option<String>,        // 供应商（Fornecedor）

    // ===== 状态字段（大小写不敏感子串匹配）=====
    pub request_status: String,          // 申购状态（Situação da solicitação）
    pub order_status: String,            // 订单状态（Situação do pedido）
    pub delivery_status: String,         // 交付状态（Situação da entrega）
    pub authorization: String,           // 条目授权状态（"Não" → 排除于申购侧口径）

    // ===== 日期字段（dd/MM/yyyy 源字符串，按需解析）=====
    pub request_date: String,            // 申购日期
    pub order_date: String,              // 下单日期
    pub delivery_forecast: String,       // 预计交付日期
    pub actual_delivery_date: String,    // 实际交付日期

    // ===== 数量与金额（解析失败填 0）=====
    pub requested_quantity: f64,         // 申购数量
    pub delivered_quantity: f64,         // 已交付数量
    pub pending_quantity: f64,           // 未交付余量（Saldo）
    pub invoice_value: f64,              // 发票金额（源格式 pt-BR）
}

impl DemandRecord {
    /// 是否带申购单号
    pub fn has_request(&self) -> bool {
        matches!(&self.request_number, Some(n) if !n.is_empty())
    }

    /// 是否带采购订单号
    pub fn has_order(&self) -> bool {
        matches!(&self.order_number, Some(n) if !n.is_empty())
    }

    /// 有效性判定: 申购单号或订单号至少一个非空
    pub fn is_valid(&self) -> bool {
        self.has_request() || self.has_order()
    }

    /// 条目是否已授权（authorization 不为 "não"，大小写不敏感）
    pub fn is_authorized(&self) -> bool {
        self.authorization.trim().to_lowercase() != "não"
    }

    /// 申购状态子串匹配（大小写不敏感；needle 须为小写）
    pub fn request_status_contains(&self, needle: &str) -> bool {
        self.request_status.to_lowercase().contains(needle)
    }

    /// 订单状态子串匹配（大小写不敏感；needle 须为小写）
    pub fn order_status_contains(&self, needle: &str) -> bool {
        self.order_status.to_lowercase().contains(needle)
    }

    /// 交付状态子串匹配（大小写不敏感；needle 须为小写）
    pub fn delivery_status_contains(&self, needle: &str) -> bool {
        self.delivery_status.to_lowercase().contains(needle)
    }
}

// ==========================================
// ImportReport - 导入批次报告
// ==========================================
// 用途: 记录一次上传的批次元信息（日志 + 上传结果通知契约）
// 注意: 不含逐行诊断；仅"零有效行"作为独立错误上浮
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch_id: String,      // 批次 ID（UUID，用于日志关联）
    pub file_name: String,     // 源文件名（reader 导入时为空串）
    pub total_rows: usize,     // 解析出的数据行数
    pub valid_rows: usize,     // 通过有效性判定的行数
    pub dropped_rows: usize,   // 被丢弃的行数
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_predicate() {
        let mut record = DemandRecord::default();
        assert!(!record.is_valid());

        record.request_number = Some("SOL-001".to_string());
        assert!(record.is_valid());

        record.request_number = None;
        record.order_number = Some("PED-001".to_string());
        assert!(record.is_valid());

        // 空串不算有效标识
        record.order_number = Some(String::new());
        assert!(!record.is_valid());
    }

    #[test]
    fn test_authorization() {
        let mut record = DemandRecord::default();
        assert!(record.is_authorized());

        record.authorization = "Não".to_string();
        assert!(!record.is_authorized());

        record.authorization = "não".to_string();
        assert!(!record.is_authorized());

        record.authorization = "Sim".to_string();
        assert!(record.is_authorized());
    }

    #[test]
    fn test_status_contains() {
        let record = DemandRecord {
            order_status: "Totalmente Entregue".to_string(),
            request_status: "Parcialmente atendida".to_string(),
            ..Default::default()
        };
        assert!(record.order_status_contains("totalmente entregue"));
        assert!(record.request_status_contains("atendida"));
        assert!(!record.delivery_status_contains("entregue"));
    }
}
