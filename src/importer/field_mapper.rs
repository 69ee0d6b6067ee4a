// ==========================================
// 采购需求分析系统 - 字段映射器实现
// ==========================================
// 职责: 源表头（pt-BR 标签）→ 统一字段映射 + 类型转换
// 口径: 表头大小写敏感精确匹配；别名表之外的表头静默忽略
// ==========================================

use crate::domain::demand::DemandRecord;
use crate::importer::demand_importer_trait::{FieldMapper as FieldMapperTrait, RawRow};
use crate::locale;

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_row(&self, row: &RawRow) -> DemandRecord {
        DemandRecord {
            // 标识
            request_number: self.get_string(row, "Nº da Solicitação"),
            order_number: self.get_string(row, "N° do Pedido"),

            // 基础信息
            item_description: self.get_text(row, "Descrição do insumo"),
            buyer: self.get_buyer(row),
            project: self.get_text(row, "Obra"),
            supplier: self.get_string(row, "Fornecedor"),

            // 状态
            request_status: self.get_text(row, "Situação da solicitação"),
            order_status: self.get_text(row, "Situação do pedido"),
            delivery_status: self.get_text(row, "Situação da entrega"),
            authorization: self.get_text(row, "Situação autorização do item"),

            // 日期（保持源字符串）
            request_date: self.get_text(row, "Data da solicitação"),
            order_date: self.get_text(row, "Data do pedido"),
            delivery_forecast: self.get_text(row, "Previsão de entrega"),
            actual_delivery_date: self.get_text(row, "Data de entrega"),

            // 数量与金额
            requested_quantity: self.get_number(row, "Quantidade solicitada"),
            delivered_quantity: self.get_number(row, "Quantidade entregue"),
            pending_quantity: self.get_number(row, "Saldo"),
            invoice_value: self.get_number(row, "Valor da nota"),
        }
    }
}

impl FieldMapper {
    /// 提取字符串字段（返回 Option），支持报表变体的列名别名
    fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        // 列名别名映射（不同导出变体的度标/序标符号与旧列名）
        let aliases: Vec<&str> = match key {
            "Nº da Solicitação" => vec!["Nº da Solicitação", "N° da Solicitação"],
            "N° do Pedido" => vec!["N° do Pedido", "Nº do Pedido"],
            "Data de entrega" => vec!["Data de entrega", "Data da entrega"],
            "Saldo" => vec!["Saldo", "Quant. pendente"],
            "Valor da nota" => vec!["Valor da nota", "Valor líquido entrega"],
            "Comprador distribuído" => vec!["Comprador distribuído", "Comprador"],
            _ => vec![key],
        };

        for alias in aliases {
            if let Some(v) = row.get(alias) {
                if !v.is_empty() {
                    return Some(v.clone());
                }
            }
        }
        None
    }

    /// 提取文本字段（缺失 → 空串）
    fn get_text(&self, row: &RawRow, key: &str) -> String {
        self.get_string(row, key).unwrap_or_default()
    }

    /// 提取数值字段（pt-BR 格式；缺失或解析失败 → 0）
    fn get_number(&self, row: &RawRow, key: &str) -> f64 {
        match self.get_string(row, key) {
            Some(value) => locale::parse_locale_number(&value),
            None => 0.0,
        }
    }

    /// 提取采购员（源系统用 "Nenhum" 表示未分配 → 归一为空串）
    fn get_buyer(&self, row: &RawRow) -> String {
        let buyer = self.get_text(row, "Comprador distribuído");
        if buyer == "Nenhum" {
            String::new()
        } else {
            buyer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        let mut row = HashMap::new();
        for (k, v) in pairs {
            row.insert(k.to_string(), v.to_string());
        }
        row
    }

    #[test]
    fn test_map_row_basic() {
        let mapper = FieldMapper;
        let record = mapper.map_row(&row(&[
            ("Nº da Solicitação", "SOL-001"),
            ("Obra", "Obra Alfa"),
            ("Comprador distribuído", "Carlos"),
            ("Valor da nota", "1.500,00"),
            ("Quantidade solicitada", "10"),
        ]));

        assert_eq!(record.request_number, Some("SOL-001".to_string()));
        assert_eq!(record.project, "Obra Alfa");
        assert_eq!(record.buyer, "Carlos");
        assert_eq!(record.invoice_value, 1500.0);
        assert_eq!(record.requested_quantity, 10.0);
    }

    #[test]
    fn test_map_row_order_number_alias() {
        let mapper = FieldMapper;
        // 两种度标符号变体都要识别
        let record = mapper.map_row(&row(&[("N° do Pedido", "PED-10")]));
        assert_eq!(record.order_number, Some("PED-10".to_string()));

        let record = mapper.map_row(&row(&[("Nº do Pedido", "PED-11")]));
        assert_eq!(record.order_number, Some("PED-11".to_string()));
    }

    #[test]
    fn test_map_row_unknown_headers_ignored() {
        let mapper = FieldMapper;
        let record = mapper.map_row(&row(&[
            ("Nº da Solicitação", "SOL-001"),
            ("Coluna Misteriosa", "qualquer coisa"),
        ]));
        assert_eq!(record.request_number, Some("SOL-001".to_string()));
        assert_eq!(record.item_description, "");
    }

    #[test]
    fn test_map_row_nenhum_buyer_is_empty() {
        let mapper = FieldMapper;
        let record = mapper.map_row(&row(&[("Comprador distribuído", "Nenhum")]));
        assert_eq!(record.buyer, "");
    }

    #[test]
    fn test_map_row_bad_number_is_zero() {
        let mapper = FieldMapper;
        let record = mapper.map_row(&row(&[("Valor da nota", "sem valor")]));
        assert_eq!(record.invoice_value, 0.0);
    }

    #[test]
    fn test_map_row_dates_stay_strings() {
        let mapper = FieldMapper;
        let record = mapper.map_row(&row(&[
            ("Data da solicitação", "01/02/2024"),
            ("Previsão de entrega", "data inválida"),
        ]));
        // 日期不在映射阶段解析，消费方按需解析
        assert_eq!(record.request_date, "01/02/2024");
        assert_eq!(record.delivery_forecast, "data inválida");
    }
}
