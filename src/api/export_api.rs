// ==========================================
// 采购需求分析系统 - 导出 API
// ==========================================
// 职责: 记录集按字段子集导出
// 契约: CSV 自产（分号分隔 + pt-BR 数字）；
//       PDF 渲染为外部协作方，本层只产出表格报告数据
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::demand::DemandRecord;
use crate::locale;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::info;

// ==========================================
// ExportField - 可导出字段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportField {
    RequestNumber,
    OrderNumber,
    ItemDescription,
    RequestStatus,
    OrderStatus,
    DeliveryStatus,
    RequestDate,
    OrderDate,
    DeliveryForecast,
    ActualDeliveryDate,
    Buyer,
    Project,
    Supplier,
    RequestedQuantity,
    DeliveredQuantity,
    PendingQuantity,
    InvoiceValue,
}

impl ExportField {
    fn is_numeric(&self) -> bool {
        matches!(
            self,
            ExportField::RequestedQuantity
                | ExportField::DeliveredQuantity
                | ExportField::PendingQuantity
                | ExportField::InvoiceValue
        )
    }

    fn raw(&self, record: &DemandRecord) -> String {
        match self {
            ExportField::RequestNumber => record.request_number.clone().unwrap_or_default(),
            ExportField::OrderNumber => record.order_number.clone().unwrap_or_default(),
            ExportField::ItemDescription => record.item_description.clone(),
            ExportField::RequestStatus => record.request_status.clone(),
            ExportField::OrderStatus => record.order_status.clone(),
            ExportField::DeliveryStatus => record.delivery_status.clone(),
            ExportField::RequestDate => record.request_date.clone(),
            ExportField::OrderDate => record.order_date.clone(),
            ExportField::DeliveryForecast => record.delivery_forecast.clone(),
            ExportField::ActualDeliveryDate => record.actual_delivery_date.clone(),
            ExportField::Buyer => record.buyer.clone(),
            ExportField::Project => record.project.clone(),
            ExportField::Supplier => record.supplier.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn numeric(&self, record: &DemandRecord) -> f64 {
        match self {
            ExportField::RequestedQuantity => record.requested_quantity,
            ExportField::DeliveredQuantity => record.delivered_quantity,
            ExportField::PendingQuantity => record.pending_quantity,
            ExportField::InvoiceValue => record.invoice_value,
            _ => 0.0,
        }
    }

    /// CSV 单元格渲染（数值: pt-BR 千分位 + 固定 2 位小数）
    fn render_csv(&self, record: &DemandRecord) -> String {
        if self.is_numeric() {
            locale::format_decimal(self.numeric(record))
        } else {
            self.raw(record)
        }
    }

    /// 表格报告单元格渲染（数值: 货币格式，PDF 既有口径）
    fn render_report(&self, record: &DemandRecord) -> String {
        if self.is_numeric() {
            locale::format_currency(self.numeric(record))
        } else {
            self.raw(record)
        }
    }
}

// ==========================================
// ExportOptions - 导出选项
// ==========================================
// headers 与 fields 一一对应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOptions {
    pub title: String,
    pub headers: Vec<String>,
    pub fields: Vec<ExportField>,
}

// ==========================================
// TabularReport - 表格报告（外部 PDF 渲染器的输入契约）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularReport {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

// ==========================================
// ExportApi - 导出 API
// ==========================================
pub struct ExportApi;

impl ExportApi {
    pub fn new() -> Self {
        Self
    }

    /// 导出 CSV（分号分隔，所有单元格加引号）
    pub fn export_csv<W: Write>(
        &self,
        records: &[DemandRecord],
        options: &ExportOptions,
        writer: W,
    ) -> ApiResult<()> {
        if options.headers.len() != options.fields.len() {
            return Err(ApiError::InvalidInput(
                "headers 与 fields 长度不一致".to_string(),
            ));
        }

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .quote_style(csv::QuoteStyle::Always)
            .from_writer(writer);

        csv_writer
            .write_record(&options.headers)
            .map_err(|e| ApiError::ExportFailed(e.to_string()))?;

        for record in records {
            let row: Vec<String> = options
                .fields
                .iter()
                .map(|f| f.render_csv(record))
                .collect();
            csv_writer
                .write_record(&row)
                .map_err(|e| ApiError::ExportFailed(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| ApiError::ExportFailed(e.to_string()))?;

        info!(title = %options.title, rows = records.len(), "CSV 导出完成");
        Ok(())
    }

    /// 生成表格报告（外部 PDF 渲染器消费）
    pub fn tabular_report(
        &self,
        records: &[DemandRecord],
        options: &ExportOptions,
    ) -> ApiResult<TabularReport> {
        if options.headers.len() != options.fields.len() {
            return Err(ApiError::InvalidInput(
                "headers 与 fields 长度不一致".to_string(),
            ));
        }

        let rows = records
            .iter()
            .map(|record| {
                options
                    .fields
                    .iter()
                    .map(|f| f.render_report(record))
                    .collect()
            })
            .collect();

        Ok(TabularReport {
            title: options.title.clone(),
            headers: options.headers.clone(),
            rows,
        })
    }
}

impl Default for ExportApi {
    fn default() -> Self {
        Self::new()
    }
}
