// ==========================================
// 采购需求分析系统 - 需求数据导入器实现
// ==========================================
// 职责: 整合导入流程，从上传字节流到有效记录集
// 流程: 解析 → 映射 → 有效性过滤 → 批次报告
// 口径: 单行数据质量问题静默降级；仅结构性损坏与
//       "零有效行"两类错误上浮到调用方
// ==========================================

use crate::domain::demand::ImportReport;
use crate::importer::demand_importer_trait::{
    DemandImporter, FieldMapper, FileParser, ImportOutcome,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::file_parser::CsvParser;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

// ==========================================
// DemandImporterImpl - 需求数据导入器实现
// ==========================================
pub struct DemandImporterImpl {
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
}

impl DemandImporterImpl {
    pub fn new(file_parser: Box<dyn FileParser>, field_mapper: Box<dyn FieldMapper>) -> Self {
        Self {
            file_parser,
            field_mapper,
        }
    }
}

impl Default for DemandImporterImpl {
    fn default() -> Self {
        Self::new(Box::new(CsvParser), Box::new(FieldMapperImpl))
    }
}

impl DemandImporter for DemandImporterImpl {
    fn import_reader(&self, input: &mut dyn Read, file_name: &str) -> ImportResult<ImportOutcome> {
        let batch_id = Uuid::new_v4().to_string();
        info!(batch_id = %batch_id, file = %file_name, "开始导入需求数据");

        // === 步骤 1: 解析文件 ===
        debug!("步骤 1: 解析文件");
        let raw_rows = self.file_parser.parse_raw_rows(input).map_err(|e| {
            error!(batch_id = %batch_id, error = %e, "文件解析失败");
            e
        })?;
        let total_rows = raw_rows.len();
        info!(batch_id = %batch_id, total_rows, "文件解析完成");

        // === 步骤 2: 字段映射 ===
        debug!("步骤 2: 字段映射");
        let mapped: Vec<_> = raw_rows
            .iter()
            .map(|row| self.field_mapper.map_row(row))
            .collect();

        // === 步骤 3: 有效性过滤 ===
        // 申购单号或订单号至少一个非空；被丢弃的行不产生逐行诊断
        debug!("步骤 3: 有效性过滤");
        let records: Vec<_> = mapped.into_iter().filter(|r| r.is_valid()).collect();
        let valid_rows = records.len();
        let dropped_rows = total_rows - valid_rows;
        info!(batch_id = %batch_id, valid_rows, dropped_rows, "有效性过滤完成");

        if records.is_empty() {
            warn!(batch_id = %batch_id, file = %file_name, "零有效行，导入中止");
            return Err(ImportError::NoValidRows {
                file: file_name.to_string(),
            });
        }

        let report = ImportReport {
            batch_id,
            file_name: file_name.to_string(),
            total_rows,
            valid_rows,
            dropped_rows,
        };

        Ok(ImportOutcome { records, report })
    }

    fn import_file(&self, path: &Path) -> ImportResult<ImportOutcome> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();
        let mut file = File::open(path)?;
        self.import_reader(&mut file, &file_name)
    }
}
