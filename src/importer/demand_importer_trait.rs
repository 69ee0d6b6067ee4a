// ==========================================
// 采购需求分析系统 - 导入管道接口定义
// ==========================================
// 职责: 定义导入管道各阶段的 trait 接口
// 流程: 文件解析 → 字段映射 → 有效性过滤
// ==========================================

use crate::domain::demand::{DemandRecord, ImportReport};
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// 原始行: 表头 → 单元格字符串
pub type RawRow = HashMap<String, String>;

/// 一次导入的产物: 有效记录集 + 批次报告
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub records: Vec<DemandRecord>,
    pub report: ImportReport,
}

// ==========================================
// FileParser - 文件解析器接口
// ==========================================
pub trait FileParser: Send + Sync {
    /// 把分号分隔的 CSV 输入解析为原始行序列
    ///
    /// 结构性损坏（行列数不一致、引号错乱、不可读输入）
    /// 整批报错，不区分具体行
    fn parse_raw_rows(&self, input: &mut dyn Read) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// FieldMapper - 字段映射器接口
// ==========================================
pub trait FieldMapper: Send + Sync {
    /// 原始行 → 统一需求记录
    ///
    /// 别名表之外的表头一律忽略；数值解析失败填 0；
    /// 本阶段不判有效性，永不失败
    fn map_row(&self, row: &RawRow) -> DemandRecord;
}

// ==========================================
// DemandImporter - 导入器接口
// ==========================================
pub trait DemandImporter: Send + Sync {
    /// 从任意 reader 导入（浏览器上传的字节流走这里）
    fn import_reader(&self, input: &mut dyn Read, file_name: &str) -> ImportResult<ImportOutcome>;

    /// 从文件路径导入（开发外壳与测试用）
    fn import_file(&self, path: &Path) -> ImportResult<ImportOutcome>;
}
