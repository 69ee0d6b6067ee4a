// ==========================================
// 采购需求分析系统 - 导入层
// ==========================================
// 职责: 外部数据导入，生成统一需求记录集
// 支持: 分号分隔 CSV（Sienge 统一需求报表）
// ==========================================

// 模块声明
pub mod demand_importer;
pub mod demand_importer_trait;
pub mod error;
pub mod field_mapper;
pub mod file_parser;

// 重导出核心类型
pub use demand_importer::DemandImporterImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::CsvParser;

// 重导出 Trait 接口
pub use demand_importer_trait::{
    DemandImporter, FieldMapper, FileParser, ImportOutcome, RawRow,
};
