// ==========================================
// 采购需求分析系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 口径: 单元格级解析失败不在此列（静默降级为 0/缺失）；
//       此处仅批次级错误
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 批次结构错误 =====
    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据有效性 =====
    #[error("文件 {file} 无有效数据行（所有行均缺少申购单号与订单号）")]
    NoValidRows { file: String },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
