// ==========================================
// 采购需求分析系统 - API 层错误类型
// ==========================================
// 职责: 把导入层技术错误转换为一次性用户通知文案（i18n）
// 口径: 用户可见错误只有两类: 批次解析失败 / 零有效行；
//       单元格级问题从不上浮
// ==========================================

use crate::i18n;
use crate::importer::ImportError;
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 导入错误（文案已本地化，直接展示）=====
    #[error("{0}")]
    ImportFailed(String),

    // ===== 业务规则错误 =====
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ===== 导出错误 =====
    #[error("导出失败: {0}")]
    ExportFailed(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 ImportError 转换
// 目的: 技术错误 → 用户可见的一次性通知
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            // 结构性损坏: 单条批次级通知，不展示部分结果
            ImportError::CsvParseError(_) | ImportError::FileReadError(_) => {
                ApiError::ImportFailed(i18n::t("import.parse_failed"))
            }
            // 零有效行: 独立通知，调用方重置输入状态
            ImportError::NoValidRows { file } => {
                ApiError::ImportFailed(i18n::t_with_args("import.no_valid_rows", &[("file", &file)]))
            }
            ImportError::FileNotFound(path) => ApiError::InvalidInput(path),
            ImportError::UnsupportedFormat(ext) => ApiError::InvalidInput(ext),
            ImportError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_valid_rows_message_carries_file_name() {
        crate::i18n::set_locale("pt-BR");
        let err: ApiError = ImportError::NoValidRows {
            file: "demandas.csv".to_string(),
        }
        .into();
        match err {
            ApiError::ImportFailed(msg) => assert!(msg.contains("demandas.csv")),
            other => panic!("期望 ImportFailed，实际 {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_is_single_notification() {
        crate::i18n::set_locale("pt-BR");
        let err: ApiError = ImportError::CsvParseError("linha 7".to_string()).into();
        match err {
            // 文案不携带行号，批次级错误不区分具体行
            ApiError::ImportFailed(msg) => assert!(!msg.contains("linha 7")),
            other => panic!("期望 ImportFailed，实际 {:?}", other),
        }
    }
}
