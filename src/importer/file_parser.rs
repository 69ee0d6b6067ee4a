// ==========================================
// 采购需求分析系统 - 文件解析器实现
// ==========================================
// 支持: 分号分隔 CSV（UTF-8，首行为表头）
// 口径: 行列数不一致视为结构性损坏，整批报错
// ==========================================

use crate::importer::demand_importer_trait::{FileParser, RawRow};
use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::io::Read;

// ==========================================
// CsvParser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_raw_rows(&self, input: &mut dyn Read) -> ImportResult<Vec<RawRow>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()
            .map_err(ImportError::from)?
            .iter()
            .map(|h| h.to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::CsvParseError("表头行为空".to_string()));
        }

        // 读取所有数据行
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(ImportError::from)?;
            let mut row_map = RawRow::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(row_map);
        }

        Ok(rows)
    }
}
