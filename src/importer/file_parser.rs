// ==========================================
// 放大预测系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv) / JSON (.json, 对象数组)
// 输出: (源文件行号, HashMap<列名, 值>), 完全空白的行跳过但不影响后续行号
// 行号: CSV / Excel 为文件中的行号 (表头为第 1 行); JSON 为数组下标 (从 1 开始)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

pub type RawRow = HashMap<String, String>;

/// 带源行号的原始行
pub type NumberedRow = (usize, RawRow);

// ==========================================
// FileParser Trait
// ==========================================
pub trait FileParser: Send + Sync {
    /// 解析文件为带行号的原始行记录
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<NumberedRow>>;
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ImportError::FileNotFound(path.display().to_string()))
    }
}

fn is_blank(row: &RawRow) -> bool {
    row.values().all(|v| v.is_empty())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<NumberedRow>> {
        ensure_exists(file_path)?;

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            // 引号内换行时一条记录跨多行, 以记录起始行为准
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2);
            let row: RawRow = headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.clone(), value.trim().to_string()))
                .collect();

            if is_blank(&row) {
                continue;
            }
            records.push((line, row));
        }

        Ok(records)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<NumberedRow>> {
        ensure_exists(file_path)?;

        let mut workbook = open_workbook_auto(file_path)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        // 表头所在的工作表行号 (从 1 开始)
        let header_line = range.start().map(|(r, _)| r as usize + 1).unwrap_or(1);
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (idx, data_row) in rows.enumerate() {
            let row: RawRow = headers
                .iter()
                .zip(data_row.iter())
                .map(|(header, cell)| (header.clone(), cell.to_string().trim().to_string()))
                .collect();

            if is_blank(&row) {
                continue;
            }
            records.push((header_line + 1 + idx, row));
        }

        Ok(records)
    }
}

// ==========================================
// JSON Parser 实现
// ==========================================
// 顶层必须为对象数组; 数值/布尔值转为文本, null 视为空
pub struct JsonParser;

impl FileParser for JsonParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<NumberedRow>> {
        ensure_exists(file_path)?;

        let file = File::open(file_path)?;
        let items: Vec<serde_json::Map<String, serde_json::Value>> =
            serde_json::from_reader(std::io::BufReader::new(file))?;

        let records = items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| {
                let row = item
                    .into_iter()
                    .map(|(key, value)| {
                        let text = match value {
                            serde_json::Value::Null => String::new(),
                            serde_json::Value::String(s) => s.trim().to_string(),
                            other => other.to_string(),
                        };
                        (key.trim().to_string(), text)
                    })
                    .collect::<RawRow>();
                (idx + 1, row)
            })
            .filter(|(_, row)| !is_blank(row))
            .collect();

        Ok(records)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub fn parser_for_path(path: &Path) -> ImportResult<Box<dyn FileParser>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => Ok(Box::new(CsvParser)),
        "xlsx" | "xls" => Ok(Box::new(ExcelParser)),
        "json" => Ok(Box::new(JsonParser)),
        _ => Err(ImportError::UnsupportedFormat(ext)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_csv_parser_valid_file() {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "productName,unitOperation,sprayRate").unwrap();
        writeln!(temp_file, "Metformin, Coating ,120").unwrap();
        writeln!(temp_file, "Aspirin,Blending,").unwrap();

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, 2);
        assert_eq!(records[0].1.get("unitOperation"), Some(&"Coating".to_string()));
        assert_eq!(records[1].1.get("sprayRate"), Some(&String::new()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_records(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "productName,strength").unwrap();
        writeln!(temp_file, "Metformin,500").unwrap();
        writeln!(temp_file, ",").unwrap();
        writeln!(temp_file, "Aspirin,100").unwrap();

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();
        let lines: Vec<usize> = records.iter().map(|(line, _)| *line).collect();
        assert_eq!(lines, vec![2, 4]);
    }

    #[test]
    fn test_json_parser_stringifies_values() {
        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            temp_file,
            r#"[{{"productName": "Metformin", "strength": 500, "market": null}}, {{}}]"#
        )
        .unwrap();

        let records = JsonParser.parse_to_raw_records(temp_file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, 1);
        assert_eq!(records[0].1.get("strength"), Some(&"500".to_string()));
        assert_eq!(records[0].1.get("market"), Some(&String::new()));
    }

    #[test]
    fn test_json_parser_rejects_non_array() {
        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(temp_file, r#"{{"productName": "Metformin"}}"#).unwrap();
        assert!(matches!(
            JsonParser.parse_to_raw_records(temp_file.path()),
            Err(ImportError::JsonParseError(_))
        ));
    }

    #[test]
    fn test_parser_for_path() {
        assert!(parser_for_path(Path::new("batch.CSV")).is_ok());
        assert!(parser_for_path(Path::new("batch.xlsx")).is_ok());
        assert!(parser_for_path(Path::new("batch.json")).is_ok());
        assert!(matches!(
            parser_for_path(Path::new("batch.txt")),
            Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"
        ));
    }
}
