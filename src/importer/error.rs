// ==========================================
// 放大预测系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv/.json）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(#[from] csv::Error),

    #[error("JSON 解析失败: {0}")]
    JsonParseError(#[from] serde_json::Error),

    // ===== 数据映射错误 =====
    #[error("类型转换失败 (行 {row}): {}", summarize(.failures))]
    TypeConversionError {
        row: usize,
        failures: Vec<FieldConversionFailure>,
    },
}

/// 单个字段的转换失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConversionFailure {
    /// 字段名 (camelCase)
    pub field: String,
    pub message: String,
}

fn summarize(failures: &[FieldConversionFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
