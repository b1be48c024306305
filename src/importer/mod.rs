// ==========================================
// 放大预测系统 - 导入层
// ==========================================
// 职责: 批量文件 → ProcessRecord → 预测报告
// 支持: Excel, CSV, JSON
// ==========================================

pub mod batch;
pub mod error;
pub mod field_mapper;
pub mod file_parser;

// 重导出核心类型
pub use batch::{BatchPredictor, BatchReport, BatchSummary, RowOutcome};
pub use error::{FieldConversionFailure, ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{
    parser_for_path, CsvParser, ExcelParser, FileParser, JsonParser, NumberedRow, RawRow,
};
