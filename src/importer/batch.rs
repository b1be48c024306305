// ==========================================
// 放大预测系统 - 批量预测
// ==========================================
// 流程: 文件解析 → 字段映射 → 记录校验 → 放大计算
// 单行失败不影响其他行, 记录源文件行号与全部原因
// ==========================================

use crate::api::error::{ValidationError, ValidationViolation};
use crate::api::validator::RecordValidator;
use crate::domain::prediction::PredictionOutput;
use crate::engine::calculator::ScaleUpCalculator;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{parser_for_path, NumberedRow, RawRow};
use chrono::{DateTime, Utc};
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::instrument;
use uuid::Uuid;

// ==========================================
// 批量结果
// ==========================================

/// 单行处理结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowOutcome {
    Predicted {
        row: usize,
        product_name: String,
        unit_operation: String,
        output: PredictionOutput,
    },
    Rejected {
        row: usize,
        violations: Vec<ValidationViolation>,
    },
}

impl RowOutcome {
    pub fn row(&self) -> usize {
        match self {
            RowOutcome::Predicted { row, .. } | RowOutcome::Rejected { row, .. } => *row,
        }
    }

    pub fn is_predicted(&self) -> bool {
        matches!(self, RowOutcome::Predicted { .. })
    }
}

/// 汇总统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub predicted: usize,
    pub rejected: usize,
    /// 所有成功行的约束提示条数
    pub warnings: usize,
}

/// 批量预测报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub summary: BatchSummary,
    pub rows: Vec<RowOutcome>,
}

impl BatchReport {
    /// 汇总文本（按语言渲染）
    pub fn summary_line(&self, locale: &str) -> String {
        t!(
            "batch.summary",
            locale = locale,
            run_id = self.run_id,
            total = self.summary.total,
            predicted = self.summary.predicted,
            rejected = self.summary.rejected
        )
        .to_string()
    }
}

// ==========================================
// BatchPredictor - 批量预测器
// ==========================================
pub struct BatchPredictor {
    calculator: ScaleUpCalculator,
    validator: RecordValidator,
    mapper: FieldMapper,
}

impl BatchPredictor {
    pub fn new(calculator: ScaleUpCalculator) -> Self {
        Self {
            calculator,
            validator: RecordValidator::new(),
            mapper: FieldMapper,
        }
    }

    /// 解析文件并逐行预测
    ///
    /// # 返回
    /// - Ok(BatchReport): 文件可读取（行级失败记录在报告中）
    /// - Err(ImportError): 文件不存在 / 格式不支持 / 解析失败
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn run(&self, path: &Path) -> ImportResult<BatchReport> {
        let parser = parser_for_path(path)?;
        let raw_rows = parser.parse_to_raw_records(path)?;
        tracing::info!(rows = raw_rows.len(), "批量文件解析完成");

        Ok(self.predict_rows(&raw_rows, path.display().to_string()))
    }

    /// 对已解析的行逐行预测
    pub fn predict_rows(&self, raw_rows: &[NumberedRow], source: String) -> BatchReport {
        let rows: Vec<RowOutcome> = raw_rows
            .iter()
            .map(|(line, raw)| self.predict_row(raw, *line))
            .collect();

        let mut summary = BatchSummary {
            total: rows.len(),
            ..Default::default()
        };
        for outcome in &rows {
            match outcome {
                RowOutcome::Predicted { output, .. } => {
                    summary.predicted += 1;
                    summary.warnings += output.constraints.len();
                }
                RowOutcome::Rejected { .. } => summary.rejected += 1,
            }
        }

        tracing::info!(
            total = summary.total,
            predicted = summary.predicted,
            rejected = summary.rejected,
            "批量预测完成"
        );

        BatchReport {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            source,
            summary,
            rows,
        }
    }

    fn predict_row(&self, raw: &RawRow, row: usize) -> RowOutcome {
        let (record, failures) = self.mapper.map_collecting(raw);
        let mut violations: Vec<ValidationViolation> = failures
            .into_iter()
            .map(|f| ValidationViolation::new(f.field, f.message))
            .collect();

        match self.validator.validate(&record) {
            Ok(input) if violations.is_empty() => {
                let output = self.calculator.calculate(&input);
                RowOutcome::Predicted {
                    row,
                    product_name: input.product_name.clone(),
                    unit_operation: input.operation.label(),
                    output,
                }
            }
            Ok(_) => {
                tracing::warn!(row, violations = violations.len(), "行字段转换失败");
                RowOutcome::Rejected { row, violations }
            }
            Err(ValidationError::Rejected { violations: rejected }) => {
                // 转换失败的字段已记录, 不再重复报告 "必填"
                for violation in rejected {
                    if !violations.iter().any(|v| v.field == violation.field) {
                        violations.push(violation);
                    }
                }
                tracing::warn!(row, violations = violations.len(), "行校验失败");
                RowOutcome::Rejected { row, violations }
            }
        }
    }
}
