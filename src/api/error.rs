// ==========================================
// 放大预测系统 - API层错误类型
// ==========================================
// 职责: 汇总各层错误 (校验 / 导入 / 配置), 提供统一 Result 别名
// 说明: 放大计算本身没有失败路径, 错误只出现在外围层
// ==========================================

use crate::config::ConfigError;
use crate::importer::error::ImportError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 统一错误类型
#[derive(Error, Debug)]
pub enum PredictorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("无效输入: {0}")]
    InvalidInput(String),
}

/// Result 类型别名
pub type PredictorResult<T> = Result<T, PredictorError>;

// ==========================================
// 校验错误
// ==========================================

/// 记录校验错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// 记录被拒绝（带全部违规详情）
    #[error("记录校验失败: {}", summarize(.violations))]
    Rejected { violations: Vec<ValidationViolation> },
}

impl ValidationError {
    pub fn violations(&self) -> &[ValidationViolation] {
        match self {
            ValidationError::Rejected { violations } => violations,
        }
    }
}

fn summarize(violations: &[ValidationViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

/// 校验违规详情
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationViolation {
    /// 字段名（表单字段名, camelCase）
    pub field: String,
    /// 违规原因
    pub reason: String,
}

impl ValidationViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
