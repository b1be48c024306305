// ==========================================
// 放大预测系统 - API层
// ==========================================
// 职责: 输入校验、错误汇总、对外预测入口
// ==========================================

pub mod error;
pub mod predictor_api;
pub mod validator;

pub use error::{
    PredictorError, PredictorResult, ValidationError, ValidationViolation,
};
pub use predictor_api::{OperationInfo, ScaleUpApi};
pub use validator::RecordValidator;
