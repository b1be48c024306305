// ==========================================
// 放大预测系统 - 引擎层
// ==========================================
// 职责: 放大倍数、放大规则、约束提示与计算主流程
// 红线: 引擎为纯计算, 不做 I/O, 所有推荐参数必须带公式
// ==========================================

pub mod calculator;
pub mod constraints;
pub mod rules;
pub mod scale_factor;

// 重导出核心引擎
pub use calculator::{calculate_scale_up, ScaleUpCalculator};
pub use constraints::ConstraintEngine;
pub use rules::{parameter_models, ParameterModel, ScalingRule};
pub use scale_factor::composite_scale_factor;
