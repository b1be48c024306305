// ==========================================
// 放大预测系统 - 放大计算引擎
// ==========================================
// 职责: ProcessInput → PredictionOutput
// 1) 计算复合放大倍数
// 2) 按单元操作变体分派, 逐参数应用放大规则 (缺省字段取基准值)
// 3) 生成约束提示
// 红线: 纯函数, 无 I/O, 无失败路径
// ==========================================

use crate::config::{BaselineDefaults, CalculatorConfig};
use crate::domain::prediction::{PredictionOutput, RecommendedParameter};
use crate::domain::process::{OperationParameters, ProcessInput, MAX_PARAMETER_VALUE};
use crate::engine::constraints::ConstraintEngine;
use crate::engine::rules::parameter_models;
use crate::engine::scale_factor::composite_scale_factor;
use tracing::instrument;

/// 取当前值: 缺失 / 非正 / 非有限 / 超出上限时回退到基准值
fn current_or(value: Option<f64>, baseline: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 && v <= MAX_PARAMETER_VALUE => v,
        _ => baseline,
    }
}

// ==========================================
// ScaleUpCalculator - 放大计算引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct ScaleUpCalculator {
    baselines: BaselineDefaults,
    constraints: ConstraintEngine,
}

impl Default for ScaleUpCalculator {
    fn default() -> Self {
        Self::new(&CalculatorConfig::default())
    }
}

impl ScaleUpCalculator {
    /// 创建计算引擎
    pub fn new(config: &CalculatorConfig) -> Self {
        Self {
            baselines: config.baselines.clone(),
            constraints: ConstraintEngine::new(config),
        }
    }

    /// 计算放大推荐参数
    #[instrument(skip(self, input), fields(product = %input.product_name, operation = %input.operation.label()))]
    pub fn calculate(&self, input: &ProcessInput) -> PredictionOutput {
        let scale_factor = composite_scale_factor(input.category, input.scale_selection);
        let recommended_parameters = self.recommend(&input.operation, scale_factor);
        let constraints = self
            .constraints
            .evaluate(input, scale_factor, &recommended_parameters);

        tracing::debug!(
            scale_factor,
            parameters = recommended_parameters.len(),
            constraints = constraints.len(),
            "放大计算完成"
        );

        PredictionOutput {
            target_scale: input.scale_selection.label().to_string(),
            scale_factor,
            recommended_parameters,
            constraints,
        }
    }

    /// 按单元操作的参数模型逐项计算
    ///
    /// 当前值取自操作变体中已填写的字段, 缺省时取基准值
    fn recommend(
        &self,
        operation: &OperationParameters,
        scale_factor: f64,
    ) -> Vec<RecommendedParameter> {
        let Some(unit_operation) = operation.unit_operation() else {
            return Vec::new();
        };
        let provided = operation.provided_values();

        parameter_models(unit_operation)
            .iter()
            .map(|model| {
                let value = provided
                    .iter()
                    .find(|(field, _)| *field == model.field)
                    .map(|(_, v)| *v);
                let baseline = self.baselines.get(model.baseline).unwrap_or_default();
                model.evaluate(current_or(value, baseline), scale_factor)
            })
            .collect()
    }
}

/// 使用默认配置计算
pub fn calculate_scale_up(input: &ProcessInput) -> PredictionOutput {
    ScaleUpCalculator::default().calculate(input)
}
