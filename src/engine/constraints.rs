// ==========================================
// 放大预测系统 - 约束提示引擎
// ==========================================
// 职责: 基于简单阈值生成提示/告警文本
// 规则顺序:
//   1) 推荐值超过配置上限 (如 Mill Speed > 8000 RPM)
//   2) 目标市场 EU → EMA 法规提醒
//   3) 放大倍数超过阈值 → 建议中间放大步骤
// 无放大模型 / 无法识别的操作不产生提示 (空参数列表即结果)
// 红线: 只提示, 不拒绝计算
// ==========================================

use crate::config::CalculatorConfig;
use crate::domain::prediction::RecommendedParameter;
use crate::domain::process::ProcessInput;
use crate::domain::types::Market;
use rust_i18n::t;
use std::collections::BTreeMap;

// ==========================================
// ConstraintEngine - 约束提示引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct ConstraintEngine {
    ceilings: BTreeMap<String, f64>,
    high_scale_factor_threshold: f64,
    locale: String,
}

impl ConstraintEngine {
    pub fn new(config: &CalculatorConfig) -> Self {
        Self {
            ceilings: config.parameter_ceilings.clone(),
            high_scale_factor_threshold: config.high_scale_factor_threshold,
            locale: config.locale.clone(),
        }
    }

    /// 生成约束提示
    pub fn evaluate(
        &self,
        input: &ProcessInput,
        scale_factor: f64,
        parameters: &[RecommendedParameter],
    ) -> Vec<String> {
        let locale = self.locale.as_str();
        let mut constraints = Vec::new();

        // 规则1: 设备极限
        for param in parameters {
            if let Some(limit) = self.ceilings.get(param.name()) {
                if param.recommended_value() > *limit {
                    constraints.push(
                        t!(
                            "constraint.ceiling_exceeded",
                            locale = locale,
                            name = param.name(),
                            limit = limit,
                            unit = param.unit()
                        )
                        .to_string(),
                    );
                }
            }
        }

        // 规则2: 法规提醒
        if input.market == Some(Market::Eu) {
            constraints.push(t!("constraint.ema_reminder", locale = locale).to_string());
        }

        // 规则3: 放大倍数过高
        if scale_factor > self.high_scale_factor_threshold {
            constraints.push(
                t!(
                    "constraint.high_scale_factor",
                    locale = locale,
                    threshold = self.high_scale_factor_threshold
                )
                .to_string(),
            );
        }

        for constraint in &constraints {
            tracing::warn!(product = %input.product_name, "{}", constraint);
        }

        constraints
    }
}
