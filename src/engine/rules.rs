// ==========================================
// 放大预测系统 - 放大规则
// ==========================================
// 闭式放大规则 + 公式文本 (仅供展示与审计, 不做解析)
// ==========================================

use crate::domain::prediction::RecommendedParameter;
use crate::domain::types::UnitOperation;

/// 放大规则
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalingRule {
    /// current × sqrt(SF)
    SqrtUp,
    /// current / sqrt(SF) (恒定 Froude 数经验规则)
    SqrtDown,
    /// current × SF^exponent
    PowerUp {
        exponent: f64,
        exponent_label: &'static str,
    },
    /// current / SF^exponent
    PowerDown {
        exponent: f64,
        exponent_label: &'static str,
    },
    /// current × factor (与放大倍数无关)
    Linear { factor: f64 },
    /// 保持不变
    Constant { rationale: &'static str },
}

impl ScalingRule {
    /// 应用规则
    pub fn apply(&self, current: f64, scale_factor: f64) -> f64 {
        match self {
            ScalingRule::SqrtUp => current * scale_factor.sqrt(),
            ScalingRule::SqrtDown => current / scale_factor.sqrt(),
            ScalingRule::PowerUp { exponent, .. } => current * scale_factor.powf(*exponent),
            ScalingRule::PowerDown { exponent, .. } => current / scale_factor.powf(*exponent),
            ScalingRule::Linear { factor } => current * factor,
            ScalingRule::Constant { .. } => current,
        }
    }

    /// 渲染推导公式
    pub fn formula(&self, symbol: &str, current: f64, scale_factor: f64) -> String {
        let sf = format!("{:.2}", scale_factor);
        match self {
            ScalingRule::SqrtUp => format!(
                "{s}_new = {s}_current * sqrt(scaleFactor) = {c} * sqrt({sf})",
                s = symbol,
                c = current,
                sf = sf
            ),
            ScalingRule::SqrtDown => format!(
                "{s}_new = {s}_current / sqrt(scaleFactor) = {c} / sqrt({sf})",
                s = symbol,
                c = current,
                sf = sf
            ),
            ScalingRule::PowerUp { exponent_label, .. } => format!(
                "{s}_new = {s}_current * scaleFactor^{e} = {c} * {sf}^{e}",
                s = symbol,
                e = exponent_label,
                c = current,
                sf = sf
            ),
            ScalingRule::PowerDown { exponent_label, .. } => format!(
                "{s}_new = {s}_current / scaleFactor^{e} = {c} / {sf}^{e}",
                s = symbol,
                e = exponent_label,
                c = current,
                sf = sf
            ),
            ScalingRule::Linear { factor } => format!(
                "{s}_new = {s}_current * {f} = {c} * {f}",
                s = symbol,
                f = factor,
                c = current
            ),
            ScalingRule::Constant { rationale } => format!(
                "{s}_new = {s}_current (kept constant for {r})",
                s = symbol,
                r = rationale
            ),
        }
    }
}

// ==========================================
// ParameterModel - 单个参数的放大模型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterModel {
    pub name: &'static str,
    pub unit: &'static str,
    pub symbol: &'static str,
    /// 输入记录字段名 (camelCase)
    pub field: &'static str,
    /// 缺省时使用的基准值键 (见 BaselineDefaults::entries)
    pub baseline: &'static str,
    pub rule: ScalingRule,
}

impl ParameterModel {
    /// 计算推荐参数
    pub fn evaluate(&self, current: f64, scale_factor: f64) -> RecommendedParameter {
        let recommended = self.rule.apply(current, scale_factor);
        tracing::debug!(
            parameter = self.name,
            current,
            recommended,
            scale_factor,
            "参数放大"
        );
        RecommendedParameter::new(
            self.name,
            current,
            recommended,
            self.unit,
            self.rule.formula(self.symbol, current, scale_factor),
        )
    }
}

// ==========================================
// 参数模型表
// ==========================================

pub const GRANULATION_SPRAY_RATE: ParameterModel = ParameterModel {
    name: "Spray Rate",
    unit: "g/min",
    symbol: "SR",
    field: "sprayRate",
    baseline: "granulation_spray_rate",
    rule: ScalingRule::SqrtUp,
};

pub const INLET_TEMP: ParameterModel = ParameterModel {
    name: "Inlet Temp",
    unit: "°C",
    symbol: "T_in",
    field: "inletTemp",
    baseline: "inlet_temp",
    rule: ScalingRule::Linear { factor: 1.05 },
};

pub const PAN_SPEED: ParameterModel = ParameterModel {
    name: "Pan Speed",
    unit: "RPM",
    symbol: "PanSpeed",
    field: "panSpeed",
    baseline: "pan_speed",
    rule: ScalingRule::SqrtDown,
};

pub const TURRET_SPEED: ParameterModel = ParameterModel {
    name: "Turret Speed",
    unit: "RPM",
    symbol: "RPM_turret",
    field: "turretSpeed",
    baseline: "turret_speed",
    rule: ScalingRule::Linear { factor: 0.9 },
};

pub const COMPRESSION_FORCE: ParameterModel = ParameterModel {
    name: "Compression Force",
    unit: "kN",
    symbol: "F_comp",
    field: "compressionForce",
    baseline: "compression_force",
    rule: ScalingRule::Constant {
        rationale: "consistent tablet hardness",
    },
};

pub const COATING_SPRAY_RATE: ParameterModel = ParameterModel {
    name: "Spray Rate",
    unit: "g/min",
    symbol: "SR",
    field: "sprayRate",
    baseline: "coating_spray_rate",
    rule: ScalingRule::PowerUp {
        exponent: 2.0 / 3.0,
        exponent_label: "(2/3)",
    },
};

pub const BED_SPEED: ParameterModel = ParameterModel {
    name: "Bed Speed",
    unit: "RPM",
    symbol: "RPM_bed",
    field: "bedSpeed",
    baseline: "bed_speed",
    rule: ScalingRule::PowerDown {
        exponent: 1.0 / 3.0,
        exponent_label: "(1/3)",
    },
};

pub const BLENDING_TIME: ParameterModel = ParameterModel {
    name: "Blending Time",
    unit: "min",
    symbol: "T_blend",
    field: "blendingTime",
    baseline: "blending_time",
    rule: ScalingRule::PowerUp {
        exponent: 0.15,
        exponent_label: "0.15",
    },
};

pub const BLENDER_SPEED: ParameterModel = ParameterModel {
    name: "Blender Speed",
    unit: "RPM",
    symbol: "RPM_blender",
    field: "blenderSpeed",
    baseline: "blender_speed",
    rule: ScalingRule::Constant {
        rationale: "tip speed",
    },
};

pub const MILL_SPEED: ParameterModel = ParameterModel {
    name: "Mill Speed",
    unit: "RPM",
    symbol: "RPM_mill",
    field: "millSpeed",
    baseline: "mill_speed",
    rule: ScalingRule::SqrtUp,
};

pub const SCREEN_SIZE: ParameterModel = ParameterModel {
    name: "Screen Size",
    unit: "microns",
    symbol: "ScreenSize",
    field: "screenSize",
    baseline: "screen_size",
    rule: ScalingRule::Constant {
        rationale: "consistent particle size",
    },
};

pub const ROLL_FORCE: ParameterModel = ParameterModel {
    name: "Roll Force",
    unit: "kN/cm",
    symbol: "F_roll",
    field: "rollForce",
    baseline: "roll_force",
    rule: ScalingRule::Constant {
        rationale: "ribbon consistency",
    },
};

pub const ROLL_SPEED: ParameterModel = ParameterModel {
    name: "Roll Speed",
    unit: "RPM",
    symbol: "RPM_roll",
    field: "rollSpeed",
    baseline: "roll_speed",
    rule: ScalingRule::SqrtUp,
};

/// 单元操作对应的参数模型（按输出顺序）
pub fn parameter_models(operation: UnitOperation) -> &'static [ParameterModel] {
    match operation {
        UnitOperation::TopSprayGranulation
        | UnitOperation::WetGranulation
        | UnitOperation::BottomSprayGranulation
        | UnitOperation::PowderLayering => &[GRANULATION_SPRAY_RATE, INLET_TEMP, PAN_SPEED],
        UnitOperation::Compression => &[TURRET_SPEED, COMPRESSION_FORCE],
        UnitOperation::Coating => &[COATING_SPRAY_RATE, BED_SPEED],
        UnitOperation::Blending => &[BLENDING_TIME, BLENDER_SPEED],
        UnitOperation::Milling | UnitOperation::Sifting => &[MILL_SPEED, SCREEN_SIZE],
        UnitOperation::RollCompaction => &[ROLL_FORCE, ROLL_SPEED],
        UnitOperation::Drying
        | UnitOperation::CapsuleFilling
        | UnitOperation::HotMeltExtrusion
        | UnitOperation::ExtrusionSpheronization => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_rule_arithmetic() {
        assert!((ScalingRule::SqrtUp.apply(100.0, 4.0) - 200.0).abs() < EPS);
        assert!((ScalingRule::SqrtDown.apply(10.0, 4.0) - 5.0).abs() < EPS);
        assert!((ScalingRule::Linear { factor: 0.9 }.apply(25.0, 10.0) - 22.5).abs() < EPS);
        assert_eq!(
            ScalingRule::Constant { rationale: "x" }.apply(15.0, 10.0),
            15.0
        );
        assert!((COATING_SPRAY_RATE.rule.apply(1.0, 8.0) - 4.0).abs() < 1e-9);
        assert!((BED_SPEED.rule.apply(8.0, 8.0) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_formula_text() {
        let p = GRANULATION_SPRAY_RATE.evaluate(100.0, 10.0);
        assert_eq!(
            p.formula(),
            "SR_new = SR_current * sqrt(scaleFactor) = 100 * sqrt(10.00)"
        );

        let p = COMPRESSION_FORCE.evaluate(15.0, 10.0);
        assert_eq!(
            p.formula(),
            "F_comp_new = F_comp_current (kept constant for consistent tablet hardness)"
        );

        let p = BLENDING_TIME.evaluate(15.0, 7.5);
        assert_eq!(
            p.formula(),
            "T_blend_new = T_blend_current * scaleFactor^0.15 = 15 * 7.50^0.15"
        );

        let p = INLET_TEMP.evaluate(60.0, 10.0);
        assert_eq!(p.formula(), "T_in_new = T_in_current * 1.05 = 60 * 1.05");
    }

    #[test]
    fn test_parameter_models_cover_modelled_operations() {
        for op in UnitOperation::ALL {
            assert_eq!(parameter_models(op).is_empty(), !op.is_modelled(), "{}", op);
        }
        assert_eq!(parameter_models(UnitOperation::Sifting)[0].name, "Mill Speed");
    }

    #[test]
    fn test_every_baseline_key_resolves() {
        let baselines = crate::config::BaselineDefaults::default();
        for op in UnitOperation::ALL {
            for model in parameter_models(op) {
                assert!(baselines.get(model.baseline).is_some(), "{}", model.baseline);
            }
        }
    }

    #[test]
    fn test_evaluate_rounds_and_keeps_unit() {
        let p = PAN_SPEED.evaluate(10.0, 10.0);
        assert_eq!(p.name(), "Pan Speed");
        assert_eq!(p.unit(), "RPM");
        assert_eq!(p.recommended_value(), 3.16);
    }
}
