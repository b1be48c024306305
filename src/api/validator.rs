// ==========================================
// 放大预测系统 - 输入记录校验器
// ==========================================
// 职责: ProcessRecord → ProcessInput
// 规则:
//   - productName 必填, 至少 2 个字符
//   - unitOperation 必填; 无法识别的标签不算违规 (映射为 Unrecognized)
//   - category / scaleSelection 必填且可识别
//   - strength 必填, 正有限数
//   - market / vertical 可选, 填写时必须可识别
//   - 当前操作的数值字段必须为非负有限数, 且不超过 MAX_PARAMETER_VALUE
// 违规全部收集后一次性返回
// ==========================================

use crate::api::error::{ValidationError, ValidationViolation};
use crate::domain::process::{
    OperationParameters, ProcessInput, ProcessRecord, MAX_PARAMETER_VALUE,
};
use crate::domain::types::{Market, ScaleCategory, ScaleSelection, UnitOperation, Vertical};
use std::str::FromStr;

/// 产品名称最小长度
pub const MIN_PRODUCT_NAME_CHARS: usize = 2;

// ==========================================
// RecordValidator - 输入记录校验器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordValidator;

impl RecordValidator {
    pub fn new() -> Self {
        Self
    }

    /// 校验并转换记录
    ///
    /// # 返回
    /// - Ok(ProcessInput): 校验通过
    /// - Err(ValidationError::Rejected): 全部违规详情
    pub fn validate(&self, record: &ProcessRecord) -> Result<ProcessInput, ValidationError> {
        let mut violations = Vec::new();

        let product_name = record
            .product_name
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        if product_name.chars().count() < MIN_PRODUCT_NAME_CHARS {
            violations.push(ValidationViolation::new(
                "productName",
                format!("产品名称至少 {} 个字符", MIN_PRODUCT_NAME_CHARS),
            ));
        }

        let category = required_enum::<ScaleCategory>(
            record.category.as_deref(),
            "category",
            &mut violations,
        );
        let scale_selection = required_enum::<ScaleSelection>(
            record.scale_selection.as_deref(),
            "scaleSelection",
            &mut violations,
        );
        let market =
            optional_enum::<Market>(record.market.as_deref(), "market", &mut violations);
        let vertical =
            optional_enum::<Vertical>(record.vertical.as_deref(), "vertical", &mut violations);

        let strength = match record.strength {
            Some(s) if s.is_finite() && s > 0.0 => Some(s),
            Some(s) => {
                violations.push(ValidationViolation::new(
                    "strength",
                    format!("规格必须为正数, 实际 {}", s),
                ));
                None
            }
            None => {
                violations.push(ValidationViolation::new("strength", "必填"));
                None
            }
        };

        let operation = match non_empty(record.unit_operation.as_deref()) {
            None => {
                violations.push(ValidationViolation::new("unitOperation", "必填"));
                None
            }
            Some(label) => Some(match UnitOperation::from_str(label) {
                Ok(op) => OperationParameters::from_record(op, record),
                Err(_) => {
                    tracing::debug!(label, "无法识别的单元操作, 不生成推荐参数");
                    OperationParameters::Unrecognized {
                        label: label.to_string(),
                    }
                }
            }),
        };

        if let Some(op) = &operation {
            for (field, value) in op.provided_values() {
                if !value.is_finite() || value < 0.0 {
                    violations.push(ValidationViolation::new(
                        field,
                        format!("必须为非负数, 实际 {}", value),
                    ));
                } else if value > MAX_PARAMETER_VALUE {
                    violations.push(ValidationViolation::new(
                        field,
                        format!("超出取值上限 {:e}, 实际 {:e}", MAX_PARAMETER_VALUE, value),
                    ));
                }
            }
        }

        match (category, scale_selection, strength, operation) {
            (Some(category), Some(scale_selection), Some(strength), Some(operation))
                if violations.is_empty() =>
            {
                Ok(ProcessInput {
                    product_name: product_name.to_string(),
                    category,
                    scale_selection,
                    strength,
                    market,
                    vertical,
                    operation,
                })
            }
            _ => Err(ValidationError::Rejected { violations }),
        }
    }
}

impl TryFrom<&ProcessRecord> for ProcessInput {
    type Error = ValidationError;

    fn try_from(record: &ProcessRecord) -> Result<Self, Self::Error> {
        RecordValidator::new().validate(record)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn required_enum<T>(
    value: Option<&str>,
    field: &str,
    violations: &mut Vec<ValidationViolation>,
) -> Option<T>
where
    T: FromStr<Err = String>,
{
    match non_empty(value) {
        None => {
            violations.push(ValidationViolation::new(field, "必填"));
            None
        }
        Some(raw) => parse_enum(raw, field, violations),
    }
}

fn optional_enum<T>(
    value: Option<&str>,
    field: &str,
    violations: &mut Vec<ValidationViolation>,
) -> Option<T>
where
    T: FromStr<Err = String>,
{
    non_empty(value).and_then(|raw| parse_enum(raw, field, violations))
}

fn parse_enum<T>(raw: &str, field: &str, violations: &mut Vec<ValidationViolation>) -> Option<T>
where
    T: FromStr<Err = String>,
{
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(reason) => {
            violations.push(ValidationViolation::new(field, reason));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::process::CoatingParams;

    fn valid_record() -> ProcessRecord {
        ProcessRecord {
            product_name: Some("Metformin XR".to_string()),
            unit_operation: Some("Coating".to_string()),
            category: Some("Lab → Pilot".to_string()),
            strength: Some(500.0),
            market: Some("EU".to_string()),
            scale_selection: Some("Scale 2".to_string()),
            spray_rate: Some(120.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_record_converts() {
        let input = RecordValidator::new().validate(&valid_record()).unwrap();
        assert_eq!(input.product_name, "Metformin XR");
        assert_eq!(input.category, ScaleCategory::LabToPilot);
        assert_eq!(input.market, Some(Market::Eu));
        assert_eq!(input.vertical, None);
        assert_eq!(
            input.operation,
            OperationParameters::Coating(CoatingParams {
                spray_rate: Some(120.0),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_all_violations_collected() {
        let record = ProcessRecord {
            product_name: Some("X".to_string()),
            strength: Some(-5.0),
            market: Some("Mars".to_string()),
            ..Default::default()
        };
        let err = RecordValidator::new().validate(&record).unwrap_err();
        let fields: Vec<&str> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "productName",
                "category",
                "scaleSelection",
                "market",
                "strength",
                "unitOperation"
            ]
        );
    }

    #[test]
    fn test_unknown_operation_is_not_a_violation() {
        let mut record = valid_record();
        record.unit_operation = Some("Lyophilization".to_string());
        let input = ProcessInput::try_from(&record).unwrap();
        assert_eq!(
            input.operation,
            OperationParameters::Unrecognized {
                label: "Lyophilization".to_string()
            }
        );
    }

    #[test]
    fn test_negative_operation_field_rejected() {
        let mut record = valid_record();
        record.bed_speed = Some(-1.0);
        let err = RecordValidator::new().validate(&record).unwrap_err();
        assert_eq!(err.violations()[0].field, "bedSpeed");
    }

    #[test]
    fn test_out_of_range_operation_field_rejected() {
        let mut record = valid_record();
        record.spray_rate = Some(1.0e307);
        let err = RecordValidator::new().validate(&record).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].field, "sprayRate");

        record.spray_rate = Some(MAX_PARAMETER_VALUE);
        assert!(RecordValidator::new().validate(&record).is_ok());
    }

    #[test]
    fn test_irrelevant_fields_are_ignored() {
        let mut record = valid_record();
        record.mill_speed = Some(-100.0);
        assert!(RecordValidator::new().validate(&record).is_ok());
    }
}
