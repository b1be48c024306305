// ==========================================
// 放大预测系统 - 预测 API
// ==========================================
// 职责: 对外统一入口
//   - 单条预测 (已校验输入 / 原始记录 / 表单 JSON)
//   - 批量预测 (文件)
//   - 单元操作目录
// ==========================================

use crate::api::error::{PredictorError, PredictorResult};
use crate::api::validator::RecordValidator;
use crate::config::{CalculatorConfig, ConfigManager};
use crate::domain::prediction::PredictionOutput;
use crate::domain::process::{ProcessInput, ProcessRecord};
use crate::domain::types::UnitOperation;
use crate::engine::calculator::ScaleUpCalculator;
use crate::engine::rules::parameter_models;
use crate::importer::batch::{BatchPredictor, BatchReport};
use serde::Serialize;
use std::path::Path;

/// 单元操作目录条目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationInfo {
    pub operation: UnitOperation,
    pub modelled: bool,
    pub parameters: Vec<&'static str>,
}

// ==========================================
// ScaleUpApi - 预测 API
// ==========================================
pub struct ScaleUpApi {
    calculator: ScaleUpCalculator,
    validator: RecordValidator,
    locale: String,
}

impl ScaleUpApi {
    pub fn new(config: &CalculatorConfig) -> Self {
        Self {
            calculator: ScaleUpCalculator::new(config),
            validator: RecordValidator::new(),
            locale: config.locale.clone(),
        }
    }

    pub fn from_manager(manager: &ConfigManager) -> Self {
        Self::new(manager.config())
    }

    /// 提示信息语言
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// 预测（已校验输入）
    pub fn predict(&self, input: &ProcessInput) -> PredictionOutput {
        self.calculator.calculate(input)
    }

    /// 预测（原始记录, 先校验）
    pub fn predict_record(&self, record: &ProcessRecord) -> PredictorResult<PredictionOutput> {
        let input = self.validator.validate(record)?;
        Ok(self.calculator.calculate(&input))
    }

    /// 预测（表单提交 JSON）
    pub fn predict_json(&self, payload: &str) -> PredictorResult<PredictionOutput> {
        let record: ProcessRecord = serde_json::from_str(payload)?;
        self.predict_record(&record)
    }

    /// 批量预测
    pub fn predict_batch(&self, path: &Path) -> PredictorResult<BatchReport> {
        if path.as_os_str().is_empty() {
            return Err(PredictorError::InvalidInput("批量文件路径为空".to_string()));
        }
        let predictor = BatchPredictor::new(self.calculator.clone());
        Ok(predictor.run(path)?)
    }

    /// 单元操作目录
    pub fn list_operations() -> Vec<OperationInfo> {
        UnitOperation::ALL
            .iter()
            .map(|op| OperationInfo {
                operation: *op,
                modelled: op.is_modelled(),
                parameters: parameter_models(*op).iter().map(|m| m.name).collect(),
            })
            .collect()
    }
}

impl Default for ScaleUpApi {
    fn default() -> Self {
        Self::new(&CalculatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_json_form_payload() {
        let api = ScaleUpApi::default();
        let payload = r#"{
            "productName": "Ibuprofen 400",
            "unitOperation": "Roll Compaction",
            "category": "Pilot → Plant 1",
            "strength": "400",
            "vertical": "OSD",
            "market": "USA",
            "scaleSelection": "Scale 3",
            "rollForce": "12",
            "rollSpeed": "4"
        }"#;
        let output = api.predict_json(payload).unwrap();
        assert_eq!(output.scale_factor, 7.5);
        assert_eq!(output.parameter("Roll Force").unwrap().recommended_value(), 12.0);
        assert_eq!(output.parameter("Roll Speed").unwrap().recommended_value(), 10.95);
    }

    #[test]
    fn test_predict_json_rejects_invalid_record() {
        let api = ScaleUpApi::default();
        let err = api.predict_json(r#"{ "productName": "X" }"#).unwrap_err();
        assert!(matches!(err, PredictorError::Validation(_)));
    }

    #[test]
    fn test_predict_json_malformed() {
        let api = ScaleUpApi::default();
        assert!(matches!(
            api.predict_json("not json"),
            Err(PredictorError::Serialization(_))
        ));
    }

    #[test]
    fn test_empty_batch_path() {
        let api = ScaleUpApi::default();
        assert!(matches!(
            api.predict_batch(Path::new("")),
            Err(PredictorError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_operation_catalogue() {
        let ops = ScaleUpApi::list_operations();
        assert_eq!(ops.len(), 14);
        let coating = ops
            .iter()
            .find(|o| o.operation == UnitOperation::Coating)
            .unwrap();
        assert!(coating.modelled);
        assert_eq!(coating.parameters, vec!["Spray Rate", "Bed Speed"]);
        let drying = ops
            .iter()
            .find(|o| o.operation == UnitOperation::Drying)
            .unwrap();
        assert!(!drying.modelled);
        assert!(drying.parameters.is_empty());
    }
}
