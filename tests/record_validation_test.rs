// ==========================================
// 表单记录校验集成测试
// ==========================================
// 测试目标: ProcessRecord → ProcessInput 的边界与违规汇总
// ==========================================

mod helpers;

use helpers::test_data_builder::valid_record;
use scaleup_predictor::api::{PredictorError, ScaleUpApi};
use scaleup_predictor::domain::{
    CoatingParams, Market, OperationParameters, ProcessInput, ProcessRecord, ScaleCategory,
    ScaleSelection, UnitOperation, Vertical,
};
use scaleup_predictor::RecordValidator;

fn rejected_fields(record: &ProcessRecord) -> Vec<String> {
    RecordValidator::new()
        .validate(record)
        .unwrap_err()
        .violations()
        .iter()
        .map(|v| v.field.clone())
        .collect()
}

// ==========================================
// 测试用例 1: 合法记录
// ==========================================

#[test]
fn test_valid_record_round_trips_into_input() {
    let input = ProcessInput::try_from(&valid_record()).unwrap();
    assert_eq!(input.product_name, "Metformin HCl 500");
    assert_eq!(input.category, ScaleCategory::LabToPilot);
    assert_eq!(input.scale_selection, ScaleSelection::Scale2);
    assert_eq!(input.market, Some(Market::Usa));
    assert_eq!(input.vertical, Some(Vertical::Osd));
    assert_eq!(input.operation.unit_operation(), Some(UnitOperation::Coating));
}

#[test]
fn test_labels_are_matched_loosely() {
    let record = ProcessRecord {
        category: Some("plant1->plant2".to_string()),
        scale_selection: Some("SCALE 4".to_string()),
        unit_operation: Some("  wurster ".to_string()),
        market: Some("in".to_string()),
        ..valid_record()
    };
    let input = RecordValidator::new().validate(&record).unwrap();
    assert_eq!(input.category, ScaleCategory::Plant1ToPlant2);
    assert_eq!(input.scale_selection, ScaleSelection::Scale4);
    assert_eq!(input.market, Some(Market::India));
    assert_eq!(
        input.operation.unit_operation(),
        Some(UnitOperation::BottomSprayGranulation)
    );
}

#[test]
fn test_product_name_is_trimmed() {
    let record = ProcessRecord {
        product_name: Some("  Ab  ".to_string()),
        ..valid_record()
    };
    let input = RecordValidator::new().validate(&record).unwrap();
    assert_eq!(input.product_name, "Ab");
}

#[test]
fn test_blank_market_is_treated_as_missing() {
    let record = ProcessRecord {
        market: Some("   ".to_string()),
        vertical: None,
        ..valid_record()
    };
    let input = RecordValidator::new().validate(&record).unwrap();
    assert_eq!(input.market, None);
    assert_eq!(input.vertical, None);
}

// ==========================================
// 测试用例 2: 违规记录
// ==========================================

#[test]
fn test_short_product_name_rejected() {
    let record = ProcessRecord {
        product_name: Some(" A ".to_string()),
        ..valid_record()
    };
    assert_eq!(rejected_fields(&record), vec!["productName"]);
}

#[test]
fn test_zero_strength_rejected() {
    let record = ProcessRecord {
        strength: Some(0.0),
        ..valid_record()
    };
    assert_eq!(rejected_fields(&record), vec!["strength"]);
}

#[test]
fn test_unknown_category_rejected_with_reason() {
    let record = ProcessRecord {
        category: Some("Lab → Plant 2".to_string()),
        ..valid_record()
    };
    let err = RecordValidator::new().validate(&record).unwrap_err();
    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.violations()[0].field, "category");
    assert!(err.violations()[0].reason.contains("Lab → Plant 2"));
}

#[test]
fn test_empty_record_reports_every_required_field() {
    assert_eq!(
        rejected_fields(&ProcessRecord::default()),
        vec![
            "productName",
            "category",
            "scaleSelection",
            "strength",
            "unitOperation"
        ]
    );
}

#[test]
fn test_negative_spray_rate_rejected_for_coating_only() {
    let record = ProcessRecord {
        spray_rate: Some(-10.0),
        ..valid_record()
    };
    assert_eq!(rejected_fields(&record), vec!["sprayRate"]);

    // Compression 不读取 sprayRate
    let record = ProcessRecord {
        unit_operation: Some("Compression".to_string()),
        spray_rate: Some(-10.0),
        ..valid_record()
    };
    assert!(RecordValidator::new().validate(&record).is_ok());
}

// ==========================================
// 测试用例 3: 表单 JSON
// ==========================================

#[test]
fn test_form_json_with_text_numbers() {
    let payload = r#"{
        "productName": "Paracetamol 500",
        "unitOperation": "Coating",
        "category": "Lab → Pilot",
        "strength": "500",
        "scaleSelection": "Scale 2",
        "sprayRate": "120",
        "bedSpeed": "",
        "atomizationPressure": null
    }"#;
    let record: ProcessRecord = serde_json::from_str(payload).unwrap();
    assert_eq!(record.strength, Some(500.0));
    assert_eq!(record.bed_speed, None);

    let input = RecordValidator::new().validate(&record).unwrap();
    assert_eq!(
        input.operation,
        OperationParameters::Coating(CoatingParams {
            spray_rate: Some(120.0),
            ..Default::default()
        })
    );
}

#[test]
fn test_form_json_with_unparseable_number() {
    let api = ScaleUpApi::default();
    let err = api
        .predict_json(r#"{ "productName": "Aspirin", "strength": "five hundred" }"#)
        .unwrap_err();
    assert!(matches!(err, PredictorError::Serialization(_)));
}

#[test]
fn test_form_json_with_huge_spray_rate_is_rejected() {
    let api = ScaleUpApi::default();
    let payload = r#"{
        "productName": "Paracetamol 500",
        "unitOperation": "Coating",
        "category": "Lab → Pilot",
        "strength": 500,
        "scaleSelection": "Scale 2",
        "sprayRate": 1e307
    }"#;
    match api.predict_json(payload) {
        Err(PredictorError::Validation(err)) => {
            assert_eq!(err.violations().len(), 1);
            assert_eq!(err.violations()[0].field, "sprayRate");
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_predict_record_surfaces_validation_error() {
    let api = ScaleUpApi::default();
    let record = ProcessRecord {
        scale_selection: Some("Scale 9".to_string()),
        ..valid_record()
    };
    match api.predict_record(&record) {
        Err(PredictorError::Validation(err)) => {
            assert_eq!(err.violations()[0].field, "scaleSelection");
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}
