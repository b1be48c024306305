// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use scaleup_predictor::domain::{
    CoatingParams, CompressionParams, Market, OperationParameters, ProcessInput, ProcessRecord,
    ScaleCategory, ScaleSelection,
};

// ==========================================
// ProcessInput 构建器
// ==========================================

pub struct InputBuilder {
    product_name: String,
    category: ScaleCategory,
    scale_selection: ScaleSelection,
    strength: f64,
    market: Option<Market>,
    operation: OperationParameters,
}

impl InputBuilder {
    pub fn new(operation: OperationParameters) -> Self {
        Self {
            product_name: "Metformin HCl 500".to_string(),
            category: ScaleCategory::LabToPilot,
            scale_selection: ScaleSelection::Scale2,
            strength: 500.0,
            market: None,
            operation,
        }
    }

    pub fn coating(spray_rate: Option<f64>) -> Self {
        Self::new(OperationParameters::Coating(CoatingParams {
            spray_rate,
            ..Default::default()
        }))
    }

    pub fn compression(compression_force: Option<f64>) -> Self {
        Self::new(OperationParameters::Compression(CompressionParams {
            compression_force,
            ..Default::default()
        }))
    }

    pub fn category(mut self, category: ScaleCategory) -> Self {
        self.category = category;
        self
    }

    pub fn scale(mut self, scale_selection: ScaleSelection) -> Self {
        self.scale_selection = scale_selection;
        self
    }

    pub fn market(mut self, market: Market) -> Self {
        self.market = Some(market);
        self
    }

    pub fn build(self) -> ProcessInput {
        let mut input = ProcessInput::new(
            self.product_name,
            self.category,
            self.scale_selection,
            self.strength,
            self.operation,
        );
        input.market = self.market;
        input
    }
}

// ==========================================
// ProcessRecord 构建器
// ==========================================

/// 合法的表单记录（Coating, Lab → Pilot, Scale 2）
pub fn valid_record() -> ProcessRecord {
    ProcessRecord {
        product_name: Some("Metformin HCl 500".to_string()),
        unit_operation: Some("Coating".to_string()),
        category: Some("Lab → Pilot".to_string()),
        strength: Some(500.0),
        vertical: Some("OSD".to_string()),
        market: Some("USA".to_string()),
        scale_selection: Some("Scale 2".to_string()),
        spray_rate: Some(120.0),
        ..Default::default()
    }
}

/// 断言两个浮点数在容差内相等
pub fn assert_close(actual: f64, expected: f64, eps: f64) {
    assert!(
        (actual - expected).abs() < eps,
        "expected {expected}, got {actual}"
    );
}
