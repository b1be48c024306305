// ==========================================
// 放大预测系统 - 核心库
// ==========================================
// 定位: 固体制剂工艺放大参数推荐 (纯计算, 人工最终决策)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 输入与结果模型
pub mod domain;

// 引擎层 - 放大规则与计算
pub mod engine;

// 导入层 - 批量文件
pub mod importer;

// 配置层 - 基准值与阈值
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 校验与对外入口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    Market, OperationParameters, PredictionOutput, ProcessInput, ProcessRecord,
    RecommendedParameter, ScaleCategory, ScaleSelection, UnitOperation, Vertical,
};

pub use engine::{calculate_scale_up, ScaleUpCalculator};

pub use api::{PredictorError, PredictorResult, RecordValidator, ScaleUpApi};

pub use config::{CalculatorConfig, ConfigManager};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Scale-Up Predictor";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
