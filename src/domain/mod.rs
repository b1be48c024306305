// ==========================================
// 放大预测系统 - 领域模型层
// ==========================================
// 职责: 定义输入记录、计算输入、预测结果与枚举类型
// 红线: 不含计算逻辑, 不含 I/O
// ==========================================

pub mod prediction;
pub mod process;
pub mod types;

// 重导出核心类型
pub use prediction::{PredictionOutput, RecommendedParameter};
pub use process::{
    BlendingParams, CoatingParams, CompressionParams, GranulationKind, GranulationParams,
    MillingKind, MillingParams, OperationParameters, ProcessInput, ProcessRecord,
    RollCompactionParams, MAX_PARAMETER_VALUE,
};
pub use types::{Market, ScaleCategory, ScaleSelection, UnitOperation, Vertical};
