// ==========================================
// 放大预测系统 - 工艺输入模型
// ==========================================
// ProcessRecord: 表单/导入行的扁平记录 (全部字段可选)
// ProcessInput: 经过校验的输入, 操作参数为按单元操作划分的和类型
// ==========================================
// 约束: 每次计算只有一个单元操作变体生效,
//       与该变体无关的字段在类型上不可表示
// ==========================================

use crate::domain::types::{Market, ScaleCategory, ScaleSelection, UnitOperation, Vertical};
use serde::{Deserialize, Deserializer, Serialize};

/// 工艺参数取值上限
///
/// 最大放大倍数为 20, 任何放大规则作用于该上限后仍远小于 f64 上限
pub const MAX_PARAMETER_VALUE: f64 = 1.0e9;

// ==========================================
// ProcessRecord - 扁平输入记录
// ==========================================

/// 表单提交 / 批量导入的原始记录
///
/// 数值字段接受数字或数字字符串, 空字符串视为缺失
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessRecord {
    pub product_name: Option<String>,
    pub unit_operation: Option<String>,
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub strength: Option<f64>,
    pub vertical: Option<String>,
    pub market: Option<String>,
    pub scale_selection: Option<String>,

    // 制粒
    #[serde(deserialize_with = "lenient_number")]
    pub spray_rate: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub binder_percentage: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub inlet_temp: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub outlet_temp: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub pan_speed: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub nozzle_position: Option<f64>,

    // 压片
    #[serde(deserialize_with = "lenient_number")]
    pub turret_speed: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub number_of_punches: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub compression_force: Option<f64>,

    // 包衣
    #[serde(deserialize_with = "lenient_number")]
    pub bed_speed: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub atomization_pressure: Option<f64>,

    // 混合
    #[serde(deserialize_with = "lenient_number")]
    pub blending_time: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub blender_speed: Option<f64>,

    // 粉碎
    #[serde(deserialize_with = "lenient_number")]
    pub mill_speed: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub screen_size: Option<f64>,

    // 干法制粒
    #[serde(deserialize_with = "lenient_number")]
    pub roll_force: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub roll_speed: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub gap_size: Option<f64>,
}

/// 宽松数值反序列化: 数字 / 数字字符串 / 空串 / null
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("无法解析数值: {}", trimmed)))
        }
    }
}

// ==========================================
// 操作参数 (按单元操作划分)
// ==========================================

/// 喷雾制粒类操作的具体种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GranulationKind {
    #[default]
    TopSpray,
    Wet,
    BottomSprayWurster,
    PowderLayering,
}

impl GranulationKind {
    pub fn unit_operation(&self) -> UnitOperation {
        match self {
            GranulationKind::TopSpray => UnitOperation::TopSprayGranulation,
            GranulationKind::Wet => UnitOperation::WetGranulation,
            GranulationKind::BottomSprayWurster => UnitOperation::BottomSprayGranulation,
            GranulationKind::PowderLayering => UnitOperation::PowderLayering,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GranulationParams {
    pub kind: GranulationKind,
    pub spray_rate: Option<f64>,
    pub binder_percentage: Option<f64>,
    pub inlet_temp: Option<f64>,
    pub outlet_temp: Option<f64>,
    pub pan_speed: Option<f64>,
    pub nozzle_position: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompressionParams {
    pub turret_speed: Option<f64>,
    pub number_of_punches: Option<f64>,
    pub compression_force: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoatingParams {
    pub spray_rate: Option<f64>,
    pub bed_speed: Option<f64>,
    pub atomization_pressure: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlendingParams {
    pub blending_time: Option<f64>,
    pub blender_speed: Option<f64>,
}

/// 粉碎类操作的具体种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MillingKind {
    #[default]
    Milling,
    Sifting,
}

impl MillingKind {
    pub fn unit_operation(&self) -> UnitOperation {
        match self {
            MillingKind::Milling => UnitOperation::Milling,
            MillingKind::Sifting => UnitOperation::Sifting,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MillingParams {
    pub kind: MillingKind,
    pub mill_speed: Option<f64>,
    pub screen_size: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollCompactionParams {
    pub roll_force: Option<f64>,
    pub roll_speed: Option<f64>,
    pub gap_size: Option<f64>,
}

/// 单元操作参数 (和类型)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum OperationParameters {
    Granulation(GranulationParams),
    Compression(CompressionParams),
    Coating(CoatingParams),
    Blending(BlendingParams),
    Milling(MillingParams),
    RollCompaction(RollCompactionParams),
    /// 已知操作, 但尚无放大模型
    Unmodelled { operation: UnitOperation },
    /// 无法识别的操作标签
    Unrecognized { label: String },
}

impl OperationParameters {
    /// 按单元操作从扁平记录中提取相关字段, 其余字段忽略
    pub fn from_record(operation: UnitOperation, record: &ProcessRecord) -> Self {
        let granulation = |kind| {
            OperationParameters::Granulation(GranulationParams {
                kind,
                spray_rate: record.spray_rate,
                binder_percentage: record.binder_percentage,
                inlet_temp: record.inlet_temp,
                outlet_temp: record.outlet_temp,
                pan_speed: record.pan_speed,
                nozzle_position: record.nozzle_position,
            })
        };
        let milling = |kind| {
            OperationParameters::Milling(MillingParams {
                kind,
                mill_speed: record.mill_speed,
                screen_size: record.screen_size,
            })
        };

        match operation {
            UnitOperation::TopSprayGranulation => granulation(GranulationKind::TopSpray),
            UnitOperation::WetGranulation => granulation(GranulationKind::Wet),
            UnitOperation::BottomSprayGranulation => {
                granulation(GranulationKind::BottomSprayWurster)
            }
            UnitOperation::PowderLayering => granulation(GranulationKind::PowderLayering),
            UnitOperation::Compression => OperationParameters::Compression(CompressionParams {
                turret_speed: record.turret_speed,
                number_of_punches: record.number_of_punches,
                compression_force: record.compression_force,
            }),
            UnitOperation::Coating => OperationParameters::Coating(CoatingParams {
                spray_rate: record.spray_rate,
                bed_speed: record.bed_speed,
                atomization_pressure: record.atomization_pressure,
            }),
            UnitOperation::Blending => OperationParameters::Blending(BlendingParams {
                blending_time: record.blending_time,
                blender_speed: record.blender_speed,
            }),
            UnitOperation::Milling => milling(MillingKind::Milling),
            UnitOperation::Sifting => milling(MillingKind::Sifting),
            UnitOperation::RollCompaction => {
                OperationParameters::RollCompaction(RollCompactionParams {
                    roll_force: record.roll_force,
                    roll_speed: record.roll_speed,
                    gap_size: record.gap_size,
                })
            }
            UnitOperation::Drying
            | UnitOperation::CapsuleFilling
            | UnitOperation::HotMeltExtrusion
            | UnitOperation::ExtrusionSpheronization => {
                OperationParameters::Unmodelled { operation }
            }
        }
    }

    /// 对应的单元操作 (无法识别时为 None)
    pub fn unit_operation(&self) -> Option<UnitOperation> {
        match self {
            OperationParameters::Granulation(p) => Some(p.kind.unit_operation()),
            OperationParameters::Compression(_) => Some(UnitOperation::Compression),
            OperationParameters::Coating(_) => Some(UnitOperation::Coating),
            OperationParameters::Blending(_) => Some(UnitOperation::Blending),
            OperationParameters::Milling(p) => Some(p.kind.unit_operation()),
            OperationParameters::RollCompaction(_) => Some(UnitOperation::RollCompaction),
            OperationParameters::Unmodelled { operation } => Some(*operation),
            OperationParameters::Unrecognized { .. } => None,
        }
    }

    /// 显示用操作标签
    pub fn label(&self) -> String {
        match self {
            OperationParameters::Unrecognized { label } => label.clone(),
            other => other
                .unit_operation()
                .map(|op| op.label().to_string())
                .unwrap_or_default(),
        }
    }

    /// 该变体下已填写的数值字段 (字段名, 值)
    pub fn provided_values(&self) -> Vec<(&'static str, f64)> {
        let fields: Vec<(&'static str, Option<f64>)> = match self {
            OperationParameters::Granulation(p) => vec![
                ("sprayRate", p.spray_rate),
                ("binderPercentage", p.binder_percentage),
                ("inletTemp", p.inlet_temp),
                ("outletTemp", p.outlet_temp),
                ("panSpeed", p.pan_speed),
                ("nozzlePosition", p.nozzle_position),
            ],
            OperationParameters::Compression(p) => vec![
                ("turretSpeed", p.turret_speed),
                ("numberOfPunches", p.number_of_punches),
                ("compressionForce", p.compression_force),
            ],
            OperationParameters::Coating(p) => vec![
                ("sprayRate", p.spray_rate),
                ("bedSpeed", p.bed_speed),
                ("atomizationPressure", p.atomization_pressure),
            ],
            OperationParameters::Blending(p) => vec![
                ("blendingTime", p.blending_time),
                ("blenderSpeed", p.blender_speed),
            ],
            OperationParameters::Milling(p) => vec![
                ("millSpeed", p.mill_speed),
                ("screenSize", p.screen_size),
            ],
            OperationParameters::RollCompaction(p) => vec![
                ("rollForce", p.roll_force),
                ("rollSpeed", p.roll_speed),
                ("gapSize", p.gap_size),
            ],
            OperationParameters::Unmodelled { .. } | OperationParameters::Unrecognized { .. } => {
                Vec::new()
            }
        };

        fields
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect()
    }
}

// ==========================================
// ProcessInput - 校验后的计算输入
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInput {
    pub product_name: String,
    pub category: ScaleCategory,
    pub scale_selection: ScaleSelection,
    pub strength: f64,
    #[serde(default)]
    pub market: Option<Market>,
    #[serde(default)]
    pub vertical: Option<Vertical>,
    pub operation: OperationParameters,
}

impl ProcessInput {
    /// 创建输入 (市场/剂型缺省)
    pub fn new(
        product_name: impl Into<String>,
        category: ScaleCategory,
        scale_selection: ScaleSelection,
        strength: f64,
        operation: OperationParameters,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            category,
            scale_selection,
            strength,
            market: None,
            vertical: None,
            operation,
        }
    }

    pub fn with_market(mut self, market: Market) -> Self {
        self.market = Some(market);
        self
    }

    pub fn with_vertical(mut self, vertical: Vertical) -> Self {
        self.vertical = Some(vertical);
        self
    }
}
