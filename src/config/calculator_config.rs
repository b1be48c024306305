use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 计算器配置（持久化对象）
///
/// 存储位置：JSON 文件（见 ConfigManager）；缺失字段取默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// 缺省字段的基准值
    pub baselines: BaselineDefaults,

    /// 推荐值上限（参数名 → 上限），超出时生成设备极限提醒
    pub parameter_ceilings: BTreeMap<String, f64>,

    /// 放大倍数告警阈值（超过时建议增加中间放大步骤）
    pub high_scale_factor_threshold: f64,

    /// 提示信息语言（en / zh-CN）
    pub locale: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        let mut parameter_ceilings = BTreeMap::new();
        parameter_ceilings.insert("Mill Speed".to_string(), 8000.0);

        Self {
            baselines: BaselineDefaults::default(),
            parameter_ceilings,
            high_scale_factor_threshold: 20.0,
            locale: "en".to_string(),
        }
    }
}

/// 基准值（字段缺失时的默认当前值）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineDefaults {
    /// 制粒喷液速率 (g/min)
    pub granulation_spray_rate: f64,
    /// 进风温度 (°C)
    pub inlet_temp: f64,
    /// 锅转速 (RPM)
    pub pan_speed: f64,
    /// 转台转速 (RPM)
    pub turret_speed: f64,
    /// 主压力 (kN)
    pub compression_force: f64,
    /// 包衣喷液速率 (g/min)
    pub coating_spray_rate: f64,
    /// 包衣锅转速 (RPM)
    pub bed_speed: f64,
    /// 混合时间 (min)
    pub blending_time: f64,
    /// 混合机转速 (RPM)
    pub blender_speed: f64,
    /// 粉碎机转速 (RPM)
    pub mill_speed: f64,
    /// 筛网孔径 (microns)
    pub screen_size: f64,
    /// 辊压力 (kN/cm)
    pub roll_force: f64,
    /// 辊转速 (RPM)
    pub roll_speed: f64,
}

impl Default for BaselineDefaults {
    fn default() -> Self {
        Self {
            granulation_spray_rate: 100.0,
            inlet_temp: 60.0,
            pan_speed: 10.0,
            turret_speed: 25.0,
            compression_force: 15.0,
            coating_spray_rate: 120.0,
            bed_speed: 8.0,
            blending_time: 15.0,
            blender_speed: 20.0,
            mill_speed: 3000.0,
            screen_size: 500.0,
            roll_force: 10.0,
            roll_speed: 5.0,
        }
    }
}

impl BaselineDefaults {
    /// 全部基准值 (名称, 值)，用于配置校验
    pub fn entries(&self) -> [(&'static str, f64); 13] {
        [
            ("granulation_spray_rate", self.granulation_spray_rate),
            ("inlet_temp", self.inlet_temp),
            ("pan_speed", self.pan_speed),
            ("turret_speed", self.turret_speed),
            ("compression_force", self.compression_force),
            ("coating_spray_rate", self.coating_spray_rate),
            ("bed_speed", self.bed_speed),
            ("blending_time", self.blending_time),
            ("blender_speed", self.blender_speed),
            ("mill_speed", self.mill_speed),
            ("screen_size", self.screen_size),
            ("roll_force", self.roll_force),
            ("roll_speed", self.roll_speed),
        ]
    }

    /// 按键取基准值
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries()
            .into_iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
    }
}
