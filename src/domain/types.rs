// ==========================================
// 放大预测系统 - 领域类型定义
// ==========================================
// 枚举值的显示标签与表单提交的标签保持一致
// 解析时同时接受原始标签与 ASCII 别名 (如 "Lab->Pilot" / "LAB_PILOT")
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 标签归一化: 仅保留 ASCII 字母数字并转小写
///
/// "Lab → Pilot" / "LAB_PILOT" / "lab-pilot" 均归一化为 "labpilot"
pub(crate) fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

// ==========================================
// 单元操作 (Unit Operation)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitOperation {
    #[serde(rename = "Top Spray Granulation")]
    TopSprayGranulation,
    #[serde(rename = "Wet Granulation")]
    WetGranulation,
    #[serde(rename = "Compression")]
    Compression,
    #[serde(rename = "Coating")]
    Coating,
    #[serde(rename = "Blending")]
    Blending,
    #[serde(rename = "Milling")]
    Milling,
    #[serde(rename = "Bottom Spray Granulation (Wurster)")]
    BottomSprayGranulation,
    #[serde(rename = "Roll Compaction")]
    RollCompaction,
    #[serde(rename = "Drying")]
    Drying,
    #[serde(rename = "Sifting")]
    Sifting,
    #[serde(rename = "Capsule Filling")]
    CapsuleFilling,
    #[serde(rename = "Powder Layering")]
    PowderLayering,
    #[serde(rename = "Hot Melt Extrusion")]
    HotMeltExtrusion,
    #[serde(rename = "Extrusion/Spheronization")]
    ExtrusionSpheronization,
}

impl UnitOperation {
    /// 全部单元操作 (按表单下拉顺序)
    pub const ALL: [UnitOperation; 14] = [
        UnitOperation::TopSprayGranulation,
        UnitOperation::WetGranulation,
        UnitOperation::Compression,
        UnitOperation::Coating,
        UnitOperation::Blending,
        UnitOperation::Milling,
        UnitOperation::BottomSprayGranulation,
        UnitOperation::RollCompaction,
        UnitOperation::Drying,
        UnitOperation::Sifting,
        UnitOperation::CapsuleFilling,
        UnitOperation::PowderLayering,
        UnitOperation::HotMeltExtrusion,
        UnitOperation::ExtrusionSpheronization,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            UnitOperation::TopSprayGranulation => "Top Spray Granulation",
            UnitOperation::WetGranulation => "Wet Granulation",
            UnitOperation::Compression => "Compression",
            UnitOperation::Coating => "Coating",
            UnitOperation::Blending => "Blending",
            UnitOperation::Milling => "Milling",
            UnitOperation::BottomSprayGranulation => "Bottom Spray Granulation (Wurster)",
            UnitOperation::RollCompaction => "Roll Compaction",
            UnitOperation::Drying => "Drying",
            UnitOperation::Sifting => "Sifting",
            UnitOperation::CapsuleFilling => "Capsule Filling",
            UnitOperation::PowderLayering => "Powder Layering",
            UnitOperation::HotMeltExtrusion => "Hot Melt Extrusion",
            UnitOperation::ExtrusionSpheronization => "Extrusion/Spheronization",
        }
    }

    /// 是否存在放大模型
    ///
    /// Drying / Capsule Filling / Hot Melt Extrusion / Extrusion-Spheronization
    /// 目前只能录入, 不产出推荐参数
    pub fn is_modelled(&self) -> bool {
        !matches!(
            self,
            UnitOperation::Drying
                | UnitOperation::CapsuleFilling
                | UnitOperation::HotMeltExtrusion
                | UnitOperation::ExtrusionSpheronization
        )
    }
}

impl fmt::Display for UnitOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for UnitOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_label(s);
        if key == "wurster" || key == "bottomspray" {
            return Ok(UnitOperation::BottomSprayGranulation);
        }
        UnitOperation::ALL
            .iter()
            .copied()
            .find(|op| normalize_label(op.label()) == key)
            .ok_or_else(|| format!("未知单元操作: {}", s.trim()))
    }
}

// ==========================================
// 放大类别 (Scale Category)
// ==========================================
// 基础放大倍数: Lab→Pilot=10, Pilot→Plant1=5, Plant1→Plant2=2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleCategory {
    #[serde(rename = "Lab → Pilot", alias = "LAB_PILOT")]
    LabToPilot,
    #[serde(rename = "Pilot → Plant 1", alias = "PILOT_PLANT1")]
    PilotToPlant1,
    #[serde(rename = "Plant 1 → Plant 2", alias = "PLANT1_PLANT2")]
    Plant1ToPlant2,
}

impl ScaleCategory {
    pub const ALL: [ScaleCategory; 3] = [
        ScaleCategory::LabToPilot,
        ScaleCategory::PilotToPlant1,
        ScaleCategory::Plant1ToPlant2,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScaleCategory::LabToPilot => "Lab → Pilot",
            ScaleCategory::PilotToPlant1 => "Pilot → Plant 1",
            ScaleCategory::Plant1ToPlant2 => "Plant 1 → Plant 2",
        }
    }

    /// 基础放大倍数
    pub fn base_factor(&self) -> f64 {
        match self {
            ScaleCategory::LabToPilot => 10.0,
            ScaleCategory::PilotToPlant1 => 5.0,
            ScaleCategory::Plant1ToPlant2 => 2.0,
        }
    }
}

impl fmt::Display for ScaleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ScaleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_label(s);
        ScaleCategory::ALL
            .iter()
            .copied()
            .find(|c| normalize_label(c.label()) == key)
            .ok_or_else(|| format!("未知放大类别: {}", s.trim()))
    }
}

// ==========================================
// 目标规模 (Scale Selection)
// ==========================================
// 在类别倍数之上的附加乘数: Scale2=1.0, Scale3=1.5, Scale4=2.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleSelection {
    #[serde(rename = "Scale 2", alias = "SCALE2")]
    Scale2,
    #[serde(rename = "Scale 3", alias = "SCALE3")]
    Scale3,
    #[serde(rename = "Scale 4", alias = "SCALE4")]
    Scale4,
}

impl ScaleSelection {
    pub const ALL: [ScaleSelection; 3] = [
        ScaleSelection::Scale2,
        ScaleSelection::Scale3,
        ScaleSelection::Scale4,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScaleSelection::Scale2 => "Scale 2",
            ScaleSelection::Scale3 => "Scale 3",
            ScaleSelection::Scale4 => "Scale 4",
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            ScaleSelection::Scale2 => 1.0,
            ScaleSelection::Scale3 => 1.5,
            ScaleSelection::Scale4 => 2.0,
        }
    }
}

impl fmt::Display for ScaleSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ScaleSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_label(s);
        ScaleSelection::ALL
            .iter()
            .copied()
            .find(|sel| normalize_label(sel.label()) == key)
            .ok_or_else(|| format!("未知目标规模: {}", s.trim()))
    }
}

// ==========================================
// 目标市场 (Market)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    #[serde(rename = "USA")]
    Usa,
    #[serde(rename = "EU")]
    Eu,
    #[serde(rename = "India")]
    India,
    #[serde(rename = "Other")]
    Other,
}

impl Market {
    pub fn label(&self) -> &'static str {
        match self {
            Market::Usa => "USA",
            Market::Eu => "EU",
            Market::India => "India",
            Market::Other => "Other",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Market {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "usa" | "us" => Ok(Market::Usa),
            "eu" => Ok(Market::Eu),
            "india" | "in" => Ok(Market::India),
            "other" => Ok(Market::Other),
            _ => Err(format!("未知目标市场: {}", s.trim())),
        }
    }
}

// ==========================================
// 剂型 (Vertical)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vertical {
    #[serde(rename = "OSD")]
    Osd,
    #[serde(rename = "Injectable")]
    Injectable,
    #[serde(rename = "Liquid")]
    Liquid,
    #[serde(rename = "Other")]
    Other,
}

impl Vertical {
    pub fn label(&self) -> &'static str {
        match self {
            Vertical::Osd => "OSD",
            Vertical::Injectable => "Injectable",
            Vertical::Liquid => "Liquid",
            Vertical::Other => "Other",
        }
    }
}

impl fmt::Display for Vertical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Vertical {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "osd" => Ok(Vertical::Osd),
            "injectable" => Ok(Vertical::Injectable),
            "liquid" => Ok(Vertical::Liquid),
            "other" => Ok(Vertical::Other),
            _ => Err(format!("未知剂型: {}", s.trim())),
        }
    }
}
