// ==========================================
// 放大预测系统 - 预测结果模型
// ==========================================
// RecommendedParameter: 单个推荐参数 (不可变)
// PredictionOutput: 单次计算的完整结果
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// 超过该量级时两位小数已无意义, 原值返回
const ROUNDING_LIMIT: f64 = 1.0e15;

/// 保留两位小数
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() || value.abs() >= ROUNDING_LIMIT {
        return value;
    }
    (value * 100.0).round() / 100.0
}

// ==========================================
// RecommendedParameter - 推荐参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedParameter {
    name: String,
    current_value: f64,
    recommended_value: f64,
    unit: String,
    formula: String,
}

impl RecommendedParameter {
    /// 创建推荐参数, 推荐值按两位小数取整
    pub fn new(
        name: impl Into<String>,
        current_value: f64,
        recommended_value: f64,
        unit: impl Into<String>,
        formula: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            current_value,
            recommended_value: round2(recommended_value),
            unit: unit.into(),
            formula: formula.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub fn recommended_value(&self) -> f64 {
        self.recommended_value
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// 推荐值的显示文本 (两位小数)
    pub fn recommended_display(&self) -> String {
        format!("{:.2}", self.recommended_value)
    }
}

// ==========================================
// PredictionOutput - 预测结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionOutput {
    pub target_scale: String,
    pub scale_factor: f64,
    pub recommended_parameters: Vec<RecommendedParameter>,
    pub constraints: Vec<String>,
}

impl PredictionOutput {
    /// 按名称查找推荐参数
    pub fn parameter(&self, name: &str) -> Option<&RecommendedParameter> {
        self.recommended_parameters.iter().find(|p| p.name == name)
    }

    /// 柱状图数据: (参数名, 当前值, 推荐值)
    pub fn chart_series(&self) -> Vec<(String, f64, f64)> {
        self.recommended_parameters
            .iter()
            .map(|p| (p.name.clone(), p.current_value, p.recommended_value))
            .collect()
    }

    /// 渲染为纯文本表格 (Parameter / Current / Recommended / Unit)
    pub fn to_table(&self) -> String {
        let headers = ["Parameter", "Current", "Recommended", "Unit"];
        let rows: Vec<[String; 4]> = self
            .recommended_parameters
            .iter()
            .map(|p| {
                [
                    p.name.clone(),
                    format!("{}", p.current_value),
                    p.recommended_display(),
                    p.unit.clone(),
                ]
            })
            .collect();

        let mut widths = headers.map(|h| h.chars().count());
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let _ = writeln!(
            out,
            "Target scale: {} (scale factor {:.2})",
            self.target_scale, self.scale_factor
        );
        push_row(&mut out, &headers.map(String::from), &widths);
        let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let _ = writeln!(out, "{}", separator.join("-+-"));
        if rows.is_empty() {
            let _ = writeln!(out, "(no recommended parameters)");
        }
        for row in &rows {
            push_row(&mut out, row, &widths);
        }
        for constraint in &self.constraints {
            let _ = writeln!(out, "! {}", constraint);
        }
        out
    }
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, w)| {
            let pad = w.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}
