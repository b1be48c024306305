// ==========================================
// 放大预测系统 - 字段映射器实现
// ==========================================
// 职责: 源列名 → ProcessRecord 字段 + 数值转换
// 列名匹配忽略大小写、空格、下划线和连字符
// (productName / product_name / "Product Name" 等价)
// ==========================================

use crate::domain::process::ProcessRecord;
use crate::domain::types::normalize_label;
use crate::importer::error::{FieldConversionFailure, ImportError, ImportResult};
use crate::importer::file_parser::RawRow;
use std::collections::HashMap;

pub struct FieldMapper;

impl FieldMapper {
    /// 将原始行映射为 ProcessRecord
    ///
    /// # 参数
    /// - row: 原始行
    /// - row_number: 行号（用于错误定位）
    ///
    /// # 返回
    /// - Err(TypeConversionError): 带全部无法解析的数值字段
    pub fn map_to_record(&self, row: &RawRow, row_number: usize) -> ImportResult<ProcessRecord> {
        let (record, failures) = self.map_collecting(row);
        if failures.is_empty() {
            Ok(record)
        } else {
            Err(ImportError::TypeConversionError {
                row: row_number,
                failures,
            })
        }
    }

    /// 映射并收集全部数值转换失败; 失败字段在记录中视为缺失
    pub fn map_collecting(&self, row: &RawRow) -> (ProcessRecord, Vec<FieldConversionFailure>) {
        let row: HashMap<String, &str> = row
            .iter()
            .map(|(k, v)| (normalize_label(k), v.trim()))
            .collect();
        let mut failures = Vec::new();
        let mut num = |field: &'static str| parse_f64(&row, field, &mut failures);

        let record = ProcessRecord {
            product_name: get_string(&row, &["productname", "product"]),
            unit_operation: get_string(&row, &["unitoperation", "operation"]),
            category: get_string(&row, &["category", "scalecategory"]),
            strength: num("strength"),
            vertical: get_string(&row, &["vertical"]),
            market: get_string(&row, &["market"]),
            scale_selection: get_string(&row, &["scaleselection", "targetscale", "scale"]),

            spray_rate: num("sprayRate"),
            binder_percentage: num("binderPercentage"),
            inlet_temp: num("inletTemp"),
            outlet_temp: num("outletTemp"),
            pan_speed: num("panSpeed"),
            nozzle_position: num("nozzlePosition"),

            turret_speed: num("turretSpeed"),
            number_of_punches: num("numberOfPunches"),
            compression_force: num("compressionForce"),

            bed_speed: num("bedSpeed"),
            atomization_pressure: num("atomizationPressure"),

            blending_time: num("blendingTime"),
            blender_speed: num("blenderSpeed"),

            mill_speed: num("millSpeed"),
            screen_size: num("screenSize"),

            roll_force: num("rollForce"),
            roll_speed: num("rollSpeed"),
            gap_size: num("gapSize"),
        };

        (record, failures)
    }
}

/// 提取字符串字段, 支持多个候选列名（别名）
fn get_string(row: &HashMap<String, &str>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| row.get(*key))
        .find(|v| !v.is_empty())
        .map(|v| v.to_string())
}

/// 解析数值字段; 空值返回 None, 解析失败记入 failures
fn parse_f64(
    row: &HashMap<String, &str>,
    field: &'static str,
    failures: &mut Vec<FieldConversionFailure>,
) -> Option<f64> {
    let value = row.get(&normalize_label(field)).filter(|v| !v.is_empty())?;
    match value.parse::<f64>() {
        Ok(n) => Some(n),
        Err(e) => {
            failures.push(FieldConversionFailure {
                field: field.to_string(),
                message: format!("无法解析数值 '{}': {}", value, e),
            });
            None
        }
    }
}
