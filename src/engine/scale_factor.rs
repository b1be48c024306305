// ==========================================
// 放大预测系统 - 放大倍数
// ==========================================
// 复合放大倍数 = 类别基础倍数 × 目标规模乘数
// 类别: Lab→Pilot=10, Pilot→Plant1=5, Plant1→Plant2=2
// 规模: Scale2=1.0, Scale3=1.5, Scale4=2.0
// ==========================================

use crate::domain::types::{ScaleCategory, ScaleSelection};

/// 计算复合放大倍数
pub fn composite_scale_factor(category: ScaleCategory, selection: ScaleSelection) -> f64 {
    category.base_factor() * selection.multiplier()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lab_to_pilot_scale2_is_ten() {
        assert_eq!(
            composite_scale_factor(ScaleCategory::LabToPilot, ScaleSelection::Scale2),
            10.0
        );
    }

    #[test]
    fn test_full_matrix() {
        let expected = [
            (ScaleCategory::LabToPilot, [10.0, 15.0, 20.0]),
            (ScaleCategory::PilotToPlant1, [5.0, 7.5, 10.0]),
            (ScaleCategory::Plant1ToPlant2, [2.0, 3.0, 4.0]),
        ];
        for (category, factors) in expected {
            for (selection, factor) in ScaleSelection::ALL.iter().zip(factors) {
                assert_eq!(composite_scale_factor(category, *selection), factor);
            }
        }
    }
}
