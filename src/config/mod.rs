// ==========================================
// 放大预测系统 - 配置层
// ==========================================
// 职责: 基准值、上限、阈值与语言配置
// 存储: JSON 配置文件
// ==========================================

pub mod calculator_config;
pub mod config_manager;

// 重导出核心配置管理器
pub use calculator_config::{BaselineDefaults, CalculatorConfig};
pub use config_manager::{config_keys, default_config_path, ConfigError, ConfigManager};
