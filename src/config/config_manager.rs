// ==========================================
// 放大预测系统 - 配置管理器
// ==========================================
// 职责: 配置文件定位、加载、校验与快照
// 查找顺序: 显式路径 > 环境变量 > 用户配置目录 > 内置默认值
// ==========================================

use crate::config::calculator_config::CalculatorConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 支持的提示信息语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "zh-CN"];

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误 ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: CalculatorConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 使用内置默认配置
    pub fn with_defaults() -> Self {
        Self {
            config: CalculatorConfig::default(),
            source: None,
        }
    }

    /// 从指定 JSON 文件加载
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: CalculatorConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        validate_config(&config)?;

        tracing::info!(path = %path.display(), "已加载计算器配置");
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    /// 按查找顺序加载配置
    ///
    /// # 参数
    /// - explicit: 命令行显式指定的路径（指定但不存在时报错）
    ///
    /// # 说明
    /// 环境变量或默认目录下的文件不存在时回退到内置默认值
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(env_path) = std::env::var(config_keys::ENV_CONFIG_PATH) {
            let path = PathBuf::from(env_path.trim());
            if path.exists() {
                return Self::from_file(&path);
            }
            tracing::warn!(path = %path.display(), "环境变量指定的配置文件不存在, 使用默认配置");
        } else if let Some(path) = default_config_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        tracing::debug!("未找到配置文件, 使用内置默认配置");
        Ok(Self::with_defaults())
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn into_config(self) -> CalculatorConfig {
        self.config
    }

    /// 配置来源文件（默认配置时为 None）
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 覆写提示信息语言
    pub fn set_locale(&mut self, locale: &str) -> Result<(), ConfigError> {
        check_locale(locale)?;
        self.config.locale = locale.to_string();
        Ok(())
    }

    /// 获取配置快照（JSON格式）
    ///
    /// 快照可直接作为配置文件重新加载
    pub fn get_config_snapshot(&self) -> Result<String, ConfigError> {
        serde_json::to_string(&self.config).map_err(|source| ConfigError::Parse {
            path: "<snapshot>".to_string(),
            source,
        })
    }
}

/// 默认配置文件路径: <config_dir>/scaleup-predictor/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scaleup-predictor").join("config.json"))
}

/// 校验配置取值
pub fn validate_config(config: &CalculatorConfig) -> Result<(), ConfigError> {
    for (key, value) in config.baselines.entries() {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: format!("{}.{}", config_keys::BASELINES, key),
                message: format!("基准值必须为非负有限数, 实际 {}", value),
            });
        }
    }

    for (name, ceiling) in &config.parameter_ceilings {
        if !ceiling.is_finite() || *ceiling <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: format!("{}.{}", config_keys::PARAMETER_CEILINGS, name),
                message: format!("上限必须为正数, 实际 {}", ceiling),
            });
        }
    }

    if !config.high_scale_factor_threshold.is_finite() || config.high_scale_factor_threshold <= 0.0
    {
        return Err(ConfigError::InvalidValue {
            key: config_keys::HIGH_SCALE_FACTOR_THRESHOLD.to_string(),
            message: format!("阈值必须为正数, 实际 {}", config.high_scale_factor_threshold),
        });
    }

    check_locale(&config.locale)
}

fn check_locale(locale: &str) -> Result<(), ConfigError> {
    if SUPPORTED_LOCALES.contains(&locale) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: config_keys::LOCALE.to_string(),
            message: format!("不支持的语言: {} (支持: {})", locale, SUPPORTED_LOCALES.join(", ")),
        })
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    pub const BASELINES: &str = "baselines";
    pub const PARAMETER_CEILINGS: &str = "parameter_ceilings";
    pub const HIGH_SCALE_FACTOR_THRESHOLD: &str = "high_scale_factor_threshold";
    pub const LOCALE: &str = "locale";

    // 环境变量
    pub const ENV_CONFIG_PATH: &str = "SCALEUP_PREDICTOR_CONFIG";
}
