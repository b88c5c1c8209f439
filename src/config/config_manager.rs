// ==========================================
// 调查元数据校验系统 - 配置管理器
// ==========================================
// 职责: 配置加载（JSON 文件 / 环境变量 / 默认值）
// 优先级: 显式路径 > SURVEY_VALIDATOR_CONFIG > 内置默认
// ==========================================

use crate::config::validator_config::ValidatorConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置路径环境变量
pub const CONFIG_PATH_ENV: &str = "SURVEY_VALIDATOR_CONFIG";

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    config: ValidatorConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 使用内置默认配置
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// 从 JSON 文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut manager = Self::from_json_str(&raw)?;
        manager.source = Some(path.to_path_buf());
        info!(path = %path.display(), "配置文件加载完成");
        Ok(manager)
    }

    /// 从 JSON 字符串加载（缺失的键使用默认值）
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: ValidatorConfig = serde_json::from_str(raw)?;
        validate_config(&config)?;
        Ok(Self {
            config,
            source: None,
        })
    }

    /// 读取 SURVEY_VALIDATOR_CONFIG; 未设置时使用默认配置
    pub fn from_env_or_default() -> ConfigResult<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()),
            _ => {
                debug!("未设置 {}，使用默认配置", CONFIG_PATH_ENV);
                Ok(Self::with_defaults())
            }
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn into_config(self) -> ValidatorConfig {
        self.config
    }

    /// 配置来源文件（默认配置为 None）
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 当前配置快照（JSON）
    pub fn snapshot(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(&self.config)?)
    }
}

/// 阈值必须为正; 每级出现次数上限不低于 2
fn validate_config(config: &ValidatorConfig) -> ConfigResult<()> {
    let rules = &config.rules;
    if rules.survey_description_max_words == 0 {
        return Err(ConfigError::InvalidValue {
            key: format!("{}.{}", config_keys::RULES, config_keys::SURVEY_DESCRIPTION_MAX_WORDS),
            message: "必须大于 0".to_string(),
        });
    }
    if rules.question_description_max_chars == 0 {
        return Err(ConfigError::InvalidValue {
            key: format!("{}.{}", config_keys::RULES, config_keys::QUESTION_DESCRIPTION_MAX_CHARS),
            message: "必须大于 0".to_string(),
        });
    }
    if rules.max_level_occurrences < 2 {
        return Err(ConfigError::InvalidValue {
            key: format!("{}.{}", config_keys::RULES, config_keys::MAX_LEVEL_OCCURRENCES),
            message: "必须 >= 2（同级别允许双语两条）".to_string(),
        });
    }
    if !config.export.delimiter.is_ascii() {
        return Err(ConfigError::InvalidValue {
            key: format!("{}.{}", config_keys::EXPORT, config_keys::DELIMITER),
            message: format!("分隔符必须是 ASCII 字符: {:?}", config.export.delimiter),
        });
    }
    Ok(())
}

pub mod config_keys {
    // 分节
    pub const RULES: &str = "rules";
    pub const PARSER: &str = "parser";
    pub const EXPORT: &str = "export";

    // 规则阈值
    pub const SURVEY_DESCRIPTION_MAX_WORDS: &str = "survey_description_max_words";
    pub const QUESTION_DESCRIPTION_MAX_CHARS: &str = "question_description_max_chars";
    pub const MAX_LEVEL_OCCURRENCES: &str = "max_level_occurrences";

    // 解析
    pub const DATETIME_FORMAT: &str = "datetime_format";

    // 导出
    pub const DELIMITER: &str = "delimiter";
    pub const INCLUDE_SUMMARY: &str = "include_summary";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_json_str_defaults() {
        let manager = ConfigManager::from_json_str("{}").unwrap();
        assert_eq!(manager.config(), &ValidatorConfig::default());
        assert!(manager.source().is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"{{"rules": {{"survey_description_max_words": 80}}, "parser": {{"datetime_format": "%Y-%m-%d"}}}}"#
        )
        .unwrap();

        let manager = ConfigManager::load(temp_file.path()).unwrap();
        assert_eq!(manager.config().rules.survey_description_max_words, 80);
        assert_eq!(manager.config().rules.question_description_max_chars, 256);
        assert_eq!(manager.config().parser.datetime_format, "%Y-%m-%d");
        assert_eq!(manager.source(), Some(temp_file.path()));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConfigManager::load("non_existent_config.json");
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = ConfigManager::from_json_str(r#"{"rules": {"max_level_occurrences": 1}}"#);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

        let result = ConfigManager::from_json_str(r#"{"rules": "oops"}"#);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_snapshot_contains_keys() {
        let snapshot = ConfigManager::with_defaults().snapshot().unwrap();
        assert!(snapshot.contains(config_keys::SURVEY_DESCRIPTION_MAX_WORDS));
        assert!(snapshot.contains(config_keys::DELIMITER));
    }
}
