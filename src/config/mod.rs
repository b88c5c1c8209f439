// ==========================================
// 调查元数据校验系统 - 配置层
// ==========================================
// 职责: 规则阈值 / 解析选项 / 导出选项
// 存储: JSON 文件（可选）, 缺省使用内置默认值
// ==========================================

pub mod config_manager;
pub mod validator_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigError, ConfigManager, ConfigResult, CONFIG_PATH_ENV};
pub use validator_config::{ExportConfig, ParserConfig, RuleLimits, ValidatorConfig};
