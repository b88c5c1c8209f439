use serde::{Deserialize, Serialize};

/// 校验系统配置（JSON 文件 / 环境变量指定路径）
///
/// 所有分节都带 `#[serde(default)]`，缺省值即固定业务规则的取值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ValidatorConfig {
    /// 规则阈值
    #[serde(default)]
    pub rules: RuleLimits,

    /// 文件解析选项
    #[serde(default)]
    pub parser: ParserConfig,

    /// 报告导出选项
    #[serde(default)]
    pub export: ExportConfig,
}

/// 规则阈值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleLimits {
    /// Survey Description 最大词数
    pub survey_description_max_words: usize,

    /// Question_Description_Optional 最大字符数
    pub question_description_max_chars: usize,

    /// 同一 Hierarchical Level 最多出现次数（Designation Mapping）
    pub max_level_occurrences: usize,
}

impl Default for RuleLimits {
    fn default() -> Self {
        Self {
            survey_description_max_words: 60,
            question_description_max_chars: 256,
            max_level_occurrences: 2,
        }
    }
}

/// 文件解析选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Excel 日期单元格渲染格式（chrono 格式串）
    pub datetime_format: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            datetime_format: "%d/%m/%Y %H:%M:%S".to_string(),
        }
    }
}

/// 报告导出选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// 分隔符（单字节）
    pub delimiter: char,

    /// 是否在明细后追加汇总块
    pub include_summary: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            include_summary: true,
        }
    }
}

impl ExportConfig {
    /// csv crate 需要的单字节分隔符; 非 ASCII 字符回退为逗号
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            b','
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_business_rules() {
        let config = ValidatorConfig::default();
        assert_eq!(config.rules.survey_description_max_words, 60);
        assert_eq!(config.rules.question_description_max_chars, 256);
        assert_eq!(config.rules.max_level_occurrences, 2);
        assert_eq!(config.parser.datetime_format, "%d/%m/%Y %H:%M:%S");
        assert_eq!(config.export.delimiter_byte(), b',');
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ValidatorConfig =
            serde_json::from_str(r#"{"export": {"delimiter": ";"}}"#).unwrap();
        assert_eq!(config.export.delimiter_byte(), b';');
        assert!(config.export.include_summary);
        assert_eq!(config.rules, RuleLimits::default());
    }

    #[test]
    fn test_non_ascii_delimiter_falls_back() {
        let export = ExportConfig {
            delimiter: '，',
            include_summary: true,
        };
        assert_eq!(export.delimiter_byte(), b',');
    }
}
