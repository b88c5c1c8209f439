// ==========================================
// 调查元数据校验系统 - API层错误类型
// ==========================================
// 职责: 汇总解析/导出/配置/任务调度错误
// 红线: 数据质量问题是 Violation, 不进入 ApiError
// ==========================================

use crate::config::ConfigError;
use crate::export::ExportError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 基础设施错误
    // ==========================================
    #[error("文件解析失败: {0}")]
    ImportError(#[from] ImportError),

    #[error("报告导出失败: {0}")]
    ExportError(#[from] ExportError),

    #[error("配置错误: {0}")]
    ConfigError(#[from] ConfigError),

    // ==========================================
    // 调度错误
    // ==========================================
    #[error("后台校验任务失败: {0}")]
    TaskJoinError(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<tokio::task::JoinError>
impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::TaskJoinError(err.to_string())
    }
}

impl ApiError {
    /// 是否为文件解析失败（CLI 据此返回退出码 2）
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, ApiError::ImportError(_))
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_conversion() {
        let err: ApiError = ImportError::UnsupportedFormat("json".to_string()).into();
        assert!(err.is_decode_failure());
        assert!(err.to_string().contains("json"));
    }

    #[test]
    fn test_config_error_is_not_decode_failure() {
        let err: ApiError = ConfigError::InvalidValue {
            key: "rules.max_level_occurrences".to_string(),
            message: "must be at least 2".to_string(),
        }
        .into();
        assert!(!err.is_decode_failure());
    }
}
