// ==========================================
// 调查元数据校验系统 - 核心库
// ==========================================
// 输入: 调查元数据表格（Excel / CSV）
// 输出: 违规清单 + 按工作表汇总
// 红线: 数据质量问题只产出 Violation; 解析失败才返回错误
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 文档 / 违规 / 汇总
pub mod domain;

// 引擎层 - 规则校验
pub mod engine;

// 导入层 - 文件解析
pub mod importer;

// 导出层 - 报告输出
pub mod export;

// 配置层 - 规则阈值与选项
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 对外接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    CellValue, Severity, Sheet, SheetKind, Summary, TabularDocument, ValidationOutcome,
    ValidationReport, Violation,
};

// 引擎
pub use engine::{validate, ValidationEngine};

// API
pub use api::{ApiError, ApiResult, ValidationApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Survey Sheet Validator";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
