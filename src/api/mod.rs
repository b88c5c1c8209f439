// ==========================================
// 调查元数据校验系统 - API 层
// ==========================================
// 职责: 对外校验接口（供 CLI 及嵌入方调用）
// ==========================================

pub mod error;
pub mod validation_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use validation_api::ValidationApi;
