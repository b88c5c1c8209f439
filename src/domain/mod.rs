// ==========================================
// 调查元数据校验系统 - 领域模型层
// ==========================================
// 职责: 定义表格文档、违规记录、汇总等领域实体
// 红线: 不含文件读取逻辑,不含规则逻辑
// ==========================================

pub mod document;
pub mod types;
pub mod violation;

// 重导出核心类型
pub use document::{CellValue, Sheet, TabularDocument};
pub use types::{Severity, SheetKind, FILE_STRUCTURE_SHEET};
pub use violation::{Summary, ValidationOutcome, ValidationReport, Violation};
