// ==========================================
// 调查元数据校验系统 - 引擎层
// ==========================================
// 职责: 文档结构校验 / 工作表分派 / 规则集执行 / 违规汇总
// 红线: 引擎不读文件, 数据质量问题只产出 Violation
// ==========================================

pub mod aggregator;
pub mod cell;
pub mod columns;
pub mod dispatcher;
pub mod patterns;
pub mod rules;
pub mod structure;
pub mod validator;

// 重导出核心引擎
pub use aggregator::Aggregator;
pub use cell::{normalize, NormalizedCell};
pub use columns::{ColumnIndex, RowView};
pub use dispatcher::SheetDispatcher;
pub use structure::StructureValidator;
pub use validator::{validate, ValidationEngine};
