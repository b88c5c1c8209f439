// ==========================================
// 调查元数据校验系统 - 工作表规则集
// ==========================================
// 每个规则集: (&Sheet, &RuleLimits) -> Vec<Violation>, 无共享状态
// ==========================================

pub mod access_sheet;
pub mod common;
pub mod designation_mapping;
pub mod question_master;
pub mod survey_master;

pub use common::{SheetContext, HEADER_ROW, WHITESPACE_RULE};
