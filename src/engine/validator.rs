// ==========================================
// 调查元数据校验系统 - 校验引擎入口
// ==========================================
// 流程: 文档结构校验 → 逐表分派 → ID 分配 → 汇总
// 红线: 纯函数; 无 I/O, 无跨调用共享状态
// ==========================================

use crate::config::RuleLimits;
use crate::domain::{TabularDocument, ValidationOutcome};
use crate::engine::aggregator::Aggregator;
use crate::engine::dispatcher::SheetDispatcher;
use crate::engine::structure::StructureValidator;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    limits: RuleLimits,
}

impl ValidationEngine {
    pub fn new(limits: RuleLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &RuleLimits {
        &self.limits
    }

    /// 校验整份文档
    pub fn validate(&self, document: &TabularDocument) -> ValidationOutcome {
        let mut violations = StructureValidator::validate(document);

        let dispatcher = SheetDispatcher::new(&self.limits);
        for sheet in &document.sheets {
            violations.extend(dispatcher.dispatch(sheet));
        }

        Aggregator::assign_ids(&mut violations);
        let summary = Aggregator::summarize(&violations);

        debug!(
            sheets = document.sheets.len(),
            violations = violations.len(),
            errors = summary.total_errors,
            warnings = summary.total_warnings,
            "文档校验完成"
        );

        ValidationOutcome {
            violations,
            summary,
        }
    }
}

/// 使用默认阈值校验
pub fn validate(document: &TabularDocument) -> ValidationOutcome {
    ValidationEngine::default().validate(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CellValue, Sheet};

    #[test]
    fn test_empty_document() {
        let outcome = validate(&TabularDocument::default());
        assert_eq!(outcome.summary.total_errors, 5);
        assert_eq!(outcome.summary.errors_by_sheet["File Structure"], 5);
    }

    #[test]
    fn test_deterministic() {
        let doc = TabularDocument::new(vec![Sheet::new(
            "Access Sheet",
            vec!["Status".to_string()],
            vec![vec![CellValue::text(" Active")]],
        )]);
        let first = validate(&doc);
        let second = validate(&doc);
        assert_eq!(first, second);
    }

    #[test]
    fn test_ids_unique() {
        let doc = TabularDocument::new(vec![Sheet::new("Survey Master", vec![], vec![])]);
        let outcome = validate(&doc);
        let mut ids: Vec<_> = outcome.violations.iter().map(|v| v.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), outcome.violations.len());
    }
}
