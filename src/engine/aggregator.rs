// ==========================================
// 调查元数据校验系统 - 违规汇总器
// ==========================================
// 职责: 按级别计数 + 按工作表分组; 不做任何规则判断
// ==========================================

use crate::domain::{Severity, Summary, Violation};

pub struct Aggregator;

impl Aggregator {
    /// 汇总违规列表（Info 级不计入错误/警告）
    pub fn summarize(violations: &[Violation]) -> Summary {
        let mut summary = Summary::default();

        for violation in violations {
            match violation.severity {
                Severity::Error => {
                    summary.total_errors += 1;
                    *summary
                        .errors_by_sheet
                        .entry(violation.sheet.clone())
                        .or_insert(0) += 1;
                }
                Severity::Warning => {
                    summary.total_warnings += 1;
                    *summary
                        .warnings_by_sheet
                        .entry(violation.sheet.clone())
                        .or_insert(0) += 1;
                }
                Severity::Info => {}
            }
        }

        summary
    }

    /// 分配运行内唯一 ID: {sheet}-{row}-{rule}-{序号}
    pub fn assign_ids(violations: &mut [Violation]) {
        for (ordinal, violation) in violations.iter_mut().enumerate() {
            violation.id = format!(
                "{}-{}-{}-{}",
                violation.sheet,
                violation.row.unwrap_or(0),
                violation.rule,
                ordinal + 1
            );
        }
    }
}
