// ==========================================
// 调查元数据校验系统 - 工作表分派器
// ==========================================
// 流程: 空表检查（致命, 提前返回）→ 表头检查（非致命）→ 按 SheetKind 分派规则集
// ==========================================

use crate::config::RuleLimits;
use crate::domain::{Severity, Sheet, SheetKind, Violation};
use crate::engine::rules::{
    access_sheet, designation_mapping, question_master, survey_master, HEADER_ROW,
};
use tracing::{debug, warn};

pub const EMPTY_SHEET_RULE: &str = "SHEET_EMPTY_001";
pub const HEADERS_RULE: &str = "HEADERS_001";

pub struct SheetDispatcher<'a> {
    limits: &'a RuleLimits,
}

impl<'a> SheetDispatcher<'a> {
    pub fn new(limits: &'a RuleLimits) -> Self {
        Self { limits }
    }

    pub fn dispatch(&self, sheet: &Sheet) -> Vec<Violation> {
        let name = sheet.trimmed_name();

        if sheet.is_empty() {
            debug!(sheet = name, "工作表为空，跳过后续检查");
            return vec![sheet_violation(
                name,
                None,
                EMPTY_SHEET_RULE,
                format!("Sheet '{}' is empty", name),
            )];
        }

        let mut violations = Vec::new();

        if sheet.header_row.iter().all(|header| header.trim().is_empty()) {
            violations.push(sheet_violation(
                name,
                Some(HEADER_ROW),
                HEADERS_RULE,
                format!("Sheet '{}' has no header row", name),
            ));
        }

        let kind = SheetKind::from_name(name);
        debug!(
            sheet = name,
            kind = %kind,
            rows = sheet.data_rows.len(),
            "分派工作表规则集"
        );

        let sheet_violations = match kind {
            SheetKind::DesignationMapping => designation_mapping::validate(sheet, self.limits),
            SheetKind::SurveyMaster => survey_master::validate(sheet, self.limits),
            SheetKind::QuestionMaster => question_master::validate(sheet, self.limits),
            SheetKind::AccessSheet => access_sheet::validate(sheet, self.limits),
            SheetKind::Unrecognized => {
                warn!(sheet = name, "未识别的工作表，不执行规则集");
                Vec::new()
            }
        };

        violations.extend(sheet_violations);
        violations
    }
}

fn sheet_violation(sheet: &str, row: Option<usize>, rule: &str, message: String) -> Violation {
    Violation {
        id: String::new(),
        sheet: sheet.to_string(),
        row,
        column: String::new(),
        field: "Sheet".to_string(),
        message,
        severity: Severity::Error,
        rule: rule.to_string(),
    }
}
