// ==========================================
// 调查元数据校验系统 - 文档结构校验
// ==========================================
// 规则: SHEET_COUNT_001 / SHEET_STRUCTURE_001 / SHEET_STRUCTURE_002
// 红线: 三项检查相互独立, 全部执行, 不短路
// ==========================================

use crate::domain::{Severity, SheetKind, TabularDocument, Violation, FILE_STRUCTURE_SHEET};
use std::collections::HashSet;

pub const SHEET_COUNT_RULE: &str = "SHEET_COUNT_001";
pub const MISSING_SHEET_RULE: &str = "SHEET_STRUCTURE_001";
pub const UNEXPECTED_SHEET_RULE: &str = "SHEET_STRUCTURE_002";

pub struct StructureValidator;

impl StructureValidator {
    pub fn validate(document: &TabularDocument) -> Vec<Violation> {
        let mut violations = Vec::new();
        let expected = SheetKind::expected_count();

        if document.sheets.len() != expected {
            violations.push(document_violation(
                "Sheet Count",
                SHEET_COUNT_RULE,
                format!(
                    "Workbook must contain exactly {} sheets (found {})",
                    expected,
                    document.sheets.len()
                ),
            ));
        }

        let present: HashSet<SheetKind> = document
            .sheets
            .iter()
            .map(|sheet| SheetKind::from_name(&sheet.name))
            .collect();

        for kind in SheetKind::CANONICAL {
            if !present.contains(&kind) {
                let name = kind.canonical_name().unwrap_or_default();
                violations.push(document_violation(
                    name,
                    MISSING_SHEET_RULE,
                    format!("Required sheet '{}' is missing", name),
                ));
            }
        }

        for sheet in &document.sheets {
            if !SheetKind::from_name(&sheet.name).is_canonical() {
                violations.push(document_violation(
                    sheet.trimmed_name(),
                    UNEXPECTED_SHEET_RULE,
                    format!(
                        "Unexpected sheet '{}'; allowed sheets are {}",
                        sheet.trimmed_name(),
                        canonical_list()
                    ),
                ));
            }
        }

        violations
    }
}

fn canonical_list() -> String {
    SheetKind::CANONICAL
        .iter()
        .filter_map(|kind| kind.canonical_name())
        .map(|name| format!("'{}'", name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn document_violation(field: &str, rule: &str, message: String) -> Violation {
    Violation {
        id: String::new(),
        sheet: FILE_STRUCTURE_SHEET.to_string(),
        row: None,
        column: String::new(),
        field: field.to_string(),
        message,
        severity: Severity::Error,
        rule: rule.to_string(),
    }
}
