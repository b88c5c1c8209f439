// ==========================================
// 调查元数据校验系统 - 规则集公共部分
// ==========================================
// 职责: 违规累加器 / 必填列检查 / 首尾空白检查 (U-01)
// ==========================================

use crate::domain::{CellValue, Severity, Sheet, Violation};
use crate::engine::cell::has_outer_whitespace;
use crate::engine::columns::{ColumnIndex, RowView};
use crate::engine::patterns::{describe_choices, is_one_of};

/// 首尾空白规则编码（四个工作表共用）
pub const WHITESPACE_RULE: &str = "U-01";

/// 表头所在的显示行号
pub const HEADER_ROW: usize = 1;

// ==========================================
// SheetContext - 单个工作表的违规累加器
// ==========================================
// 作用域: 一次规则集调用; id 由引擎统一分配
pub struct SheetContext {
    sheet: String,
    violations: Vec<Violation>,
}

impl SheetContext {
    pub fn new(sheet: &Sheet) -> Self {
        Self {
            sheet: sheet.trimmed_name().to_string(),
            violations: Vec::new(),
        }
    }

    /// 记录违规（field 与 column 相同）
    pub fn error(&mut self, row: usize, column: &str, rule: &str, message: impl Into<String>) {
        self.push(Some(row), column, column, Severity::Error, rule, message.into());
    }

    pub fn warning(&mut self, row: usize, column: &str, rule: &str, message: impl Into<String>) {
        self.push(Some(row), column, column, Severity::Warning, rule, message.into());
    }

    pub fn push(
        &mut self,
        row: Option<usize>,
        column: &str,
        field: &str,
        severity: Severity,
        rule: &str,
        message: String,
    ) {
        self.violations.push(Violation {
            id: String::new(),
            sheet: self.sheet.clone(),
            row,
            column: column.to_string(),
            field: field.to_string(),
            message,
            severity,
            rule: rule.to_string(),
        });
    }

    /// 必填列检查: 每缺一列一条表头级错误
    pub fn check_required_columns(
        &mut self,
        columns: &ColumnIndex,
        required: &[&str],
        rule: &str,
    ) {
        for name in columns.missing(required) {
            self.error(
                HEADER_ROW,
                name,
                rule,
                format!("Required column '{}' is missing", name),
            );
        }
    }

    /// 逐单元格检查首尾空白
    pub fn check_whitespace(&mut self, row: &RowView<'_>) {
        for (idx, cell) in row.cells().iter().enumerate() {
            if has_outer_whitespace(cell) {
                let column = row.header_name(idx);
                self.error(
                    row.display_row,
                    &column,
                    WHITESPACE_RULE,
                    format!("'{}' has leading or trailing spaces", column),
                );
            }
        }
    }

    /// 必填字段: 列存在且值为空时报错, 返回是否有值
    pub fn require_value(&mut self, row: &RowView<'_>, column: &str, rule: &str) -> bool {
        if !row.has_column(column) {
            return false;
        }
        if row.get(column).present {
            true
        } else {
            self.error(
                row.display_row,
                column,
                rule,
                format!("{} is mandatory", column),
            );
            false
        }
    }

    /// 可选字段: 有值时必须精确等于候选值之一
    pub fn check_choice(
        &mut self,
        row: &RowView<'_>,
        column: &str,
        allowed: &[&str],
        rule: &str,
    ) {
        let cell = row.get(column);
        if cell.present && !is_one_of(&cell.value, allowed) {
            self.error(
                row.display_row,
                column,
                rule,
                format!(
                    "{} must be {} (found '{}')",
                    column,
                    describe_choices(allowed),
                    cell.value
                ),
            );
        }
    }

    /// 保留字段: 有值即报错
    pub fn check_must_be_empty(&mut self, row: &RowView<'_>, column: &str, rule: &str) {
        let cell = row.get(column);
        if cell.present {
            self.error(
                row.display_row,
                column,
                rule,
                format!("{} must be left empty (found '{}')", column, cell.value),
            );
        }
    }

    pub fn finish(self) -> Vec<Violation> {
        self.violations
    }
}

/// 逐行遍历数据行; 空白占位行只用于保持行号, 不参与规则
pub fn rows<'a>(
    sheet: &'a Sheet,
    columns: &'a ColumnIndex,
) -> impl Iterator<Item = RowView<'a>> + 'a {
    sheet
        .data_rows
        .iter()
        .enumerate()
        .filter(|(_, cells)| !is_placeholder_row(cells))
        .map(move |(idx, cells)| RowView::new(cells, columns, idx))
}

fn is_placeholder_row(cells: &[CellValue]) -> bool {
    cells.iter().all(|cell| matches!(cell, CellValue::Empty))
}
