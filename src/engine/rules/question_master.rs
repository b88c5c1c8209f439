// ==========================================
// 调查元数据校验系统 - Question Master 规则集
// ==========================================
// 规则: QM-01 ~ QM-19
// 特殊: 不检查必填列, 各字段规则仅在列存在时执行
// 注意: Mode 枚举中 "Delete Data" 为首字母大写, 与 Survey Master 不同
// ==========================================

use crate::config::RuleLimits;
use crate::domain::{Sheet, Violation};
use crate::engine::columns::{ColumnIndex, RowView};
use crate::engine::patterns::{
    is_one_of, QUESTION_ID, QUESTION_MODES, QUESTION_TYPES, TABULAR_QUESTION_TYPES, YES_NO,
};
use crate::engine::rules::common::{rows, SheetContext};
use std::collections::HashMap;

pub mod columns {
    pub const SURVEY_ID: &str = "Survey ID";
    pub const MEDIUM: &str = "Medium";
    pub const MEDIUM_IN_ENGLISH: &str = "Medium_in_english";
    pub const QUESTION_ID: &str = "Question_ID";
    pub const QUESTION_TYPE: &str = "Question Type";
    pub const IS_DYNAMIC: &str = "IsDynamic";
    pub const QUESTION_DESCRIPTION: &str = "Question_Description_Optional";
    pub const MAX_VALUE: &str = "Max_Value";
    pub const MIN_VALUE: &str = "Min_Value";
    pub const IS_MANDATORY: &str = "Is Mandatory";
    pub const TABLE_HEADER_VALUE: &str = "Table_Header_value";
    pub const MODE: &str = "Mode";
    pub const QUESTION_MEDIA_TYPE: &str = "Question_Media_Type";
    pub const CORRECT_ANSWER: &str = "Correct_Answer_Optional";
    pub const CHILDREN_QUESTIONS: &str = "Children Questions";
}

use columns::*;

/// Question_Media_Type 当前只允许的取值
pub const MEDIA_TYPE_NONE: &str = "None";

pub fn validate(sheet: &Sheet, limits: &RuleLimits) -> Vec<Violation> {
    let columns = ColumnIndex::from_header(&sheet.header_row);
    let mut ctx = SheetContext::new(sheet);

    // Question_ID → 首次出现的行号
    let mut seen_ids: HashMap<String, usize> = HashMap::new();

    for row in rows(sheet, &columns) {
        ctx.check_whitespace(&row);

        ctx.require_value(&row, SURVEY_ID, "QM-01");
        ctx.require_value(&row, MEDIUM, "QM-02");
        ctx.require_value(&row, MEDIUM_IN_ENGLISH, "QM-03");

        check_question_id(&mut ctx, &row, &mut seen_ids);
        check_question_type(&mut ctx, &row);

        ctx.check_must_be_empty(&row, IS_DYNAMIC, "QM-09");

        let description = row.get(QUESTION_DESCRIPTION);
        let length = description.value.chars().count();
        if description.present && length > limits.question_description_max_chars {
            ctx.error(
                row.display_row,
                QUESTION_DESCRIPTION,
                "QM-10",
                format!(
                    "{} must not exceed {} characters (found {})",
                    QUESTION_DESCRIPTION, limits.question_description_max_chars, length
                ),
            );
        }

        check_value_range(&mut ctx, &row);
        ctx.check_choice(&row, IS_MANDATORY, YES_NO, "QM-12");
        check_table_header(&mut ctx, &row);
        ctx.check_choice(&row, MODE, QUESTION_MODES, "QM-15");
        check_media_type(&mut ctx, &row);

        ctx.check_must_be_empty(&row, CORRECT_ANSWER, "QM-18");
        ctx.check_must_be_empty(&row, CHILDREN_QUESTIONS, "QM-19");
    }

    ctx.finish()
}

/// QM-04 / QM-05 / QM-06
fn check_question_id(
    ctx: &mut SheetContext,
    row: &RowView<'_>,
    seen_ids: &mut HashMap<String, usize>,
) {
    if !ctx.require_value(row, columns::QUESTION_ID, "QM-04") {
        return;
    }

    let id = row.get(columns::QUESTION_ID).value;
    if let Some(first_row) = seen_ids.get(&id) {
        ctx.error(
            row.display_row,
            columns::QUESTION_ID,
            "QM-05",
            format!("Duplicate Question_ID '{}' (first used in row {})", id, first_row),
        );
    } else {
        seen_ids.insert(id.clone(), row.display_row);
    }

    if !QUESTION_ID.is_match(&id) {
        ctx.error(
            row.display_row,
            columns::QUESTION_ID,
            "QM-06",
            format!(
                "Question_ID must look like Q1, Q1.2, Q1.a or Q1.1.a (found '{}')",
                id
            ),
        );
    }
}

/// QM-07 / QM-08
fn check_question_type(ctx: &mut SheetContext, row: &RowView<'_>) {
    if !ctx.require_value(row, QUESTION_TYPE, "QM-07") {
        return;
    }
    let question_type = row.get(QUESTION_TYPE);
    if !is_one_of(&question_type.value, QUESTION_TYPES) {
        ctx.error(
            row.display_row,
            QUESTION_TYPE,
            "QM-08",
            format!("Unsupported Question Type '{}'", question_type.value),
        );
    }
}

/// QM-11: 两者都是数值时 Max 必须严格大于 Min
fn check_value_range(ctx: &mut SheetContext, row: &RowView<'_>) {
    let max = parse_number(&row.get(MAX_VALUE).value);
    let min = parse_number(&row.get(MIN_VALUE).value);
    if let (Some(max), Some(min)) = (max, min) {
        if max <= min {
            ctx.error(
                row.display_row,
                MAX_VALUE,
                "QM-11",
                format!(
                    "Max_Value ({}) must be greater than Min_Value ({})",
                    row.get(MAX_VALUE).value,
                    row.get(MIN_VALUE).value
                ),
            );
        }
    }
}

fn parse_number(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// QM-13 / QM-14: 表格类题型必须填写表头, 其他题型必须留空
fn check_table_header(ctx: &mut SheetContext, row: &RowView<'_>) {
    if !row.has_column(TABLE_HEADER_VALUE) {
        return;
    }
    let question_type = row.get(QUESTION_TYPE);
    let table_header = row.get(TABLE_HEADER_VALUE);
    let is_tabular = is_one_of(&question_type.value, TABULAR_QUESTION_TYPES);

    if is_tabular && !table_header.present {
        ctx.error(
            row.display_row,
            TABLE_HEADER_VALUE,
            "QM-13",
            format!(
                "Table_Header_value is mandatory for Question Type '{}'",
                question_type.value
            ),
        );
    } else if !is_tabular && table_header.present {
        ctx.error(
            row.display_row,
            TABLE_HEADER_VALUE,
            "QM-14",
            format!(
                "Table_Header_value must be empty unless Question Type is tabular (found '{}')",
                table_header.value
            ),
        );
    }
}

/// QM-16 / QM-17
fn check_media_type(ctx: &mut SheetContext, row: &RowView<'_>) {
    if !ctx.require_value(row, QUESTION_MEDIA_TYPE, "QM-16") {
        return;
    }
    let media_type = row.get(QUESTION_MEDIA_TYPE);
    if media_type.value != MEDIA_TYPE_NONE {
        ctx.error(
            row.display_row,
            QUESTION_MEDIA_TYPE,
            "QM-17",
            format!(
                "Question_Media_Type must be '{}' (found '{}')",
                MEDIA_TYPE_NONE, media_type.value
            ),
        );
    }
}
