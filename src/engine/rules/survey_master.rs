// ==========================================
// 调查元数据校验系统 - Survey Master 规则集
// ==========================================
// 规则: SM-01 ~ SM-15
// 注意: Mode 枚举中 "delete data" 为小写, 与 Question Master 不同
// ==========================================

use crate::config::RuleLimits;
use crate::domain::{Sheet, Violation};
use crate::engine::columns::{ColumnIndex, RowView};
use crate::engine::patterns::{self, SURVEY_MODES, YES_NO};
use crate::engine::rules::common::{rows, SheetContext};
use std::collections::HashMap;

pub mod columns {
    pub const SURVEY_ID: &str = "Survey ID";
    pub const SURVEY_NAME: &str = "Survey Name";
    pub const SURVEY_DESCRIPTION: &str = "Survey Description";
    pub const AVAILABLE_MEDIUMS: &str = "Available_mediums";
    pub const HIERARCHICAL_ACCESS_LEVEL: &str = "Hierarchical Access Level";
    pub const IN_SCHOOL: &str = "In School";
    pub const ACCEPT_MULTIPLE_ENTRIES: &str = "Accept multiple Entries";
    pub const LAUNCH_DATE: &str = "Launch Date";
    pub const CLOSE_DATE: &str = "Close Date";
    pub const MODE: &str = "Mode";
    pub const VISIBLE_ON_REPORT_BOT: &str = "Visible_on_report_bot";
    pub const IS_ACTIVE: &str = "Is Active?";
    pub const DOWNLOAD_RESPONSE: &str = "Download_response";
    pub const GEO_FENCING: &str = "Geo Fencing";
    pub const GEO_TAGGING: &str = "Geo Tagging";
    pub const TEST_SURVEY: &str = "Test Survey";
}

use columns::*;

pub const REQUIRED_COLUMNS: [&str; 16] = [
    columns::SURVEY_ID,
    SURVEY_NAME,
    SURVEY_DESCRIPTION,
    AVAILABLE_MEDIUMS,
    HIERARCHICAL_ACCESS_LEVEL,
    IN_SCHOOL,
    ACCEPT_MULTIPLE_ENTRIES,
    columns::LAUNCH_DATE,
    columns::CLOSE_DATE,
    MODE,
    VISIBLE_ON_REPORT_BOT,
    IS_ACTIVE,
    DOWNLOAD_RESPONSE,
    GEO_FENCING,
    GEO_TAGGING,
    TEST_SURVEY,
];

/// 只接受 "Yes" / "No" 的字段
pub const YES_NO_COLUMNS: [&str; 6] = [
    IN_SCHOOL,
    ACCEPT_MULTIPLE_ENTRIES,
    VISIBLE_ON_REPORT_BOT,
    IS_ACTIVE,
    DOWNLOAD_RESPONSE,
    GEO_TAGGING,
];

/// 逗号分隔列表, 不允许出现空白
const NO_WHITESPACE_COLUMNS: [(&str, &str); 2] = [
    (AVAILABLE_MEDIUMS, "SM-07"),
    (HIERARCHICAL_ACCESS_LEVEL, "SM-08"),
];

/// 功能锁定字段: 有值时只能是 "No"
const LOCKED_NO_COLUMNS: [(&str, &str); 2] = [(GEO_FENCING, "SM-14"), (TEST_SURVEY, "SM-15")];

pub fn validate(sheet: &Sheet, limits: &RuleLimits) -> Vec<Violation> {
    let columns = ColumnIndex::from_header(&sheet.header_row);
    let mut ctx = SheetContext::new(sheet);

    ctx.check_required_columns(&columns, &REQUIRED_COLUMNS, "SM-01");

    // Survey ID → 首次出现的行号
    let mut seen_ids: HashMap<String, usize> = HashMap::new();

    for row in rows(sheet, &columns) {
        ctx.check_whitespace(&row);
        check_survey_id(&mut ctx, &row, &mut seen_ids);
        ctx.require_value(&row, SURVEY_NAME, "SM-05");
        check_description(&mut ctx, &row, limits.survey_description_max_words);

        for (column, rule) in NO_WHITESPACE_COLUMNS {
            let cell = row.get(column);
            if cell.present && cell.value.chars().any(char::is_whitespace) {
                ctx.error(
                    row.display_row,
                    column,
                    rule,
                    format!(
                        "{} must be a comma-separated list without spaces (found '{}')",
                        column, cell.value
                    ),
                );
            }
        }

        check_dates(&mut ctx, &row);
        ctx.check_choice(&row, MODE, SURVEY_MODES, "SM-12");

        for column in YES_NO_COLUMNS {
            ctx.check_choice(&row, column, YES_NO, "SM-13");
        }

        for (column, rule) in LOCKED_NO_COLUMNS {
            let cell = row.get(column);
            if cell.present && cell.value != "No" {
                ctx.error(
                    row.display_row,
                    column,
                    rule,
                    format!("{} must be 'No' (found '{}')", column, cell.value),
                );
            }
        }
    }

    ctx.finish()
}

/// SM-02 / SM-03 / SM-04
fn check_survey_id(
    ctx: &mut SheetContext,
    row: &RowView<'_>,
    seen_ids: &mut HashMap<String, usize>,
) {
    if !ctx.require_value(row, columns::SURVEY_ID, "SM-03") {
        return;
    }

    let id = row.get(columns::SURVEY_ID).value;
    if let Some(first_row) = seen_ids.get(&id) {
        ctx.error(
            row.display_row,
            columns::SURVEY_ID,
            "SM-02",
            format!("Duplicate Survey ID '{}' (first used in row {})", id, first_row),
        );
    } else {
        seen_ids.insert(id.clone(), row.display_row);
    }

    if !patterns::SURVEY_ID.is_match(&id) {
        ctx.error(
            row.display_row,
            columns::SURVEY_ID,
            "SM-04",
            format!(
                "Survey ID may only contain letters, digits and underscores without spaces (found '{}')",
                id
            ),
        );
    }
}

/// SM-06: 描述按空白切分计词
fn check_description(ctx: &mut SheetContext, row: &RowView<'_>, max_words: usize) {
    let description = row.get(SURVEY_DESCRIPTION);
    if !description.present {
        return;
    }
    let words = description.value.split_whitespace().count();
    if words > max_words {
        ctx.error(
            row.display_row,
            SURVEY_DESCRIPTION,
            "SM-06",
            format!(
                "Survey Description must not exceed {} words (found {})",
                max_words, words
            ),
        );
    }
}

/// SM-09 / SM-10 / SM-11
fn check_dates(ctx: &mut SheetContext, row: &RowView<'_>) {
    if ctx.require_value(row, columns::LAUNCH_DATE, "SM-09") {
        let launch = row.get(columns::LAUNCH_DATE);
        if !patterns::LAUNCH_DATE.is_match(&launch.value) {
            ctx.error(
                row.display_row,
                columns::LAUNCH_DATE,
                "SM-10",
                format!(
                    "Launch Date must be in 'DD/MM/YYYY 00:00:00' format (found '{}')",
                    launch.value
                ),
            );
        }
    }

    let close = row.get(columns::CLOSE_DATE);
    if close.present && !patterns::CLOSE_DATE.is_match(&close.value) {
        ctx.error(
            row.display_row,
            columns::CLOSE_DATE,
            "SM-11",
            format!(
                "Close Date must be in 'DD/MM/YYYY 23:59:00' format (found '{}')",
                close.value
            ),
        );
    }
}
