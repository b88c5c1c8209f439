// ==========================================
// 调查元数据校验系统 - Designation Mapping 规则集
// ==========================================
// 规则: DM-01 ~ DM-12
// 特殊: 表头必须恰好 5 列; 同一级别最多两条且 Medium 不同
// ==========================================

use crate::config::RuleLimits;
use crate::domain::{Severity, Sheet, Violation};
use crate::engine::columns::ColumnIndex;
use crate::engine::patterns::{LOCALIZED_IDENTIFIER, STATE_NAME};
use crate::engine::rules::common::{rows, SheetContext, HEADER_ROW};
use std::collections::{BTreeMap, HashMap};

pub mod columns {
    pub const STATE: &str = "State";
    pub const MEDIUM: &str = "Medium";
    pub const MEDIUM_IN_ENGLISH: &str = "Medium_in_english";
    pub const DESIGNATIONS: &str = "List of Designations";
    pub const LEVEL: &str = "Hierarchical Level";
}

use columns::*;

pub const REQUIRED_COLUMNS: [&str; 5] = [STATE, MEDIUM, MEDIUM_IN_ENGLISH, DESIGNATIONS, LEVEL];

/// 表头列数必须恰好等于必填列数
pub const EXPECTED_COLUMN_COUNT: usize = REQUIRED_COLUMNS.len();

/// 同一 Hierarchical Level 的一次出现
#[derive(Debug, Clone)]
struct LevelOccurrence {
    row: usize,
    medium: String,
}

pub fn validate(sheet: &Sheet, limits: &RuleLimits) -> Vec<Violation> {
    let columns = ColumnIndex::from_header(&sheet.header_row);
    let mut ctx = SheetContext::new(sheet);

    ctx.check_required_columns(&columns, &REQUIRED_COLUMNS, "DM-01");

    if sheet.header_row.len() != EXPECTED_COLUMN_COUNT {
        ctx.push(
            Some(HEADER_ROW),
            "",
            "Header Row",
            Severity::Error,
            "DM-02",
            format!(
                "Designation Mapping must have exactly {} columns (found {})",
                EXPECTED_COLUMN_COUNT,
                sheet.header_row.len()
            ),
        );
    }

    let mut levels: BTreeMap<i64, Vec<LevelOccurrence>> = BTreeMap::new();

    for row in rows(sheet, &columns) {
        ctx.check_whitespace(&row);

        if ctx.require_value(&row, STATE, "DM-03") {
            let state = row.get(STATE);
            if !STATE_NAME.is_match(&state.value) {
                ctx.error(
                    row.display_row,
                    STATE,
                    "DM-04",
                    format!(
                        "State must contain only English letters and spaces (found '{}')",
                        state.value
                    ),
                );
            }
        }

        ctx.require_value(&row, MEDIUM, "DM-05");
        ctx.require_value(&row, MEDIUM_IN_ENGLISH, "DM-06");

        if ctx.require_value(&row, DESIGNATIONS, "DM-07") {
            let designation = row.get(DESIGNATIONS);
            if !LOCALIZED_IDENTIFIER.is_match(&designation.value) {
                ctx.error(
                    row.display_row,
                    DESIGNATIONS,
                    "DM-08",
                    format!(
                        "Designation may only contain letters, digits and underscores (found '{}')",
                        designation.value
                    ),
                );
            }
        }

        if ctx.require_value(&row, LEVEL, "DM-09") {
            let level = row.get(LEVEL);
            match parse_level(&level.value) {
                Some(value) => levels.entry(value).or_default().push(LevelOccurrence {
                    row: row.display_row,
                    medium: row.get(MEDIUM).value,
                }),
                None => ctx.error(
                    row.display_row,
                    LEVEL,
                    "DM-10",
                    format!(
                        "Hierarchical Level must be a non-negative whole number (found '{}')",
                        level.value
                    ),
                ),
            }
        }
    }

    check_level_duplicates(&mut ctx, &levels, limits.max_level_occurrences);

    ctx.finish()
}

/// 非负整数
fn parse_level(value: &str) -> Option<i64> {
    value.parse::<i64>().ok().filter(|level| *level >= 0)
}

/// 级别重复: 超过上限 → DM-12; 未超限但 Medium 相同 → DM-11
fn check_level_duplicates(
    ctx: &mut SheetContext,
    levels: &BTreeMap<i64, Vec<LevelOccurrence>>,
    max_occurrences: usize,
) {
    for (level, occurrences) in levels {
        if occurrences.len() > max_occurrences {
            let row_list: Vec<String> = occurrences.iter().map(|o| o.row.to_string()).collect();
            ctx.error(
                occurrences[max_occurrences].row,
                LEVEL,
                "DM-12",
                format!(
                    "Hierarchical Level {} appears {} times (rows {}); at most {} entries are allowed per level",
                    level,
                    occurrences.len(),
                    row_list.join(", "),
                    max_occurrences
                ),
            );
            continue;
        }

        let mut first_row_by_medium: HashMap<&str, usize> = HashMap::new();
        for occurrence in occurrences {
            match first_row_by_medium.get(occurrence.medium.as_str()) {
                Some(first_row) => ctx.error(
                    occurrence.row,
                    LEVEL,
                    "DM-11",
                    format!(
                        "Hierarchical Level {} is repeated with the same Medium '{}' (rows {} and {})",
                        level, occurrence.medium, first_row, occurrence.row
                    ),
                ),
                None => {
                    first_row_by_medium.insert(occurrence.medium.as_str(), occurrence.row);
                }
            }
        }
    }
}
