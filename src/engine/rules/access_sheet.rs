// ==========================================
// 调查元数据校验系统 - Access Sheet 规则集
// ==========================================
// 规则: AS-01 ~ AS-15
// 警告级: Bot ID 有值（需人工确认）/ Email 格式异常
// 唯一性: User ID 全表唯一; (State, Mobile) 组合全表唯一
// ==========================================

use crate::config::RuleLimits;
use crate::domain::{Sheet, Violation};
use crate::engine::columns::{ColumnIndex, RowView};
use crate::engine::patterns::{ACCESS_STATUSES, EMAIL, LOCALIZED_IDENTIFIER, MOBILE};
use crate::engine::rules::common::{rows, SheetContext};
use std::collections::HashMap;

pub mod columns {
    pub const DESIGNATION: &str = "Designation";
    pub const LEVEL: &str = "Hierarchical Level";
    pub const BOT_ID: &str = "Bot ID";
    pub const STATE: &str = "State";
    pub const NAME: &str = "Name";
    pub const USER_ID: &str = "User ID";
    pub const STATUS: &str = "Status";
    pub const MOBILE: &str = "Mobile";
    pub const EMAIL: &str = "Email";
}

use columns::{BOT_ID, DESIGNATION, LEVEL, NAME, STATE, STATUS, USER_ID};

pub const REQUIRED_COLUMNS: [&str; 7] = [DESIGNATION, LEVEL, BOT_ID, STATE, NAME, USER_ID, STATUS];

/// 单次规则集调用内的唯一性累加器
#[derive(Debug, Default)]
struct SeenKeys {
    user_ids: HashMap<String, usize>,
    state_mobiles: HashMap<(String, String), usize>,
}

pub fn validate(sheet: &Sheet, _limits: &RuleLimits) -> Vec<Violation> {
    let columns = ColumnIndex::from_header(&sheet.header_row);
    let mut ctx = SheetContext::new(sheet);

    ctx.check_required_columns(&columns, &REQUIRED_COLUMNS, "AS-01");

    let mut seen = SeenKeys::default();

    for row in rows(sheet, &columns) {
        ctx.check_whitespace(&row);

        ctx.require_value(&row, DESIGNATION, "AS-02");
        check_level(&mut ctx, &row);

        let bot_id = row.get(BOT_ID);
        if bot_id.present {
            ctx.warning(
                row.display_row,
                BOT_ID,
                "AS-05",
                format!(
                    "Bot ID '{}' is filled in; verify the bot mapping manually",
                    bot_id.value
                ),
            );
        }

        ctx.require_value(&row, STATE, "AS-06");

        if ctx.require_value(&row, NAME, "AS-07") {
            let name = row.get(NAME);
            if !LOCALIZED_IDENTIFIER.is_match(&name.value) {
                ctx.error(
                    row.display_row,
                    NAME,
                    "AS-08",
                    format!(
                        "Name may only contain letters, digits and underscores (found '{}')",
                        name.value
                    ),
                );
            }
        }

        check_user_id(&mut ctx, &row, &mut seen);

        if ctx.require_value(&row, STATUS, "AS-11") {
            ctx.check_choice(&row, STATUS, ACCESS_STATUSES, "AS-12");
        }

        check_mobile(&mut ctx, &row, &mut seen);

        let email = row.get(columns::EMAIL);
        if email.present && !EMAIL.is_match(&email.value) {
            ctx.warning(
                row.display_row,
                columns::EMAIL,
                "AS-15",
                format!("Email '{}' does not look like a valid address", email.value),
            );
        }
    }

    ctx.finish()
}

/// AS-03 / AS-04: 整数（允许负数）
fn check_level(ctx: &mut SheetContext, row: &RowView<'_>) {
    if !ctx.require_value(row, LEVEL, "AS-03") {
        return;
    }
    let level = row.get(LEVEL);
    if level.value.parse::<i64>().is_err() {
        ctx.error(
            row.display_row,
            LEVEL,
            "AS-04",
            format!(
                "Hierarchical Level must be a whole number (found '{}')",
                level.value
            ),
        );
    }
}

/// AS-09 / AS-10
fn check_user_id(ctx: &mut SheetContext, row: &RowView<'_>, seen: &mut SeenKeys) {
    if !ctx.require_value(row, USER_ID, "AS-09") {
        return;
    }
    let user_id = row.get(USER_ID).value;
    match seen.user_ids.get(&user_id) {
        Some(first_row) => ctx.error(
            row.display_row,
            USER_ID,
            "AS-10",
            format!("Duplicate User ID '{}' (first used in row {})", user_id, first_row),
        ),
        None => {
            seen.user_ids.insert(user_id, row.display_row);
        }
    }
}

/// AS-13 / AS-14: 可选列 Mobile
fn check_mobile(ctx: &mut SheetContext, row: &RowView<'_>, seen: &mut SeenKeys) {
    let mobile = row.get(columns::MOBILE);
    if !mobile.present {
        return;
    }

    if !MOBILE.is_match(&mobile.value) {
        ctx.error(
            row.display_row,
            columns::MOBILE,
            "AS-13",
            format!(
                "Mobile must be a 10-digit number starting with 6, 7, 8 or 9 (found '{}')",
                mobile.value
            ),
        );
    }

    let state = row.get(STATE).value;
    let key = (state, mobile.value);
    match seen.state_mobiles.get(&key) {
        Some(first_row) => ctx.error(
            row.display_row,
            columns::MOBILE,
            "AS-14",
            format!(
                "Mobile '{}' is already registered for State '{}' (first used in row {})",
                key.1, key.0, first_row
            ),
        ),
        None => {
            seen.state_mobiles.insert(key, row.display_row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CellValue, Severity};

    const HEADER: [&str; 9] = [
        DESIGNATION,
        LEVEL,
        BOT_ID,
        STATE,
        NAME,
        USER_ID,
        STATUS,
        columns::MOBILE,
        columns::EMAIL,
    ];

    fn valid_row(user_id: &str, mobile: &str) -> Vec<CellValue> {
        [
            "Teacher",
            "3",
            "",
            "Karnataka",
            "ramesh_k",
            user_id,
            "Active",
            mobile,
            "ramesh@school.in",
        ]
        .iter()
        .map(|s| CellValue::from(*s))
        .collect()
    }

    fn set(row: &mut [CellValue], column: &str, value: &str) {
        let idx = HEADER.iter().position(|c| *c == column).unwrap();
        row[idx] = CellValue::from(value);
    }

    fn run(rows: Vec<Vec<CellValue>>) -> Vec<Violation> {
        let header = HEADER.iter().map(|s| s.to_string()).collect();
        let sheet = Sheet::new("Access Sheet", header, rows);
        validate(&sheet, &RuleLimits::default())
    }

    fn rules(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.rule.as_str()).collect()
    }

    #[test]
    fn test_valid_rows() {
        let violations = run(vec![
            valid_row("U001", "9876543210"),
            valid_row("U002", "9876543211"),
        ]);
        assert!(violations.is_empty(), "{:?}", violations);
    }

    #[test]
    fn test_mobile_format() {
        let violations = run(vec![valid_row("U001", "1234567890")]);
        assert_eq!(rules(&violations), vec!["AS-13"]);
    }

    #[test]
    fn test_numeric_mobile_cell() {
        let mut row = valid_row("U001", "");
        row[7] = CellValue::Number(9876543210.0);
        assert!(run(vec![row]).is_empty());
    }

    #[test]
    fn test_state_mobile_pair_unique() {
        let mut other_state = valid_row("U003", "9876543210");
        set(&mut other_state, STATE, "Kerala");
        let violations = run(vec![
            valid_row("U001", "9876543210"),
            valid_row("U002", "9876543210"),
            other_state,
        ]);
        assert_eq!(rules(&violations), vec!["AS-14"]);
        assert_eq!(violations[0].row, Some(3));
    }

    #[test]
    fn test_duplicate_user_id() {
        let violations = run(vec![
            valid_row("U001", "9876543210"),
            valid_row("U001", "9876543211"),
        ]);
        assert_eq!(rules(&violations), vec!["AS-10"]);
    }

    #[test]
    fn test_bot_id_is_warning() {
        let mut row = valid_row("U001", "9876543210");
        set(&mut row, BOT_ID, "BOT_7");
        let violations = run(vec![row]);
        assert_eq!(rules(&violations), vec!["AS-05"]);
        assert_eq!(violations[0].severity, Severity::Warning);
    }

    #[test]
    fn test_email_is_warning() {
        let mut row = valid_row("U001", "9876543210");
        set(&mut row, columns::EMAIL, "ramesh.school.in");
        let violations = run(vec![row]);
        assert_eq!(rules(&violations), vec!["AS-15"]);
        assert_eq!(violations[0].severity, Severity::Warning);
    }

    #[test]
    fn test_level_accepts_negative_integer() {
        let mut row = valid_row("U001", "9876543210");
        set(&mut row, LEVEL, "-1");
        assert!(run(vec![row.clone()]).is_empty());

        set(&mut row, LEVEL, "1.5");
        assert_eq!(rules(&run(vec![row])), vec!["AS-04"]);
    }

    #[test]
    fn test_status_and_name() {
        let mut row = valid_row("U001", "9876543210");
        set(&mut row, STATUS, "active");
        set(&mut row, NAME, "Ramesh K");
        assert_eq!(rules(&run(vec![row])), vec!["AS-08", "AS-12"]);
    }

    #[test]
    fn test_whitespace_status() {
        let mut row = valid_row("U001", "9876543210");
        set(&mut row, STATUS, " Active");
        let violations = run(vec![row]);
        assert_eq!(rules(&violations), vec!["U-01"]);
        assert_eq!(violations[0].column, STATUS);
    }

    #[test]
    fn test_missing_values() {
        let mut row = vec![CellValue::Empty; HEADER.len()];
        assert!(run(vec![row.clone()]).is_empty());

        set(&mut row, "Mobile", "9876543210");
        assert_eq!(
            rules(&run(vec![row])),
            vec!["AS-02", "AS-03", "AS-06", "AS-07", "AS-09", "AS-11"]
        );
    }

    #[test]
    fn test_optional_columns_absent() {
        let header: Vec<String> = REQUIRED_COLUMNS.iter().map(|s| s.to_string()).collect();
        let row: Vec<CellValue> = valid_row("U001", "")[..7].to_vec();
        let sheet = Sheet::new("Access Sheet", header, vec![row]);
        assert!(validate(&sheet, &RuleLimits::default()).is_empty());
    }
}
