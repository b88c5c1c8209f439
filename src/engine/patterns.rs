// ==========================================
// 调查元数据校验系统 - 格式正则与固定枚举
// ==========================================
// 职责: 各工作表规则集共用的正则 / 取值列表
// 注意: Survey Master 取值为 "delete data", Question Master 为 "Delete Data";
//       比较区分大小写
// ==========================================

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// English letters and whitespace only.
    pub static ref STATE_NAME: Regex = Regex::new(r"^[A-Za-z\s]+$").unwrap();

    /// ASCII alphanumerics, underscore, Devanagari, Gujarati and Bengali script.
    pub static ref LOCALIZED_IDENTIFIER: Regex = Regex::new(
        r"^[A-Za-z0-9_\x{0900}-\x{097F}\x{0A80}-\x{0AFF}\x{0980}-\x{09FF}]+$"
    )
    .unwrap();

    pub static ref SURVEY_ID: Regex = Regex::new(r"^[A-Za-z0-9_]+$").unwrap();

    pub static ref LAUNCH_DATE: Regex =
        Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4} 00:00:00$").unwrap();

    pub static ref CLOSE_DATE: Regex =
        Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4} 23:59:00$").unwrap();

    /// Q1, Q1.2, Q1.a, Q1.1.a
    pub static ref QUESTION_ID: Regex =
        Regex::new(r"^Q[0-9]+(\.[0-9]+|\.a|\.1\.a)?$").unwrap();

    /// Indian 10-digit mobile number.
    pub static ref MOBILE: Regex = Regex::new(r"^[6-9][0-9]{9}$").unwrap();

    pub static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub const YES_NO: &[&str] = &["Yes", "No"];

pub const SURVEY_MODES: &[&str] = &["New Data", "Correction", "delete data", "None"];

pub const QUESTION_MODES: &[&str] = &["New Data", "Correction", "Delete Data", "None"];

pub const QUESTION_TYPES: &[&str] = &[
    "Multiple Choice Single Select",
    "Multiple Choice Multi Select",
    "Drop Down",
    "Text Response",
    "Tabular Text Input",
    "Tabular Drop Down",
    "Tabular Check Box",
    "Image Upload",
    "Video Upload",
    "Likert Scale",
    "Calendar",
];

/// Question types that require a `Table_Header_value`.
pub const TABULAR_QUESTION_TYPES: &[&str] =
    &["Tabular Text Input", "Tabular Drop Down", "Tabular Check Box"];

pub const ACCESS_STATUSES: &[&str] = &["Active", "Inactive"];

/// Exact, case-sensitive membership.
pub fn is_one_of(value: &str, allowed: &[&str]) -> bool {
    allowed.iter().any(|candidate| *candidate == value)
}

/// Human readable list for messages: `'A', 'B' or 'C'`.
pub fn describe_choices(allowed: &[&str]) -> String {
    let quoted: Vec<String> = allowed.iter().map(|v| format!("'{}'", v)).collect();
    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
        Some((last, _)) => last.clone(),
        None => String::new(),
    }
}
