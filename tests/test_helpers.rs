// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 构造合法的 4 工作表文档, 并按需注入问题数据
// ==========================================

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use survey_sheet_validator::domain::{CellValue, Sheet, TabularDocument};

pub const DESIGNATION_MAPPING: &str = "Designation Mapping";
pub const SURVEY_MASTER: &str = "Survey Master";
pub const QUESTION_MASTER: &str = "Question Master";
pub const ACCESS_SHEET: &str = "Access Sheet";

/// 文本行 → 单元格（空串为 Empty）
pub fn row(values: &[&str]) -> Vec<CellValue> {
    values.iter().map(|v| CellValue::from(*v)).collect()
}

fn header(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn designation_mapping_sheet() -> Sheet {
    Sheet::new(
        DESIGNATION_MAPPING,
        header(&[
            "State",
            "Medium",
            "Medium_in_english",
            "List of Designations",
            "Hierarchical Level",
        ]),
        vec![
            vec![
                CellValue::text("Bihar"),
                CellValue::text("Hindi"),
                CellValue::text("Hindi"),
                CellValue::text("Teacher"),
                CellValue::Number(1.0),
            ],
            vec![
                CellValue::text("Bihar"),
                CellValue::text("English"),
                CellValue::text("English"),
                CellValue::text("Teacher"),
                CellValue::Number(1.0),
            ],
            vec![
                CellValue::text("Bihar"),
                CellValue::text("Hindi"),
                CellValue::text("Hindi"),
                CellValue::text("Head_Master"),
                CellValue::Number(2.0),
            ],
        ],
    )
}

pub const SURVEY_MASTER_HEADER: [&str; 16] = [
    "Survey ID",
    "Survey Name",
    "Survey Description",
    "Available_mediums",
    "Hierarchical Access Level",
    "In School",
    "Accept multiple Entries",
    "Launch Date",
    "Close Date",
    "Mode",
    "Visible_on_report_bot",
    "Is Active?",
    "Download_response",
    "Geo Fencing",
    "Geo Tagging",
    "Test Survey",
];

pub fn survey_row(survey_id: &str) -> Vec<CellValue> {
    row(&[
        survey_id,
        "Attendance Survey",
        "Daily attendance of teachers",
        "Hindi,English",
        "1,2",
        "Yes",
        "No",
        "01/04/2024 00:00:00",
        "30/04/2024 23:59:00",
        "New Data",
        "Yes",
        "Yes",
        "No",
        "No",
        "No",
        "No",
    ])
}

pub fn survey_master_sheet() -> Sheet {
    Sheet::new(
        SURVEY_MASTER,
        header(&SURVEY_MASTER_HEADER),
        vec![survey_row("SV_001"), survey_row("SV_002")],
    )
}

pub const QUESTION_MASTER_HEADER: [&str; 15] = [
    "Survey ID",
    "Medium",
    "Medium_in_english",
    "Question_ID",
    "Question Type",
    "IsDynamic",
    "Question_Description_Optional",
    "Max_Value",
    "Min_Value",
    "Is Mandatory",
    "Table_Header_value",
    "Mode",
    "Question_Media_Type",
    "Correct_Answer_Optional",
    "Children Questions",
];

pub fn question_row(question_id: &str, question_type: &str, table_header: &str) -> Vec<CellValue> {
    row(&[
        "SV_001",
        "Hindi",
        "Hindi",
        question_id,
        question_type,
        "",
        "How many students are present today?",
        "100",
        "0",
        "Yes",
        table_header,
        "New Data",
        "None",
        "",
        "",
    ])
}

pub fn question_master_sheet() -> Sheet {
    Sheet::new(
        QUESTION_MASTER,
        header(&QUESTION_MASTER_HEADER),
        vec![
            question_row("Q1", "Text Response", ""),
            question_row("Q2", "Tabular Text Input", "Class,Count"),
            question_row("Q2.1", "Drop Down", ""),
        ],
    )
}

pub const ACCESS_SHEET_HEADER: [&str; 9] = [
    "Designation",
    "Hierarchical Level",
    "Bot ID",
    "State",
    "Name",
    "User ID",
    "Status",
    "Mobile",
    "Email",
];

pub fn access_row(user_id: &str, mobile: &str, email: &str) -> Vec<CellValue> {
    row(&[
        "Teacher", "1", "", "Bihar", "Ravi_Kumar", user_id, "Active", mobile, email,
    ])
}

pub fn access_sheet() -> Sheet {
    Sheet::new(
        ACCESS_SHEET,
        header(&ACCESS_SHEET_HEADER),
        vec![
            access_row("U001", "9876543210", "ravi@school.in"),
            access_row("U002", "8765432109", "sita@school.in"),
        ],
    )
}

// ==========================================
// DocumentBuilder
// ==========================================
pub struct DocumentBuilder {
    sheets: Vec<Sheet>,
}

impl DocumentBuilder {
    /// 从合法的 4 工作表文档开始
    pub fn valid() -> Self {
        Self {
            sheets: vec![
                designation_mapping_sheet(),
                survey_master_sheet(),
                question_master_sheet(),
                access_sheet(),
            ],
        }
    }

    pub fn without_sheet(mut self, name: &str) -> Self {
        self.sheets.retain(|s| s.name != name);
        self
    }

    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        match self.sheets.iter_mut().find(|s| s.name == sheet.name) {
            Some(existing) => *existing = sheet,
            None => self.sheets.push(sheet),
        }
        self
    }

    pub fn push_row(mut self, sheet_name: &str, cells: Vec<CellValue>) -> Self {
        if let Some(sheet) = self.sheets.iter_mut().find(|s| s.name == sheet_name) {
            sheet.data_rows.push(cells);
        }
        self
    }

    /// 覆盖数据行 row_index（从 0 开始）中指定列的值
    pub fn set_cell(mut self, sheet_name: &str, row_index: usize, column: &str, value: CellValue) -> Self {
        if let Some(sheet) = self.sheets.iter_mut().find(|s| s.name == sheet_name) {
            let position = sheet
                .header_row
                .iter()
                .position(|h| h == column)
                .unwrap_or_else(|| panic!("column {} not found in {}", column, sheet_name));
            let cells = &mut sheet.data_rows[row_index];
            if cells.len() <= position {
                cells.resize(position + 1, CellValue::Empty);
            }
            cells[position] = value;
        }
        self
    }

    pub fn build(self) -> TabularDocument {
        TabularDocument::new(self.sheets)
    }
}

/// 写 CSV 文件（逐行拼接, 不做转义）
pub fn write_csv(dir: &Path, file_name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(file_name);
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(&path, content).unwrap();
    path
}
