// ==========================================
// 调查元数据校验系统 - 表格文档模型
// ==========================================
// 用途: 文件解析器产出,校验引擎只读
// 生命周期: 单次校验调用内不可变
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// CellValue - 原始单元格值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    Empty,          // 缺失
    Number(f64),    // 数值
    Text(String),   // 文本（保留原始空白）
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// 原始文本（仅 Text 单元格）
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// 单元格渲染为字符串（未裁剪）
    pub fn render(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(_) => false,
            CellValue::Text(s) => s.trim().is_empty(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// 数值渲染: 整数值不带小数部分（3.0 → "3"）
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

// ==========================================
// Sheet - 单个工作表
// ==========================================
// header_row: 第 1 行（已渲染并裁剪）
// data_rows: 不含表头; 下标 i 对应显示行号 i + 2
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub header_row: Vec<String>,
    pub data_rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(
        name: impl Into<String>,
        header_row: Vec<String>,
        data_rows: Vec<Vec<CellValue>>,
    ) -> Self {
        Self {
            name: name.into(),
            header_row,
            data_rows,
        }
    }

    /// 由原始行构建: 第 0 行作为表头, 其余为数据行
    pub fn from_raw_rows(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut rows = rows.into_iter();
        let header_row = rows
            .next()
            .map(|header| {
                header
                    .iter()
                    .map(|cell| cell.render().trim().to_string())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: name.into(),
            header_row,
            data_rows: rows.collect(),
        }
    }

    /// 裁剪后的工作表名称
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }

    /// 完全没有任何行（既无表头也无数据）
    pub fn is_empty(&self) -> bool {
        self.header_row.is_empty() && self.data_rows.is_empty()
    }
}

// ==========================================
// TabularDocument - 有序工作表序列
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabularDocument {
    pub sheets: Vec<Sheet>,
}

impl TabularDocument {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.trimmed_name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_number() {
        assert_eq!(CellValue::Number(3.0).render(), "3");
        assert_eq!(CellValue::Number(2.5).render(), "2.5");
        assert_eq!(CellValue::Number(9876543210.0).render(), "9876543210");
        assert_eq!(CellValue::Number(-4.0).render(), "-4");
    }

    #[test]
    fn test_from_raw_rows_splits_header() {
        let sheet = Sheet::from_raw_rows(
            "Access Sheet",
            vec![
                vec![CellValue::text(" Name "), CellValue::text("Status")],
                vec![CellValue::text("user_1"), CellValue::text("Active")],
            ],
        );
        assert_eq!(sheet.header_row, vec!["Name", "Status"]);
        assert_eq!(sheet.data_rows.len(), 1);
        assert!(!sheet.is_empty());
    }

    #[test]
    fn test_from_raw_rows_empty() {
        let sheet = Sheet::from_raw_rows("Survey Master", vec![]);
        assert!(sheet.is_empty());
        assert!(sheet.header_row.is_empty());
    }

    #[test]
    fn test_blank_cells() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::text("   ").is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
        assert_eq!(CellValue::from(""), CellValue::Empty);
    }
}
