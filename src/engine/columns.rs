// ==========================================
// 调查元数据校验系统 - 列定位器
// ==========================================
// 职责: 表头名 → 列下标（每个工作表只构建一次）
// 规则: 表头重名时取第一次出现的位置
// ==========================================

use crate::domain::CellValue;
use crate::engine::cell::{normalize, NormalizedCell};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    headers: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    pub fn from_header(header_row: &[String]) -> Self {
        let headers: Vec<String> = header_row.iter().map(|h| h.trim().to_string()).collect();
        let mut positions = HashMap::with_capacity(headers.len());
        for (idx, name) in headers.iter().enumerate() {
            if !name.is_empty() {
                positions.entry(name.clone()).or_insert(idx);
            }
        }
        Self { headers, positions }
    }

    /// 列下标; 不存在返回 None
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// 按给定顺序返回缺失的列
    pub fn missing<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| !self.contains(name))
            .collect()
    }

    /// 列下标对应的表头名（超出表头或表头为空时使用 "Column N"）
    pub fn header_name(&self, idx: usize) -> String {
        match self.headers.get(idx) {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("Column {}", idx + 1),
        }
    }
}

// ==========================================
// RowView - 按列名读取一行数据
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    cells: &'a [CellValue],
    columns: &'a ColumnIndex,
    pub display_row: usize,
}

impl<'a> RowView<'a> {
    /// index: 数据行下标（不含表头）
    pub fn new(cells: &'a [CellValue], columns: &'a ColumnIndex, index: usize) -> Self {
        Self {
            cells,
            columns,
            display_row: index + 2,
        }
    }

    /// 按列名取标准化值; 列不存在或行过短均视为缺失
    pub fn get(&self, name: &str) -> NormalizedCell {
        match self.columns.position(name) {
            Some(idx) => normalize(self.cells.get(idx)),
            None => NormalizedCell::absent(),
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    pub fn cells(&self) -> &'a [CellValue] {
        self.cells
    }

    pub fn header_name(&self, idx: usize) -> String {
        self.columns.header_name(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_position_and_missing() {
        let index = ColumnIndex::from_header(&header(&["State", "Medium", " Name "]));
        assert_eq!(index.position("Medium"), Some(1));
        assert_eq!(index.position("Name"), Some(2));
        assert_eq!(index.position("Status"), None);
        assert_eq!(index.missing(&["State", "Status", "Bot ID"]), vec!["Status", "Bot ID"]);
    }

    #[test]
    fn test_duplicate_header_first_wins() {
        let index = ColumnIndex::from_header(&header(&["Mode", "Mode"]));
        assert_eq!(index.position("Mode"), Some(0));
    }

    #[test]
    fn test_header_name_fallback() {
        let index = ColumnIndex::from_header(&header(&["State", ""]));
        assert_eq!(index.header_name(0), "State");
        assert_eq!(index.header_name(1), "Column 2");
        assert_eq!(index.header_name(5), "Column 6");
    }

    #[test]
    fn test_row_view_short_row() {
        let index = ColumnIndex::from_header(&header(&["A", "B", "C"]));
        let cells = vec![CellValue::text("x")];
        let row = RowView::new(&cells, &index, 0);
        assert_eq!(row.display_row, 2);
        assert_eq!(row.get("A").value, "x");
        assert!(!row.get("C").present);
        assert!(!row.get("Z").present);
    }
}
