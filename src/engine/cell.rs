// ==========================================
// 调查元数据校验系统 - 单元格标准化
// ==========================================
// 职责: 原始单元格 → (裁剪后字符串, 是否有值)
// 红线: 越界单元格视为缺失, 不得 panic
// ==========================================

use crate::domain::CellValue;

/// 标准化后的单元格
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedCell {
    pub value: String, // 裁剪后的字符串
    pub present: bool, // 裁剪后非空
}

impl NormalizedCell {
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        !self.present
    }
}

/// 标准化单元格（None 表示行比表头短, 按缺失处理）
pub fn normalize(cell: Option<&CellValue>) -> NormalizedCell {
    match cell {
        None | Some(CellValue::Empty) => NormalizedCell::absent(),
        Some(value) => {
            let rendered = value.render();
            let trimmed = rendered.trim();
            NormalizedCell {
                present: !trimmed.is_empty(),
                value: trimmed.to_string(),
            }
        }
    }
}

/// 文本单元格是否带首尾空白（数值/缺失单元格不参与）
pub fn has_outer_whitespace(cell: &CellValue) -> bool {
    match cell.as_text() {
        Some(text) => !text.is_empty() && text.trim() != text,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        let cell = normalize(Some(&CellValue::text("  Karnataka ")));
        assert_eq!(cell.value, "Karnataka");
        assert!(cell.present);
    }

    #[test]
    fn test_normalize_absent() {
        assert!(!normalize(None).present);
        assert!(!normalize(Some(&CellValue::Empty)).present);
        assert!(!normalize(Some(&CellValue::text("   "))).present);
    }

    #[test]
    fn test_normalize_number() {
        let cell = normalize(Some(&CellValue::Number(2.0)));
        assert_eq!(cell.value, "2");
        assert!(cell.present);
    }

    #[test]
    fn test_outer_whitespace() {
        assert!(has_outer_whitespace(&CellValue::text(" Active")));
        assert!(has_outer_whitespace(&CellValue::text("Active ")));
        assert!(has_outer_whitespace(&CellValue::text("\tActive")));
        assert!(!has_outer_whitespace(&CellValue::text("Active")));
        assert!(!has_outer_whitespace(&CellValue::text("New Data")));
        assert!(!has_outer_whitespace(&CellValue::Number(5.0)));
        assert!(!has_outer_whitespace(&CellValue::Empty));
    }
}
