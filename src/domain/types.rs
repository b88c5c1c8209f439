// ==========================================
// 调查元数据校验系统 - 领域类型定义
// ==========================================
// 职责: 违规级别 / 工作表种类（封闭枚举分派）
// 红线: 规范工作表名称集合只在此处定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 违规级别 (Severity)
// ==========================================
// 序列化格式: 小写 (与导出文件一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,   // 错误（阻断入库）
    Warning, // 警告（需人工关注）
    Info,    // 提示（仅记录）
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 工作表种类 (Sheet Kind)
// ==========================================
// 按裁剪后的名称精确匹配; 不匹配任何规范名称 → Unrecognized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetKind {
    DesignationMapping,
    SurveyMaster,
    QuestionMaster,
    AccessSheet,
    Unrecognized,
}

/// 文档级违规使用的伪工作表名
pub const FILE_STRUCTURE_SHEET: &str = "File Structure";

impl SheetKind {
    /// 四个规范工作表（顺序即期望顺序）
    pub const CANONICAL: [SheetKind; 4] = [
        SheetKind::DesignationMapping,
        SheetKind::SurveyMaster,
        SheetKind::QuestionMaster,
        SheetKind::AccessSheet,
    ];

    /// 按名称识别工作表种类（先裁剪首尾空白，大小写敏感）
    pub fn from_name(name: &str) -> Self {
        let trimmed = name.trim();
        Self::CANONICAL
            .iter()
            .copied()
            .find(|kind| kind.canonical_name() == Some(trimmed))
            .unwrap_or(SheetKind::Unrecognized)
    }

    /// 规范名称; Unrecognized 没有规范名称
    pub fn canonical_name(&self) -> Option<&'static str> {
        match self {
            SheetKind::DesignationMapping => Some("Designation Mapping"),
            SheetKind::SurveyMaster => Some("Survey Master"),
            SheetKind::QuestionMaster => Some("Question Master"),
            SheetKind::AccessSheet => Some("Access Sheet"),
            SheetKind::Unrecognized => None,
        }
    }

    pub fn is_canonical(&self) -> bool {
        !matches!(self, SheetKind::Unrecognized)
    }

    /// 规范工作表数量
    pub fn expected_count() -> usize {
        Self::CANONICAL.len()
    }
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.canonical_name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "Unrecognized"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_kind_from_name_exact() {
        assert_eq!(SheetKind::from_name("Survey Master"), SheetKind::SurveyMaster);
        assert_eq!(SheetKind::from_name("  Access Sheet "), SheetKind::AccessSheet);
        // 大小写敏感
        assert_eq!(SheetKind::from_name("survey master"), SheetKind::Unrecognized);
        assert_eq!(SheetKind::from_name("Sheet1"), SheetKind::Unrecognized);
    }

    #[test]
    fn test_canonical_names_roundtrip() {
        for kind in SheetKind::CANONICAL {
            let name = kind.canonical_name().unwrap();
            assert_eq!(SheetKind::from_name(name), kind);
        }
        assert_eq!(SheetKind::expected_count(), 4);
    }

    #[test]
    fn test_severity_serialization() {
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
        assert_eq!(Severity::Error.to_string(), "error");
    }
}
