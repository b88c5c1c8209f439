// ==========================================
// 调查元数据校验系统 - 违规记录与汇总
// ==========================================
// 用途: 校验引擎输出（只读）
// 红线: 数据质量问题一律建模为 Violation, 不抛错
// ==========================================

use crate::domain::types::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Violation - 单条违规记录
// ==========================================
// row: None = 不对应具体行（文档级/工作表级）
//      Some(1) = 表头行; Some(i + 2) = 第 i 条数据行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub id: String,        // 本次运行内唯一（sheet-row-rule-序号）
    pub sheet: String,     // 工作表名（文档级为 "File Structure"）
    pub row: Option<usize>,
    pub column: String,    // 列名（表头文本）
    pub field: String,     // 业务字段
    pub message: String,   // 违规描述
    pub severity: Severity,
    pub rule: String,      // 稳定规则编码（如 DM-07）
}

impl Violation {
    /// 行号展示（文档级显示为 "-"）
    pub fn row_label(&self) -> String {
        match self.row {
            Some(row) => row.to_string(),
            None => "-".to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

// ==========================================
// Summary - 违规汇总
// ==========================================
// 不变量: total_errors == Σ errors_by_sheet, total_warnings 同理
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_errors: usize,
    pub total_warnings: usize,
    pub errors_by_sheet: BTreeMap<String, usize>,
    pub warnings_by_sheet: BTreeMap<String, usize>,
}

impl Summary {
    /// 存在错误时下游应阻断入库
    pub fn has_blocking_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn is_clean(&self) -> bool {
        self.total_errors == 0 && self.total_warnings == 0
    }
}

// ==========================================
// ValidationOutcome - 引擎纯输出
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub violations: Vec<Violation>,
    pub summary: Summary,
}

impl ValidationOutcome {
    /// 按工作表分组（有序）
    pub fn by_sheet(&self) -> BTreeMap<&str, Vec<&Violation>> {
        let mut groups: BTreeMap<&str, Vec<&Violation>> = BTreeMap::new();
        for v in &self.violations {
            groups.entry(v.sheet.as_str()).or_default().push(v);
        }
        groups
    }

    /// 按规则编码分组（有序）
    pub fn by_rule(&self) -> BTreeMap<&str, Vec<&Violation>> {
        let mut groups: BTreeMap<&str, Vec<&Violation>> = BTreeMap::new();
        for v in &self.violations {
            groups.entry(v.rule.as_str()).or_default().push(v);
        }
        groups
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_warning())
    }
}

// ==========================================
// ValidationReport - 校验报告（API 层封装）
// ==========================================
// 用途: 携带运行 ID / 来源文件 / 耗时, 供导出与展示
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub run_id: String,                 // 运行 ID（UUID）
    pub source: Option<String>,         // 源文件名
    pub generated_at: DateTime<Utc>,    // 生成时间
    pub elapsed_ms: u128,               // 解析 + 校验耗时（毫秒）
    pub violations: Vec<Violation>,
    pub summary: Summary,
}

impl ValidationReport {
    pub fn from_outcome(
        outcome: ValidationOutcome,
        source: Option<String>,
        elapsed: std::time::Duration,
    ) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            source,
            generated_at: Utc::now(),
            elapsed_ms: elapsed.as_millis(),
            violations: outcome.violations,
            summary: outcome.summary,
        }
    }
}
