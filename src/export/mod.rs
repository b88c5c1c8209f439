// ==========================================
// 调查元数据校验系统 - 报告导出层
// ==========================================
// 职责: ValidationReport → 分隔符文本（CSV）
// ==========================================

pub mod csv_exporter;
pub mod error;

pub use csv_exporter::{CsvReportExporter, REPORT_HEADER};
pub use error::{ExportError, ExportResult};
