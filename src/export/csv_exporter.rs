// ==========================================
// 调查元数据校验系统 - CSV 报告导出
// ==========================================
// 输出格式:
//   明细: Sheet, Row, Column, Field, Message, Severity, Rule
//   空行
//   汇总: Total Errors / Total Warnings / Errors by Sheet / Warnings by Sheet
// ==========================================

use crate::config::ExportConfig;
use crate::domain::{Summary, ValidationReport, Violation};
use crate::export::error::ExportResult;
use csv::WriterBuilder;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// 明细表头
pub const REPORT_HEADER: [&str; 7] = [
    "Sheet", "Row", "Column", "Field", "Message", "Severity", "Rule",
];

#[derive(Debug, Clone, Default)]
pub struct CsvReportExporter {
    config: ExportConfig,
}

impl CsvReportExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// 写入任意 Writer
    pub fn write<W: Write>(&self, report: &ValidationReport, writer: W) -> ExportResult<()> {
        let writer = self.write_violations(&report.violations, writer)?;
        if self.config.include_summary {
            self.write_summary(&report.summary, writer)?;
        }
        Ok(())
    }

    /// 写入文件（覆盖已有文件）
    pub fn export_to_path<P: AsRef<Path>>(
        &self,
        report: &ValidationReport,
        path: P,
    ) -> ExportResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write(report, &mut writer)?;
        writer.flush()?;

        info!(
            path = %path.display(),
            violations = report.violations.len(),
            "校验报告已导出"
        );
        Ok(())
    }

    fn write_violations<W: Write>(&self, violations: &[Violation], writer: W) -> ExportResult<W> {
        let mut csv_writer = WriterBuilder::new()
            .delimiter(self.config.delimiter_byte())
            .from_writer(writer);

        csv_writer.write_record(REPORT_HEADER)?;
        for v in violations {
            csv_writer.write_record([
                v.sheet.as_str(),
                v.row_label().as_str(),
                v.column.as_str(),
                v.field.as_str(),
                v.message.as_str(),
                v.severity.as_str(),
                v.rule.as_str(),
            ])?;
        }

        let writer = csv_writer.into_inner().map_err(|e| e.into_error())?;
        Ok(writer)
    }

    fn write_summary<W: Write>(&self, summary: &Summary, mut writer: W) -> ExportResult<()> {
        // 空行分隔明细与汇总（csv writer 会把单个空字段写成 ""）
        writer.write_all(b"\n")?;

        let mut csv_writer = WriterBuilder::new()
            .delimiter(self.config.delimiter_byte())
            .flexible(true)
            .from_writer(writer);

        let total_errors = summary.total_errors.to_string();
        let total_warnings = summary.total_warnings.to_string();
        csv_writer.write_record(["Total Errors", total_errors.as_str()])?;
        csv_writer.write_record(["Total Warnings", total_warnings.as_str()])?;
        write_counts(&mut csv_writer, "Errors by Sheet", &summary.errors_by_sheet)?;
        write_counts(&mut csv_writer, "Warnings by Sheet", &summary.warnings_by_sheet)?;

        csv_writer.flush()?;
        Ok(())
    }
}

fn write_counts<W: Write>(
    csv_writer: &mut csv::Writer<W>,
    title: &str,
    counts: &BTreeMap<String, usize>,
) -> ExportResult<()> {
    csv_writer.write_record([title])?;
    for (sheet, count) in counts {
        csv_writer.write_record([sheet.as_str(), count.to_string().as_str()])?;
    }
    Ok(())
}
