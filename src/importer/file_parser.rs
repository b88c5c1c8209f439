// ==========================================
// 调查元数据校验系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls/.xlsm/.xlsb/.ods) / CSV (.csv)
// 约定: 第 1 行为表头; 单元格保留原始空白（供 U-01 检查）
// ==========================================

use crate::config::ParserConfig;
use crate::domain::{CellValue, Sheet, TabularDocument};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser_trait::FileParser;
use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

const EXCEL_EXTENSIONS: [&str; 5] = ["xlsx", "xls", "xlsm", "xlsb", "ods"];

/// 检查文件存在
fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// 去掉行尾的空单元格
fn trim_trailing_empty(mut cells: Vec<CellValue>) -> Vec<CellValue> {
    while matches!(cells.last(), Some(CellValue::Empty)) {
        cells.pop();
    }
    cells
}

/// 原始行 → Sheet
/// 空白行保留为空占位行, 下标与表格中的行号一一对应
fn build_sheet(name: String, raw_rows: Vec<Vec<CellValue>>) -> Sheet {
    let rows = raw_rows.into_iter().map(trim_trailing_empty).collect();
    Sheet::from_raw_rows(name, rows)
}

// ==========================================
// CSV Parser 实现
// ==========================================
// 单个工作表, 名称取文件名（不含扩展名）
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvParser;

impl CsvParser {
    /// 从任意 Reader 解析（无表头模式读取, 第一条记录作为表头）
    pub fn parse_reader<R: Read>(&self, sheet_name: &str, reader: R) -> ImportResult<TabularDocument> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        // csv reader 会跳过空行; 按记录起始行号补齐占位行
        let mut raw_rows: Vec<Vec<CellValue>> = Vec::new();
        let mut next_line: u64 = 1;
        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(next_line);
            while next_line < line {
                raw_rows.push(Vec::new());
                next_line += 1;
            }
            // 引号内换行的记录占多行
            let embedded_newlines: u64 = record
                .iter()
                .map(|field| field.matches('\n').count() as u64)
                .sum();
            next_line = line + 1 + embedded_newlines;
            raw_rows.push(record.iter().map(CellValue::from).collect());
        }

        debug!(sheet = sheet_name, rows = raw_rows.len(), "CSV 读取完成");

        let sheet = build_sheet(sheet_name.to_string(), raw_rows);
        Ok(TabularDocument::new(vec![sheet]))
    }
}

impl FileParser for CsvParser {
    fn parse_document(&self, file_path: &Path) -> ImportResult<TabularDocument> {
        ensure_exists(file_path)?;

        // 检查扩展名
        let ext = extension_of(file_path);
        if !ext.is_empty() && ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let sheet_name = file_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Sheet1".to_string());

        let file = File::open(file_path)?;
        self.parse_reader(&sheet_name, file)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 读取全部工作表（按工作簿顺序）
pub struct ExcelParser {
    config: ParserConfig,
}

impl ExcelParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// 单元格转换: 字符串 → Text, 数值 → Number, 日期 → 按配置格式渲染的 Text
    pub fn convert_cell(&self, cell: &Data) -> CellValue {
        let format = self.config.datetime_format.as_str();
        match cell {
            Data::Empty | Data::Error(_) => CellValue::Empty,
            Data::String(s) if s.is_empty() => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
            Data::DateTime(_) => match cell.as_datetime() {
                Some(dt) => CellValue::Text(dt.format(format).to_string()),
                None => CellValue::Text(cell.to_string()),
            },
            Data::DateTimeIso(s) => CellValue::Text(render_iso_datetime(s, format)),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
        }
    }

    /// 区域 → 原始行; 按 range.start() 补齐左上方的空行空列
    pub fn range_rows(&self, range: &Range<Data>) -> Vec<Vec<CellValue>> {
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let mut raw_rows: Vec<Vec<CellValue>> = (0..start_row).map(|_| Vec::new()).collect();
        for row in range.rows() {
            let mut cells = vec![CellValue::Empty; start_col as usize];
            cells.extend(row.iter().map(|cell| self.convert_cell(cell)));
            raw_rows.push(cells);
        }
        raw_rows
    }
}

impl Default for ExcelParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

/// ISO 日期/时间文本按配置格式渲染; 无法识别时原样返回
fn render_iso_datetime(value: &str, format: &str) -> String {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(format).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return dt.format(format).to_string();
        }
    }
    value.to_string()
}

impl FileParser for ExcelParser {
    fn parse_document(&self, file_path: &Path) -> ImportResult<TabularDocument> {
        ensure_exists(file_path)?;

        // 检查扩展名
        let ext = extension_of(file_path);
        if !EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开工作簿（按扩展名自动识别格式）
        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::EmptyWorkbook(file_path.display().to_string()));
        }

        let mut sheets = Vec::with_capacity(sheet_names.len());
        for sheet_name in sheet_names {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| ImportError::ExcelParseError(format!("{}: {}", sheet_name, e)))?;

            let raw_rows = self.range_rows(&range);

            debug!(sheet = %sheet_name, rows = raw_rows.len(), "工作表读取完成");
            sheets.push(build_sheet(sheet_name, raw_rows));
        }

        Ok(TabularDocument::new(sheets))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
#[derive(Default)]
pub struct UniversalFileParser {
    config: ParserConfig,
}

impl UniversalFileParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<TabularDocument> {
        self.parse_document(file_path.as_ref())
    }
}

impl FileParser for UniversalFileParser {
    fn parse_document(&self, file_path: &Path) -> ImportResult<TabularDocument> {
        let ext = extension_of(file_path);

        let document = match ext.as_str() {
            "csv" => CsvParser.parse_document(file_path)?,
            e if EXCEL_EXTENSIONS.contains(&e) => {
                ExcelParser::new(self.config.clone()).parse_document(file_path)?
            }
            _ => return Err(ImportError::UnsupportedFormat(ext)),
        };

        info!(
            file = %file_path.display(),
            sheets = document.sheets.len(),
            "文件解析完成"
        );
        Ok(document)
    }
}
