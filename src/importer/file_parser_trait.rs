// ==========================================
// 调查元数据校验系统 - 文件解析 Trait
// ==========================================
// 职责: 定义 文件 → TabularDocument 的解析接口（不包含实现）
// ==========================================

use crate::domain::TabularDocument;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件为表格文档
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(TabularDocument): 按工作簿顺序排列的工作表
    /// - Err: 文件不存在、格式不支持、内容无法解码
    fn parse_document(&self, file_path: &Path) -> ImportResult<TabularDocument>;
}
