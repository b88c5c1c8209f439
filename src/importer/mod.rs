// ==========================================
// 调查元数据校验系统 - 导入层
// ==========================================
// 职责: 外部文件 → TabularDocument
// 支持: Excel, CSV
// 红线: 解析失败返回 ImportError, 不产出 Violation
// ==========================================

// 模块声明
pub mod error;
pub mod file_parser;
pub mod file_parser_trait;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};

// 重导出 Trait 接口
pub use file_parser_trait::FileParser;
