// ==========================================
// 调查元数据校验系统 - 报告导出错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("报告写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
