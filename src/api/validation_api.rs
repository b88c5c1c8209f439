// ==========================================
// 调查元数据校验系统 - 校验 API
// ==========================================
// 职责: 解析文件 → 校验 → 封装报告 / 导出
// 并发: 单文件校验在 spawn_blocking 中执行; 批量校验相互独立
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, ValidatorConfig};
use crate::domain::{TabularDocument, ValidationOutcome, ValidationReport};
use crate::engine::ValidationEngine;
use crate::export::CsvReportExporter;
use crate::importer::UniversalFileParser;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// 校验API
#[derive(Debug, Clone)]
pub struct ValidationApi {
    config: Arc<ValidatorConfig>,
}

impl ValidationApi {
    /// 创建新的ValidationApi实例
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn from_manager(manager: ConfigManager) -> Self {
        Self::new(manager.into_config())
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    fn engine(&self) -> ValidationEngine {
        ValidationEngine::new(self.config.rules.clone())
    }

    /// 校验已解析的文档（纯计算, 无 I/O）
    pub fn validate_document(&self, document: &TabularDocument) -> ValidationOutcome {
        self.engine().validate(document)
    }

    /// 解析并校验单个文件
    ///
    /// # 返回
    /// - Ok(ValidationReport): 校验报告（数据问题在 violations 中）
    /// - Err(ApiError::ImportError): 文件无法解析
    pub fn validate_file<P: AsRef<Path>>(&self, file_path: P) -> ApiResult<ValidationReport> {
        let file_path = file_path.as_ref();
        let start = Instant::now();

        let parser = UniversalFileParser::new(self.config.parser.clone());
        let document = parser.parse(file_path).map_err(|e| {
            warn!(file = %file_path.display(), error = %e, "文件解析失败");
            e
        })?;

        let outcome = self.validate_document(&document);
        let source = file_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string());
        let report = ValidationReport::from_outcome(outcome, source, start.elapsed());

        info!(
            run_id = %report.run_id,
            file = %file_path.display(),
            sheets = document.sheets.len(),
            errors = report.summary.total_errors,
            warnings = report.summary.total_warnings,
            elapsed_ms = report.elapsed_ms as u64,
            "校验完成"
        );

        Ok(report)
    }

    /// 异步校验（阻塞工作交给 tokio 阻塞线程池）
    pub async fn validate_file_async(&self, file_path: PathBuf) -> ApiResult<ValidationReport> {
        let api = self.clone();
        tokio::task::spawn_blocking(move || api.validate_file(&file_path)).await?
    }

    /// 批量校验: 各文件并发执行, 结果按输入顺序返回, 单个失败不影响其他文件
    pub async fn batch_validate(
        &self,
        file_paths: Vec<PathBuf>,
    ) -> Vec<(PathBuf, ApiResult<ValidationReport>)> {
        let total = file_paths.len();
        let tasks = file_paths.into_iter().map(|path| async move {
            let result = self.validate_file_async(path.clone()).await;
            (path, result)
        });

        let results = join_all(tasks).await;

        let failed = results.iter().filter(|(_, r)| r.is_err()).count();
        info!(total, failed, "批量校验完成");
        results
    }

    /// 导出报告到 CSV 文件
    pub fn export_report<P: AsRef<Path>>(
        &self,
        report: &ValidationReport,
        output_path: P,
    ) -> ApiResult<()> {
        let output_path = output_path.as_ref();
        if output_path.as_os_str().is_empty() {
            return Err(ApiError::InvalidInput("导出路径为空".to_string()));
        }

        CsvReportExporter::new(self.config.export.clone()).export_to_path(report, output_path)?;
        Ok(())
    }
}

impl Default for ValidationApi {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}
