// ==========================================
// 调查元数据校验系统 - 命令行入口
// ==========================================
// 用法:
//   survey-sheet-validator <file> [--export <out.csv>] [--config <config.json>]
// 退出码:
//   0 = 无错误（可有警告）, 1 = 存在错误, 2 = 文件无法解析 / 参数错误
// ==========================================

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use survey_sheet_validator::api::{ApiError, ValidationApi};
use survey_sheet_validator::config::ConfigManager;
use survey_sheet_validator::domain::ValidationReport;
use survey_sheet_validator::logging;

const USAGE: &str =
    "Usage: survey-sheet-validator <file> [--export <out.csv>] [--config <config.json>]";

#[derive(Debug, PartialEq)]
struct CliArgs {
    file: PathBuf,
    export: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<CliArgs> {
    let mut file = None;
    let mut export = None;
    let mut config = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--export" => {
                let value = args.next().context("--export 缺少输出路径")?;
                export = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = args.next().context("--config 缺少配置文件路径")?;
                config = Some(PathBuf::from(value));
            }
            flag if flag.starts_with("--") => bail!("未知参数: {}", flag),
            _ if file.is_some() => bail!("只能指定一个输入文件"),
            _ => file = Some(PathBuf::from(arg)),
        }
    }

    let file = file.context("缺少输入文件")?;
    Ok(CliArgs {
        file,
        export,
        config,
    })
}

fn print_report(report: &ValidationReport) {
    for v in &report.violations {
        println!(
            "[{}] {} row {} {}: {} ({})",
            v.severity,
            v.sheet,
            v.row_label(),
            v.field,
            v.message,
            v.rule
        );
    }

    println!();
    println!("Total Errors: {}", report.summary.total_errors);
    println!("Total Warnings: {}", report.summary.total_warnings);
    for (sheet, count) in &report.summary.errors_by_sheet {
        println!("  errors   {}: {}", sheet, count);
    }
    for (sheet, count) in &report.summary.warnings_by_sheet {
        println!("  warnings {}: {}", sheet, count);
    }
}

fn run(args: CliArgs) -> Result<ExitCode> {
    let manager = match &args.config {
        Some(path) => ConfigManager::load(path)
            .with_context(|| format!("加载配置失败: {}", path.display()))?,
        None => ConfigManager::from_env_or_default().context("加载配置失败")?,
    };
    let api = ValidationApi::from_manager(manager);

    let report = api
        .validate_file(&args.file)
        .with_context(|| format!("校验失败: {}", args.file.display()))?;

    print_report(&report);

    if let Some(export_path) = &args.export {
        api.export_report(&report, export_path)
            .with_context(|| format!("导出报告失败: {}", export_path.display()))?;
        println!("Report written to {}", export_path.display());
    }

    if report.summary.has_blocking_errors() {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn main() -> ExitCode {
    logging::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    tracing::info!(
        "{} v{} - {}",
        survey_sheet_validator::APP_NAME,
        survey_sheet_validator::VERSION,
        args.file.display()
    );

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:#}", e);
            let decode_failure = e
                .downcast_ref::<ApiError>()
                .map_or(false, ApiError::is_decode_failure);
            if decode_failure {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}
