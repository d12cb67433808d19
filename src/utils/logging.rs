use anyhow::{Context, Result};
/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;
use crate::quiz::SessionSummary;

/// 初始化日志
///
/// 终端用于显示答题画面，日志统一写入 `output_log_file`（不带 ANSI 颜色）。
/// 优先使用 `RUST_LOG`，否则按 `verbose_logging` 选择 debug / info。
pub fn init(config: &Config) -> Result<()> {
    init_log_file(&config.output_log_file)?;

    let file = OpenOptions::new()
        .append(true)
        .open(&config.output_log_file)
        .with_context(|| format!("无法打开日志文件: {}", config.output_log_file))?;

    let default_level = if config.verbose_logging { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(env_filter)
        .try_init()
        .context("日志系统初始化失败")?;

    Ok(())
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n答题日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法写入日志文件: {}", log_file_path))?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 最高法院案例答题");
    info!("🌐 案例服务: {}", config.api_base_url);
    info!("📋 每轮案例数: {}", config.expected_case_count);
    info!("{}", "=".repeat(60));
}

/// 打印本轮统计信息
///
/// # 参数
/// - `summary`: 本轮汇总
pub fn log_session_complete(summary: &SessionSummary) {
    info!("\n{}", "=".repeat(60));
    info!("📊 本轮答题统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    for outcome in &summary.outcomes {
        info!(
            "{} {}",
            if outcome.correct { "✅" } else { "❌" },
            truncate_text(&outcome.case_name, 60)
        );
    }
    info!("🎯 得分: {}/{}", summary.score, summary.total);
    info!("⏳ 距下一轮: {} 秒", summary.seconds_until_next);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
