//! 日志初始化
//!
//! TUI 占用终端，日志只写入数据目录下的文件，
//! 级别通过 WATCHPOST_LOG 环境变量控制

use std::io;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// 初始化文件日志（<数据目录>/logs/watchpost.log，按天滚动）
pub fn init(data_dir: &Path) -> io::Result<()> {
    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "watchpost.log");

    let env_filter = EnvFilter::try_from_env("WATCHPOST_LOG")
        .unwrap_or_else(|_| EnvFilter::new("watchpost=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(file_appender).with_ansi(false))
        .init();

    tracing::info!("watchpost starting, log dir: {}", log_dir.display());

    Ok(())
}
