use crate::settings::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;

// =========================================================================
// 日志配置 (输出到控制台 + 文件)
// =========================================================================

/// 初始化全局 tracing 订阅者
///
/// 返回的 guard 必须一直持有，否则后台写文件线程会立即退出、丢日志。
/// 日志级别用 `RUST_LOG` 控制，默认 info。
pub fn init_logging(settings: &LoggingSettings) -> WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // 1. 文件输出器：每天生成一个新的日志文件 (logs/birken.log.2026-xx-xx)
    let file_appender = tracing_appender::rolling::daily(&settings.dir, &settings.file_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // 2. 控制台层
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .compact();

    // 3. 文件层：不要颜色代码，带上源码位置
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // 4. 注册全局订阅者
    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}
