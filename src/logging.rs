// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日志系统
///
/// # 参数
/// - verbose: -v 次数, 决定默认级别 (0=warn, 1=info, 2=debug, 3+=trace)
/// - json: 输出 JSON 格式日志（便于采集）
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（优先于 -v）
///   例如: RUST_LOG=debug 或 RUST_LOG=scaleup_predictor=trace
///
/// # 说明
/// 日志输出到 stderr, stdout 留给预测结果
pub fn init_with_verbosity(verbose: u8, json: bool) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
